//! Error types for wire format operations.

use bytestream::ByteError;
use std::fmt;

/// Result type for wire decode operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Errors surfaced while decoding a packet header or frame sequence.
///
/// Every malformed-input path returns one of these to the caller; the codec
/// never logs and never treats an error as fatal. Whether to drop the packet
/// or tear down the connection is a transport-layer decision.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The buffer ended before a field's declared width was satisfied.
    ///
    /// Recoverable: the caller should drop the packet.
    TruncatedInput {
        /// Bytes the current field required.
        requested: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// A frame tag byte matched none of the known classification rules.
    ///
    /// Recoverable: the caller drops the remainder of the packet but keeps
    /// the frames decoded before this point.
    UnrecognizedFrameTag {
        /// The offending tag byte.
        tag: u8,
    },

    /// A frame body uses an encoding this codec does not define.
    UnsupportedEncoding {
        /// What was encountered.
        detail: &'static str,
    },

    /// A byte-primitive failure outside the truncation case.
    ///
    /// Field widths are derived from two-bit masks, so this cannot occur on
    /// any decode path; it exists so the primitive error conversion stays
    /// exhaustive.
    Primitive(ByteError),
}

/// Errors that can occur during encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EncodeError {
    /// A caller-supplied field width is not expressible in the tag/flag bits.
    InvalidWidth {
        /// The width that cannot be encoded.
        width: usize,
    },

    /// A field value does not fit in its caller-supplied width.
    ValueOutOfRange {
        /// The value that was out of range.
        value: u64,
        /// Width available, in bytes.
        width: usize,
    },

    /// A variable-length field exceeds its 2-byte length prefix.
    LengthOverflow {
        /// The actual length in bytes.
        length: usize,
    },

    /// The frame requests an encoding this codec does not define.
    UnsupportedEncoding {
        /// What was requested.
        detail: &'static str,
    },
}

impl From<ByteError> for DecodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::EndOfBuffer {
                requested,
                available,
            } => Self::TruncatedInput {
                requested,
                available,
            },
            other => Self::Primitive(other),
        }
    }
}

impl From<ByteError> for EncodeError {
    fn from(err: ByteError) -> Self {
        match err {
            ByteError::ValueOutOfRange { value, width } => Self::ValueOutOfRange { value, width },
            ByteError::InvalidWidth { width, .. } => Self::InvalidWidth { width },
            // The writer grows its buffer, so EndOfBuffer cannot occur on
            // encode; map it to the width report to stay exhaustive.
            ByteError::EndOfBuffer { requested, .. } => Self::InvalidWidth { width: requested },
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedInput {
                requested,
                available,
            } => {
                write!(
                    f,
                    "truncated input: field needs {requested} bytes, {available} available"
                )
            }
            Self::UnrecognizedFrameTag { tag } => {
                write!(f, "unrecognized frame tag: 0x{tag:02X}")
            }
            Self::UnsupportedEncoding { detail } => {
                write!(f, "unsupported encoding: {detail}")
            }
            Self::Primitive(err) => write!(f, "byte primitive error: {err}"),
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidth { width } => {
                write!(f, "field width {width} bytes is not encodable")
            }
            Self::ValueOutOfRange { value, width } => {
                write!(f, "value {value} cannot be represented in {width} bytes")
            }
            Self::LengthOverflow { length } => {
                write!(f, "length {length} exceeds the 2-byte length field")
            }
            Self::UnsupportedEncoding { detail } => {
                write!(f, "unsupported encoding: {detail}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display_truncated() {
        let err = DecodeError::TruncatedInput {
            requested: 8,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("truncated"));
        assert!(msg.contains('8'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn decode_error_display_unrecognized_tag() {
        let err = DecodeError::UnrecognizedFrameTag { tag: 0xF0 };
        let msg = err.to_string();
        assert!(msg.contains("0xF0"));
    }

    #[test]
    fn decode_error_display_unsupported() {
        let err = DecodeError::UnsupportedEncoding {
            detail: "ACK blocks",
        };
        assert!(err.to_string().contains("ACK blocks"));
    }

    #[test]
    fn encode_error_display_length_overflow() {
        let err = EncodeError::LengthOverflow { length: 70_000 };
        let msg = err.to_string();
        assert!(msg.contains("70000"));
        assert!(msg.contains("2-byte"));
    }

    #[test]
    fn byte_error_truncation_converts() {
        let err: DecodeError = ByteError::EndOfBuffer {
            requested: 4,
            available: 1,
        }
        .into();
        assert_eq!(
            err,
            DecodeError::TruncatedInput {
                requested: 4,
                available: 1
            }
        );
    }

    #[test]
    fn byte_error_other_wraps() {
        let err: DecodeError = ByteError::InvalidWidth {
            width: 9,
            max_width: 8,
        }
        .into();
        assert!(matches!(err, DecodeError::Primitive(_)));
    }

    #[test]
    fn byte_error_encode_converts() {
        let err: EncodeError = ByteError::ValueOutOfRange {
            value: 256,
            width: 1,
        }
        .into();
        assert_eq!(
            err,
            EncodeError::ValueOutOfRange {
                value: 256,
                width: 1
            }
        );
    }
}
