//! Error types for byte-level primitives.

use std::fmt;

/// Result type for byte-level operations.
pub type ByteResult<T> = Result<T, ByteError>;

/// Errors that can occur during byte-level encoding/decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Invalid integer width for the operation.
    InvalidWidth {
        /// The invalid width provided.
        width: usize,
        /// Maximum allowed width in bytes.
        max_width: usize,
    },

    /// Value exceeds the range representable in the specified number of bytes.
    ValueOutOfRange {
        /// The value that was out of range.
        value: u64,
        /// Width available, in bytes.
        width: usize,
    },
}

impl fmt::Display for ByteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EndOfBuffer {
                requested,
                available,
            } => {
                write!(
                    f,
                    "attempted to read {requested} bytes but only {available} bytes available"
                )
            }
            Self::InvalidWidth { width, max_width } => {
                write!(f, "invalid integer width {width}, maximum is {max_width}")
            }
            Self::ValueOutOfRange { value, width } => {
                write!(f, "value {value} cannot be represented in {width} bytes")
            }
        }
    }
}

impl std::error::Error for ByteError {}
