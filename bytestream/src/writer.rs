//! Byte-level writer for encoding wire data.

use crate::error::{ByteError, ByteResult};
use crate::reader::MAX_UINT_WIDTH;

/// A byte-level writer for encoding wire data.
///
/// Writes are accumulated in an internal buffer. Call [`finish`](Self::finish)
/// to get the final byte buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub const fn bytes_written(&self) -> usize {
        self.bytes.len()
    }

    /// Writes a single byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Writes `value` as a `width`-byte little-endian unsigned integer.
    ///
    /// High-order bytes beyond the magnitude of `value` are zero-padded.
    /// A width of zero writes nothing; the value must then be zero.
    ///
    /// # Errors
    ///
    /// Returns [`ByteError::InvalidWidth`] if `width` exceeds 8.
    /// Returns [`ByteError::ValueOutOfRange`] if `value` doesn't fit in
    /// `width` bytes.
    pub fn write_uint(&mut self, value: u64, width: usize) -> ByteResult<()> {
        if width > MAX_UINT_WIDTH {
            return Err(ByteError::InvalidWidth {
                width,
                max_width: MAX_UINT_WIDTH,
            });
        }
        if width < MAX_UINT_WIDTH && value >= 1u64 << (8 * width) {
            return Err(ByteError::ValueOutOfRange { value, width });
        }
        self.bytes.extend_from_slice(&value.to_le_bytes()[..width]);
        Ok(())
    }

    /// Writes a byte slice verbatim.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}
