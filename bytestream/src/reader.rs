//! Byte-level reader with bounded operations.

use crate::error::{ByteError, ByteResult};

/// Maximum integer width in bytes supported by [`ByteReader::read_uint`].
pub const MAX_UINT_WIDTH: usize = 8;

/// A byte-level reader for decoding wire data.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
///
/// Integer reads are fixed-width little-endian: the caller always supplies
/// the width, derived from flag bits elsewhere in the stream. There is no
/// self-describing (varint-style) encoding here.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` over a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a new `ByteReader` starting at a byte offset.
    ///
    /// The offset is clamped to the end of the slice.
    #[must_use]
    pub fn new_at(data: &'a [u8], offset: usize) -> Self {
        Self {
            data,
            pos: offset.min(data.len()),
        }
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads a single byte.
    pub fn read_u8(&mut self) -> ByteResult<u8> {
        self.ensure(1)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Reads a `width`-byte little-endian unsigned integer.
    ///
    /// `width` must be at most [`MAX_UINT_WIDTH`]. A width of zero reads
    /// nothing and yields zero.
    pub fn read_uint(&mut self, width: usize) -> ByteResult<u64> {
        if width > MAX_UINT_WIDTH {
            return Err(ByteError::InvalidWidth {
                width,
                max_width: MAX_UINT_WIDTH,
            });
        }
        if width == 0 {
            return Ok(0);
        }
        self.ensure(width)?;
        let mut bytes = [0u8; MAX_UINT_WIDTH];
        bytes[..width].copy_from_slice(&self.data[self.pos..self.pos + width]);
        self.pos += width;
        Ok(u64::from_le_bytes(bytes))
    }

    /// Reads exactly `len` bytes as a slice.
    pub fn read_bytes(&mut self, len: usize) -> ByteResult<&'a [u8]> {
        self.ensure(len)?;
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Consumes and returns all remaining bytes.
    #[must_use]
    pub fn rest(&mut self) -> &'a [u8] {
        let slice = &self.data[self.pos..];
        self.pos = self.data.len();
        slice
    }

    fn ensure(&self, bytes: usize) -> ByteResult<()> {
        let available = self.remaining();
        if bytes > available {
            return Err(ByteError::EndOfBuffer {
                requested: bytes,
                available,
            });
        }
        Ok(())
    }
}
