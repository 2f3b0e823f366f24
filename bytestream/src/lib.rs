//! Byte-level primitives for the quicwire codec.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for fixed-width
//! little-endian integer encoding and decoding. It is designed for bounded,
//! panic-free operation with explicit error handling.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **Caller-supplied widths** - Integer widths always come from the
//!   caller (flag bits or protocol constants), never from the value itself.
//!   Self-describing varint encodings are deliberately not provided.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteWriter, ByteReader};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u8(0x0C);
//! writer.write_uint(42, 6).unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_u8().unwrap(), 0x0C);
//! assert_eq!(reader.read_uint(6).unwrap(), 42);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::{ByteReader, MAX_UINT_WIDTH};
pub use writer::ByteWriter;
