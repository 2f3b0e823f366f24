//! Wire codec for early-revision QUIC packets: the variable-layout public
//! header and the tagged frame sequence that follows it.
//!
//! The codec is a pure byte transformation. It holds no connection state,
//! performs no I/O, and never interprets what a frame means; it only maps
//! between bytes and typed values. Decoding borrows from the input buffer
//! and copies only into the values it returns; encoding allocates a fresh
//! output buffer and leaves its input untouched.
//!
//! Layout throughout is flag-driven: header flag bits select which fields
//! are present and how wide they are, and frame tag bits do the same for
//! frame bodies. Widths always come from flags or from the caller, never
//! from inspecting values, so a value that does not fit its selected width
//! is an [`EncodeError`], not a silently widened field.
//!
//! Entry points: [`decode_packet`] / [`encode_packet`] for whole packets,
//! [`decode_header`] plus [`FrameDecoder`] for incremental decoding that
//! keeps the frames before a malformed one.

pub mod error;
pub mod error_codes;
pub mod frame;
pub mod header;
pub mod packet;
pub mod ufloat;

pub use error::{DecodeError, EncodeError, WireResult};
pub use error_codes::ErrorCode;
pub use frame::{
    classify, encode_frame, AckFrame, Frame, FrameDecoder, FrameKind, StreamFrame, CLASSIFICATION,
};
pub use header::{PacketHeader, PrivateFlags, PublicFlags};
pub use packet::{decode_header, decode_packet, encode_header, encode_packet, Packet};
pub use ufloat::{from_ufloat16, to_ufloat16, UFLOAT16_MAX};
