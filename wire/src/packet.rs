//! Packet-level codec: the variable-layout header and the frame sequence
//! that follows it.
//!
//! Header field order on the wire: public flags, connection ID, optional
//! version, sequence number, private flags, optional FEC group offset.
//! Every optional field and every field width is governed by flag bits, so
//! decode and encode both walk the same flag-driven layout.

use crate::error::{DecodeError, EncodeError, WireResult};
use crate::frame::{encode_frame, Frame, FrameDecoder};
use crate::header::{PacketHeader, PrivateFlags, PublicFlags};
use bytestream::{ByteReader, ByteWriter};

/// Decodes a packet header from the front of `buf`.
///
/// Returns the header and the number of bytes it occupied; the frame
/// portion starts at that offset. The input is borrowed, never copied.
pub fn decode_header(buf: &[u8]) -> WireResult<(PacketHeader, usize)> {
    let mut reader = ByteReader::new(buf);

    let public_flags = PublicFlags::from_raw(reader.read_u8()?);

    let connection_id = match public_flags.connection_id_width() {
        0 => None,
        width => Some(reader.read_uint(width)?),
    };

    let version = if public_flags.has_version() {
        Some(reader.read_uint(4)? as u32)
    } else {
        None
    };

    let sequence_number = reader.read_uint(public_flags.sequence_number_width())?;

    let private_flags = PrivateFlags::from_raw(reader.read_u8()?);

    let fec_group_offset = if private_flags.has_fec_group() {
        Some(reader.read_u8()?)
    } else {
        None
    };

    let header = PacketHeader {
        public_flags,
        connection_id,
        version,
        sequence_number,
        private_flags,
        fec_group_offset,
    };
    Ok((header, reader.position()))
}

/// Serializes a packet header.
///
/// The header's flag bits are the source of truth for the layout: a field
/// is written exactly when its flag says it is present, at the width the
/// flags select. A header whose fields disagree with its flags (a missing
/// connection ID whose width bits are nonzero, a sequence number too large
/// for its width bits) fails with [`EncodeError`].
pub fn encode_header(header: &PacketHeader) -> Result<Vec<u8>, EncodeError> {
    let mut writer = ByteWriter::new();
    writer.write_u8(header.public_flags.raw());

    match header.public_flags.connection_id_width() {
        0 => {}
        width => {
            writer.write_uint(header.connection_id.unwrap_or_default(), width)?;
        }
    }

    if header.public_flags.has_version() {
        writer.write_uint(u64::from(header.version.unwrap_or_default()), 4)?;
    }

    writer.write_uint(
        header.sequence_number,
        header.public_flags.sequence_number_width(),
    )?;

    writer.write_u8(header.private_flags.raw());

    if header.private_flags.has_fec_group() {
        writer.write_u8(header.fec_group_offset.unwrap_or_default());
    }

    Ok(writer.finish())
}

/// A fully decoded packet: header plus its frame sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    /// The packet header.
    pub header: PacketHeader,
    /// Frames in wire order. Decoding stops after a Padding frame, so
    /// Padding can only appear last.
    pub frames: Vec<Frame>,
}

/// Decodes a complete packet: header, then every frame to the end of the
/// buffer.
///
/// Strict: the first undecodable frame fails the whole call. Callers that
/// want the frames decoded before an error use [`decode_header`] and
/// [`FrameDecoder`] directly.
pub fn decode_packet(buf: &[u8]) -> WireResult<Packet> {
    let (header, header_len) = decode_header(buf)?;
    let frames = FrameDecoder::new(buf, header_len, header.public_flags.sequence_number_width())
        .collect::<WireResult<Vec<_>>>()?;
    Ok(Packet { header, frames })
}

/// Serializes a complete packet.
pub fn encode_packet(packet: &Packet) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = encode_header(&packet.header)?;
    let sequence_number_width = packet.header.public_flags.sequence_number_width();
    for frame in &packet.frames {
        bytes.extend_from_slice(&encode_frame(frame, sequence_number_width)?);
    }
    Ok(bytes)
}
