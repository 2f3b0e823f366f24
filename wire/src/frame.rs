//! Frame types, tag classification, and frame body codecs.
//!
//! A frame starts with one tag byte. The tag space is carved up by
//! overlapping masks, so classification order matters: the high bit marks a
//! stream frame regardless of the lower bits, then the two masked families,
//! then the exact single-byte tags. [`CLASSIFICATION`] captures that order
//! explicitly as part of the wire contract instead of leaving it to
//! control-flow order.

use crate::error::{DecodeError, EncodeError, WireResult};
use bytestream::{ByteReader, ByteWriter};

/// Padding frame tag. Padding fills the remainder of the packet.
pub const PADDING_TAG: u8 = 0x00;
/// `RST_STREAM` frame tag.
pub const RESET_STREAM_TAG: u8 = 0x01;
/// `CONNECTION_CLOSE` frame tag.
pub const CONNECTION_CLOSE_TAG: u8 = 0x02;
/// `GOAWAY` frame tag.
pub const GO_AWAY_TAG: u8 = 0x03;
/// `WINDOW_UPDATE` frame tag.
pub const WINDOW_UPDATE_TAG: u8 = 0x04;
/// `BLOCKED` frame tag.
pub const BLOCKED_TAG: u8 = 0x05;
/// `STOP_WAITING` frame tag.
pub const STOP_WAITING_TAG: u8 = 0x06;
/// `PING` frame tag.
pub const PING_TAG: u8 = 0x07;

/// High bit marking a stream frame; the rest of the tag byte is field bits.
pub const STREAM_FLAG: u8 = 0x80;
/// Mask and expected value identifying an ACK frame.
pub const ACK_MASK: u8 = 0xC0;
/// Tag bits of the ACK family.
pub const ACK_TAG: u8 = 0x40;
/// Mask and expected value identifying a congestion-feedback frame.
pub const CONGESTION_FEEDBACK_MASK: u8 = 0xE0;
/// Tag bits of the congestion-feedback family.
pub const CONGESTION_FEEDBACK_TAG: u8 = 0x20;

/// The eleven frame kinds of this protocol revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameKind {
    Padding,
    ResetStream,
    ConnectionClose,
    GoAway,
    WindowUpdate,
    Blocked,
    StopWaiting,
    Ping,
    Stream,
    Ack,
    CongestionFeedback,
}

/// Ordered `(mask, value, kind)` classification rules, evaluated
/// top-to-bottom.
///
/// The masks overlap (`0xFF` matches the Stream, Ack and
/// congestion-feedback rules at once), so the order below is normative:
/// the first matching rule wins.
pub const CLASSIFICATION: [(u8, u8, FrameKind); 11] = [
    (STREAM_FLAG, STREAM_FLAG, FrameKind::Stream),
    (ACK_MASK, ACK_TAG, FrameKind::Ack),
    (
        CONGESTION_FEEDBACK_MASK,
        CONGESTION_FEEDBACK_TAG,
        FrameKind::CongestionFeedback,
    ),
    (0xFF, PADDING_TAG, FrameKind::Padding),
    (0xFF, RESET_STREAM_TAG, FrameKind::ResetStream),
    (0xFF, CONNECTION_CLOSE_TAG, FrameKind::ConnectionClose),
    (0xFF, GO_AWAY_TAG, FrameKind::GoAway),
    (0xFF, WINDOW_UPDATE_TAG, FrameKind::WindowUpdate),
    (0xFF, BLOCKED_TAG, FrameKind::Blocked),
    (0xFF, STOP_WAITING_TAG, FrameKind::StopWaiting),
    (0xFF, PING_TAG, FrameKind::Ping),
];

/// Classifies a frame tag byte.
pub fn classify(tag: u8) -> Result<FrameKind, DecodeError> {
    CLASSIFICATION
        .iter()
        .find(|(mask, value, _)| tag & mask == *value)
        .map(|(_, _, kind)| *kind)
        .ok_or(DecodeError::UnrecognizedFrameTag { tag })
}

/// A stream frame: application data for one stream.
///
/// The tag byte embeds the field widths, so they are carried explicitly
/// here; the encoder never infers a width from a value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamFrame {
    /// Stream identifier.
    pub stream_id: u32,
    /// Stream-ID field width in bytes, 1 through 4.
    pub stream_id_width: usize,
    /// Byte offset of `data` within the stream.
    pub offset: u64,
    /// Offset field width in bytes: 0 (field absent, offset zero) or 2
    /// through 8.
    pub offset_width: usize,
    /// Whether an explicit 2-byte data-length field is present. Without it
    /// (and without FIN) the data runs to the end of the packet, so the
    /// frame must be the last one.
    pub explicit_length: bool,
    /// FIN: no more data will be sent on this stream.
    pub fin: bool,
    /// Stream payload bytes.
    pub data: Vec<u8>,
}

impl StreamFrame {
    /// Tag bits selecting the stream-ID width (`value + 1` bytes).
    pub const STREAM_ID_WIDTH_MASK: u8 = 0x03;
    /// Tag bits selecting the offset width (0 absent, else `value + 1`).
    pub const OFFSET_WIDTH_MASK: u8 = 0x1C;
    const OFFSET_WIDTH_SHIFT: u8 = 2;
    /// Tag bit marking an explicit 2-byte data-length field.
    pub const DATA_LENGTH_FLAG: u8 = 0x20;
    /// Tag bit carrying FIN.
    pub const FIN_FLAG: u8 = 0x40;

    /// Creates a stream frame with the widest (always-valid) field widths
    /// and an explicit length field.
    #[must_use]
    pub fn new(stream_id: u32, offset: u64, data: Vec<u8>) -> Self {
        Self {
            stream_id,
            stream_id_width: 4,
            offset,
            offset_width: 8,
            explicit_length: true,
            fin: false,
            data,
        }
    }
}

/// An acknowledgment frame.
///
/// Only the block-free shape is represented; see [`AckFrame::BLOCKS_FLAG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AckFrame {
    /// Cumulative entropy of the received packets.
    pub received_entropy: u8,
    /// Largest sequence number observed by the peer.
    pub largest_observed: u64,
    /// Largest-observed field width in bytes: 1, 2, 4 or 6.
    pub largest_observed_width: usize,
    /// Time since `largest_observed` arrived, as a raw UFloat16
    /// (see [`crate::ufloat`]).
    pub largest_observed_delta_time: u16,
}

impl AckFrame {
    /// Tag bits selecting the missing-packet delta width inside ACK blocks.
    /// Retained for wire compatibility; blocks themselves are not decoded.
    pub const DELTA_WIDTH_MASK: u8 = 0x03;
    /// Tag bits selecting the largest-observed width.
    pub const LARGEST_OBSERVED_WIDTH_MASK: u8 = 0x0C;
    const LARGEST_OBSERVED_WIDTH_SHIFT: u8 = 2;
    /// Tag bit signalling trailing ACK blocks. Their layout is not defined
    /// by this codec, so decoding fails with `UnsupportedEncoding` rather
    /// than guessing; the encoder never sets this bit.
    pub const BLOCKS_FLAG: u8 = 0x20;

    /// Creates a block-free ACK with the widest largest-observed field.
    #[must_use]
    pub const fn new(received_entropy: u8, largest_observed: u64, delta_time: u16) -> Self {
        Self {
            received_entropy,
            largest_observed,
            largest_observed_width: 6,
            largest_observed_delta_time: delta_time,
        }
    }
}

/// A decoded frame: a closed set of variants, one per frame kind.
///
/// Each variant owns its payload; frames are plain values with no
/// cross-references. Adding a twelfth kind is a compile-checked change in
/// the codec's exhaustive matches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frame {
    /// Fills the remainder of the packet; never followed by more frames.
    Padding,
    /// Abruptly terminates one stream.
    ResetStream {
        /// Stream being reset.
        stream_id: u32,
        /// Protocol error code (see [`crate::ErrorCode`]).
        error_code: u32,
    },
    /// Terminates the connection.
    ConnectionClose {
        /// Protocol error code.
        error_code: u32,
        /// Human-readable close reason.
        reason: String,
    },
    /// Announces that the sender will accept no new streams.
    GoAway {
        /// Protocol error code.
        error_code: u32,
        /// Last stream ID the sender processed.
        last_good_stream_id: u32,
        /// Human-readable reason.
        reason: String,
    },
    /// Raises a stream's flow-control window.
    WindowUpdate {
        /// Affected stream.
        stream_id: u32,
        /// New absolute byte offset the peer may send up to.
        byte_offset: u64,
    },
    /// The sender is blocked on flow control for a stream.
    Blocked {
        /// Blocked stream.
        stream_id: u32,
    },
    /// Tells the peer to stop waiting for old packets.
    StopWaiting {
        /// Entropy of the sent packets being abandoned.
        sent_entropy: u8,
        /// Delta from this packet's sequence number to the least unacked;
        /// its width equals the packet's sequence-number width.
        least_unacked_delta: u64,
    },
    /// Keep-alive probe.
    Ping,
    /// Stream data.
    Stream(StreamFrame),
    /// Acknowledgment.
    Ack(AckFrame),
    /// Congestion feedback. Unused by the protocol at this revision but
    /// still sent by peers, so it is consumed and emitted tag-only.
    CongestionFeedback,
}

impl Frame {
    /// Returns the frame's kind.
    #[must_use]
    pub const fn kind(&self) -> FrameKind {
        match self {
            Self::Padding => FrameKind::Padding,
            Self::ResetStream { .. } => FrameKind::ResetStream,
            Self::ConnectionClose { .. } => FrameKind::ConnectionClose,
            Self::GoAway { .. } => FrameKind::GoAway,
            Self::WindowUpdate { .. } => FrameKind::WindowUpdate,
            Self::Blocked { .. } => FrameKind::Blocked,
            Self::StopWaiting { .. } => FrameKind::StopWaiting,
            Self::Ping => FrameKind::Ping,
            Self::Stream(_) => FrameKind::Stream,
            Self::Ack(_) => FrameKind::Ack,
            Self::CongestionFeedback => FrameKind::CongestionFeedback,
        }
    }
}

/// Lazy decoder over the frame portion of a packet.
///
/// Yields `WireResult<Frame>` items: frames until the buffer is exhausted,
/// a terminal Padding frame, or one `Err` for an unrecoverable tag or body,
/// after which the iterator is fused. Frames already yielded remain valid;
/// a caller seeing the error keeps what it decoded so far.
#[derive(Debug)]
pub struct FrameDecoder<'a> {
    reader: ByteReader<'a>,
    sequence_number_width: usize,
    failed: bool,
}

impl<'a> FrameDecoder<'a> {
    /// Creates a decoder over `buf` starting at `offset`.
    ///
    /// `sequence_number_width` is the packet header's sequence-number width;
    /// the `STOP_WAITING` body reuses it for its delta field.
    #[must_use]
    pub fn new(buf: &'a [u8], offset: usize, sequence_number_width: usize) -> Self {
        Self {
            reader: ByteReader::new_at(buf, offset),
            sequence_number_width,
            failed: false,
        }
    }

    fn decode_next(&mut self) -> WireResult<Frame> {
        let tag = self.reader.read_u8()?;
        match classify(tag)? {
            FrameKind::Stream => self.decode_stream(tag),
            FrameKind::Ack => self.decode_ack(tag),
            FrameKind::CongestionFeedback => Ok(Frame::CongestionFeedback),
            FrameKind::Padding => {
                // Remainder of the packet is padding.
                let _ = self.reader.rest();
                Ok(Frame::Padding)
            }
            FrameKind::ResetStream => {
                let stream_id = self.reader.read_uint(4)? as u32;
                let error_code = self.reader.read_uint(4)? as u32;
                Ok(Frame::ResetStream {
                    stream_id,
                    error_code,
                })
            }
            FrameKind::ConnectionClose => {
                let error_code = self.reader.read_uint(4)? as u32;
                let reason = self.read_reason()?;
                Ok(Frame::ConnectionClose { error_code, reason })
            }
            FrameKind::GoAway => {
                let error_code = self.reader.read_uint(4)? as u32;
                let last_good_stream_id = self.reader.read_uint(4)? as u32;
                let reason = self.read_reason()?;
                Ok(Frame::GoAway {
                    error_code,
                    last_good_stream_id,
                    reason,
                })
            }
            FrameKind::WindowUpdate => {
                let stream_id = self.reader.read_uint(4)? as u32;
                let byte_offset = self.reader.read_uint(8)?;
                Ok(Frame::WindowUpdate {
                    stream_id,
                    byte_offset,
                })
            }
            FrameKind::Blocked => {
                let stream_id = self.reader.read_uint(4)? as u32;
                Ok(Frame::Blocked { stream_id })
            }
            FrameKind::StopWaiting => {
                let sent_entropy = self.reader.read_u8()?;
                let least_unacked_delta = self.reader.read_uint(self.sequence_number_width)?;
                Ok(Frame::StopWaiting {
                    sent_entropy,
                    least_unacked_delta,
                })
            }
            FrameKind::Ping => Ok(Frame::Ping),
        }
    }

    fn decode_stream(&mut self, tag: u8) -> WireResult<Frame> {
        let stream_id_width = usize::from(tag & StreamFrame::STREAM_ID_WIDTH_MASK) + 1;
        let stream_id = self.reader.read_uint(stream_id_width)? as u32;

        let offset_bits =
            usize::from((tag & StreamFrame::OFFSET_WIDTH_MASK) >> StreamFrame::OFFSET_WIDTH_SHIFT);
        let offset_width = if offset_bits == 0 { 0 } else { offset_bits + 1 };
        let offset = self.reader.read_uint(offset_width)?;

        let explicit_length = tag & StreamFrame::DATA_LENGTH_FLAG != 0;
        let fin = tag & StreamFrame::FIN_FLAG != 0;

        let data = if explicit_length {
            let len = self.reader.read_uint(2)? as usize;
            self.reader.read_bytes(len)?.to_vec()
        } else if fin {
            Vec::new()
        } else {
            // No length and no FIN: data runs to the end of the packet.
            self.reader.rest().to_vec()
        };

        Ok(Frame::Stream(StreamFrame {
            stream_id,
            stream_id_width,
            offset,
            offset_width,
            explicit_length,
            fin,
            data,
        }))
    }

    fn decode_ack(&mut self, tag: u8) -> WireResult<Frame> {
        if tag & AckFrame::BLOCKS_FLAG != 0 {
            return Err(DecodeError::UnsupportedEncoding {
                detail: "ACK blocks",
            });
        }
        let received_entropy = self.reader.read_u8()?;
        let largest_observed_width = largest_observed_width(tag);
        let largest_observed = self.reader.read_uint(largest_observed_width)?;
        let largest_observed_delta_time = self.reader.read_uint(2)? as u16;
        Ok(Frame::Ack(AckFrame {
            received_entropy,
            largest_observed,
            largest_observed_width,
            largest_observed_delta_time,
        }))
    }

    fn read_reason(&mut self) -> WireResult<String> {
        let len = self.reader.read_uint(2)? as usize;
        let bytes = self.reader.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

impl Iterator for FrameDecoder<'_> {
    type Item = WireResult<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_empty() {
            return None;
        }
        let result = self.decode_next();
        if result.is_err() {
            // The remaining bytes are not interpretable; fuse the iterator.
            self.failed = true;
        }
        Some(result)
    }
}

const fn largest_observed_width(tag: u8) -> usize {
    match (tag & AckFrame::LARGEST_OBSERVED_WIDTH_MASK) >> AckFrame::LARGEST_OBSERVED_WIDTH_SHIFT {
        0 => 1,
        1 => 2,
        2 => 4,
        _ => 6,
    }
}

const fn largest_observed_bits(width: usize) -> Option<u8> {
    match width {
        1 => Some(0),
        2 => Some(1 << AckFrame::LARGEST_OBSERVED_WIDTH_SHIFT),
        4 => Some(2 << AckFrame::LARGEST_OBSERVED_WIDTH_SHIFT),
        6 => Some(3 << AckFrame::LARGEST_OBSERVED_WIDTH_SHIFT),
        _ => None,
    }
}

/// Serializes one frame to bytes.
///
/// Field widths come from the frame itself (Stream, Ack) or from
/// `sequence_number_width` (`STOP_WAITING`, which reuses the packet
/// header's width); nothing is inferred from values. The returned buffer is
/// freshly allocated; no caller memory is mutated.
pub fn encode_frame(frame: &Frame, sequence_number_width: usize) -> Result<Vec<u8>, EncodeError> {
    let mut writer = ByteWriter::new();
    match frame {
        Frame::Padding => writer.write_u8(PADDING_TAG),
        Frame::Ping => writer.write_u8(PING_TAG),
        Frame::CongestionFeedback => writer.write_u8(CONGESTION_FEEDBACK_TAG),
        Frame::ResetStream {
            stream_id,
            error_code,
        } => {
            writer.write_u8(RESET_STREAM_TAG);
            writer.write_uint(u64::from(*stream_id), 4)?;
            writer.write_uint(u64::from(*error_code), 4)?;
        }
        Frame::ConnectionClose { error_code, reason } => {
            writer.write_u8(CONNECTION_CLOSE_TAG);
            writer.write_uint(u64::from(*error_code), 4)?;
            write_reason(&mut writer, reason)?;
        }
        Frame::GoAway {
            error_code,
            last_good_stream_id,
            reason,
        } => {
            writer.write_u8(GO_AWAY_TAG);
            writer.write_uint(u64::from(*error_code), 4)?;
            writer.write_uint(u64::from(*last_good_stream_id), 4)?;
            write_reason(&mut writer, reason)?;
        }
        Frame::WindowUpdate {
            stream_id,
            byte_offset,
        } => {
            writer.write_u8(WINDOW_UPDATE_TAG);
            writer.write_uint(u64::from(*stream_id), 4)?;
            writer.write_uint(*byte_offset, 8)?;
        }
        Frame::Blocked { stream_id } => {
            writer.write_u8(BLOCKED_TAG);
            writer.write_uint(u64::from(*stream_id), 4)?;
        }
        Frame::StopWaiting {
            sent_entropy,
            least_unacked_delta,
        } => {
            writer.write_u8(STOP_WAITING_TAG);
            writer.write_u8(*sent_entropy);
            writer.write_uint(*least_unacked_delta, sequence_number_width)?;
        }
        Frame::Stream(stream) => encode_stream(&mut writer, stream)?,
        Frame::Ack(ack) => encode_ack(&mut writer, ack)?,
    }
    Ok(writer.finish())
}

fn encode_stream(writer: &mut ByteWriter, stream: &StreamFrame) -> Result<(), EncodeError> {
    if !(1..=4).contains(&stream.stream_id_width) {
        return Err(EncodeError::InvalidWidth {
            width: stream.stream_id_width,
        });
    }
    let offset_bits = match stream.offset_width {
        0 => {
            if stream.offset != 0 {
                return Err(EncodeError::ValueOutOfRange {
                    value: stream.offset,
                    width: 0,
                });
            }
            0
        }
        width @ 2..=8 => (width - 1) as u8,
        width => return Err(EncodeError::InvalidWidth { width }),
    };

    let mut tag = STREAM_FLAG
        | (stream.stream_id_width - 1) as u8
        | (offset_bits << StreamFrame::OFFSET_WIDTH_SHIFT);
    if stream.explicit_length {
        tag |= StreamFrame::DATA_LENGTH_FLAG;
    }
    if stream.fin {
        tag |= StreamFrame::FIN_FLAG;
    }
    writer.write_u8(tag);

    writer.write_uint(u64::from(stream.stream_id), stream.stream_id_width)?;
    writer.write_uint(stream.offset, stream.offset_width)?;
    if stream.explicit_length {
        let len = stream.data.len();
        if len > usize::from(u16::MAX) {
            return Err(EncodeError::LengthOverflow { length: len });
        }
        writer.write_uint(len as u64, 2)?;
    }
    writer.write_bytes(&stream.data);
    Ok(())
}

fn encode_ack(writer: &mut ByteWriter, ack: &AckFrame) -> Result<(), EncodeError> {
    let width_bits =
        largest_observed_bits(ack.largest_observed_width).ok_or(EncodeError::InvalidWidth {
            width: ack.largest_observed_width,
        })?;
    writer.write_u8(ACK_TAG | width_bits);
    writer.write_u8(ack.received_entropy);
    writer.write_uint(ack.largest_observed, ack.largest_observed_width)?;
    writer.write_uint(u64::from(ack.largest_observed_delta_time), 2)?;
    Ok(())
}

fn write_reason(writer: &mut ByteWriter, reason: &str) -> Result<(), EncodeError> {
    let len = reason.len();
    if len > usize::from(u16::MAX) {
        return Err(EncodeError::LengthOverflow { length: len });
    }
    writer.write_uint(len as u64, 2)?;
    writer.write_bytes(reason.as_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8], seq_width: usize) -> Vec<WireResult<Frame>> {
        FrameDecoder::new(bytes, 0, seq_width).collect()
    }

    fn roundtrip(frame: &Frame, seq_width: usize) -> Frame {
        let bytes = encode_frame(frame, seq_width).unwrap();
        let mut decoder = FrameDecoder::new(&bytes, 0, seq_width);
        let decoded = decoder.next().unwrap().unwrap();
        assert!(decoder.next().is_none(), "expected exactly one frame");
        decoded
    }

    // Classification precedence over the overlapping masks.
    #[test]
    fn classify_stream_wins_over_all() {
        assert_eq!(classify(0xFF).unwrap(), FrameKind::Stream);
        assert_eq!(classify(0x80).unwrap(), FrameKind::Stream);
        assert_eq!(classify(0xC0).unwrap(), FrameKind::Stream);
        assert_eq!(classify(0xE7).unwrap(), FrameKind::Stream);
    }

    #[test]
    fn classify_ack_family() {
        assert_eq!(classify(0x40).unwrap(), FrameKind::Ack);
        assert_eq!(classify(0x5C).unwrap(), FrameKind::Ack);
        assert_eq!(classify(0x7F).unwrap(), FrameKind::Ack);
    }

    #[test]
    fn classify_congestion_feedback_family() {
        assert_eq!(classify(0x20).unwrap(), FrameKind::CongestionFeedback);
        assert_eq!(classify(0x3F).unwrap(), FrameKind::CongestionFeedback);
    }

    #[test]
    fn classify_exact_tags() {
        assert_eq!(classify(0x00).unwrap(), FrameKind::Padding);
        assert_eq!(classify(0x01).unwrap(), FrameKind::ResetStream);
        assert_eq!(classify(0x02).unwrap(), FrameKind::ConnectionClose);
        assert_eq!(classify(0x03).unwrap(), FrameKind::GoAway);
        assert_eq!(classify(0x04).unwrap(), FrameKind::WindowUpdate);
        assert_eq!(classify(0x05).unwrap(), FrameKind::Blocked);
        assert_eq!(classify(0x06).unwrap(), FrameKind::StopWaiting);
        assert_eq!(classify(0x07).unwrap(), FrameKind::Ping);
    }

    #[test]
    fn classify_unrecognized() {
        for tag in [0x08u8, 0x0F, 0x10, 0x1F] {
            assert_eq!(
                classify(tag).unwrap_err(),
                DecodeError::UnrecognizedFrameTag { tag },
                "tag 0x{tag:02X}"
            );
        }
    }

    #[test]
    fn classification_rules_cover_every_kind_once() {
        for kind in [
            FrameKind::Padding,
            FrameKind::ResetStream,
            FrameKind::ConnectionClose,
            FrameKind::GoAway,
            FrameKind::WindowUpdate,
            FrameKind::Blocked,
            FrameKind::StopWaiting,
            FrameKind::Ping,
            FrameKind::Stream,
            FrameKind::Ack,
            FrameKind::CongestionFeedback,
        ] {
            let count = CLASSIFICATION.iter().filter(|(_, _, k)| *k == kind).count();
            assert_eq!(count, 1, "{kind:?} should appear exactly once");
        }
    }

    // Decoding.
    #[test]
    fn decode_ping() {
        let frames = decode_all(&[PING_TAG], 1);
        assert_eq!(frames, vec![Ok(Frame::Ping)]);
    }

    #[test]
    fn decode_padding_consumes_remainder() {
        let frames = decode_all(&[PADDING_TAG, 0x00, 0x00, 0x07], 1);
        // The trailing bytes are padding fill, not further frames.
        assert_eq!(frames, vec![Ok(Frame::Padding)]);
    }

    #[test]
    fn decode_reset_stream() {
        let mut bytes = vec![RESET_STREAM_TAG];
        bytes.extend_from_slice(&5u32.to_le_bytes());
        bytes.extend_from_slice(&17u32.to_le_bytes());
        let frames = decode_all(&bytes, 1);
        assert_eq!(
            frames,
            vec![Ok(Frame::ResetStream {
                stream_id: 5,
                error_code: 17
            })]
        );
    }

    #[test]
    fn decode_connection_close() {
        let mut bytes = vec![CONNECTION_CLOSE_TAG];
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&3u16.to_le_bytes());
        bytes.extend_from_slice(b"bye");
        let frames = decode_all(&bytes, 1);
        assert_eq!(
            frames,
            vec![Ok(Frame::ConnectionClose {
                error_code: 16,
                reason: "bye".to_owned()
            })]
        );
    }

    #[test]
    fn decode_window_update_and_blocked() {
        let mut bytes = vec![WINDOW_UPDATE_TAG];
        bytes.extend_from_slice(&9u32.to_le_bytes());
        bytes.extend_from_slice(&0x0102_0304_0506_0708u64.to_le_bytes());
        bytes.push(BLOCKED_TAG);
        bytes.extend_from_slice(&9u32.to_le_bytes());
        let frames = decode_all(&bytes, 1);
        assert_eq!(
            frames,
            vec![
                Ok(Frame::WindowUpdate {
                    stream_id: 9,
                    byte_offset: 0x0102_0304_0506_0708
                }),
                Ok(Frame::Blocked { stream_id: 9 }),
            ]
        );
    }

    #[test]
    fn decode_stop_waiting_uses_sequence_number_width() {
        let bytes = [STOP_WAITING_TAG, 0xAA, 0x02, 0x01];
        let frames = decode_all(&bytes, 2);
        assert_eq!(
            frames,
            vec![Ok(Frame::StopWaiting {
                sent_entropy: 0xAA,
                least_unacked_delta: 0x0102
            })]
        );
    }

    #[test]
    fn decode_stream_explicit_length() {
        // id width 1, offset width 2 (bits 0b001), explicit length.
        let tag = STREAM_FLAG | (1 << 2) | StreamFrame::DATA_LENGTH_FLAG;
        let bytes = [tag, 0x07, 0x34, 0x12, 0x02, 0x00, 0xAB, 0xCD, PING_TAG];
        let frames = decode_all(&bytes, 1);
        assert_eq!(
            frames,
            vec![
                Ok(Frame::Stream(StreamFrame {
                    stream_id: 7,
                    stream_id_width: 1,
                    offset: 0x1234,
                    offset_width: 2,
                    explicit_length: true,
                    fin: false,
                    data: vec![0xAB, 0xCD],
                })),
                Ok(Frame::Ping),
            ]
        );
    }

    #[test]
    fn decode_stream_runs_to_end_without_length() {
        let tag = STREAM_FLAG; // id width 1, no offset, no length, no fin
        let bytes = [tag, 0x03, 0xDE, 0xAD, 0xBE, 0xEF];
        let frames = decode_all(&bytes, 1);
        assert_eq!(
            frames,
            vec![Ok(Frame::Stream(StreamFrame {
                stream_id: 3,
                stream_id_width: 1,
                offset: 0,
                offset_width: 0,
                explicit_length: false,
                fin: false,
                data: vec![0xDE, 0xAD, 0xBE, 0xEF],
            }))]
        );
    }

    #[test]
    fn decode_stream_fin_without_length_is_empty() {
        let tag = STREAM_FLAG | StreamFrame::FIN_FLAG;
        let bytes = [tag, 0x03, PING_TAG];
        let frames = decode_all(&bytes, 1);
        assert_eq!(frames.len(), 2);
        match &frames[0] {
            Ok(Frame::Stream(stream)) => {
                assert!(stream.fin);
                assert!(stream.data.is_empty());
            }
            other => panic!("expected stream frame, got {other:?}"),
        }
        assert_eq!(frames[1], Ok(Frame::Ping));
    }

    #[test]
    fn decode_ack_block_free() {
        // largest-observed width bits 0b10 -> 4 bytes.
        let tag = ACK_TAG | (2 << 2);
        let mut bytes = vec![tag, 0x5A];
        bytes.extend_from_slice(&1000u32.to_le_bytes());
        bytes.extend_from_slice(&0x0123u16.to_le_bytes());
        let frames = decode_all(&bytes, 1);
        assert_eq!(
            frames,
            vec![Ok(Frame::Ack(AckFrame {
                received_entropy: 0x5A,
                largest_observed: 1000,
                largest_observed_width: 4,
                largest_observed_delta_time: 0x0123,
            }))]
        );
    }

    #[test]
    fn decode_ack_with_blocks_is_unsupported() {
        let tag = ACK_TAG | AckFrame::BLOCKS_FLAG;
        let frames = decode_all(&[tag, 0x00, 0x00, 0x00, 0x00], 1);
        assert_eq!(
            frames,
            vec![Err(DecodeError::UnsupportedEncoding {
                detail: "ACK blocks"
            })]
        );
    }

    #[test]
    fn decode_congestion_feedback_has_no_body() {
        let frames = decode_all(&[CONGESTION_FEEDBACK_TAG, PING_TAG], 1);
        assert_eq!(frames, vec![Ok(Frame::CongestionFeedback), Ok(Frame::Ping)]);
    }

    #[test]
    fn decode_unrecognized_tag_keeps_earlier_frames() {
        let frames = decode_all(&[PING_TAG, 0xF0, PING_TAG], 1);
        assert_eq!(
            frames,
            vec![
                Ok(Frame::Ping),
                Err(DecodeError::UnrecognizedFrameTag { tag: 0xF0 }),
            ]
        );
    }

    #[test]
    fn decode_lone_unrecognized_tag() {
        let frames = decode_all(&[0xF0], 1);
        assert_eq!(
            frames,
            vec![Err(DecodeError::UnrecognizedFrameTag { tag: 0xF0 })]
        );
    }

    #[test]
    fn decoder_is_fused_after_error() {
        let mut decoder = FrameDecoder::new(&[0xF0, PING_TAG], 0, 1);
        assert!(decoder.next().unwrap().is_err());
        assert!(decoder.next().is_none());
        assert!(decoder.next().is_none());
    }

    #[test]
    fn decode_truncated_body() {
        let frames = decode_all(&[RESET_STREAM_TAG, 0x01, 0x02], 1);
        assert_eq!(
            frames,
            vec![Err(DecodeError::TruncatedInput {
                requested: 4,
                available: 2
            })]
        );
    }

    // Encoding and round-trips.
    #[test]
    fn roundtrip_fixed_shape_frames() {
        let frames = [
            Frame::Ping,
            Frame::CongestionFeedback,
            Frame::ResetStream {
                stream_id: 1,
                error_code: 6,
            },
            Frame::ConnectionClose {
                error_code: 25,
                reason: "timed out".to_owned(),
            },
            Frame::GoAway {
                error_code: 16,
                last_good_stream_id: 11,
                reason: String::new(),
            },
            Frame::WindowUpdate {
                stream_id: 3,
                byte_offset: u64::MAX,
            },
            Frame::Blocked { stream_id: 3 },
            Frame::StopWaiting {
                sent_entropy: 0x80,
                least_unacked_delta: 0xFFFF_FFFF_FFFF,
            },
        ];
        for frame in frames {
            assert_eq!(roundtrip(&frame, 6), frame);
        }
    }

    #[test]
    fn roundtrip_stream_variants() {
        let frames = [
            StreamFrame {
                stream_id: 1,
                stream_id_width: 1,
                offset: 0,
                offset_width: 0,
                explicit_length: true,
                fin: false,
                data: b"hello".to_vec(),
            },
            StreamFrame {
                stream_id: 0x00FF_FFFF,
                stream_id_width: 3,
                offset: 0xFFFF_FFFF_FFFF_FFFF,
                offset_width: 8,
                explicit_length: false,
                fin: false,
                data: b"tail data".to_vec(),
            },
            StreamFrame {
                stream_id: 42,
                stream_id_width: 4,
                offset: 0x1234,
                offset_width: 2,
                explicit_length: false,
                fin: true,
                data: Vec::new(),
            },
            StreamFrame::new(7, 99, vec![0u8; 300]),
        ];
        for stream in frames {
            let frame = Frame::Stream(stream);
            assert_eq!(roundtrip(&frame, 1), frame);
        }
    }

    #[test]
    fn roundtrip_ack_each_width() {
        for (width, largest) in [(1usize, 0xFDu64), (2, 0xFFFD), (4, 0xFFFF_FFFD), (6, 1)] {
            let frame = Frame::Ack(AckFrame {
                received_entropy: 1,
                largest_observed: largest,
                largest_observed_width: width,
                largest_observed_delta_time: 500,
            });
            assert_eq!(roundtrip(&frame, 1), frame);
        }
    }

    #[test]
    fn encode_goaway_layout() {
        let frame = Frame::GoAway {
            error_code: 5,
            last_good_stream_id: 3,
            reason: "bye".to_owned(),
        };
        let bytes = encode_frame(&frame, 1).unwrap();
        let mut expected = vec![GO_AWAY_TAG];
        expected.extend_from_slice(&5u32.to_le_bytes());
        expected.extend_from_slice(&3u32.to_le_bytes());
        expected.extend_from_slice(&3u16.to_le_bytes());
        expected.extend_from_slice(b"bye");
        assert_eq!(bytes, expected);
    }

    #[test]
    fn encode_stream_rejects_bad_widths() {
        let mut stream = StreamFrame::new(1, 0, Vec::new());
        stream.stream_id_width = 5;
        assert_eq!(
            encode_frame(&Frame::Stream(stream), 1).unwrap_err(),
            EncodeError::InvalidWidth { width: 5 }
        );

        let mut stream = StreamFrame::new(1, 0, Vec::new());
        stream.offset_width = 1;
        assert_eq!(
            encode_frame(&Frame::Stream(stream), 1).unwrap_err(),
            EncodeError::InvalidWidth { width: 1 }
        );
    }

    #[test]
    fn encode_stream_rejects_offset_without_width() {
        let mut stream = StreamFrame::new(1, 77, Vec::new());
        stream.offset_width = 0;
        assert_eq!(
            encode_frame(&Frame::Stream(stream), 1).unwrap_err(),
            EncodeError::ValueOutOfRange {
                value: 77,
                width: 0
            }
        );
    }

    #[test]
    fn encode_stream_rejects_id_too_large_for_width() {
        let mut stream = StreamFrame::new(0x100, 0, Vec::new());
        stream.stream_id_width = 1;
        assert_eq!(
            encode_frame(&Frame::Stream(stream), 1).unwrap_err(),
            EncodeError::ValueOutOfRange {
                value: 0x100,
                width: 1
            }
        );
    }

    #[test]
    fn encode_stream_rejects_oversized_explicit_length() {
        let stream = StreamFrame::new(1, 0, vec![0u8; 70_000]);
        assert_eq!(
            encode_frame(&Frame::Stream(stream), 1).unwrap_err(),
            EncodeError::LengthOverflow { length: 70_000 }
        );
    }

    #[test]
    fn encode_ack_rejects_bad_width() {
        let mut ack = AckFrame::new(0, 0, 0);
        ack.largest_observed_width = 3;
        assert_eq!(
            encode_frame(&Frame::Ack(ack), 1).unwrap_err(),
            EncodeError::InvalidWidth { width: 3 }
        );
    }

    #[test]
    fn encode_ack_never_sets_blocks_flag() {
        let bytes = encode_frame(&Frame::Ack(AckFrame::new(9, 1234, 7)), 1).unwrap();
        assert_eq!(bytes[0] & AckFrame::BLOCKS_FLAG, 0);
    }

    #[test]
    fn encode_stop_waiting_rejects_delta_wider_than_sequence() {
        let frame = Frame::StopWaiting {
            sent_entropy: 0,
            least_unacked_delta: 0x1_0000,
        };
        assert_eq!(
            encode_frame(&frame, 2).unwrap_err(),
            EncodeError::ValueOutOfRange {
                value: 0x1_0000,
                width: 2
            }
        );
    }

    #[test]
    fn frame_kind_accessor() {
        assert_eq!(Frame::Ping.kind(), FrameKind::Ping);
        assert_eq!(
            Frame::Stream(StreamFrame::new(1, 0, Vec::new())).kind(),
            FrameKind::Stream
        );
        assert_eq!(Frame::Ack(AckFrame::new(0, 0, 0)).kind(), FrameKind::Ack);
    }
}
