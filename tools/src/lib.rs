//! Inspection and debugging tools for the quicwire codec.
//!
//! This crate provides utilities for understanding captured packets:
//!
//! - Decode and print packet structure
//! - Explain packet size frame by frame
//! - Render packets as structured JSON
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use anyhow::{Context, Result};
use serde::Serialize;
use wire::{
    decode_header, encode_frame, from_ufloat16, ErrorCode, Frame, FrameDecoder, Packet,
    PacketHeader,
};

/// Structural report over one packet. Frame decoding errors are captured in
/// the report rather than failing it, so a partially corrupt capture still
/// shows everything up to the bad frame.
#[derive(Debug, Serialize)]
pub struct InspectReport {
    pub total_len: usize,
    pub header_len: usize,
    pub header: HeaderReport,
    pub frames: Vec<FrameReport>,
    /// Why frame decoding stopped early, if it did.
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HeaderReport {
    pub public_flags: u8,
    pub connection_id: Option<u64>,
    pub version: Option<u32>,
    /// The version rendered as its 4-character tag, when printable.
    pub version_tag: Option<String>,
    pub sequence_number: u64,
    pub sequence_number_width: usize,
    pub private_flags: u8,
    pub entropy: bool,
    pub fec_packet: bool,
    pub fec_group_number: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct FrameReport {
    pub kind: String,
    pub byte_len: usize,
    pub summary: String,
}

/// Decodes `bytes` and reports the packet's structure and per-frame sizes.
///
/// Fails only if the header itself is undecodable.
pub fn inspect_packet(bytes: &[u8]) -> Result<InspectReport> {
    let (header, header_len) = decode_header(bytes).context("decode packet header")?;
    let width = header.public_flags.sequence_number_width();

    let mut frames = Vec::new();
    let mut consumed = header_len;
    let mut error = None;
    for result in FrameDecoder::new(bytes, header_len, width) {
        match result {
            Ok(frame) => {
                // A padding frame swallows the rest of the packet; everything
                // else re-encodes to exactly the bytes it was decoded from.
                let byte_len = match frame {
                    Frame::Padding => bytes.len() - consumed,
                    ref frame => encode_frame(frame, width)
                        .context("re-encode decoded frame")?
                        .len(),
                };
                consumed += byte_len;
                frames.push(FrameReport {
                    kind: format!("{:?}", frame.kind()),
                    byte_len,
                    summary: summarize_frame(&frame),
                });
            }
            Err(err) => {
                error = Some(err.to_string());
                break;
            }
        }
    }

    Ok(InspectReport {
        total_len: bytes.len(),
        header_len,
        header: header_report(&header),
        frames,
        error,
    })
}

/// Strictly decodes `bytes` into a JSON value mirroring the typed packet.
pub fn decode_packet_json(bytes: &[u8]) -> Result<serde_json::Value> {
    let packet = wire::decode_packet(bytes).context("decode packet")?;
    serde_json::to_value(&packet).context("serialize packet")
}

/// Renders a strict decode as human-readable text.
pub fn format_packet_pretty(packet: &Packet) -> String {
    let mut out = String::new();
    let header = &packet.header;
    out.push_str(&format!(
        "public_flags: 0x{:02x} private_flags: 0x{:02x}\n",
        header.public_flags.raw(),
        header.private_flags.raw()
    ));
    match header.connection_id {
        Some(id) => out.push_str(&format!("connection_id: 0x{id:016x}\n")),
        None => out.push_str("connection_id: omitted\n"),
    }
    if let Some(version) = header.version {
        match version_tag(version) {
            Some(tag) => out.push_str(&format!("version: {tag}\n")),
            None => out.push_str(&format!("version: 0x{version:08x}\n")),
        }
    }
    out.push_str(&format!("sequence_number: {}\n", header.sequence_number));
    if let Some(group) = header.fec_group_number() {
        out.push_str(&format!("fec_group: {group}\n"));
    }
    out.push_str(&format!("frames: {}\n", packet.frames.len()));
    for frame in &packet.frames {
        out.push_str(&format!(
            "  {:?}: {}\n",
            frame.kind(),
            summarize_frame(frame)
        ));
    }
    out
}

/// Renders a wire error code with its registry name when it has one.
pub fn error_code_label(code: u32) -> String {
    match ErrorCode::from_code(code) {
        Some(known) => format!("{known} ({code})"),
        None => format!("unregistered ({code})"),
    }
}

fn header_report(header: &PacketHeader) -> HeaderReport {
    HeaderReport {
        public_flags: header.public_flags.raw(),
        connection_id: header.connection_id,
        version: header.version,
        version_tag: header.version.and_then(version_tag),
        sequence_number: header.sequence_number,
        sequence_number_width: header.public_flags.sequence_number_width(),
        private_flags: header.private_flags.raw(),
        entropy: header.private_flags.has_entropy(),
        fec_packet: header.private_flags.is_fec_packet(),
        fec_group_number: header.fec_group_number(),
    }
}

fn version_tag(version: u32) -> Option<String> {
    let bytes = version.to_le_bytes();
    if bytes.iter().all(|b| b.is_ascii_graphic()) {
        Some(bytes.iter().map(|&b| char::from(b)).collect())
    } else {
        None
    }
}

fn summarize_frame(frame: &Frame) -> String {
    match frame {
        Frame::Padding => "fills remainder of packet".to_owned(),
        Frame::Ping => "keep-alive".to_owned(),
        Frame::CongestionFeedback => "no body".to_owned(),
        Frame::ResetStream {
            stream_id,
            error_code,
        } => format!("stream {stream_id}: {}", error_code_label(*error_code)),
        Frame::ConnectionClose { error_code, reason } => {
            format!("{}: {reason:?}", error_code_label(*error_code))
        }
        Frame::GoAway {
            error_code,
            last_good_stream_id,
            reason,
        } => format!(
            "{} after stream {last_good_stream_id}: {reason:?}",
            error_code_label(*error_code)
        ),
        Frame::WindowUpdate {
            stream_id,
            byte_offset,
        } => format!("stream {stream_id} window to {byte_offset}"),
        Frame::Blocked { stream_id } => format!("stream {stream_id} blocked"),
        Frame::StopWaiting {
            sent_entropy,
            least_unacked_delta,
        } => format!("entropy 0x{sent_entropy:02x}, least unacked delta {least_unacked_delta}"),
        Frame::Stream(stream) => {
            let mut summary = format!(
                "stream {} offset {} ({} bytes)",
                stream.stream_id,
                stream.offset,
                stream.data.len()
            );
            if stream.fin {
                summary.push_str(", fin");
            }
            summary
        }
        Frame::Ack(ack) => format!(
            "largest observed {}, entropy 0x{:02x}, delta {}us",
            ack.largest_observed,
            ack.received_entropy,
            from_ufloat16(ack.largest_observed_delta_time)
        ),
    }
}
