#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{decode_header, decode_packet, encode_packet, FrameDecoder};

fuzz_target!(|data: &[u8]| {
    // Strict whole-packet decode; anything that decodes must re-encode.
    if let Ok(packet) = decode_packet(data) {
        let _ = encode_packet(&packet);
    }

    // Incremental path: the lazy decoder must terminate and never panic.
    if let Ok((header, header_len)) = decode_header(data) {
        let width = header.public_flags.sequence_number_width();
        for result in FrameDecoder::new(data, header_len, width) {
            if result.is_err() {
                break;
            }
        }
    }
});
