use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tools::{decode_packet_json, format_packet_pretty, inspect_packet, InspectReport};

#[derive(Parser)]
#[command(
    name = "quicwire-tools",
    version,
    about = "quicwire packet inspection and decoding tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect packet structure and per-frame sizes.
    Inspect {
        /// Path to the packet bytes.
        packet_path: PathBuf,
        /// Treat the input file as hex text instead of raw bytes.
        #[arg(long)]
        hex: bool,
        /// Emit the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Strictly decode a packet into structured output.
    Decode {
        /// Path to the packet bytes.
        packet_path: PathBuf,
        /// Treat the input file as hex text instead of raw bytes.
        #[arg(long)]
        hex: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Inspect {
            packet_path,
            hex,
            json,
        } => {
            let bytes = read_packet(&packet_path, hex)?;
            let report = inspect_packet(&bytes)?;
            if json {
                let json = serde_json::to_string_pretty(&report).context("serialize report")?;
                println!("{json}");
            } else {
                print_inspect_report(&report);
            }
        }
        Command::Decode {
            packet_path,
            hex,
            format,
        } => {
            let bytes = read_packet(&packet_path, hex)?;
            match format {
                DecodeFormat::Json => {
                    let output = decode_packet_json(&bytes)?;
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    let packet = wire::decode_packet(&bytes).context("decode packet")?;
                    print!("{}", format_packet_pretty(&packet));
                }
            }
        }
    }
    Ok(())
}

fn read_packet(path: &PathBuf, hex: bool) -> Result<Vec<u8>> {
    let bytes =
        fs::read(path).with_context(|| format!("read packet {}", path.display()))?;
    if hex {
        let text = String::from_utf8(bytes).context("hex input is not valid text")?;
        parse_hex(&text)
    } else {
        Ok(bytes)
    }
}

fn parse_hex(text: &str) -> Result<Vec<u8>> {
    let digits: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        bail!("hex input has an odd number of digits");
    }
    digits
        .chunks(2)
        .map(|pair| {
            let high = pair[0].to_digit(16);
            let low = pair[1].to_digit(16);
            match (high, low) {
                (Some(high), Some(low)) => Ok((high * 16 + low) as u8),
                _ => bail!("invalid hex digits {:?}{:?}", pair[0], pair[1]),
            }
        })
        .collect()
}

fn print_inspect_report(report: &InspectReport) {
    let header = &report.header;
    println!(
        "public_flags: 0x{:02x} private_flags: 0x{:02x} ({} bytes, header {})",
        header.public_flags, header.private_flags, report.total_len, report.header_len
    );
    match header.connection_id {
        Some(id) => println!("connection_id: 0x{id:016x}"),
        None => println!("connection_id: omitted"),
    }
    if let Some(version) = header.version {
        match &header.version_tag {
            Some(tag) => println!("version: {tag}"),
            None => println!("version: 0x{version:08x}"),
        }
    }
    println!(
        "sequence_number: {} ({} bytes on the wire)",
        header.sequence_number, header.sequence_number_width
    );
    if let Some(group) = header.fec_group_number {
        println!("fec_group: {group}");
    }
    println!("frames:");
    for frame in &report.frames {
        println!("  {}: {} ({} bytes)", frame.kind, frame.summary, frame.byte_len);
    }
    if let Some(error) = &report.error {
        println!("frame decoding stopped: {error}");
    }
}
