//! Strbridge - String-Representation Bridging for Translation Tooling
//!
//! CLI entry point for transcoding files between Unicode wire encodings and
//! inspecting them for ill-formed sequences.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use strbridge::bytes::{self, ByteOrder, Encoding};
use strbridge::config::{BridgeConfig, Policy};
use strbridge::convert;

#[derive(Parser)]
#[command(name = "strbridge")]
#[command(version)]
#[command(about = "Transcode and inspect Unicode text files", long_about = None)]
struct Cli {
    /// Config file (default: search for strbridge.toml upward from cwd)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a file between Unicode wire encodings
    Transcode {
        /// Input file
        input: PathBuf,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source encoding: utf-8, utf-16le, utf-16be, utf-32le, utf-32be
        #[arg(long, default_value = "utf-8")]
        from: String,

        /// Target encoding (config default if omitted)
        #[arg(long)]
        to: Option<String>,

        /// Fail on ill-formed input instead of substituting U+FFFD
        #[arg(long)]
        strict: bool,

        /// Emit a byte-order mark on the output
        #[arg(long)]
        bom: bool,
    },

    /// Report code-unit and code-point statistics for a file
    Inspect {
        /// Input file
        input: PathBuf,

        /// Source encoding: utf-8, utf-16le, utf-16be, utf-32le, utf-32be
        #[arg(long, default_value = "utf-8")]
        from: String,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Transcode {
            input,
            output,
            from,
            to,
            strict,
            bom,
        } => cmd_transcode(&config, &input, output.as_deref(), &from, to.as_deref(), strict, bom),
        Commands::Inspect { input, from, json } => cmd_inspect(&input, &from, json),
    }
}

fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
    match path {
        Some(path) => BridgeConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => BridgeConfig::load_from_cwd().context("Failed to load strbridge.toml"),
    }
}

fn parse_encoding(name: &str) -> Result<Encoding> {
    match Encoding::parse(name) {
        Some(encoding) => Ok(encoding),
        None => bail!("Unknown encoding '{name}' (expected utf-8, utf-16le, utf-16be, utf-32le or utf-32be)"),
    }
}

// ============================================================================
// Transcode
// ============================================================================

fn cmd_transcode(
    config: &BridgeConfig,
    input: &Path,
    output: Option<&Path>,
    from: &str,
    to: Option<&str>,
    strict: bool,
    bom: bool,
) -> Result<()> {
    let source = parse_encoding(from)?;
    let target = match to {
        Some(name) => parse_encoding(name)?,
        None => config.transcode.target,
    };
    let policy = if strict || config.transcode.policy == Policy::Strict {
        Policy::Strict
    } else {
        Policy::Lenient
    };
    let write_bom = bom || config.transcode.write_bom;

    let raw = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let text = decode_text(&raw, source, policy)
        .with_context(|| format!("Failed to decode {} as {}", input.display(), source))?;
    let encoded = encode_text(&text, target, write_bom);

    tracing::debug!(
        source = %source,
        target = %target,
        in_bytes = raw.len(),
        out_bytes = encoded.len(),
        "transcoded"
    );

    match output {
        Some(path) => fs::write(path, encoded)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => io::stdout()
            .write_all(&encoded)
            .context("Failed to write to stdout")?,
    }
    Ok(())
}

/// Decode raw bytes in `encoding` to a string, honoring the policy.
fn decode_text(raw: &[u8], encoding: Encoding, policy: Policy) -> Result<String> {
    let body = bytes::strip_bom(encoding, raw);
    let text = match (encoding, policy) {
        (Encoding::Utf8, Policy::Lenient) => convert::to_utf8(body),
        (Encoding::Utf8, Policy::Strict) => convert::try_to_utf8(body)?,
        (Encoding::Utf16Le, _) | (Encoding::Utf16Be, _) => {
            let units = bytes::decode_utf16_bytes(body, utf16_order(encoding));
            match policy {
                Policy::Lenient => convert::utf16_to_string(&units),
                Policy::Strict => convert::try_utf16_to_string(&units)?,
            }
        }
        (Encoding::Utf32Le, _) | (Encoding::Utf32Be, _) => {
            let units = bytes::decode_utf32_bytes(body, utf32_order(encoding));
            match policy {
                Policy::Lenient => convert::utf32_to_string(&units),
                Policy::Strict => convert::try_utf32_to_string(&units)?,
            }
        }
    };
    Ok(text)
}

/// Encode a string into `encoding`'s wire form.
fn encode_text(text: &str, encoding: Encoding, write_bom: bool) -> Vec<u8> {
    let mut out = Vec::new();
    if write_bom {
        out.extend_from_slice(encoding.bom());
    }
    match encoding {
        Encoding::Utf8 => out.extend_from_slice(text.as_bytes()),
        Encoding::Utf16Le | Encoding::Utf16Be => {
            let units: Vec<u16> = text.encode_utf16().collect();
            out.extend_from_slice(&bytes::encode_utf16_bytes(&units, utf16_order(encoding)));
        }
        Encoding::Utf32Le | Encoding::Utf32Be => {
            let units: Vec<u32> = text.chars().map(u32::from).collect();
            out.extend_from_slice(&bytes::encode_utf32_bytes(&units, utf32_order(encoding)));
        }
    }
    out
}

fn utf16_order(encoding: Encoding) -> ByteOrder {
    match encoding {
        Encoding::Utf16Be => ByteOrder::Big,
        _ => ByteOrder::Little,
    }
}

fn utf32_order(encoding: Encoding) -> ByteOrder {
    match encoding {
        Encoding::Utf32Be => ByteOrder::Big,
        _ => ByteOrder::Little,
    }
}

// ============================================================================
// Inspect
// ============================================================================

#[derive(Debug, Serialize)]
struct InspectReport {
    path: String,
    encoding: String,
    bom: bool,
    bytes: usize,
    code_units: usize,
    code_points: usize,
    utf16_units: usize,
    ill_formed: Vec<IllFormedSpan>,
}

/// One maximal ill-formed sequence, located by byte offset in the file.
#[derive(Debug, Serialize)]
struct IllFormedSpan {
    offset: usize,
    hex: String,
}

fn cmd_inspect(input: &Path, from: &str, json: bool) -> Result<()> {
    let encoding = parse_encoding(from)?;
    let raw = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let report = inspect_impl(input, &raw, encoding);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}: {}", report.path, report.encoding);
        println!("  bytes:       {}", report.bytes);
        println!("  code units:  {}", report.code_units);
        println!("  code points: {}", report.code_points);
        println!("  utf16 units: {}", report.utf16_units);
        if report.bom {
            println!("  byte-order mark present");
        }
        for span in &report.ill_formed {
            println!("  ill-formed at byte {}: 0x{}", span.offset, span.hex);
        }
    }
    Ok(())
}

fn inspect_impl(path: &Path, raw: &[u8], encoding: Encoding) -> InspectReport {
    let body = bytes::strip_bom(encoding, raw);
    let bom_len = raw.len() - body.len();

    let (code_units, ill_formed) = match encoding {
        Encoding::Utf8 => scan_utf8(body, bom_len),
        Encoding::Utf16Le | Encoding::Utf16Be => {
            let units = bytes::decode_utf16_bytes(body, utf16_order(encoding));
            scan_utf16(&units, bom_len)
        }
        Encoding::Utf32Le | Encoding::Utf32Be => {
            let units = bytes::decode_utf32_bytes(body, utf32_order(encoding));
            scan_utf32(&units, bom_len)
        }
    };

    let text = decode_text(raw, encoding, Policy::Lenient).unwrap_or_default();
    InspectReport {
        path: path.display().to_string(),
        encoding: encoding.name().to_string(),
        bom: bom_len > 0,
        bytes: raw.len(),
        code_units,
        code_points: text.chars().count(),
        utf16_units: text.encode_utf16().count(),
        ill_formed,
    }
}

fn scan_utf8(body: &[u8], base: usize) -> (usize, Vec<IllFormedSpan>) {
    let mut spans = Vec::new();
    let mut offset = base;
    for chunk in body.utf8_chunks() {
        offset += chunk.valid().len();
        if !chunk.invalid().is_empty() {
            spans.push(IllFormedSpan {
                offset,
                hex: hex::encode(chunk.invalid()),
            });
            offset += chunk.invalid().len();
        }
    }
    (body.len(), spans)
}

fn scan_utf16(units: &[u16], base: usize) -> (usize, Vec<IllFormedSpan>) {
    let mut spans = Vec::new();
    let mut index = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(ch) => index += ch.len_utf16(),
            Err(e) => {
                spans.push(IllFormedSpan {
                    offset: base + index * 2,
                    hex: hex::encode(e.unpaired_surrogate().to_be_bytes()),
                });
                index += 1;
            }
        }
    }
    (units.len(), spans)
}

fn scan_utf32(units: &[u32], base: usize) -> (usize, Vec<IllFormedSpan>) {
    let mut spans = Vec::new();
    for (index, &value) in units.iter().enumerate() {
        if char::from_u32(value).is_none() {
            spans.push(IllFormedSpan {
                offset: base + index * 4,
                hex: hex::encode(value.to_be_bytes()),
            });
        }
    }
    (units.len(), spans)
}
