//! Byte-Level Wire Forms
//!
//! Reading and writing UTF-16 and UTF-32 byte streams with explicit byte
//! order, plus BOM handling. Used by the transcoding CLI; conversions here
//! are lenient in the same sense as [`crate::convert`]: a dangling trailing
//! byte becomes one U+FFFD rather than an error.

use serde::{Deserialize, Serialize};

use crate::convert::lenient::REPLACEMENT_UNIT;

/// Byte order of a fixed-width code-unit stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

/// Wire encodings understood by the transcoder. Serialized forms match the
/// user-facing names ("utf-8", "utf-16le", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    #[serde(rename = "utf-8")]
    Utf8,
    #[serde(rename = "utf-16le")]
    Utf16Le,
    #[serde(rename = "utf-16be")]
    Utf16Be,
    #[serde(rename = "utf-32le")]
    Utf32Le,
    #[serde(rename = "utf-32be")]
    Utf32Be,
}

impl Encoding {
    /// Parse a user-facing encoding name.
    pub fn parse(name: &str) -> Option<Encoding> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Some(Encoding::Utf8),
            "utf16le" | "utf-16le" => Some(Encoding::Utf16Le),
            "utf16be" | "utf-16be" => Some(Encoding::Utf16Be),
            "utf32le" | "utf-32le" => Some(Encoding::Utf32Le),
            "utf32be" | "utf-32be" => Some(Encoding::Utf32Be),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16Le => "utf-16le",
            Encoding::Utf16Be => "utf-16be",
            Encoding::Utf32Le => "utf-32le",
            Encoding::Utf32Be => "utf-32be",
        }
    }

    /// The encoding's byte-order mark.
    pub fn bom(&self) -> &'static [u8] {
        match self {
            Encoding::Utf8 => &[0xEF, 0xBB, 0xBF],
            Encoding::Utf16Le => &[0xFF, 0xFE],
            Encoding::Utf16Be => &[0xFE, 0xFF],
            Encoding::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
            Encoding::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Strip `encoding`'s BOM from the front of `bytes`, if present. Only the
/// exact mark for `encoding` is recognized.
pub fn strip_bom(encoding: Encoding, bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(encoding.bom()).unwrap_or(bytes)
}

/// Decode a UTF-16 byte stream into code units. A trailing odd byte decodes
/// to one replacement unit.
pub fn decode_utf16_bytes(bytes: &[u8], order: ByteOrder) -> Vec<u16> {
    let mut units = Vec::with_capacity(bytes.len() / 2 + 1);
    let chunks = bytes.chunks_exact(2);
    let dangling = !chunks.remainder().is_empty();
    for pair in chunks {
        let raw = [pair[0], pair[1]];
        units.push(match order {
            ByteOrder::Little => u16::from_le_bytes(raw),
            ByteOrder::Big => u16::from_be_bytes(raw),
        });
    }
    if dangling {
        units.push(REPLACEMENT_UNIT);
    }
    units
}

/// Encode code units as a UTF-16 byte stream.
pub fn encode_utf16_bytes(units: &[u16], order: ByteOrder) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(units.len() * 2);
    for &unit in units {
        let raw = match order {
            ByteOrder::Little => unit.to_le_bytes(),
            ByteOrder::Big => unit.to_be_bytes(),
        };
        bytes.extend_from_slice(&raw);
    }
    bytes
}

/// Decode a UTF-32 byte stream into code units. A trailing partial unit
/// decodes to one replacement unit.
pub fn decode_utf32_bytes(bytes: &[u8], order: ByteOrder) -> Vec<u32> {
    let mut units = Vec::with_capacity(bytes.len() / 4 + 1);
    let chunks = bytes.chunks_exact(4);
    let dangling = !chunks.remainder().is_empty();
    for quad in chunks {
        let raw = [quad[0], quad[1], quad[2], quad[3]];
        units.push(match order {
            ByteOrder::Little => u32::from_le_bytes(raw),
            ByteOrder::Big => u32::from_be_bytes(raw),
        });
    }
    if dangling {
        units.push(u32::from(REPLACEMENT_UNIT));
    }
    units
}

/// Encode code units as a UTF-32 byte stream.
pub fn encode_utf32_bytes(units: &[u32], order: ByteOrder) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(units.len() * 4);
    for &unit in units {
        let raw = match order {
            ByteOrder::Little => unit.to_le_bytes(),
            ByteOrder::Big => unit.to_be_bytes(),
        };
        bytes.extend_from_slice(&raw);
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_parse_accepts_both_spellings() {
        assert_eq!(Encoding::parse("UTF-16LE"), Some(Encoding::Utf16Le));
        assert_eq!(Encoding::parse("utf16le"), Some(Encoding::Utf16Le));
        assert_eq!(Encoding::parse("utf-8"), Some(Encoding::Utf8));
        assert_eq!(Encoding::parse("latin1"), None);
    }

    #[test]
    fn test_utf16_bytes_roundtrip_both_orders() {
        let units: Vec<u16> = "příliš 𝄞".encode_utf16().collect();
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let bytes = encode_utf16_bytes(&units, order);
            assert_eq!(decode_utf16_bytes(&bytes, order), units);
        }
    }

    #[test]
    fn test_utf32_bytes_roundtrip_both_orders() {
        let units: Vec<u32> = "příliš 𝄞".chars().map(u32::from).collect();
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let bytes = encode_utf32_bytes(&units, order);
            assert_eq!(decode_utf32_bytes(&bytes, order), units);
        }
    }

    #[test]
    fn test_dangling_tail_becomes_replacement() {
        assert_eq!(
            decode_utf16_bytes(&[0x41, 0x00, 0x42], ByteOrder::Little),
            vec![0x41, REPLACEMENT_UNIT]
        );
        assert_eq!(
            decode_utf32_bytes(&[0x41, 0x00, 0x00], ByteOrder::Little),
            vec![u32::from(REPLACEMENT_UNIT)]
        );
    }

    #[test]
    fn test_strip_bom() {
        let bytes = [0xFF, 0xFE, 0x41, 0x00];
        assert_eq!(strip_bom(Encoding::Utf16Le, &bytes), &[0x41, 0x00]);
        assert_eq!(strip_bom(Encoding::Utf16Be, &bytes), &bytes[..]);
    }
}
