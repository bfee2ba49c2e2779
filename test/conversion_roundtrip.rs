//! Conversion Round-Trip Tests
//!
//! Verifies the lenient and strict conversion surfaces against each other
//! and against the std library's own Unicode handling.

use strbridge::convert::{
    to_utf16, to_utf8, to_wide, try_to_utf16, try_to_utf8, utf16_to_string, Source,
};
use strbridge::ConvertError;
use widestring::U16CString;

const SAMPLES: &[&str] = &[
    "plain ascii",
    "příliš žluťoučký kůň úpěl ďábelské ódy",
    "Übersetzung: größer als erwartet",
    "翻訳エディタ",
    "mixed planes \u{1F310}\u{10348} and BMP ©",
];

#[test]
fn test_utf8_to_utf16_and_back_is_lossless() {
    for sample in SAMPLES {
        let wide = to_utf16(*sample);
        assert_eq!(utf16_to_string(wide.as_units()), *sample);
    }
}

#[test]
fn test_utf32_to_utf16_and_back_is_lossless() {
    for sample in SAMPLES {
        let units: Vec<u32> = sample.chars().map(u32::from).collect();
        let wide = to_utf16(units.as_slice());
        assert_eq!(utf16_to_string(wide.as_units()), *sample);
    }
}

#[test]
fn test_wide_roundtrip_is_lossless() {
    for sample in SAMPLES {
        let wide = to_wide(*sample);
        let wide_c = widestring::WideCString::from_vec(wide.into_vec()).unwrap();
        assert_eq!(to_utf8(Source::Wide(&wide_c)), *sample);
    }
}

#[test]
fn test_lenient_substitutes_where_strict_rejects() {
    let bytes: &[u8] = b"valid \xc3 invalid";

    let err = try_to_utf8(bytes).unwrap_err();
    assert_eq!(err, ConvertError::IllFormedUtf8 { valid_up_to: 6 });

    let lenient = to_utf8(bytes);
    assert_eq!(lenient, "valid \u{FFFD} invalid");
    assert_eq!(&lenient[..6], "valid ");
}

#[test]
fn test_lenient_utf16_output_matches_lossy_decode() {
    let bytes: &[u8] = b"tail \xe2\x82";
    let wide = to_utf16(bytes);
    let expected: Vec<u16> = String::from_utf8_lossy(bytes).encode_utf16().collect();
    assert_eq!(wide.as_units(), expected.as_slice());
}

#[test]
fn test_strict_utf16_alias_validates_first() {
    let good = U16CString::from_str("paired \u{1D11E}").unwrap();
    let buf = try_to_utf16(&*good).unwrap();
    assert!(!buf.is_owned());

    let bad = U16CString::from_vec(vec![0x0061, 0xDC00]).unwrap();
    let err = try_to_utf16(&*bad).unwrap_err();
    assert_eq!(
        err,
        ConvertError::UnpairedSurrogate {
            unit: 0xDC00,
            index: 1
        }
    );
}

#[test]
fn test_strict_utf32_reports_offending_index() {
    let units: &[u32] = &[u32::from('a'), 0xD800, u32::from('b')];
    let err = try_to_utf16(units).unwrap_err();
    assert_eq!(
        err,
        ConvertError::InvalidCodePoint {
            value: 0xD800,
            index: 1
        }
    );
}

#[test]
fn test_error_messages_carry_position() {
    let err = try_to_utf8(&b"\xff"[..]).unwrap_err();
    assert_eq!(err.to_string(), "ill-formed UTF-8 after 0 valid bytes");

    let err = try_to_utf16(&[0x0011_0000u32][..]).unwrap_err();
    assert_eq!(err.to_string(), "invalid code point 0x00110000 at index 0");
}
