//! Lenient Probe-and-Fill Converters
//!
//! Two-pass conversion into exactly-sized UTF-16 buffers: a probe pass
//! computes the output length without allocating, then a fill pass writes
//! into storage of exactly that size. Each maximal ill-formed input sequence
//! becomes one U+FFFD REPLACEMENT CHARACTER, matching
//! [`String::from_utf8_lossy`]; conversion itself never fails.

/// UTF-16 unit for U+FFFD.
pub(crate) const REPLACEMENT_UNIT: u16 = char::REPLACEMENT_CHARACTER as u16;

/// Probe pass: UTF-16 length of the lenient conversion of `bytes`.
pub(crate) fn utf16_len_of_utf8(bytes: &[u8]) -> usize {
    let mut len = 0;
    for chunk in bytes.utf8_chunks() {
        len += chunk.valid().chars().map(char::len_utf16).sum::<usize>();
        if !chunk.invalid().is_empty() {
            len += char::REPLACEMENT_CHARACTER.len_utf16();
        }
    }
    len
}

/// Fill pass: lenient conversion of `bytes` into `dst`. Returns the number
/// of units written. `dst` must be at least [`utf16_len_of_utf8`] long.
pub(crate) fn utf8_to_utf16_into(bytes: &[u8], dst: &mut [u16]) -> usize {
    let mut written = 0;
    for chunk in bytes.utf8_chunks() {
        for ch in chunk.valid().chars() {
            written += ch.encode_utf16(&mut dst[written..]).len();
        }
        if !chunk.invalid().is_empty() {
            dst[written] = REPLACEMENT_UNIT;
            written += 1;
        }
    }
    written
}

/// Probe pass: UTF-16 length of the lenient conversion of UTF-32 input.
/// Surrogate values and out-of-range values count as one replacement unit.
pub(crate) fn utf16_len_of_utf32(units: &[u32]) -> usize {
    units
        .iter()
        .map(|&u| match char::from_u32(u) {
            Some(ch) => ch.len_utf16(),
            None => 1,
        })
        .sum()
}

/// Fill pass: lenient conversion of UTF-32 input into `dst`. Returns the
/// number of units written. `dst` must be at least [`utf16_len_of_utf32`]
/// long.
pub(crate) fn utf32_to_utf16_into(units: &[u32], dst: &mut [u16]) -> usize {
    let mut written = 0;
    for &u in units {
        match char::from_u32(u) {
            Some(ch) => written += ch.encode_utf16(&mut dst[written..]).len(),
            None => {
                dst[written] = REPLACEMENT_UNIT;
                written += 1;
            }
        }
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_counts_bmp_and_astral() {
        // "aé€𝄞": 1 + 1 + 1 + 2 units
        let s = "a\u{e9}\u{20ac}\u{1d11e}";
        assert_eq!(utf16_len_of_utf8(s.as_bytes()), 5);
    }

    #[test]
    fn test_probe_and_fill_agree() {
        let inputs: &[&[u8]] = &[
            b"",
            b"plain ascii",
            "čeština a příliš žluťoučký kůň".as_bytes(),
            "\u{1f310} mixed \u{10348} planes".as_bytes(),
            b"broken \xff\xfe tail",
            b"\xe2\x82",
        ];
        for bytes in inputs {
            let probed = utf16_len_of_utf8(bytes);
            let mut dst = vec![0u16; probed];
            let written = utf8_to_utf16_into(bytes, &mut dst);
            assert_eq!(written, probed, "mismatch for {:?}", bytes);
        }
    }

    #[test]
    fn test_ill_formed_becomes_replacement() {
        let mut dst = vec![0u16; utf16_len_of_utf8(b"a\xffb")];
        utf8_to_utf16_into(b"a\xffb", &mut dst);
        assert_eq!(dst, &[u16::from(b'a'), REPLACEMENT_UNIT, u16::from(b'b')]);
    }

    #[test]
    fn test_fill_matches_from_utf8_lossy() {
        let bytes: &[u8] = b"ok \xf0\x9f then \xed\xa0\x80 end";
        let expected: Vec<u16> = String::from_utf8_lossy(bytes).encode_utf16().collect();
        let mut dst = vec![0u16; utf16_len_of_utf8(bytes)];
        let written = utf8_to_utf16_into(bytes, &mut dst);
        assert_eq!(&dst[..written], expected.as_slice());
    }

    #[test]
    fn test_utf32_surrogate_and_range_rejects() {
        let units = [u32::from('x'), 0xD800, 0x110000, 0x1D11E];
        assert_eq!(utf16_len_of_utf32(&units), 1 + 1 + 1 + 2);
        let mut dst = vec![0u16; 5];
        let written = utf32_to_utf16_into(&units, &mut dst);
        assert_eq!(written, 5);
        assert_eq!(dst[1], REPLACEMENT_UNIT);
        assert_eq!(dst[2], REPLACEMENT_UNIT);
        assert_eq!(&dst[3..5], &[0xD834, 0xDD1E]);
    }
}
