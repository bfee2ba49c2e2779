//! Native Wide-Width Selection
//!
//! The platform's wide character is 16 bits on Windows and 32 bits
//! elsewhere. That choice is resolved here, once, at build time; every other
//! module is width-agnostic. Unsupported widths fail the build.

use widestring::{WideCStr, WideChar};

use crate::buffer::WideBuf;
use crate::convert;
use crate::error::ConvertResult;

/// Storage width of the platform's wide character type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WideWidth {
    /// 16-bit units, UTF-16 encoded.
    U16,
    /// 32-bit units, UTF-32 encoded.
    U32,
}

/// Width of [`WideChar`] on the current target.
pub const NATIVE_WIDE: WideWidth = match core::mem::size_of::<WideChar>() {
    2 => WideWidth::U16,
    4 => WideWidth::U32,
    _ => panic!("unsupported wide character width"),
};

/// Convert a platform wide string to a UTF-16 buffer.
///
/// When the native width is already 16 bits the source memory is aliased
/// without copying and the result is valid for the source's lifetime. When
/// it is 32 bits the input is converted as UTF-32 into owned storage.
#[cfg(windows)]
pub fn wide_to_utf16(s: &WideCStr) -> WideBuf<'_> {
    WideBuf::borrowed(s)
}

/// Convert a platform wide string to a UTF-16 buffer.
///
/// When the native width is already 16 bits the source memory is aliased
/// without copying and the result is valid for the source's lifetime. When
/// it is 32 bits the input is converted as UTF-32 into owned storage.
#[cfg(not(windows))]
pub fn wide_to_utf16(s: &WideCStr) -> WideBuf<'_> {
    convert::utf32_to_utf16(s.as_slice())
}

/// Strict counterpart of [`wide_to_utf16`].
#[cfg(windows)]
pub(crate) fn try_wide_to_utf16(s: &WideCStr) -> ConvertResult<WideBuf<'_>> {
    convert::validate_utf16(s.as_slice())?;
    Ok(WideBuf::borrowed(s))
}

/// Strict counterpart of [`wide_to_utf16`].
#[cfg(not(windows))]
pub(crate) fn try_wide_to_utf16(s: &WideCStr) -> ConvertResult<WideBuf<'_>> {
    convert::try_utf32_to_utf16(s.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use widestring::WideCString;

    #[test]
    fn test_native_width_matches_wide_char() {
        let expected = match core::mem::size_of::<WideChar>() {
            2 => WideWidth::U16,
            _ => WideWidth::U32,
        };
        assert_eq!(NATIVE_WIDE, expected);
    }

    #[test]
    fn test_wide_conversion_preserves_content() {
        let source = WideCString::from_str("wide šíře").unwrap();
        let buf = wide_to_utf16(&source);
        let expected: Vec<u16> = "wide šíře".encode_utf16().collect();
        assert_eq!(buf.as_units(), expected.as_slice());
    }

    #[cfg(windows)]
    #[test]
    fn test_native_u16_aliases_without_allocating() {
        let source = WideCString::from_str("aliased").unwrap();
        let buf = wide_to_utf16(&source);
        assert!(!buf.is_owned());
        assert_eq!(buf.as_ptr(), source.as_ptr());
    }

    #[cfg(not(windows))]
    #[test]
    fn test_native_u32_converts_into_owned() {
        let source = WideCString::from_str("converted").unwrap();
        let buf = wide_to_utf16(&source);
        assert!(buf.is_owned());
    }
}
