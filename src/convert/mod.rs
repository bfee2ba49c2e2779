//! Conversion Entry Points
//!
//! A single polymorphic conversion surface over a closed set of source
//! representations, dispatched by explicit tag rather than overload
//! resolution.
//!
//! # Targets
//!
//! | Function     | Result        | Policy                               |
//! |--------------|---------------|--------------------------------------|
//! | [`to_utf16`] | [`WideBuf`]   | lenient, failures collapse to null   |
//! | [`to_utf8`]  | [`String`]    | lenient, U+FFFD substitution         |
//! | [`to_wide`]  | `WideString`  | lenient, native wide width           |
//! | [`try_to_utf16`] | [`WideBuf`] | strict, first defect reported      |
//! | [`try_to_utf8`]  | [`String`]  | strict, first defect reported      |
//!
//! UTF-16 sources alias their input without copying; every other source is
//! converted into owned storage via an exact-size probe-then-fill pass.

pub(crate) mod lenient;

use widestring::{U16CStr, U32Str, WideCStr, WideString};

use crate::buffer::WideBuf;
use crate::error::{ConvertError, ConvertResult};
use crate::native;

// =============================================================================
// Source Representations
// =============================================================================

/// A string in one of the supported source representations.
///
/// `From` impls cover the unambiguous cases; platform wide strings are
/// tagged explicitly with [`Source::Wide`] since their unit type coincides
/// with one of the fixed-width variants on every target.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// UTF-8 bytes, possibly ill-formed.
    Utf8(&'a [u8]),
    /// Guaranteed-valid UTF-8.
    Str(&'a str),
    /// NUL-terminated UTF-16 code units.
    Utf16(&'a U16CStr),
    /// UTF-32 code points.
    Utf32(&'a [u32]),
    /// Platform-native wide string; width is a build-time property.
    Wide(&'a WideCStr),
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Utf8(bytes)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(s: &'a str) -> Self {
        Source::Str(s)
    }
}

impl<'a> From<&'a U16CStr> for Source<'a> {
    fn from(s: &'a U16CStr) -> Self {
        Source::Utf16(s)
    }
}

impl<'a> From<&'a [u32]> for Source<'a> {
    fn from(units: &'a [u32]) -> Self {
        Source::Utf32(units)
    }
}

// =============================================================================
// Lenient Producers
// =============================================================================

/// Convert any source to a NUL-terminated UTF-16 buffer.
///
/// UTF-16 sources are aliased without copying, so the result is bound to the
/// source's lifetime; all other sources produce owned storage. Empty input
/// and conversion failures both yield [`WideBuf::null`], never
/// partially-filled data.
pub fn to_utf16<'a>(src: impl Into<Source<'a>>) -> WideBuf<'a> {
    match src.into() {
        Source::Utf8(bytes) => utf8_to_utf16(bytes),
        Source::Str(s) => utf8_to_utf16(s.as_bytes()),
        Source::Utf16(s) => WideBuf::borrowed(s),
        Source::Utf32(units) => utf32_to_utf16(units),
        Source::Wide(s) => native::wide_to_utf16(s),
    }
}

/// Lenient UTF-8 to UTF-16: probe the exact output length, then fill an
/// owned buffer of that length.
pub fn utf8_to_utf16(bytes: &[u8]) -> WideBuf<'static> {
    let probed = lenient::utf16_len_of_utf8(bytes);
    if probed == 0 {
        return WideBuf::null();
    }
    let mut buf = WideBuf::owned(probed);
    let written = match buf.units_mut() {
        Some(units) => lenient::utf8_to_utf16_into(bytes, &mut units[..probed]),
        None => 0,
    };
    if written != probed {
        tracing::warn!(probed, written, "utf-8 fill disagreed with probe, dropping result");
        return WideBuf::null();
    }
    buf
}

/// Lenient UTF-32 to UTF-16, same probe-then-fill shape as
/// [`utf8_to_utf16`].
pub fn utf32_to_utf16(units: &[u32]) -> WideBuf<'static> {
    let probed = lenient::utf16_len_of_utf32(units);
    if probed == 0 {
        return WideBuf::null();
    }
    let mut buf = WideBuf::owned(probed);
    let written = match buf.units_mut() {
        Some(dst) => lenient::utf32_to_utf16_into(units, &mut dst[..probed]),
        None => 0,
    };
    if written != probed {
        tracing::warn!(probed, written, "utf-32 fill disagreed with probe, dropping result");
        return WideBuf::null();
    }
    buf
}

/// Convert any source to an owned UTF-8 string, substituting U+FFFD for
/// ill-formed input.
pub fn to_utf8<'a>(src: impl Into<Source<'a>>) -> String {
    match src.into() {
        Source::Utf8(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        Source::Str(s) => s.to_owned(),
        Source::Utf16(s) => s.to_string_lossy(),
        Source::Utf32(units) => U32Str::from_slice(units).to_string_lossy(),
        Source::Wide(s) => s.to_string_lossy(),
    }
}

/// Convert any source to an owned platform wide string.
pub fn to_wide<'a>(src: impl Into<Source<'a>>) -> WideString {
    match src.into() {
        Source::Str(s) => WideString::from_str(s),
        src => WideString::from_str(&to_utf8(src)),
    }
}

// =============================================================================
// Strict Variants
// =============================================================================

/// Strict counterpart of [`to_utf16`]: ill-formed input is reported instead
/// of substituted. Valid input behaves exactly like the lenient path,
/// including the aliasing of UTF-16 sources.
pub fn try_to_utf16<'a>(src: impl Into<Source<'a>>) -> ConvertResult<WideBuf<'a>> {
    match src.into() {
        Source::Utf8(bytes) => {
            let s = validate_utf8(bytes)?;
            Ok(utf8_to_utf16(s.as_bytes()))
        }
        Source::Str(s) => Ok(utf8_to_utf16(s.as_bytes())),
        Source::Utf16(s) => {
            validate_utf16(s.as_slice())?;
            Ok(WideBuf::borrowed(s))
        }
        Source::Utf32(units) => try_utf32_to_utf16(units),
        Source::Wide(s) => native::try_wide_to_utf16(s),
    }
}

/// Strict counterpart of [`to_utf8`].
pub fn try_to_utf8<'a>(src: impl Into<Source<'a>>) -> ConvertResult<String> {
    match src.into() {
        Source::Utf8(bytes) => Ok(validate_utf8(bytes)?.to_owned()),
        Source::Str(s) => Ok(s.to_owned()),
        Source::Utf16(s) => {
            validate_utf16(s.as_slice())?;
            Ok(s.to_string_lossy())
        }
        Source::Utf32(units) => {
            validate_utf32(units)?;
            Ok(U32Str::from_slice(units).to_string_lossy())
        }
        Source::Wide(s) => {
            let buf = native::try_wide_to_utf16(s)?;
            Ok(String::from_utf16_lossy(buf.as_units()))
        }
    }
}

/// Strict UTF-32 to UTF-16.
pub fn try_utf32_to_utf16(units: &[u32]) -> ConvertResult<WideBuf<'static>> {
    validate_utf32(units)?;
    Ok(utf32_to_utf16(units))
}

// =============================================================================
// Unit-Slice Helpers
// =============================================================================

/// Copy UTF-16 units (not necessarily NUL-terminated) into an owned UTF-8
/// string, substituting U+FFFD for unpaired surrogates.
pub fn utf16_to_string(units: &[u16]) -> String {
    String::from_utf16_lossy(units)
}

/// Strict counterpart of [`utf16_to_string`].
pub fn try_utf16_to_string(units: &[u16]) -> ConvertResult<String> {
    validate_utf16(units)?;
    Ok(String::from_utf16_lossy(units))
}

/// Copy UTF-32 units into an owned UTF-8 string, substituting U+FFFD for
/// values outside the scalar range.
pub fn utf32_to_string(units: &[u32]) -> String {
    U32Str::from_slice(units).to_string_lossy()
}

/// Strict counterpart of [`utf32_to_string`].
pub fn try_utf32_to_string(units: &[u32]) -> ConvertResult<String> {
    validate_utf32(units)?;
    Ok(U32Str::from_slice(units).to_string_lossy())
}

fn validate_utf8(bytes: &[u8]) -> ConvertResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| ConvertError::IllFormedUtf8 {
        valid_up_to: e.valid_up_to(),
    })
}

pub(crate) fn validate_utf16(units: &[u16]) -> ConvertResult<()> {
    let mut index = 0;
    for decoded in char::decode_utf16(units.iter().copied()) {
        match decoded {
            Ok(ch) => index += ch.len_utf16(),
            Err(e) => {
                return Err(ConvertError::UnpairedSurrogate {
                    unit: e.unpaired_surrogate(),
                    index,
                })
            }
        }
    }
    Ok(())
}

fn validate_utf32(units: &[u32]) -> ConvertResult<()> {
    for (index, &value) in units.iter().enumerate() {
        if char::from_u32(value).is_none() {
            return Err(ConvertError::InvalidCodePoint { value, index });
        }
    }
    Ok(())
}
