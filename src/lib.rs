//! Strbridge - String-Representation Bridging for Translation Tooling
//!
//! Conversions between the string representations a translation editor
//! juggles: UTF-8 (checked and unchecked), NUL-terminated UTF-16 as consumed
//! by ICU-style C APIs, UTF-32, and the platform's native wide string.
//!
//! # Features
//!
//! - **[`WideBuf`]**: owned-or-borrowed NUL-terminated UTF-16 buffer with
//!   single-shot release of owned storage
//! - **Lenient by default**: ill-formed input becomes U+FFFD, failures
//!   collapse to a canonical null buffer, never partial data
//! - **Strict on request**: `try_` variants report the first defect with its
//!   offset
//! - **Zero-copy where possible**: UTF-16 sources (and native wide strings
//!   on 16-bit-wide targets) are aliased, not copied
//! - **Width resolved once**: the native wide width is a build-time constant
//!   in [`native`], nowhere else
//!
//! # Example
//!
//! ```rust
//! use strbridge::convert::{to_utf16, to_utf8, utf16_to_string};
//!
//! // Exact-size owned buffer, NUL-terminated.
//! let buf = to_utf16("překlad");
//! assert!(buf.is_owned());
//! assert_eq!(utf16_to_string(buf.as_units()), "překlad");
//!
//! // Ill-formed input is substituted, not rejected.
//! assert_eq!(to_utf8(&b"ok \xff"[..]), "ok \u{FFFD}");
//!
//! // Empty input yields the canonical null buffer.
//! let empty = to_utf16("");
//! assert!(empty.is_empty() && !empty.is_owned());
//! ```
//!
//! # Conversion Map
//!
//! ```text
//!  UTF-8 bytes ──┐                       ┌──> String      (to_utf8)
//!  &str ─────────┤  probe ── fill        │
//!  UTF-32 units ─┼──────────────> WideBuf ──> *const u16  (as_ptr)
//!  wide string ──┤    (alias when 16-bit)│
//!  UTF-16 units ─┘        alias          └──> WideString  (to_wide)
//! ```

#![warn(clippy::all)]

pub mod buffer;
pub mod bytes;
pub mod config;
pub mod convert;
pub mod error;
pub mod native;

// Re-export commonly used types
pub use buffer::WideBuf;
pub use bytes::{ByteOrder, Encoding};
pub use config::{BridgeConfig, ConfigError, Policy};
pub use convert::{
    to_utf16, to_utf8, to_wide, try_to_utf16, try_to_utf8, utf8_to_utf16, utf32_to_utf16, Source,
};
pub use error::{ConvertError, ConvertResult};
pub use native::{wide_to_utf16, WideWidth, NATIVE_WIDE};
