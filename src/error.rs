//! Conversion Error Types
//!
//! Only the strict (`try_*`) conversion entry points surface these; the
//! lenient entry points substitute U+FFFD and never fail.

use thiserror::Error;

/// A strict conversion rejected ill-formed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The UTF-8 input contains an ill-formed sequence.
    #[error("ill-formed UTF-8 after {valid_up_to} valid bytes")]
    IllFormedUtf8 {
        /// Number of leading bytes that form valid UTF-8.
        valid_up_to: usize,
    },

    /// The UTF-16 input contains a surrogate without its pair.
    #[error("unpaired surrogate {unit:#06x} at code unit {index}")]
    UnpairedSurrogate {
        /// The lone surrogate code unit.
        unit: u16,
        /// Index of the offending unit.
        index: usize,
    },

    /// The UTF-32 input contains a value outside the scalar value range.
    #[error("invalid code point {value:#010x} at index {index}")]
    InvalidCodePoint {
        /// The offending 32-bit value.
        value: u32,
        /// Index of the offending unit.
        index: usize,
    },
}

/// Result type for strict conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
