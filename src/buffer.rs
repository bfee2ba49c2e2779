//! Owned-or-Borrowed UTF-16 Buffer
//!
//! [`WideBuf`] is a uniform handle to a NUL-terminated UTF-16 string,
//! regardless of whether the storage was freshly allocated by a conversion or
//! borrowed from a caller-owned wide string. Owned storage is released
//! exactly once when the value is dropped; borrowed storage is never
//! released.

use widestring::U16CStr;

/// Backing storage for the canonical null buffer: a single terminator.
static NULL_UNITS: [u16; 1] = [0];

/// A possibly non-owned, NUL-terminated UTF-16 code-unit string.
///
/// Produced by the lenient conversion entry points in [`crate::convert`], or
/// constructed directly for hand-filled buffers. The two storage variants
/// differ in lifetime and in what [`WideBuf::capacity`] reports:
///
/// | Variant  | Storage                       | `capacity()`        |
/// |----------|-------------------------------|---------------------|
/// | owned    | heap allocation, exact size   | units incl. NUL     |
/// | borrowed | alias into caller's string    | 0 (extent unknown)  |
///
/// There is no `Clone`: exactly one live owner exists for owned storage, and
/// moves transfer the allocation without copying. The borrow checker rejects
/// use-after-move, so the moved-from source can never release the storage a
/// second time.
#[derive(Debug)]
pub struct WideBuf<'a> {
    repr: Repr<'a>,
}

#[derive(Debug)]
enum Repr<'a> {
    /// Exact-size allocation, terminator included.
    Owned(Box<[u16]>),
    /// Alias over external NUL-terminated storage, terminator included.
    Borrowed(&'a [u16]),
}

impl WideBuf<'static> {
    /// Allocate an owning buffer with room for `len` units plus the
    /// terminator. The storage is zero-filled, so the buffer is a valid
    /// empty string until the caller fills it through [`Self::units_mut`].
    pub fn owned(len: usize) -> WideBuf<'static> {
        WideBuf {
            repr: Repr::Owned(vec![0u16; len + 1].into_boxed_slice()),
        }
    }

    /// The canonical empty, non-owned string.
    ///
    /// Used as the uniform "no usable string" sentinel by every conversion,
    /// so call sites never branch on a separate failure case.
    pub fn null() -> WideBuf<'static> {
        WideBuf {
            repr: Repr::Borrowed(&NULL_UNITS),
        }
    }
}

impl<'a> WideBuf<'a> {
    /// Wrap an existing NUL-terminated UTF-16 string without copying.
    ///
    /// The result aliases `s` and is only valid for `s`'s lifetime, which
    /// the borrow checker enforces.
    pub fn borrowed(s: &'a U16CStr) -> WideBuf<'a> {
        WideBuf {
            repr: Repr::Borrowed(s.as_slice_with_nul()),
        }
    }

    /// Read-only pointer to the NUL-terminated unit sequence, for passing
    /// into encoding APIs that take `const UChar*`-style arguments.
    pub fn as_ptr(&self) -> *const u16 {
        self.raw_units().as_ptr()
    }

    /// Code units up to (excluding) the terminator.
    pub fn as_units(&self) -> &[u16] {
        &self.raw_units()[..self.len()]
    }

    /// Code units up to and including the terminator.
    pub fn as_units_with_nul(&self) -> &[u16] {
        &self.raw_units()[..self.len() + 1]
    }

    /// Mutable fill access to the whole allocation, terminator slot
    /// included. `None` for borrowed storage: aliased strings cannot be
    /// written through this handle.
    pub fn units_mut(&mut self) -> Option<&mut [u16]> {
        match &mut self.repr {
            Repr::Owned(units) => Some(&mut units[..]),
            Repr::Borrowed(_) => None,
        }
    }

    /// Allocated element count including the terminator. 0 for borrowed
    /// storage, whose true extent is not tracked.
    pub fn capacity(&self) -> usize {
        match &self.repr {
            Repr::Owned(units) => units.len(),
            Repr::Borrowed(_) => 0,
        }
    }

    /// Number of units before the first terminator.
    pub fn len(&self) -> usize {
        let units = self.raw_units();
        units.iter().position(|&u| u == 0).unwrap_or(units.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this buffer owns (and will release) its storage.
    pub fn is_owned(&self) -> bool {
        matches!(self.repr, Repr::Owned(_))
    }

    fn raw_units(&self) -> &[u16] {
        match &self.repr {
            Repr::Owned(units) => units,
            Repr::Borrowed(units) => units,
        }
    }
}

impl Default for WideBuf<'static> {
    fn default() -> Self {
        WideBuf::null()
    }
}

/// Read-only view of the code units before the terminator, so a buffer can
/// be handed to slice-taking APIs directly.
impl std::ops::Deref for WideBuf<'_> {
    type Target = [u16];

    fn deref(&self) -> &[u16] {
        self.as_units()
    }
}
