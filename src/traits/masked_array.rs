//! Core `MaskedArray` trait, providing a common interface for all inner array types,
//! including support for null masks.

use crate::Bitmask;

/// MaskedArray is implemented by all inner, nullable arrays.
///
/// ### Purpose
/// - Keeps length and null handling uniform across `BooleanArray`, `IntegerArray`,
///   `FloatArray`, `DatetimeArray`, `DecimalArray`, `StringArray`, `BinaryArray`,
///   `FixedSizeBinaryArray`, `ListArray`, `StructArray`, and `DictionaryArray`.
/// - Only `len` and `null_mask` are required; the rest derive from them.
pub trait MaskedArray {
    /// Returns the number of elements in the array.
    fn len(&self) -> usize;

    /// Returns the validity mask, if any. `None` means every element is valid.
    fn null_mask(&self) -> Option<&Bitmask>;

    /// Returns true if the array is empty.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when element `idx` is null. Out-of-range indices are reported as null.
    #[inline]
    fn is_null(&self, idx: usize) -> bool {
        if idx >= self.len() {
            return true;
        }
        match self.null_mask() {
            Some(m) => !m.get(idx),
            None => false,
        }
    }

    #[inline]
    fn is_valid(&self, idx: usize) -> bool {
        !self.is_null(idx)
    }

    /// Number of null elements.
    #[inline]
    fn null_count(&self) -> usize {
        self.null_mask().map(|m| m.null_count()).unwrap_or(0)
    }

    /// True when a validity mask is attached.
    #[inline]
    fn is_nullable(&self) -> bool {
        self.null_mask().is_some()
    }
}
