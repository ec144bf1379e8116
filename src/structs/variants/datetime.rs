//! # DatetimeArray Module - *Inner typed temporal array*
//!
//! ## Overview
//! - Logical types: `Date32` (`i32` days), `Date64` (`i64` ms), `Time32(unit)` (`i32`),
//!   `Time64(unit)` (`i64`), and `Timestamp(unit)` (`i64`).
//! - Physical storage: `Buffer<T>` of raw epoch offsets plus an optional validity mask.
//! - A single generic struct covers every temporal variant; the enclosing `Array` variant
//!   fixes which logical type it is, and `time_unit` fixes the resolution.

use crate::enums::error::MinframeError;
use crate::enums::time_units::TimeUnit;
use crate::traits::type_unions::Integer;
use crate::utils::validate_null_mask_len;
use crate::{Bitmask, Buffer, impl_masked_array};

/// # DatetimeArray
///
/// Temporal values as integer offsets with a declared [`TimeUnit`].
///
/// ### Fields
/// - `data`: raw temporal values.
/// - `null_mask`: optional bit-packed validity bitmap.
/// - `time_unit`: resolution of the stored values.
///
/// ## Example
/// ```rust
/// use minframe::{DatetimeArray, TimeUnit};
///
/// let arr = DatetimeArray::<i64>::from_slice(&[1_700_000_000_000, 1_700_000_100_000], TimeUnit::Milliseconds);
/// assert_eq!(arr.len(), 2);
/// assert_eq!(arr.get(1), Some(1_700_000_100_000));
/// ```
#[derive(PartialEq, Clone, Debug, Default)]
pub struct DatetimeArray<T> {
    pub data: Buffer<T>,
    pub null_mask: Option<Bitmask>,
    pub time_unit: TimeUnit,
}

impl<T: Integer> DatetimeArray<T> {
    /// Constructs from values, an optional mask, and a unit.
    pub fn new(
        data: impl Into<Buffer<T>>,
        null_mask: Option<Bitmask>,
        time_unit: TimeUnit,
    ) -> Result<Self, MinframeError> {
        let data = data.into();
        validate_null_mask_len(data.len(), &null_mask)?;
        Ok(Self {
            data,
            null_mask,
            time_unit,
        })
    }

    pub fn from_slice(slice: &[T], time_unit: TimeUnit) -> Self {
        Self {
            data: Buffer::from_slice(slice),
            null_mask: None,
            time_unit,
        }
    }

    /// Empty array in `time_unit`, optionally with a mask.
    pub fn with_capacity(cap: usize, null_mask: bool, time_unit: TimeUnit) -> Self {
        Self {
            data: Buffer::with_capacity(cap),
            null_mask: null_mask.then(|| Bitmask::with_capacity(cap)),
            time_unit,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push(&mut self, value: T) {
        self.data.push(value);
        if let Some(m) = self.null_mask.as_mut() {
            m.push(true);
        }
    }

    pub fn push_null(&mut self) {
        let len = self.data.len();
        self.data.push(T::default());
        self.null_mask
            .get_or_insert_with(|| Bitmask::new_set_all(len, true))
            .push(false);
    }

    /// Raw value at `idx`, or `None` when null or out of range.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<T> {
        if idx >= self.data.len() {
            return None;
        }
        match &self.null_mask {
            Some(m) if !m.get(idx) => None,
            _ => Some(self.data[idx]),
        }
    }

    /// Zero-copy window of `len` elements from `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
        Ok(Self {
            data: self.data.slice(offset, len)?,
            null_mask: self
                .null_mask
                .as_ref()
                .map(|m| m.slice(offset, len))
                .transpose()?,
            time_unit: self.time_unit,
        })
    }
}

impl_masked_array!(DatetimeArray<T>, T: Integer);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_slice_keep_unit() {
        let mut arr = DatetimeArray::<i32>::with_capacity(4, false, TimeUnit::Seconds);
        arr.push(10);
        arr.push_null();
        arr.push(30);
        let s = arr.slice(1, 2).unwrap();
        assert_eq!(s.time_unit, TimeUnit::Seconds);
        assert_eq!(s.get(0), None);
        assert_eq!(s.get(1), Some(30));
    }

    #[test]
    fn test_mask_length_checked() {
        let r = DatetimeArray::<i64>::new(vec![1, 2], Some(Bitmask::new_set_all(1, true)), TimeUnit::Nanoseconds);
        assert!(r.is_err());
    }
}
