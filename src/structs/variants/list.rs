//! # ListArray Module - *Variable-length lists over a child array*
//!
//! Same offsets layout as [`StringArray`](crate::StringArray), with the byte buffer
//! replaced by a child [`Array`]. Element `i` is `values[offsets[i]..offsets[i + 1]]`.
//!
//! Slicing windows the offsets and shares the child whole. The referenced child range is
//! [`ListArray::child_span`].

use crate::enums::error::MinframeError;
use crate::enums::logical_type::LogicalType;
use crate::utils::{to_offset, validate_null_mask_len, validate_offsets};
use crate::{Array, Bitmask, Buffer, impl_masked_array};

/// # ListArray
///
/// ### Fields
/// - `offsets`: `len + 1` non-decreasing positions into `values`.
/// - `values`: child array holding every element's items back to back.
/// - `null_mask`: optional validity bitmap. A null list still has an (empty or ignored)
///   offsets range.
#[derive(Clone, Debug)]
pub struct ListArray {
    offsets: Buffer<u32>,
    pub values: Array,
    pub null_mask: Option<Bitmask>,
}

impl ListArray {
    /// Constructs from raw parts, checking offsets against the child length.
    pub fn new(
        offsets: impl Into<Buffer<u32>>,
        values: Array,
        null_mask: Option<Bitmask>,
    ) -> Result<Self, MinframeError> {
        let offsets = offsets.into();
        let len = validate_offsets(&offsets, values.len())?;
        validate_null_mask_len(len, &null_mask)?;
        Ok(Self {
            offsets,
            values,
            null_mask,
        })
    }

    /// Empty list of `elem` items.
    pub fn empty(elem: &LogicalType) -> Result<Self, MinframeError> {
        Ok(Self {
            offsets: Buffer::from(vec![0u32]),
            values: Array::empty(elem)?,
            null_mask: None,
        })
    }

    /// List array from per-element lengths over `values`.
    ///
    /// `None` entries are null lists with no items. Fails with `LengthInvariantViolation`
    /// when the lengths do not sum to `values.len()`.
    pub fn from_lengths(values: Array, lengths: &[Option<usize>]) -> Result<Self, MinframeError> {
        let mut offsets = Vec::with_capacity(lengths.len() + 1);
        offsets.push(0u32);
        let mut end = 0u64;
        for l in lengths {
            end += l.unwrap_or(0) as u64;
            offsets.push(to_offset(end)?);
        }
        let null_mask = lengths
            .iter()
            .any(Option::is_none)
            .then(|| Bitmask::from_bools(&lengths.iter().map(Option::is_some).collect::<Vec<_>>()));
        Self::new(offsets, values, null_mask)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn offsets(&self) -> &Buffer<u32> {
        &self.offsets
    }

    /// Logical type of the items.
    pub fn value_type(&self) -> LogicalType {
        self.values.logical_type()
    }

    /// Child range `[start, end)` referenced by this window.
    #[inline]
    pub fn child_span(&self) -> (usize, usize) {
        (self.offsets[0] as usize, self.offsets[self.len()] as usize)
    }

    /// Items of element `idx` as a zero-copy child slice, regardless of validity.
    pub fn value(&self, idx: usize) -> Result<Array, MinframeError> {
        if idx >= self.len() {
            return Err(MinframeError::IndexOutOfRange {
                index: idx,
                len: self.len(),
            });
        }
        let start = self.offsets[idx] as usize;
        let end = self.offsets[idx + 1] as usize;
        self.values.slice(start, end - start)
    }

    /// Items of element `idx`, or `None` when null or out of range.
    pub fn get(&self, idx: usize) -> Option<Array> {
        if idx >= self.len() {
            return None;
        }
        match &self.null_mask {
            Some(m) if !m.get(idx) => None,
            _ => self.value(idx).ok(),
        }
    }

    /// Zero-copy window of `len` lists from `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
        if offset.checked_add(len).is_none_or(|end| end > self.len()) {
            return Err(MinframeError::IndexOutOfRange {
                index: offset.saturating_add(len),
                len: self.len(),
            });
        }
        Ok(Self {
            offsets: self.offsets.slice(offset, len + 1)?,
            values: self.values.clone(),
            null_mask: self
                .null_mask
                .as_ref()
                .map(|m| m.slice(offset, len))
                .transpose()?,
        })
    }
}

impl_masked_array!(ListArray);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaskedArray, arr_i32};

    #[test]
    fn test_new_validates_offsets() {
        assert!(ListArray::new(vec![0u32, 2, 3], arr_i32![1, 2, 3], None).is_ok());
        assert!(matches!(
            ListArray::new(vec![0u32, 2, 4], arr_i32![1, 2, 3], None),
            Err(MinframeError::LengthInvariantViolation(_))
        ));
        let short_mask = Some(Bitmask::new_set_all(2, true));
        assert!(ListArray::new(vec![0u32, 2], arr_i32![1, 2], short_mask).is_err());
    }

    #[test]
    fn test_value_and_nulls() {
        let list = ListArray::from_lengths(arr_i32![1, 2, 3], &[Some(2), None, Some(1)]).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.null_count(), 1);
        assert_eq!(list.get(0), Some(arr_i32![1, 2]));
        assert_eq!(list.get(1), None);
        assert_eq!(list.value(1).unwrap().len(), 0);
        assert_eq!(list.get(2), Some(arr_i32![3]));
        assert!(list.value(3).is_err());
    }

    #[test]
    fn test_slice_shares_child() {
        let lengths = [Some(2), Some(1), Some(3)];
        let list = ListArray::from_lengths(arr_i32![1, 2, 3, 4, 5, 6], &lengths).unwrap();
        let s = list.slice(1, 2).unwrap();
        assert_eq!(s.offsets().as_slice(), &[2, 3, 6]);
        assert_eq!(s.child_span(), (2, 6));
        assert!(s.values.ptr_eq(&list.values));
        assert_eq!(s.get(1), Some(arr_i32![4, 5, 6]));
    }

    #[test]
    fn test_empty() {
        let l = ListArray::empty(&LogicalType::Int32).unwrap();
        assert_eq!(l.len(), 0);
        assert_eq!(l.value_type(), LogicalType::Int32);
        let nested = ListArray::from_lengths(Array::from_list(l), &[]).unwrap();
        assert_eq!(nested.value_type(), LogicalType::list(LogicalType::Int32));
    }
}
