//! # **DictionaryArray Module** - *Dictionary-encoded values*
//!
//! Each row stores a small integer index into a shared dictionary of values. Repeated
//! values are stored once, and slices or binds of arrays over the same dictionary keep
//! sharing it.
//!
//! ## Layout
//! - `indices`: an integer [`Array`] (any of the eight integer widths); its null mask is the
//!   row validity.
//! - `dictionary`: any non-dictionary [`Array`], shared by `Arc`.
//! - `ordered`: whether dictionary order is meaningful (an ordered factor).
//!
//! ## Example
//! ```rust
//! use minframe::{DictionaryArray, IntegerType};
//!
//! let arr = DictionaryArray::from_strs(
//!     &[Some("apple"), Some("pear"), Some("apple"), None],
//!     IntegerType::UInt8,
//!     false,
//! )
//! .unwrap();
//! assert_eq!(arr.len(), 4);
//! assert_eq!(arr.dictionary.len(), 2);
//! assert_eq!(arr.key(2), Some(0));
//! assert_eq!(arr.key(3), None);
//! ```

use crate::enums::error::MinframeError;
use crate::enums::logical_type::{IntegerType, LogicalType};
use crate::{Array, Bitmask, StringArray};

#[cfg(feature = "fast_hash")]
use ahash::AHashMap as HashMap;
#[cfg(not(feature = "fast_hash"))]
use std::collections::HashMap;

/// # DictionaryArray
///
/// ### Fields
/// - `indices`: integer keys; null keys are null rows.
/// - `dictionary`: the distinct values.
/// - `ordered`: ordered-factor flag, part of the logical type.
///
/// Every valid key lies in `[0, dictionary.len())`; constructors check it.
#[derive(Clone, Debug)]
pub struct DictionaryArray {
    pub indices: Array,
    pub dictionary: Array,
    pub ordered: bool,
}

impl DictionaryArray {
    /// Fails with `TypeMismatch` for non-integer indices or a nested dictionary, and with
    /// `LengthInvariantViolation` when a valid key is negative or out of range.
    pub fn new(indices: Array, dictionary: Array, ordered: bool) -> Result<Self, MinframeError> {
        if indices.integer_type().is_none() {
            return Err(MinframeError::type_mismatch(
                "integer dictionary indices",
                indices.logical_type(),
            ));
        }
        if matches!(dictionary, Array::Dictionary(_)) {
            return Err(MinframeError::type_mismatch(
                "non-dictionary values",
                dictionary.logical_type(),
            ));
        }
        let n = dictionary.len();
        for i in 0..indices.len() {
            if indices.is_null(i) {
                continue;
            }
            match indices.index_at(i) {
                Some(k) if k < n => {}
                _ => {
                    return Err(MinframeError::LengthInvariantViolation(format!(
                        "dictionary key at row {i} outside [0, {n})"
                    )));
                }
            }
        }
        Ok(Self {
            indices,
            dictionary,
            ordered,
        })
    }

    /// Encodes strings in first-seen order. Nulls become null keys.
    ///
    /// Fails with `BuilderConfiguration` when the distinct count overflows `index`.
    pub fn from_strs(
        values: &[Option<&str>],
        index: IntegerType,
        ordered: bool,
    ) -> Result<Self, MinframeError> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut distinct: Vec<&str> = Vec::new();
        let mut keys = Vec::with_capacity(values.len());
        for v in values {
            keys.push(v.map(|s| {
                *seen.entry(s).or_insert_with(|| {
                    distinct.push(s);
                    distinct.len() - 1
                })
            }));
        }
        if distinct.len() as u64 > index.max_index().saturating_add(1) {
            return Err(MinframeError::BuilderConfiguration(format!(
                "{} distinct values overflow {index} indices",
                distinct.len()
            )));
        }
        let indices = Array::from_indices(index, &keys)?;
        Self::new(
            indices,
            Array::from_string(StringArray::from_slice(&distinct)),
            ordered,
        )
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index width.
    pub fn index_type(&self) -> IntegerType {
        self.indices.integer_type().unwrap_or(IntegerType::Int32)
    }

    pub fn value_type(&self) -> LogicalType {
        self.dictionary.logical_type()
    }

    pub fn logical_type(&self) -> LogicalType {
        LogicalType::dictionary(self.value_type(), self.index_type(), self.ordered)
    }

    /// Key at row `idx`, or `None` when null or out of range.
    #[inline]
    pub fn key(&self, idx: usize) -> Option<usize> {
        if self.indices.is_null(idx) {
            return None;
        }
        self.indices.index_at(idx)
    }

    /// Zero-copy window; the dictionary is shared, not sliced.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
        Ok(Self {
            indices: self.indices.slice(offset, len)?,
            dictionary: self.dictionary.clone(),
            ordered: self.ordered,
        })
    }
}

impl crate::traits::masked_array::MaskedArray for DictionaryArray {
    #[inline]
    fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    fn null_mask(&self) -> Option<&Bitmask> {
        self.indices.null_mask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntegerArray, arr_i32, arr_str};

    #[test]
    fn test_new_checks_keys() {
        let dict = arr_str!["a", "b", "c"];
        let ok = DictionaryArray::new(
            Array::from_uint8(IntegerArray::from_slice(&[0, 1, 0, 2])),
            dict.clone(),
            false,
        )
        .unwrap();
        assert_eq!(ok.key(3), Some(2));
        assert_eq!(
            ok.logical_type(),
            LogicalType::dictionary(LogicalType::String, IntegerType::UInt8, false)
        );

        let out_of_range = DictionaryArray::new(arr_i32![0, 3], dict.clone(), false);
        assert!(matches!(out_of_range, Err(MinframeError::LengthInvariantViolation(_))));
        let negative = DictionaryArray::new(arr_i32![-1], dict.clone(), false);
        assert!(negative.is_err());
        let not_int = DictionaryArray::new(arr_str!["x"], dict, false);
        assert!(matches!(not_int, Err(MinframeError::TypeMismatch { .. })));
    }

    #[test]
    fn test_null_keys_skip_range_check() {
        let idx = Array::from_int16(IntegerArray::from_options(&[Some(0), None]));
        let d = DictionaryArray::new(idx, arr_str!["only"], true).unwrap();
        assert_eq!(d.key(1), None);
        assert!(crate::MaskedArray::is_null(&d, 1));
    }

    #[test]
    fn test_from_strs_overflow() {
        let many: Vec<String> = (0..300).map(|i| i.to_string()).collect();
        let refs: Vec<Option<&str>> = many.iter().map(|s| Some(s.as_str())).collect();
        assert!(matches!(
            DictionaryArray::from_strs(&refs, IntegerType::UInt8, false),
            Err(MinframeError::BuilderConfiguration(_))
        ));
        assert!(DictionaryArray::from_strs(&refs, IntegerType::UInt16, false).is_ok());
    }

    #[test]
    fn test_slice_shares_dictionary() {
        let d = DictionaryArray::from_strs(&[Some("x"), Some("y"), Some("x")], IntegerType::Int32, false)
            .unwrap();
        let s = d.slice(1, 2).unwrap();
        assert!(s.dictionary.ptr_eq(&d.dictionary));
        assert_eq!(s.key(0), Some(1));
    }
}
