//! # StructArray Module - *Named children of equal length*
//!
//! A struct array is a row-aligned bundle of child arrays. Row `i` is the tuple of every
//! child's element `i`. A struct-level null mask marks whole rows as null; children keep
//! their own masks.

use std::sync::Arc;

use crate::enums::error::MinframeError;
use crate::enums::logical_type::{LogicalType, StructField};
use crate::utils::validate_null_mask_len;
use crate::{Array, Bitmask, impl_masked_array};

/// # StructArray
///
/// ### Fields
/// - `names`: field names, shared between slices.
/// - `children`: one array per field, each exactly `len` long.
/// - `null_mask`: optional row validity.
#[derive(Clone, Debug)]
pub struct StructArray {
    names: Arc<[String]>,
    children: Vec<Array>,
    len: usize,
    pub null_mask: Option<Bitmask>,
}

impl StructArray {
    /// Fails with `LengthInvariantViolation` when the name and child counts differ or a
    /// child is not `len` long.
    pub fn new(
        names: Vec<String>,
        children: Vec<Array>,
        len: usize,
        null_mask: Option<Bitmask>,
    ) -> Result<Self, MinframeError> {
        if names.len() != children.len() {
            return Err(MinframeError::LengthInvariantViolation(format!(
                "{} field names for {} children",
                names.len(),
                children.len()
            )));
        }
        if let Some((i, c)) = children.iter().enumerate().find(|(_, c)| c.len() != len) {
            return Err(MinframeError::LengthInvariantViolation(format!(
                "field '{}' has length {}, expected {len}",
                names[i],
                c.len()
            )));
        }
        validate_null_mask_len(len, &null_mask)?;
        Ok(Self {
            names: names.into(),
            children,
            len,
            null_mask,
        })
    }

    /// Builds from `(name, child)` pairs; the length is taken from the first child.
    pub fn from_fields<N: Into<String>>(
        fields: impl IntoIterator<Item = (N, Array)>,
    ) -> Result<Self, MinframeError> {
        let (names, children): (Vec<String>, Vec<Array>) =
            fields.into_iter().map(|(n, c)| (n.into(), c)).unzip();
        let len = children.first().map(Array::len).unwrap_or(0);
        Self::new(names, children, len, None)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn children(&self) -> &[Array] {
        &self.children
    }

    pub fn n_fields(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, idx: usize) -> Option<&Array> {
        self.children.get(idx)
    }

    /// Child by field name; first match wins.
    pub fn child_by_name(&self, name: &str) -> Option<&Array> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.children[i])
    }

    pub fn logical_type(&self) -> LogicalType {
        LogicalType::Struct(
            self.names
                .iter()
                .zip(&self.children)
                .map(|(n, c)| StructField::new(n.clone(), c.logical_type()))
                .collect(),
        )
    }

    /// Zero-copy window; every child is sliced identically.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
        if offset.checked_add(len).is_none_or(|end| end > self.len) {
            return Err(MinframeError::IndexOutOfRange {
                index: offset.saturating_add(len),
                len: self.len,
            });
        }
        Ok(Self {
            names: self.names.clone(),
            children: self
                .children
                .iter()
                .map(|c| c.slice(offset, len))
                .collect::<Result<_, _>>()?,
            len,
            null_mask: self
                .null_mask
                .as_ref()
                .map(|m| m.slice(offset, len))
                .transpose()?,
        })
    }
}

impl_masked_array!(StructArray);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MaskedArray, arr_i32, arr_str};

    #[test]
    fn test_from_fields_and_type() {
        let s = StructArray::from_fields([("id", arr_i32![1, 2]), ("name", arr_str!["a", "b"])])
            .unwrap();
        assert_eq!(s.len(), 2);
        assert_eq!(
            s.logical_type(),
            LogicalType::struct_of([("id", LogicalType::Int32), ("name", LogicalType::String)])
        );
        assert_eq!(s.child_by_name("name"), Some(&arr_str!["a", "b"]));
        assert!(s.child_by_name("missing").is_none());
    }

    #[test]
    fn test_length_checks() {
        let err = StructArray::from_fields([("a", arr_i32![1, 2]), ("b", arr_i32![1])]);
        assert!(matches!(err, Err(MinframeError::LengthInvariantViolation(_))));
        let err = StructArray::new(vec!["a".into()], vec![], 0, None);
        assert!(err.is_err());
    }

    #[test]
    fn test_slice_and_row_nulls() {
        let s = StructArray::new(
            vec!["x".into()],
            vec![arr_i32![1, 2, 3]],
            3,
            Some(Bitmask::from_bools(&[true, false, true])),
        )
        .unwrap();
        assert!(s.is_null(1));
        let tail = s.slice(1, 2).unwrap();
        assert_eq!(tail.child(0), Some(&arr_i32![2, 3]));
        assert!(tail.is_null(0));
        assert!(tail.is_valid(1));
        assert!(s.slice(2, 2).is_err());
    }
}
