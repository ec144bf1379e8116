//! # **Column Module** - *Named, chunked column*
//!
//! A [`Column`] pairs a [`Field`] with a [`ChunkedArray`]. Tables hold columns; slicing a
//! column windows its chunks without copying, and [`Column::to_array`] binds them.
//!
//! # Example
//! ```rust
//! use minframe::{Column, arr_i32};
//!
//! let col = Column::from_array("ids", arr_i32![1, 2, 3, 4]);
//! let mid = col.slice(1, 3).unwrap();
//! assert_eq!(mid.to_array().unwrap(), arr_i32![2, 3]);
//! assert!(col.slice(3, 1).unwrap().is_empty());
//! ```

use std::sync::Arc;

use crate::enums::error::MinframeError;
use crate::structs::chunked::chunked_array::ChunkedArray;
use crate::{Array, Field};

/// # Column
///
/// Named column over one or more chunks. The field's type always equals the data's.
#[derive(Clone, Debug)]
pub struct Column {
    field: Arc<Field>,
    data: ChunkedArray,
}

impl Column {
    /// Column over `data`; the field is derived from it.
    pub fn new(name: impl Into<String>, data: ChunkedArray) -> Self {
        let field = Field::new(name, data.dtype().clone(), data.null_count() > 0, None);
        Self {
            field: Arc::new(field),
            data,
        }
    }

    pub fn from_array(name: impl Into<String>, array: Array) -> Self {
        Self::new(name, ChunkedArray::from(array))
    }

    /// Column with explicit field metadata.
    ///
    /// Fails with `TypeMismatch` when the field type differs from the data type.
    pub fn with_field(field: impl Into<Arc<Field>>, data: ChunkedArray) -> Result<Self, MinframeError> {
        let field = field.into();
        if field.dtype != *data.dtype() {
            return Err(MinframeError::type_mismatch(&field.dtype, data.dtype()));
        }
        Ok(Self { field, data })
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.field.name
    }

    #[inline]
    pub fn field(&self) -> &Arc<Field> {
        &self.field
    }

    #[inline]
    pub fn data(&self) -> &ChunkedArray {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.data.null_count()
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.field = Arc::new(self.field.renamed(name));
    }

    /// Rows `[begin, end)` without copying.
    ///
    /// `begin` or `end` past the length fails with `IndexOutOfRange`; `end <= begin`
    /// yields an empty column.
    pub fn slice(&self, begin: usize, end: usize) -> Result<Self, MinframeError> {
        let len = self.len();
        for bound in [begin, end] {
            if bound > len {
                return Err(MinframeError::IndexOutOfRange { index: bound, len });
            }
        }
        let data = if end <= begin {
            ChunkedArray::new(self.data.dtype().clone())?
        } else {
            self.data.slice(begin, end - begin)?
        };
        Ok(Self {
            field: self.field.clone(),
            data,
        })
    }

    /// Binds the chunks into one array.
    pub fn to_array(&self) -> Result<Array, MinframeError> {
        self.data.to_array()
    }

    /// Same column re-partitioned into chunks of at most `max_len` rows.
    pub fn rechunk(&self, max_len: usize) -> Result<Self, MinframeError> {
        Ok(Self {
            field: self.field.clone(),
            data: self.data.rechunk(max_len)?,
        })
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.data == other.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogicalType, arr_i32, arr_str};

    #[test]
    fn test_slice_bounds() {
        let col = Column::from_array("x", arr_i32![1, 2, 3]);
        assert!(matches!(
            col.slice(4, 4),
            Err(MinframeError::IndexOutOfRange { index: 4, len: 3 })
        ));
        assert!(col.slice(0, 4).is_err());
        let empty = col.slice(2, 1).unwrap();
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.field().dtype, LogicalType::Int32);
        assert_eq!(col.slice(0, 3).unwrap(), col);
    }

    #[test]
    fn test_equality_ignores_chunking() {
        let whole = Column::from_array("s", arr_str!["a", "b", "c"]);
        let chunked = Column::new(
            "s",
            ChunkedArray::from_chunks(vec![arr_str!["a"], arr_str!["b", "c"]]).unwrap(),
        );
        assert_eq!(whole, chunked);
        let mut renamed = chunked.clone();
        renamed.rename("t");
        assert_ne!(whole, renamed);
    }

    #[test]
    fn test_with_field_checks_type() {
        let f = Field::new("x", LogicalType::Int64, false, None);
        assert!(Column::with_field(f, ChunkedArray::from(arr_i32![1])).is_err());
    }
}
