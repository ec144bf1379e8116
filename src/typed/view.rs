//! # **Views** - *Zero-copy typed readers*
//!
//! A [`View<'a, T>`] borrows an [`Array`] whose runtime type is exactly `T` and reads its
//! elements as Rust values without copying any buffer. Views are cheap to clone and
//! windowed, so slicing a view or taking a list element yields another view over the same
//! storage.
//!
//! | `T` | element read by `at` / `get` |
//! |---|---|
//! | primitives, temporal, `Decimal` | the native value |
//! | `String` | `&str` |
//! | `Binary`, `FixedBinary<W>` | `&[u8]` |
//! | `List<T>` | `View<T>` over the item range |
//! | `Struct<(A, B, ..)>` | `(Option<A>, Option<B>, ..)` |
//! | `Dict<T, I>` | `T`'s element, resolved through the key |
//!
//! ```rust
//! use minframe::{List, View, arr_i32, ListArray, Array};
//!
//! let lists = ListArray::from_lengths(arr_i32![1, 2, 3], &[Some(2), None, Some(1)]).unwrap();
//! let arr = Array::from_list(lists);
//! let view = View::<List<i32>>::open(&arr).unwrap();
//! assert_eq!(view.len(), 3);
//! assert_eq!(view.get(0).unwrap().to_vec(), vec![Some(1), Some(2)]);
//! assert!(view.get(1).is_none());
//! assert_eq!(view.values().len(), 3);
//! ```

use std::iter::FusedIterator;

use crate::enums::error::MinframeError;
use crate::Array;
use crate::typed::registry::{
    Dict, DictEncodable, IndexType, List, LogicalTyped, Struct, StructFields, ValueAccess,
};

/// Element type a `View<'a, T>` yields.
pub type ValueOf<'a, T> = <<T as LogicalTyped>::Access<'a> as ValueAccess<'a>>::Value;

/// # View
///
/// Borrowed, typed window `[offset, offset + len)` over an array's elements.
pub struct View<'a, T: LogicalTyped> {
    access: T::Access<'a>,
    offset: usize,
    len: usize,
}

impl<'a, T: LogicalTyped> Clone for View<'a, T> {
    fn clone(&self) -> Self {
        Self {
            access: self.access.clone(),
            offset: self.offset,
            len: self.len,
        }
    }
}

impl<'a, T: LogicalTyped> std::fmt::Debug for View<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("dtype", &T::logical_type())
            .field("offset", &self.offset)
            .field("len", &self.len)
            .finish()
    }
}

impl<'a, T: LogicalTyped> View<'a, T> {
    /// Opens a view over the whole of `array`.
    ///
    /// Fails with `TypeMismatch` unless `array`'s type is exactly `T`, at every nesting level.
    pub fn open(array: &'a Array) -> Result<Self, MinframeError> {
        let access = T::access(array)?;
        let len = access.len();
        Ok(Self {
            access,
            offset: 0,
            len,
        })
    }

    pub(crate) fn from_parts(access: T::Access<'a>, offset: usize, len: usize) -> Self {
        Self {
            access,
            offset,
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element `idx`: `None` when null, `IndexOutOfRange` past the end.
    pub fn at(&self, idx: usize) -> Result<Option<ValueOf<'a, T>>, MinframeError> {
        if idx >= self.len {
            return Err(MinframeError::IndexOutOfRange {
                index: idx,
                len: self.len,
            });
        }
        Ok(self.read(idx))
    }

    /// Element `idx`, or `None` when null or out of range.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<ValueOf<'a, T>> {
        if idx >= self.len {
            return None;
        }
        self.read(idx)
    }

    #[inline]
    fn read(&self, idx: usize) -> Option<ValueOf<'a, T>> {
        let i = self.offset + idx;
        self.access.is_valid(i).then(|| self.access.value(i))
    }

    /// True when `idx` is null. Out-of-range positions count as null.
    pub fn is_null(&self, idx: usize) -> bool {
        idx >= self.len || !self.access.is_valid(self.offset + idx)
    }

    pub fn null_count(&self) -> usize {
        (0..self.len).filter(|&i| self.is_null(i)).count()
    }

    /// Narrower window over the same storage.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
        if offset.checked_add(len).is_none_or(|end| end > self.len) {
            return Err(MinframeError::IndexOutOfRange {
                index: offset.saturating_add(len),
                len: self.len,
            });
        }
        Ok(Self::from_parts(self.access.clone(), self.offset + offset, len))
    }

    /// Restartable iterator over the elements as options.
    pub fn iter(&self) -> ViewIter<'a, T> {
        ViewIter {
            view: self.clone(),
            pos: 0,
            end: self.len,
        }
    }

    pub fn to_vec(&self) -> Vec<Option<ValueOf<'a, T>>> {
        self.iter().collect()
    }
}

impl<'a, T: LogicalTyped> View<'a, List<T>> {
    /// Items referenced by this window, over the shared child.
    pub fn values(&self) -> View<'a, T> {
        let offsets = self.access.offsets;
        let start = offsets[self.offset] as usize;
        let end = offsets[self.offset + self.len] as usize;
        View::from_parts(self.access.child.clone(), start, end - start)
    }
}

impl<'a, F: StructFields> View<'a, Struct<F>> {
    /// Field `idx` read as `X`, windowed like this view.
    ///
    /// The field's own mask is independent of the struct's; a struct-null row may still
    /// hold a valid field value.
    pub fn field<X: LogicalTyped>(&self, idx: usize) -> Result<View<'a, X>, MinframeError> {
        let array = self.access.array;
        let child = array.child(idx).ok_or(MinframeError::IndexOutOfRange {
            index: idx,
            len: array.n_fields(),
        })?;
        Ok(View::from_parts(X::access(child)?, self.offset, self.len))
    }

    pub fn field_names(&self) -> &'a [String] {
        self.access.array.names()
    }
}

impl<'a, T: DictEncodable, I: IndexType, const ORDERED: bool> View<'a, Dict<T, I, ORDERED>> {
    /// Raw keys, windowed like this view.
    pub fn indices(&self) -> Result<View<'a, I>, MinframeError> {
        let array = self.access.array;
        let access = I::access(&array.indices)?;
        Ok(View::from_parts(access, self.offset, self.len))
    }

    /// The whole shared dictionary.
    pub fn dictionary(&self) -> View<'a, T> {
        let access = self.access.dictionary.clone();
        let len = access.len();
        View::from_parts(access, 0, len)
    }
}

/// Iterator over a [`View`].
pub struct ViewIter<'a, T: LogicalTyped> {
    view: View<'a, T>,
    pos: usize,
    end: usize,
}

impl<'a, T: LogicalTyped> Iterator for ViewIter<'a, T> {
    type Item = Option<ValueOf<'a, T>>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        let item = self.view.read(self.pos);
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.pos;
        (n, Some(n))
    }
}

impl<'a, T: LogicalTyped> DoubleEndedIterator for ViewIter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        self.end -= 1;
        Some(self.view.read(self.end))
    }
}

impl<'a, T: LogicalTyped> ExactSizeIterator for ViewIter<'a, T> {}

impl<'a, T: LogicalTyped> FusedIterator for ViewIter<'a, T> {}

impl<'a, T: LogicalTyped> IntoIterator for View<'a, T> {
    type Item = Option<ValueOf<'a, T>>;
    type IntoIter = ViewIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        let end = self.len;
        ViewIter {
            view: self,
            pos: 0,
            end,
        }
    }
}

impl<'a, 'v, T: LogicalTyped> IntoIterator for &'v View<'a, T> {
    type Item = Option<ValueOf<'a, T>>;
    type IntoIter = ViewIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typed::registry::{Binary, Nanosecond, Timestamp};
    use crate::{
        BinaryArray, DatetimeArray, DictionaryArray, ListArray, MinframeError, StructArray,
        TimeUnit, arr_f64, arr_i32, arr_i32_opt, arr_i64, arr_str, arr_str_opt,
    };

    #[test]
    fn test_primitive_view() {
        let arr = arr_i32_opt![Some(1), None, Some(3)];
        let v = View::<i32>::open(&arr).unwrap();
        assert_eq!(v.len(), 3);
        assert_eq!(v.at(0).unwrap(), Some(1));
        assert_eq!(v.at(1).unwrap(), None);
        assert!(v.is_null(1));
        assert_eq!(v.null_count(), 1);
        assert_eq!(
            v.at(3),
            Err(MinframeError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(v.get(3), None);
    }

    #[test]
    fn test_open_is_exact() {
        let arr = arr_i32![1, 2];
        assert!(matches!(
            View::<i64>::open(&arr),
            Err(MinframeError::TypeMismatch { .. })
        ));
        assert!(View::<f64>::open(&arr_f64![1.0]).is_ok());
        let ts = Array::from_timestamp(DatetimeArray::from_slice(&[1i64], TimeUnit::Microseconds))
            .unwrap();
        assert!(View::<Timestamp<Nanosecond>>::open(&ts).is_err());
        let v = View::<i32>::open(&arr).unwrap();
        assert_eq!(
            format!("{:?}", v.slice(1, 1).unwrap()),
            "View { dtype: Int32, offset: 1, len: 1 }"
        );
    }

    #[test]
    fn test_iteration_is_restartable() {
        let arr = arr_str_opt![Some("a"), None, Some("c")];
        let v = View::<String>::open(&arr).unwrap();
        let first: Vec<_> = v.iter().collect();
        let second: Vec<_> = (&v).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![Some("a"), None, Some("c")]);
        assert_eq!(v.iter().len(), 3);
        assert_eq!(v.iter().rev().next(), Some(Some("c")));
    }

    #[test]
    fn test_slice_window() {
        let arr = arr_i64![10, 20, 30, 40];
        let v = View::<i64>::open(&arr).unwrap();
        let s = v.slice(1, 2).unwrap();
        assert_eq!(s.to_vec(), vec![Some(20), Some(30)]);
        assert!(s.slice(1, 2).is_err());
    }

    #[test]
    fn test_list_sub_views() {
        let lists =
            ListArray::from_lengths(arr_i32![1, 2, 3, 4, 5, 6], &[Some(2), Some(1), Some(3)])
                .unwrap();
        let arr = Array::from_list(lists);
        let v = View::<List<i32>>::open(&arr).unwrap();
        let third = v.at(2).unwrap().unwrap();
        assert_eq!(third.to_vec(), vec![Some(4), Some(5), Some(6)]);
        let tail = v.slice(1, 2).unwrap();
        assert_eq!(tail.values().to_vec(), vec![Some(3), Some(4), Some(5), Some(6)]);
        assert!(View::<List<i64>>::open(&arr).is_err());
    }

    #[test]
    fn test_struct_fields_and_nulls() {
        let s = StructArray::new(
            vec!["id".into(), "name".into()],
            vec![arr_i32![1, 2], arr_str!["x", "y"]],
            2,
            Some(crate::Bitmask::from_bools(&[true, false])),
        )
        .unwrap();
        let arr = Array::from_struct(s);
        let v = View::<Struct<(i32, String)>>::open(&arr).unwrap();
        assert_eq!(v.at(0).unwrap(), Some((Some(1), Some("x"))));
        assert_eq!(v.at(1).unwrap(), None);
        // Struct-level null leaves the field readable.
        let names = v.field::<String>(1).unwrap();
        assert_eq!(names.get(1), Some("y"));
        assert_eq!(v.field_names(), &["id".to_string(), "name".to_string()]);
        assert!(v.field::<i64>(0).is_err());
        assert!(v.field::<i32>(2).is_err());
    }

    #[test]
    fn test_dictionary_resolution() {
        let dict = DictionaryArray::new(arr_i32![0, 1, 0, 2], arr_str!["a", "b", "c"], false)
            .unwrap();
        let arr = Array::from_dictionary(dict);
        let v = View::<Dict<String, i32>>::open(&arr).unwrap();
        assert_eq!(
            v.to_vec(),
            vec![Some("a"), Some("b"), Some("a"), Some("c")]
        );
        assert_eq!(v.indices().unwrap().to_vec(), vec![Some(0), Some(1), Some(0), Some(2)]);
        assert_eq!(v.dictionary().len(), 3);
        assert!(View::<Dict<String, u32>>::open(&arr).is_err());
        assert!(View::<Dict<String, i32, true>>::open(&arr).is_err());
    }

    #[test]
    fn test_dictionary_bad_keys_read_null() {
        // Bypasses constructor validation to hold an out-of-range key.
        let dict = DictionaryArray {
            indices: arr_i32_opt![Some(0), Some(7), None, Some(-1)],
            dictionary: arr_str!["a"],
            ordered: false,
        };
        let arr = Array::from_dictionary(dict);
        let v = View::<Dict<String, i32>>::open(&arr).unwrap();
        assert_eq!(v.to_vec(), vec![Some("a"), None, None, None]);
    }

    #[test]
    fn test_binary_view() {
        let arr = Array::from_binary(
            BinaryArray::from_options(&[Some(b"ab".as_slice()), None]).unwrap(),
        );
        let v = View::<Binary>::open(&arr).unwrap();
        assert_eq!(v.to_vec(), vec![Some(b"ab".as_slice()), None]);
    }
}
