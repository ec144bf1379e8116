//! # **Macros** - *Shared boilerplate for inner arrays*

/// Implements `MaskedArray` for an inner array with a `null_mask` field and a `len()` method.
#[macro_export]
macro_rules! impl_masked_array {
    ($array:ty $(, $gen:ident : $bound:path)?) => {
        impl$(<$gen: $bound>)? $crate::traits::masked_array::MaskedArray for $array {
            #[inline]
            fn len(&self) -> usize {
                <$array>::len(self)
            }

            #[inline]
            fn null_mask(&self) -> Option<&$crate::Bitmask> {
                self.null_mask.as_ref()
            }
        }
    };
}

/// Constructors, accessors, and zero-copy slicing for arrays shaped
/// `{ data: Buffer<T>, null_mask: Option<Bitmask> }`.
#[macro_export]
macro_rules! impl_fixed_width_array {
    ($array:ident, $bound:ident) => {
        impl<T: $bound> $array<T> {
            /// Constructs from values and an optional validity mask.
            ///
            /// Fails with `LengthInvariantViolation` if the mask length differs from the data.
            pub fn new(
                data: impl Into<$crate::Buffer<T>>,
                null_mask: Option<$crate::Bitmask>,
            ) -> Result<Self, $crate::MinframeError> {
                let data = data.into();
                $crate::utils::validate_null_mask_len(data.len(), &null_mask)?;
                Ok(Self { data, null_mask })
            }

            /// Dense array copied from `slice`.
            pub fn from_slice(slice: &[T]) -> Self {
                Self {
                    data: $crate::Buffer::from_slice(slice),
                    null_mask: None,
                }
            }

            /// Takes ownership of `data` without copying.
            pub fn from_vec64(
                data: vec64::Vec64<T>,
                null_mask: Option<$crate::Bitmask>,
            ) -> Result<Self, $crate::MinframeError> {
                Self::new($crate::Buffer::from_vec64(data), null_mask)
            }

            /// Nullable array from optional values; nulls store `T::default()`.
            pub fn from_options(values: &[Option<T>]) -> Self {
                let mut out = Self::with_capacity(values.len(), true);
                for v in values {
                    match v {
                        Some(v) => out.push(*v),
                        None => out.push_null(),
                    }
                }
                out
            }

            /// Empty array with room for `cap` values, optionally with a mask from the start.
            pub fn with_capacity(cap: usize, null_mask: bool) -> Self {
                Self {
                    data: $crate::Buffer::with_capacity(cap),
                    null_mask: null_mask.then(|| $crate::Bitmask::with_capacity(cap)),
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

            /// Appends a valid value.
            pub fn push(&mut self, value: T) {
                self.data.push(value);
                if let Some(m) = self.null_mask.as_mut() {
                    m.push(true);
                }
            }

            /// Appends a null, creating the mask on first use.
            pub fn push_null(&mut self) {
                let len = self.data.len();
                self.data.push(T::default());
                self.null_mask
                    .get_or_insert_with(|| $crate::Bitmask::new_set_all(len, true))
                    .push(false);
            }

            /// Value at `idx`, or `None` when null or out of range.
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
            pub fn slice(&self, offset: usize, len: usize) -> Result<Self, $crate::MinframeError> {
                Ok(Self {
                    data: self.data.slice(offset, len)?,
                    null_mask: self
                        .null_mask
                        .as_ref()
                        .map(|m| m.slice(offset, len))
                        .transpose()?,
                })
            }

            /// Iterates values as options.
            pub fn iter_opt(&self) -> impl Iterator<Item = Option<T>> + '_ {
                (0..self.len()).map(move |i| self.get(i))
            }
        }

        impl<T: $bound> From<Vec<T>> for $array<T> {
            fn from(v: Vec<T>) -> Self {
                Self {
                    data: $crate::Buffer::from(v),
                    null_mask: None,
                }
            }
        }

        $crate::impl_masked_array!($array<T>, T: $bound);
    };
}

/// Dense `Array` literals for the common primitive variants.
///
/// ```rust
/// use minframe::{arr_f64, arr_i64};
///
/// assert_eq!(arr_i64![1, 2, 3].len(), 3);
/// assert_eq!(arr_f64![0.5].len(), 1);
/// ```
#[macro_export]
macro_rules! arr_i32 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_int32($crate::IntegerArray::<i32>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_i64 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_int64($crate::IntegerArray::<i64>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_u32 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_uint32($crate::IntegerArray::<u32>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_f64 {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_float64($crate::FloatArray::<f64>::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_bool {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_bool($crate::BooleanArray::from_slice(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_str {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_string($crate::StringArray::from_slice(&[$($x),*]))
    };
}

/// Nullable literals: `arr_i32_opt![Some(1), None]`.
#[macro_export]
macro_rules! arr_i32_opt {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_int32($crate::IntegerArray::<i32>::from_options(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_i64_opt {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_int64($crate::IntegerArray::<i64>::from_options(&[$($x),*]))
    };
}

#[macro_export]
macro_rules! arr_str_opt {
    ($($x:expr),* $(,)?) => {
        $crate::Array::from_string($crate::StringArray::from_options(&[$($x),*]))
    };
}
