//! # **Cast** - *Runtime arrays to static types*
//!
//! The single entry point for reading an [`Array`] as a compile-time type. Dispatch goes
//! through the tag first, then the exact parameters, recursing into list elements, struct
//! fields, and dictionary value and index types. Any disagreement is a `TypeMismatch`.

use crate::Array;
use crate::enums::error::MinframeError;
use crate::typed::registry::LogicalTyped;
use crate::typed::view::View;

/// Typed view over `array`; fails with `TypeMismatch` unless the types match exactly.
///
/// ```rust
/// use minframe::{cast, arr_i32, MinframeError};
///
/// let arr = arr_i32![1, 2, 3];
/// assert_eq!(cast::<i32>(&arr).unwrap().get(2), Some(3));
/// assert!(matches!(cast::<i64>(&arr), Err(MinframeError::TypeMismatch { .. })));
/// ```
#[inline]
pub fn cast<T: LogicalTyped>(array: &Array) -> Result<View<'_, T>, MinframeError> {
    View::open(array)
}

/// The inner array behind `array`, typed as `T`'s storage.
#[inline]
pub fn cast_native<T: LogicalTyped>(array: &Array) -> Result<&T::Native, MinframeError> {
    T::native(array)
}

impl Array {
    /// See [`cast`].
    #[inline]
    pub fn view<T: LogicalTyped>(&self) -> Result<View<'_, T>, MinframeError> {
        cast::<T>(self)
    }

    /// See [`cast_native`].
    #[inline]
    pub fn as_native<T: LogicalTyped>(&self) -> Result<&T::Native, MinframeError> {
        cast_native::<T>(self)
    }
}
