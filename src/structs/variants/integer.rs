//! # **IntegerArray Module** - *Inner typed integer array*
//!
//! ## Overview
//! - Logical types: `Int8..Int64`, `UInt8..UInt64`, and the index arrays of dictionaries.
//! - Physical storage: `Buffer<T>` (64-byte aligned `Vec64<T>` under `Arc`) plus an
//!   optional bit-packed validity mask.
//! - Slicing shares both the value buffer and the mask.

use crate::traits::type_unions::Integer;
use crate::{Bitmask, Buffer, impl_fixed_width_array};

/// # IntegerArray
///
/// Integer array with optional null mask.
///
/// ### Fields
/// - `data`: backing buffer of integer values.
/// - `null_mask`: optional bit-packed validity bitmap (1 = valid, 0 = null).
///
/// ## Example
/// ```rust
/// use minframe::{IntegerArray, MaskedArray};
///
/// let mut arr = IntegerArray::<i32>::with_capacity(3, true);
/// arr.push(10);
/// arr.push_null();
/// arr.push(30);
/// assert_eq!(arr.get(1), None);
/// assert_eq!(arr.null_count(), 1);
/// ```
#[derive(PartialEq, Clone, Debug, Default)]
pub struct IntegerArray<T> {
    /// Backing buffer for values.
    pub data: Buffer<T>,
    /// Optional null mask (bit-packed; 1=valid, 0=null).
    pub null_mask: Option<Bitmask>,
}

impl_fixed_width_array!(IntegerArray, Integer);

impl<T: Integer> IntegerArray<T> {
    /// Largest valid value as an index, if every valid value is a non-negative index.
    ///
    /// Returns `Ok(None)` for arrays without valid values, and `Err(position)` for the
    /// first negative value.
    pub fn max_index(&self) -> Result<Option<usize>, usize> {
        let mut max = None;
        for (i, v) in self.iter_opt().enumerate() {
            if let Some(v) = v {
                let idx = v.to_index().ok_or(i)?;
                max = Some(max.map_or(idx, |m: usize| m.max(idx)));
            }
        }
        Ok(max)
    }
}
