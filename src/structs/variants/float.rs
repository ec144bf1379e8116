//! # **FloatArray Module** - *Inner typed floating-point array*
//!
//! `Float32` and `Float64` values in a `Buffer<T>` with an optional validity mask.

use crate::traits::type_unions::Float;
use crate::{Bitmask, Buffer, impl_fixed_width_array};

/// # FloatArray
///
/// Floating-point array with optional null mask.
///
/// ### Fields
/// - `data`: backing buffer of float values.
/// - `null_mask`: optional bit-packed validity bitmap.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct FloatArray<T> {
    pub data: Buffer<T>,
    pub null_mask: Option<Bitmask>,
}

impl_fixed_width_array!(FloatArray, Float);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MaskedArray;

    #[test]
    fn test_basic() {
        let mut arr = FloatArray::<f64>::from_slice(&[1.5, 2.5]);
        arr.push_null();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.get(0), Some(1.5));
        assert_eq!(arr.get(2), None);
        assert!(arr.is_null(2));
        assert_eq!(arr.get(9), None);
    }
}
