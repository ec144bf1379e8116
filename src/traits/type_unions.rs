//! # **Type Unions** - *Numeric bounds for generic array code*
//!
//! Narrows the *num-traits* hierarchy to the element types *Minframe* stores.

use std::fmt::Debug;

use num_traits::{Float as NumFloat, PrimInt, ToPrimitive};

use crate::enums::logical_type::IntegerType;

/// Trait for fixed-width values stored in a flat `Buffer`.
///
/// Useful when specifying `my_fn::<T: Primitive>() {}`.
pub trait Primitive: Copy + Default + PartialEq + Debug + Send + Sync + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}
impl Primitive for i8 {}
impl Primitive for i16 {}
impl Primitive for i32 {}
impl Primitive for i64 {}
impl Primitive for i128 {}
impl Primitive for u8 {}
impl Primitive for u16 {}
impl Primitive for u32 {}
impl Primitive for u64 {}

/// Trait for types valid as integer elements and dictionary indices.
pub trait Integer: PrimInt + Primitive + TryFrom<usize> + ToPrimitive {
    /// Index width this type encodes as.
    const INTEGER_TYPE: IntegerType;

    /// Checked conversion to an index; negative values map to `None`.
    #[inline]
    fn to_index(self) -> Option<usize> {
        self.to_usize()
    }

    /// Checked conversion from an index.
    #[inline]
    fn from_index(v: usize) -> Option<Self> {
        Self::try_from(v).ok()
    }
}

macro_rules! impl_integer {
    ($($t:ty => $it:ident),* $(,)?) => {
        $(impl Integer for $t {
            const INTEGER_TYPE: IntegerType = IntegerType::$it;
        })*
    };
}

impl_integer!(
    i8 => Int8, i16 => Int16, i32 => Int32, i64 => Int64,
    u8 => UInt8, u16 => UInt16, u32 => UInt32, u64 => UInt64,
);

/// Trait for types valid as float elements.
pub trait Float: NumFloat + Primitive {
    /// Raw bit pattern, used to hash floats as dictionary keys.
    fn to_bits_u64(self) -> u64;
}

impl Float for f32 {
    #[inline]
    fn to_bits_u64(self) -> u64 {
        self.to_bits() as u64
    }
}

impl Float for f64 {
    #[inline]
    fn to_bits_u64(self) -> u64 {
        self.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_conversions() {
        assert_eq!((-1i8).to_index(), None);
        assert_eq!(7i16.to_index(), Some(7));
        assert_eq!(u8::from_index(255), Some(255));
        assert_eq!(u8::from_index(256), None);
        assert_eq!(i8::from_index(128), None);
        assert_eq!(<u32 as Integer>::INTEGER_TYPE, IntegerType::UInt32);
    }

    #[test]
    fn test_float_bits() {
        assert_eq!(1.0f32.to_bits_u64(), 1.0f32.to_bits() as u64);
        assert_ne!(0.0f64.to_bits_u64(), (-0.0f64).to_bits_u64());
    }
}
