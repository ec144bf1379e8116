//! # **Array Module** - *Main high-level array type*
//!
//! `Array` is the runtime-tagged container for every inner array in *Minframe*.
//!
//! ## Features
//! - one variant per [`LogicalType`] tag, so every algorithm over arrays is an exhaustive
//!   `match` and a new tag surfaces every site that needs a case
//! - `Arc`-wrapped inner arrays: cloning an `Array` never copies buffers
//! - zero-copy [`Array::slice`] for every variant, including nested ones
//! - logical equality (`==`) that ignores storage layout, slicing, and chunking

use std::sync::Arc;

use crate::enums::error::MinframeError;
use crate::enums::logical_type::{IntegerType, LogicalType, TypeTag};
use crate::enums::time_units::TimeUnit;
use crate::structs::variants::boolean::BooleanArray;
use crate::structs::variants::datetime::DatetimeArray;
use crate::structs::variants::decimal::DecimalArray;
use crate::structs::variants::dictionary::DictionaryArray;
use crate::structs::variants::fixed_binary::FixedSizeBinaryArray;
use crate::structs::variants::float::FloatArray;
use crate::structs::variants::integer::IntegerArray;
use crate::structs::variants::list::ListArray;
use crate::structs::variants::string::{BinaryArray, StringArray};
use crate::structs::variants::struct_array::StructArray;
use crate::traits::masked_array::MaskedArray;
use crate::{Bitmask, Integer};

/// # Array
///
/// Runtime-tagged array. The variant is the logical type tag; parameters (units, widths,
/// precision, field names, element and dictionary types) live on the inner array.
///
/// ## Examples
/// ```rust
/// use minframe::{Array, IntegerArray, LogicalType, arr_i32, arr_str};
///
/// let ints = arr_i32![1, 2, 3, 4];
/// let strs = arr_str!["a", "b", "c"];
/// assert_eq!(ints.logical_type(), LogicalType::Int32);
/// assert_eq!(strs.len(), 3);
///
/// let tail = ints.slice(2, 2).unwrap();
/// assert_eq!(tail, Array::from_int32(IntegerArray::from_slice(&[3, 4])));
/// ```
#[derive(Clone, Debug)]
pub enum Array {
    /// All-null array of the given length.
    Null(usize),
    Boolean(Arc<BooleanArray>),
    Int8(Arc<IntegerArray<i8>>),
    Int16(Arc<IntegerArray<i16>>),
    Int32(Arc<IntegerArray<i32>>),
    Int64(Arc<IntegerArray<i64>>),
    UInt8(Arc<IntegerArray<u8>>),
    UInt16(Arc<IntegerArray<u16>>),
    UInt32(Arc<IntegerArray<u32>>),
    UInt64(Arc<IntegerArray<u64>>),
    Float32(Arc<FloatArray<f32>>),
    Float64(Arc<FloatArray<f64>>),
    Date32(Arc<DatetimeArray<i32>>),
    Date64(Arc<DatetimeArray<i64>>),
    Time32(Arc<DatetimeArray<i32>>),
    Time64(Arc<DatetimeArray<i64>>),
    Timestamp(Arc<DatetimeArray<i64>>),
    String(Arc<StringArray>),
    Binary(Arc<BinaryArray>),
    FixedSizeBinary(Arc<FixedSizeBinaryArray>),
    Decimal128(Arc<DecimalArray>),
    List(Arc<ListArray>),
    Struct(Arc<StructArray>),
    Dictionary(Arc<DictionaryArray>),
}

impl Default for Array {
    fn default() -> Self {
        Array::Null(0)
    }
}

/// Applies `$body` to the inner array of every variant except `Null`, which yields `$null`.
macro_rules! with_inner {
    ($self:expr, $inner:ident => $body:expr, null($n:ident) => $null:expr) => {
        match $self {
            Array::Null($n) => $null,
            Array::Boolean($inner) => $body,
            Array::Int8($inner) => $body,
            Array::Int16($inner) => $body,
            Array::Int32($inner) => $body,
            Array::Int64($inner) => $body,
            Array::UInt8($inner) => $body,
            Array::UInt16($inner) => $body,
            Array::UInt32($inner) => $body,
            Array::UInt64($inner) => $body,
            Array::Float32($inner) => $body,
            Array::Float64($inner) => $body,
            Array::Date32($inner) => $body,
            Array::Date64($inner) => $body,
            Array::Time32($inner) => $body,
            Array::Time64($inner) => $body,
            Array::Timestamp($inner) => $body,
            Array::String($inner) => $body,
            Array::Binary($inner) => $body,
            Array::FixedSizeBinary($inner) => $body,
            Array::Decimal128($inner) => $body,
            Array::List($inner) => $body,
            Array::Struct($inner) => $body,
            Array::Dictionary($inner) => $body,
        }
    };
}

/// Same as `with_inner`, restricted to the integer variants.
macro_rules! with_integer {
    ($self:expr, $inner:ident => $body:expr, _ => $other:expr) => {
        match $self {
            Array::Int8($inner) => $body,
            Array::Int16($inner) => $body,
            Array::Int32($inner) => $body,
            Array::Int64($inner) => $body,
            Array::UInt8($inner) => $body,
            Array::UInt16($inner) => $body,
            Array::UInt32($inner) => $body,
            Array::UInt64($inner) => $body,
            _ => $other,
        }
    };
}

macro_rules! array_constructors {
    ($($fn:ident($variant:ident, $inner:ty)),* $(,)?) => {
        $(
            #[doc = concat!("Wraps the inner array as `Array::", stringify!($variant), "`.")]
            #[inline]
            pub fn $fn(arr: $inner) -> Self {
                Array::$variant(Arc::new(arr))
            }
        )*
    };
}

impl Array {
    array_constructors!(
        from_bool(Boolean, BooleanArray),
        from_int8(Int8, IntegerArray<i8>),
        from_int16(Int16, IntegerArray<i16>),
        from_int32(Int32, IntegerArray<i32>),
        from_int64(Int64, IntegerArray<i64>),
        from_uint8(UInt8, IntegerArray<u8>),
        from_uint16(UInt16, IntegerArray<u16>),
        from_uint32(UInt32, IntegerArray<u32>),
        from_uint64(UInt64, IntegerArray<u64>),
        from_float32(Float32, FloatArray<f32>),
        from_float64(Float64, FloatArray<f64>),
        from_string(String, StringArray),
        from_binary(Binary, BinaryArray),
        from_fixed_size_binary(FixedSizeBinary, FixedSizeBinaryArray),
        from_decimal128(Decimal128, DecimalArray),
        from_list(List, ListArray),
        from_struct(Struct, StructArray),
        from_dictionary(Dictionary, DictionaryArray),
    );

    /// All-null array of `len` elements.
    #[inline]
    pub fn new_null(len: usize) -> Self {
        Array::Null(len)
    }

    /// `Date32` array; the unit is forced to days.
    pub fn from_date32(mut arr: DatetimeArray<i32>) -> Self {
        arr.time_unit = TimeUnit::Days;
        Array::Date32(Arc::new(arr))
    }

    /// `Date64` array; the unit is forced to milliseconds.
    pub fn from_date64(mut arr: DatetimeArray<i64>) -> Self {
        arr.time_unit = TimeUnit::Milliseconds;
        Array::Date64(Arc::new(arr))
    }

    /// `Time32` array; fails with `UnsupportedType` unless the unit is s or ms.
    pub fn from_time32(arr: DatetimeArray<i32>) -> Result<Self, MinframeError> {
        LogicalType::Time32(arr.time_unit).validate()?;
        Ok(Array::Time32(Arc::new(arr)))
    }

    /// `Time64` array; fails with `UnsupportedType` unless the unit is us or ns.
    pub fn from_time64(arr: DatetimeArray<i64>) -> Result<Self, MinframeError> {
        LogicalType::Time64(arr.time_unit).validate()?;
        Ok(Array::Time64(Arc::new(arr)))
    }

    /// `Timestamp` array; fails with `UnsupportedType` for a day unit.
    pub fn from_timestamp(arr: DatetimeArray<i64>) -> Result<Self, MinframeError> {
        LogicalType::Timestamp(arr.time_unit).validate()?;
        Ok(Array::Timestamp(Arc::new(arr)))
    }

    /// Integer array of the given index width from optional indices.
    ///
    /// Fails with `InvalidArgument` if an index does not fit the width.
    pub fn from_indices(
        index: IntegerType,
        values: &[Option<usize>],
    ) -> Result<Self, MinframeError> {
        fn build<T: Integer>(values: &[Option<usize>]) -> Result<IntegerArray<T>, MinframeError> {
            let mut out = IntegerArray::<T>::with_capacity(values.len(), false);
            for v in values {
                match v {
                    Some(i) => out.push(T::from_index(*i).ok_or_else(|| {
                        MinframeError::InvalidArgument(format!(
                            "index {i} does not fit {}",
                            T::INTEGER_TYPE
                        ))
                    })?),
                    None => out.push_null(),
                }
            }
            Ok(out)
        }
        Ok(match index {
            IntegerType::Int8 => Array::from_int8(build(values)?),
            IntegerType::Int16 => Array::from_int16(build(values)?),
            IntegerType::Int32 => Array::from_int32(build(values)?),
            IntegerType::Int64 => Array::from_int64(build(values)?),
            IntegerType::UInt8 => Array::from_uint8(build(values)?),
            IntegerType::UInt16 => Array::from_uint16(build(values)?),
            IntegerType::UInt32 => Array::from_uint32(build(values)?),
            IntegerType::UInt64 => Array::from_uint64(build(values)?),
        })
    }

    /// Empty array of `dtype`. Fails with `UnsupportedType` for invalid parameters.
    pub fn empty(dtype: &LogicalType) -> Result<Self, MinframeError> {
        dtype.validate()?;
        Ok(match dtype {
            LogicalType::Null => Array::Null(0),
            LogicalType::Boolean => Array::from_bool(BooleanArray::default()),
            LogicalType::Int8 => Array::from_int8(IntegerArray::default()),
            LogicalType::Int16 => Array::from_int16(IntegerArray::default()),
            LogicalType::Int32 => Array::from_int32(IntegerArray::default()),
            LogicalType::Int64 => Array::from_int64(IntegerArray::default()),
            LogicalType::UInt8 => Array::from_uint8(IntegerArray::default()),
            LogicalType::UInt16 => Array::from_uint16(IntegerArray::default()),
            LogicalType::UInt32 => Array::from_uint32(IntegerArray::default()),
            LogicalType::UInt64 => Array::from_uint64(IntegerArray::default()),
            LogicalType::Float32 => Array::from_float32(FloatArray::default()),
            LogicalType::Float64 => Array::from_float64(FloatArray::default()),
            LogicalType::Date32 => Array::from_date32(DatetimeArray::default()),
            LogicalType::Date64 => Array::from_date64(DatetimeArray::default()),
            LogicalType::Time32(u) => {
                Array::from_time32(DatetimeArray::with_capacity(0, false, *u))?
            }
            LogicalType::Time64(u) => {
                Array::from_time64(DatetimeArray::with_capacity(0, false, *u))?
            }
            LogicalType::Timestamp(u) => {
                Array::from_timestamp(DatetimeArray::with_capacity(0, false, *u))?
            }
            LogicalType::String => Array::from_string(StringArray::default()),
            LogicalType::Binary => Array::from_binary(BinaryArray::default()),
            LogicalType::FixedSizeBinary(w) => {
                Array::from_fixed_size_binary(FixedSizeBinaryArray::empty(*w))
            }
            LogicalType::Decimal128 { precision, scale } => {
                Array::from_decimal128(DecimalArray::empty(*precision, *scale))
            }
            LogicalType::List(elem) => Array::from_list(ListArray::empty(elem)?),
            LogicalType::Struct(fields) => {
                let names = fields.iter().map(|f| f.name.clone()).collect();
                let children = fields
                    .iter()
                    .map(|f| Array::empty(&f.dtype))
                    .collect::<Result<Vec<_>, _>>()?;
                Array::from_struct(StructArray::new(names, children, 0, None)?)
            }
            LogicalType::Dictionary {
                value,
                index,
                ordered,
            } => Array::from_dictionary(DictionaryArray::new(
                Array::from_indices(*index, &[])?,
                Array::empty(value)?,
                *ordered,
            )?),
        })
    }

    /// Logical type, reconstructed from the variant and the inner array's parameters.
    pub fn logical_type(&self) -> LogicalType {
        match self {
            Array::Null(_) => LogicalType::Null,
            Array::Boolean(_) => LogicalType::Boolean,
            Array::Int8(_) => LogicalType::Int8,
            Array::Int16(_) => LogicalType::Int16,
            Array::Int32(_) => LogicalType::Int32,
            Array::Int64(_) => LogicalType::Int64,
            Array::UInt8(_) => LogicalType::UInt8,
            Array::UInt16(_) => LogicalType::UInt16,
            Array::UInt32(_) => LogicalType::UInt32,
            Array::UInt64(_) => LogicalType::UInt64,
            Array::Float32(_) => LogicalType::Float32,
            Array::Float64(_) => LogicalType::Float64,
            Array::Date32(_) => LogicalType::Date32,
            Array::Date64(_) => LogicalType::Date64,
            Array::Time32(a) => LogicalType::Time32(a.time_unit),
            Array::Time64(a) => LogicalType::Time64(a.time_unit),
            Array::Timestamp(a) => LogicalType::Timestamp(a.time_unit),
            Array::String(_) => LogicalType::String,
            Array::Binary(_) => LogicalType::Binary,
            Array::FixedSizeBinary(a) => LogicalType::FixedSizeBinary(a.width),
            Array::Decimal128(a) => LogicalType::Decimal128 {
                precision: a.precision,
                scale: a.scale,
            },
            Array::List(a) => LogicalType::list(a.values.logical_type()),
            Array::Struct(a) => a.logical_type(),
            Array::Dictionary(a) => a.logical_type(),
        }
    }

    /// Parameter-free tag of this array's type.
    pub fn tag(&self) -> TypeTag {
        match self {
            Array::Null(_) => TypeTag::Null,
            Array::Boolean(_) => TypeTag::Boolean,
            Array::Int8(_) => TypeTag::Int8,
            Array::Int16(_) => TypeTag::Int16,
            Array::Int32(_) => TypeTag::Int32,
            Array::Int64(_) => TypeTag::Int64,
            Array::UInt8(_) => TypeTag::UInt8,
            Array::UInt16(_) => TypeTag::UInt16,
            Array::UInt32(_) => TypeTag::UInt32,
            Array::UInt64(_) => TypeTag::UInt64,
            Array::Float32(_) => TypeTag::Float32,
            Array::Float64(_) => TypeTag::Float64,
            Array::Date32(_) => TypeTag::Date32,
            Array::Date64(_) => TypeTag::Date64,
            Array::Time32(_) => TypeTag::Time32,
            Array::Time64(_) => TypeTag::Time64,
            Array::Timestamp(_) => TypeTag::Timestamp,
            Array::String(_) => TypeTag::String,
            Array::Binary(_) => TypeTag::Binary,
            Array::FixedSizeBinary(_) => TypeTag::FixedSizeBinary,
            Array::Decimal128(_) => TypeTag::Decimal128,
            Array::List(_) => TypeTag::List,
            Array::Struct(_) => TypeTag::Struct,
            Array::Dictionary(_) => TypeTag::Dictionary,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        with_inner!(self, a => a.len(), null(n) => *n)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validity mask, if any. `Null` arrays report none; every element is null regardless.
    #[inline]
    pub fn null_mask(&self) -> Option<&Bitmask> {
        with_inner!(self, a => MaskedArray::null_mask(a.as_ref()), null(_n) => None)
    }

    pub fn null_count(&self) -> usize {
        match self {
            Array::Null(n) => *n,
            _ => self.null_mask().map(|m| m.null_count()).unwrap_or(0),
        }
    }

    /// True when element `idx` is null. Out-of-range indices are reported as null.
    #[inline]
    pub fn is_null(&self, idx: usize) -> bool {
        match self {
            Array::Null(_) => true,
            _ => with_inner!(self, a => MaskedArray::is_null(a.as_ref(), idx), null(_n) => true),
        }
    }

    #[inline]
    pub fn is_valid(&self, idx: usize) -> bool {
        !self.is_null(idx)
    }

    /// Zero-copy window of `len` elements from `offset`.
    ///
    /// Buffers, masks, child arrays, and dictionaries are shared with `self`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
        let total = self.len();
        if offset.checked_add(len).is_none_or(|end| end > total) {
            return Err(MinframeError::IndexOutOfRange {
                index: offset.saturating_add(len),
                len: total,
            });
        }
        Ok(match self {
            Array::Null(_) => Array::Null(len),
            Array::Boolean(a) => Array::Boolean(Arc::new(a.slice(offset, len)?)),
            Array::Int8(a) => Array::Int8(Arc::new(a.slice(offset, len)?)),
            Array::Int16(a) => Array::Int16(Arc::new(a.slice(offset, len)?)),
            Array::Int32(a) => Array::Int32(Arc::new(a.slice(offset, len)?)),
            Array::Int64(a) => Array::Int64(Arc::new(a.slice(offset, len)?)),
            Array::UInt8(a) => Array::UInt8(Arc::new(a.slice(offset, len)?)),
            Array::UInt16(a) => Array::UInt16(Arc::new(a.slice(offset, len)?)),
            Array::UInt32(a) => Array::UInt32(Arc::new(a.slice(offset, len)?)),
            Array::UInt64(a) => Array::UInt64(Arc::new(a.slice(offset, len)?)),
            Array::Float32(a) => Array::Float32(Arc::new(a.slice(offset, len)?)),
            Array::Float64(a) => Array::Float64(Arc::new(a.slice(offset, len)?)),
            Array::Date32(a) => Array::Date32(Arc::new(a.slice(offset, len)?)),
            Array::Date64(a) => Array::Date64(Arc::new(a.slice(offset, len)?)),
            Array::Time32(a) => Array::Time32(Arc::new(a.slice(offset, len)?)),
            Array::Time64(a) => Array::Time64(Arc::new(a.slice(offset, len)?)),
            Array::Timestamp(a) => Array::Timestamp(Arc::new(a.slice(offset, len)?)),
            Array::String(a) => Array::String(Arc::new(a.slice(offset, len)?)),
            Array::Binary(a) => Array::Binary(Arc::new(a.slice(offset, len)?)),
            Array::FixedSizeBinary(a) => Array::FixedSizeBinary(Arc::new(a.slice(offset, len)?)),
            Array::Decimal128(a) => Array::Decimal128(Arc::new(a.slice(offset, len)?)),
            Array::List(a) => Array::List(Arc::new(a.slice(offset, len)?)),
            Array::Struct(a) => Array::Struct(Arc::new(a.slice(offset, len)?)),
            Array::Dictionary(a) => Array::Dictionary(Arc::new(a.slice(offset, len)?)),
        })
    }

    /// True when both arrays are the same allocation (not merely equal).
    pub fn ptr_eq(&self, other: &Array) -> bool {
        match (self, other) {
            (Array::Null(a), Array::Null(b)) => a == b,
            (Array::Boolean(a), Array::Boolean(b)) => Arc::ptr_eq(a, b),
            (Array::Int8(a), Array::Int8(b)) => Arc::ptr_eq(a, b),
            (Array::Int16(a), Array::Int16(b)) => Arc::ptr_eq(a, b),
            (Array::Int32(a), Array::Int32(b)) => Arc::ptr_eq(a, b),
            (Array::Int64(a), Array::Int64(b)) => Arc::ptr_eq(a, b),
            (Array::UInt8(a), Array::UInt8(b)) => Arc::ptr_eq(a, b),
            (Array::UInt16(a), Array::UInt16(b)) => Arc::ptr_eq(a, b),
            (Array::UInt32(a), Array::UInt32(b)) => Arc::ptr_eq(a, b),
            (Array::UInt64(a), Array::UInt64(b)) => Arc::ptr_eq(a, b),
            (Array::Float32(a), Array::Float32(b)) => Arc::ptr_eq(a, b),
            (Array::Float64(a), Array::Float64(b)) => Arc::ptr_eq(a, b),
            (Array::Date32(a), Array::Date32(b)) => Arc::ptr_eq(a, b),
            (Array::Date64(a), Array::Date64(b)) => Arc::ptr_eq(a, b),
            (Array::Time32(a), Array::Time32(b)) => Arc::ptr_eq(a, b),
            (Array::Time64(a), Array::Time64(b)) => Arc::ptr_eq(a, b),
            (Array::Timestamp(a), Array::Timestamp(b)) => Arc::ptr_eq(a, b),
            (Array::String(a), Array::String(b)) => Arc::ptr_eq(a, b),
            (Array::Binary(a), Array::Binary(b)) => Arc::ptr_eq(a, b),
            (Array::FixedSizeBinary(a), Array::FixedSizeBinary(b)) => Arc::ptr_eq(a, b),
            (Array::Decimal128(a), Array::Decimal128(b)) => Arc::ptr_eq(a, b),
            (Array::List(a), Array::List(b)) => Arc::ptr_eq(a, b),
            (Array::Struct(a), Array::Struct(b)) => Arc::ptr_eq(a, b),
            (Array::Dictionary(a), Array::Dictionary(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Index width, for integer arrays.
    pub fn integer_type(&self) -> Option<IntegerType> {
        IntegerType::from_logical(&self.logical_type())
    }

    /// Element `idx` of an integer array as a non-negative index.
    ///
    /// `None` when null, negative, out of range, or not an integer array.
    #[inline]
    pub fn index_at(&self, idx: usize) -> Option<usize> {
        with_integer!(self, a => a.get(idx).and_then(|v| v.to_index()), _ => None)
    }
}

impl PartialEq for Array {
    /// Logical equality: same type, length, null positions, and values at valid positions.
    fn eq(&self, other: &Self) -> bool {
        crate::kernels::equality::array_equals(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::logical_type::StructField;

    #[test]
    fn test_logical_type_roundtrip_via_empty() {
        let types = vec![
            LogicalType::Null,
            LogicalType::Boolean,
            LogicalType::UInt16,
            LogicalType::Float32,
            LogicalType::Date32,
            LogicalType::Date64,
            LogicalType::Time32(TimeUnit::Milliseconds),
            LogicalType::Time64(TimeUnit::Nanoseconds),
            LogicalType::Timestamp(TimeUnit::Seconds),
            LogicalType::String,
            LogicalType::Binary,
            LogicalType::FixedSizeBinary(3),
            LogicalType::Decimal128 {
                precision: 12,
                scale: 3,
            },
            LogicalType::list(LogicalType::list(LogicalType::Int64)),
            LogicalType::struct_of([
                ("a", LogicalType::Int32),
                ("b", LogicalType::list(LogicalType::String)),
            ]),
            LogicalType::dictionary(LogicalType::String, IntegerType::Int16, true),
        ];
        for t in types {
            let arr = Array::empty(&t).unwrap();
            assert_eq!(arr.logical_type(), t);
            assert_eq!(arr.len(), 0);
        }
    }

    #[test]
    fn test_empty_rejects_invalid_type() {
        assert!(matches!(
            Array::empty(&LogicalType::Time32(TimeUnit::Nanoseconds)),
            Err(MinframeError::UnsupportedType(_))
        ));
        let bad_struct = LogicalType::Struct(
            vec![StructField::new("t", LogicalType::Timestamp(TimeUnit::Days))].into(),
        );
        assert!(Array::empty(&bad_struct).is_err());
    }

    #[test]
    fn test_date_constructors_fix_units() {
        let d = Array::from_date32(DatetimeArray::from_slice(&[1, 2], TimeUnit::Seconds));
        match &d {
            Array::Date32(a) => assert_eq!(a.time_unit, TimeUnit::Days),
            _ => panic!("expected Date32"),
        }
        assert!(
            Array::from_time32(DatetimeArray::from_slice(&[1], TimeUnit::Microseconds)).is_err()
        );
    }

    #[test]
    fn test_slice_and_nulls() {
        let arr = Array::from_int32(IntegerArray::from_options(&[Some(1), None, Some(3)]));
        assert_eq!(arr.null_count(), 1);
        assert!(arr.is_null(1));
        assert!(arr.is_null(7));
        let s = arr.slice(1, 2).unwrap();
        assert_eq!(s.len(), 2);
        assert!(s.is_null(0));
        assert!(matches!(
            arr.slice(2, 5),
            Err(MinframeError::IndexOutOfRange { index: 7, len: 3 })
        ));
        assert_eq!(Array::new_null(4).null_count(), 4);
    }

    #[test]
    fn test_from_indices() {
        let a = Array::from_indices(IntegerType::UInt8, &[Some(0), None, Some(2)]).unwrap();
        assert_eq!(a.logical_type(), LogicalType::UInt8);
        assert_eq!(a.index_at(0), Some(0));
        assert_eq!(a.index_at(1), None);
        assert_eq!(a.index_at(2), Some(2));
        assert!(Array::from_indices(IntegerType::Int8, &[Some(200)]).is_err());
    }

    #[test]
    fn test_ptr_eq() {
        let a = Array::from_int64(IntegerArray::from_slice(&[1]));
        let b = a.clone();
        let c = Array::from_int64(IntegerArray::from_slice(&[1]));
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&c));
        assert_eq!(a, c);
    }
}
