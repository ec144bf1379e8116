//! # **Type Registry** - *Compile-time types bound to runtime tags*
//!
//! [`LogicalTyped`] links a Rust type to the [`LogicalType`] it denotes, the inner array it
//! is stored in, the accessor a [`View`](crate::View) reads it through, and the builder that
//! produces it.
//!
//! ## Coverage
//! | Rust type | Logical type |
//! |---|---|
//! | `bool`, `i8..i64`, `u8..u64`, `f32`, `f64` | the matching primitive |
//! | `String` / [`Binary`] | `String` / `Binary` |
//! | [`FixedBinary<W>`] | `FixedSizeBinary(W)` |
//! | [`Decimal<P, S>`] | `Decimal128(P, S)` |
//! | [`Date32`], [`Date64`] | `Date32`, `Date64` |
//! | [`Time32<U>`], [`Time64<U>`], [`Timestamp<U>`] | unit-parameterised temporal types |
//! | [`List<T>`] | `List(T)` |
//! | [`Struct<(A, B, ..)>`](Struct) | `Struct(..)`, up to six fields |
//! | [`Dict<T, I, ORDERED>`](Dict) | `Dictionary(T, I, ORDERED)` |
//!
//! Compatibility is exact. There is no widening, narrowing, or unit conversion.
//! Struct field names are runtime data: compatibility checks arity and field types, and
//! [`LogicalTyped::logical_type`] names the fields `f0..fN`.

use std::marker::PhantomData;

use crate::enums::error::MinframeError;
use crate::enums::logical_type::{LogicalType, StructField, TypeTag};
use crate::enums::time_units::TimeUnit;
use crate::kernels::dict_key::DictKey;
use crate::traits::type_unions::Integer;
use crate::typed::access::{
    BinaryAccess, BoolAccess, DictAccess, FixedBinaryAccess, ListAccess, PrimitiveAccess,
    StrAccess, StructAccess,
};
use crate::typed::builder::{
    ArrayBuilder, DictBuilder, LeafBuilder, LeafType, ListBuilder, StructBuilder,
};
use crate::{
    Array, BinaryArray, BooleanArray, DatetimeArray, DecimalArray, DictionaryArray,
    FixedSizeBinaryArray, FloatArray, IntegerArray, ListArray, StringArray, StructArray,
};

/// Element reader over one inner array.
///
/// `value(idx)` is only meaningful when `idx < len()` and `is_valid(idx)`.
pub trait ValueAccess<'a>: Clone {
    type Value;

    fn len(&self) -> usize;

    fn is_valid(&self, idx: usize) -> bool;

    fn value(&self, idx: usize) -> Self::Value;
}

/// A Rust type with a logical type counterpart.
pub trait LogicalTyped: Sized + 'static {
    /// Inner array holding values of this type.
    type Native;
    /// Borrowed accessor used by views.
    type Access<'a>: ValueAccess<'a>;
    /// Owned value accepted by builders.
    type Input;
    type Builder: ArrayBuilder<Input = Self::Input>;

    const TAG: TypeTag;

    fn logical_type() -> LogicalType;

    /// Exact compatibility with a runtime type.
    fn is_compatible(dtype: &LogicalType) -> bool;

    /// The inner array, if `array` is exactly this type.
    fn native(array: &Array) -> Result<&Self::Native, MinframeError>;

    fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError>;

    fn access(array: &Array) -> Result<Self::Access<'_>, MinframeError> {
        Self::access_native(Self::native(array)?)
    }
}

/// Types usable as dictionary values in a typed builder.
pub trait DictEncodable: LogicalTyped {
    fn dict_key(value: &Self::Input) -> DictKey;
}

/// Integer types usable as dictionary indices.
pub trait IndexType:
    Integer + LeafType + LogicalTyped<Native = IntegerArray<Self>, Input = Self>
{
}

impl<T> IndexType for T where
    T: Integer + LeafType + LogicalTyped<Native = IntegerArray<T>, Input = T>
{
}

#[inline]
pub(crate) fn mismatch<T: LogicalTyped>(found: &Array) -> MinframeError {
    MinframeError::type_mismatch(T::logical_type(), found.logical_type())
}

macro_rules! impl_int_typed {
    ($($t:ty => $variant:ident, $ctor:ident);* $(;)?) => {$(
        impl LogicalTyped for $t {
            type Native = IntegerArray<$t>;
            type Access<'a> = PrimitiveAccess<'a, $t>;
            type Input = $t;
            type Builder = LeafBuilder<$t>;

            const TAG: TypeTag = TypeTag::$variant;

            fn logical_type() -> LogicalType {
                LogicalType::$variant
            }

            fn is_compatible(dtype: &LogicalType) -> bool {
                *dtype == LogicalType::$variant
            }

            fn native(array: &Array) -> Result<&Self::Native, MinframeError> {
                match array {
                    Array::$variant(a) => Ok(&**a),
                    other => Err(mismatch::<Self>(other)),
                }
            }

            fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError> {
                Ok(PrimitiveAccess::new(native.data.as_slice(), native.null_mask.as_ref()))
            }
        }

        impl LeafType for $t {
            fn empty_native(_dtype: &LogicalType, cap: usize) -> Self::Native {
                IntegerArray::with_capacity(cap, false)
            }

            fn push(native: &mut Self::Native, value: $t) -> Result<(), MinframeError> {
                native.push(value);
                Ok(())
            }

            fn push_null(native: &mut Self::Native) {
                native.push_null();
            }

            fn native_len(native: &Self::Native) -> usize {
                native.len()
            }

            fn into_array(native: Self::Native) -> Result<Array, MinframeError> {
                Ok(Array::$ctor(native))
            }
        }

        impl DictEncodable for $t {
            fn dict_key(value: &$t) -> DictKey {
                DictKey::Int(*value as i128)
            }
        }
    )*};
}

impl_int_typed!(
    i8 => Int8, from_int8;
    i16 => Int16, from_int16;
    i32 => Int32, from_int32;
    i64 => Int64, from_int64;
    u8 => UInt8, from_uint8;
    u16 => UInt16, from_uint16;
    u32 => UInt32, from_uint32;
    u64 => UInt64, from_uint64;
);

macro_rules! impl_float_typed {
    ($($t:ty => $variant:ident, $ctor:ident);* $(;)?) => {$(
        impl LogicalTyped for $t {
            type Native = FloatArray<$t>;
            type Access<'a> = PrimitiveAccess<'a, $t>;
            type Input = $t;
            type Builder = LeafBuilder<$t>;

            const TAG: TypeTag = TypeTag::$variant;

            fn logical_type() -> LogicalType {
                LogicalType::$variant
            }

            fn is_compatible(dtype: &LogicalType) -> bool {
                *dtype == LogicalType::$variant
            }

            fn native(array: &Array) -> Result<&Self::Native, MinframeError> {
                match array {
                    Array::$variant(a) => Ok(&**a),
                    other => Err(mismatch::<Self>(other)),
                }
            }

            fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError> {
                Ok(PrimitiveAccess::new(native.data.as_slice(), native.null_mask.as_ref()))
            }
        }

        impl LeafType for $t {
            fn empty_native(_dtype: &LogicalType, cap: usize) -> Self::Native {
                FloatArray::with_capacity(cap, false)
            }

            fn push(native: &mut Self::Native, value: $t) -> Result<(), MinframeError> {
                native.push(value);
                Ok(())
            }

            fn push_null(native: &mut Self::Native) {
                native.push_null();
            }

            fn native_len(native: &Self::Native) -> usize {
                native.len()
            }

            fn into_array(native: Self::Native) -> Result<Array, MinframeError> {
                Ok(Array::$ctor(native))
            }
        }

        impl DictEncodable for $t {
            fn dict_key(value: &$t) -> DictKey {
                DictKey::Float(value.to_bits() as u64)
            }
        }
    )*};
}

impl_float_typed!(
    f32 => Float32, from_float32;
    f64 => Float64, from_float64;
);

impl LogicalTyped for bool {
    type Native = BooleanArray;
    type Access<'a> = BoolAccess<'a>;
    type Input = bool;
    type Builder = LeafBuilder<bool>;

    const TAG: TypeTag = TypeTag::Boolean;

    fn logical_type() -> LogicalType {
        LogicalType::Boolean
    }

    fn is_compatible(dtype: &LogicalType) -> bool {
        *dtype == LogicalType::Boolean
    }

    fn native(array: &Array) -> Result<&Self::Native, MinframeError> {
        match array {
            Array::Boolean(a) => Ok(&**a),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError> {
        Ok(BoolAccess {
            values: &native.data,
            mask: native.null_mask.as_ref(),
        })
    }
}

impl LeafType for bool {
    fn empty_native(_dtype: &LogicalType, _cap: usize) -> Self::Native {
        BooleanArray::default()
    }

    fn push(native: &mut Self::Native, value: bool) -> Result<(), MinframeError> {
        native.push(value);
        Ok(())
    }

    fn push_null(native: &mut Self::Native) {
        native.push_null();
    }

    fn native_len(native: &Self::Native) -> usize {
        native.len()
    }

    fn into_array(native: Self::Native) -> Result<Array, MinframeError> {
        Ok(Array::from_bool(native))
    }
}

impl DictEncodable for bool {
    fn dict_key(value: &bool) -> DictKey {
        DictKey::Bool(*value)
    }
}

impl LogicalTyped for String {
    type Native = StringArray;
    type Access<'a> = StrAccess<'a>;
    type Input = String;
    type Builder = LeafBuilder<String>;

    const TAG: TypeTag = TypeTag::String;

    fn logical_type() -> LogicalType {
        LogicalType::String
    }

    fn is_compatible(dtype: &LogicalType) -> bool {
        *dtype == LogicalType::String
    }

    fn native(array: &Array) -> Result<&Self::Native, MinframeError> {
        match array {
            Array::String(a) => Ok(&**a),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError> {
        Ok(StrAccess(native))
    }
}

impl LeafType for String {
    fn empty_native(_dtype: &LogicalType, cap: usize) -> Self::Native {
        StringArray::with_capacity(cap, 0, false)
    }

    fn push(native: &mut Self::Native, value: String) -> Result<(), MinframeError> {
        native.push_str(&value)
    }

    fn push_null(native: &mut Self::Native) {
        native.push_null();
    }

    fn native_len(native: &Self::Native) -> usize {
        native.len()
    }

    fn into_array(native: Self::Native) -> Result<Array, MinframeError> {
        Ok(Array::from_string(native))
    }
}

impl DictEncodable for String {
    fn dict_key(value: &String) -> DictKey {
        DictKey::Bytes(value.as_bytes().to_vec())
    }
}

/// Variable-width binary values.
pub struct Binary;

impl LogicalTyped for Binary {
    type Native = BinaryArray;
    type Access<'a> = BinaryAccess<'a>;
    type Input = Vec<u8>;
    type Builder = LeafBuilder<Binary>;

    const TAG: TypeTag = TypeTag::Binary;

    fn logical_type() -> LogicalType {
        LogicalType::Binary
    }

    fn is_compatible(dtype: &LogicalType) -> bool {
        *dtype == LogicalType::Binary
    }

    fn native(array: &Array) -> Result<&Self::Native, MinframeError> {
        match array {
            Array::Binary(a) => Ok(&**a),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError> {
        Ok(BinaryAccess(native))
    }
}

impl LeafType for Binary {
    fn empty_native(_dtype: &LogicalType, cap: usize) -> Self::Native {
        BinaryArray::with_capacity(cap, 0, false)
    }

    fn push(native: &mut Self::Native, value: Vec<u8>) -> Result<(), MinframeError> {
        native.push_bytes(&value)
    }

    fn push_null(native: &mut Self::Native) {
        native.push_null();
    }

    fn native_len(native: &Self::Native) -> usize {
        native.len()
    }

    fn into_array(native: Self::Native) -> Result<Array, MinframeError> {
        Ok(Array::from_binary(native))
    }
}

impl DictEncodable for Binary {
    fn dict_key(value: &Vec<u8>) -> DictKey {
        DictKey::Bytes(value.clone())
    }
}

/// Fixed-width binary values of `W` bytes.
pub struct FixedBinary<const W: usize>;

impl<const W: usize> LogicalTyped for FixedBinary<W> {
    type Native = FixedSizeBinaryArray;
    type Access<'a> = FixedBinaryAccess<'a>;
    type Input = Vec<u8>;
    type Builder = LeafBuilder<FixedBinary<W>>;

    const TAG: TypeTag = TypeTag::FixedSizeBinary;

    fn logical_type() -> LogicalType {
        LogicalType::FixedSizeBinary(W)
    }

    fn is_compatible(dtype: &LogicalType) -> bool {
        *dtype == LogicalType::FixedSizeBinary(W)
    }

    fn native(array: &Array) -> Result<&Self::Native, MinframeError> {
        match array {
            Array::FixedSizeBinary(a) if a.width == W => Ok(&**a),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError> {
        Ok(FixedBinaryAccess(native))
    }
}

impl<const W: usize> LeafType for FixedBinary<W> {
    fn empty_native(_dtype: &LogicalType, _cap: usize) -> Self::Native {
        FixedSizeBinaryArray::empty(W)
    }

    fn push(native: &mut Self::Native, value: Vec<u8>) -> Result<(), MinframeError> {
        native.push(&value)
    }

    fn push_null(native: &mut Self::Native) {
        native.push_null();
    }

    fn native_len(native: &Self::Native) -> usize {
        native.len()
    }

    fn into_array(native: Self::Native) -> Result<Array, MinframeError> {
        Ok(Array::from_fixed_size_binary(native))
    }
}

impl<const W: usize> DictEncodable for FixedBinary<W> {
    fn dict_key(value: &Vec<u8>) -> DictKey {
        DictKey::Bytes(value.clone())
    }
}

/// 128-bit decimal with precision `P` and scale `S`. Values are unscaled `i128`.
pub struct Decimal<const P: u8, const S: i8>;

impl<const P: u8, const S: i8> LogicalTyped for Decimal<P, S> {
    type Native = DecimalArray;
    type Access<'a> = PrimitiveAccess<'a, i128>;
    type Input = i128;
    type Builder = LeafBuilder<Decimal<P, S>>;

    const TAG: TypeTag = TypeTag::Decimal128;

    fn logical_type() -> LogicalType {
        LogicalType::Decimal128 {
            precision: P,
            scale: S,
        }
    }

    fn is_compatible(dtype: &LogicalType) -> bool {
        *dtype == Self::logical_type()
    }

    fn native(array: &Array) -> Result<&Self::Native, MinframeError> {
        match array {
            Array::Decimal128(a) if a.precision == P && a.scale == S => Ok(&**a),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError> {
        Ok(PrimitiveAccess::new(
            native.data.as_slice(),
            native.null_mask.as_ref(),
        ))
    }
}

impl<const P: u8, const S: i8> LeafType for Decimal<P, S> {
    fn empty_native(_dtype: &LogicalType, _cap: usize) -> Self::Native {
        DecimalArray::empty(P, S)
    }

    fn push(native: &mut Self::Native, value: i128) -> Result<(), MinframeError> {
        native.push(value)
    }

    fn push_null(native: &mut Self::Native) {
        native.push_null();
    }

    fn native_len(native: &Self::Native) -> usize {
        native.len()
    }

    fn into_array(native: Self::Native) -> Result<Array, MinframeError> {
        Ok(Array::from_decimal128(native))
    }
}

impl<const P: u8, const S: i8> DictEncodable for Decimal<P, S> {
    fn dict_key(value: &i128) -> DictKey {
        DictKey::Int(*value)
    }
}

/// Marker for a fixed time resolution.
pub trait TimeUnitMarker: 'static {
    const UNIT: TimeUnit;
}

/// Units valid for `Time32`.
pub trait Time32Unit: TimeUnitMarker {}

/// Units valid for `Time64`.
pub trait Time64Unit: TimeUnitMarker {}

pub struct Second;
pub struct Millisecond;
pub struct Microsecond;
pub struct Nanosecond;

impl TimeUnitMarker for Second {
    const UNIT: TimeUnit = TimeUnit::Seconds;
}
impl TimeUnitMarker for Millisecond {
    const UNIT: TimeUnit = TimeUnit::Milliseconds;
}
impl TimeUnitMarker for Microsecond {
    const UNIT: TimeUnit = TimeUnit::Microseconds;
}
impl TimeUnitMarker for Nanosecond {
    const UNIT: TimeUnit = TimeUnit::Nanoseconds;
}
impl Time32Unit for Second {}
impl Time32Unit for Millisecond {}
impl Time64Unit for Microsecond {}
impl Time64Unit for Nanosecond {}

/// Days since the epoch, as `i32`.
pub struct Date32;
/// Milliseconds since the epoch, as `i64`.
pub struct Date64;
/// Time of day in `U` (seconds or milliseconds), as `i32`.
pub struct Time32<U>(PhantomData<U>);
/// Time of day in `U` (microseconds or nanoseconds), as `i64`.
pub struct Time64<U>(PhantomData<U>);
/// Instant since the epoch in `U`, as `i64`.
pub struct Timestamp<U>(PhantomData<U>);

macro_rules! impl_temporal_typed {
    (
        $marker:ty, [$($gen:tt)*], $native:ty, $variant:ident,
        unit = $unit:expr, dtype = $dtype:expr, wrap = $wrap:expr
    ) => {
        impl<$($gen)*> LogicalTyped for $marker {
            type Native = DatetimeArray<$native>;
            type Access<'a> = PrimitiveAccess<'a, $native>;
            type Input = $native;
            type Builder = LeafBuilder<Self>;

            const TAG: TypeTag = TypeTag::$variant;

            fn logical_type() -> LogicalType {
                $dtype
            }

            fn is_compatible(dtype: &LogicalType) -> bool {
                *dtype == Self::logical_type()
            }

            fn native(array: &Array) -> Result<&Self::Native, MinframeError> {
                match array {
                    Array::$variant(a) if a.time_unit == $unit => Ok(&**a),
                    other => Err(mismatch::<Self>(other)),
                }
            }

            fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError> {
                Ok(PrimitiveAccess::new(native.data.as_slice(), native.null_mask.as_ref()))
            }
        }

        impl<$($gen)*> LeafType for $marker {
            fn empty_native(_dtype: &LogicalType, cap: usize) -> Self::Native {
                DatetimeArray::with_capacity(cap, false, $unit)
            }

            fn push(native: &mut Self::Native, value: $native) -> Result<(), MinframeError> {
                native.push(value);
                Ok(())
            }

            fn push_null(native: &mut Self::Native) {
                native.push_null();
            }

            fn native_len(native: &Self::Native) -> usize {
                native.len()
            }

            fn into_array(native: Self::Native) -> Result<Array, MinframeError> {
                $wrap(native)
            }
        }

        impl<$($gen)*> DictEncodable for $marker {
            fn dict_key(value: &$native) -> DictKey {
                DictKey::Int(*value as i128)
            }
        }
    };
}

impl_temporal_typed!(
    Date32, [], i32, Date32,
    unit = TimeUnit::Days,
    dtype = LogicalType::Date32,
    wrap = |n| -> Result<Array, MinframeError> { Ok(Array::from_date32(n)) }
);
impl_temporal_typed!(
    Date64, [], i64, Date64,
    unit = TimeUnit::Milliseconds,
    dtype = LogicalType::Date64,
    wrap = |n| -> Result<Array, MinframeError> { Ok(Array::from_date64(n)) }
);
impl_temporal_typed!(
    Time32<U>, [U: Time32Unit], i32, Time32,
    unit = U::UNIT,
    dtype = LogicalType::Time32(U::UNIT),
    wrap = Array::from_time32
);
impl_temporal_typed!(
    Time64<U>, [U: Time64Unit], i64, Time64,
    unit = U::UNIT,
    dtype = LogicalType::Time64(U::UNIT),
    wrap = Array::from_time64
);
impl_temporal_typed!(
    Timestamp<U>, [U: TimeUnitMarker], i64, Timestamp,
    unit = U::UNIT,
    dtype = LogicalType::Timestamp(U::UNIT),
    wrap = Array::from_timestamp
);

/// List of `T`.
pub struct List<T>(PhantomData<T>);

impl<T: LogicalTyped> LogicalTyped for List<T> {
    type Native = ListArray;
    type Access<'a> = ListAccess<'a, T>;
    type Input = Vec<Option<T::Input>>;
    type Builder = ListBuilder<T>;

    const TAG: TypeTag = TypeTag::List;

    fn logical_type() -> LogicalType {
        LogicalType::list(T::logical_type())
    }

    fn is_compatible(dtype: &LogicalType) -> bool {
        matches!(dtype, LogicalType::List(elem) if T::is_compatible(elem))
    }

    fn native(array: &Array) -> Result<&Self::Native, MinframeError> {
        match array {
            Array::List(a) if T::is_compatible(&a.value_type()) => Ok(&**a),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError> {
        Ok(ListAccess {
            offsets: native.offsets().as_slice(),
            mask: native.null_mask.as_ref(),
            child: T::access(&native.values)?,
        })
    }
}

/// Struct whose fields are the tuple `F`.
pub struct Struct<F>(PhantomData<F>);

/// Tuple shapes usable as struct fields.
pub trait StructFields: 'static {
    type Accesses<'a>: Clone;
    type Values<'a>;
    type Inputs;
    type Builders;

    const ARITY: usize;

    fn field_types() -> Vec<LogicalType>;

    fn compatible(fields: &[StructField]) -> bool;

    fn accesses(children: &[Array]) -> Result<Self::Accesses<'_>, MinframeError>;

    fn values<'a>(accesses: &Self::Accesses<'a>, idx: usize) -> Self::Values<'a>;

    fn builders(fields: &[StructField], cap: usize) -> Result<Self::Builders, MinframeError>;

    fn append(builders: &mut Self::Builders, inputs: Self::Inputs) -> Result<(), MinframeError>;

    fn append_null(builders: &mut Self::Builders) -> Result<(), MinframeError>;

    fn finish(builders: Self::Builders) -> Result<Vec<Array>, MinframeError>;
}

#[inline]
fn opt_value<'a, A: ValueAccess<'a>>(access: &A, idx: usize) -> Option<A::Value> {
    access.is_valid(idx).then(|| access.value(idx))
}

#[inline]
fn append_opt<B: ArrayBuilder>(builder: &mut B, value: Option<B::Input>) -> Result<(), MinframeError> {
    match value {
        Some(v) => builder.append_value(v),
        None => builder.append_null(),
    }
}

macro_rules! impl_struct_fields {
    ($n:expr; $($name:ident $idx:tt),+) => {
        impl<$($name: LogicalTyped),+> StructFields for ($($name,)+) {
            type Accesses<'a> = ($($name::Access<'a>,)+);
            type Values<'a> = ($(Option<<$name::Access<'a> as ValueAccess<'a>>::Value>,)+);
            type Inputs = ($(Option<$name::Input>,)+);
            type Builders = ($($name::Builder,)+);

            const ARITY: usize = $n;

            fn field_types() -> Vec<LogicalType> {
                vec![$($name::logical_type()),+]
            }

            fn compatible(fields: &[StructField]) -> bool {
                fields.len() == $n $(&& $name::is_compatible(&fields[$idx].dtype))+
            }

            fn accesses(children: &[Array]) -> Result<Self::Accesses<'_>, MinframeError> {
                Ok(($($name::access(&children[$idx])?,)+))
            }

            fn values<'a>(accesses: &Self::Accesses<'a>, idx: usize) -> Self::Values<'a> {
                ($(opt_value(&accesses.$idx, idx),)+)
            }

            fn builders(
                fields: &[StructField],
                cap: usize,
            ) -> Result<Self::Builders, MinframeError> {
                Ok(($(<$name::Builder as ArrayBuilder>::for_type(&fields[$idx].dtype, cap)?,)+))
            }

            fn append(
                builders: &mut Self::Builders,
                inputs: Self::Inputs,
            ) -> Result<(), MinframeError> {
                $(append_opt(&mut builders.$idx, inputs.$idx)?;)+
                Ok(())
            }

            fn append_null(builders: &mut Self::Builders) -> Result<(), MinframeError> {
                $(builders.$idx.append_null()?;)+
                Ok(())
            }

            fn finish(builders: Self::Builders) -> Result<Vec<Array>, MinframeError> {
                Ok(vec![$(builders.$idx.finish()?),+])
            }
        }
    };
}

impl_struct_fields!(1; A 0);
impl_struct_fields!(2; A 0, B 1);
impl_struct_fields!(3; A 0, B 1, C 2);
impl_struct_fields!(4; A 0, B 1, C 2, D 3);
impl_struct_fields!(5; A 0, B 1, C 2, D 3, E 4);
impl_struct_fields!(6; A 0, B 1, C 2, D 3, E 4, G 5);

impl<F: StructFields> LogicalTyped for Struct<F> {
    type Native = StructArray;
    type Access<'a> = StructAccess<'a, F>;
    type Input = F::Inputs;
    type Builder = StructBuilder<F>;

    const TAG: TypeTag = TypeTag::Struct;

    /// Fields are named `f0..fN`; real names live on the array.
    fn logical_type() -> LogicalType {
        LogicalType::struct_of(
            F::field_types()
                .into_iter()
                .enumerate()
                .map(|(i, t)| (format!("f{i}"), t)),
        )
    }

    fn is_compatible(dtype: &LogicalType) -> bool {
        matches!(dtype, LogicalType::Struct(fields) if F::compatible(fields))
    }

    fn native(array: &Array) -> Result<&Self::Native, MinframeError> {
        match array {
            Array::Struct(a) if Self::is_compatible(&a.logical_type()) => Ok(&**a),
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError> {
        Ok(StructAccess {
            array: native,
            fields: F::accesses(native.children())?,
        })
    }
}

/// Dictionary of `T` values with `I` indices.
pub struct Dict<T, I, const ORDERED: bool = false>(PhantomData<(T, I)>);

impl<T: DictEncodable, I: IndexType, const ORDERED: bool> LogicalTyped for Dict<T, I, ORDERED> {
    type Native = DictionaryArray;
    type Access<'a> = DictAccess<'a, T, I>;
    type Input = T::Input;
    type Builder = DictBuilder<T, I, ORDERED>;

    const TAG: TypeTag = TypeTag::Dictionary;

    fn logical_type() -> LogicalType {
        LogicalType::dictionary(T::logical_type(), I::INTEGER_TYPE, ORDERED)
    }

    fn is_compatible(dtype: &LogicalType) -> bool {
        matches!(
            dtype,
            LogicalType::Dictionary { value, index, ordered }
                if *ordered == ORDERED && *index == I::INTEGER_TYPE && T::is_compatible(value)
        )
    }

    fn native(array: &Array) -> Result<&Self::Native, MinframeError> {
        match array {
            Array::Dictionary(d)
                if d.ordered == ORDERED
                    && d.index_type() == I::INTEGER_TYPE
                    && T::is_compatible(&d.value_type()) =>
            {
                Ok(&**d)
            }
            other => Err(mismatch::<Self>(other)),
        }
    }

    fn access_native(native: &Self::Native) -> Result<Self::Access<'_>, MinframeError> {
        let keys = I::native(&native.indices)?;
        Ok(DictAccess {
            array: native,
            keys: PrimitiveAccess::new(keys.data.as_slice(), keys.null_mask.as_ref()),
            dictionary: T::access(&native.dictionary)?,
            _index: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::logical_type::IntegerType;
    use crate::{arr_i32, arr_str};

    #[test]
    fn test_logical_types() {
        assert_eq!(i32::logical_type(), LogicalType::Int32);
        assert_eq!(
            Timestamp::<Nanosecond>::logical_type(),
            LogicalType::Timestamp(TimeUnit::Nanoseconds)
        );
        assert_eq!(
            List::<List<f64>>::logical_type(),
            LogicalType::list(LogicalType::list(LogicalType::Float64))
        );
        assert_eq!(
            Struct::<(i32, String)>::logical_type(),
            LogicalType::struct_of([("f0", LogicalType::Int32), ("f1", LogicalType::String)])
        );
        assert_eq!(
            Dict::<String, u16, true>::logical_type(),
            LogicalType::dictionary(LogicalType::String, IntegerType::UInt16, true)
        );
        assert_eq!(<Struct<(i8, i8, i8)> as LogicalTyped>::TAG, TypeTag::Struct);
    }

    #[test]
    fn test_exact_compatibility() {
        assert!(!i64::is_compatible(&LogicalType::Int32));
        assert!(!Time32::<Second>::is_compatible(&LogicalType::Time32(TimeUnit::Milliseconds)));
        assert!(!Dict::<String, i32>::is_compatible(&LogicalType::dictionary(
            LogicalType::String,
            IntegerType::UInt32,
            false
        )));
        assert!(!Dict::<String, i32, false>::is_compatible(&LogicalType::dictionary(
            LogicalType::String,
            IntegerType::Int32,
            true
        )));
        let named = LogicalType::struct_of([("x", LogicalType::Int32), ("y", LogicalType::String)]);
        assert!(Struct::<(i32, String)>::is_compatible(&named));
        assert!(!Struct::<(i32,)>::is_compatible(&named));
        assert!(!Struct::<(String, i32)>::is_compatible(&named));
        assert!(Decimal::<10, 2>::is_compatible(&LogicalType::Decimal128 {
            precision: 10,
            scale: 2
        }));
        assert!(!FixedBinary::<4>::is_compatible(&LogicalType::FixedSizeBinary(8)));
    }

    #[test]
    fn test_native_mismatch_reports_types() {
        let err = i64::native(&arr_i32![1]).unwrap_err();
        assert_eq!(
            err,
            MinframeError::TypeMismatch {
                expected: "Int64".into(),
                found: "Int32".into()
            }
        );
        assert!(String::native(&arr_str!["a"]).is_ok());
        assert!(List::<i32>::native(&arr_i32![1]).is_err());
    }
}
