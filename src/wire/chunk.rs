//! Array chunks: `u64 len | u8 has_mask [mask] | payload`.
//!
//! Payloads are normalised on the way out. Masks start at bit 0, offsets start at 0, and
//! only the span a window references is written, so a slice of a large array costs no
//! more than a fresh array of the same length.
//!
//! | kind | payload |
//! |------|---------|
//! | null | nothing |
//! | bool | packed bits |
//! | fixed width | `len` little-endian values |
//! | utf8, bytes | `len + 1` `u32` offsets, then the bytes they span |
//! | opaque | `len * width` bytes |
//! | list | offsets, then one child chunk |
//! | struct | one child chunk per field |
//! | dictionary | indices chunk, then dictionary chunk; the outer mask is always absent |

use bytes::{BufMut, BytesMut};

use super::codec::{Reader, WireNative, put_values};
use crate::enums::error::MinframeError;
use crate::enums::logical_type::LogicalType;
use crate::enums::time_units::TimeUnit;
use crate::structs::variants::string::{BinaryArray, StringArray};
use crate::{
    Array, Bitmask, BooleanArray, DatetimeArray, DecimalArray, DictionaryArray,
    FixedSizeBinaryArray, FloatArray, IntegerArray, ListArray, StructArray,
};

pub(crate) fn encode_chunk(buf: &mut BytesMut, array: &Array) -> Result<(), MinframeError> {
    let len = array.len();
    buf.put_u64_le(len as u64);
    let mask = match array {
        Array::Dictionary(_) => None,
        other => other.null_mask(),
    };
    match mask {
        Some(m) => {
            buf.put_u8(1);
            buf.put_slice(&m.to_aligned_bytes());
        }
        None => buf.put_u8(0),
    }
    match array {
        Array::Null(_) => {}
        Array::Boolean(a) => buf.put_slice(&a.data.to_aligned_bytes()),
        Array::Int8(a) => put_values(buf, a.data.as_slice()),
        Array::Int16(a) => put_values(buf, a.data.as_slice()),
        Array::Int32(a) => put_values(buf, a.data.as_slice()),
        Array::Int64(a) => put_values(buf, a.data.as_slice()),
        Array::UInt8(a) => put_values(buf, a.data.as_slice()),
        Array::UInt16(a) => put_values(buf, a.data.as_slice()),
        Array::UInt32(a) => put_values(buf, a.data.as_slice()),
        Array::UInt64(a) => put_values(buf, a.data.as_slice()),
        Array::Float32(a) => put_values(buf, a.data.as_slice()),
        Array::Float64(a) => put_values(buf, a.data.as_slice()),
        Array::Date32(a) | Array::Time32(a) => put_values(buf, a.data.as_slice()),
        Array::Date64(a) | Array::Time64(a) | Array::Timestamp(a) => {
            put_values(buf, a.data.as_slice())
        }
        Array::String(a) => put_var_width(buf, a.offsets().as_slice(), a.data().as_slice()),
        Array::Binary(a) => put_var_width(buf, a.offsets().as_slice(), a.data().as_slice()),
        Array::FixedSizeBinary(a) => buf.put_slice(a.data.as_slice()),
        Array::Decimal128(a) => put_values(buf, a.data.as_slice()),
        Array::List(a) => {
            let (start, end) = a.child_span();
            put_offsets(buf, a.offsets().as_slice());
            encode_chunk(buf, &a.values.slice(start, end - start)?)?;
        }
        Array::Struct(a) => {
            for child in a.children() {
                encode_chunk(buf, child)?;
            }
        }
        Array::Dictionary(a) => {
            encode_chunk(buf, &a.indices)?;
            encode_chunk(buf, &a.dictionary)?;
        }
    }
    Ok(())
}

fn put_offsets(buf: &mut BytesMut, offsets: &[u32]) {
    let base = offsets.first().copied().unwrap_or(0);
    buf.reserve(offsets.len() * 4);
    for o in offsets {
        buf.put_u32_le(o - base);
    }
}

fn put_var_width(buf: &mut BytesMut, offsets: &[u32], data: &[u8]) {
    put_offsets(buf, offsets);
    let start = offsets.first().copied().unwrap_or(0) as usize;
    let end = offsets.last().copied().unwrap_or(0) as usize;
    buf.put_slice(&data[start..end]);
}

/// Decodes one chunk of `dtype`, validating it through the array constructors.
pub(crate) fn decode_chunk(r: &mut Reader<'_>, dtype: &LogicalType) -> Result<Array, MinframeError> {
    let len = r.len("chunk length")?;
    let mask = if r.flag("mask flag")? {
        let bytes = r.bytes(len.div_ceil(8), "null mask")?;
        Some(Bitmask::from_bytes(bytes, len)?)
    } else {
        None
    };
    let array = match dtype {
        LogicalType::Null => {
            if mask.is_some() {
                return Err(MinframeError::Wire("null chunk carries a mask".into()));
            }
            Array::new_null(len)
        }
        LogicalType::Boolean => {
            let bits = r.bytes(len.div_ceil(8), "boolean values")?;
            Array::from_bool(BooleanArray::new(Bitmask::from_bytes(bits, len)?, mask)?)
        }
        LogicalType::Int8 => Array::from_int8(ints(r, len, mask)?),
        LogicalType::Int16 => Array::from_int16(ints(r, len, mask)?),
        LogicalType::Int32 => Array::from_int32(ints(r, len, mask)?),
        LogicalType::Int64 => Array::from_int64(ints(r, len, mask)?),
        LogicalType::UInt8 => Array::from_uint8(ints(r, len, mask)?),
        LogicalType::UInt16 => Array::from_uint16(ints(r, len, mask)?),
        LogicalType::UInt32 => Array::from_uint32(ints(r, len, mask)?),
        LogicalType::UInt64 => Array::from_uint64(ints(r, len, mask)?),
        LogicalType::Float32 => {
            Array::from_float32(FloatArray::new(r.values::<f32>(len, "values")?, mask)?)
        }
        LogicalType::Float64 => {
            Array::from_float64(FloatArray::new(r.values::<f64>(len, "values")?, mask)?)
        }
        LogicalType::Date32 => Array::from_date32(temporal(r, len, mask, TimeUnit::Days)?),
        LogicalType::Date64 => {
            Array::from_date64(temporal(r, len, mask, TimeUnit::Milliseconds)?)
        }
        LogicalType::Time32(unit) => Array::from_time32(temporal(r, len, mask, *unit)?)?,
        LogicalType::Time64(unit) => Array::from_time64(temporal(r, len, mask, *unit)?)?,
        LogicalType::Timestamp(unit) => {
            Array::from_timestamp(temporal(r, len, mask, *unit)?)?
        }
        LogicalType::String => {
            let (offsets, data) = var_width(r, len)?;
            Array::from_string(StringArray::new(data, mask, offsets)?)
        }
        LogicalType::Binary => {
            let (offsets, data) = var_width(r, len)?;
            Array::from_binary(BinaryArray::new(data, mask, offsets)?)
        }
        LogicalType::FixedSizeBinary(width) => {
            let n = len
                .checked_mul(*width)
                .ok_or_else(|| MinframeError::Wire("opaque payload size overflows".into()))?;
            let data = r.bytes(n, "opaque values")?.to_vec();
            Array::from_fixed_size_binary(FixedSizeBinaryArray::new(data, mask, *width)?)
        }
        LogicalType::Decimal128 { precision, scale } => Array::from_decimal128(DecimalArray::new(
            r.values::<i128>(len, "decimal values")?,
            mask,
            *precision,
            *scale,
        )?),
        LogicalType::List(elem) => {
            let offsets = offsets(r, len)?;
            let values = decode_chunk(r, elem)?;
            Array::from_list(ListArray::new(offsets, values, mask)?)
        }
        LogicalType::Struct(fields) => {
            let mut names = Vec::with_capacity(fields.len());
            let mut children = Vec::with_capacity(fields.len());
            for f in fields.iter() {
                names.push(f.name.clone());
                children.push(decode_chunk(r, &f.dtype)?);
            }
            Array::from_struct(StructArray::new(names, children, len, mask)?)
        }
        LogicalType::Dictionary {
            value,
            index,
            ordered,
        } => {
            if mask.is_some() {
                return Err(MinframeError::Wire(
                    "dictionary chunk carries an outer mask".into(),
                ));
            }
            let indices = decode_chunk(r, &index.logical_type())?;
            if indices.len() != len {
                return Err(MinframeError::Wire(format!(
                    "dictionary chunk of {len} rows has {} indices",
                    indices.len()
                )));
            }
            let dictionary = decode_chunk(r, value)?;
            Array::from_dictionary(DictionaryArray::new(indices, dictionary, *ordered)?)
        }
    };
    Ok(array)
}

fn ints<T>(
    r: &mut Reader<'_>,
    len: usize,
    mask: Option<Bitmask>,
) -> Result<IntegerArray<T>, MinframeError>
where
    T: WireNative + crate::traits::type_unions::Integer,
{
    IntegerArray::new(r.values::<T>(len, "values")?, mask)
}

fn temporal<T>(
    r: &mut Reader<'_>,
    len: usize,
    mask: Option<Bitmask>,
    unit: TimeUnit,
) -> Result<DatetimeArray<T>, MinframeError>
where
    T: WireNative + crate::traits::type_unions::Integer,
{
    DatetimeArray::new(r.values::<T>(len, "temporal values")?, mask, unit)
}

fn offsets(r: &mut Reader<'_>, len: usize) -> Result<Vec<u32>, MinframeError> {
    let n = len
        .checked_add(1)
        .ok_or_else(|| MinframeError::Wire("offset count overflows".into()))?;
    let offsets = r.values::<u32>(n, "offsets")?;
    if offsets[0] != 0 {
        return Err(MinframeError::Wire(format!(
            "offsets start at {} instead of 0",
            offsets[0]
        )));
    }
    Ok(offsets)
}

fn var_width(r: &mut Reader<'_>, len: usize) -> Result<(Vec<u32>, Vec<u8>), MinframeError> {
    let offsets = offsets(r, len)?;
    let total = offsets[len] as usize;
    let data = r.bytes(total, "variable-width values")?.to_vec();
    Ok((offsets, data))
}
