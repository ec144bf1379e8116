//! Hashable keys for dictionary uniquing.
//!
//! Shared by the dictionary builder and by dictionary re-unification in `bind`. Keys are
//! only ever compared within one value type, so distinct types may map to the same key
//! shape.

use crate::Array;
use crate::enums::error::MinframeError;

/// Hashable image of one dictionary value.
///
/// Floats hash by bit pattern, so `NaN` payloads and signed zeros stay distinct.
/// Nulls share one key here; re-unification in `bind` keeps null entries apart itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DictKey {
    Null,
    Bool(bool),
    Int(i128),
    Float(u64),
    Bytes(Vec<u8>),
}

impl DictKey {
    /// Key of element `idx` of `array`.
    ///
    /// Fails with `UnsupportedBind` for nested value types.
    pub fn of(array: &Array, idx: usize) -> Result<Self, MinframeError> {
        if array.is_null(idx) {
            return Ok(DictKey::Null);
        }
        let key = match array {
            Array::Null(_) => Some(DictKey::Null),
            Array::Boolean(a) => a.get(idx).map(DictKey::Bool),
            Array::Int8(a) => a.get(idx).map(|v| DictKey::Int(v as i128)),
            Array::Int16(a) => a.get(idx).map(|v| DictKey::Int(v as i128)),
            Array::Int32(a) => a.get(idx).map(|v| DictKey::Int(v as i128)),
            Array::Int64(a) => a.get(idx).map(|v| DictKey::Int(v as i128)),
            Array::UInt8(a) => a.get(idx).map(|v| DictKey::Int(v as i128)),
            Array::UInt16(a) => a.get(idx).map(|v| DictKey::Int(v as i128)),
            Array::UInt32(a) => a.get(idx).map(|v| DictKey::Int(v as i128)),
            Array::UInt64(a) => a.get(idx).map(|v| DictKey::Int(v as i128)),
            Array::Float32(a) => a.get(idx).map(|v| DictKey::Float(v.to_bits() as u64)),
            Array::Float64(a) => a.get(idx).map(|v| DictKey::Float(v.to_bits())),
            Array::Date32(a) | Array::Time32(a) => a.get(idx).map(|v| DictKey::Int(v as i128)),
            Array::Date64(a) | Array::Time64(a) | Array::Timestamp(a) => {
                a.get(idx).map(|v| DictKey::Int(v as i128))
            }
            Array::String(a) => a.get_str(idx).map(|s| DictKey::Bytes(s.as_bytes().to_vec())),
            Array::Binary(a) => a.get(idx).map(|b| DictKey::Bytes(b.to_vec())),
            Array::FixedSizeBinary(a) => a.get(idx).map(|b| DictKey::Bytes(b.to_vec())),
            Array::Decimal128(a) => a.get(idx).map(DictKey::Int),
            Array::List(_) | Array::Struct(_) | Array::Dictionary(_) => {
                return Err(MinframeError::UnsupportedBind(format!(
                    "dictionary values of type {} cannot be unified",
                    array.logical_type()
                )));
            }
        };
        key.ok_or(MinframeError::IndexOutOfRange {
            index: idx,
            len: array.len(),
        })
    }
}
