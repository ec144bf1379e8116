//! # **Accessors** - *Borrowed element readers behind `View`*
//!
//! One accessor per physical layout. Accessors index the whole underlying array;
//! windowing is the view's job. They never copy buffers.

use std::marker::PhantomData;

use crate::traits::type_unions::Integer;
use crate::typed::registry::{LogicalTyped, StructFields, ValueAccess};
use crate::typed::view::View;
use crate::{
    BinaryArray, Bitmask, DictionaryArray, FixedSizeBinaryArray, StringArray, StructArray,
};

#[inline]
fn mask_valid(mask: Option<&Bitmask>, idx: usize) -> bool {
    mask.is_none_or(|m| m.get(idx))
}

/// Flat fixed-width values with an optional mask.
#[derive(Debug)]
pub struct PrimitiveAccess<'a, N> {
    values: &'a [N],
    mask: Option<&'a Bitmask>,
}

impl<'a, N> PrimitiveAccess<'a, N> {
    pub(crate) fn new(values: &'a [N], mask: Option<&'a Bitmask>) -> Self {
        Self { values, mask }
    }
}

impl<N> Clone for PrimitiveAccess<'_, N> {
    fn clone(&self) -> Self {
        Self {
            values: self.values,
            mask: self.mask,
        }
    }
}

impl<'a, N: Copy> ValueAccess<'a> for PrimitiveAccess<'a, N> {
    type Value = N;

    #[inline]
    fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    fn is_valid(&self, idx: usize) -> bool {
        mask_valid(self.mask, idx)
    }

    #[inline]
    fn value(&self, idx: usize) -> N {
        self.values[idx]
    }
}

/// Bit-packed booleans.
#[derive(Clone, Debug)]
pub struct BoolAccess<'a> {
    pub(crate) values: &'a Bitmask,
    pub(crate) mask: Option<&'a Bitmask>,
}

impl<'a> ValueAccess<'a> for BoolAccess<'a> {
    type Value = bool;

    fn len(&self) -> usize {
        self.values.len()
    }

    fn is_valid(&self, idx: usize) -> bool {
        mask_valid(self.mask, idx)
    }

    fn value(&self, idx: usize) -> bool {
        self.values.get(idx)
    }
}

/// UTF-8 strings.
#[derive(Clone, Debug)]
pub struct StrAccess<'a>(pub(crate) &'a StringArray);

impl<'a> ValueAccess<'a> for StrAccess<'a> {
    type Value = &'a str;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn is_valid(&self, idx: usize) -> bool {
        mask_valid(self.0.null_mask.as_ref(), idx)
    }

    fn value(&self, idx: usize) -> &'a str {
        self.0.value(idx)
    }
}

/// Variable-width bytes.
#[derive(Clone, Debug)]
pub struct BinaryAccess<'a>(pub(crate) &'a BinaryArray);

impl<'a> ValueAccess<'a> for BinaryAccess<'a> {
    type Value = &'a [u8];

    fn len(&self) -> usize {
        self.0.len()
    }

    fn is_valid(&self, idx: usize) -> bool {
        mask_valid(self.0.null_mask.as_ref(), idx)
    }

    fn value(&self, idx: usize) -> &'a [u8] {
        self.0.value_bytes(idx)
    }
}

/// Fixed-width bytes.
#[derive(Clone, Debug)]
pub struct FixedBinaryAccess<'a>(pub(crate) &'a FixedSizeBinaryArray);

impl<'a> ValueAccess<'a> for FixedBinaryAccess<'a> {
    type Value = &'a [u8];

    fn len(&self) -> usize {
        self.0.len()
    }

    fn is_valid(&self, idx: usize) -> bool {
        mask_valid(self.0.null_mask.as_ref(), idx)
    }

    fn value(&self, idx: usize) -> &'a [u8] {
        self.0.value(idx)
    }
}

/// Lists: each value is a sub-view over the shared child accessor.
pub struct ListAccess<'a, T: LogicalTyped> {
    pub(crate) offsets: &'a [u32],
    pub(crate) mask: Option<&'a Bitmask>,
    pub(crate) child: T::Access<'a>,
}

impl<'a, T: LogicalTyped> Clone for ListAccess<'a, T> {
    fn clone(&self) -> Self {
        Self {
            offsets: self.offsets,
            mask: self.mask,
            child: self.child.clone(),
        }
    }
}

impl<'a, T: LogicalTyped> ValueAccess<'a> for ListAccess<'a, T> {
    type Value = View<'a, T>;

    fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    fn is_valid(&self, idx: usize) -> bool {
        mask_valid(self.mask, idx)
    }

    fn value(&self, idx: usize) -> View<'a, T> {
        let start = self.offsets[idx] as usize;
        let end = self.offsets[idx + 1] as usize;
        View::from_parts(self.child.clone(), start, end - start)
    }
}

/// Structs: one accessor per field plus the row mask.
pub struct StructAccess<'a, F: StructFields> {
    pub(crate) array: &'a StructArray,
    pub(crate) fields: F::Accesses<'a>,
}

impl<'a, F: StructFields> Clone for StructAccess<'a, F> {
    fn clone(&self) -> Self {
        Self {
            array: self.array,
            fields: self.fields.clone(),
        }
    }
}

impl<'a, F: StructFields> ValueAccess<'a> for StructAccess<'a, F> {
    type Value = F::Values<'a>;

    fn len(&self) -> usize {
        self.array.len()
    }

    fn is_valid(&self, idx: usize) -> bool {
        mask_valid(self.array.null_mask.as_ref(), idx)
    }

    fn value(&self, idx: usize) -> F::Values<'a> {
        F::values(&self.fields, idx)
    }
}

/// Dictionaries: keys resolved through the shared dictionary accessor.
///
/// A key that is null, negative, or out of range reads as null, as does a null
/// dictionary entry.
pub struct DictAccess<'a, T: LogicalTyped, I> {
    pub(crate) array: &'a DictionaryArray,
    pub(crate) keys: PrimitiveAccess<'a, I>,
    pub(crate) dictionary: T::Access<'a>,
    pub(crate) _index: PhantomData<I>,
}

impl<'a, T: LogicalTyped, I> Clone for DictAccess<'a, T, I> {
    fn clone(&self) -> Self {
        Self {
            array: self.array,
            keys: self.keys.clone(),
            dictionary: self.dictionary.clone(),
            _index: PhantomData,
        }
    }
}

impl<'a, T: LogicalTyped, I: Integer> DictAccess<'a, T, I> {
    #[inline]
    fn key(&self, idx: usize) -> Option<usize> {
        if !self.keys.is_valid(idx) {
            return None;
        }
        self.keys
            .value(idx)
            .to_index()
            .filter(|&k| k < self.dictionary.len())
    }
}

impl<'a, T: LogicalTyped, I: Integer> ValueAccess<'a> for DictAccess<'a, T, I> {
    type Value = <T::Access<'a> as ValueAccess<'a>>::Value;

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn is_valid(&self, idx: usize) -> bool {
        self.key(idx).is_some_and(|k| self.dictionary.is_valid(k))
    }

    /// Callers check `is_valid` first.
    fn value(&self, idx: usize) -> Self::Value {
        let k = self.key(idx).unwrap_or_default();
        self.dictionary.value(k)
    }
}
