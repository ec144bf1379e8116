//! # **Builders** - *Typed, single-use array construction*
//!
//! [`Builder<T>`] appends values of a [`LogicalTyped`] type and produces an [`Array`] with
//! [`Builder::finish`], consuming the builder.
//!
//! Nested builders delegate. A list append writes one offset and forwards every item to the
//! child builder. A struct append forwards each field to its field builder. A dictionary
//! append looks the value up in an insertion-ordered uniquing map and writes its key.
//!
//! ## Atomicity
//! A failed append poisons the builder: every later call fails with
//! `BuilderConfiguration`, including `finish`. A partially written row can therefore never
//! reach a finished array.
//!
//! ## Example
//! ```rust
//! use minframe::{Builder, List, View};
//!
//! let mut b = Builder::<List<i32>>::new().unwrap();
//! b.append_list([1, 2]).unwrap();
//! b.append_null().unwrap();
//! b.append(vec![Some(3), None]).unwrap();
//! let arr = b.finish().unwrap();
//!
//! let view = View::<List<i32>>::open(&arr).unwrap();
//! assert_eq!(view.get(0).unwrap().to_vec(), vec![Some(1), Some(2)]);
//! assert!(view.get(1).is_none());
//! ```

use std::marker::PhantomData;

use log::{trace, warn};

use crate::enums::error::MinframeError;
use crate::enums::logical_type::LogicalType;
use crate::kernels::dict_key::DictKey;
use crate::typed::registry::{DictEncodable, IndexType, List, LogicalTyped, StructFields};
use crate::utils::to_offset;
use crate::{Array, Bitmask, DictionaryArray, IntegerArray, ListArray, StructArray};

#[cfg(feature = "fast_hash")]
use ahash::AHashMap as HashMap;
#[cfg(not(feature = "fast_hash"))]
use std::collections::HashMap;

/// Untyped builder protocol behind [`Builder<T>`].
pub trait ArrayBuilder: Sized {
    type Input;

    /// Builder for `dtype`. Fails with `BuilderConfiguration` when `dtype` does not fit.
    fn for_type(dtype: &LogicalType, capacity: usize) -> Result<Self, MinframeError>;

    fn len(&self) -> usize;

    fn append_value(&mut self, value: Self::Input) -> Result<(), MinframeError>;

    fn append_null(&mut self) -> Result<(), MinframeError>;

    fn finish(self) -> Result<Array, MinframeError>;
}

/// Non-nested types that write straight into their inner array.
pub trait LeafType: LogicalTyped {
    fn empty_native(dtype: &LogicalType, cap: usize) -> Self::Native;

    fn push(native: &mut Self::Native, value: Self::Input) -> Result<(), MinframeError>;

    fn push_null(native: &mut Self::Native);

    fn native_len(native: &Self::Native) -> usize;

    fn into_array(native: Self::Native) -> Result<Array, MinframeError>;
}

/// Checks that a builder for `T` may produce `dtype`.
fn check_type<T: LogicalTyped>(dtype: &LogicalType) -> Result<(), MinframeError> {
    if !T::is_compatible(dtype) {
        return Err(MinframeError::BuilderConfiguration(format!(
            "cannot build {dtype} with a builder for {}",
            T::logical_type()
        )));
    }
    dtype
        .validate()
        .map_err(|e| MinframeError::BuilderConfiguration(e.to_string()))
}

pub struct LeafBuilder<T: LeafType> {
    native: T::Native,
}

impl<T: LeafType> ArrayBuilder for LeafBuilder<T> {
    type Input = T::Input;

    fn for_type(dtype: &LogicalType, capacity: usize) -> Result<Self, MinframeError> {
        check_type::<T>(dtype)?;
        Ok(Self {
            native: T::empty_native(dtype, capacity),
        })
    }

    fn len(&self) -> usize {
        T::native_len(&self.native)
    }

    fn append_value(&mut self, value: T::Input) -> Result<(), MinframeError> {
        T::push(&mut self.native, value)
    }

    fn append_null(&mut self) -> Result<(), MinframeError> {
        T::push_null(&mut self.native);
        Ok(())
    }

    fn finish(self) -> Result<Array, MinframeError> {
        T::into_array(self.native)
    }
}

pub struct ListBuilder<T: LogicalTyped> {
    offsets: Vec<u32>,
    null_mask: Option<Bitmask>,
    child: T::Builder,
}

impl<T: LogicalTyped> ListBuilder<T> {
    /// Records validity for the row whose end offset was just pushed.
    fn push_validity(&mut self, valid: bool) {
        let before = self.offsets.len() - 2;
        match self.null_mask.as_mut() {
            Some(m) => m.push(valid),
            None if !valid => {
                let mut m = Bitmask::new_set_all(before, true);
                m.push(false);
                self.null_mask = Some(m);
            }
            None => {}
        }
    }
}

impl<T: LogicalTyped> ArrayBuilder for ListBuilder<T> {
    type Input = Vec<Option<T::Input>>;

    fn for_type(dtype: &LogicalType, capacity: usize) -> Result<Self, MinframeError> {
        check_type::<List<T>>(dtype)?;
        let LogicalType::List(elem) = dtype else {
            return Err(MinframeError::BuilderConfiguration(format!(
                "expected a list type, got {dtype}"
            )));
        };
        let mut offsets = Vec::with_capacity(capacity + 1);
        offsets.push(0);
        Ok(Self {
            offsets,
            null_mask: None,
            child: T::Builder::for_type(elem, capacity)?,
        })
    }

    fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    fn append_value(&mut self, items: Self::Input) -> Result<(), MinframeError> {
        let end = to_offset(self.child.len() as u64 + items.len() as u64)?;
        for item in items {
            match item {
                Some(v) => self.child.append_value(v)?,
                None => self.child.append_null()?,
            }
        }
        self.offsets.push(end);
        self.push_validity(true);
        Ok(())
    }

    fn append_null(&mut self) -> Result<(), MinframeError> {
        let end = self.offsets[self.offsets.len() - 1];
        self.offsets.push(end);
        self.push_validity(false);
        Ok(())
    }

    fn finish(self) -> Result<Array, MinframeError> {
        let values = self.child.finish()?;
        Ok(Array::from_list(ListArray::new(
            self.offsets,
            values,
            self.null_mask,
        )?))
    }
}

pub struct StructBuilder<F: StructFields> {
    names: Vec<String>,
    builders: F::Builders,
    null_mask: Option<Bitmask>,
    len: usize,
}

impl<F: StructFields> ArrayBuilder for StructBuilder<F> {
    type Input = F::Inputs;

    fn for_type(dtype: &LogicalType, capacity: usize) -> Result<Self, MinframeError> {
        let LogicalType::Struct(fields) = dtype else {
            return Err(MinframeError::BuilderConfiguration(format!(
                "expected a struct type, got {dtype}"
            )));
        };
        if !F::compatible(fields) {
            return Err(MinframeError::BuilderConfiguration(format!(
                "struct type {dtype} does not match a {}-field builder",
                F::ARITY
            )));
        }
        Ok(Self {
            names: fields.iter().map(|f| f.name.clone()).collect(),
            builders: F::builders(fields, capacity)?,
            null_mask: None,
            len: 0,
        })
    }

    fn len(&self) -> usize {
        self.len
    }

    fn append_value(&mut self, value: F::Inputs) -> Result<(), MinframeError> {
        F::append(&mut self.builders, value)?;
        if let Some(m) = self.null_mask.as_mut() {
            m.push(true);
        }
        self.len += 1;
        Ok(())
    }

    fn append_null(&mut self) -> Result<(), MinframeError> {
        F::append_null(&mut self.builders)?;
        let len = self.len;
        self.null_mask
            .get_or_insert_with(|| Bitmask::new_set_all(len, true))
            .push(false);
        self.len += 1;
        Ok(())
    }

    fn finish(self) -> Result<Array, MinframeError> {
        let children = F::finish(self.builders)?;
        Ok(Array::from_struct(StructArray::new(
            self.names,
            children,
            self.len,
            self.null_mask,
        )?))
    }
}

pub struct DictBuilder<T: DictEncodable, I: IndexType, const ORDERED: bool> {
    keys: IntegerArray<I>,
    values: T::Builder,
    seen: HashMap<DictKey, usize>,
    _marker: PhantomData<T>,
}

impl<T: DictEncodable, I: IndexType, const ORDERED: bool> ArrayBuilder
    for DictBuilder<T, I, ORDERED>
{
    type Input = T::Input;

    fn for_type(dtype: &LogicalType, capacity: usize) -> Result<Self, MinframeError> {
        check_type::<crate::typed::registry::Dict<T, I, ORDERED>>(dtype)?;
        let LogicalType::Dictionary { value, .. } = dtype else {
            return Err(MinframeError::BuilderConfiguration(format!(
                "expected a dictionary type, got {dtype}"
            )));
        };
        Ok(Self {
            keys: IntegerArray::with_capacity(capacity, false),
            values: T::Builder::for_type(value, 0)?,
            seen: HashMap::new(),
            _marker: PhantomData,
        })
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn append_value(&mut self, value: T::Input) -> Result<(), MinframeError> {
        let key = T::dict_key(&value);
        let idx = match self.seen.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.seen.len();
                if I::from_index(idx).is_none() {
                    return Err(MinframeError::BuilderConfiguration(format!(
                        "dictionary of {} values overflows {} indices",
                        idx + 1,
                        I::INTEGER_TYPE
                    )));
                }
                self.values.append_value(value)?;
                self.seen.insert(key, idx);
                idx
            }
        };
        match I::from_index(idx) {
            Some(k) => {
                self.keys.push(k);
                Ok(())
            }
            None => Err(MinframeError::BuilderConfiguration(format!(
                "dictionary key {idx} overflows {}",
                I::INTEGER_TYPE
            ))),
        }
    }

    fn append_null(&mut self) -> Result<(), MinframeError> {
        self.keys.push_null();
        Ok(())
    }

    fn finish(self) -> Result<Array, MinframeError> {
        trace!(distinct = self.seen.len(), rows = self.keys.len(); "finishing dictionary builder");
        let indices = I::into_array(self.keys)?;
        let dictionary = self.values.finish()?;
        Ok(Array::from_dictionary(DictionaryArray::new(
            indices, dictionary, ORDERED,
        )?))
    }
}

/// # Builder
///
/// Typed, append-only constructor of an [`Array`] of `T`.
///
/// ```rust
/// use minframe::{Builder, Dict, View};
///
/// let mut b = Builder::<Dict<String, u8>>::new().unwrap();
/// for s in ["a", "b", "a", "c"] {
///     b.append(s).unwrap();
/// }
/// let arr = b.finish().unwrap();
/// let v = View::<Dict<String, u8>>::open(&arr).unwrap();
/// assert_eq!(v.to_vec(), vec![Some("a"), Some("b"), Some("a"), Some("c")]);
/// assert_eq!(v.dictionary().len(), 3);
/// ```
pub struct Builder<T: LogicalTyped> {
    inner: T::Builder,
    poisoned: bool,
}

impl<T: LogicalTyped> Builder<T> {
    /// Builder for `T::logical_type()`.
    pub fn new() -> Result<Self, MinframeError> {
        Self::for_type(&T::logical_type())
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, MinframeError> {
        Self::for_type_with_capacity(&T::logical_type(), capacity)
    }

    /// Builder for a runtime type compatible with `T`, e.g. a struct with real field names.
    pub fn for_type(dtype: &LogicalType) -> Result<Self, MinframeError> {
        Self::for_type_with_capacity(dtype, 0)
    }

    pub fn for_type_with_capacity(
        dtype: &LogicalType,
        capacity: usize,
    ) -> Result<Self, MinframeError> {
        Ok(Self {
            inner: T::Builder::for_type(dtype, capacity)?,
            poisoned: false,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn guard(
        &mut self,
        op: impl FnOnce(&mut T::Builder) -> Result<(), MinframeError>,
    ) -> Result<(), MinframeError> {
        if self.poisoned {
            return Err(poisoned());
        }
        op(&mut self.inner).inspect_err(|e| {
            warn!("builder for {} poisoned: {e}", T::logical_type());
            self.poisoned = true;
        })
    }

    pub fn append(&mut self, value: impl Into<T::Input>) -> Result<(), MinframeError> {
        let value = value.into();
        self.guard(|b| b.append_value(value))
    }

    pub fn append_null(&mut self) -> Result<(), MinframeError> {
        self.guard(|b| b.append_null())
    }

    pub fn append_option(&mut self, value: Option<T::Input>) -> Result<(), MinframeError> {
        match value {
            Some(v) => self.append(v),
            None => self.append_null(),
        }
    }

    /// Appends every value in order; stops at the first failure.
    pub fn extend<X: Into<T::Input>>(
        &mut self,
        values: impl IntoIterator<Item = X>,
    ) -> Result<(), MinframeError> {
        values.into_iter().try_for_each(|v| self.append(v))
    }

    pub fn extend_options<X: Into<T::Input>>(
        &mut self,
        values: impl IntoIterator<Item = Option<X>>,
    ) -> Result<(), MinframeError> {
        values
            .into_iter()
            .try_for_each(|v| self.append_option(v.map(Into::into)))
    }

    /// Consumes the builder and produces a validated array.
    pub fn finish(self) -> Result<Array, MinframeError> {
        if self.poisoned {
            return Err(poisoned());
        }
        self.inner.finish()
    }
}

impl<T: LogicalTyped> Builder<List<T>> {
    /// Appends one list with no null items.
    pub fn append_list<X: Into<T::Input>>(
        &mut self,
        items: impl IntoIterator<Item = X>,
    ) -> Result<(), MinframeError> {
        let items: Vec<Option<T::Input>> = items.into_iter().map(|x| Some(x.into())).collect();
        self.append(items)
    }
}

fn poisoned() -> MinframeError {
    MinframeError::BuilderConfiguration("builder poisoned by an earlier failed append".into())
}
