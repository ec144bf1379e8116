//! # DecimalArray Module - *Fixed-point 128-bit decimals*
//!
//! Unscaled `i128` values with a declared precision and scale. A value `v` represents
//! `v * 10^-scale`; its absolute unscaled value is below `10^precision`.

use crate::enums::error::MinframeError;
use crate::utils::validate_null_mask_len;
use crate::{Bitmask, Buffer, impl_masked_array};

/// # DecimalArray
///
/// ### Fields
/// - `data`: unscaled values.
/// - `null_mask`: optional validity bitmap.
/// - `precision`, `scale`: the `Decimal128` parameters.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct DecimalArray {
    pub data: Buffer<i128>,
    pub null_mask: Option<Bitmask>,
    pub precision: u8,
    pub scale: i8,
}

/// `10^precision`, the exclusive bound on unscaled magnitudes.
#[inline]
pub(crate) fn decimal_bound(precision: u8) -> i128 {
    10i128.pow(precision.min(38) as u32)
}

impl DecimalArray {
    /// Constructs and checks every valid value against `precision`.
    pub fn new(
        data: impl Into<Buffer<i128>>,
        null_mask: Option<Bitmask>,
        precision: u8,
        scale: i8,
    ) -> Result<Self, MinframeError> {
        let data = data.into();
        validate_null_mask_len(data.len(), &null_mask)?;
        let arr = Self {
            data,
            null_mask,
            precision,
            scale,
        };
        let bound = decimal_bound(precision);
        for i in 0..arr.len() {
            if let Some(v) = arr.get(i) {
                if v.unsigned_abs() >= bound.unsigned_abs() {
                    return Err(MinframeError::LengthInvariantViolation(format!(
                        "decimal value {v} at {i} exceeds precision {precision}"
                    )));
                }
            }
        }
        Ok(arr)
    }

    /// Empty decimal array.
    pub fn empty(precision: u8, scale: i8) -> Self {
        Self {
            data: Buffer::new(),
            null_mask: None,
            precision,
            scale,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Appends an unscaled value; fails with `BuilderConfiguration` past the precision.
    pub fn push(&mut self, value: i128) -> Result<(), MinframeError> {
        if value.unsigned_abs() >= decimal_bound(self.precision).unsigned_abs() {
            return Err(MinframeError::BuilderConfiguration(format!(
                "decimal value {value} exceeds precision {}",
                self.precision
            )));
        }
        self.data.push(value);
        if let Some(m) = self.null_mask.as_mut() {
            m.push(true);
        }
        Ok(())
    }

    pub fn push_null(&mut self) {
        let len = self.len();
        self.data.push(0);
        self.null_mask
            .get_or_insert_with(|| Bitmask::new_set_all(len, true))
            .push(false);
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<i128> {
        if idx >= self.data.len() {
            return None;
        }
        match &self.null_mask {
            Some(m) if !m.get(idx) => None,
            _ => Some(self.data[idx]),
        }
    }

    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
        Ok(Self {
            data: self.data.slice(offset, len)?,
            null_mask: self
                .null_mask
                .as_ref()
                .map(|m| m.slice(offset, len))
                .transpose()?,
            precision: self.precision,
            scale: self.scale,
        })
    }
}

impl_masked_array!(DecimalArray);
