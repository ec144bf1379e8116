//! # **BooleanArray Module** - *Bit-packed boolean array*
//!
//! Values and validity are both `Bitmask`s, so slicing is zero-copy at any bit offset.

use crate::enums::error::MinframeError;
use crate::utils::validate_null_mask_len;
use crate::{Bitmask, impl_masked_array};

/// # BooleanArray
///
/// ### Fields
/// - `data`: value bits.
/// - `null_mask`: optional validity bits.
///
/// ## Example
/// ```rust
/// use minframe::BooleanArray;
///
/// let arr = BooleanArray::from_options(&[Some(true), None, Some(false)]);
/// assert_eq!(arr.get(0), Some(true));
/// assert_eq!(arr.get(1), None);
/// ```
#[derive(PartialEq, Clone, Debug, Default)]
pub struct BooleanArray {
    pub data: Bitmask,
    pub null_mask: Option<Bitmask>,
}

impl BooleanArray {
    pub fn new(data: Bitmask, null_mask: Option<Bitmask>) -> Result<Self, MinframeError> {
        validate_null_mask_len(data.len(), &null_mask)?;
        Ok(Self { data, null_mask })
    }

    pub fn from_slice(values: &[bool]) -> Self {
        Self {
            data: Bitmask::from_bools(values),
            null_mask: None,
        }
    }

    pub fn from_options(values: &[Option<bool>]) -> Self {
        let mut out = Self::default();
        for v in values {
            match v {
                Some(v) => out.push(*v),
                None => out.push_null(),
            }
        }
        out
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn push(&mut self, value: bool) {
        self.data.push(value);
        if let Some(m) = self.null_mask.as_mut() {
            m.push(true);
        }
    }

    pub fn push_null(&mut self) {
        let len = self.data.len();
        self.data.push(false);
        self.null_mask
            .get_or_insert_with(|| Bitmask::new_set_all(len, true))
            .push(false);
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<bool> {
        if idx >= self.len() {
            return None;
        }
        match &self.null_mask {
            Some(m) if !m.get(idx) => None,
            _ => Some(self.data.get(idx)),
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
        })
    }
}

impl_masked_array!(BooleanArray);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_and_slice() {
        let arr = BooleanArray::from_options(&[Some(true), None, Some(false), Some(true)]);
        assert_eq!(arr.len(), 4);
        let s = arr.slice(1, 3).unwrap();
        assert_eq!(s.get(0), None);
        assert_eq!(s.get(1), Some(false));
        assert_eq!(s.get(2), Some(true));
    }
}
