//! # FixedSizeBinaryArray Module - *Opaque fixed-width values*
//!
//! Each element is exactly `width` bytes; element `i` occupies `data[i*width..(i+1)*width]`.

use crate::enums::error::MinframeError;
use crate::utils::validate_null_mask_len;
use crate::{Bitmask, Buffer, impl_masked_array};

/// # FixedSizeBinaryArray
///
/// ### Fields
/// - `data`: `len * width` bytes.
/// - `null_mask`: optional validity bitmap.
/// - `width`: bytes per element, at least 1.
#[derive(PartialEq, Clone, Debug)]
pub struct FixedSizeBinaryArray {
    pub data: Buffer<u8>,
    pub null_mask: Option<Bitmask>,
    pub width: usize,
}

impl FixedSizeBinaryArray {
    pub fn new(
        data: impl Into<Buffer<u8>>,
        null_mask: Option<Bitmask>,
        width: usize,
    ) -> Result<Self, MinframeError> {
        let data = data.into();
        if width == 0 {
            return Err(MinframeError::UnsupportedType(
                "fixed size binary width must be positive".into(),
            ));
        }
        if data.len() % width != 0 {
            return Err(MinframeError::LengthInvariantViolation(format!(
                "{} bytes is not a multiple of width {width}",
                data.len()
            )));
        }
        validate_null_mask_len(data.len() / width, &null_mask)?;
        Ok(Self {
            data,
            null_mask,
            width,
        })
    }

    /// Empty array of `width`-byte elements.
    pub fn empty(width: usize) -> Self {
        Self {
            data: Buffer::new(),
            null_mask: None,
            width,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        if self.width == 0 { 0 } else { self.data.len() / self.width }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends one value; fails when `value` is not exactly `width` bytes.
    pub fn push(&mut self, value: &[u8]) -> Result<(), MinframeError> {
        if value.len() != self.width {
            return Err(MinframeError::BuilderConfiguration(format!(
                "value of {} bytes does not match width {}",
                value.len(),
                self.width
            )));
        }
        self.data.extend_from_slice(value);
        if let Some(m) = self.null_mask.as_mut() {
            m.push(true);
        }
        Ok(())
    }

    pub fn push_null(&mut self) {
        let len = self.len();
        self.data.extend_from_slice(&vec![0u8; self.width]);
        self.null_mask
            .get_or_insert_with(|| Bitmask::new_set_all(len, true))
            .push(false);
    }

    /// Bytes of element `idx` regardless of validity. `idx` must be `< len`.
    #[inline]
    pub fn value(&self, idx: usize) -> &[u8] {
        &self.data[idx * self.width..(idx + 1) * self.width]
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&[u8]> {
        if idx >= self.len() {
            return None;
        }
        match &self.null_mask {
            Some(m) if !m.get(idx) => None,
            _ => Some(self.value(idx)),
        }
    }

    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
        if offset.checked_add(len).is_none_or(|end| end > self.len()) {
            return Err(MinframeError::IndexOutOfRange {
                index: offset.saturating_add(len),
                len: self.len(),
            });
        }
        Ok(Self {
            data: self.data.slice(offset * self.width, len * self.width)?,
            null_mask: self
                .null_mask
                .as_ref()
                .map(|m| m.slice(offset, len))
                .transpose()?,
            width: self.width,
        })
    }
}

impl_masked_array!(FixedSizeBinaryArray);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_checks() {
        assert!(FixedSizeBinaryArray::new(vec![1u8, 2, 3], None, 2).is_err());
        assert!(FixedSizeBinaryArray::new(vec![1u8, 2], None, 0).is_err());
        let mut arr = FixedSizeBinaryArray::empty(2);
        arr.push(&[1, 2]).unwrap();
        arr.push_null();
        assert!(arr.push(&[1]).is_err());
        assert_eq!(arr.len(), 2);
        assert_eq!(arr.get(0), Some(&[1u8, 2][..]));
        assert_eq!(arr.get(1), None);
    }

    #[test]
    fn test_slice() {
        let arr = FixedSizeBinaryArray::new(vec![1u8, 2, 3, 4, 5, 6], None, 2).unwrap();
        let s = arr.slice(1, 2).unwrap();
        assert_eq!(s.get(0), Some(&[3u8, 4][..]));
        assert_eq!(s.get(1), Some(&[5u8, 6][..]));
        assert!(arr.slice(2, 2).is_err());
    }
}
