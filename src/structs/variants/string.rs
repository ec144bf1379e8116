//! # **StringArray & BinaryArray Module** - *Variable-width byte arrays*
//!
//! ## Overview
//! - `StringArray`: UTF-8 text. `BinaryArray`: arbitrary bytes.
//! - Layout: `offsets` (`len + 1` non-decreasing `u32`) delimiting elements within `data`.
//! - Slicing windows the offsets and shares `data` whole, so `offsets[0]` need not be zero.
//!   Consumers that copy out (bind, wire) read only the referenced span
//!   `data[offsets[0]..offsets[len]]`.

use crate::enums::error::MinframeError;
use crate::utils::{OFFSET_LIMIT, to_offset, validate_null_mask_len, validate_offsets};
use crate::{Bitmask, Buffer, impl_masked_array};

macro_rules! impl_var_width_common {
    ($array:ident) => {
        impl $array {
            /// Empty array with room for `cap` elements and `bytes` bytes.
            pub fn with_capacity(cap: usize, bytes: usize, null_mask: bool) -> Self {
                let mut offsets = Buffer::with_capacity(cap + 1);
                offsets.push(0u32);
                Self {
                    offsets,
                    data: Buffer::with_capacity(bytes),
                    null_mask: null_mask.then(|| Bitmask::with_capacity(cap)),
                }
            }

            #[inline]
            pub fn len(&self) -> usize {
                self.offsets.len() - 1
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            /// Offsets buffer (`len + 1` entries).
            #[inline]
            pub fn offsets(&self) -> &Buffer<u32> {
                &self.offsets
            }

            /// Shared value bytes, including any span outside this window.
            #[inline]
            pub fn data(&self) -> &Buffer<u8> {
                &self.data
            }

            /// Byte range `[start, end)` within `data` referenced by this array.
            #[inline]
            pub fn span(&self) -> (usize, usize) {
                (self.offsets[0] as usize, self.offsets[self.len()] as usize)
            }

            /// Raw bytes of element `idx` regardless of validity. `idx` must be `< len`.
            #[inline]
            pub fn value_bytes(&self, idx: usize) -> &[u8] {
                &self.data[self.offsets[idx] as usize..self.offsets[idx + 1] as usize]
            }

            /// Appends a null, creating the mask on first use.
            pub fn push_null(&mut self) {
                let len = self.len();
                let end = self.offsets[len];
                self.offsets.push(end);
                self.null_mask
                    .get_or_insert_with(|| Bitmask::new_set_all(len, true))
                    .push(false);
            }

            fn push_raw(&mut self, bytes: &[u8]) -> Result<(), MinframeError> {
                let end = to_offset(self.offsets[self.len()] as u64 + bytes.len() as u64)?;
                self.append_within_limit(bytes, end);
                Ok(())
            }

            /// Appends `bytes` ending at offset `end`, which the caller has range-checked.
            fn append_within_limit(&mut self, bytes: &[u8], end: u32) {
                let (start, stop) = self.span();
                let mut end = end;
                // Values must land directly after the current span.
                if self.data.len() != stop {
                    self.data = Buffer::from_slice(&self.data[start..stop]);
                    let base = start as u32;
                    let rebased: Vec<u32> = self.offsets.iter().map(|o| o - base).collect();
                    self.offsets = Buffer::from(rebased);
                    end -= base;
                }
                self.data.extend_from_slice(bytes);
                self.offsets.push(end);
                if let Some(m) = self.null_mask.as_mut() {
                    m.push(true);
                }
            }

            /// Zero-copy window of `len` elements from `offset`.
            pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
                if offset.checked_add(len).is_none_or(|end| end > self.len()) {
                    return Err(MinframeError::IndexOutOfRange {
                        index: offset.saturating_add(len),
                        len: self.len(),
                    });
                }
                Ok(Self {
                    offsets: self.offsets.slice(offset, len + 1)?,
                    data: self.data.clone(),
                    null_mask: self
                        .null_mask
                        .as_ref()
                        .map(|m| m.slice(offset, len))
                        .transpose()?,
                })
            }
        }

        impl Default for $array {
            fn default() -> Self {
                Self::with_capacity(0, 0, false)
            }
        }

        impl_masked_array!($array);
    };
}

/// # StringArray
///
/// UTF-8 encoded, variable-length string array with 32-bit offsets.
///
/// ### Fields
/// - `offsets`: the i-th string is `data[offsets[i]..offsets[i+1]]`.
/// - `data`: concatenated UTF-8 bytes.
/// - `null_mask`: optional validity bitmap.
///
/// Every element is valid UTF-8; constructors check it.
///
/// ## Example
/// ```rust
/// use minframe::StringArray;
///
/// let arr = StringArray::from_slice(&["alpha", "beta"]);
/// assert_eq!(arr.get_str(1), Some("beta"));
/// ```
#[derive(PartialEq, Clone, Debug)]
pub struct StringArray {
    offsets: Buffer<u32>,
    data: Buffer<u8>,
    pub null_mask: Option<Bitmask>,
}

impl_var_width_common!(StringArray);

impl StringArray {
    /// Constructs from raw parts, checking offsets, mask length, and UTF-8 per element.
    pub fn new(
        data: impl Into<Buffer<u8>>,
        null_mask: Option<Bitmask>,
        offsets: impl Into<Buffer<u32>>,
    ) -> Result<Self, MinframeError> {
        let data = data.into();
        let offsets = offsets.into();
        let len = validate_offsets(&offsets, data.len())?;
        validate_null_mask_len(len, &null_mask)?;
        for i in 0..len {
            let bytes = &data[offsets[i] as usize..offsets[i + 1] as usize];
            if std::str::from_utf8(bytes).is_err() {
                return Err(MinframeError::LengthInvariantViolation(format!(
                    "element {i} is not valid UTF-8"
                )));
            }
        }
        Ok(Self {
            offsets,
            data,
            null_mask,
        })
    }

    /// Dense array from string slices.
    ///
    /// # Panics
    /// If the combined byte length exceeds the 32-bit offset range.
    pub fn from_slice(values: &[&str]) -> Self {
        Self::from_options(&values.iter().map(|s| Some(*s)).collect::<Vec<_>>())
    }

    /// Nullable array from optional string slices.
    ///
    /// # Panics
    /// If the combined byte length exceeds the 32-bit offset range.
    pub fn from_options(values: &[Option<&str>]) -> Self {
        let total: u64 = values.iter().flatten().map(|s| s.len() as u64).sum();
        assert!(
            total <= OFFSET_LIMIT,
            "{total} bytes exceed the 32-bit offset range"
        );
        let has_nulls = values.iter().any(|v| v.is_none());
        let mut out = Self::with_capacity(values.len(), total as usize, has_nulls);
        let mut end = 0u32;
        for v in values {
            match v {
                Some(s) => {
                    end += s.len() as u32;
                    out.append_within_limit(s.as_bytes(), end);
                }
                None => out.push_null(),
            }
        }
        out
    }

    /// Appends one string. Fails with `OffsetOverflow` past the 32-bit limit.
    pub fn push_str(&mut self, s: &str) -> Result<(), MinframeError> {
        self.push_raw(s.as_bytes())
    }

    /// String at `idx` regardless of validity. `idx` must be `< len`.
    #[inline]
    pub fn value(&self, idx: usize) -> &str {
        // SAFETY: fields are private and every constructor and push path checks UTF-8
        // per element, so each delimited range is valid UTF-8.
        unsafe { std::str::from_utf8_unchecked(self.value_bytes(idx)) }
    }

    /// String at `idx`, or `None` when null or out of range.
    #[inline]
    pub fn get_str(&self, idx: usize) -> Option<&str> {
        if idx >= self.len() {
            return None;
        }
        match &self.null_mask {
            Some(m) if !m.get(idx) => None,
            _ => Some(self.value(idx)),
        }
    }

    pub fn iter_str_opt(&self) -> impl Iterator<Item = Option<&str>> + '_ {
        (0..self.len()).map(move |i| self.get_str(i))
    }
}

/// # BinaryArray
///
/// Variable-length byte array with 32-bit offsets. Same layout as [`StringArray`],
/// without the UTF-8 requirement.
#[derive(PartialEq, Clone, Debug)]
pub struct BinaryArray {
    offsets: Buffer<u32>,
    data: Buffer<u8>,
    pub null_mask: Option<Bitmask>,
}

impl_var_width_common!(BinaryArray);

impl BinaryArray {
    /// Constructs from raw parts, checking offsets and mask length.
    pub fn new(
        data: impl Into<Buffer<u8>>,
        null_mask: Option<Bitmask>,
        offsets: impl Into<Buffer<u32>>,
    ) -> Result<Self, MinframeError> {
        let data = data.into();
        let offsets = offsets.into();
        let len = validate_offsets(&offsets, data.len())?;
        validate_null_mask_len(len, &null_mask)?;
        Ok(Self {
            offsets,
            data,
            null_mask,
        })
    }

    pub fn from_options(values: &[Option<&[u8]>]) -> Result<Self, MinframeError> {
        let mut out = Self::with_capacity(values.len(), 0, true);
        for v in values {
            match v {
                Some(b) => out.push_bytes(b)?,
                None => out.push_null(),
            }
        }
        Ok(out)
    }

    /// Appends one value. Fails with `OffsetOverflow` past the 32-bit limit.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), MinframeError> {
        self.push_raw(bytes)
    }

    /// Bytes at `idx`, or `None` when null or out of range.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&[u8]> {
        if idx >= self.len() {
            return None;
        }
        match &self.null_mask {
            Some(m) if !m.get(idx) => None,
            _ => Some(self.value_bytes(idx)),
        }
    }
}
