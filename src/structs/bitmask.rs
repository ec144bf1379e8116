//! # **Bitmask Module** - *Bit-packed validity and boolean storage*
//!
//! Packed bitmask used for null masks on every array and as the value store of `BooleanArray`.
//!
//! ## Behaviour
//! - LSB corresponds to the first logical element; 1 = set/valid, 0 = cleared/null.
//! - Carries a bit `offset`, so [`Bitmask::slice`] is zero-copy at any bit position.
//! - The byte buffer always covers exactly `ceil((offset + len) / 8)` bytes.
//! - Mutation first normalises to offset 0 on an unshared buffer.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::enums::error::MinframeError;
use crate::structs::buffer::Buffer;
use crate::traits::concatenate::Concatenate;

/// # Bitmask
///
/// Packed bitmask with a zero-copy bit window.
///
/// ### Fields
/// - `bits`: byte storage, shared between slices.
/// - `offset`: bit position of the first logical element within `bits`.
/// - `len`: number of logical bits.
///
/// # Example
/// ```rust
/// use minframe::Bitmask;
///
/// let mut m = Bitmask::new_set_all(10, false);
/// m.set(3, true);
/// let w = m.slice(2, 4).unwrap();
/// assert!(w.get(1));
/// assert_eq!(w.count_ones(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Bitmask {
    pub bits: Buffer<u8>,
    pub offset: usize,
    pub len: usize,
}

#[inline]
fn bytes_for(bits: usize) -> usize {
    bits.div_ceil(8)
}

impl Bitmask {
    /// Mask of `len` bits, all set or all cleared.
    pub fn new_set_all(len: usize, set: bool) -> Self {
        let fill = if set { 0xFF } else { 0 };
        let mut bytes = vec![fill; bytes_for(len)];
        if set && len % 8 != 0 {
            if let Some(last) = bytes.last_mut() {
                *last = (1u8 << (len % 8)) - 1;
            }
        }
        Self {
            bits: Buffer::from(bytes),
            offset: 0,
            len,
        }
    }

    /// Empty mask with room for `cap` bits.
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            bits: Buffer::with_capacity(bytes_for(cap)),
            offset: 0,
            len: 0,
        }
    }

    /// Packs a slice of booleans.
    pub fn from_bools(values: &[bool]) -> Self {
        let mut m = Self::with_capacity(values.len());
        for &v in values {
            m.push(v);
        }
        m
    }

    /// Wraps packed bytes; fails if `bytes` is too short for `len` bits.
    pub fn from_bytes(bytes: &[u8], len: usize) -> Result<Self, MinframeError> {
        let needed = bytes_for(len);
        if bytes.len() < needed {
            return Err(MinframeError::LengthInvariantViolation(format!(
                "bitmask of {len} bits needs {needed} bytes, got {}",
                bytes.len()
            )));
        }
        let mut out = bytes[..needed].to_vec();
        if len % 8 != 0 {
            if let Some(last) = out.last_mut() {
                *last &= (1u8 << (len % 8)) - 1;
            }
        }
        Ok(Self {
            bits: Buffer::from(out),
            offset: 0,
            len,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit at logical position `idx`. `idx` must be `< len`.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len, "bitmask index {idx} out of bounds {}", self.len);
        let pos = self.offset + idx;
        (self.bits[pos >> 3] >> (pos & 7)) & 1 == 1
    }

    /// Bounds-checked [`Bitmask::get`].
    pub fn try_get(&self, idx: usize) -> Result<bool, MinframeError> {
        if idx >= self.len {
            return Err(MinframeError::IndexOutOfRange {
                index: idx,
                len: self.len,
            });
        }
        Ok(self.get(idx))
    }

    /// Sets bit `idx`, detaching from shared storage. `idx` must be `< len`.
    pub fn set(&mut self, idx: usize, value: bool) {
        assert!(idx < self.len, "bitmask index {idx} out of bounds {}", self.len);
        self.normalise();
        let mut bytes = self.bits.to_vec64();
        write_bit(&mut bytes, idx, value);
        self.bits = Buffer::from_vec64(bytes);
    }

    /// Appends one bit.
    pub fn push(&mut self, value: bool) {
        self.normalise();
        if self.len % 8 == 0 {
            self.bits.push(value as u8);
        } else {
            let mut bytes = self.bits.to_vec64();
            write_bit(&mut bytes, self.len, value);
            self.bits = Buffer::from_vec64(bytes);
        }
        self.len += 1;
    }

    /// Appends `n` copies of `value`.
    pub fn extend_constant(&mut self, value: bool, n: usize) {
        if n == 0 {
            return;
        }
        self.normalise();
        let mut bytes = self.bits.to_vec64();
        bytes.resize(bytes_for(self.len + n), 0);
        for i in self.len..self.len + n {
            write_bit(&mut bytes, i, value);
        }
        self.bits = Buffer::from_vec64(bytes);
        self.len += n;
    }

    /// Appends every bit of `other`, whatever its offset.
    pub fn extend_from_bitmask(&mut self, other: &Bitmask) {
        if other.len == 0 {
            return;
        }
        self.normalise();
        let mut bytes = self.bits.to_vec64();
        if self.len % 8 == 0 && other.offset % 8 == 0 {
            // Byte-aligned on both sides: copy whole bytes, then clear the tail.
            let start = other.offset >> 3;
            bytes.extend_from_slice(&other.bits[start..start + bytes_for(other.len)]);
            let total = self.len + other.len;
            if total % 8 != 0 {
                if let Some(last) = bytes.last_mut() {
                    *last &= (1u8 << (total % 8)) - 1;
                }
            }
        } else {
            bytes.resize(bytes_for(self.len + other.len), 0);
            for i in 0..other.len {
                write_bit(&mut bytes, self.len + i, other.get(i));
            }
        }
        self.bits = Buffer::from_vec64(bytes);
        self.len += other.len;
    }

    /// Zero-copy window of `len` bits starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
        match offset.checked_add(len) {
            Some(end) if end <= self.len => {
                let abs = self.offset + offset;
                let first_byte = abs >> 3;
                let bit_offset = abs & 7;
                let n_bytes = bytes_for(bit_offset + len);
                Ok(Self {
                    bits: self.bits.slice(first_byte, n_bytes)?,
                    offset: bit_offset,
                    len,
                })
            }
            _ => Err(MinframeError::IndexOutOfRange {
                index: offset.saturating_add(len),
                len: self.len,
            }),
        }
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        if self.offset == 0 {
            let full = self.len >> 3;
            let mut n: usize = self.bits[..full].iter().map(|b| b.count_ones() as usize).sum();
            for i in full * 8..self.len {
                n += self.get(i) as usize;
            }
            n
        } else {
            self.iter().filter(|b| *b).count()
        }
    }

    /// Number of cleared bits, i.e. nulls when used as a validity mask.
    #[inline]
    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    #[inline]
    pub fn null_count(&self) -> usize {
        self.count_zeros()
    }

    #[inline]
    pub fn all_set(&self) -> bool {
        self.count_ones() == self.len
    }

    /// Iterates the logical bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.get(i))
    }

    /// Packed bytes with the first logical bit at bit 0, trailing bits cleared.
    pub fn to_aligned_bytes(&self) -> Vec<u8> {
        if self.offset == 0 {
            let mut out = self.bits[..bytes_for(self.len)].to_vec();
            if self.len % 8 != 0 {
                if let Some(last) = out.last_mut() {
                    *last &= (1u8 << (self.len % 8)) - 1;
                }
            }
            return out;
        }
        let mut out = vec![0u8; bytes_for(self.len)];
        for i in 0..self.len {
            write_bit(&mut out, i, self.get(i));
        }
        out
    }

    /// Rewrites the window to start at bit 0 on its own allocation, if needed.
    fn normalise(&mut self) {
        if self.offset != 0 {
            self.bits = Buffer::from(self.to_aligned_bytes());
            self.offset = 0;
        }
    }
}

#[inline]
fn write_bit(bytes: &mut [u8], idx: usize, value: bool) {
    let mask = 1u8 << (idx & 7);
    if value {
        bytes[idx >> 3] |= mask;
    } else {
        bytes[idx >> 3] &= !mask;
    }
}

impl PartialEq for Bitmask {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Debug for Bitmask {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "Bitmask[")?;
        for b in self.iter() {
            f.write_str(if b { "1" } else { "0" })?;
        }
        write!(f, "]")
    }
}

impl Concatenate for Bitmask {
    fn concat(mut self, other: Self) -> Result<Self, MinframeError> {
        self.extend_from_bitmask(&other);
        Ok(self)
    }
}

/// Concatenates the validity of consecutive parts given as `(len, mask)`.
///
/// Returns `None` when no part carries a mask. Otherwise absent masks are
/// materialised as all-valid runs of their part's length.
pub(crate) fn concat_validity<'a>(
    parts: impl IntoIterator<Item = (usize, Option<&'a Bitmask>)> + Clone,
) -> Option<Bitmask> {
    if parts.clone().into_iter().all(|(_, m)| m.is_none()) {
        return None;
    }
    let total: usize = parts.clone().into_iter().map(|(len, _)| len).sum();
    let mut out = Bitmask::with_capacity(total);
    for (len, mask) in parts {
        match mask {
            Some(m) => out.extend_from_bitmask(m),
            None => out.extend_constant(true, len),
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_set_all_masks_tail() {
        let m = Bitmask::new_set_all(10, true);
        assert_eq!(m.bits.len(), 2);
        assert_eq!(m.bits[1], 0b0000_0011);
        assert!(m.all_set());
        assert_eq!(Bitmask::new_set_all(10, false).count_zeros(), 10);
    }

    #[test]
    fn test_push_get_set() {
        let mut m = Bitmask::from_bools(&[true, false, true]);
        assert!(m.get(0) && !m.get(1) && m.get(2));
        m.set(1, true);
        assert!(m.get(1));
        m.push(false);
        assert_eq!(m.len(), 4);
        assert!(!m.get(3));
        assert_eq!(m.count_ones(), 3);
    }

    #[test]
    fn test_slice_is_zero_copy_at_bit_offsets() {
        let bools: Vec<bool> = (0..20).map(|i| i % 3 == 0).collect();
        let m = Bitmask::from_bools(&bools);
        let s = m.slice(5, 9).unwrap();
        assert!(s.bits.shares_storage(&m.bits));
        assert_eq!(s.offset, 5);
        for i in 0..9 {
            assert_eq!(s.get(i), bools[5 + i]);
        }
        let s2 = s.slice(4, 3).unwrap();
        for i in 0..3 {
            assert_eq!(s2.get(i), bools[9 + i]);
        }
        assert!(m.slice(15, 6).is_err());
    }

    #[test]
    fn test_mutating_slice_leaves_parent() {
        let m = Bitmask::new_set_all(16, true);
        let mut s = m.slice(3, 5).unwrap();
        s.set(0, false);
        s.push(false);
        assert!(m.all_set());
        assert_eq!(s.len(), 6);
        assert!(!s.get(0) && s.get(1) && !s.get(5));
    }

    #[test]
    fn test_extend_unaligned_and_aligned() {
        let a = Bitmask::from_bools(&[true, false, true, true, false, true, false, false]);
        let b = Bitmask::from_bools(&[false, true, true]);
        let mut c = a.clone();
        c.extend_from_bitmask(&b);
        assert_eq!(c.len(), 11);
        assert_eq!(
            c.iter().collect::<Vec<_>>(),
            vec![true, false, true, true, false, true, false, false, false, true, true]
        );

        let mut d = Bitmask::from_bools(&[true]);
        d.extend_from_bitmask(&a.slice(1, 4).unwrap());
        assert_eq!(
            d.iter().collect::<Vec<_>>(),
            vec![true, false, true, true, false]
        );
    }

    #[test]
    fn test_concat_validity_materialises_absent() {
        let a = Bitmask::from_bools(&[true, false]);
        let out = concat_validity([(2, Some(&a)), (1, None), (0, None)]).unwrap();
        assert_eq!(out.iter().collect::<Vec<_>>(), vec![true, false, true]);
        assert!(concat_validity([(2, None), (3, None)]).is_none());
    }

    #[test]
    fn test_aligned_bytes_and_equality() {
        let m = Bitmask::from_bools(&[false, true, true, false, true, true, true, false, true]);
        let s = m.slice(1, 8).unwrap();
        assert_eq!(s.to_aligned_bytes(), vec![0b1011_1011]);
        let rebuilt = Bitmask::from_bytes(&s.to_aligned_bytes(), 8).unwrap();
        assert_eq!(rebuilt, s);
        assert!(Bitmask::from_bytes(&[0], 9).is_err());
    }

    #[test]
    fn test_concatenate_trait() {
        let a = Bitmask::from_bools(&[true]);
        let b = Bitmask::from_bools(&[false, true]);
        let c = a.concat(b).unwrap();
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![true, false, true]);
    }
}
