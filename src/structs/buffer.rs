//! # **Buffer Module** - *Reference-counted, windowed value storage*
//!
//! Buffer backs every fixed-width payload in *Minframe* (`IntegerArray`, `FloatArray`,
//! `DatetimeArray`, `DecimalArray`, string offsets and bytes, and `Bitmask` bits).
//!
//! ## Design
//! - Storage is a 64-byte aligned [`Vec64<T>`] held behind an `Arc`, plus an `(offset, len)` window.
//! - Cloning and [`Buffer::slice`] share the allocation, so splitting arrays never copies values.
//! - Mutation is copy-on-write: a buffer that is shared, or that only windows part of its
//!   allocation, is first materialised into a fresh owned allocation.
//!
//! ## Behaviour
//! - Read access derefs to `&[T]` regardless of sharing.
//! - Finished arrays are immutable in practice because they sit behind `Arc` in [`Array`](crate::Array).
//!   Any mutating call on a shared buffer detaches it and leaves other holders untouched.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use vec64::Vec64;

use crate::enums::error::MinframeError;

/// # Buffer
///
/// Shared, windowed storage for fixed-width values.
///
/// ### Fields
/// - `owner`: the reference-counted allocation.
/// - `offset`: first element of the window within `owner`.
/// - `len`: number of elements in the window.
pub struct Buffer<T> {
    owner: Arc<Vec64<T>>,
    offset: usize,
    len: usize,
}

impl<T> Buffer<T> {
    /// Constructs a new, empty buffer.
    #[inline]
    pub fn new() -> Self {
        Self::from_vec64(Vec64::new())
    }

    /// Constructs an empty buffer with room for `cap` elements.
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        Self::from_vec64(Vec64::with_capacity(cap))
    }

    /// Wraps an owned `Vec64` without copying.
    #[inline]
    pub fn from_vec64(v: Vec64<T>) -> Self {
        let len = v.len();
        Self {
            owner: Arc::new(v),
            offset: 0,
            len,
        }
    }

    /// Number of elements in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrows the windowed elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.owner[self.offset..self.offset + self.len]
    }

    /// Zero-copy window of `len` elements starting at `offset`, relative to this buffer.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
        match offset.checked_add(len) {
            Some(end) if end <= self.len => Ok(Self {
                owner: Arc::clone(&self.owner),
                offset: self.offset + offset,
                len,
            }),
            _ => Err(MinframeError::IndexOutOfRange {
                index: offset.saturating_add(len),
                len: self.len,
            }),
        }
    }

    /// True when both buffers window the same allocation.
    #[inline]
    pub fn shares_storage(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.owner, &other.owner)
    }

    /// True when the allocation has other holders.
    #[inline]
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.owner) > 1
    }
}

impl<T: Clone> Buffer<T> {
    /// Copies `slice` into a new owned buffer.
    #[inline]
    pub fn from_slice(slice: &[T]) -> Self {
        Self::from_vec64(copy_to_vec64(slice))
    }

    /// Appends one element, detaching from shared storage first.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.make_owned_mut().push(value);
        self.len += 1;
    }

    /// Appends all elements of `values`, detaching from shared storage first.
    #[inline]
    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.make_owned_mut().extend_from_slice(values);
        self.len += values.len();
    }

    /// Copies the window out into an owned `Vec64`.
    pub fn to_vec64(&self) -> Vec64<T> {
        copy_to_vec64(self.as_slice())
    }

    /// Returns exclusive access to a `Vec64` covering exactly this window.
    ///
    /// Partial windows and shared allocations are copied first.
    fn make_owned_mut(&mut self) -> &mut Vec64<T> {
        if self.offset != 0 || self.len != self.owner.len() {
            self.owner = Arc::new(copy_to_vec64(self.as_slice()));
            self.offset = 0;
        }
        Arc::make_mut(&mut self.owner)
    }
}

impl<T> Clone for Buffer<T> {
    fn clone(&self) -> Self {
        Self {
            owner: Arc::clone(&self.owner),
            offset: self.offset,
            len: self.len,
        }
    }
}

impl<T> Default for Buffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for Buffer<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for Buffer<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: PartialEq> PartialEq for Buffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for Buffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T> From<Vec64<T>> for Buffer<T> {
    fn from(v: Vec64<T>) -> Self {
        Self::from_vec64(v)
    }
}

impl<T> From<Vec<T>> for Buffer<T> {
    fn from(v: Vec<T>) -> Self {
        Self::from_vec64(Vec64::from(v))
    }
}

impl<T: Clone> From<&[T]> for Buffer<T> {
    fn from(s: &[T]) -> Self {
        Self::from_slice(s)
    }
}

impl<T> FromIterator<T> for Buffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

#[inline]
fn copy_to_vec64<T: Clone>(slice: &[T]) -> Vec64<T> {
    let mut v = Vec64::with_capacity(slice.len());
    v.extend_from_slice(slice);
    v
}

/// Allocates a `Vec` of exactly `cap` elements, reporting allocator failure instead of aborting.
pub(crate) fn try_alloc<T>(cap: usize) -> Result<Vec<T>, MinframeError> {
    let mut v = Vec::new();
    v.try_reserve_exact(cap).map_err(|e| {
        MinframeError::ResourceExhausted(format!("cannot allocate {cap} elements: {e}"))
    })?;
    Ok(v)
}
