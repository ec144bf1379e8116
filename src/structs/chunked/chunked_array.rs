//! # **ChunkedArray** - *One logical column over several chunks*
//!
//! An ordered list of same-typed [`Array`] chunks read as a single column. Chunk lengths
//! may vary; zero-length chunks are allowed.
//!
//! - [`ChunkedArray::consolidate`] binds the chunks into one array, or builds an empty one
//!   when there are none.
//! - [`ChunkedArray::rechunk`] re-partitions into uniform chunks with `split`.
//! - Equality is logical: two chunked arrays are equal when they hold the same values,
//!   however they are chunked.

use log::trace;

use crate::enums::error::MinframeError;
use crate::enums::logical_type::LogicalType;
use crate::kernels::bind::bind;
use crate::kernels::equality::value_eq;
use crate::kernels::split::split;
use crate::traits::consolidate::Consolidate;
use crate::Array;

/// # ChunkedArray
///
/// ## Invariants
/// - Every chunk has logical type `dtype`.
/// - `len` is the sum of chunk lengths.
#[derive(Clone, Debug)]
pub struct ChunkedArray {
    chunks: Vec<Array>,
    dtype: LogicalType,
    len: usize,
}

impl ChunkedArray {
    /// Empty chunked array of `dtype`. Fails with `UnsupportedType` for invalid parameters.
    pub fn new(dtype: LogicalType) -> Result<Self, MinframeError> {
        dtype.validate()?;
        Ok(Self {
            chunks: Vec::new(),
            dtype,
            len: 0,
        })
    }

    /// From at least one chunk; the type comes from the first.
    ///
    /// Fails with `TypeMismatchAcrossChunks` when a later chunk differs, and with
    /// `InvalidArgument` when there are no chunks.
    pub fn from_chunks(chunks: Vec<Array>) -> Result<Self, MinframeError> {
        let Some(first) = chunks.first() else {
            return Err(MinframeError::InvalidArgument(
                "from_chunks needs at least one chunk; use ChunkedArray::new for an empty column"
                    .into(),
            ));
        };
        let mut out = Self::new(first.logical_type())?;
        for chunk in chunks {
            out.push(chunk)?;
        }
        Ok(out)
    }

    /// Appends a chunk after checking its type.
    pub fn push(&mut self, chunk: Array) -> Result<(), MinframeError> {
        let found = chunk.logical_type();
        if found != self.dtype {
            return Err(MinframeError::TypeMismatchAcrossChunks {
                index: self.chunks.len(),
                expected: self.dtype.to_string(),
                found: found.to_string(),
            });
        }
        self.len = self.len.checked_add(chunk.len()).ok_or_else(|| {
            MinframeError::LengthInvariantViolation(format!(
                "chunked length overflows usize after {} chunks",
                self.chunks.len()
            ))
        })?;
        self.chunks.push(chunk);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn n_chunks(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn chunks(&self) -> &[Array] {
        &self.chunks
    }

    #[inline]
    pub fn dtype(&self) -> &LogicalType {
        &self.dtype
    }

    pub fn null_count(&self) -> usize {
        self.chunks.iter().map(Array::null_count).sum()
    }

    /// Maps a global index to `(chunk, local index)`.
    pub fn chunk_of(&self, index: usize) -> Result<(usize, usize), MinframeError> {
        let mut remaining = index;
        for (c, chunk) in self.chunks.iter().enumerate() {
            if remaining < chunk.len() {
                return Ok((c, remaining));
            }
            remaining -= chunk.len();
        }
        Err(MinframeError::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    pub fn is_null(&self, index: usize) -> bool {
        match self.chunk_of(index) {
            Ok((c, i)) => self.chunks[c].is_null(i),
            Err(_) => true,
        }
    }

    /// Zero-copy window over `[offset, offset + len)`, keeping chunk boundaries.
    pub fn slice(&self, offset: usize, len: usize) -> Result<Self, MinframeError> {
        if offset.checked_add(len).is_none_or(|end| end > self.len) {
            return Err(MinframeError::IndexOutOfRange {
                index: offset.saturating_add(len),
                len: self.len,
            });
        }
        let mut out = Self {
            chunks: Vec::new(),
            dtype: self.dtype.clone(),
            len: 0,
        };
        let mut skip = offset;
        let mut take = len;
        for chunk in &self.chunks {
            if take == 0 {
                break;
            }
            if skip >= chunk.len() {
                skip -= chunk.len();
                continue;
            }
            let n = take.min(chunk.len() - skip);
            out.len += n;
            out.chunks.push(chunk.slice(skip, n)?);
            take -= n;
            skip = 0;
        }
        Ok(out)
    }

    /// Uniform chunks of at most `max_len` elements.
    ///
    /// Fails with `InvalidArgument` when `max_len` is zero.
    pub fn rechunk(&self, max_len: usize) -> Result<Self, MinframeError> {
        if max_len == 0 {
            return Err(MinframeError::InvalidArgument(
                "rechunk length must be at least 1".into(),
            ));
        }
        trace!(
            "rechunk: {} chunks of {} into <= {max_len}",
            self.chunks.len(),
            self.dtype
        );
        let whole = self.to_array()?;
        Ok(Self {
            chunks: split(&whole, max_len)?,
            dtype: self.dtype.clone(),
            len: self.len,
        })
    }

    /// Binds into one array without consuming the chunks.
    pub fn to_array(&self) -> Result<Array, MinframeError> {
        match bind(&self.chunks)? {
            Some(array) => Ok(array),
            None => Array::empty(&self.dtype),
        }
    }

    /// Iterates `(chunk, local index)` for every element in order.
    fn positions(&self) -> impl Iterator<Item = (&Array, usize)> + '_ {
        self.chunks
            .iter()
            .flat_map(|c| (0..c.len()).map(move |i| (c, i)))
    }
}

impl Consolidate for ChunkedArray {
    type Output = Array;

    fn consolidate(self) -> Result<Array, MinframeError> {
        self.to_array()
    }
}

impl From<Array> for ChunkedArray {
    fn from(array: Array) -> Self {
        Self {
            dtype: array.logical_type(),
            len: array.len(),
            chunks: vec![array],
        }
    }
}

impl PartialEq for ChunkedArray {
    fn eq(&self, other: &Self) -> bool {
        self.dtype == other.dtype
            && self.len == other.len
            && self
                .positions()
                .zip(other.positions())
                .all(|((a, i), (b, j))| value_eq(a, i, b, j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arr_i32, arr_i32_opt, arr_i64, arr_str};

    fn sample() -> ChunkedArray {
        ChunkedArray::from_chunks(vec![arr_i32![1, 2], arr_i32![], arr_i32![3, 4, 5]]).unwrap()
    }

    #[test]
    fn test_type_checked() {
        let err = ChunkedArray::from_chunks(vec![arr_i32![1], arr_i64![2]]).unwrap_err();
        assert!(matches!(
            err,
            MinframeError::TypeMismatchAcrossChunks { index: 1, .. }
        ));
        assert!(ChunkedArray::from_chunks(vec![]).is_err());
    }

    #[test]
    fn test_chunk_of() {
        let ca = sample();
        assert_eq!(ca.len(), 5);
        assert_eq!(ca.n_chunks(), 3);
        assert_eq!(ca.chunk_of(1).unwrap(), (0, 1));
        assert_eq!(ca.chunk_of(2).unwrap(), (2, 0));
        assert!(ca.chunk_of(5).is_err());
    }

    #[test]
    fn test_consolidate_and_empty_fallback() {
        assert_eq!(sample().consolidate().unwrap(), arr_i32![1, 2, 3, 4, 5]);
        let empty = ChunkedArray::new(LogicalType::String).unwrap();
        assert_eq!(empty.consolidate().unwrap(), arr_str![]);
    }

    #[test]
    fn test_rechunk_and_logical_equality() {
        let ca = sample();
        let re = ca.rechunk(2).unwrap();
        assert_eq!(re.n_chunks(), 3);
        assert_eq!(re, ca);
        assert!(ca.rechunk(0).is_err());
        let other = ChunkedArray::from(arr_i32_opt![Some(1), Some(2), Some(3), Some(4), None]);
        assert_ne!(ca, other);
    }

    #[test]
    fn test_slice_spans_chunks() {
        let s = sample().slice(1, 3).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.to_array().unwrap(), arr_i32![2, 3, 4]);
        assert!(sample().slice(4, 2).is_err());
    }
}
