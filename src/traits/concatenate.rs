//! # Concatenate Trait Module
//!
//! Pairwise concatenation of same-typed values.
//!
//! ## Overview
//! - **Bitmask** + **Bitmask**: bit-level append, any offsets.
//! - **Buffer** + **Buffer**: value append, copy-on-write.
//! - **Array** + **Array**: `bind` of the two chunks, so nested offsets, child spans and
//!   dictionaries follow the same rules as chunk binding.
//!
//! ## Consuming Semantics
//! `concat` consumes both inputs. Clone first if you need to keep one; clones of arrays
//! and buffers are reference-count bumps.
//!
//! ## Example
//! ```rust
//! # use minframe::{Array, IntegerArray, Concatenate};
//! let a = Array::from_int32(IntegerArray::from_slice(&[1, 2, 3]));
//! let b = Array::from_int32(IntegerArray::from_slice(&[4, 5, 6]));
//! let c = a.concat(b).unwrap();
//! assert_eq!(c.len(), 6);
//! ```

use crate::Array;
use crate::enums::error::MinframeError;
use crate::kernels::bind::bind;
use crate::structs::buffer::Buffer;

/// Concatenate trait for combining two instances of the same type.
///
/// # Errors
/// - `TypeMismatchAcrossChunks` when the two sides differ in logical type.
/// - `OffsetOverflow` when a variable-width result no longer fits its offsets.
pub trait Concatenate {
    /// Concatenates `self` with `other`, consuming both.
    fn concat(self, other: Self) -> Result<Self, MinframeError>
    where
        Self: Sized;
}

impl<T: Clone> Concatenate for Buffer<T> {
    fn concat(mut self, other: Self) -> Result<Self, MinframeError> {
        self.extend_from_slice(other.as_slice());
        Ok(self)
    }
}

impl Concatenate for Array {
    fn concat(self, other: Self) -> Result<Self, MinframeError> {
        Ok(bind(&[self, other])?.unwrap_or_default())
    }
}
