//! # Consolidate Trait Module
//!
//! Materialises chunked types into contiguous storage.
//!
//! - **ChunkedArray** -> **Array**: binds all chunks, or yields an empty array of the
//!   column type when there are none.
//! - **Table** -> **Table**: every column becomes a single chunk.
//!
//! ## Example
//! ```rust
//! use minframe::{ChunkedArray, Consolidate, arr_i32};
//!
//! let chunked = ChunkedArray::from_chunks(vec![arr_i32![1, 2], arr_i32![3]]).unwrap();
//! let contiguous = chunked.consolidate().unwrap();
//! assert_eq!(contiguous, arr_i32![1, 2, 3]);
//! ```

use crate::enums::error::MinframeError;

/// Trait for consolidating chunked types into contiguous storage.
///
/// Consolidation binds chunks, so it fails where bind fails: `OffsetOverflow` for
/// oversized variable-width data, `UnsupportedBind` for irreconcilable dictionaries.
pub trait Consolidate {
    /// The type produced after consolidation.
    type Output;

    /// Consumes `self` and returns the consolidated `Output`.
    fn consolidate(self) -> Result<Self::Output, MinframeError>;
}
