//! # **Error Module** - *Crate-wide error type*
//!
//! Every fallible operation in *Minframe* returns [`MinframeError`]. No component swallows
//! an error or substitutes a default; the in-progress operation aborts with no partial output.

use thiserror::Error;

/// # MinframeError
///
/// Unified error for casting, viewing, building, binding, splitting, and wire decoding.
///
/// ### Variants
/// - `TypeMismatch`: a typed access disagrees with the runtime type, at any nesting depth.
/// - `UnsupportedType`: a type outside the supported set, or with invalid parameters.
/// - `BuilderConfiguration`: a builder is missing or cannot be configured for its type,
///   or an append violates the configured type.
/// - `LengthInvariantViolation`: lengths, offsets, or dictionary indices are inconsistent.
/// - `TypeMismatchAcrossChunks`: chunks handed to bind disagree on type.
/// - `OffsetOverflow`: a variable-width span exceeds the 32-bit offset range.
/// - `InvalidArgument`: e.g. a zero chunk length.
/// - `IndexOutOfRange`: access past the end of an array, view, or column.
/// - `ResourceExhausted`: allocation failure.
/// - `UnsupportedBind`: dictionary chunks that cannot be reconciled.
/// - `Wire`: malformed or truncated serialized input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MinframeError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Builder configuration error: {0}")]
    BuilderConfiguration(String),

    #[error("Length invariant violation: {0}")]
    LengthInvariantViolation(String),

    #[error("Type mismatch across chunks: chunk {index} is {found}, expected {expected}")]
    TypeMismatchAcrossChunks {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("Offset overflow: span of {required} exceeds offset limit {limit}")]
    OffsetOverflow { required: u64, limit: u64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    #[error("Unsupported bind: {0}")]
    UnsupportedBind(String),

    #[error("Wire format error: {0}")]
    Wire(String),
}

impl MinframeError {
    /// Convenience for type mismatches between any two displayable types.
    pub fn type_mismatch(expected: impl ToString, found: impl ToString) -> Self {
        MinframeError::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}
