//! # **Utils** - *Shared validation helpers*
//!
//! Invariant checks used by every inner array constructor, the builders, and the wire reader.

use crate::enums::error::MinframeError;
use crate::structs::bitmask::Bitmask;

/// Largest span addressable by 32-bit offsets.
pub const OFFSET_LIMIT: u64 = u32::MAX as u64;

/// Checks that a validity mask, if present, covers exactly `data_len` elements.
pub fn validate_null_mask_len(
    data_len: usize,
    null_mask: &Option<Bitmask>,
) -> Result<(), MinframeError> {
    if let Some(mask) = null_mask {
        if mask.len() != data_len {
            return Err(MinframeError::LengthInvariantViolation(format!(
                "null mask length ({}) does not match data length ({})",
                mask.len(),
                data_len
            )));
        }
    }
    Ok(())
}

/// Checks an offsets buffer against the values it delimits.
///
/// Offsets must be non-empty, non-decreasing, and end within `values_len`.
/// Returns the number of elements they describe.
pub fn validate_offsets(offsets: &[u32], values_len: usize) -> Result<usize, MinframeError> {
    let Some(&last) = offsets.last() else {
        return Err(MinframeError::LengthInvariantViolation(
            "offsets buffer must hold at least one entry".into(),
        ));
    };
    if let Some(i) = offsets.windows(2).position(|w| w[1] < w[0]) {
        return Err(MinframeError::LengthInvariantViolation(format!(
            "offsets decrease at position {}: {} -> {}",
            i + 1,
            offsets[i],
            offsets[i + 1]
        )));
    }
    if last as usize > values_len {
        return Err(MinframeError::LengthInvariantViolation(format!(
            "final offset {last} exceeds values length {values_len}"
        )));
    }
    Ok(offsets.len() - 1)
}

/// Narrows a cumulative span to a 32-bit offset.
#[inline]
pub fn to_offset(span: u64) -> Result<u32, MinframeError> {
    u32::try_from(span).map_err(|_| MinframeError::OffsetOverflow {
        required: span,
        limit: OFFSET_LIMIT,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_offsets() {
        assert_eq!(validate_offsets(&[0, 2, 2, 5], 5).unwrap(), 3);
        assert_eq!(validate_offsets(&[3], 3).unwrap(), 0);
        assert!(validate_offsets(&[], 0).is_err());
        assert!(validate_offsets(&[0, 3, 2], 5).is_err());
        assert!(validate_offsets(&[0, 6], 5).is_err());
    }

    #[test]
    fn test_null_mask_len() {
        assert!(validate_null_mask_len(3, &Some(Bitmask::new_set_all(3, true))).is_ok());
        assert!(matches!(
            validate_null_mask_len(4, &Some(Bitmask::new_set_all(3, true))),
            Err(MinframeError::LengthInvariantViolation(_))
        ));
        assert!(validate_null_mask_len(4, &None).is_ok());
    }

    #[test]
    fn test_to_offset() {
        assert_eq!(to_offset(7).unwrap(), 7);
        assert!(matches!(
            to_offset(OFFSET_LIMIT + 1),
            Err(MinframeError::OffsetOverflow { .. })
        ));
    }
}
