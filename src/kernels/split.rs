//! # **Split** - *Chunk partitioning*
//!
//! Partitions one [`Array`] into consecutive chunks of at most `max_chunk_len` elements.
//! Every chunk is a zero-copy [`Array::slice`]: buffers stay shared, masks carry a bit
//! offset, and list, string, and dictionary chunks keep referencing their parent's child
//! data. [`bind`](crate::bind) copies back only the referenced spans.

use log::trace;

use crate::Array;
use crate::enums::error::MinframeError;

/// Splits `array` into `ceil(len / max_chunk_len)` chunks.
///
/// All chunks but the last hold exactly `max_chunk_len` elements. An empty array yields
/// no chunks. Fails with `InvalidArgument` when `max_chunk_len` is zero.
///
/// ```rust
/// use minframe::{split, bind, arr_i32};
///
/// let arr = arr_i32![1, 2, 3, 4, 5];
/// let chunks = split(&arr, 2).unwrap();
/// assert_eq!(chunks.iter().map(|c| c.len()).collect::<Vec<_>>(), vec![2, 2, 1]);
/// assert_eq!(bind(&chunks).unwrap().unwrap(), arr);
/// ```
pub fn split(array: &Array, max_chunk_len: usize) -> Result<Vec<Array>, MinframeError> {
    if max_chunk_len == 0 {
        return Err(MinframeError::InvalidArgument(
            "max_chunk_len must be at least 1".into(),
        ));
    }
    let len = array.len();
    let n_chunks = len.div_ceil(max_chunk_len);
    trace!("split: {len} elements into {n_chunks} chunks of <= {max_chunk_len}");
    (0..n_chunks)
        .map(|c| {
            let offset = c * max_chunk_len;
            array.slice(offset, max_chunk_len.min(len - offset))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::bind::bind;
    use crate::{IntegerArray, arr_i32, arr_str_opt};

    #[test]
    fn test_zero_chunk_len() {
        assert!(matches!(
            split(&arr_i32![1], 0),
            Err(MinframeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_array() {
        assert!(split(&arr_i32![], 3).unwrap().is_empty());
    }

    #[test]
    fn test_thousand_by_nine() {
        let values: Vec<i32> = (0..1000).collect();
        let arr = Array::from_int32(IntegerArray::from_slice(&values));
        let chunks = split(&arr, 9).unwrap();
        assert_eq!(chunks.len(), 112);
        assert!(chunks[..111].iter().all(|c| c.len() == 9));
        assert_eq!(chunks[111].len(), 1);
        assert_eq!(bind(&chunks).unwrap().unwrap(), arr);
    }

    #[test]
    fn test_even_division_and_sharing() {
        let arr = arr_str_opt![Some("a"), None, Some("ccc"), Some("dd")];
        let chunks = split(&arr, 2).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 2));
        let (Array::String(whole), Array::String(second)) = (&arr, &chunks[1]) else {
            panic!("expected strings");
        };
        assert!(second.data().shares_storage(whole.data()));
        assert_eq!(bind(&chunks).unwrap().unwrap(), arr);
    }

    #[test]
    fn test_chunk_larger_than_array() {
        let arr = arr_i32![1, 2];
        let chunks = split(&arr, 10).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], arr);
    }
}
