//! # **Bind** - *Chunk concatenation*
//!
//! Concatenates same-typed chunks into one [`Array`], one case per type tag.
//!
//! ## Rules
//! - Fixed-width values are copied into one buffer of the total length. Validity is the
//!   bitwise concatenation of the chunk masks; a chunk without a mask contributes set bits
//!   whenever any sibling has one.
//! - Variable-width and list offsets are rebased onto a running cumulative offset, and
//!   only each chunk's referenced span of bytes or child values is copied, so dead space
//!   left behind by earlier slicing never reaches the output. Span arithmetic runs in
//!   `u64`; totals past the 32-bit offset range fail with `OffsetOverflow`.
//! - Structs bind field by field.
//! - Dictionaries sharing one dictionary (by storage, or entry for entry with floats
//!   compared by bit pattern) concatenate their indices. Otherwise unordered dictionaries
//!   are re-unified in first-seen order and their indices remapped, with null entries
//!   kept apart; ordered ones fail with `UnsupportedBind`.
//! - Total lengths are checked; a sum past `usize::MAX` fails with
//!   `LengthInvariantViolation`.
//!
//! ## Example
//! ```rust
//! use minframe::{bind, arr_i32, arr_i32_opt};
//!
//! let out = bind(&[arr_i32_opt![Some(1), None], arr_i32![3]]).unwrap().unwrap();
//! assert_eq!(out, arr_i32_opt![Some(1), None, Some(3)]);
//! assert!(bind(&[]).unwrap().is_none());
//! ```

use std::sync::Arc;

use log::{debug, trace};

use crate::enums::error::MinframeError;
use crate::kernels::dict_key::DictKey;
use crate::kernels::equality::array_equals;
use crate::structs::bitmask::concat_validity;
use crate::structs::buffer::try_alloc;
use crate::utils::{OFFSET_LIMIT, to_offset};
use crate::{
    Array, BinaryArray, Bitmask, BooleanArray, Buffer, DatetimeArray, DecimalArray,
    DictionaryArray, FixedSizeBinaryArray, FloatArray, IntegerArray, ListArray, StringArray,
    StructArray,
};
use crate::traits::type_unions::{Float, Integer};

#[cfg(feature = "fast_hash")]
use ahash::AHashMap as HashMap;
#[cfg(not(feature = "fast_hash"))]
use std::collections::HashMap;

/// Concatenates `chunks` in order.
///
/// - No chunks: `Ok(None)`.
/// - One chunk: returned as is, without copying.
/// - Otherwise every chunk must have the first chunk's logical type, or the call fails
///   with `TypeMismatchAcrossChunks`.
pub fn bind(chunks: &[Array]) -> Result<Option<Array>, MinframeError> {
    let Some(first) = chunks.first() else {
        return Ok(None);
    };
    let dtype = first.logical_type();
    for (index, chunk) in chunks.iter().enumerate().skip(1) {
        let found = chunk.logical_type();
        if found != dtype {
            return Err(MinframeError::TypeMismatchAcrossChunks {
                index,
                expected: dtype.to_string(),
                found: found.to_string(),
            });
        }
    }
    if chunks.len() == 1 {
        return Ok(Some(first.clone()));
    }
    trace!("bind: {} chunks of {dtype}", chunks.len());
    bind_same(chunks).map(Some)
}

fn across(index: usize, expected: &Array, found: &Array) -> MinframeError {
    MinframeError::TypeMismatchAcrossChunks {
        index,
        expected: expected.logical_type().to_string(),
        found: found.logical_type().to_string(),
    }
}

/// Inner arrays of one variant across all chunks.
macro_rules! inners {
    ($chunks:expr, $variant:ident) => {
        $chunks
            .iter()
            .enumerate()
            .map(|(i, c)| match c {
                Array::$variant(a) => Ok(&**a),
                other => Err(across(i, &$chunks[0], other)),
            })
            .collect::<Result<Vec<_>, MinframeError>>()
    };
}

/// Concatenates chunks already known to share one type. Needs at least one chunk.
pub(crate) fn bind_same(chunks: &[Array]) -> Result<Array, MinframeError> {
    let first = chunks.first().ok_or_else(|| {
        MinframeError::InvalidArgument("bind requires at least one chunk".into())
    })?;
    Ok(match first {
        Array::Null(_) => Array::Null(total_len(chunks.iter().map(Array::len))?),
        Array::Boolean(_) => Array::Boolean(Arc::new(bind_bool(&inners!(chunks, Boolean)?)?)),
        Array::Int8(_) => Array::Int8(Arc::new(bind_int(&inners!(chunks, Int8)?)?)),
        Array::Int16(_) => Array::Int16(Arc::new(bind_int(&inners!(chunks, Int16)?)?)),
        Array::Int32(_) => Array::Int32(Arc::new(bind_int(&inners!(chunks, Int32)?)?)),
        Array::Int64(_) => Array::Int64(Arc::new(bind_int(&inners!(chunks, Int64)?)?)),
        Array::UInt8(_) => Array::UInt8(Arc::new(bind_int(&inners!(chunks, UInt8)?)?)),
        Array::UInt16(_) => Array::UInt16(Arc::new(bind_int(&inners!(chunks, UInt16)?)?)),
        Array::UInt32(_) => Array::UInt32(Arc::new(bind_int(&inners!(chunks, UInt32)?)?)),
        Array::UInt64(_) => Array::UInt64(Arc::new(bind_int(&inners!(chunks, UInt64)?)?)),
        Array::Float32(_) => Array::Float32(Arc::new(bind_float(&inners!(chunks, Float32)?)?)),
        Array::Float64(_) => Array::Float64(Arc::new(bind_float(&inners!(chunks, Float64)?)?)),
        Array::Date32(_) => Array::Date32(Arc::new(bind_datetime(&inners!(chunks, Date32)?)?)),
        Array::Date64(_) => Array::Date64(Arc::new(bind_datetime(&inners!(chunks, Date64)?)?)),
        Array::Time32(_) => Array::Time32(Arc::new(bind_datetime(&inners!(chunks, Time32)?)?)),
        Array::Time64(_) => Array::Time64(Arc::new(bind_datetime(&inners!(chunks, Time64)?)?)),
        Array::Timestamp(_) => {
            Array::Timestamp(Arc::new(bind_datetime(&inners!(chunks, Timestamp)?)?))
        }
        Array::String(_) => {
            let parts = inners!(chunks, String)?;
            let spans: Vec<_> = parts
                .iter()
                .map(|a| (a.offsets().as_slice(), a.data().as_slice(), a.null_mask.as_ref()))
                .collect();
            let (offsets, data, mask) = concat_var_width(&spans)?;
            Array::String(Arc::new(StringArray::new(data, mask, offsets)?))
        }
        Array::Binary(_) => {
            let parts = inners!(chunks, Binary)?;
            let spans: Vec<_> = parts
                .iter()
                .map(|a| (a.offsets().as_slice(), a.data().as_slice(), a.null_mask.as_ref()))
                .collect();
            let (offsets, data, mask) = concat_var_width(&spans)?;
            Array::Binary(Arc::new(BinaryArray::new(data, mask, offsets)?))
        }
        Array::FixedSizeBinary(a) => {
            let parts = inners!(chunks, FixedSizeBinary)?;
            let width = a.width;
            let (data, mask) = concat_fixed(
                parts
                    .iter()
                    .map(|p| (p.data.as_slice(), p.null_mask.as_ref(), p.len())),
            )?;
            Array::FixedSizeBinary(Arc::new(FixedSizeBinaryArray::new(data, mask, width)?))
        }
        Array::Decimal128(a) => {
            let parts = inners!(chunks, Decimal128)?;
            let (data, mask) = concat_fixed(
                parts
                    .iter()
                    .map(|p| (p.data.as_slice(), p.null_mask.as_ref(), p.len())),
            )?;
            Array::Decimal128(Arc::new(DecimalArray::new(data, mask, a.precision, a.scale)?))
        }
        Array::List(_) => Array::List(Arc::new(bind_list(&inners!(chunks, List)?)?)),
        Array::Struct(_) => Array::Struct(Arc::new(bind_struct(&inners!(chunks, Struct)?)?)),
        Array::Dictionary(_) => {
            Array::Dictionary(Arc::new(bind_dictionary(&inners!(chunks, Dictionary)?)?))
        }
    })
}

/// Sums chunk lengths, failing rather than wrapping past `usize::MAX`.
fn total_len(lens: impl IntoIterator<Item = usize>) -> Result<usize, MinframeError> {
    lens.into_iter().try_fold(0usize, |acc, n| {
        acc.checked_add(n).ok_or_else(|| {
            MinframeError::LengthInvariantViolation(format!(
                "bound length overflows usize ({acc} + {n})"
            ))
        })
    })
}

/// Copies fixed-width parts `(values, mask, len)` into one buffer plus merged validity.
///
/// `values.len()` may be a multiple of `len` for fixed-size binary.
fn concat_fixed<'a, T: Copy + 'a>(
    parts: impl Iterator<Item = (&'a [T], Option<&'a Bitmask>, usize)> + Clone,
) -> Result<(Buffer<T>, Option<Bitmask>), MinframeError> {
    let total = total_len(parts.clone().map(|(v, _, _)| v.len()))?;
    let mut data = try_alloc::<T>(total)?;
    for (values, _, _) in parts.clone() {
        data.extend_from_slice(values);
    }
    let mask = concat_validity(parts.map(|(_, m, len)| (len, m)));
    Ok((Buffer::from(data), mask))
}

fn bind_int<T: Integer>(parts: &[&IntegerArray<T>]) -> Result<IntegerArray<T>, MinframeError> {
    let (data, mask) = concat_fixed(
        parts
            .iter()
            .map(|p| (p.data.as_slice(), p.null_mask.as_ref(), p.len())),
    )?;
    IntegerArray::new(data, mask)
}

fn bind_float<T: Float>(parts: &[&FloatArray<T>]) -> Result<FloatArray<T>, MinframeError> {
    let (data, mask) = concat_fixed(
        parts
            .iter()
            .map(|p| (p.data.as_slice(), p.null_mask.as_ref(), p.len())),
    )?;
    FloatArray::new(data, mask)
}

fn bind_datetime<T: Integer>(
    parts: &[&DatetimeArray<T>],
) -> Result<DatetimeArray<T>, MinframeError> {
    let unit = parts[0].time_unit;
    let (data, mask) = concat_fixed(
        parts
            .iter()
            .map(|p| (p.data.as_slice(), p.null_mask.as_ref(), p.len())),
    )?;
    DatetimeArray::new(data, mask, unit)
}

fn bind_bool(parts: &[&BooleanArray]) -> Result<BooleanArray, MinframeError> {
    let total = total_len(parts.iter().map(|p| p.len()))?;
    let mut data = Bitmask::with_capacity(total);
    for p in parts {
        data.extend_from_bitmask(&p.data);
    }
    let mask = concat_validity(parts.iter().map(|p| (p.len(), p.null_mask.as_ref())));
    BooleanArray::new(data, mask)
}

/// Rebases every chunk's offsets onto one running total.
///
/// Returns the new offsets and, per chunk, the referenced `[start, end)` range.
fn rebase_offsets(
    chunk_offsets: &[&[u32]],
) -> Result<(Vec<u32>, Vec<(usize, usize)>), MinframeError> {
    let n = total_len(chunk_offsets.iter().map(|o| o.len() - 1))?;
    let total_span: u64 = chunk_offsets
        .iter()
        .map(|o| (o[o.len() - 1] - o[0]) as u64)
        .sum();
    if total_span > OFFSET_LIMIT {
        return Err(MinframeError::OffsetOverflow {
            required: total_span,
            limit: OFFSET_LIMIT,
        });
    }
    let mut out = try_alloc::<u32>(n + 1)?;
    out.push(0);
    let mut spans = Vec::with_capacity(chunk_offsets.len());
    let mut running = 0u64;
    for offsets in chunk_offsets {
        let base = offsets[0];
        for &o in &offsets[1..] {
            out.push(to_offset(running + (o - base) as u64)?);
        }
        let end = offsets[offsets.len() - 1];
        running += (end - base) as u64;
        spans.push((base as usize, end as usize));
    }
    Ok((out, spans))
}

type VarWidthPart<'a> = (&'a [u32], &'a [u8], Option<&'a Bitmask>);

fn concat_var_width(
    parts: &[VarWidthPart<'_>],
) -> Result<(Vec<u32>, Vec<u8>, Option<Bitmask>), MinframeError> {
    let offsets: Vec<&[u32]> = parts.iter().map(|(o, _, _)| *o).collect();
    let (out_offsets, spans) = rebase_offsets(&offsets)?;
    let total_bytes = out_offsets[out_offsets.len() - 1] as usize;
    let mut data = try_alloc::<u8>(total_bytes)?;
    for ((_, bytes, _), (start, end)) in parts.iter().zip(&spans) {
        data.extend_from_slice(&bytes[*start..*end]);
    }
    let mask = concat_validity(parts.iter().map(|(o, _, m)| (o.len() - 1, *m)));
    Ok((out_offsets, data, mask))
}

fn bind_list(parts: &[&ListArray]) -> Result<ListArray, MinframeError> {
    let offsets: Vec<&[u32]> = parts.iter().map(|p| p.offsets().as_slice()).collect();
    let (out_offsets, spans) = rebase_offsets(&offsets)?;
    let children = parts
        .iter()
        .zip(&spans)
        .map(|(p, (start, end))| p.values.slice(*start, end - start))
        .collect::<Result<Vec<_>, _>>()?;
    let values = bind_same(&children)?;
    let mask = concat_validity(parts.iter().map(|p| (p.len(), p.null_mask.as_ref())));
    ListArray::new(out_offsets, values, mask)
}

fn bind_struct(parts: &[&StructArray]) -> Result<StructArray, MinframeError> {
    let first = parts[0];
    let len = total_len(parts.iter().map(|p| p.len()))?;
    let children = (0..first.n_fields())
        .map(|f| {
            let field_chunks: Vec<Array> = parts.iter().map(|p| p.children()[f].clone()).collect();
            bind_same(&field_chunks)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let mask = concat_validity(parts.iter().map(|p| (p.len(), p.null_mask.as_ref())));
    StructArray::new(first.names().to_vec(), children, len, mask)
}

fn bind_dictionary(parts: &[&DictionaryArray]) -> Result<DictionaryArray, MinframeError> {
    let first = parts[0];
    let shared = parts[1..]
        .iter()
        .all(|p| same_dictionary(&p.dictionary, &first.dictionary));
    let indices: Vec<Array> = parts.iter().map(|p| p.indices.clone()).collect();
    if shared {
        trace!("bind: {} dictionary chunks share one dictionary", parts.len());
        return DictionaryArray::new(bind_same(&indices)?, first.dictionary.clone(), first.ordered);
    }
    if first.ordered {
        return Err(MinframeError::UnsupportedBind(
            "ordered dictionary chunks carry different dictionaries".into(),
        ));
    }
    unify_dictionaries(parts)
}

/// Whether two dictionaries hold the same entries under the keys unification uses, so
/// `0.0` and `-0.0` differ. Nested value types fall back to logical equality.
fn same_dictionary(a: &Array, b: &Array) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    if a.len() != b.len() {
        return false;
    }
    for j in 0..a.len() {
        match (DictKey::of(a, j), DictKey::of(b, j)) {
            (Ok(x), Ok(y)) if x == y => {}
            (Ok(_), Ok(_)) => return false,
            _ => return array_equals(a, b),
        }
    }
    true
}

/// Re-unifies distinct dictionaries in first-seen order and remaps every key.
fn unify_dictionaries(parts: &[&DictionaryArray]) -> Result<DictionaryArray, MinframeError> {
    let first = parts[0];
    let index_type = first.index_type();
    let mut seen: HashMap<DictKey, usize> = HashMap::new();
    // Runs of newly seen entries, as (chunk, start, len).
    let mut runs: Vec<(usize, usize, usize)> = Vec::new();
    let mut remaps: Vec<Vec<usize>> = Vec::with_capacity(parts.len());
    let mut unique = 0usize;

    for (c, part) in parts.iter().enumerate() {
        let dict = &part.dictionary;
        let mut remap = Vec::with_capacity(dict.len());
        for j in 0..dict.len() {
            // Null entries never merge, with each other or with values.
            let idx = if dict.is_null(j) {
                unique
            } else {
                *seen.entry(DictKey::of(dict, j)?).or_insert(unique)
            };
            if idx == unique {
                unique += 1;
                match runs.last_mut() {
                    Some((rc, start, len)) if *rc == c && *start + *len == j => *len += 1,
                    _ => runs.push((c, j, 1)),
                }
            }
            remap.push(idx);
        }
        remaps.push(remap);
    }

    if unique > 0 && (unique - 1) as u64 > index_type.max_index() {
        return Err(MinframeError::UnsupportedBind(format!(
            "unified dictionary of {unique} values overflows {index_type} indices"
        )));
    }
    debug!(
        "bind: re-unified {} dictionaries into {unique} values",
        parts.len()
    );

    let pieces = runs
        .iter()
        .map(|&(c, start, len)| parts[c].dictionary.slice(start, len))
        .collect::<Result<Vec<_>, _>>()?;
    let dictionary = if pieces.is_empty() {
        Array::empty(&first.value_type())?
    } else {
        bind_same(&pieces)?
    };

    let total = total_len(parts.iter().map(|p| p.len()))?;
    let mut keys = try_alloc::<Option<usize>>(total)?;
    for (part, remap) in parts.iter().zip(&remaps) {
        keys.extend((0..part.len()).map(|i| part.key(i).map(|k| remap[k])));
    }
    let indices = Array::from_indices(index_type, &keys)?;
    DictionaryArray::new(indices, dictionary, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        IntegerType, LogicalType, TimeUnit, arr_bool, arr_f64, arr_i32, arr_i32_opt, arr_i64,
        arr_str, arr_str_opt,
    };

    fn list_of(values: Array, lengths: &[Option<usize>]) -> Array {
        Array::from_list(ListArray::from_lengths(values, lengths).unwrap())
    }

    #[test]
    fn test_empty_and_single() {
        assert!(bind(&[]).unwrap().is_none());
        let a = arr_i32![1, 2];
        let out = bind(std::slice::from_ref(&a)).unwrap().unwrap();
        assert!(out.ptr_eq(&a));
    }

    #[test]
    fn test_type_mismatch_across_chunks() {
        let err = bind(&[arr_i32![1], arr_i32![2], arr_i64![3]]).unwrap_err();
        assert_eq!(
            err,
            MinframeError::TypeMismatchAcrossChunks {
                index: 2,
                expected: "Int32".into(),
                found: "Int64".into()
            }
        );
    }

    #[test]
    fn test_null_propagation() {
        let a = arr_i32_opt![Some(1), None];
        let b = arr_i32![3];
        let out = bind(&[a, Array::empty(&LogicalType::Int32).unwrap(), b])
            .unwrap()
            .unwrap();
        let Array::Int32(ints) = &out else {
            panic!("expected int32");
        };
        assert_eq!(ints.data.as_slice(), &[1, 0, 3]);
        let mask = ints.null_mask.as_ref().unwrap();
        assert_eq!(mask.iter().collect::<Vec<_>>(), vec![true, false, true]);
    }

    #[test]
    fn test_nested_list_bind() {
        let a = list_of(arr_i32![1, 2, 3], &[Some(2), Some(1)]);
        let b = list_of(arr_i32![4, 5, 6], &[Some(3)]);
        let out = bind(&[a, b]).unwrap().unwrap();
        let Array::List(l) = &out else {
            panic!("expected list");
        };
        assert_eq!(l.offsets().as_slice(), &[0, 2, 3, 6]);
        assert_eq!(l.values, arr_i32![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_sliced_chunks_copy_only_referenced_span() {
        let strings = arr_str!["dead", "ab", "c", "tail"];
        let window = strings.slice(1, 2).unwrap();
        let out = bind(&[window, arr_str_opt![None, Some("xyz")]])
            .unwrap()
            .unwrap();
        let Array::String(s) = &out else {
            panic!("expected string");
        };
        assert_eq!(s.offsets().as_slice(), &[0, 2, 3, 3, 6]);
        assert_eq!(s.data().as_slice(), b"abcxyz");
        assert_eq!(out, arr_str_opt![Some("ab"), Some("c"), None, Some("xyz")]);

        let lists = list_of(arr_i32![9, 9, 1, 2, 7], &[Some(2), Some(2), Some(1)]);
        let mid = lists.slice(1, 1).unwrap();
        let out = bind(&[mid.clone(), mid]).unwrap().unwrap();
        let Array::List(l) = &out else {
            panic!("expected list");
        };
        assert_eq!(l.values, arr_i32![1, 2, 1, 2]);
    }

    #[test]
    fn test_struct_bind() {
        let s = |ids: Array, names: Array| {
            Array::from_struct(StructArray::from_fields([("id", ids), ("name", names)]).unwrap())
        };
        let out = bind(&[
            s(arr_i32![1], arr_str!["a"]),
            s(arr_i32![2, 3], arr_str_opt![None, Some("c")]),
        ])
        .unwrap()
        .unwrap();
        let expected = s(arr_i32![1, 2, 3], arr_str_opt![Some("a"), None, Some("c")]);
        assert_eq!(out, expected);
    }

    #[test]
    fn test_booleans_and_temporal() {
        let out = bind(&[arr_bool![true], arr_bool![false, true]]).unwrap().unwrap();
        assert_eq!(out, arr_bool![true, false, true]);

        let ts = |v: &[i64]| {
            Array::from_timestamp(DatetimeArray::from_slice(v, TimeUnit::Seconds)).unwrap()
        };
        assert_eq!(bind(&[ts(&[1]), ts(&[2])]).unwrap().unwrap(), ts(&[1, 2]));
        let other = Array::from_timestamp(DatetimeArray::from_slice(&[3], TimeUnit::Nanoseconds))
            .unwrap();
        assert!(bind(&[ts(&[1]), other]).is_err());
    }

    #[test]
    fn test_list_offset_overflow() {
        let big = || {
            Array::from_list(
                ListArray::new(vec![0u32, 3_000_000_000], Array::new_null(3_000_000_000), None)
                    .unwrap(),
            )
        };
        assert!(matches!(
            bind(&[big(), big()]),
            Err(MinframeError::OffsetOverflow {
                required: 6_000_000_000,
                ..
            })
        ));
    }

    #[test]
    fn test_total_length_overflow() {
        let half = Array::new_null(1 << (usize::BITS - 1));
        assert!(matches!(
            bind(&[half.clone(), half.clone()]),
            Err(MinframeError::LengthInvariantViolation(_))
        ));
        let nulls = |n| {
            Array::from_struct(StructArray::from_fields([("n", Array::new_null(n))]).unwrap())
        };
        assert!(matches!(
            bind(&[nulls(usize::MAX), nulls(1)]),
            Err(MinframeError::LengthInvariantViolation(_))
        ));
        let fits = bind(&[half, Array::new_null(3)]).unwrap().unwrap();
        assert_eq!(fits.len(), (1 << (usize::BITS - 1)) + 3);
    }

    #[test]
    fn test_dictionary_shared_and_unified() {
        let shared = arr_str!["x", "y"];
        let d = |keys: Array, dict: Array, ordered: bool| {
            Array::from_dictionary(DictionaryArray::new(keys, dict, ordered).unwrap())
        };
        let a = d(arr_i32![0, 1], shared.clone(), false);
        let b = d(arr_i32![1], shared.clone(), false);
        let out = bind(&[a, b]).unwrap().unwrap();
        let Array::Dictionary(dict) = &out else {
            panic!("expected dictionary");
        };
        assert!(dict.dictionary.ptr_eq(&shared));

        let a = d(arr_i32![0, 1], arr_str!["x", "y"], false);
        let b = d(arr_i32_opt![Some(1), None, Some(0)], arr_str!["z", "x"], false);
        let out = bind(&[a, b]).unwrap().unwrap();
        let Array::Dictionary(dict) = &out else {
            panic!("expected dictionary");
        };
        assert_eq!(dict.dictionary, arr_str!["x", "y", "z"]);
        let keys: Vec<_> = (0..dict.len()).map(|i| dict.key(i)).collect();
        assert_eq!(keys, vec![Some(0), Some(1), Some(0), None, Some(2)]);

        let a = d(arr_i32![0], arr_str!["x"], true);
        let b = d(arr_i32![0], arr_str!["y"], true);
        assert!(matches!(bind(&[a, b]), Err(MinframeError::UnsupportedBind(_))));
    }

    #[test]
    fn test_dictionary_signed_zero_and_null_entries() {
        let d = |keys: Array, dict: Array| {
            Array::from_dictionary(DictionaryArray::new(keys, dict, false).unwrap())
        };
        let out = bind(&[
            d(arr_i32![0], arr_f64![0.0]),
            d(arr_i32![0], arr_f64![-0.0]),
        ])
        .unwrap()
        .unwrap();
        let Array::Dictionary(dict) = &out else {
            panic!("expected dictionary");
        };
        let Array::Float64(values) = &dict.dictionary else {
            panic!("expected float64 dictionary");
        };
        assert_eq!(values.len(), 2);
        assert_eq!(values.get(1).map(f64::to_bits), Some((-0.0f64).to_bits()));
        assert_eq!(dict.key(1), Some(1));

        let out = bind(&[
            d(arr_i32![0, 1], arr_str_opt![None, Some("x")]),
            d(arr_i32![1, 0], arr_str_opt![Some("x"), None]),
        ])
        .unwrap()
        .unwrap();
        let Array::Dictionary(dict) = &out else {
            panic!("expected dictionary");
        };
        assert_eq!(dict.dictionary, arr_str_opt![None, Some("x"), None]);
        let keys: Vec<_> = (0..dict.len()).map(|i| dict.key(i)).collect();
        assert_eq!(keys, vec![Some(0), Some(1), Some(2), Some(1)]);
    }

    #[test]
    fn test_dictionary_unification_overflow() {
        let values: Vec<String> = (0..200).map(|i| i.to_string()).collect();
        let refs: Vec<&str> = values.iter().map(String::as_str).collect();
        let (lo, hi) = refs.split_at(100);
        let keys = |n: usize| {
            Array::from_indices(IntegerType::Int8, &(0..n).map(Some).collect::<Vec<_>>()).unwrap()
        };
        let a = DictionaryArray::new(keys(100), strings(lo), false).unwrap();
        let b = DictionaryArray::new(keys(100), strings(hi), false).unwrap();
        let err = bind(&[Array::from_dictionary(a), Array::from_dictionary(b)]);
        assert!(matches!(err, Err(MinframeError::UnsupportedBind(_))));
    }

    fn strings(values: &[&str]) -> Array {
        Array::from_string(StringArray::from_slice(values))
    }
}
