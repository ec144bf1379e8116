//! # **Equality Kernels** - *Logical array comparison*
//!
//! Two arrays are equal when they have the same logical type and length, the same null
//! positions, and the same decoded value at every valid position. Storage layout is not
//! compared: slices, shared buffers, offsets bases, and mask presence are all invisible.
//!
//! Dictionary arrays compare by resolved value, so two dictionary arrays with different
//! dictionaries but the same decoded rows are equal. Floats compare by value, with `NaN`
//! equal to `NaN`.

use crate::Array;
use crate::traits::type_unions::Float;

/// Logical equality of two arrays.
pub fn array_equals(a: &Array, b: &Array) -> bool {
    if a.ptr_eq(b) {
        return true;
    }
    if a.len() != b.len() || a.logical_type() != b.logical_type() {
        return false;
    }
    (0..a.len()).all(|i| value_eq(a, i, b, i))
}

#[inline]
fn float_eq<T: Float>(x: T, y: T) -> bool {
    x == y || (x.is_nan() && y.is_nan())
}

/// Element `i` of `a` against element `j` of `b`, nulls equal to nulls.
///
/// Arrays of different variants are never equal. Indices out of range count as null.
pub fn value_eq(a: &Array, i: usize, b: &Array, j: usize) -> bool {
    let (a_null, b_null) = (a.is_null(i), b.is_null(j));
    if a_null || b_null {
        return a_null && b_null;
    }
    match a {
        Array::Null(_) => matches!(b, Array::Null(_)),
        Array::Boolean(x) => matches!(b, Array::Boolean(y) if x.get(i) == y.get(j)),
        Array::Int8(x) => matches!(b, Array::Int8(y) if x.get(i) == y.get(j)),
        Array::Int16(x) => matches!(b, Array::Int16(y) if x.get(i) == y.get(j)),
        Array::Int32(x) => matches!(b, Array::Int32(y) if x.get(i) == y.get(j)),
        Array::Int64(x) => matches!(b, Array::Int64(y) if x.get(i) == y.get(j)),
        Array::UInt8(x) => matches!(b, Array::UInt8(y) if x.get(i) == y.get(j)),
        Array::UInt16(x) => matches!(b, Array::UInt16(y) if x.get(i) == y.get(j)),
        Array::UInt32(x) => matches!(b, Array::UInt32(y) if x.get(i) == y.get(j)),
        Array::UInt64(x) => matches!(b, Array::UInt64(y) if x.get(i) == y.get(j)),
        Array::Float32(x) => {
            matches!(b, Array::Float32(y) if opt_float_eq(x.get(i), y.get(j)))
        }
        Array::Float64(x) => {
            matches!(b, Array::Float64(y) if opt_float_eq(x.get(i), y.get(j)))
        }
        Array::Date32(x) => matches!(b, Array::Date32(y) if x.get(i) == y.get(j)),
        Array::Date64(x) => matches!(b, Array::Date64(y) if x.get(i) == y.get(j)),
        Array::Time32(x) => matches!(
            b,
            Array::Time32(y) if x.time_unit == y.time_unit && x.get(i) == y.get(j)
        ),
        Array::Time64(x) => matches!(
            b,
            Array::Time64(y) if x.time_unit == y.time_unit && x.get(i) == y.get(j)
        ),
        Array::Timestamp(x) => matches!(
            b,
            Array::Timestamp(y) if x.time_unit == y.time_unit && x.get(i) == y.get(j)
        ),
        Array::String(x) => matches!(b, Array::String(y) if x.get_str(i) == y.get_str(j)),
        Array::Binary(x) => matches!(b, Array::Binary(y) if x.get(i) == y.get(j)),
        Array::FixedSizeBinary(x) => {
            matches!(b, Array::FixedSizeBinary(y) if x.get(i) == y.get(j))
        }
        Array::Decimal128(x) => matches!(
            b,
            Array::Decimal128(y) if x.scale == y.scale && x.get(i) == y.get(j)
        ),
        Array::List(x) => match b {
            Array::List(y) => match (x.value(i), y.value(j)) {
                (Ok(p), Ok(q)) => array_equals(&p, &q),
                _ => false,
            },
            _ => false,
        },
        Array::Struct(x) => matches!(
            b,
            Array::Struct(y) if x.names() == y.names()
                && x.n_fields() == y.n_fields()
                && x
                    .children()
                    .iter()
                    .zip(y.children())
                    .all(|(p, q)| value_eq(p, i, q, j))
        ),
        Array::Dictionary(x) => match b {
            Array::Dictionary(y) => match (x.key(i), y.key(j)) {
                (Some(p), Some(q)) => value_eq(&x.dictionary, p, &y.dictionary, q),
                (p, q) => p.is_none() && q.is_none(),
            },
            _ => false,
        },
    }
}

#[inline]
fn opt_float_eq<T: Float>(x: Option<T>, y: Option<T>) -> bool {
    match (x, y) {
        (Some(p), Some(q)) => float_eq(p, q),
        (p, q) => p.is_none() && q.is_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        DictionaryArray, FloatArray, IntegerArray, IntegerType, ListArray, StructArray, arr_i32,
        arr_i32_opt, arr_str,
    };

    #[test]
    fn test_nulls_and_values() {
        assert_eq!(arr_i32_opt![Some(1), None], arr_i32_opt![Some(1), None]);
        assert_ne!(arr_i32_opt![Some(1), None], arr_i32![1, 0]);
        assert_ne!(arr_i32![1, 2], arr_i32![1, 2, 3]);
        assert_ne!(
            arr_i32![1],
            Array::from_int64(IntegerArray::<i64>::from_slice(&[1]))
        );
    }

    #[test]
    fn test_mask_presence_is_invisible() {
        let masked = Array::from_int32(
            IntegerArray::new(vec![1, 2], Some(crate::Bitmask::new_set_all(2, true))).unwrap(),
        );
        assert_eq!(masked, arr_i32![1, 2]);
    }

    #[test]
    fn test_float_nan() {
        let a = Array::from_float64(FloatArray::from_slice(&[f64::NAN, 1.0]));
        let b = Array::from_float64(FloatArray::from_slice(&[f64::NAN, 1.0]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_slices_compare_by_content() {
        let s = arr_str!["x", "yy", "zzz"];
        assert_eq!(s.slice(1, 2).unwrap(), arr_str!["yy", "zzz"]);
        let list = ListArray::from_lengths(arr_i32![1, 2, 3], &[Some(1), Some(2)]).unwrap();
        let other = ListArray::from_lengths(arr_i32![9, 2, 3], &[Some(2)]).unwrap();
        assert_ne!(
            Array::from_list(list.clone()).slice(1, 1).unwrap(),
            Array::from_list(other)
        );
        let same = ListArray::from_lengths(arr_i32![2, 3], &[Some(2)]).unwrap();
        assert_eq!(
            Array::from_list(list).slice(1, 1).unwrap(),
            Array::from_list(same)
        );
    }

    #[test]
    fn test_dictionary_by_resolved_value() {
        let a = DictionaryArray::new(arr_i32![0, 1], arr_str!["p", "q"], false).unwrap();
        let b = DictionaryArray::new(arr_i32![1, 0], arr_str!["q", "p"], false).unwrap();
        assert_eq!(Array::from_dictionary(a), Array::from_dictionary(b));
        let c = DictionaryArray::from_strs(&[Some("p"), Some("q")], IntegerType::UInt8, false)
            .unwrap();
        // Index width is part of the type.
        assert_ne!(
            Array::from_dictionary(c),
            Array::from_dictionary(
                DictionaryArray::new(arr_i32![0, 1], arr_str!["p", "q"], false).unwrap()
            )
        );
    }

    #[test]
    fn test_struct_row_nulls() {
        let a = StructArray::new(
            vec!["v".into()],
            vec![arr_i32![1, 2]],
            2,
            Some(crate::Bitmask::from_bools(&[true, false])),
        )
        .unwrap();
        let b = StructArray::new(
            vec!["v".into()],
            vec![arr_i32![1, 7]],
            2,
            Some(crate::Bitmask::from_bools(&[true, false])),
        )
        .unwrap();
        assert_eq!(Array::from_struct(a), Array::from_struct(b));
    }
}
