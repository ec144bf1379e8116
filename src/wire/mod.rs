//! # **Wire Module** - *Binary table format*
//!
//! Serialises a [`Table`] as its schema followed by each column's chunks, and reads it back.
//!
//! ```text
//! "MFRM" | u32 version | str table_name | u32 n_cols |
//!   per column: str name | type | u32 n_chunks | chunk*
//! ```
//!
//! All integers are little-endian; `str` is a `u32` byte length followed by UTF-8.
//!
//! ## Round trip
//! - The writer may split columns into bounded chunks ([`WriterOptions::max_chunk_len`]).
//! - The reader validates every chunk through the array constructors, then binds each
//!   column back into a single array, so the result does not depend on how the writer
//!   chunked it.
//!
//! ## Errors
//! - Malformed input (bad magic, truncation, trailing bytes, inconsistent lengths)
//!   fails with `MinframeError::Wire`.
//! - Type names outside the supported set fail with `UnsupportedType`.
//! - Payloads that decode but violate an array invariant fail with
//!   `LengthInvariantViolation`.
//!
//! ## Example
//! ```rust
//! use minframe::wire::{WriterOptions, read_table, write_table};
//! use minframe::{Table, arr_i32, arr_str};
//!
//! let t = Table::from_arrays("t", vec![("id", arr_i32![1, 2, 3]), ("s", arr_str!["a", "b", "c"])])
//!     .unwrap();
//! let bytes = write_table(&t, &WriterOptions::with_max_chunk_len(2)).unwrap();
//! assert_eq!(read_table(&bytes).unwrap(), t);
//! ```

mod chunk;
mod codec;
mod schema;

use bytes::{BufMut, Bytes, BytesMut};
use log::debug;
#[cfg(feature = "parallel_proc")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::enums::error::MinframeError;
use crate::enums::logical_type::LogicalType;
use crate::kernels::bind::bind;
use crate::kernels::split::split;
use crate::{Array, ChunkedArray, Column, Table};
use codec::{Reader, put_str, wire_u32};

/// Leading bytes of every payload.
pub const MAGIC: &[u8; 4] = b"MFRM";

/// Format version written and accepted.
pub const VERSION: u32 = 1;

/// Writer settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Split every chunk into pieces of at most this many rows. `None` writes chunks as
    /// they are held.
    pub max_chunk_len: Option<usize>,
}

impl WriterOptions {
    pub fn with_max_chunk_len(max_chunk_len: usize) -> Self {
        Self {
            max_chunk_len: Some(max_chunk_len),
        }
    }
}

/// Encodes `table`.
///
/// Fails with `InvalidArgument` for a zero `max_chunk_len`, and with `Wire` when a name or
/// count does not fit its `u32` field.
pub fn write_table(table: &Table, opts: &WriterOptions) -> Result<Bytes, MinframeError> {
    let mut buf = BytesMut::new();
    write_table_into(table, opts, &mut buf)?;
    Ok(buf.freeze())
}

/// Encodes `table` onto the end of `buf`.
pub fn write_table_into(
    table: &Table,
    opts: &WriterOptions,
    buf: &mut BytesMut,
) -> Result<(), MinframeError> {
    buf.put_slice(MAGIC);
    buf.put_u32_le(VERSION);
    put_str(buf, &table.name)?;
    buf.put_u32_le(wire_u32(table.n_cols(), "column count")?);
    for col in table.cols() {
        put_str(buf, col.name())?;
        schema::put_type(buf, &col.field().dtype)?;
        let chunks = match opts.max_chunk_len {
            Some(k) => {
                let mut pieces = Vec::new();
                for c in col.data().chunks() {
                    pieces.extend(split(c, k)?);
                }
                debug!(
                    "wire: column '{}' written as {} chunks of <= {k} rows",
                    col.name(),
                    pieces.len()
                );
                pieces
            }
            None => col.data().chunks().to_vec(),
        };
        buf.put_u32_le(wire_u32(chunks.len(), "chunk count")?);
        for c in &chunks {
            chunk::encode_chunk(buf, c)?;
        }
    }
    Ok(())
}

/// Decodes a table written by [`write_table`]. Each column comes back as one chunk.
pub fn read_table(bytes: &[u8]) -> Result<Table, MinframeError> {
    let mut r = Reader::new(bytes);
    let magic = r.bytes(MAGIC.len(), "magic")?;
    if magic != MAGIC {
        return Err(MinframeError::Wire(format!("bad magic {magic:?}")));
    }
    let version = r.value::<u32>("version")?;
    if version != VERSION {
        return Err(MinframeError::Wire(format!(
            "unsupported version {version}, expected {VERSION}"
        )));
    }
    let name = r.str("table name")?;
    let n_cols = r.value::<u32>("column count")?;
    let mut pending = Vec::new();
    for _ in 0..n_cols {
        let col_name = r.str("column name")?;
        let dtype = schema::read_type(&mut r)?;
        let n_chunks = r.value::<u32>("chunk count")?;
        let mut chunks = Vec::new();
        let mut rows = 0usize;
        for _ in 0..n_chunks {
            let c = chunk::decode_chunk(&mut r, &dtype)?;
            rows = rows.checked_add(c.len()).ok_or_else(|| {
                MinframeError::Wire(format!("column '{col_name}' row count overflows usize"))
            })?;
            chunks.push(c);
        }
        pending.push((col_name, dtype, chunks));
    }
    if r.remaining() != 0 {
        return Err(MinframeError::Wire(format!(
            "{} trailing bytes after table",
            r.remaining()
        )));
    }
    debug!("wire: read table '{name}' with {n_cols} columns");
    #[cfg(feature = "parallel_proc")]
    let cols = pending
        .into_par_iter()
        .map(bind_column)
        .collect::<Result<Vec<_>, _>>()?;
    #[cfg(not(feature = "parallel_proc"))]
    let cols = pending
        .into_iter()
        .map(bind_column)
        .collect::<Result<Vec<_>, _>>()?;
    Table::new(name, cols)
}

fn bind_column(
    (name, dtype, chunks): (String, LogicalType, Vec<Array>),
) -> Result<Column, MinframeError> {
    let array = match bind(&chunks)? {
        Some(array) => array,
        None => Array::empty(&dtype)?,
    };
    Ok(Column::new(name, ChunkedArray::from(array)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arr_i32, arr_str};

    fn sample() -> Table {
        Table::from_arrays(
            "sample",
            vec![("id", arr_i32![1, 2, 3, 4, 5]), ("s", arr_str!["a", "b", "c", "d", "e"])],
        )
        .unwrap()
    }

    #[test]
    fn test_roundtrip_any_chunking() {
        let t = sample();
        for opts in [
            WriterOptions::default(),
            WriterOptions::with_max_chunk_len(1),
            WriterOptions::with_max_chunk_len(2),
            WriterOptions::with_max_chunk_len(100),
        ] {
            let back = read_table(&write_table(&t, &opts).unwrap()).unwrap();
            assert_eq!(back, t);
            assert!(back.cols().iter().all(|c| c.data().n_chunks() == 1));
        }
        assert!(write_table(&t, &WriterOptions::with_max_chunk_len(0)).is_err());
    }

    #[test]
    fn test_empty_table_and_zero_rows() {
        let t = Table::new("nothing", vec![]).unwrap();
        assert_eq!(read_table(&write_table(&t, &WriterOptions::default()).unwrap()).unwrap(), t);
        let z = sample().slice_rows(0, 0).unwrap();
        let back = read_table(&write_table(&z, &WriterOptions::with_max_chunk_len(3)).unwrap())
            .unwrap();
        assert_eq!(back.n_rows(), 0);
        assert_eq!(back.schema(), z.schema());
    }

    #[test]
    fn test_malformed_input() {
        let bytes = write_table(&sample(), &WriterOptions::default()).unwrap();
        assert!(matches!(read_table(b"NOPE"), Err(MinframeError::Wire(_))));
        assert!(matches!(
            read_table(&bytes[..bytes.len() - 1]),
            Err(MinframeError::Wire(_))
        ));
        let mut extra = bytes.to_vec();
        extra.push(0);
        assert!(matches!(read_table(&extra), Err(MinframeError::Wire(_))));
        let mut future = bytes.to_vec();
        future[4] = 9;
        assert!(matches!(read_table(&future), Err(MinframeError::Wire(_))));
    }
}
