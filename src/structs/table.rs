//! # **Table Module** - *Named columns of equal length*
//!
//! Columnar data container pairing a fixed number of rows with named, typed [`Column`]s.
//! Columns may be chunked independently; [`Consolidate`] binds every column into a single
//! chunk and [`Table::split_rows`] re-partitions them.
//!
//! With the `parallel_proc` feature, consolidation binds columns on the *Rayon* pool.

use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::trace;
#[cfg(feature = "parallel_proc")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::enums::error::MinframeError;
use crate::traits::consolidate::Consolidate;
use crate::typed::builder::Builder;
use crate::typed::registry::LogicalTyped;
use crate::{Array, ChunkedArray, Column, Field};

// Global counter for unnamed table instances
static UNNAMED_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// # Table
///
/// # Structure
/// - `name`: logical table name.
/// - columns: unique names, all `n_rows` long.
///
/// # Example
/// ```rust
/// use minframe::{Table, arr_i32, arr_str};
///
/// let mut t = Table::from_arrays("people", vec![("id", arr_i32![1, 2])]).unwrap();
/// t.set_column("name", arr_str!["ann", "bo"]).unwrap();
/// assert_eq!(t.col_names(), vec!["id", "name"]);
/// assert!(t.set_column("age", arr_i32![30]).is_err());
/// ```
#[derive(Default, PartialEq, Clone, Debug)]
pub struct Table {
    pub name: String,
    cols: Vec<Column>,
    n_rows: usize,
}

fn table_name(name: String) -> String {
    if name.trim().is_empty() {
        let id = UNNAMED_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("UnnamedTable{id}")
    } else {
        name
    }
}

impl Table {
    /// Fails with `LengthInvariantViolation` when column lengths differ and with
    /// `InvalidArgument` on duplicate column names.
    pub fn new(name: impl Into<String>, cols: Vec<Column>) -> Result<Self, MinframeError> {
        let n_rows = cols.first().map(Column::len).unwrap_or(0);
        for (i, col) in cols.iter().enumerate() {
            if col.len() != n_rows {
                return Err(MinframeError::LengthInvariantViolation(format!(
                    "column '{}' has {} rows, expected {n_rows}",
                    col.name(),
                    col.len()
                )));
            }
            if cols[..i].iter().any(|c| c.name() == col.name()) {
                return Err(MinframeError::InvalidArgument(format!(
                    "duplicate column name '{}'",
                    col.name()
                )));
            }
        }
        Ok(Self {
            name: table_name(name.into()),
            cols,
            n_rows,
        })
    }

    /// Table with no columns and a globally unique name.
    pub fn new_empty() -> Self {
        Self {
            name: table_name(String::new()),
            cols: Vec::new(),
            n_rows: 0,
        }
    }

    pub fn from_arrays<N: Into<String>>(
        name: impl Into<String>,
        arrays: Vec<(N, Array)>,
    ) -> Result<Self, MinframeError> {
        let cols = arrays
            .into_iter()
            .map(|(n, a)| Column::from_array(n, a))
            .collect();
        Self::new(name, cols)
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.cols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }

    #[inline]
    pub fn cols(&self) -> &[Column] {
        &self.cols
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.cols.iter().find(|c| c.name() == name)
    }

    pub fn column_at(&self, idx: usize) -> Option<&Column> {
        self.cols.get(idx)
    }

    pub fn col_names(&self) -> Vec<&str> {
        self.cols.iter().map(Column::name).collect()
    }

    pub fn schema(&self) -> Vec<Arc<Field>> {
        self.cols.iter().map(|c| c.field().clone()).collect()
    }

    /// Replaces the column called `name`, or appends it.
    ///
    /// The first column of an empty table sets the row count; afterwards a length mismatch
    /// fails with `LengthInvariantViolation`.
    pub fn set_column(
        &mut self,
        name: impl Into<String>,
        data: impl Into<ChunkedArray>,
    ) -> Result<(), MinframeError> {
        let col = Column::new(name, data.into());
        self.insert(col)
    }

    /// Builds a column of `T` from optional values and sets it as [`Table::set_column`] does.
    pub fn set_values<T: LogicalTyped, X: Into<T::Input>>(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<X>>,
    ) -> Result<(), MinframeError> {
        let mut builder = Builder::<T>::new()?;
        builder.extend_options(values)?;
        self.set_column(name, builder.finish()?)
    }

    fn insert(&mut self, col: Column) -> Result<(), MinframeError> {
        let replacing = self.cols.iter().position(|c| c.name() == col.name());
        let sole = self.cols.is_empty() || (self.cols.len() == 1 && replacing.is_some());
        if !sole && col.len() != self.n_rows {
            return Err(MinframeError::LengthInvariantViolation(format!(
                "column '{}' has {} rows, table has {}",
                col.name(),
                col.len(),
                self.n_rows
            )));
        }
        self.n_rows = col.len();
        match replacing {
            Some(i) => self.cols[i] = col,
            None => self.cols.push(col),
        }
        Ok(())
    }

    /// Removes and returns the column called `name`.
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let i = self.cols.iter().position(|c| c.name() == name)?;
        let col = self.cols.remove(i);
        if self.cols.is_empty() {
            self.n_rows = 0;
        }
        Some(col)
    }

    /// Rows `[begin, end)` of every column, zero-copy.
    ///
    /// Bounds follow [`Column::slice`], checked against `n_rows` even without columns.
    pub fn slice_rows(&self, begin: usize, end: usize) -> Result<Self, MinframeError> {
        for bound in [begin, end] {
            if bound > self.n_rows {
                return Err(MinframeError::IndexOutOfRange {
                    index: bound,
                    len: self.n_rows,
                });
            }
        }
        let cols = self
            .cols
            .iter()
            .map(|c| c.slice(begin, end))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: self.name.clone(),
            n_rows: end.saturating_sub(begin),
            cols,
        })
    }

    /// Re-partitions every column into chunks of at most `max_rows`.
    pub fn split_rows(&self, max_rows: usize) -> Result<Self, MinframeError> {
        trace!("split_rows: table '{}' into <= {max_rows} rows", self.name);
        let cols = self
            .cols
            .iter()
            .map(|c| c.rechunk(max_rows))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: self.name.clone(),
            n_rows: self.n_rows,
            cols,
        })
    }
}

impl Consolidate for Table {
    type Output = Table;

    fn consolidate(self) -> Result<Table, MinframeError> {
        trace!("consolidate: table '{}' with {} columns", self.name, self.cols.len());
        let bind_col = |col: Column| -> Result<Column, MinframeError> {
            let array = col.to_array()?;
            Column::with_field(col.field().clone(), ChunkedArray::from(array))
        };
        #[cfg(feature = "parallel_proc")]
        let cols = self
            .cols
            .into_par_iter()
            .map(bind_col)
            .collect::<Result<Vec<_>, _>>()?;
        #[cfg(not(feature = "parallel_proc"))]
        let cols = self
            .cols
            .into_iter()
            .map(bind_col)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Table {
            name: self.name,
            cols,
            n_rows: self.n_rows,
        })
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Table \"{}\" [{} rows x {} cols]",
            self.name,
            self.n_rows,
            self.cols.len()
        )?;
        for col in &self.cols {
            writeln!(f, "  {} ({} chunks)", col.field(), col.data().n_chunks())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LogicalType, arr_i32, arr_str};

    fn people() -> Table {
        Table::from_arrays(
            "people",
            vec![("id", arr_i32![1, 2, 3]), ("name", arr_str!["a", "b", "c"])],
        )
        .unwrap()
    }

    #[test]
    fn test_new_checks_lengths_and_names() {
        let err = Table::from_arrays("t", vec![("a", arr_i32![1]), ("b", arr_i32![1, 2])]);
        assert!(matches!(err, Err(MinframeError::LengthInvariantViolation(_))));
        let dup = Table::from_arrays("t", vec![("a", arr_i32![1]), ("a", arr_i32![2])]);
        assert!(matches!(dup, Err(MinframeError::InvalidArgument(_))));
        assert!(Table::new("", vec![]).unwrap().name.starts_with("UnnamedTable"));
    }

    #[test]
    fn test_set_column_replace_and_append() {
        let mut t = people();
        t.set_column("id", arr_i32![7, 8, 9]).unwrap();
        assert_eq!(t.n_cols(), 2);
        assert_eq!(t.column("id").unwrap().to_array().unwrap(), arr_i32![7, 8, 9]);
        assert!(matches!(
            t.set_column("extra", arr_i32![1]),
            Err(MinframeError::LengthInvariantViolation(_))
        ));
        let mut single = Table::from_arrays("s", vec![("x", arr_i32![1, 2])]).unwrap();
        single.set_column("x", arr_i32![1]).unwrap();
        assert_eq!(single.n_rows(), 1);
    }

    #[test]
    fn test_set_values_builds_typed_column() {
        let mut t = people();
        t.set_values::<f64, f64>("score", [Some(1.5), None, Some(3.0)])
            .unwrap();
        let col = t.column("score").unwrap();
        assert_eq!(col.field().dtype, LogicalType::Float64);
        assert!(col.field().nullable);
        assert_eq!(t.schema().len(), 3);
    }

    #[test]
    fn test_split_and_consolidate() {
        let t = people();
        let split = t.split_rows(2).unwrap();
        assert_eq!(split.column("name").unwrap().data().n_chunks(), 2);
        assert_eq!(split, t);
        let merged = split.consolidate().unwrap();
        assert!(merged.cols().iter().all(|c| c.data().n_chunks() == 1));
        assert_eq!(merged, t);
    }

    #[test]
    fn test_slice_rows() {
        let t = people().slice_rows(1, 3).unwrap();
        assert_eq!(t.n_rows(), 2);
        assert_eq!(t.column("name").unwrap().to_array().unwrap(), arr_str!["b", "c"]);
        assert_eq!(people().slice_rows(2, 1).unwrap().n_rows(), 0);
        assert!(matches!(
            people().slice_rows(1, 4),
            Err(MinframeError::IndexOutOfRange { index: 4, len: 3 })
        ));
    }

    #[test]
    fn test_slice_rows_without_columns() {
        let empty = Table::new_empty();
        assert!(matches!(
            empty.slice_rows(0, 5),
            Err(MinframeError::IndexOutOfRange { index: 5, len: 0 })
        ));
        assert!(matches!(
            empty.slice_rows(7, 2),
            Err(MinframeError::IndexOutOfRange { index: 7, len: 0 })
        ));
        assert_eq!(empty.slice_rows(0, 0).unwrap().n_rows(), 0);
    }

    #[test]
    fn test_remove_and_display() {
        let mut t = people();
        assert!(t.remove_column("id").is_some());
        assert!(t.remove_column("id").is_none());
        assert!(t.to_string().starts_with("Table \"people\" [3 rows x 1 cols]"));
    }
}
