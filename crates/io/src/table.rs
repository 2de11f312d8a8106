//! Timestamp-indexed consumption table.

use std::cmp::Ordering;
use std::ops::Range;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::IoError;
use crate::validate::{self, ValidationCollector};

/// A 2-D numeric table with timestamp rows and entity columns.
///
/// Values are stored row-major. A missing value is represented by `NaN`.
/// The constructors guarantee:
///
/// - the value buffer holds exactly `n_rows * n_cols` cells,
/// - timestamps are strictly increasing (chronological, no duplicates),
/// - column names are unique and non-empty.
///
/// Missing values are allowed here; consumers that cannot tolerate them
/// (the scoring engine) check with [`has_missing`](Self::has_missing).
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionTable {
    index: Vec<NaiveDateTime>,
    columns: Vec<String>,
    values: Vec<f64>,
}

impl ConsumptionTable {
    /// Creates a table from an index, column names and row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every shape, ordering and
    /// column-name violation found.
    pub fn new(
        index: Vec<NaiveDateTime>,
        columns: Vec<String>,
        values: Vec<f64>,
    ) -> Result<Self, IoError> {
        let mut c = validate::validate_shape(index.len(), columns.len(), values.len());
        c.extend(validate::validate_index(&index));
        c.extend(validate::validate_columns(&columns));
        c.finish()?;

        Ok(Self {
            index,
            columns,
            values,
        })
    }

    /// Creates a table from named column vectors.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if any column length differs from the
    /// index length, or if [`new`](Self::new) rejects the assembled table.
    pub fn from_columns(
        index: Vec<NaiveDateTime>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, IoError> {
        let n_rows = index.len();
        let n_cols = columns.len();

        let mut c = ValidationCollector::new();
        for (name, data) in &columns {
            if data.len() != n_rows {
                c.push(format!(
                    "column '{name}' length {} != index length {n_rows}",
                    data.len()
                ));
            }
        }
        c.finish()?;

        let mut values = vec![f64::NAN; n_rows * n_cols];
        for (j, (_, data)) in columns.iter().enumerate() {
            for (i, &v) in data.iter().enumerate() {
                values[i * n_cols + j] = v;
            }
        }
        let names = columns.into_iter().map(|(name, _)| name).collect();

        Self::new(index, names, values)
    }

    /// Creates a table from unordered rows, sorting them chronologically and
    /// keeping only the first occurrence of each duplicated timestamp.
    ///
    /// Rows with the same timestamp keep their input order before
    /// de-duplication, so "first" means first in the input.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if a row width differs from the number
    /// of columns or the column names are invalid.
    pub fn from_rows_keep_first(
        columns: Vec<String>,
        mut rows: Vec<(NaiveDateTime, Vec<f64>)>,
    ) -> Result<Self, IoError> {
        let n_cols = columns.len();

        let mut c = ValidationCollector::new();
        for (i, (ts, row)) in rows.iter().enumerate() {
            if row.len() != n_cols {
                c.push(format!(
                    "row {i} ({ts}) has {} values, expected {n_cols}",
                    row.len()
                ));
            }
        }
        c.finish()?;

        let n_in = rows.len();
        rows.sort_by_key(|(ts, _)| *ts);
        rows.dedup_by_key(|(ts, _)| *ts);
        if rows.len() < n_in {
            debug!(
                dropped = n_in - rows.len(),
                "dropped rows with duplicated timestamps"
            );
        }

        let mut index = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len() * n_cols);
        for (ts, row) in rows {
            index.push(ts);
            values.extend(row);
        }

        Self::new(index, columns, values)
    }

    /// Returns the number of rows (timestamps).
    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    /// Returns the number of columns (entities).
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the timestamp index.
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Returns the column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the row-major value buffer.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(col < self.n_cols(), "column {col} out of bounds");
        self.values[row * self.n_cols() + col]
    }

    /// Overwrites the value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either position is out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(col < self.n_cols(), "column {col} out of bounds");
        let n_cols = self.n_cols();
        self.values[row * n_cols + col] = value;
    }

    /// Returns the values of row `i`.
    pub fn row(&self, i: usize) -> &[f64] {
        let n_cols = self.n_cols();
        &self.values[i * n_cols..(i + 1) * n_cols]
    }

    /// Returns an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.n_rows()).map(move |i| self.row(i))
    }

    /// Returns the position of column `name`, if present.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns an iterator over the values of the column at position `col`.
    pub fn column_at(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        let n_cols = self.n_cols();
        self.values.iter().skip(col).step_by(n_cols.max(1)).copied()
    }

    /// Returns a copy of column `name`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownEntity`] if the column does not exist.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, IoError> {
        let col = self.require_column(name)?;
        Ok(self.column_at(col).collect())
    }

    /// Returns a new table holding only `names`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownEntity`] for the first missing name, or
    /// [`IoError::Validation`] if `names` repeats a column.
    pub fn select(&self, names: &[&str]) -> Result<Self, IoError> {
        let positions = names
            .iter()
            .map(|name| self.require_column(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut values = Vec::with_capacity(self.n_rows() * positions.len());
        for row in 0..self.n_rows() {
            values.extend(positions.iter().map(|&col| self.get(row, col)));
        }

        Self::new(
            self.index.clone(),
            names.iter().map(|n| n.to_string()).collect(),
            values,
        )
    }

    /// Renames column `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownEntity`] if `from` is absent, or
    /// [`IoError::Validation`] if the new name collides with another column.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), IoError> {
        let col = self.require_column(from)?;
        let mut renamed = self.columns.clone();
        renamed[col] = to.to_string();
        validate::validate_columns(&renamed).finish()?;
        self.columns = renamed;
        Ok(())
    }

    /// Returns a new table with `data` appended as column `name`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] on a length mismatch or a duplicate
    /// column name.
    pub fn with_column(&self, name: &str, data: &[f64]) -> Result<Self, IoError> {
        if data.len() != self.n_rows() {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "column '{name}' length {} != index length {}",
                    data.len(),
                    self.n_rows()
                ),
            });
        }

        let n_cols = self.n_cols();
        let mut values = Vec::with_capacity(self.n_rows() * (n_cols + 1));
        for (row, &v) in data.iter().enumerate() {
            values.extend_from_slice(&self.values[row * n_cols..(row + 1) * n_cols]);
            values.push(v);
        }

        let mut columns = self.columns.clone();
        columns.push(name.to_string());

        Self::new(self.index.clone(), columns, values)
    }

    /// Returns the total number of missing (`NaN`) cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// Returns `true` if any cell is missing.
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|v| v.is_nan())
    }

    /// Returns the first row where column `name` holds a value.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownEntity`] if the column does not exist.
    pub fn first_valid_row(&self, name: &str) -> Result<Option<usize>, IoError> {
        let col = self.require_column(name)?;
        Ok(self.column_at(col).position(|v| !v.is_nan()))
    }

    /// Returns a new table holding the rows in `range`.
    ///
    /// # Panics
    ///
    /// Panics if `range` extends past the last row.
    pub fn slice_rows(&self, range: Range<usize>) -> Self {
        let n_cols = self.n_cols();
        Self {
            index: self.index[range.clone()].to_vec(),
            columns: self.columns.clone(),
            values: self.values[range.start * n_cols..range.end * n_cols].to_vec(),
        }
    }

    /// Joins two tables on timestamp, keeping rows present in both.
    ///
    /// The result holds the columns of `self` followed by those of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the two tables share a column name.
    pub fn inner_join(&self, other: &Self) -> Result<Self, IoError> {
        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());
        validate::validate_columns(&columns).finish()?;

        let mut index = Vec::new();
        let mut values = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.n_rows() && j < other.n_rows() {
            match self.index[i].cmp(&other.index[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    index.push(self.index[i]);
                    values.extend_from_slice(self.row(i));
                    values.extend_from_slice(other.row(j));
                    i += 1;
                    j += 1;
                }
            }
        }

        debug!(
            left = self.n_rows(),
            right = other.n_rows(),
            joined = index.len(),
            "inner join on timestamp"
        );

        Self::new(index, columns, values)
    }

    fn require_column(&self, name: &str) -> Result<usize, IoError> {
        self.column_position(name)
            .ok_or_else(|| IoError::UnknownEntity {
                id: name.to_string(),
            })
    }
}
