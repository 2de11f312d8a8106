//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`IoError::Validation`], plus standalone helpers that check
//! the structural invariants of a consumption table.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::error::IoError;

// ---------------------------------------------------------------------------
// ValidationCollector
// ---------------------------------------------------------------------------

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Move every error recorded by `other` into this collector.
    pub(crate) fn extend(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    /// Returns `true` when no errors have been recorded.
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Standalone validation helpers
// ---------------------------------------------------------------------------

/// Check that the flat value buffer holds exactly `n_rows * n_cols` cells.
pub(crate) fn validate_shape(n_rows: usize, n_cols: usize, n_values: usize) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    let expected = n_rows * n_cols;
    if n_values != expected {
        c.push(format!(
            "value count {n_values} != {n_rows} rows x {n_cols} columns ({expected})"
        ));
    }

    c
}

/// Check that timestamps are strictly increasing.
///
/// Records one message per offending row, which covers both duplicates and
/// out-of-order rows.
pub(crate) fn validate_index(index: &[NaiveDateTime]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    for (i, pair) in index.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            c.push(format!(
                "timestamps not increasing at row {}: {} after {}",
                i + 1,
                pair[1],
                pair[0]
            ));
        }
    }

    c
}

/// Check that every column name is unique and non-empty.
pub(crate) fn validate_columns(columns: &[String]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(columns.len());

    for (i, name) in columns.iter().enumerate() {
        if name.is_empty() {
            c.push(format!("column {i} has an empty name"));
        } else if !seen.insert(name.as_str()) {
            c.push(format!("duplicate column '{name}'"));
        }
    }

    c
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
