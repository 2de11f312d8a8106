//! High-level table reader configuration and orchestration.

use std::path::Path;

use tracing::{debug, info};

use crate::batch;
use crate::csv_read;
use crate::error::IoError;
use crate::parquet_read;
use crate::table::ConsumptionTable;

/// What to do with rows that repeat an earlier timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with a validation error (rows must already be chronological).
    #[default]
    Reject,
    /// Sort rows chronologically and keep the first occurrence of each
    /// timestamp.
    KeepFirst,
}

/// On-disk table format, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Detects the format from the extension of `path` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] for any other extension.
    pub(crate) fn from_path(path: &Path) -> Result<Self, IoError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" => Ok(Self::Parquet),
            _ => Err(IoError::UnsupportedFormat { extension }),
        }
    }
}

/// Configuration for reading a wide timestamp-indexed table.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Name of the timestamp column (must be the first column).
    timestamp_column: String,
    /// Handling of repeated timestamps.
    duplicates: DuplicatePolicy,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            timestamp_column: "timestamp".into(),
            duplicates: DuplicatePolicy::Reject,
        }
    }
}

impl ReaderConfig {
    /// Set the timestamp column name.
    pub fn with_timestamp_column(mut self, name: impl Into<String>) -> Self {
        self.timestamp_column = name.into();
        self
    }

    /// Set the duplicate-timestamp policy.
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Returns the timestamp column name.
    pub fn timestamp_column(&self) -> &str {
        &self.timestamp_column
    }

    /// Returns the duplicate-timestamp policy.
    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }
}

/// Read a wide table from a `.csv` or `.parquet` file.
///
/// The first column holds timestamps; every other column is one entity.
/// Empty CSV fields, `NaN` and Parquet nulls become missing values.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unknown extensions,
/// [`IoError::FileNotFound`] when the file is absent, and format, timestamp
/// or validation errors otherwise.
pub fn read_table(path: &Path, config: &ReaderConfig) -> Result<ConsumptionTable, IoError> {
    let format = TableFormat::from_path(path)?;

    let (schema, batches) = match format {
        TableFormat::Csv => csv_read::read_batches(path)?,
        TableFormat::Parquet => parquet_read::read_batches(path)?,
    };
    debug!(
        path = %path.display(),
        n_batches = batches.len(),
        n_fields = schema.fields().len(),
        "read record batches"
    );

    let columns = batch::entity_columns(&schema, &config.timestamp_column)?;
    let table = batch::table_from_batches(columns, &batches, config.duplicates)?;

    info!(
        path = %path.display(),
        n_rows = table.n_rows(),
        n_cols = table.n_cols(),
        n_missing = table.missing_count(),
        "table loaded"
    );

    Ok(table)
}
