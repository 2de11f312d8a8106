//! Error types for loadcast-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the loadcast-io crate.
///
/// Covers I/O failures, format-specific errors from the CSV and Parquet
/// backends, timestamp parsing, table validation problems, and lookups of
/// entities that are not present in a table.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV reader or writer.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet library.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a requested entity column is not present in a table.
    #[error("entity '{id}' not found in table")]
    UnknownEntity {
        /// The identifier that was looked up.
        id: String,
    },

    /// Returned when a timestamp cannot be parsed.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// Returned when a path has an extension no reader or writer handles.
    #[error("unsupported file extension '{extension}'; use .csv or .parquet")]
    UnsupportedFormat {
        /// The lower-cased extension (may be empty).
        extension: String,
    },
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}
