//! High-level table writer configuration and orchestration.

use std::path::Path;

use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::batch;
use crate::csv_write;
use crate::error::IoError;
use crate::parquet_write;
use crate::reader::TableFormat;
use crate::table::ConsumptionTable;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for writing tables.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Parquet compression algorithm (ignored for CSV).
    compression: Compression,
    /// Name given to the timestamp column.
    timestamp_column: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            timestamp_column: "timestamp".into(),
        }
    }
}

impl WriterConfig {
    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the timestamp column name.
    pub fn with_timestamp_column(mut self, name: impl Into<String>) -> Self {
        self.timestamp_column = name.into();
        self
    }

    /// Returns the compression algorithm.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Returns the timestamp column name.
    pub fn timestamp_column(&self) -> &str {
        &self.timestamp_column
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the timestamp column name is empty
    /// or collides with an entity column of `table`.
    fn validate(&self, table: &ConsumptionTable) -> Result<(), IoError> {
        if self.timestamp_column.is_empty() {
            return Err(IoError::Validation {
                count: 1,
                details: "timestamp column name must not be empty".to_string(),
            });
        }
        if table.column_position(&self.timestamp_column).is_some() {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "entity column '{}' collides with the timestamp column",
                    self.timestamp_column
                ),
            });
        }
        Ok(())
    }
}

/// Write a table to a `.csv` or `.parquet` file.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for unknown extensions,
/// [`IoError::Validation`] if the configuration is invalid, or a format
/// error if writing fails.
pub fn write_table(
    path: &Path,
    table: &ConsumptionTable,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let format = TableFormat::from_path(path)?;
    config.validate(table)?;

    let record_batch = batch::table_to_record_batch(table, &config.timestamp_column)?;

    match format {
        TableFormat::Csv => csv_write::write_batches(path, &[record_batch])?,
        TableFormat::Parquet => {
            let props = WriterProperties::builder()
                .set_compression(config.compression.to_parquet()?)
                .build();
            let schema = record_batch.schema();
            parquet_write::write_batches(path, &[record_batch], &schema, props)?;
        }
    }

    info!(
        path = %path.display(),
        n_rows = table.n_rows(),
        n_cols = table.n_cols(),
        "table written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = WriterConfig::default();
        assert_eq!(config.compression(), Compression::Snappy);
        assert_eq!(config.timestamp_column(), "timestamp");
    }

    #[test]
    fn builder_methods() {
        let config = WriterConfig::default()
            .with_compression(Compression::Zstd)
            .with_timestamp_column("time");
        assert_eq!(config.compression(), Compression::Zstd);
        assert_eq!(config.timestamp_column(), "time");
    }

    #[test]
    fn compression_maps_to_parquet() {
        assert_eq!(
            Compression::None.to_parquet().unwrap(),
            parquet::basic::Compression::UNCOMPRESSED
        );
        assert!(matches!(
            Compression::Zstd.to_parquet().unwrap(),
            parquet::basic::Compression::ZSTD(_)
        ));
    }
}
