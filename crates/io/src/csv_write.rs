//! Low-level CSV writing through the Arrow CSV writer.

use std::path::Path;

use arrow::array::RecordBatch;
use arrow::csv::WriterBuilder;

use crate::error::IoError;

/// Writes record batches to a CSV file with a header row.
///
/// Nulls are written as empty fields.
///
/// # Errors
///
/// Returns [`IoError::Csv`] if the file cannot be created or written.
pub(crate) fn write_batches(path: &Path, batches: &[RecordBatch]) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::Csv {
        reason: e.to_string(),
    })?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);

    for batch in batches {
        writer.write(batch).map_err(|e| IoError::Csv {
            reason: e.to_string(),
        })?;
    }

    Ok(())
}
