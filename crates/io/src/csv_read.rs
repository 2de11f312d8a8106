//! Low-level CSV reading through the Arrow CSV reader.

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;
use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

use crate::error::IoError;

/// Reads the header and all record batches from a CSV file.
///
/// Type inference is only used to discover the header; the schema is then
/// forced to Utf8 for the first column and nullable Float64 for the rest, so
/// empty fields become nulls instead of changing a column's type.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Csv`] if it cannot be parsed.
pub(crate) fn read_batches(path: &Path) -> Result<(SchemaRef, Vec<RecordBatch>), IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = File::open(path).map_err(csv_err)?;
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(100))
        .map_err(csv_err)?;
    file.seek(SeekFrom::Start(0)).map_err(csv_err)?;

    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .enumerate()
        .map(|(i, f)| {
            if i == 0 {
                Field::new(f.name(), DataType::Utf8, true)
            } else {
                Field::new(f.name(), DataType::Float64, true)
            }
        })
        .collect();
    let schema: SchemaRef = Arc::new(Schema::new(fields));

    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .build(file)
        .map_err(csv_err)?;

    let batches = reader
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_err)?;

    Ok((schema, batches))
}

fn csv_err(e: impl std::fmt::Display) -> IoError {
    IoError::Csv {
        reason: e.to_string(),
    }
}
