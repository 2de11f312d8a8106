//! Conversion between Arrow record batches and [`ConsumptionTable`].
//!
//! Both file formats share one wide layout: a timestamp column first, then
//! one Float64 column per entity. Nulls map to `NaN` on the way in and `NaN`
//! maps back to null on the way out.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray, Float64Array, RecordBatch, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Float64Type, Schema};
use chrono::NaiveDateTime;

use crate::error::IoError;
use crate::reader::DuplicatePolicy;
use crate::table::ConsumptionTable;
use crate::timestamp::{format_timestamp, parse_timestamp};

/// Builds the Arrow schema used when writing a table.
pub(crate) fn build_schema(timestamp_column: &str, columns: &[String]) -> Schema {
    let mut fields = Vec::with_capacity(columns.len() + 1);
    fields.push(Field::new(timestamp_column, DataType::Utf8, false));
    fields.extend(
        columns
            .iter()
            .map(|name| Field::new(name, DataType::Float64, true)),
    );
    Schema::new(fields)
}

/// Checks that the first field of `schema` is the timestamp column and
/// returns the entity column names that follow it.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if the schema has no fields or the first
/// field is not named `timestamp_column`.
pub(crate) fn entity_columns(
    schema: &Schema,
    timestamp_column: &str,
) -> Result<Vec<String>, IoError> {
    let first = schema.fields().first().ok_or_else(|| IoError::Validation {
        count: 1,
        details: "file has no columns".to_string(),
    })?;

    if first.name() != timestamp_column {
        return Err(IoError::Validation {
            count: 1,
            details: format!(
                "column 0: expected '{timestamp_column}', got '{}'",
                first.name()
            ),
        });
    }

    Ok(schema
        .fields()
        .iter()
        .skip(1)
        .map(|f| f.name().clone())
        .collect())
}

/// Assembles a table from record batches sharing the wide layout.
///
/// The timestamp column may be any type Arrow can cast to Utf8 (strings or
/// native timestamps); entity columns may be any numeric type.
///
/// # Errors
///
/// Returns [`IoError::Validation`] on a missing timestamp or a non-numeric
/// column, [`IoError::InvalidTime`] on an unparseable timestamp, and the
/// table constructor's errors otherwise.
pub(crate) fn table_from_batches(
    columns: Vec<String>,
    batches: &[RecordBatch],
    duplicates: DuplicatePolicy,
) -> Result<ConsumptionTable, IoError> {
    let n_cols = columns.len();
    let mut rows: Vec<(NaiveDateTime, Vec<f64>)> = Vec::new();

    for batch in batches {
        let ts_array = cast(batch.column(0), &DataType::Utf8).map_err(|e| IoError::Validation {
            count: 1,
            details: format!("timestamp column cannot be read as text: {e}"),
        })?;
        let ts_col = ts_array.as_string::<i32>();

        let value_arrays: Vec<ArrayRef> = (1..=n_cols)
            .map(|j| {
                cast(batch.column(j), &DataType::Float64).map_err(|e| IoError::Validation {
                    count: 1,
                    details: format!("column '{}' is not numeric: {e}", columns[j - 1]),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let value_cols: Vec<&Float64Array> = value_arrays
            .iter()
            .map(|a| a.as_primitive::<Float64Type>())
            .collect();

        for row in 0..batch.num_rows() {
            if ts_col.is_null(row) {
                return Err(IoError::Validation {
                    count: 1,
                    details: format!("missing timestamp in row {}", rows.len()),
                });
            }
            let ts = parse_timestamp(ts_col.value(row))?;
            let values = value_cols
                .iter()
                .map(|col| {
                    if col.is_null(row) {
                        f64::NAN
                    } else {
                        col.value(row)
                    }
                })
                .collect();
            rows.push((ts, values));
        }
    }

    match duplicates {
        DuplicatePolicy::KeepFirst => ConsumptionTable::from_rows_keep_first(columns, rows),
        DuplicatePolicy::Reject => {
            let mut index = Vec::with_capacity(rows.len());
            let mut values = Vec::with_capacity(rows.len() * n_cols);
            for (ts, row) in rows {
                index.push(ts);
                values.extend(row);
            }
            ConsumptionTable::new(index, columns, values)
        }
    }
}

/// Converts a table into a single record batch with the schema returned by
/// [`build_schema`].
///
/// # Errors
///
/// Returns [`IoError::Validation`] if Arrow rejects the assembled columns.
pub(crate) fn table_to_record_batch(
    table: &ConsumptionTable,
    timestamp_column: &str,
) -> Result<RecordBatch, IoError> {
    let schema = build_schema(timestamp_column, table.columns());

    let timestamps: Vec<String> = table.index().iter().map(format_timestamp).collect();
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.n_cols() + 1);
    arrays.push(Arc::new(StringArray::from(timestamps)));

    for col in 0..table.n_cols() {
        let data: Vec<Option<f64>> = table
            .column_at(col)
            .map(|v| if v.is_nan() { None } else { Some(v) })
            .collect();
        arrays.push(Arc::new(Float64Array::from(data)));
    }

    RecordBatch::try_new(Arc::new(schema), arrays).map_err(|e| IoError::Validation {
        count: 1,
        details: e.to_string(),
    })
}
