//! # loadcast-io
//!
//! Timestamp-indexed consumption tables and their on-disk formats. Tables
//! are wide: one timestamp column followed by one numeric column per
//! entity, stored as CSV or Parquet.

mod batch;
mod csv_read;
mod csv_write;
mod error;
mod parquet_read;
mod parquet_write;
mod reader;
mod table;
mod timestamp;
mod validate;
mod writer;

pub use error::IoError;
pub use reader::{DuplicatePolicy, ReaderConfig, read_table};
pub use table::ConsumptionTable;
pub use timestamp::{format_timestamp, parse_timestamp};
pub use writer::{Compression, WriterConfig, write_table};
