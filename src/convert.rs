//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use loadcast_calendar::{Country, HolidaySet};
use loadcast_evaluate::EvaluateConfig;
use loadcast_io::{Compression, ReaderConfig, WriterConfig};
use loadcast_model::TimeSeriesSplit;
use loadcast_prepare::PrepareConfig;

/// Parses a compression algorithm name string into the corresponding enum variant.
pub fn parse_compression(s: &str) -> Result<Compression> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Compression::None),
        "snappy" => Ok(Compression::Snappy),
        "zstd" => Ok(Compression::Zstd),
        other => bail!("unknown compression: {other:?}"),
    }
}

/// Builds a [`ReaderConfig`] from the TOML I/O configuration.
pub fn build_reader_config(io: &IoToml) -> ReaderConfig {
    ReaderConfig::default().with_timestamp_column(&io.timestamp_column)
}

/// Builds a [`WriterConfig`] from the TOML I/O configuration.
pub fn build_writer_config(io: &IoToml) -> Result<WriterConfig> {
    let compression = parse_compression(&io.compression)?;
    Ok(WriterConfig::default()
        .with_compression(compression)
        .with_timestamp_column(&io.timestamp_column))
}

/// Builds an [`EvaluateConfig`], letting a command-line `top_k` win over the file.
pub fn build_evaluate_config(eval: &EvaluateToml, top_k: Option<usize>) -> EvaluateConfig {
    EvaluateConfig::default().with_top_k(top_k.unwrap_or(eval.top_k))
}

/// Builds a [`PrepareConfig`] from the TOML prepare configuration.
pub fn build_prepare_config(prepare: &PrepareToml) -> PrepareConfig {
    PrepareConfig::default()
        .with_spv_column(&prepare.spv_column)
        .with_temp_column(&prepare.temp_column)
        .with_clip_quantiles(prepare.clip_lower, prepare.clip_upper)
}

/// Parses the holiday dates configured for `country`.
pub fn build_holidays(holidays: &HolidaysToml, country: Country) -> Result<HolidaySet> {
    let dates = match country {
        Country::It => &holidays.it,
        Country::Es => &holidays.es,
    };
    HolidaySet::parse(dates).with_context(|| format!("invalid [holidays].{country} entry"))
}

/// Builds a [`TimeSeriesSplit`], letting a command-line fold count win over the file.
pub fn build_split(cv: &CvToml, n_splits: Option<usize>) -> TimeSeriesSplit {
    let mut split = TimeSeriesSplit::new(n_splits.unwrap_or(cv.n_splits)).with_gap(cv.gap);
    if let Some(size) = cv.test_size {
        split = split.with_test_size(size);
    }
    split
}
