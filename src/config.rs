use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Loadcast configuration. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadcastConfig {
    /// Evaluation settings.
    #[serde(default)]
    pub evaluate: EvaluateToml,

    /// Customer frame settings.
    #[serde(default)]
    pub prepare: PrepareToml,

    /// Holiday dates per country.
    #[serde(default)]
    pub holidays: HolidaysToml,

    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Cross-validation settings.
    #[serde(default)]
    pub cv: CvToml,
}

impl LoadcastConfig {
    /// Reads the given TOML file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluateToml {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for EvaluateToml {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    3
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrepareToml {
    #[serde(default = "default_spv_column")]
    pub spv_column: String,
    #[serde(default = "default_temp_column")]
    pub temp_column: String,
    #[serde(default = "default_clip_lower")]
    pub clip_lower: f64,
    #[serde(default = "default_clip_upper")]
    pub clip_upper: f64,
}

impl Default for PrepareToml {
    fn default() -> Self {
        Self {
            spv_column: default_spv_column(),
            temp_column: default_temp_column(),
            clip_lower: default_clip_lower(),
            clip_upper: default_clip_upper(),
        }
    }
}

fn default_spv_column() -> String {
    "spv".to_string()
}
fn default_temp_column() -> String {
    "temp".to_string()
}
fn default_clip_lower() -> f64 {
    0.01
}
fn default_clip_upper() -> f64 {
    0.99
}

/// `YYYY-MM-DD` holiday dates keyed by country code.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HolidaysToml {
    #[serde(default, rename = "IT")]
    pub it: Vec<String>,
    #[serde(default, rename = "ES")]
    pub es: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_timestamp_column")]
    pub timestamp_column: String,
}

impl Default for IoToml {
    fn default() -> Self {
        Self {
            compression: default_compression(),
            timestamp_column: default_timestamp_column(),
        }
    }
}

fn default_compression() -> String {
    "snappy".to_string()
}
fn default_timestamp_column() -> String {
    "timestamp".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CvToml {
    #[serde(default = "default_n_splits")]
    pub n_splits: usize,
    #[serde(default)]
    pub gap: usize,
    #[serde(default)]
    pub test_size: Option<usize>,
}

impl Default for CvToml {
    fn default() -> Self {
        Self {
            n_splits: default_n_splits(),
            gap: 0,
            test_size: None,
        }
    }
}

fn default_n_splits() -> usize {
    5
}
