//! Configuration for customer frame preparation.

use crate::error::PrepareError;

/// Configuration for [`Preprocessor`](crate::Preprocessor).
///
/// # Example
///
/// ```
/// use loadcast_prepare::PrepareConfig;
///
/// let config = PrepareConfig::new()
///     .with_temp_column("temperature")
///     .with_clip_quantiles(0.05, 0.95);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareConfig {
    spv_column: String,
    temp_column: String,
    clip_lower: f64,
    clip_upper: f64,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PrepareConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `spv_column = "spv"`, `temp_column = "temp"`,
    /// `clip_lower = 0.01`, `clip_upper = 0.99`.
    pub fn new() -> Self {
        Self {
            spv_column: "spv".to_string(),
            temp_column: "temp".to_string(),
            clip_lower: 0.01,
            clip_upper: 0.99,
        }
    }

    /// Sets the name of the solar production feature column.
    pub fn with_spv_column(mut self, name: impl Into<String>) -> Self {
        self.spv_column = name.into();
        self
    }

    /// Sets the name of the temperature feature column.
    pub fn with_temp_column(mut self, name: impl Into<String>) -> Self {
        self.temp_column = name.into();
        self
    }

    /// Sets the quantile band consumption is clipped to.
    pub fn with_clip_quantiles(mut self, lower: f64, upper: f64) -> Self {
        self.clip_lower = lower;
        self.clip_upper = upper;
        self
    }

    /// Returns the solar production column name.
    pub fn spv_column(&self) -> &str {
        &self.spv_column
    }

    /// Returns the temperature column name.
    pub fn temp_column(&self) -> &str {
        &self.temp_column
    }

    /// Returns the lower clipping quantile.
    pub fn clip_lower(&self) -> f64 {
        self.clip_lower
    }

    /// Returns the upper clipping quantile.
    pub fn clip_upper(&self) -> f64 {
        self.clip_upper
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), PrepareError> {
        if self.spv_column.is_empty() || self.temp_column.is_empty() {
            return Err(PrepareError::InvalidConfig {
                reason: "feature column names must not be empty".to_string(),
            });
        }
        if self.spv_column == self.temp_column {
            return Err(PrepareError::InvalidConfig {
                reason: format!(
                    "spv_column and temp_column must differ, both are '{}'",
                    self.spv_column
                ),
            });
        }
        let in_unit = |p: f64| (0.0..=1.0).contains(&p);
        if !in_unit(self.clip_lower) || !in_unit(self.clip_upper) {
            return Err(PrepareError::InvalidConfig {
                reason: format!(
                    "clip quantiles must lie in [0, 1], got {} and {}",
                    self.clip_lower, self.clip_upper
                ),
            });
        }
        if self.clip_lower > self.clip_upper {
            return Err(PrepareError::InvalidConfig {
                reason: format!(
                    "clip_lower ({}) must not exceed clip_upper ({})",
                    self.clip_lower, self.clip_upper
                ),
            });
        }
        Ok(())
    }
}
