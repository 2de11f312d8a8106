//! Evaluation configuration.

use crate::error::EvaluateError;

/// Configuration for the evaluation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluateConfig {
    top_k: usize,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self { top_k: 3 }
    }
}

impl EvaluateConfig {
    /// Set how many worst entities per group the report lists.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Returns the number of worst entities listed per group.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::InvalidTopK`] when `top_k` is zero.
    pub fn validate(&self) -> Result<(), EvaluateError> {
        if self.top_k == 0 {
            return Err(EvaluateError::InvalidTopK);
        }
        Ok(())
    }
}
