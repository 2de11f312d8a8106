//! Expanding-window train/test splits for ordered samples.

use std::ops::Range;

use crate::error::ModelError;

/// One train/test partition. Both ranges index rows of the sample matrix;
/// training rows always precede test rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    /// Training rows.
    pub train: Range<usize>,
    /// Test rows.
    pub test: Range<usize>,
}

/// Time-series cross-validation splitter.
///
/// Produces `n_splits` folds whose test blocks tile the tail of the series.
/// Fold `i` trains on every row before its test block, minus `gap` rows
/// immediately preceding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSeriesSplit {
    n_splits: usize,
    test_size: Option<usize>,
    gap: usize,
}

impl Default for TimeSeriesSplit {
    fn default() -> Self {
        Self {
            n_splits: 5,
            test_size: None,
            gap: 0,
        }
    }
}

impl TimeSeriesSplit {
    /// A splitter producing `n_splits` folds with default test size and no gap.
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            ..Self::default()
        }
    }

    /// Fix the size of every test block.
    pub fn with_test_size(mut self, test_size: usize) -> Self {
        self.test_size = Some(test_size);
        self
    }

    /// Exclude `gap` rows between each training block and its test block.
    pub fn with_gap(mut self, gap: usize) -> Self {
        self.gap = gap;
        self
    }

    /// Number of folds.
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Explicit test size, if set.
    pub fn test_size(&self) -> Option<usize> {
        self.test_size
    }

    /// Rows left out between train and test.
    pub fn gap(&self) -> usize {
        self.gap
    }

    /// Compute the folds for `n_samples` ordered rows.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidParameter`] for fewer than two splits or
    /// a zero test size, and [`ModelError::InsufficientSamples`] when the
    /// series cannot hold every test block plus a non-empty training block.
    pub fn split(&self, n_samples: usize) -> Result<Vec<Fold>, ModelError> {
        if self.n_splits < 2 {
            return Err(ModelError::InvalidParameter {
                reason: format!("n_splits must be at least 2, got {}", self.n_splits),
            });
        }
        let n_folds = self.n_splits + 1;
        if n_folds > n_samples {
            return Err(ModelError::InsufficientSamples {
                n_samples,
                min: n_folds,
            });
        }

        let test_size = self.test_size.unwrap_or(n_samples / n_folds);
        if test_size == 0 {
            return Err(ModelError::InvalidParameter {
                reason: "test_size must be positive".to_string(),
            });
        }
        let min = self.n_splits * test_size + self.gap + 1;
        if n_samples < min {
            return Err(ModelError::InsufficientSamples { n_samples, min });
        }

        let first_test = n_samples - self.n_splits * test_size;
        Ok((0..self.n_splits)
            .map(|i| {
                let test_start = first_test + i * test_size;
                Fold {
                    train: 0..test_start - self.gap,
                    test: test_start..test_start + test_size,
                }
            })
            .collect())
    }
}
