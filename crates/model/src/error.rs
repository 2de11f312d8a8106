//! Error types for the loadcast-model crate.

/// Error type for all fallible operations in the loadcast-model crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Returned when `predict` or `transform` is called before `fit`.
    #[error("{model} has not been fitted")]
    NotFitted {
        /// Name of the unfitted model.
        model: &'static str,
    },

    /// Returned when array shapes disagree.
    #[error("dimension mismatch for {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Which quantity was checked.
        what: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when there are too few samples for the requested operation.
    #[error("insufficient samples: got {n_samples}, need at least {min}")]
    InsufficientSamples {
        /// Number of samples provided.
        n_samples: usize,
        /// Minimum number of samples required.
        min: usize,
    },

    /// Returned when training data contains NaN or infinite values.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when a configuration parameter is out of range.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the invalid parameter.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_not_fitted() {
        let err = ModelError::NotFitted {
            model: "LinearRegression",
        };
        assert_eq!(err.to_string(), "LinearRegression has not been fitted");
    }

    #[test]
    fn error_dimension_mismatch() {
        let err = ModelError::DimensionMismatch {
            what: "targets",
            expected: 10,
            got: 9,
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch for targets: expected 10, got 9"
        );
    }

    #[test]
    fn error_insufficient_samples() {
        let err = ModelError::InsufficientSamples {
            n_samples: 3,
            min: 6,
        };
        assert_eq!(err.to_string(), "insufficient samples: got 3, need at least 6");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ModelError>();
    }
}
