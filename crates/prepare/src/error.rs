//! Error types for the loadcast-prepare crate.

use loadcast_calendar::CalendarError;
use loadcast_io::IoError;
use loadcast_model::ModelError;

/// Error type for all fallible operations in the loadcast-prepare crate.
#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    /// Returned when the requested customer is not a consumption column.
    #[error("customer '{id}' not found in consumption data")]
    UnknownEntity {
        /// The identifier that was looked up.
        id: String,
    },

    /// Returned when a required exogenous column is missing from the features.
    #[error("feature column '{name}' not found")]
    MissingFeature {
        /// Name of the missing column.
        name: String,
    },

    /// Returned when a customer has no observed consumption at all.
    #[error("customer '{id}' has no observed consumption")]
    NoObservations {
        /// The customer identifier.
        id: String,
    },

    /// Returned when a model returns the wrong number of predictions.
    #[error("model returned {got} predictions for {expected} missing cells")]
    PredictionLength {
        /// Number of cells that needed a prediction.
        expected: usize,
        /// Number of predictions returned.
        got: usize,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Table error.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Calendar error.
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// Model error.
    #[error(transparent)]
    Model(#[from] ModelError),
}
