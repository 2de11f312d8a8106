//! Evaluation error types.

use std::fmt;

use loadcast_calendar::Country;

/// Which side of a forecast pair a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    /// The submitted forecast.
    Predicted,
    /// The observed ground truth.
    True,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRole::Predicted => f.write_str("predicted"),
            TableRole::True => f.write_str("true"),
        }
    }
}

/// Errors that can occur during evaluation.
#[derive(Debug, thiserror::Error)]
pub enum EvaluateError {
    /// Predicted and true tables disagree on columns or index.
    #[error("wrong header, index or order for {group}: {details}")]
    SchemaMismatch { group: Country, details: String },

    /// A table handed to the engine contains missing values.
    #[error("{count} missing value(s) in {table} table for {group}")]
    MissingValues {
        group: Country,
        table: TableRole,
        count: usize,
    },

    /// A table handed to the engine contains infinite values.
    #[error("{count} infinite value(s) in {table} table for {group}")]
    NonFiniteValues {
        group: Country,
        table: TableRole,
        count: usize,
    },

    /// The number of worst entities to report must be positive.
    #[error("top_k must be at least 1")]
    InvalidTopK,

    /// JSON serialization failed.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_display() {
        let err = EvaluateError::NonFiniteValues {
            group: Country::Es,
            table: TableRole::True,
            count: 2,
        };
        assert_eq!(err.to_string(), "2 infinite value(s) in true table for ES");
    }

    #[test]
    fn test_schema_mismatch_display() {
        let err = EvaluateError::SchemaMismatch {
            group: Country::It,
            details: "column 0: 'IT_2' vs 'IT_1'".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("for IT"));
        assert!(msg.contains("column 0: 'IT_2' vs 'IT_1'"));
    }

    #[test]
    fn test_missing_values_display() {
        let err = EvaluateError::MissingValues {
            group: Country::Es,
            table: TableRole::Predicted,
            count: 3,
        };
        assert_eq!(
            err.to_string(),
            "3 missing value(s) in predicted table for ES"
        );
    }

    #[test]
    fn test_serialization_display() {
        let err = EvaluateError::Serialization {
            reason: "invalid JSON".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("serialization error"));
        assert!(msg.contains("invalid JSON"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<EvaluateError>();
    }
}
