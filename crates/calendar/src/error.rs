//! Error types for the loadcast-calendar crate.

/// Error type for all fallible operations in the loadcast-calendar crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when an entity identifier cannot be mapped to a country.
    #[error("country not recognized for id '{id}'")]
    UnrecognizedGroup {
        /// The identifier that could not be mapped.
        id: String,
    },

    /// Returned when a country code string is not one of the known codes.
    #[error("unknown country code '{code}' (expected IT or ES)")]
    UnknownCountryCode {
        /// The code that was provided.
        code: String,
    },

    /// Returned when a holiday date string cannot be parsed.
    #[error("invalid holiday date '{value}': {reason}")]
    InvalidDate {
        /// The raw value.
        value: String,
        /// Parser message.
        reason: String,
    },
}
