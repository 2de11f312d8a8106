//! Country groups and their resolution from entity identifiers.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// A country-level group of entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Country {
    /// Italy.
    It,
    /// Spain.
    Es,
}

impl Country {
    /// Every known country, in reporting order.
    pub const ALL: [Country; 2] = [Country::It, Country::Es];

    /// Returns the two-letter code used in entity identifiers.
    pub fn code(self) -> &'static str {
        match self {
            Country::It => "IT",
            Country::Es => "ES",
        }
    }

    /// Returns the English country name.
    pub fn name(self) -> &'static str {
        match self {
            Country::It => "Italy",
            Country::Es => "Spain",
        }
    }

    /// Resolves the country of an entity from its identifier.
    ///
    /// An identifier containing `"ES"` maps to Spain; otherwise one
    /// containing `"IT"` maps to Italy. The Spanish code is checked first.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::UnrecognizedGroup`] when neither code
    /// appears. There is no default country.
    pub fn from_entity_id(id: &str) -> Result<Self, CalendarError> {
        if id.contains("ES") {
            Ok(Country::Es)
        } else if id.contains("IT") {
            Ok(Country::It)
        } else {
            Err(CalendarError::UnrecognizedGroup { id: id.to_string() })
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "IT" => Ok(Country::It),
            "ES" => Ok(Country::Es),
            _ => Err(CalendarError::UnknownCountryCode {
                code: s.to_string(),
            }),
        }
    }
}
