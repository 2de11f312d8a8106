//! Weighted combination of the per-group errors into the forecast score.

use std::fmt;

use loadcast_calendar::Country;

use crate::metrics::ErrorReport;

/// The two error measures that enter the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Entity-level, cancellation-insensitive.
    Absolute,
    /// Group-level, cancellation-sensitive.
    Portfolio,
}

impl ErrorKind {
    /// Row label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::Absolute => "Absolute Error",
            ErrorKind::Portfolio => "Portfolio Error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score components in summation order.
pub const COMPONENTS: [(ErrorKind, Country); 4] = [
    (ErrorKind::Absolute, Country::It),
    (ErrorKind::Absolute, Country::Es),
    (ErrorKind::Portfolio, Country::It),
    (ErrorKind::Portfolio, Country::Es),
];

/// Weight of one score component.
pub fn weight(kind: ErrorKind, group: Country) -> f64 {
    match (kind, group) {
        (ErrorKind::Absolute, Country::It) => 1.0,
        (ErrorKind::Absolute, Country::Es) => 5.0,
        (ErrorKind::Portfolio, Country::It) => 10.0,
        (ErrorKind::Portfolio, Country::Es) => 50.0,
    }
}

/// One cell of the score table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEntry {
    pub kind: ErrorKind,
    pub group: Country,
    pub raw: f64,
    pub weight: f64,
    pub weighted: f64,
}

/// Raw, weight and weighted value of every component, plus their total.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    entries: [ScoreEntry; 4],
    forecast_score: f64,
}

impl ScoreTable {
    /// Builds the table from the IT and ES error reports.
    pub(crate) fn from_reports(it: &ErrorReport, es: &ErrorReport) -> Self {
        let entries = COMPONENTS.map(|(kind, group)| {
            let report = match group {
                Country::It => it,
                Country::Es => es,
            };
            let raw = match kind {
                ErrorKind::Absolute => report.absolute_error(),
                ErrorKind::Portfolio => report.portfolio_error(),
            };
            let w = weight(kind, group);
            ScoreEntry {
                kind,
                group,
                raw,
                weight: w,
                weighted: w * raw,
            }
        });
        let forecast_score = entries.iter().map(|e| e.weighted).sum();
        Self {
            entries,
            forecast_score,
        }
    }

    /// All entries in [`COMPONENTS`] order.
    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// The entry for one component.
    pub fn entry(&self, kind: ErrorKind, group: Country) -> &ScoreEntry {
        let pos = match (kind, group) {
            (ErrorKind::Absolute, Country::It) => 0,
            (ErrorKind::Absolute, Country::Es) => 1,
            (ErrorKind::Portfolio, Country::It) => 2,
            (ErrorKind::Portfolio, Country::Es) => 3,
        };
        &self.entries[pos]
    }

    /// The entries of one group: absolute first, then portfolio.
    pub fn group_entries(&self, group: Country) -> [&ScoreEntry; 2] {
        [
            self.entry(ErrorKind::Absolute, group),
            self.entry(ErrorKind::Portfolio, group),
        ]
    }

    /// Sum of the weighted components.
    pub fn forecast_score(&self) -> f64 {
        self.forecast_score
    }

    /// The forecast score rounded half away from zero.
    ///
    /// Validated inputs are finite, so the score is finite; a score beyond
    /// the `i64` range saturates at `i64::MAX`.
    pub fn rounded_score(&self) -> i64 {
        self.forecast_score.round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_are_fixed() {
        assert_eq!(weight(ErrorKind::Absolute, Country::It), 1.0);
        assert_eq!(weight(ErrorKind::Absolute, Country::Es), 5.0);
        assert_eq!(weight(ErrorKind::Portfolio, Country::It), 10.0);
        assert_eq!(weight(ErrorKind::Portfolio, Country::Es), 50.0);
    }

    #[test]
    fn labels() {
        assert_eq!(ErrorKind::Absolute.to_string(), "Absolute Error");
        assert_eq!(ErrorKind::Portfolio.label(), "Portfolio Error");
    }

    #[test]
    fn components_cover_every_pair_once() {
        for kind in [ErrorKind::Absolute, ErrorKind::Portfolio] {
            for group in Country::ALL {
                let n = COMPONENTS.iter().filter(|&&c| c == (kind, group)).count();
                assert_eq!(n, 1);
            }
        }
    }
}
