//! Predicted/true table pairs and their structural validation.

use loadcast_calendar::Country;
use loadcast_io::ConsumptionTable;

use crate::error::{EvaluateError, TableRole};

/// A forecast and its ground truth for one group.
#[derive(Debug, Clone, Copy)]
pub struct GroupPair<'a> {
    predicted: &'a ConsumptionTable,
    actual: &'a ConsumptionTable,
}

impl<'a> GroupPair<'a> {
    /// Pair a forecast with the matching observations.
    pub fn new(predicted: &'a ConsumptionTable, actual: &'a ConsumptionTable) -> Self {
        Self { predicted, actual }
    }

    /// The submitted forecast.
    pub fn predicted(&self) -> &'a ConsumptionTable {
        self.predicted
    }

    /// The observed values.
    pub fn actual(&self) -> &'a ConsumptionTable {
        self.actual
    }

    /// Checks that the pair can be scored.
    ///
    /// Checks run in order and stop at the first failure: identical columns
    /// (names and order), identical index (timestamps and order), then for
    /// the forecast and the ground truth in turn: no missing value and no
    /// infinite value.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::SchemaMismatch`],
    /// [`EvaluateError::MissingValues`] or [`EvaluateError::NonFiniteValues`]
    /// naming `group`.
    pub fn validate(&self, group: Country) -> Result<(), EvaluateError> {
        if let Some(details) = describe_mismatch(
            "column",
            self.predicted.columns(),
            self.actual.columns(),
        ) {
            return Err(EvaluateError::SchemaMismatch { group, details });
        }
        if let Some(details) =
            describe_mismatch("index", self.predicted.index(), self.actual.index())
        {
            return Err(EvaluateError::SchemaMismatch { group, details });
        }

        for (table, role) in [
            (self.predicted, TableRole::Predicted),
            (self.actual, TableRole::True),
        ] {
            let count = table.missing_count();
            if count > 0 {
                return Err(EvaluateError::MissingValues {
                    group,
                    table: role,
                    count,
                });
            }
            let count = table.values().iter().filter(|v| v.is_infinite()).count();
            if count > 0 {
                return Err(EvaluateError::NonFiniteValues {
                    group,
                    table: role,
                    count,
                });
            }
        }

        Ok(())
    }
}

/// Describes the first difference between two sequences, or `None` when
/// they are identical.
fn describe_mismatch<T>(what: &str, predicted: &[T], actual: &[T]) -> Option<String>
where
    T: PartialEq + std::fmt::Display,
{
    if predicted == actual {
        return None;
    }
    if let Some(pos) = predicted.iter().zip(actual).position(|(p, a)| p != a) {
        return Some(format!(
            "{what} {pos}: predicted '{}' vs true '{}'",
            predicted[pos], actual[pos]
        ));
    }
    Some(format!(
        "{what} length: predicted {} vs true {}",
        predicted.len(),
        actual.len()
    ))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn table(columns: &[&str], hours: &[u32], values: Vec<f64>) -> ConsumptionTable {
        let index = hours
            .iter()
            .map(|&h| {
                NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(h, 0, 0)
                    .unwrap()
            })
            .collect();
        ConsumptionTable::new(
            index,
            columns.iter().map(|c| c.to_string()).collect(),
            values,
        )
        .unwrap()
    }

    #[test]
    fn matching_pair_is_valid() {
        let a = table(&["IT_1", "IT_2"], &[0, 1], vec![1.0; 4]);
        let b = table(&["IT_1", "IT_2"], &[0, 1], vec![2.0; 4]);
        assert!(GroupPair::new(&a, &b).validate(Country::It).is_ok());
    }

    #[test]
    fn column_order_is_checked() {
        let a = table(&["IT_2", "IT_1"], &[0], vec![0.0; 2]);
        let b = table(&["IT_1", "IT_2"], &[0], vec![0.0; 2]);
        let err = GroupPair::new(&a, &b).validate(Country::It).unwrap_err();
        match err {
            EvaluateError::SchemaMismatch { group, details } => {
                assert_eq!(group, Country::It);
                assert_eq!(details, "column 0: predicted 'IT_2' vs true 'IT_1'");
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn extra_column_is_checked() {
        let a = table(&["ES_1"], &[0], vec![0.0]);
        let b = table(&["ES_1", "ES_2"], &[0], vec![0.0; 2]);
        let err = GroupPair::new(&a, &b).validate(Country::Es).unwrap_err();
        assert!(err.to_string().contains("column length: predicted 1 vs true 2"));
    }

    #[test]
    fn index_is_checked_after_columns() {
        let a = table(&["ES_1"], &[0, 2], vec![0.0; 2]);
        let b = table(&["ES_1"], &[0, 1], vec![0.0; 2]);
        let err = GroupPair::new(&a, &b).validate(Country::Es).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn missing_forecast_values_rejected() {
        let a = table(&["IT_1"], &[0, 1], vec![1.0, f64::NAN]);
        let b = table(&["IT_1"], &[0, 1], vec![1.0, 1.0]);
        let err = GroupPair::new(&a, &b).validate(Country::It).unwrap_err();
        assert!(matches!(
            err,
            EvaluateError::MissingValues {
                table: TableRole::Predicted,
                count: 1,
                ..
            }
        ));
    }

    #[test]
    fn missing_true_values_rejected() {
        let a = table(&["IT_1"], &[0, 1], vec![1.0, 1.0]);
        let b = table(&["IT_1"], &[0, 1], vec![f64::NAN, f64::NAN]);
        let err = GroupPair::new(&a, &b).validate(Country::It).unwrap_err();
        assert!(matches!(
            err,
            EvaluateError::MissingValues {
                table: TableRole::True,
                count: 2,
                ..
            }
        ));
    }

    #[test]
    fn infinite_true_values_rejected() {
        let a = table(&["IT_1", "IT_2"], &[0], vec![1.0, 1.0]);
        let b = table(&["IT_1", "IT_2"], &[0], vec![f64::INFINITY, f64::NEG_INFINITY]);
        let err = GroupPair::new(&a, &b).validate(Country::It).unwrap_err();
        assert!(matches!(
            err,
            EvaluateError::NonFiniteValues {
                table: TableRole::True,
                count: 2,
                ..
            }
        ));
    }

    #[test]
    fn missing_is_reported_before_infinite() {
        let a = table(&["IT_1", "IT_2"], &[0], vec![f64::NAN, f64::INFINITY]);
        let b = table(&["IT_1", "IT_2"], &[0], vec![1.0, 1.0]);
        let err = GroupPair::new(&a, &b).validate(Country::It).unwrap_err();
        assert!(matches!(err, EvaluateError::MissingValues { count: 1, .. }));
    }
}
