//! Absolute error, portfolio error and per-entity error ranking.

use loadcast_calendar::Country;
use serde::Serialize;

use crate::input::GroupPair;

/// Accumulated absolute error of one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumerError {
    pub entity: String,
    pub error: f64,
}

/// Error summary of one validated group.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    group: Country,
    absolute_error: f64,
    portfolio_error: f64,
    ranking: Vec<ConsumerError>,
}

impl ErrorReport {
    /// The group the report belongs to.
    pub fn group(&self) -> Country {
        self.group
    }

    /// Sum over every cell of `|predicted - true|`.
    pub fn absolute_error(&self) -> f64 {
        self.absolute_error
    }

    /// Sum over timestamps of `|Σ_entities (predicted - true)|`.
    pub fn portfolio_error(&self) -> f64 {
        self.portfolio_error
    }

    /// Every entity with its absolute error, largest first. Equal errors
    /// keep column order.
    pub fn ranking(&self) -> &[ConsumerError] {
        &self.ranking
    }

    /// The `k` worst entities (all of them when there are fewer).
    pub fn top(&self, k: usize) -> &[ConsumerError] {
        &self.ranking[..k.min(self.ranking.len())]
    }
}

/// Computes the error summary of a pair that already passed validation.
///
/// Cells are visited row by row; the absolute error is the column-order sum
/// of the per-entity errors, so it always equals the sum of the ranking.
pub(crate) fn compute_errors(group: Country, pair: &GroupPair<'_>) -> ErrorReport {
    let predicted = pair.predicted();
    let actual = pair.actual();
    let n_cols = predicted.n_cols();

    let mut per_entity = vec![0.0_f64; n_cols];
    let mut portfolio_error = 0.0;
    for (p_row, a_row) in predicted.rows().zip(actual.rows()) {
        let mut net = 0.0;
        for (j, (p, a)) in p_row.iter().zip(a_row).enumerate() {
            let diff = p - a;
            per_entity[j] += diff.abs();
            net += diff;
        }
        portfolio_error += net.abs();
    }

    let absolute_error = per_entity.iter().sum();

    let mut ranking: Vec<ConsumerError> = predicted
        .columns()
        .iter()
        .zip(per_entity)
        .map(|(entity, error)| ConsumerError {
            entity: entity.clone(),
            error,
        })
        .collect();
    ranking.sort_by(|a, b| b.error.total_cmp(&a.error));

    ErrorReport {
        group,
        absolute_error,
        portfolio_error,
        ranking,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use loadcast_io::ConsumptionTable;

    use super::*;

    fn table(columns: &[&str], values: Vec<f64>) -> ConsumptionTable {
        let n_rows = values.len() / columns.len();
        let index = (0..n_rows as u32)
            .map(|h| {
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
    fn single_cell_error() {
        let p = table(&["IT_1", "IT_2"], vec![1.0, 0.0, 0.0, 0.0]);
        let t = table(&["IT_1", "IT_2"], vec![0.0; 4]);
        let r = compute_errors(Country::It, &GroupPair::new(&p, &t));
        assert_eq!(r.absolute_error(), 1.0);
        assert_eq!(r.portfolio_error(), 1.0);
        assert_eq!(r.ranking()[0].entity, "IT_1");
    }

    #[test]
    fn opposite_errors_cancel_in_portfolio() {
        let p = table(&["ES_1", "ES_2"], vec![1.0, -1.0]);
        let t = table(&["ES_1", "ES_2"], vec![0.0, 0.0]);
        let r = compute_errors(Country::Es, &GroupPair::new(&p, &t));
        assert_eq!(r.absolute_error(), 2.0);
        assert_eq!(r.portfolio_error(), 0.0);
    }

    #[test]
    fn ranking_is_descending_and_stable() {
        let p = table(&["IT_a", "IT_b", "IT_c", "IT_d"], vec![1.0, 3.0, 1.0, 0.5]);
        let t = table(&["IT_a", "IT_b", "IT_c", "IT_d"], vec![0.0; 4]);
        let r = compute_errors(Country::It, &GroupPair::new(&p, &t));
        let order: Vec<&str> = r.ranking().iter().map(|c| c.entity.as_str()).collect();
        assert_eq!(order, vec!["IT_b", "IT_a", "IT_c", "IT_d"]);
        let total: f64 = r.ranking().iter().map(|c| c.error).sum();
        assert_relative_eq!(total, r.absolute_error(), epsilon = 1e-12);
    }

    #[test]
    fn top_is_capped_by_entity_count() {
        let p = table(&["IT_1", "IT_2"], vec![1.0, 2.0]);
        let t = table(&["IT_1", "IT_2"], vec![0.0, 0.0]);
        let r = compute_errors(Country::It, &GroupPair::new(&p, &t));
        assert_eq!(r.top(1).len(), 1);
        assert_eq!(r.top(10).len(), 2);
    }
}
