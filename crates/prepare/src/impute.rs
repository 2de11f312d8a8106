//! Model-based filling of missing consumption cells.
//!
//! Every cell of a wide table is described by an [`ImputationContext`]:
//! the calendar position of its row and the position of its column. A model
//! trained on the contexts of observed cells predicts the missing ones.

use chrono::NaiveDateTime;
use loadcast_calendar::CalendarFields;
use loadcast_io::ConsumptionTable;
use loadcast_model::Estimator;
use loadcast_stats::nan_streaks;
use ndarray::{Array1, Array2};
use tracing::{debug, info, info_span};

use crate::error::PrepareError;

/// Feature names of an imputation context, in matrix column order.
pub const CONTEXT_FEATURES: [&str; 5] = ["hour", "dow", "month", "year", "entity"];

/// Model inputs describing one table cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImputationContext {
    /// Hour of day.
    pub hour: f64,
    /// Day of week, Monday = 0.
    pub dow: f64,
    /// Month, 1..=12.
    pub month: f64,
    /// Calendar year.
    pub year: f64,
    /// Column position of the entity in the table.
    pub entity: f64,
}

impl ImputationContext {
    /// Context of the cell at `ts` in column `entity`.
    pub fn new(ts: &NaiveDateTime, entity: usize) -> Self {
        let f = CalendarFields::from_timestamp(ts);
        Self {
            hour: f.hour as f64,
            dow: f.dow as f64,
            month: f.month as f64,
            year: f.year as f64,
            entity: entity as f64,
        }
    }

    /// Values in [`CONTEXT_FEATURES`] order.
    pub fn to_array(&self) -> [f64; 5] {
        [self.hour, self.dow, self.month, self.year, self.entity]
    }
}

/// Builds the context matrix for `cells`, given as `(row, col)` pairs.
fn context_matrix(table: &ConsumptionTable, cells: &[(usize, usize)]) -> Array2<f64> {
    let mut x = Array2::zeros((cells.len(), CONTEXT_FEATURES.len()));
    for (k, &(row, col)) in cells.iter().enumerate() {
        let ctx = ImputationContext::new(&table.index()[row], col);
        for (j, v) in ctx.to_array().into_iter().enumerate() {
            x[[k, j]] = v;
        }
    }
    x
}

fn cells_where(table: &ConsumptionTable, missing: bool) -> Vec<(usize, usize)> {
    let n_cols = table.n_cols();
    table
        .values()
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_nan() == missing)
        .map(|(i, _)| (i / n_cols, i % n_cols))
        .collect()
}

/// Fits `model` on the contexts of every observed cell of `table` and
/// returns it.
///
/// # Errors
///
/// Returns [`PrepareError::Model`] if fitting fails, including when the
/// table has no observed cells.
pub fn fit_on_observed<M: Estimator>(
    mut model: M,
    table: &ConsumptionTable,
) -> Result<M, PrepareError> {
    let cells = cells_where(table, false);
    let x = context_matrix(table, &cells);
    let y: Array1<f64> = cells.iter().map(|&(r, c)| table.get(r, c)).collect();
    model.fit(&x, &y)?;
    info!(samples = cells.len(), "fitted imputation model");
    Ok(model)
}

/// Fills missing cells with the predictions of an already trained model.
#[derive(Debug, Clone)]
pub struct Imputer<M> {
    model: M,
}

impl<M: Estimator> Imputer<M> {
    /// Wraps a trained model.
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// The wrapped model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns a copy of `table` with every missing cell predicted.
    /// Observed cells are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PrepareError::Model`] if prediction fails and
    /// [`PrepareError::PredictionLength`] if the model returns the wrong
    /// number of values.
    pub fn fill(&self, table: &ConsumptionTable) -> Result<ConsumptionTable, PrepareError> {
        let _span = info_span!("impute", rows = table.n_rows(), cols = table.n_cols()).entered();

        for (col, name) in table.columns().iter().enumerate() {
            let column: Vec<f64> = table.column_at(col).collect();
            let streaks = nan_streaks(&column);
            if let Some(longest) = streaks.iter().max_by_key(|s| s.len) {
                debug!(
                    entity = %name,
                    runs = streaks.len(),
                    longest = longest.len,
                    longest_start = longest.start,
                    "missing runs"
                );
            }
        }

        let cells = cells_where(table, true);
        let mut filled = table.clone();
        if cells.is_empty() {
            info!("no missing cells");
            return Ok(filled);
        }

        let x = context_matrix(table, &cells);
        let predictions = self.model.predict(&x)?;
        if predictions.len() != cells.len() {
            return Err(PrepareError::PredictionLength {
                expected: cells.len(),
                got: predictions.len(),
            });
        }

        for (&(row, col), &v) in cells.iter().zip(predictions.iter()) {
            filled.set(row, col, v);
        }
        info!(filled = cells.len(), "imputed missing cells");
        Ok(filled)
    }
}
