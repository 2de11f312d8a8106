//! JSON output structures for evaluation results.

use crate::error::EvaluateError;
use crate::metrics::{ConsumerError, ErrorReport};
use crate::scoring::{ScoreEntry, ScoreTable};
use serde::Serialize;

/// Top-level evaluation output.
#[derive(Debug, Serialize)]
pub struct EvaluationOutput {
    /// Weighted components in summation order.
    pub score_table: Vec<ScoreRow>,
    /// Per-group error summaries, IT first.
    pub groups: Vec<GroupSummary>,
    pub forecast_score: f64,
    pub forecast_score_rounded: i64,
    pub top_k: usize,
}

/// One weighted score component.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreRow {
    pub metric: String,
    pub group: String,
    pub score: f64,
    pub weight: f64,
    pub weighted_score: f64,
}

impl From<&ScoreEntry> for ScoreRow {
    fn from(e: &ScoreEntry) -> Self {
        Self {
            metric: e.kind.label().to_string(),
            group: e.group.code().to_string(),
            score: e.raw,
            weight: e.weight,
            weighted_score: e.weighted,
        }
    }
}

/// Errors of one group with its worst entities.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub group: String,
    pub absolute_error: f64,
    pub portfolio_error: f64,
    pub top_consumers: Vec<ConsumerError>,
}

impl GroupSummary {
    pub(crate) fn new(report: &ErrorReport, top_k: usize) -> Self {
        Self {
            group: report.group().code().to_string(),
            absolute_error: report.absolute_error(),
            portfolio_error: report.portfolio_error(),
            top_consumers: report.top(top_k).to_vec(),
        }
    }
}

impl EvaluationOutput {
    pub(crate) fn new(scores: &ScoreTable, reports: [&ErrorReport; 2], top_k: usize) -> Self {
        Self {
            score_table: scores.entries().iter().map(ScoreRow::from).collect(),
            groups: reports
                .iter()
                .map(|r| GroupSummary::new(r, top_k))
                .collect(),
            forecast_score: scores.forecast_score(),
            forecast_score_rounded: scores.rounded_score(),
            top_k,
        }
    }
}

/// Serialize evaluation output to a JSON string.
pub fn to_json(output: &EvaluationOutput) -> Result<String, EvaluateError> {
    serde_json::to_string_pretty(output).map_err(|e| EvaluateError::Serialization {
        reason: e.to_string(),
    })
}
