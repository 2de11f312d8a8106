//! Loadcast evaluation: score IT and ES consumption forecasts against the
//! observed values.
//!
//! The forecast score is a fixed weighted sum:
//!
//! | Error kind | IT weight | ES weight |
//! |---|---|---|
//! | Absolute error | 1.0 | 5.0 |
//! | Portfolio error | 10.0 | 50.0 |
//!
//! Absolute error sums `|predicted - true|` over every cell; portfolio error
//! sums, over timestamps, the absolute value of the signed error total across
//! entities.

mod config;
mod error;
mod input;
mod metrics;
mod output;
mod report;
mod scoring;

use loadcast_calendar::Country;
use loadcast_io::ConsumptionTable;
use tracing::{debug, info, info_span};

pub use config::EvaluateConfig;
pub use error::{EvaluateError, TableRole};
pub use input::GroupPair;
pub use metrics::{ConsumerError, ErrorReport};
pub use output::{EvaluationOutput, GroupSummary, ScoreRow, to_json};
pub use report::{REPORT_WIDTH, render_report};
pub use scoring::{COMPONENTS, ErrorKind, ScoreEntry, ScoreTable, weight};

/// Result of one evaluation.
#[derive(Debug, Clone)]
pub struct Evaluation {
    scores: ScoreTable,
    it: ErrorReport,
    es: ErrorReport,
    report: String,
    top_k: usize,
}

impl Evaluation {
    /// Raw, weighted and total scores.
    pub fn score_table(&self) -> &ScoreTable {
        &self.scores
    }

    /// The weighted total.
    pub fn forecast_score(&self) -> f64 {
        self.scores.forecast_score()
    }

    /// Error summary of one group.
    pub fn errors(&self, group: Country) -> &ErrorReport {
        match group {
            Country::It => &self.it,
            Country::Es => &self.es,
        }
    }

    /// The rendered text report.
    pub fn report(&self) -> &str {
        &self.report
    }

    /// Serializable summary listing the configured `top_k` worst entities
    /// per group.
    pub fn to_output(&self) -> EvaluationOutput {
        EvaluationOutput::new(&self.scores, [&self.it, &self.es], self.top_k)
    }

    /// Pretty-printed JSON of [`to_output`](Self::to_output).
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Serialization`] if JSON serialization fails.
    pub fn to_json(&self) -> Result<String, EvaluateError> {
        to_json(&self.to_output())
    }
}

/// Evaluate IT and ES forecasts against the observed values.
///
/// Both pairs are validated before any error is computed; the ES pair is
/// checked first. Error computation then runs for both groups in parallel.
///
/// # Errors
///
/// Returns [`EvaluateError::InvalidTopK`] for a zero `top_k`,
/// [`EvaluateError::SchemaMismatch`] when a forecast's columns or index differ
/// from the observed table, and [`EvaluateError::MissingValues`] or
/// [`EvaluateError::NonFiniteValues`] when either table of a pair has missing
/// or infinite values.
pub fn evaluate(
    predicted_it: &ConsumptionTable,
    predicted_es: &ConsumptionTable,
    true_it: &ConsumptionTable,
    true_es: &ConsumptionTable,
    config: &EvaluateConfig,
) -> Result<Evaluation, EvaluateError> {
    let _span = info_span!("evaluate", top_k = config.top_k()).entered();
    config.validate()?;

    let it_pair = GroupPair::new(predicted_it, true_it);
    let es_pair = GroupPair::new(predicted_es, true_es);
    es_pair.validate(Country::Es)?;
    it_pair.validate(Country::It)?;

    let (it, es) = rayon::join(
        || metrics::compute_errors(Country::It, &it_pair),
        || metrics::compute_errors(Country::Es, &es_pair),
    );
    for r in [&it, &es] {
        debug!(
            group = %r.group(),
            entities = r.ranking().len(),
            absolute_error = r.absolute_error(),
            portfolio_error = r.portfolio_error(),
            "group errors"
        );
    }

    let scores = ScoreTable::from_reports(&it, &es);
    let report = render_report(&scores, &it, &es, config.top_k());
    info!(
        forecast_score = scores.forecast_score(),
        "evaluation complete"
    );

    Ok(Evaluation {
        scores,
        it,
        es,
        report,
        top_k: config.top_k(),
    })
}
