//! Per-timestamp training losses at client and portfolio level.
//!
//! Rows are timestamps, columns are entities. Each function returns one loss
//! value per row.

use ndarray::{Array1, Array2, Axis};

use crate::error::ModelError;

/// Sum over entities of `|predicted - actual|`, per timestamp.
///
/// # Errors
///
/// Returns [`ModelError::DimensionMismatch`] if the shapes differ.
pub fn client_level_loss(
    predicted: &Array2<f64>,
    actual: &Array2<f64>,
) -> Result<Array1<f64>, ModelError> {
    if predicted.dim() != actual.dim() {
        return Err(ModelError::DimensionMismatch {
            what: "actual values",
            expected: predicted.len(),
            got: actual.len(),
        });
    }
    Ok((predicted - actual).mapv(f64::abs).sum_axis(Axis(1)))
}

/// `|Σ predicted - portfolio|` per timestamp, where `portfolio` is the
/// observed total across entities.
///
/// # Errors
///
/// Returns [`ModelError::DimensionMismatch`] if `portfolio` does not have
/// one value per row.
pub fn portfolio_level_loss(
    predicted: &Array2<f64>,
    portfolio: &Array1<f64>,
) -> Result<Array1<f64>, ModelError> {
    if predicted.nrows() != portfolio.len() {
        return Err(ModelError::DimensionMismatch {
            what: "portfolio totals",
            expected: predicted.nrows(),
            got: portfolio.len(),
        });
    }
    Ok((predicted.sum_axis(Axis(1)) - portfolio).mapv(f64::abs))
}

/// `client_weight * client_level_loss + portfolio_weight * portfolio_level_loss`,
/// with the portfolio totals taken from `actual`.
///
/// # Errors
///
/// Propagates the shape checks of the two component losses.
pub fn combined_loss(
    predicted: &Array2<f64>,
    actual: &Array2<f64>,
    client_weight: f64,
    portfolio_weight: f64,
) -> Result<Array1<f64>, ModelError> {
    let client = client_level_loss(predicted, actual)?;
    let portfolio = portfolio_level_loss(predicted, &actual.sum_axis(Axis(1)))?;
    Ok(client * client_weight + portfolio * portfolio_weight)
}
