//! Cross-validation of an estimator over time-series folds.

use loadcast_stats::mean_absolute_error;
use ndarray::{Array1, Array2, ArrayView1, s};
use tracing::{info, info_span};

use crate::error::ModelError;
use crate::split::TimeSeriesSplit;
use crate::traits::Estimator;

/// Scores of one cross-validation fold.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldScore {
    /// Zero-based fold number.
    pub fold: usize,
    /// Number of training rows.
    pub train_size: usize,
    /// Number of test rows.
    pub test_size: usize,
    /// Mean absolute error on the training rows.
    pub train_mae: f64,
    /// Mean absolute error on the test rows.
    pub eval_mae: f64,
}

/// Fits a fresh copy of `model` on each fold's training rows and scores it
/// on both the training and the test rows.
///
/// `model` itself is left untouched.
///
/// # Errors
///
/// Returns [`ModelError::DimensionMismatch`] if `x` and `y` disagree on the
/// sample count, and propagates split, fit and predict errors.
pub fn cross_validate<M: Estimator + Clone>(
    model: &M,
    x: &Array2<f64>,
    y: &Array1<f64>,
    split: &TimeSeriesSplit,
) -> Result<Vec<FoldScore>, ModelError> {
    if x.nrows() != y.len() {
        return Err(ModelError::DimensionMismatch {
            what: "targets",
            expected: x.nrows(),
            got: y.len(),
        });
    }

    let _span = info_span!("cross_validate", n_samples = y.len()).entered();
    let folds = split.split(y.len())?;
    let mut scores = Vec::with_capacity(folds.len());

    for (i, fold) in folds.into_iter().enumerate() {
        let x_train = x.slice(s![fold.train.clone(), ..]).to_owned();
        let y_train = y.slice(s![fold.train.clone()]).to_owned();
        let x_test = x.slice(s![fold.test.clone(), ..]).to_owned();
        let y_test = y.slice(s![fold.test.clone()]).to_owned();

        let mut fitted = model.clone();
        fitted.fit(&x_train, &y_train)?;
        let train_mae = mae(&fitted.predict(&x_train)?, &y_train);
        let eval_mae = mae(&fitted.predict(&x_test)?, &y_test);

        info!(
            fold = i,
            train_size = fold.train.len(),
            test_size = fold.test.len(),
            train_mae,
            eval_mae,
            "fold scored"
        );

        scores.push(FoldScore {
            fold: i,
            train_size: fold.train.len(),
            test_size: fold.test.len(),
            train_mae,
            eval_mae,
        });
    }

    Ok(scores)
}

fn mae(predicted: &Array1<f64>, actual: &Array1<f64>) -> f64 {
    mean_absolute_error(&predicted.to_vec(), &actual.to_vec())
}

/// Stack feature columns into a sample matrix with one row per observation.
///
/// # Errors
///
/// Returns [`ModelError::DimensionMismatch`] if the columns differ in length.
pub fn design_matrix(columns: &[Vec<f64>]) -> Result<Array2<f64>, ModelError> {
    let n_rows = columns.first().map_or(0, Vec::len);
    let mut x = Array2::zeros((n_rows, columns.len()));
    for (j, col) in columns.iter().enumerate() {
        if col.len() != n_rows {
            return Err(ModelError::DimensionMismatch {
                what: "feature column",
                expected: n_rows,
                got: col.len(),
            });
        }
        x.column_mut(j).assign(&ArrayView1::from(col.as_slice()));
    }
    Ok(x)
}
