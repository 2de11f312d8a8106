//! Ordinary least squares regression with an intercept.

use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use crate::error::ModelError;
use crate::linalg::solve;
use crate::traits::Estimator;

/// Relative spread below which a feature column counts as constant.
const CONSTANT_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
struct Coefficients {
    weights: Array1<f64>,
    intercept: f64,
}

/// Linear least-squares model `y = x · w + b`.
///
/// Features are centred before solving the normal equations, so the
/// intercept is recovered exactly. Rank-deficient designs never fail:
/// constant columns, and columns that are linear combinations of earlier
/// columns, receive a zero weight. Fitted values on the training rows are
/// the same as those of any other least-squares solution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearRegression {
    fitted: Option<Coefficients>,
}

impl LinearRegression {
    /// An unfitted model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fitted feature weights, or `None` before `fit`.
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.fitted.as_ref().map(|c| &c.weights)
    }

    /// Fitted intercept, or `None` before `fit`.
    pub fn intercept(&self) -> Option<f64> {
        self.fitted.as_ref().map(|c| c.intercept)
    }
}

impl Estimator for LinearRegression {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
        let (n, p) = x.dim();
        if y.len() != n {
            return Err(ModelError::DimensionMismatch {
                what: "targets",
                expected: n,
                got: y.len(),
            });
        }
        if n == 0 {
            return Err(ModelError::InsufficientSamples { n_samples: 0, min: 1 });
        }
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteData);
        }

        let x_mean = x
            .mean_axis(Axis(0))
            .ok_or(ModelError::InsufficientSamples { n_samples: 0, min: 1 })?;
        let y_mean = y.sum() / n as f64;
        let xc = x - &x_mean;
        let yc = y - y_mean;

        let active: Vec<usize> = (0..p)
            .filter(|&j| {
                let tol = CONSTANT_TOLERANCE * (1.0 + x_mean[j].abs());
                xc.column(j).iter().any(|v| v.abs() > tol)
            })
            .collect();
        if active.len() < p {
            debug!(
                constant = p - active.len(),
                features = p,
                "constant features get zero weight"
            );
        }

        let mut weights = Array1::zeros(p);
        if !active.is_empty() {
            let xa = xc.select(Axis(1), &active);
            let gram = xa.t().dot(&xa);
            let rhs = xa.t().dot(&yc);
            let solved = solve(gram, rhs);
            if !solved.dependent.is_empty() {
                let dependent: Vec<usize> = solved.dependent.iter().map(|&k| active[k]).collect();
                debug!(?dependent, "linearly dependent features get zero weight");
            }
            for (k, &j) in active.iter().enumerate() {
                weights[j] = solved.x[k];
            }
        }

        let intercept = y_mean - x_mean.dot(&weights);
        self.fitted = Some(Coefficients { weights, intercept });
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        let fitted = self.fitted.as_ref().ok_or(ModelError::NotFitted {
            model: "LinearRegression",
        })?;
        if x.ncols() != fitted.weights.len() {
            return Err(ModelError::DimensionMismatch {
                what: "features",
                expected: fitted.weights.len(),
                got: x.ncols(),
            });
        }
        Ok(x.dot(&fitted.weights) + fitted.intercept)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn recovers_simple_line() {
        let x = array![[0.0], [1.0], [2.0], [3.0]];
        let y = array![1.0, 3.0, 5.0, 7.0];
        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();
        assert_relative_eq!(model.coefficients().unwrap()[0], 2.0, epsilon = 1e-10);
        assert_relative_eq!(model.intercept().unwrap(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn constant_feature_gets_zero_weight() {
        let x = array![[0.0, 5.0], [1.0, 5.0], [2.0, 5.0]];
        let y = array![2.0, 4.0, 6.0];
        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();
        let w = model.coefficients().unwrap();
        assert_relative_eq!(w[0], 2.0, epsilon = 1e-10);
        assert_eq!(w[1], 0.0);
        assert_relative_eq!(model.intercept().unwrap(), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn duplicated_feature_gets_zero_weight() {
        let x = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [4.0, 4.0]];
        let y = array![1.0, 3.0, 5.0, 9.0];
        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();
        let w = model.coefficients().unwrap();
        assert_relative_eq!(w[0], 2.0, epsilon = 1e-10);
        assert_eq!(w[1], 0.0);
        assert_relative_eq!(model.intercept().unwrap(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn redundant_month_encodings_fit() {
        // Three distinct months: month, sin and cos span only two centred
        // directions.
        let months = [1.0, 1.0, 2.0, 2.0, 3.0, 3.0];
        let rows: Vec<[f64; 3]> = months
            .iter()
            .map(|&m: &f64| {
                let angle = std::f64::consts::TAU * m / 12.0;
                [m, angle.sin(), angle.cos()]
            })
            .collect();
        let x = Array2::from_shape_fn((rows.len(), 3), |(i, j)| rows[i][j]);
        let y: Array1<f64> = months.iter().map(|m| 10.0 + 0.5 * m).collect();

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();
        assert_eq!(model.coefficients().unwrap()[2], 0.0);
        let pred = model.predict(&x).unwrap();
        for (p, t) in pred.iter().zip(y.iter()) {
            assert_relative_eq!(*p, *t, epsilon = 1e-8);
        }
    }

    #[test]
    fn predict_before_fit_fails() {
        let err = LinearRegression::new()
            .predict(&array![[1.0]])
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::NotFitted {
                model: "LinearRegression"
            }
        );
    }

    #[test]
    fn target_length_mismatch() {
        let err = LinearRegression::new()
            .fit(&array![[1.0], [2.0]], &array![1.0])
            .unwrap_err();
        assert!(matches!(err, ModelError::DimensionMismatch { .. }));
    }

    #[test]
    fn non_finite_targets_rejected() {
        let err = LinearRegression::new()
            .fit(&array![[1.0], [2.0]], &array![1.0, f64::NAN])
            .unwrap_err();
        assert_eq!(err, ModelError::NonFiniteData);
    }

    #[test]
    fn predict_checks_feature_count() {
        let mut model = LinearRegression::new();
        model
            .fit(&array![[0.0], [1.0]], &array![0.0, 1.0])
            .unwrap();
        assert!(model.predict(&array![[1.0, 2.0]]).is_err());
    }
}
