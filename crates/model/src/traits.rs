//! Model interfaces and their composition.

use ndarray::{Array1, Array2};

use crate::error::ModelError;

/// A supervised forecasting model.
///
/// Rows of `x` are samples, columns are features. Implementations own their
/// fitted state; there is no shared base state between models.
pub trait Estimator {
    /// Fit the model to features `x` and targets `y`.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError>;

    /// Predict one value per row of `x`.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError>;
}

/// A preprocessing step that learns from features and rewrites them.
pub trait Transformer {
    /// Learn the transformation parameters from `x`.
    fn fit(&mut self, x: &Array2<f64>) -> Result<(), ModelError>;

    /// Apply the learned transformation.
    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError>;

    /// Fit on `x`, then transform it.
    fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        self.fit(x)?;
        self.transform(x)
    }
}

/// A transformer followed by an estimator, itself usable as an [`Estimator`].
///
/// The transformer is fitted on the training features only; prediction
/// reuses the fitted parameters.
#[derive(Debug, Clone)]
pub struct Pipeline<T, E> {
    transformer: T,
    estimator: E,
}

impl<T: Transformer, E: Estimator> Pipeline<T, E> {
    /// Chain `transformer` in front of `estimator`.
    pub fn new(transformer: T, estimator: E) -> Self {
        Self {
            transformer,
            estimator,
        }
    }

    /// The preprocessing step.
    pub fn transformer(&self) -> &T {
        &self.transformer
    }

    /// The final model.
    pub fn estimator(&self) -> &E {
        &self.estimator
    }
}

impl<T: Transformer, E: Estimator> Estimator for Pipeline<T, E> {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
        let xt = self.transformer.fit_transform(x)?;
        self.estimator.fit(&xt, y)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>, ModelError> {
        let xt = self.transformer.transform(x)?;
        self.estimator.predict(&xt)
    }
}
