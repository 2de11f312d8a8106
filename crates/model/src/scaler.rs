//! Per-feature standardisation.

use ndarray::{Array1, Array2, Axis};

use crate::error::ModelError;
use crate::traits::Transformer;

/// Rescales every feature to zero mean and unit (population) standard
/// deviation. Zero-variance features are only centred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardScaler {
    params: Option<(Array1<f64>, Array1<f64>)>,
}

impl StandardScaler {
    /// An unfitted scaler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Learned per-feature means.
    pub fn means(&self) -> Option<&Array1<f64>> {
        self.params.as_ref().map(|(mean, _)| mean)
    }

    /// Learned per-feature scales (1.0 for constant features).
    pub fn scales(&self) -> Option<&Array1<f64>> {
        self.params.as_ref().map(|(_, scale)| scale)
    }
}

impl Transformer for StandardScaler {
    fn fit(&mut self, x: &Array2<f64>) -> Result<(), ModelError> {
        let mean = x
            .mean_axis(Axis(0))
            .ok_or(ModelError::InsufficientSamples { n_samples: 0, min: 1 })?;
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 0.0 && s.is_finite() { s } else { 1.0 });
        self.params = Some((mean, scale));
        Ok(())
    }

    fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>, ModelError> {
        let (mean, scale) = self.params.as_ref().ok_or(ModelError::NotFitted {
            model: "StandardScaler",
        })?;
        if x.ncols() != mean.len() {
            return Err(ModelError::DimensionMismatch {
                what: "features",
                expected: mean.len(),
                got: x.ncols(),
            });
        }
        Ok((x - mean) / scale)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn standardises_columns() {
        let x = array![[1.0, 10.0], [3.0, 10.0]];
        let mut scaler = StandardScaler::new();
        let out = scaler.fit_transform(&x).unwrap();
        assert_relative_eq!(out[[0, 0]], -1.0, epsilon = 1e-12);
        assert_relative_eq!(out[[1, 0]], 1.0, epsilon = 1e-12);
        // constant column: centred, scale 1
        assert_eq!(out[[0, 1]], 0.0);
        assert_eq!(scaler.scales().unwrap()[1], 1.0);
    }

    #[test]
    fn transform_before_fit_fails() {
        let err = StandardScaler::new().transform(&array![[1.0]]).unwrap_err();
        assert!(matches!(err, ModelError::NotFitted { .. }));
    }

    #[test]
    fn empty_input_rejected() {
        let err = StandardScaler::new()
            .fit(&Array2::zeros((0, 2)))
            .unwrap_err();
        assert!(matches!(err, ModelError::InsufficientSamples { .. }));
    }
}
