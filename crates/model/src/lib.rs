//! # loadcast-model
//!
//! Forecasting model interfaces and the linear baseline used for imputation
//! and cross-validation.
//!
//! ## Interfaces
//!
//! | Trait | Methods | Implementations |
//! |-------|---------|-----------------|
//! | [`Estimator`] | `fit(x, y)`, `predict(x)` | [`LinearRegression`], [`Pipeline`] |
//! | [`Transformer`] | `fit(x)`, `transform(x)`, `fit_transform(x)` | [`StandardScaler`] |
//!
//! ## Workflow
//!
//! ```
//! use loadcast_model::{
//!     Estimator, LinearRegression, Pipeline, StandardScaler, TimeSeriesSplit, cross_validate,
//! };
//! use ndarray::{Array1, Array2};
//!
//! let x = Array2::from_shape_fn((24, 1), |(i, _)| i as f64);
//! let y = Array1::from_shape_fn(24, |i| 3.0 * i as f64 + 1.0);
//!
//! let model = Pipeline::new(StandardScaler::new(), LinearRegression::new());
//! let scores = cross_validate(&model, &x, &y, &TimeSeriesSplit::new(3)).unwrap();
//! assert_eq!(scores.len(), 3);
//! assert!(scores.iter().all(|s| s.eval_mae < 1e-8));
//! ```
//!
//! ## Losses
//!
//! Rows are timestamps, columns are entities:
//!
//! - [`client_level_loss`]: `Σ_e |p - t|`
//! - [`portfolio_level_loss`]: `|Σ_e p - T|`
//! - [`combined_loss`]: `w1 · client + w2 · portfolio`

mod cv;
mod error;
mod linalg;
mod linear;
mod loss;
mod scaler;
mod split;
mod traits;

pub use cv::{FoldScore, cross_validate, design_matrix};
pub use error::ModelError;
pub use linear::LinearRegression;
pub use loss::{client_level_loss, combined_loss, portfolio_level_loss};
pub use scaler::StandardScaler;
pub use split::{Fold, TimeSeriesSplit};
pub use traits::{Estimator, Pipeline, Transformer};
