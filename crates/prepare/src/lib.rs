//! # loadcast-prepare
//!
//! Turns raw consumption and exogenous feature tables into model-ready
//! inputs.
//!
//! ```mermaid
//! graph LR
//!     A["consumption + features"] -->|"Preprocessor::new"| B["joined table"]
//!     B -->|".customer_frame(id, &holidays)"| C["CustomerFrame"]
//!     C -->|".training_data(&features)"| D["(x, y)"]
//!     E["table with gaps"] -->|"fit_on_observed(model, &table)"| F["trained model"]
//!     F -->|"Imputer::new(model).fill(&table)"| G["gap-free table"]
//! ```
//!
//! Customer frames carry `Consumption`, the two exogenous columns and the
//! calendar columns listed in [`CALENDAR_COLUMNS`].

mod config;
mod error;
mod frame;
mod impute;
mod preprocess;

pub use config::PrepareConfig;
pub use error::PrepareError;
pub use frame::{CALENDAR_COLUMNS, CONSUMPTION, CustomerFrame};
pub use impute::{CONTEXT_FEATURES, ImputationContext, Imputer, fit_on_observed};
pub use loadcast_stats::{NanStreak, nan_streaks};
pub use preprocess::Preprocessor;
