//! The per-customer feature table.

use chrono::NaiveDateTime;
use loadcast_calendar::Country;
use loadcast_io::ConsumptionTable;
use loadcast_model::design_matrix;
use ndarray::{Array1, Array2};

use crate::error::PrepareError;

/// Name of the target column.
pub const CONSUMPTION: &str = "Consumption";

/// Calendar columns appended after the exogenous features, in order.
pub const CALENDAR_COLUMNS: [&str; 14] = [
    "Hour",
    "Day",
    "Month",
    "Year",
    "Dow",
    "IsWeekend",
    "IsHoliday",
    "ActiveDay",
    "HourSin",
    "HourCos",
    "DowSin",
    "DowCos",
    "MonthSin",
    "MonthCos",
];

/// One customer's consumption with exogenous and calendar features.
///
/// Column order: `Consumption`, the two exogenous columns, then
/// [`CALENDAR_COLUMNS`]. Flags are stored as 0.0 / 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerFrame {
    id: String,
    country: Country,
    table: ConsumptionTable,
}

impl CustomerFrame {
    pub(crate) fn new(id: &str, country: Country, table: ConsumptionTable) -> Self {
        Self {
            id: id.to_string(),
            country,
            table,
        }
    }

    /// Customer identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Country the customer belongs to.
    pub fn country(&self) -> Country {
        self.country
    }

    /// The feature table.
    pub fn table(&self) -> &ConsumptionTable {
        &self.table
    }

    /// Consumes the frame, returning its table.
    pub fn into_table(self) -> ConsumptionTable {
        self.table
    }

    /// Timestamps of the frame rows.
    pub fn index(&self) -> &[NaiveDateTime] {
        self.table.index()
    }

    /// Every column except the target.
    pub fn feature_names(&self) -> Vec<&str> {
        self.table
            .columns()
            .iter()
            .map(String::as_str)
            .filter(|name| *name != CONSUMPTION)
            .collect()
    }

    /// Feature matrix and target vector over the rows where the target and
    /// every feature are present.
    ///
    /// # Errors
    ///
    /// Returns [`PrepareError::Io`] if a feature name is not a column.
    pub fn training_data(
        &self,
        features: &[&str],
    ) -> Result<(Array2<f64>, Array1<f64>), PrepareError> {
        let target = self.table.column(CONSUMPTION)?;
        let columns = features
            .iter()
            .map(|name| self.table.column(name))
            .collect::<Result<Vec<_>, _>>()?;

        let keep: Vec<usize> = (0..target.len())
            .filter(|&i| !target[i].is_nan() && columns.iter().all(|c| !c[i].is_nan()))
            .collect();

        let kept_columns: Vec<Vec<f64>> = columns
            .iter()
            .map(|c| keep.iter().map(|&i| c[i]).collect())
            .collect();
        let x = if kept_columns.is_empty() {
            Array2::zeros((keep.len(), 0))
        } else {
            design_matrix(&kept_columns)?
        };
        let y = keep.iter().map(|&i| target[i]).collect();
        Ok((x, y))
    }
}
