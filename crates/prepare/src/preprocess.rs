//! Building per-customer frames from consumption and exogenous features.

use std::path::Path;

use loadcast_calendar::{CalendarFields, Country, HolidayCalendar};
use loadcast_io::{ConsumptionTable, DuplicatePolicy, ReaderConfig, read_table};
use loadcast_stats::{clip_to_quantiles, nan_streaks};
use tracing::{debug, info, warn};

use crate::config::PrepareConfig;
use crate::error::PrepareError;
use crate::frame::{CALENDAR_COLUMNS, CONSUMPTION, CustomerFrame};

/// Joins consumption with exogenous features and derives customer frames.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    joined: ConsumptionTable,
    customers: Vec<String>,
    config: PrepareConfig,
}

impl Preprocessor {
    /// Inner-joins `consumption` with `features` on timestamp.
    ///
    /// Feature timestamps must already be unique; [`load`](Self::load)
    /// reads the feature file keeping the first of any duplicated rows.
    ///
    /// # Errors
    ///
    /// Returns [`PrepareError::Io`] if the two tables share a column name.
    pub fn new(
        consumption: &ConsumptionTable,
        features: &ConsumptionTable,
    ) -> Result<Self, PrepareError> {
        let joined = consumption.inner_join(features)?;
        if joined.is_empty() {
            warn!("consumption and features share no timestamps");
        }
        info!(
            customers = consumption.n_cols(),
            rows = joined.n_rows(),
            "joined consumption with features"
        );
        Ok(Self {
            joined,
            customers: consumption.columns().to_vec(),
            config: PrepareConfig::default(),
        })
    }

    /// Reads both files and joins them.
    ///
    /// Consumption follows `reader` as given; features are always read with
    /// [`DuplicatePolicy::KeepFirst`].
    ///
    /// # Errors
    ///
    /// Propagates read errors and the errors of [`new`](Self::new).
    pub fn load(
        consumption: &Path,
        features: &Path,
        reader: &ReaderConfig,
    ) -> Result<Self, PrepareError> {
        let consumption = read_table(consumption, reader)?;
        let features = read_table(
            features,
            &reader.clone().with_duplicates(DuplicatePolicy::KeepFirst),
        )?;
        Self::new(&consumption, &features)
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: PrepareConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PrepareConfig {
        &self.config
    }

    /// Customer identifiers available for [`customer_frame`](Self::customer_frame).
    pub fn customers(&self) -> &[String] {
        &self.customers
    }

    /// Builds the feature frame of one customer.
    ///
    /// Rows before the customer's first observation are dropped, calendar
    /// and holiday features are appended, and consumption is clipped to its
    /// configured quantile band.
    ///
    /// # Errors
    ///
    /// - [`PrepareError::UnknownEntity`] if `id` is not a consumption column.
    /// - [`PrepareError::Calendar`] if no country can be derived from `id`.
    /// - [`PrepareError::MissingFeature`] if an exogenous column is absent.
    /// - [`PrepareError::NoObservations`] if the customer has no data.
    pub fn customer_frame(
        &self,
        id: &str,
        holidays: &dyn HolidayCalendar,
    ) -> Result<CustomerFrame, PrepareError> {
        self.config.validate()?;
        if !self.customers.iter().any(|c| c == id) {
            return Err(PrepareError::UnknownEntity { id: id.to_string() });
        }
        let country = Country::from_entity_id(id)?;

        let spv = self.config.spv_column();
        let temp = self.config.temp_column();
        for name in [spv, temp] {
            if self.joined.column_position(name).is_none() {
                return Err(PrepareError::MissingFeature {
                    name: name.to_string(),
                });
            }
        }

        let selected = self.joined.select(&[id, spv, temp])?;
        let first = selected
            .first_valid_row(id)?
            .ok_or_else(|| PrepareError::NoObservations { id: id.to_string() })?;
        let trimmed = selected.slice_rows(first..selected.n_rows());

        let mut consumption = trimmed.column(id)?;
        for streak in nan_streaks(&consumption) {
            debug!(id, start = streak.start, len = streak.len, "missing run");
        }
        if let Some((lower, upper)) = clip_to_quantiles(
            &mut consumption,
            self.config.clip_lower(),
            self.config.clip_upper(),
        ) {
            debug!(id, lower, upper, "clipped consumption");
        }

        let index = trimmed.index().to_vec();
        let n = index.len();
        let mut calendar: Vec<Vec<f64>> = vec![Vec::with_capacity(n); CALENDAR_COLUMNS.len()];
        for ts in &index {
            let f = CalendarFields::from_timestamp(ts);
            let (hour_sin, hour_cos) = f.hour_cyclic();
            let (dow_sin, dow_cos) = f.dow_cyclic();
            let (month_sin, month_cos) = f.month_cyclic();
            let row = [
                f.hour as f64,
                f.day as f64,
                f.month as f64,
                f.year as f64,
                f.dow as f64,
                flag(f.is_weekend()),
                flag(holidays.is_holiday(ts.date())),
                flag(f.is_active_day()),
                hour_sin,
                hour_cos,
                dow_sin,
                dow_cos,
                month_sin,
                month_cos,
            ];
            for (col, v) in calendar.iter_mut().zip(row) {
                col.push(v);
            }
        }

        let mut columns = vec![
            (CONSUMPTION.to_string(), consumption),
            (spv.to_string(), trimmed.column(spv)?),
            (temp.to_string(), trimmed.column(temp)?),
        ];
        columns.extend(
            CALENDAR_COLUMNS
                .iter()
                .map(|name| name.to_string())
                .zip(calendar),
        );

        let table = ConsumptionTable::from_columns(index, columns)?;
        info!(
            id,
            country = %country,
            rows = table.n_rows(),
            dropped = first,
            "built customer frame"
        );
        Ok(CustomerFrame::new(id, country, table))
    }
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}
