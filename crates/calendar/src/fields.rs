//! Calendar fields derived from a timestamp.

use std::f64::consts::TAU;

use chrono::{Datelike, NaiveDateTime, Timelike};

/// First hour (inclusive) of the active part of the day.
pub const ACTIVE_DAY_START: u32 = 6;
/// Last hour (inclusive) of the active part of the day.
pub const ACTIVE_DAY_END: u32 = 20;

/// Calendar fields of a single timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    /// Hour of day (0..=23).
    pub hour: u32,
    /// Day of month (1..=31).
    pub day: u32,
    /// Month (1..=12).
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Day of week, Monday = 0 .. Sunday = 6.
    pub dow: u32,
}

impl CalendarFields {
    /// Extracts the fields of `ts`.
    pub fn from_timestamp(ts: &NaiveDateTime) -> Self {
        Self {
            hour: ts.hour(),
            day: ts.day(),
            month: ts.month(),
            year: ts.year(),
            dow: ts.weekday().num_days_from_monday(),
        }
    }

    /// Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        self.dow >= 5
    }

    /// Hour within `ACTIVE_DAY_START..=ACTIVE_DAY_END`.
    pub fn is_active_day(&self) -> bool {
        (ACTIVE_DAY_START..=ACTIVE_DAY_END).contains(&self.hour)
    }

    /// Cyclic encoding of the hour (period 24).
    pub fn hour_cyclic(&self) -> (f64, f64) {
        cyclic(self.hour as f64, 24.0)
    }

    /// Cyclic encoding of the day of week (period 7).
    pub fn dow_cyclic(&self) -> (f64, f64) {
        cyclic(self.dow as f64, 7.0)
    }

    /// Cyclic encoding of the month (period 12, January = 0).
    pub fn month_cyclic(&self) -> (f64, f64) {
        cyclic((self.month - 1) as f64, 12.0)
    }
}

/// Maps `value` on a cycle of length `period` to `(sin, cos)`.
pub fn cyclic(value: f64, period: f64) -> (f64, f64) {
    let angle = TAU * value / period;
    (angle.sin(), angle.cos())
}
