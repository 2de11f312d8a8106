//! Holiday calendars.
//!
//! Holiday dates are data, not code: a [`HolidaySet`] is built from an
//! explicit list of dates (typically read from configuration).

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::error::CalendarError;

/// Answers whether a date is a public holiday.
pub trait HolidayCalendar {
    /// Returns `true` if `date` is a holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// A calendar with no holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn is_holiday(&self, _date: NaiveDate) -> bool {
        false
    }
}

/// A calendar backed by an explicit set of dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    /// Creates a calendar from dates. Duplicates are ignored.
    pub fn new(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Parses `YYYY-MM-DD` strings into a calendar.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDate`] for the first value that does
    /// not parse.
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Result<Self, CalendarError> {
        let dates = values
            .iter()
            .map(|v| {
                let v = v.as_ref();
                NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").map_err(|e| {
                    CalendarError::InvalidDate {
                        value: v.to_string(),
                        reason: e.to_string(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(dates))
    }

    /// Returns the number of distinct holiday dates.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the calendar holds no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for HolidaySet {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}
