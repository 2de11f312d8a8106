//! # loadcast-calendar
//!
//! Calendar-derived features for hourly consumption series.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use loadcast_calendar::{CalendarFields, Country, HolidayCalendar, HolidaySet};
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 8, 15)
//!     .unwrap()
//!     .and_hms_opt(12, 0, 0)
//!     .unwrap();
//! let fields = CalendarFields::from_timestamp(&ts);
//! assert!(fields.is_active_day());
//!
//! let country = Country::from_entity_id("IT_1023").unwrap();
//! assert_eq!(country, Country::It);
//!
//! let holidays = HolidaySet::parse(&["2024-08-15"]).unwrap();
//! assert!(holidays.is_holiday(ts.date()));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `fields` | Hour/day/month/year/weekday fields and cyclic encodings |
//! | `country` | Country groups and entity-id resolution |
//! | `holiday` | Holiday calendar trait and date-set implementation |
//! | `error` | Error types |

mod country;
mod error;
mod fields;
mod holiday;

pub use country::Country;
pub use error::CalendarError;
pub use fields::{ACTIVE_DAY_END, ACTIVE_DAY_START, CalendarFields, cyclic};
pub use holiday::{HolidayCalendar, HolidaySet, NoHolidays};
