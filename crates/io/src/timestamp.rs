//! Timestamp parsing and formatting for table files.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::IoError;

/// Formats accepted for full date-time values, tried in order.
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Format used when writing timestamps back out.
const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a timestamp string.
///
/// Accepts ISO-8601 date-times with a space or `T` separator (seconds
/// optional), and bare dates, which map to midnight. Surrounding whitespace
/// is ignored.
///
/// # Errors
///
/// Returns [`IoError::InvalidTime`] if no accepted format matches.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, IoError> {
    let s = raw.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(dt) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(dt);
    }

    Err(IoError::InvalidTime {
        reason: format!("cannot parse timestamp '{s}'"),
    })
}

/// Format a timestamp the way table writers emit it.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(OUTPUT_FORMAT).to_string()
}
