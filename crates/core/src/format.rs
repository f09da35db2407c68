//! Wire formats for calendar dates (`YYYY-MM-DD`) and slot times (`HH:MM`).

use chrono::{NaiveDate, NaiveTime};

use crate::errors::{BookingError, BookingResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// True when `raw` has exactly the digit/separator layout of `pattern`,
/// where `9` stands for any ASCII digit.
fn has_shape(raw: &str, pattern: &str) -> bool {
    raw.len() == pattern.len()
        && raw
            .bytes()
            .zip(pattern.bytes())
            .all(|(b, p)| if p == b'9' { b.is_ascii_digit() } else { b == p })
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> BookingResult<NaiveDate> {
    if !has_shape(raw, "9999-99-99") {
        return Err(BookingError::InvalidInput(format!(
            "Date '{raw}' must use the YYYY-MM-DD format"
        )));
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| BookingError::InvalidInput(format!("Date '{raw}' is not a calendar date")))
}

/// Parses a strict 24-hour `HH:MM` time of day.
pub fn parse_time(raw: &str) -> BookingResult<NaiveTime> {
    if !has_shape(raw, "99:99") {
        return Err(BookingError::InvalidInput(format!(
            "Time '{raw}' must use the HH:MM format"
        )));
    }

    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|_| BookingError::InvalidInput(format!("Time '{raw}' is not a valid time of day")))
}

/// Serde adapter that writes and reads [`NaiveTime`] as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
