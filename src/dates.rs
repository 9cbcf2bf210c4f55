//! Calendar helpers.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Date format used everywhere a date is read or printed.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the local time zone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Monday on or before `date` (ISO weeks start on Monday).
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}
