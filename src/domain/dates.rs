use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;
use thiserror::Error;

/// Returned by the string formatters when the input cannot be read as a date
pub const INVALID_DATE: &str = "Invalid date";

/// Wall-clock layouts accepted for due dates, interpreted in the caller's time zone
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("no date given")]
    Empty,
    #[error("unrecognized date: {0}")]
    Unrecognized(String),
    #[error("{0} does not exist in the local time zone")]
    Nonexistent(String),
}

/// Parse a user-supplied due date into an absolute instant.
///
/// Accepts RFC 3339 (any offset), `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]`
/// and a bare `YYYY-MM-DD` (midnight). Forms without an offset are read in `tz`.
pub fn parse_due_input<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<DateTime<Utc>, DateError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DateError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| DateError::Unrecognized(raw.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| DateError::Nonexistent(raw.to_string()))
}

/// Whole calendar days from `now`'s date to `due`'s date, both seen in `now`'s zone
fn days_between<Tz: TimeZone>(due: &DateTime<Utc>, now: &DateTime<Tz>) -> i64 {
    let due_day = due.with_timezone(&now.timezone()).date_naive();
    (due_day - now.date_naive()).num_days()
}

/// Human label for a due date relative to `now`.
///
/// Same day → `Today, HH:MM`; next day → `Tomorrow, HH:MM`; two to six days ahead →
/// weekday name; anything else, including the past → `Jan 5, 2024 09:00`.
pub fn label<Tz: TimeZone>(due: &DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    let local = due.with_timezone(&now.timezone());
    match days_between(due, now) {
        0 => format!("Today, {}", local.format("%H:%M")),
        1 => format!("Tomorrow, {}", local.format("%H:%M")),
        2..=6 => local.format("%A, %H:%M").to_string(),
        _ => local.format("%b %-d, %Y %H:%M").to_string(),
    }
}

/// A due date is overdue only once its calendar day has passed
pub fn is_overdue<Tz: TimeZone>(due: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    *due < now.with_timezone(&Utc) && days_between(due, now) != 0
}

/// `label` for raw text; unreadable input yields [`INVALID_DATE`]
pub fn label_str<Tz: TimeZone>(raw: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    match parse_due_input(raw, &now.timezone()) {
        Ok(due) => label(&due, now),
        Err(_) => INVALID_DATE.to_string(),
    }
}

/// `is_overdue` for raw text; unreadable input is never overdue
pub fn is_overdue_str<Tz: TimeZone>(raw: &str, now: &DateTime<Tz>) -> bool {
    parse_due_input(raw, &now.timezone())
        .map(|due| is_overdue(&due, now))
        .unwrap_or(false)
}
