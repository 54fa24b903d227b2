//! Julian Date ↔ calendar conversions on top of `chrono`.
//!
//! Julian Dates here are UTC based: `jd = unix_seconds / 86400 + 2440587.5`.
//! Near the present epoch an `f64` JD resolves roughly 40 microseconds.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::error::TimeError;

/// Julian Date of 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Date of J2000.0 (2000-01-01T12:00:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Mean Gregorian year in days, used for period spans and ages.
pub const DAYS_PER_YEAR: f64 = 365.2425;

/// Local date-time layouts that are recognized only to report a missing offset.
const NAIVE_LAYOUTS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse an ISO-8601 / RFC-3339 instant carrying an explicit offset.
///
/// `1990-04-20T05:25:00+05:30` and `1990-04-19T23:55:00Z` denote the same
/// instant. A local date-time without offset is rejected with
/// [`TimeError::MissingOffset`] rather than silently assumed to be UTC.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, TimeError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimeError::Parse("empty instant".to_string()));
    }
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(e) => {
            let is_naive = NAIVE_LAYOUTS
                .iter()
                .any(|layout| NaiveDateTime::parse_from_str(s, layout).is_ok());
            if is_naive {
                Err(TimeError::MissingOffset(s.to_string()))
            } else {
                Err(TimeError::Parse(format!("{s}: {e}")))
            }
        }
    }
}

/// Parse an instant straight to a UTC Julian Date.
pub fn parse_instant_jd(s: &str) -> Result<f64, TimeError> {
    parse_instant(s).map(|dt| jd_from_datetime(&dt))
}

/// Convert a UTC instant to a Julian Date (microsecond input precision).
pub fn jd_from_datetime(dt: &DateTime<Utc>) -> f64 {
    let seconds = dt.timestamp_micros() as f64 / 1e6;
    seconds / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// Convert a UTC Julian Date back to a calendar instant, rounded to the microsecond.
pub fn datetime_from_jd(jd: f64) -> Result<DateTime<Utc>, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::OutOfRange(jd));
    }
    let micros = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1e6).round();
    if micros.abs() >= i64::MAX as f64 {
        return Err(TimeError::OutOfRange(jd));
    }
    DateTime::from_timestamp_micros(micros as i64).ok_or(TimeError::OutOfRange(jd))
}

/// RFC-3339 text (UTC, whole seconds) for a Julian Date.
pub fn format_jd(jd: f64) -> Result<String, TimeError> {
    Ok(datetime_from_jd(jd)?.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Elapsed years between two Julian Dates for a given year length.
pub fn years_between(start_jd: f64, end_jd: f64, days_per_year: f64) -> f64 {
    (end_jd - start_jd) / days_per_year
}
