//! Instant handling for period computations.
//!
//! All period arithmetic in the workspace runs on Julian Dates in UTC,
//! carried as plain `f64` day counts. This crate provides:
//! - ISO-8601 / RFC-3339 parsing that insists on an explicit UTC offset
//! - Julian Date ↔ [`chrono::DateTime<Utc>`] conversion
//! - Year arithmetic used for ages and period lengths

pub mod error;
pub mod julian;

pub use error::TimeError;
pub use julian::{
    DAYS_PER_YEAR, J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, datetime_from_jd, format_jd,
    jd_from_datetime, parse_instant, parse_instant_jd, years_between,
};
