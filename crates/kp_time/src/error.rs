//! Error types for instant parsing and conversion.

use thiserror::Error;

/// Errors from instant parsing or Julian Date conversion.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// The text is not a recognizable ISO-8601 instant.
    #[error("instant parse error: {0}")]
    Parse(String),
    /// The text is a valid local date-time but carries no UTC offset.
    #[error("instant '{0}' has no UTC offset (append 'Z' or '+hh:mm')")]
    MissingOffset(String),
    /// The Julian Date cannot be represented as a calendar instant.
    #[error("julian date out of range: {0}")]
    OutOfRange(f64),
}
