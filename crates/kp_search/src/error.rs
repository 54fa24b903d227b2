//! Error types for chart building and window search.

use kp_config::ConfigError;
use kp_core::EphemerisError;
use kp_time::TimeError;
use kp_vedic_base::VedicError;
use thiserror::Error;

/// Errors from the search layer.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Malformed birth data, instant or location.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The ephemeris provider failed or returned unusable data.
    #[error("ephemeris unavailable: {0}")]
    EphemerisUnavailable(EphemerisError),
    /// Every relaxation step still left zero candidate windows.
    #[error("no candidate windows in the period hierarchy")]
    NoCandidates,
    /// Strict policy lookup failed.
    #[error("unknown policy '{0}'")]
    UnknownPolicy(String),
    /// Error from the pure-math layer.
    #[error("calculation error: {0}")]
    Vedic(VedicError),
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(ConfigError),
}

impl From<EphemerisError> for SearchError {
    fn from(e: EphemerisError) -> Self {
        match e {
            EphemerisError::InvalidLocation(msg) => Self::InvalidInput(msg.to_string()),
            other => Self::EphemerisUnavailable(other),
        }
    }
}

impl From<TimeError> for SearchError {
    fn from(e: TimeError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

impl From<VedicError> for SearchError {
    fn from(e: VedicError) -> Self {
        Self::Vedic(e)
    }
}

impl From<ConfigError> for SearchError {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::UnknownPolicy(name) => Self::UnknownPolicy(name),
            other => Self::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_errors_are_input_errors() {
        let e: SearchError = EphemerisError::InvalidLocation("latitude").into();
        assert!(matches!(e, SearchError::InvalidInput(_)));
        let e: SearchError = EphemerisError::Unavailable("no data".into()).into();
        assert!(matches!(e, SearchError::EphemerisUnavailable(_)));
    }

    #[test]
    fn missing_offset_is_input_error() {
        let e: SearchError = TimeError::MissingOffset("1990-01-01T00:00:00".into()).into();
        assert!(matches!(e, SearchError::InvalidInput(_)));
    }

    #[test]
    fn unknown_policy_keeps_its_kind() {
        let e: SearchError = ConfigError::UnknownPolicy("x".into()).into();
        assert_eq!(e, SearchError::UnknownPolicy("x".into()));
    }
}
