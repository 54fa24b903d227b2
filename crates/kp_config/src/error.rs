//! Error types for configuration loading.

use thiserror::Error;

/// Errors from loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(String),
    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(String),
    /// A policy failed validation.
    #[error("invalid policy '{name}': {reason}")]
    InvalidPolicy { name: String, reason: String },
    /// Engine settings failed validation.
    #[error("invalid engine settings: {0}")]
    InvalidEngine(String),
    /// Strict lookup of a policy name that is not defined.
    #[error("unknown policy '{0}'")]
    UnknownPolicy(String),
}
