//! Error types for Vedic calculations.

use thiserror::Error;

/// Errors from the pure-math layer.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VedicError {
    /// An argument is out of its valid domain.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// A lord-cycle table failed validation.
    #[error("invalid lord cycle: {0}")]
    InvalidCycle(&'static str),
    /// A period's lord does not occur in the cycle used to subdivide it.
    #[error("lord {0} is not part of the cycle")]
    LordNotInCycle(&'static str),
    /// House cusps are non-finite or not in zodiacal order.
    #[error("invalid house cusps: {0}")]
    InvalidCusps(&'static str),
}
