//! Ephemeris gateway contract.
//!
//! The partition, indexing and scoring engines never compute planetary
//! positions themselves. They consume an [`EphemerisProvider`], which maps
//! an instant + body to a sidereal ecliptic longitude and an instant +
//! location to twelve house cusps. Providers must be deterministic for
//! identical inputs; failures are reported, never retried here.
//!
//! Two providers ship with the crate:
//! - [`SyntheticEphemeris`]: low-precision mean-element model, no data files
//! - [`FixedEphemeris`]: fixed longitudes and cusps, for fixtures

pub mod fixed;
pub mod synthetic;

use thiserror::Error;

pub use fixed::FixedEphemeris;
pub use synthetic::SyntheticEphemeris;

/// Bodies a provider is asked for.
///
/// The descending node is not listed: it is always derived by callers as
/// the antipode of [`Body::MeanNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    /// Mean ascending lunar node.
    MeanNode,
}

/// All queryable bodies in enum order.
pub const ALL_BODIES: [Body; 8] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::MeanNode,
];

impl Body {
    /// Stable lowercase identifier.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "sun",
            Self::Moon => "moon",
            Self::Mercury => "mercury",
            Self::Venus => "venus",
            Self::Mars => "mars",
            Self::Jupiter => "jupiter",
            Self::Saturn => "saturn",
            Self::MeanNode => "mean_node",
        }
    }

    /// 0-based index into [`ALL_BODIES`].
    pub const fn index(self) -> usize {
        match self {
            Self::Sun => 0,
            Self::Moon => 1,
            Self::Mercury => 2,
            Self::Venus => 3,
            Self::Mars => 4,
            Self::Jupiter => 5,
            Self::Saturn => 6,
            Self::MeanNode => 7,
        }
    }
}

/// Geographic location of an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive. Range: [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range: [-180, 180].
    pub longitude_deg: f64,
}

impl GeoLocation {
    /// Create a new geographic location (unvalidated).
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    /// Check both coordinates are finite and within range.
    pub fn validate(&self) -> Result<(), EphemerisError> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(EphemerisError::InvalidLocation(
                "latitude must be within [-90, 90]",
            ));
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err(EphemerisError::InvalidLocation(
                "longitude must be within [-180, 180]",
            ));
        }
        Ok(())
    }

    /// Latitude in radians.
    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    /// Longitude in radians (east positive).
    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

/// Ephemeris gateway errors.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EphemerisError {
    /// The backing source failed or has no data for the request.
    #[error("ephemeris unavailable: {0}")]
    Unavailable(String),
    /// The provider does not serve this body.
    #[error("body not supported by provider: {0}")]
    UnsupportedBody(&'static str),
    /// The observer location is out of range.
    #[error("invalid location: {0}")]
    InvalidLocation(&'static str),
}

/// Fold a longitude into [0, 360).
///
/// Unlike a bare `rem_euclid`, tiny negative inputs that round up to 360.0
/// come back as 0.0, and -0.0 becomes +0.0.
pub fn wrap_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 { 0.0 } else { r + 0.0 }
}

/// The gateway seam between the engines and any ephemeris source.
///
/// Implementations are shared across worker threads, so they must be
/// [`Send`] + [`Sync`] and free of per-request mutable state.
pub trait EphemerisProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Sidereal ecliptic longitude of `body` at `jd_utc`, degrees in [0, 360).
    fn longitude_deg(&self, body: Body, jd_utc: f64) -> Result<f64, EphemerisError>;

    /// Twelve house-cusp longitudes in zodiacal order starting at house 1.
    fn house_cusps_deg(
        &self,
        jd_utc: f64,
        location: &GeoLocation,
    ) -> Result<[f64; 12], EphemerisError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_indices_sequential() {
        for (i, b) in ALL_BODIES.iter().enumerate() {
            assert_eq!(b.index(), i);
        }
    }

    #[test]
    fn wrap_360_stays_half_open() {
        assert_eq!(wrap_360(-1e-18), 0.0);
        assert!(wrap_360(-0.0).is_sign_positive());
        assert!((wrap_360(-10.0) - 350.0).abs() < 1e-12);
        assert!((wrap_360(730.0) - 10.0).abs() < 1e-12);
        assert_eq!(wrap_360(360.0), 0.0);
    }

    #[test]
    fn location_validation() {
        assert!(GeoLocation::new(16.7, 74.25).validate().is_ok());
        assert!(GeoLocation::new(91.0, 0.0).validate().is_err());
        assert!(GeoLocation::new(0.0, -180.5).validate().is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0).validate().is_err());
    }
}
