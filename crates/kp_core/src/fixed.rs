//! Table-driven provider returning the same chart for every instant.

use crate::{ALL_BODIES, Body, EphemerisError, EphemerisProvider, GeoLocation, wrap_360};

/// Provider with fixed body longitudes and house cusps.
///
/// Bodies that were never set report [`EphemerisError::Unavailable`], which
/// makes this provider useful for exercising gateway failure paths too.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedEphemeris {
    longitudes: [Option<f64>; 8],
    cusps: [f64; 12],
}

impl FixedEphemeris {
    /// Create a provider with the given cusps and no body longitudes.
    pub fn new(cusps: [f64; 12]) -> Self {
        Self {
            longitudes: [None; 8],
            cusps,
        }
    }

    /// Equal 30-degree houses starting at `ascendant_deg`.
    pub fn equal_houses(ascendant_deg: f64) -> Self {
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = wrap_360(ascendant_deg + 30.0 * i as f64);
        }
        Self::new(cusps)
    }

    /// Set one body's longitude.
    pub fn with_longitude(mut self, body: Body, lon_deg: f64) -> Self {
        self.longitudes[body.index()] = Some(lon_deg);
        self
    }

    /// Set all eight body longitudes in [`ALL_BODIES`] order.
    pub fn with_longitudes(mut self, lons: [f64; 8]) -> Self {
        for (body, lon) in ALL_BODIES.iter().zip(lons) {
            self.longitudes[body.index()] = Some(lon);
        }
        self
    }
}

impl EphemerisProvider for FixedEphemeris {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn longitude_deg(&self, body: Body, _jd_utc: f64) -> Result<f64, EphemerisError> {
        self.longitudes[body.index()]
            .ok_or_else(|| EphemerisError::Unavailable(format!("no longitude for {}", body.name())))
    }

    fn house_cusps_deg(
        &self,
        _jd_utc: f64,
        location: &GeoLocation,
    ) -> Result<[f64; 12], EphemerisError> {
        location.validate()?;
        Ok(self.cusps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_body_is_unavailable() {
        let eph = FixedEphemeris::equal_houses(0.0).with_longitude(Body::Sun, 10.0);
        assert_eq!(eph.longitude_deg(Body::Sun, 0.0), Ok(10.0));
        assert!(matches!(
            eph.longitude_deg(Body::Moon, 0.0),
            Err(EphemerisError::Unavailable(_))
        ));
    }

    #[test]
    fn equal_houses_wrap() {
        let eph = FixedEphemeris::equal_houses(345.0);
        let cusps = eph
            .house_cusps_deg(0.0, &GeoLocation::new(0.0, 0.0))
            .unwrap();
        assert_eq!(cusps[0], 345.0);
        assert_eq!(cusps[1], 15.0);
        assert_eq!(cusps[11], 315.0);
    }

    #[test]
    fn tiny_negative_ascendant_folds_to_zero() {
        let eph = FixedEphemeris::equal_houses(-1e-18);
        let cusps = eph
            .house_cusps_deg(0.0, &GeoLocation::new(0.0, 0.0))
            .unwrap();
        assert_eq!(cusps[0], 0.0);
        assert!(cusps.iter().all(|c| (0.0..360.0).contains(c)));
    }
}
