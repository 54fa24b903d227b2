//! Low-precision mean-element provider.
//!
//! Longitudes come from linear mean elements (plus a single elongation term
//! for Mercury and Venus), shifted to the sidereal zodiac by a linear
//! ayanamsha. Cusps are equal houses from the Lagna computed with the
//! Meeus Ch. 13 formula. Good to about a degree for the Sun and outer
//! bodies and a few degrees for the Moon and inner bodies: enough for
//! demos and deterministic tests, not for chart work.

use std::f64::consts::TAU;

use kp_time::J2000_JD;

use crate::{Body, EphemerisError, EphemerisProvider, GeoLocation, wrap_360};

/// Mean obliquity of the ecliptic at J2000, radians.
const OBLIQUITY_J2000_RAD: f64 = 0.409_092_804_222_329;

/// Ayanamsha at J2000 (Lahiri-like), degrees.
const AYANAMSHA_J2000_DEG: f64 = 23.853;

/// Precession rate, degrees per day (50.29"/yr).
const AYANAMSHA_RATE_DEG_PER_DAY: f64 = 50.29 / 3600.0 / 365.25;

/// (mean longitude at J2000 in degrees, mean motion in degrees/day), tropical.
const MEAN_ELEMENTS: [(f64, f64); 8] = [
    (280.466_46, 0.985_647_36),  // Sun
    (218.316_5, 13.176_396_48),  // Moon
    (280.466_46, 0.985_647_36),  // Mercury (mean = Sun)
    (280.466_46, 0.985_647_36),  // Venus (mean = Sun)
    (355.433, 0.524_033),        // Mars
    (34.351, 0.083_086),         // Jupiter
    (50.077, 0.033_46),          // Saturn
    (125.044_5, -0.052_953_9),   // Mean node
];

/// Elongation swing for inner bodies: (amplitude deg, phase at J2000 deg, rate deg/day).
const MERCURY_SWING: (f64, f64, f64) = (22.0, 174.79, 3.106_7);
const VENUS_SWING: (f64, f64, f64) = (46.0, 50.42, 0.616_5);

/// Deterministic mean-element ephemeris. Needs no data files.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SyntheticEphemeris;

impl SyntheticEphemeris {
    pub fn new() -> Self {
        Self
    }

    fn ayanamsha_deg(days: f64) -> f64 {
        AYANAMSHA_J2000_DEG + AYANAMSHA_RATE_DEG_PER_DAY * days
    }

    fn tropical_longitude_deg(body: Body, days: f64) -> f64 {
        let (l0, n) = MEAN_ELEMENTS[body.index()];
        let mean = l0 + n * days;
        let swing = match body {
            Body::Mercury => Some(MERCURY_SWING),
            Body::Venus => Some(VENUS_SWING),
            _ => None,
        };
        match swing {
            Some((amp, phase, rate)) => mean + amp * (phase + rate * days).to_radians().sin(),
            None => mean,
        }
    }

    /// Tropical Lagna longitude in degrees.
    fn lagna_deg(jd_utc: f64, location: &GeoLocation) -> f64 {
        let days = jd_utc - J2000_JD;
        let gmst_deg = 280.460_618_37 + 360.985_647_366_29 * days;
        let lst = (gmst_deg.to_radians() + location.longitude_rad()).rem_euclid(TAU);
        let eps = OBLIQUITY_J2000_RAD;
        let phi = location.latitude_rad();
        let asc = f64::atan2(-lst.cos(), lst.sin() * eps.cos() + phi.tan() * eps.sin());
        asc.rem_euclid(TAU).to_degrees()
    }
}

impl EphemerisProvider for SyntheticEphemeris {
    fn name(&self) -> &'static str {
        "synthetic-mean-elements"
    }

    fn longitude_deg(&self, body: Body, jd_utc: f64) -> Result<f64, EphemerisError> {
        if !jd_utc.is_finite() {
            return Err(EphemerisError::Unavailable(format!(
                "non-finite epoch {jd_utc}"
            )));
        }
        let days = jd_utc - J2000_JD;
        let sidereal = Self::tropical_longitude_deg(body, days) - Self::ayanamsha_deg(days);
        Ok(wrap_360(sidereal))
    }

    fn house_cusps_deg(
        &self,
        jd_utc: f64,
        location: &GeoLocation,
    ) -> Result<[f64; 12], EphemerisError> {
        location.validate()?;
        if !jd_utc.is_finite() {
            return Err(EphemerisError::Unavailable(format!(
                "non-finite epoch {jd_utc}"
            )));
        }
        let days = jd_utc - J2000_JD;
        let asc = Self::lagna_deg(jd_utc, location) - Self::ayanamsha_deg(days);
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = wrap_360(asc + 30.0 * i as f64);
        }
        Ok(cusps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ALL_BODIES;

    #[test]
    fn deterministic_for_same_input() {
        let eph = SyntheticEphemeris::new();
        for body in ALL_BODIES {
            let a = eph.longitude_deg(body, 2_447_636.7).unwrap();
            let b = eph.longitude_deg(body, 2_447_636.7).unwrap();
            assert_eq!(a, b);
            assert!((0.0..360.0).contains(&a), "{} out of range: {a}", body.name());
        }
    }

    #[test]
    fn sun_near_sidereal_capricorn_at_j2000() {
        // Tropical ~280.5 deg minus ~23.85 ayanamsha: ~256.6 deg (Dhanu).
        let lon = SyntheticEphemeris.longitude_deg(Body::Sun, J2000_JD).unwrap();
        assert!((lon - 256.61).abs() < 0.1, "got {lon}");
    }

    #[test]
    fn moon_moves_about_13_degrees_per_day() {
        let eph = SyntheticEphemeris;
        let a = eph.longitude_deg(Body::Moon, J2000_JD).unwrap();
        let b = eph.longitude_deg(Body::Moon, J2000_JD + 1.0).unwrap();
        let step = (b - a).rem_euclid(360.0);
        assert!((step - 13.176).abs() < 0.01, "got {step}");
    }

    #[test]
    fn cusps_are_equal_houses() {
        let cusps = SyntheticEphemeris
            .house_cusps_deg(J2000_JD, &GeoLocation::new(28.6139, 77.2090))
            .unwrap();
        for i in 0..12 {
            let next = cusps[(i + 1) % 12];
            let arc = (next - cusps[i]).rem_euclid(360.0);
            assert!((arc - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn bad_location_rejected() {
        let res = SyntheticEphemeris.house_cusps_deg(J2000_JD, &GeoLocation::new(120.0, 0.0));
        assert!(matches!(res, Err(EphemerisError::InvalidLocation(_))));
    }

    #[test]
    fn non_finite_epoch_unavailable() {
        let res = SyntheticEphemeris.longitude_deg(Body::Sun, f64::NAN);
        assert!(matches!(res, Err(EphemerisError::Unavailable(_))));
    }
}
