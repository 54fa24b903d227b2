//! Transit triggers: simple sign and aspect checks of current positions
//! against the natal chart.

use kp_core::EphemerisProvider;
use kp_vedic_base::{Graha, RashiLordship, forward_arc, rashi_from_longitude};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::natal::{NatalContext, graha_longitudes_at};

/// Default orb for the Jupiter aspect check, in degrees.
pub const DEFAULT_TRANSIT_ORB_DEG: f64 = 1.5;

/// Forward separations counted as Jupiter aspects.
const JUPITER_ASPECTS_DEG: [f64; 3] = [0.0, 120.0, 240.0];

/// Boolean trigger set at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitTriggers {
    /// Venus occupies the natal 7th-house sign.
    pub venus_transit_7th: bool,
    /// Saturn occupies the natal 10th-house sign.
    pub saturn_in_10th: bool,
    /// Jupiter is within orb of 0/120/240 degrees from the natal 10th lord.
    pub jupiter_aspecting_10th_lord: bool,
}

impl TransitTriggers {
    pub fn any(&self) -> bool {
        self.venus_transit_7th || self.saturn_in_10th || self.jupiter_aspecting_10th_lord
    }
}

/// Whether `to` lies within `orb_deg` of an aspect from `from`.
pub fn within_aspect(from: f64, to: f64, aspects: &[f64], orb_deg: f64) -> bool {
    let arc = forward_arc(from, to);
    aspects.iter().any(|a| {
        let d = (arc - a).abs();
        d.min(360.0 - d) <= orb_deg
    })
}

/// Evaluate the triggers at `jd_utc`.
pub fn transit_triggers(
    natal: &NatalContext,
    provider: &dyn EphemerisProvider,
    jd_utc: f64,
    orb_deg: f64,
    lordship: &RashiLordship,
) -> Result<TransitTriggers, SearchError> {
    if !jd_utc.is_finite() {
        return Err(SearchError::InvalidInput("transit instant must be finite".to_string()));
    }
    if !orb_deg.is_finite() || orb_deg < 0.0 {
        return Err(SearchError::InvalidInput("orb must be finite and non-negative".to_string()));
    }
    let now = graha_longitudes_at(provider, jd_utc)?;
    let sign_now = |g: Graha| now.get(g).map(rashi_from_longitude);

    let seventh = natal.house_signs[6];
    let tenth = natal.house_signs[9];
    let tenth_lord = lordship.lord_of(tenth);

    let jupiter_aspecting_10th_lord = now
        .get(Graha::Guru)
        .zip(natal.longitude(tenth_lord))
        .is_some_and(|(jup, lord)| within_aspect(lord, jup, &JUPITER_ASPECTS_DEG, orb_deg));

    let triggers = TransitTriggers {
        venus_transit_7th: sign_now(Graha::Shukra) == Some(seventh),
        saturn_in_10th: sign_now(Graha::Shani) == Some(tenth),
        jupiter_aspecting_10th_lord,
    };
    debug!("transits at jd {jd_utc:.4} (10th lord {tenth_lord}): {triggers:?}");
    Ok(triggers)
}
