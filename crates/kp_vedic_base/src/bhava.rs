//! House (bhava) containment and house ownership.
//!
//! Houses are numbered 1..=12. House `i` spans the forward arc from cusp
//! `i` to cusp `i + 1`; the 12th house closes the circle back to cusp 1.

use crate::error::VedicError;
use crate::graha::{Graha, RashiLordship};
use crate::rashi::{Rashi, rashi_from_longitude};
use crate::util::{forward_arc, normalize_360};

/// Containment tolerance in degrees; a longitude sitting on a cusp within
/// this distance belongs to the earlier house.
pub const CUSP_EPSILON_DEG: f64 = 1e-9;

/// Reject non-finite cusps and cusps that do not advance once around the circle.
pub fn validate_cusps(cusps: &[f64; 12]) -> Result<(), VedicError> {
    if cusps.iter().any(|c| !c.is_finite()) {
        return Err(VedicError::InvalidCusps("non-finite cusp"));
    }
    let total: f64 = (0..12)
        .map(|i| forward_arc(cusps[i], cusps[(i + 1) % 12]))
        .sum();
    if (total - 360.0).abs() > 1e-6 {
        return Err(VedicError::InvalidCusps("cusps are not in zodiacal order"));
    }
    Ok(())
}

/// House (1..=12) containing a longitude.
///
/// The 12th house takes whatever the first eleven arcs leave of the circle.
/// Falls back to house 1 when no arc matches (degenerate cusps).
pub fn house_of_longitude(lon_deg: f64, cusps: &[f64; 12]) -> u8 {
    let lon = normalize_360(lon_deg);
    let mut used = 0.0;
    for i in 0..12 {
        let width = if i < 11 {
            let w = forward_arc(cusps[i], cusps[i + 1]);
            used += w;
            w
        } else {
            360.0 - used
        };
        let offset = forward_arc(cusps[i], lon);
        if offset < width || (width - offset).abs() <= CUSP_EPSILON_DEG {
            return i as u8 + 1;
        }
    }
    1
}

/// Sign on each cusp, index 0 = house 1.
pub fn house_signs(cusps: &[f64; 12]) -> [Rashi; 12] {
    cusps.map(rashi_from_longitude)
}

/// Houses (1..=12, ascending) whose cusp sign is ruled by `graha`.
pub fn owned_houses(graha: Graha, house_signs: &[Rashi; 12], lordship: &RashiLordship) -> Vec<u8> {
    house_signs
        .iter()
        .enumerate()
        .filter(|(_, sign)| lordship.lord_of(**sign) == graha)
        .map(|(i, _)| i as u8 + 1)
        .collect()
}
