//! Birth balance: how much of the first mahadasha remains at birth.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;
use crate::nakshatra::{Nakshatra, nakshatra_from_longitude};
use crate::util::normalize_360;

use super::cycle::LordCycle;

/// Compute nakshatra birth balance.
///
/// Returns `(nakshatra_index, balance_days, elapsed_fraction)`:
/// - `nakshatra_index`: 0-based index (0=Ashwini..26=Revati) of the Moon's nakshatra
/// - `balance_days`: remaining days in the starting graha's period
/// - `elapsed_fraction`: fraction of nakshatra already traversed [0, 1)
pub fn nakshatra_birth_balance(moon_sidereal_lon: f64, entry_period_days: f64) -> (u8, f64, f64) {
    let info = nakshatra_from_longitude(moon_sidereal_lon);
    let balance_days = entry_period_days * (1.0 - info.fraction);
    (info.nakshatra_index, balance_days, info.fraction)
}

/// Birth balance in reporting form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthBalance {
    /// Normalized sidereal Moon longitude.
    pub moon_longitude: f64,
    /// Moon's nakshatra at birth.
    pub nakshatra: Nakshatra,
    pub nakshatra_index: u8,
    /// Lord of the first mahadasha.
    pub lord: Graha,
    /// Fraction of the nakshatra already traversed [0, 1).
    pub elapsed_fraction: f64,
    /// Full length of the lord's period, in days.
    pub full_days: f64,
    /// Remaining length at birth, in days.
    pub balance_days: f64,
    /// `balance_days` in years of the same length.
    pub balance_years: f64,
}

/// Birth balance for a cycle, with periods measured in `days_per_year` days.
pub fn birth_balance(
    moon_sidereal_lon: f64,
    cycle: &LordCycle,
    days_per_year: f64,
) -> BirthBalance {
    let info = nakshatra_from_longitude(moon_sidereal_lon);
    let (lord, weight) = cycle.entry_at(info.nakshatra_index as usize);
    let full_days = weight * days_per_year;
    let (_, balance_days, elapsed_fraction) = nakshatra_birth_balance(moon_sidereal_lon, full_days);
    BirthBalance {
        moon_longitude: normalize_360(moon_sidereal_lon),
        nakshatra: info.nakshatra,
        nakshatra_index: info.nakshatra_index,
        lord,
        elapsed_fraction,
        full_days,
        balance_days,
        balance_years: weight * (1.0 - elapsed_fraction),
    }
}
