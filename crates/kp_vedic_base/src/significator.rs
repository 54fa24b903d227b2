//! Significator engine: how strongly each graha signifies each house.
//!
//! For every graha P with a known longitude:
//! - P's star lord S adds [`STAR_LORD_WEIGHT`] to the house S occupies and
//!   to every house S owns, provided S itself has a longitude;
//! - P adds [`SELF_WEIGHT`] to its own house and the houses it owns;
//! - the lord of P's sign adds [`SIGN_LORD_WEIGHT`] the same way, again only
//!   when that lord has a longitude.
//!
//! A house is owned by the lord of the sign on its cusp.

use serde::{Deserialize, Serialize};

use crate::bhava::{house_of_longitude, house_signs, owned_houses, validate_cusps};
use crate::dasha::cycle::LordCycle;
use crate::error::VedicError;
use crate::graha::{ALL_GRAHAS, Graha, RashiLordship};
use crate::rashi::{Rashi, rashi_from_longitude};
use crate::sublord::star_lord;

/// Weight of the star lord's houses.
pub const STAR_LORD_WEIGHT: f64 = 3.0;
/// Weight of the graha's own houses.
pub const SELF_WEIGHT: f64 = 2.0;
/// Weight of the sign lord's houses.
pub const SIGN_LORD_WEIGHT: f64 = 1.0;

/// Sidereal longitudes by graha; absent entries take no part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GrahaLongitudes {
    longitudes: [Option<f64>; 9],
}

impl GrahaLongitudes {
    /// No longitudes known.
    pub fn new() -> Self {
        Self::default()
    }

    /// All 9 longitudes, indexed as [`ALL_GRAHAS`].
    pub fn from_all(longitudes: [f64; 9]) -> Self {
        Self {
            longitudes: longitudes.map(Some),
        }
    }

    /// Builder-style setter.
    pub fn with(mut self, graha: Graha, lon_deg: f64) -> Self {
        self.set(graha, lon_deg);
        self
    }

    pub fn set(&mut self, graha: Graha, lon_deg: f64) {
        self.longitudes[graha.index() as usize] = Some(lon_deg);
    }

    pub fn get(&self, graha: Graha) -> Option<f64> {
        self.longitudes[graha.index() as usize]
    }

    /// Present grahas with their longitudes, in [`ALL_GRAHAS`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Graha, f64)> + '_ {
        ALL_GRAHAS
            .iter()
            .filter_map(move |&g| self.get(g).map(|lon| (g, lon)))
    }
}

/// Per-graha, per-house significator weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignificatorMap {
    /// weights[graha.index()][house - 1]
    weights: [[f64; 12]; 9],
}

impl SignificatorMap {
    /// Weight of `graha` for `house` (1..=12); 0 for out-of-range houses.
    pub fn weight(&self, graha: Graha, house: u8) -> f64 {
        match house {
            1..=12 => self.weights[graha.index() as usize][(house - 1) as usize],
            _ => 0.0,
        }
    }

    /// All 12 house weights of `graha` (index 0 = house 1).
    pub fn house_weights(&self, graha: Graha) -> &[f64; 12] {
        &self.weights[graha.index() as usize]
    }

    /// Sum of `graha`'s weights over `houses`.
    pub fn house_sum(&self, graha: Graha, houses: &[u8]) -> f64 {
        houses.iter().map(|&h| self.weight(graha, h)).sum()
    }

    /// Up to `n` houses with non-zero weight, heaviest first, ties by house number.
    pub fn top_houses(&self, graha: Graha, n: usize) -> Vec<(u8, f64)> {
        let mut ranked: Vec<(u8, f64)> = self
            .house_weights(graha)
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > 0.0)
            .map(|(i, w)| (i as u8 + 1, *w))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(n);
        ranked
    }

    fn add(&mut self, graha: Graha, houses: impl IntoIterator<Item = u8>, amount: f64) {
        let row = &mut self.weights[graha.index() as usize];
        for h in houses {
            row[(h - 1) as usize] += amount;
        }
    }
}

struct Chart<'a> {
    longitudes: &'a GrahaLongitudes,
    cusps: &'a [f64; 12],
    signs: [Rashi; 12],
    lordship: &'a RashiLordship,
}

impl Chart<'_> {
    /// Occupied house plus owned houses of `graha`, or `None` if absent.
    fn houses_of(&self, graha: Graha) -> Option<Vec<u8>> {
        let lon = self.longitudes.get(graha)?;
        let mut houses = vec![house_of_longitude(lon, self.cusps)];
        houses.extend(owned_houses(graha, &self.signs, self.lordship));
        Some(houses)
    }
}

/// Build the significator map for a chart.
pub fn build_significators(
    longitudes: &GrahaLongitudes,
    cusps: &[f64; 12],
    cycle: &LordCycle,
    lordship: &RashiLordship,
) -> Result<SignificatorMap, VedicError> {
    validate_cusps(cusps)?;
    if longitudes.iter().any(|(_, lon)| !lon.is_finite()) {
        return Err(VedicError::InvalidInput("graha longitude must be finite"));
    }

    let chart = Chart {
        longitudes,
        cusps,
        signs: house_signs(cusps),
        lordship,
    };
    let mut map = SignificatorMap::default();

    for (graha, lon) in longitudes.iter() {
        if let Some(houses) = chart.houses_of(star_lord(lon, cycle)) {
            map.add(graha, houses, STAR_LORD_WEIGHT);
        }
        if let Some(houses) = chart.houses_of(graha) {
            map.add(graha, houses, SELF_WEIGHT);
        }
        let sign_lord = lordship.lord_of(rashi_from_longitude(lon));
        if let Some(houses) = chart.houses_of(sign_lord) {
            map.add(graha, houses, SIGN_LORD_WEIGHT);
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesha_rising() -> [f64; 12] {
        std::array::from_fn(|i| 30.0 * i as f64)
    }

    #[test]
    fn lone_graha_gets_only_self_weight() {
        // Venus in Karka (house 4), Pushya star (Saturn), Saturn and Moon absent
        let lons = GrahaLongitudes::new().with(Graha::Shukra, 100.0);
        let map = build_significators(
            &lons,
            &mesha_rising(),
            &LordCycle::vimshottari(),
            &RashiLordship::classical(),
        )
        .unwrap();
        assert_eq!(map.weight(Graha::Shukra, 4), 2.0);
        assert_eq!(map.weight(Graha::Shukra, 2), 2.0);
        assert_eq!(map.weight(Graha::Shukra, 7), 2.0);
        assert_eq!(map.house_sum(Graha::Shukra, &[1, 3, 5, 6, 8, 9, 10, 11, 12]), 0.0);
        assert_eq!(map.house_weights(Graha::Shani), &[0.0; 12]);
    }

    #[test]
    fn star_and_sign_lords_contribute_when_present() {
        let lons = GrahaLongitudes::new()
            .with(Graha::Shukra, 100.0) // Karka, house 4, star Saturn
            .with(Graha::Shani, 200.0) // Tula, house 7, star Jupiter
            .with(Graha::Chandra, 50.0); // Vrishabha, house 2, star Moon
        let map = build_significators(
            &lons,
            &mesha_rising(),
            &LordCycle::vimshottari(),
            &RashiLordship::classical(),
        )
        .unwrap();

        // Venus: self {4, 2, 7} x2, Saturn {7, 10, 11} x3, Moon {2, 4} x1
        assert_eq!(map.weight(Graha::Shukra, 2), 3.0);
        assert_eq!(map.weight(Graha::Shukra, 4), 3.0);
        assert_eq!(map.weight(Graha::Shukra, 7), 5.0);
        assert_eq!(map.weight(Graha::Shukra, 10), 3.0);
        assert_eq!(map.weight(Graha::Shukra, 11), 3.0);
        assert_eq!(map.top_houses(Graha::Shukra, 1), vec![(7, 5.0)]);

        // Moon is its own star lord: self x2 + star x3 on {2, 4}; Venus {4, 2, 7} x1
        assert_eq!(map.weight(Graha::Chandra, 2), 6.0);
        assert_eq!(map.weight(Graha::Chandra, 4), 6.0);
        assert_eq!(map.weight(Graha::Chandra, 7), 1.0);

        // Saturn: Jupiter absent; self {7, 10, 11} x2, Venus {4, 2, 7} x1
        assert_eq!(map.weight(Graha::Shani, 7), 3.0);
        assert_eq!(map.weight(Graha::Shani, 10), 2.0);
        assert_eq!(map.weight(Graha::Shani, 2), 1.0);
    }

    #[test]
    fn top_houses_orders_by_weight_then_house() {
        let lons = GrahaLongitudes::new().with(Graha::Shukra, 100.0);
        let map = build_significators(
            &lons,
            &mesha_rising(),
            &LordCycle::vimshottari(),
            &RashiLordship::classical(),
        )
        .unwrap();
        assert_eq!(
            map.top_houses(Graha::Shukra, 5),
            vec![(2, 2.0), (4, 2.0), (7, 2.0)]
        );
    }

    #[test]
    fn rejects_non_finite_longitude() {
        let lons = GrahaLongitudes::new().with(Graha::Guru, f64::NAN);
        let err = build_significators(
            &lons,
            &mesha_rising(),
            &LordCycle::vimshottari(),
            &RashiLordship::classical(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn out_of_range_house_is_zero() {
        let map = SignificatorMap::default();
        assert_eq!(map.weight(Graha::Surya, 0), 0.0);
        assert_eq!(map.weight(Graha::Surya, 13), 0.0);
    }
}
