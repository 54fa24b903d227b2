//! Positional indexer: star lord and sub-lord of a longitude.
//!
//! The star lord is the cycle lord of the nakshatra containing the point.
//! The nakshatra is then divided proportionally by the same cycle, rotated
//! to begin at that star lord; the part containing the point gives the
//! sub-lord.

use serde::{Deserialize, Serialize};

use crate::dasha::cycle::LordCycle;
use crate::dasha::subperiod::{Slice, proportional_slices};
use crate::graha::{Graha, RashiLordship};
use crate::nakshatra::{NAKSHATRA_SPAN_27, Nakshatra, nakshatra_from_longitude};
use crate::rashi::{Rashi, rashi_from_longitude};
use crate::util::normalize_360;

/// Star lord of a sidereal longitude.
pub fn star_lord(sidereal_lon_deg: f64, cycle: &LordCycle) -> Graha {
    cycle.segment_lord(nakshatra_from_longitude(sidereal_lon_deg).nakshatra_index)
}

/// Sub-lord of a sidereal longitude.
///
/// A point exactly on a sub boundary belongs to the later sub.
pub fn sub_lord(sidereal_lon_deg: f64, cycle: &LordCycle) -> Graha {
    let info = nakshatra_from_longitude(sidereal_lon_deg);
    let slices = proportional_slices(cycle, info.nakshatra_index as usize, 0.0, 1.0);
    containing(&slices, info.fraction)
}

/// `slices` comes from a validated cycle and is never empty. A fraction at
/// or past the last end stays in the last slice.
fn containing(slices: &[Slice], fraction: f64) -> Graha {
    debug_assert!(!slices.is_empty());
    let idx = slices.partition_point(|s| s.end <= fraction);
    slices[idx.min(slices.len().saturating_sub(1))].lord
}

/// Sub-lord divisions of one nakshatra, in absolute sidereal degrees.
pub fn sub_lord_spans(nakshatra_index: u8, cycle: &LordCycle) -> Vec<Slice> {
    let idx = nakshatra_index.min(26);
    proportional_slices(
        cycle,
        idx as usize,
        idx as f64 * NAKSHATRA_SPAN_27,
        NAKSHATRA_SPAN_27,
    )
}

/// Full positional breakdown of a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpPosition {
    /// Normalized sidereal longitude [0, 360).
    pub longitude: f64,
    pub rashi: Rashi,
    pub sign_lord: Graha,
    pub nakshatra: Nakshatra,
    /// 0-based nakshatra index.
    pub nakshatra_index: u8,
    /// Fraction of the nakshatra traversed [0, 1).
    pub fraction: f64,
    pub star_lord: Graha,
    pub sub_lord: Graha,
}

/// Sign, nakshatra, star lord and sub-lord of a longitude in one pass.
pub fn kp_position(
    sidereal_lon_deg: f64,
    cycle: &LordCycle,
    lordship: &RashiLordship,
) -> KpPosition {
    let longitude = normalize_360(sidereal_lon_deg);
    let info = nakshatra_from_longitude(longitude);
    let rashi = rashi_from_longitude(longitude);
    let slices = proportional_slices(cycle, info.nakshatra_index as usize, 0.0, 1.0);
    KpPosition {
        longitude,
        rashi,
        sign_lord: lordship.lord_of(rashi),
        nakshatra: info.nakshatra,
        nakshatra_index: info.nakshatra_index,
        fraction: info.fraction,
        star_lord: cycle.segment_lord(info.nakshatra_index),
        sub_lord: containing(&slices, info.fraction),
    }
}

/// Sub-lord of each of the 12 house cusps (index 0 = house 1).
pub fn cuspal_sub_lords(cusps: &[f64; 12], cycle: &LordCycle) -> [Graha; 12] {
    cusps.map(|c| sub_lord(c, cycle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARCMIN: f64 = 1.0 / 60.0;

    #[test]
    fn ashwini_opens_with_ketu_ketu() {
        let c = LordCycle::vimshottari();
        assert_eq!(star_lord(0.1, &c), Graha::Ketu);
        assert_eq!(sub_lord(0.1, &c), Graha::Ketu);
        // Ketu sub spans 46'40"
        assert_eq!(sub_lord(46.0 * ARCMIN, &c), Graha::Ketu);
        assert_eq!(sub_lord(47.0 * ARCMIN, &c), Graha::Shukra);
    }

    #[test]
    fn fraction_at_span_end_stays_in_last_sub() {
        let c = LordCycle::vimshottari();
        // Ashwini rotation ends with Budh; fraction 1.0 is past every end
        let slices = proportional_slices(&c, 0, 0.0, 1.0);
        assert_eq!(containing(&slices, 1.0), Graha::Buddh);
        assert_eq!(containing(&slices, 0.999_999), Graha::Buddh);
        // exact boundary goes to the later slice
        assert_eq!(containing(&slices, slices[0].end), slices[1].lord);
    }

    #[test]
    fn sub_sequence_rotates_to_star_lord() {
        let c = LordCycle::vimshottari();
        // Bharani starts at 13deg20': Venus star, first sub is Venus (not Ketu)
        let start = NAKSHATRA_SPAN_27 + 0.01;
        assert_eq!(star_lord(start, &c), Graha::Shukra);
        assert_eq!(sub_lord(start, &c), Graha::Shukra);
        // Venus sub is 2deg13'20"; just past it comes Sun
        assert_eq!(sub_lord(NAKSHATRA_SPAN_27 + 2.23, &c), Graha::Surya);
        // Rohini (Moon star) opens with a Moon sub
        assert_eq!(sub_lord(3.0 * NAKSHATRA_SPAN_27 + 0.01, &c), Graha::Chandra);
    }

    #[test]
    fn last_sub_of_revati() {
        let c = LordCycle::vimshottari();
        // Revati is Mercury's; its last sub is Saturn
        assert_eq!(star_lord(359.99, &c), Graha::Buddh);
        assert_eq!(sub_lord(359.99, &c), Graha::Shani);
    }

    #[test]
    fn spans_tile_each_nakshatra() {
        let c = LordCycle::vimshottari();
        for idx in 0..27u8 {
            let spans = sub_lord_spans(idx, &c);
            assert_eq!(spans.len(), 9);
            assert_eq!(spans[0].lord, c.segment_lord(idx));
            let total: f64 = spans.iter().map(|s| s.end - s.start).sum();
            assert!((total - NAKSHATRA_SPAN_27).abs() < 1e-9);
            for w in spans.windows(2) {
                assert_eq!(w[0].end, w[1].start);
            }
        }
    }

    #[test]
    fn kp_position_agrees_with_parts() {
        let c = LordCycle::vimshottari();
        let l = RashiLordship::classical();
        let p = kp_position(100.0 + 360.0, &c, &l);
        assert!((p.longitude - 100.0).abs() < 1e-9);
        assert_eq!(p.rashi, Rashi::Karka);
        assert_eq!(p.sign_lord, Graha::Chandra);
        assert_eq!(p.nakshatra, Nakshatra::Pushya);
        assert_eq!(p.star_lord, Graha::Shani);
        assert_eq!(p.sub_lord, sub_lord(100.0, &c));
    }

    #[test]
    fn cusps_map_one_to_one() {
        let c = LordCycle::vimshottari();
        let cusps: [f64; 12] = std::array::from_fn(|i| 30.0 * i as f64 + 5.0);
        let csl = cuspal_sub_lords(&cusps, &c);
        for (i, lord) in csl.iter().enumerate() {
            assert_eq!(*lord, sub_lord(cusps[i], &c));
        }
    }
}
