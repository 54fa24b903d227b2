//! Nakshatra (lunar mansion) lookup, 27-scheme.
//!
//! The circle is divided into 27 equal segments of 13 deg 20' each, starting
//! from Ashwini at 0 deg sidereal.

use serde::{Deserialize, Serialize};

use crate::util::normalize_360;

/// Span of one nakshatra in the 27-scheme: 13 deg 20'.
pub const NAKSHATRA_SPAN_27: f64 = 360.0 / 27.0;

/// The 27 nakshatras from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nakshatra {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 nakshatras in order (0 = Ashwini, 26 = Revati).
pub const ALL_NAKSHATRAS_27: [Nakshatra; 27] = [
    Nakshatra::Ashwini,
    Nakshatra::Bharani,
    Nakshatra::Krittika,
    Nakshatra::Rohini,
    Nakshatra::Mrigashira,
    Nakshatra::Ardra,
    Nakshatra::Punarvasu,
    Nakshatra::Pushya,
    Nakshatra::Ashlesha,
    Nakshatra::Magha,
    Nakshatra::PurvaPhalguni,
    Nakshatra::UttaraPhalguni,
    Nakshatra::Hasta,
    Nakshatra::Chitra,
    Nakshatra::Swati,
    Nakshatra::Vishakha,
    Nakshatra::Anuradha,
    Nakshatra::Jyeshtha,
    Nakshatra::Mula,
    Nakshatra::PurvaAshadha,
    Nakshatra::UttaraAshadha,
    Nakshatra::Shravana,
    Nakshatra::Dhanishtha,
    Nakshatra::Shatabhisha,
    Nakshatra::PurvaBhadrapada,
    Nakshatra::UttaraBhadrapada,
    Nakshatra::Revati,
];

impl Nakshatra {
    /// Name of the nakshatra.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }
}

/// Result of a 27-nakshatra lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NakshatraInfo {
    /// The nakshatra.
    pub nakshatra: Nakshatra,
    /// 0-based index (0 = Ashwini).
    pub nakshatra_index: u8,
    /// Decimal degrees within the nakshatra [0.0, 13.333...).
    pub degrees_in_nakshatra: f64,
    /// Fraction of the nakshatra already traversed, [0, 1).
    pub fraction: f64,
}

/// Determine nakshatra from sidereal ecliptic longitude.
pub fn nakshatra_from_longitude(sidereal_lon_deg: f64) -> NakshatraInfo {
    let lon = normalize_360(sidereal_lon_deg);
    // scale before dividing so whole-degree boundaries (40, 120, ...) stay exact
    let scaled = lon * 27.0 / 360.0;
    let nak_idx = (scaled.floor() as u8).min(26);
    let fraction = (scaled - nak_idx as f64).clamp(0.0, 1.0 - f64::EPSILON);
    let degrees_in_nakshatra = fraction * NAKSHATRA_SPAN_27;

    NakshatraInfo {
        nakshatra: ALL_NAKSHATRAS_27[nak_idx as usize],
        nakshatra_index: nak_idx,
        degrees_in_nakshatra,
        fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_is_13_20() {
        assert!((NAKSHATRA_SPAN_27 - 13.333_333_333_333_334).abs() < 1e-12);
    }

    #[test]
    fn ashwini_start() {
        let info = nakshatra_from_longitude(0.0);
        assert_eq!(info.nakshatra, Nakshatra::Ashwini);
        assert_eq!(info.fraction, 0.0);
    }

    #[test]
    fn all_boundaries() {
        for i in 0..27u8 {
            let info = nakshatra_from_longitude(i as f64 * NAKSHATRA_SPAN_27 + 1e-9);
            assert_eq!(info.nakshatra_index, i);
        }
    }

    #[test]
    fn mid_rohini() {
        let info = nakshatra_from_longitude(3.5 * NAKSHATRA_SPAN_27);
        assert_eq!(info.nakshatra, Nakshatra::Rohini);
        assert!((info.fraction - 0.5).abs() < 1e-12);
    }

    #[test]
    fn just_below_360_is_revati() {
        let info = nakshatra_from_longitude(360.0 - 1e-13);
        assert_eq!(info.nakshatra, Nakshatra::Revati);
        assert!(info.fraction < 1.0);
    }

    #[test]
    fn magha_starts_exactly_at_120() {
        assert_eq!(nakshatra_from_longitude(120.0).nakshatra, Nakshatra::Magha);
        assert_eq!(nakshatra_from_longitude(40.0).nakshatra, Nakshatra::Rohini);
        assert_eq!(nakshatra_from_longitude(240.0).nakshatra, Nakshatra::Mula);
    }

    #[test]
    fn negative_wraps() {
        assert_eq!(nakshatra_from_longitude(-1.0).nakshatra, Nakshatra::Revati);
    }
}
