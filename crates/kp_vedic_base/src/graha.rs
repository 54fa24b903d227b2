//! The 9 lords (grahas) and sign lordship.
//!
//! Rahu and Ketu are the lunar nodes; they are lords in the dasha cycle and
//! in the star/sub-lord tables but own no sign.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VedicError;
use crate::rashi::{ALL_RASHIS, Rashi};

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Graha {
    #[serde(rename = "sun")]
    Surya,
    #[serde(rename = "moon")]
    Chandra,
    #[serde(rename = "mars")]
    Mangal,
    #[serde(rename = "mercury")]
    Buddh,
    #[serde(rename = "jupiter")]
    Guru,
    #[serde(rename = "venus")]
    Shukra,
    #[serde(rename = "saturn")]
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// English name of the graha.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// 0-based index into ALL_GRAHAS.
    pub const fn index(self) -> u8 {
        match self {
            Self::Surya => 0,
            Self::Chandra => 1,
            Self::Mangal => 2,
            Self::Buddh => 3,
            Self::Guru => 4,
            Self::Shukra => 5,
            Self::Shani => 6,
            Self::Rahu => 7,
            Self::Ketu => 8,
        }
    }

    /// True for the lunar nodes.
    pub const fn is_node(self) -> bool {
        matches!(self, Self::Rahu | Self::Ketu)
    }
}

impl fmt::Display for Graha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english_name())
    }
}

impl FromStr for Graha {
    type Err = VedicError;

    /// Accepts English or Sanskrit names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_GRAHAS
            .iter()
            .copied()
            .find(|g| {
                g.english_name().eq_ignore_ascii_case(wanted)
                    || g.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or(VedicError::InvalidInput("unknown graha name"))
    }
}

/// Get the planetary lord of a rashi.
///
/// - Mesha/Vrischika → Mangal (Mars)
/// - Vrishabha/Tula → Shukra (Venus)
/// - Mithuna/Kanya → Buddh (Mercury)
/// - Karka → Chandra (Moon)
/// - Simha → Surya (Sun)
/// - Dhanu/Meena → Guru (Jupiter)
/// - Makara/Kumbha → Shani (Saturn)
pub const fn rashi_lord(rashi: Rashi) -> Graha {
    match rashi {
        Rashi::Mesha => Graha::Mangal,
        Rashi::Vrishabha => Graha::Shukra,
        Rashi::Mithuna => Graha::Buddh,
        Rashi::Karka => Graha::Chandra,
        Rashi::Simha => Graha::Surya,
        Rashi::Kanya => Graha::Buddh,
        Rashi::Tula => Graha::Shukra,
        Rashi::Vrischika => Graha::Mangal,
        Rashi::Dhanu => Graha::Guru,
        Rashi::Makara => Graha::Shani,
        Rashi::Kumbha => Graha::Shani,
        Rashi::Meena => Graha::Guru,
    }
}

/// Sign-to-lord table used by the significator engine.
///
/// Defaults to the classical lordship of [`rashi_lord`]; a caller may
/// inject an alternative (e.g. node co-lordship schemes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RashiLordship {
    lords: [Graha; 12],
}

impl RashiLordship {
    /// Table from 12 lords, indexed by rashi (0 = Mesha).
    pub const fn new(lords: [Graha; 12]) -> Self {
        Self { lords }
    }

    /// Classical lordship.
    pub fn classical() -> Self {
        Self {
            lords: ALL_RASHIS.map(rashi_lord),
        }
    }

    /// Lord of a rashi under this table.
    pub fn lord_of(&self, rashi: Rashi) -> Graha {
        self.lords[rashi.index() as usize]
    }

    /// Rashis ruled by `graha` under this table.
    pub fn rashis_ruled_by(&self, graha: Graha) -> impl Iterator<Item = Rashi> + '_ {
        ALL_RASHIS
            .iter()
            .copied()
            .filter(move |r| self.lord_of(*r) == graha)
    }
}

impl Default for RashiLordship {
    fn default() -> Self {
        Self::classical()
    }
}
