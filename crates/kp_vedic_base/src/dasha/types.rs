//! Core types for the dasha (planetary period) hierarchy.

use serde::{Deserialize, Serialize};

use crate::graha::Graha;

/// Maximum dasha depth (0-based). Levels 0-2 supported.
pub const MAX_DASHA_LEVEL: u8 = 2;

/// Default max level for hierarchy queries.
pub const DEFAULT_DASHA_LEVEL: u8 = 2;

/// Hard cap on periods per level to prevent combinatorial explosion.
pub const MAX_PERIODS_PER_LEVEL: usize = 100_000;

/// Hierarchical dasha levels: top, mid and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DashaLevel {
    #[serde(rename = "maha")]
    Mahadasha = 0,
    #[serde(rename = "antara")]
    Antardasha = 1,
    #[serde(rename = "pratyantara")]
    Pratyantardasha = 2,
}

/// All levels, top first.
pub const ALL_DASHA_LEVELS: [DashaLevel; 3] = [
    DashaLevel::Mahadasha,
    DashaLevel::Antardasha,
    DashaLevel::Pratyantardasha,
];

impl DashaLevel {
    /// Create from raw u8 value.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Mahadasha),
            1 => Some(Self::Antardasha),
            2 => Some(Self::Pratyantardasha),
            _ => None,
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mahadasha => "Mahadasha",
            Self::Antardasha => "Antardasha",
            Self::Pratyantardasha => "Pratyantardasha",
        }
    }

    /// Short label used in summaries.
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Mahadasha => "maha",
            Self::Antardasha => "antara",
            Self::Pratyantardasha => "pratyantara",
        }
    }

    /// Next deeper level, if any.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Mahadasha => Some(Self::Antardasha),
            Self::Antardasha => Some(Self::Pratyantardasha),
            Self::Pratyantardasha => None,
        }
    }
}

/// A single dasha period.
///
/// Intervals are half-open: `start_jd` is inclusive, `end_jd` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    /// The graha ruling this period.
    pub lord: Graha,
    /// JD UTC, inclusive.
    pub start_jd: f64,
    /// JD UTC, exclusive.
    pub end_jd: f64,
    /// Hierarchical level.
    pub level: DashaLevel,
    /// 1-indexed position among siblings.
    pub order: u16,
    /// Index into parent level's array (0 for level 0).
    pub parent_idx: u32,
    /// Lord of the enclosing period, `None` at level 0.
    pub parent_lord: Option<Graha>,
}

impl DashaPeriod {
    /// Duration of the period in days.
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// Whether `jd` falls inside `[start_jd, end_jd)`.
    pub fn contains(&self, jd: f64) -> bool {
        self.start_jd <= jd && jd < self.end_jd
    }
}

/// Complete materialized hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaHierarchy {
    /// Birth JD UTC.
    pub birth_jd: f64,
    /// Levels: levels[0]=mahadasha, levels[1]=antardasha, etc.
    pub levels: Vec<Vec<DashaPeriod>>,
}

impl DashaHierarchy {
    /// Periods at one level, empty if the level was not generated.
    pub fn level(&self, level: DashaLevel) -> &[DashaPeriod] {
        self.levels
            .get(level as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Enclosing period of `period`, following its `parent_idx`.
    pub fn parent_of(&self, period: &DashaPeriod) -> Option<&DashaPeriod> {
        let depth = period.level as usize;
        if depth == 0 {
            return None;
        }
        self.levels.get(depth - 1)?.get(period.parent_idx as usize)
    }

    /// Deepest generated level.
    pub fn deepest_level(&self) -> Option<DashaLevel> {
        DashaLevel::from_u8(self.levels.len().checked_sub(1)? as u8)
    }
}

/// Active periods at a specific date (one per requested level).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaSnapshot {
    /// The queried JD UTC.
    pub query_jd: f64,
    /// Active periods: periods[0]=active mahadasha, [1]=active antardasha, etc.
    pub periods: Vec<DashaPeriod>,
}

impl DashaSnapshot {
    /// Active period at `level`, if the snapshot reaches that deep.
    pub fn at(&self, level: DashaLevel) -> Option<&DashaPeriod> {
        self.periods.get(level as usize)
    }
}
