//! Types for window selection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use kp_vedic_base::dasha::DashaPeriod;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Which side of the anchor instant to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Windows ending after the anchor.
    #[default]
    Future,
    /// Windows starting at or before the anchor.
    Past,
    /// Windows on either side.
    Nearest,
}

impl Direction {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Future => "future",
            Self::Past => "past",
            Self::Nearest => "nearest",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "future" => Ok(Self::Future),
            "past" => Ok(Self::Past),
            "nearest" => Ok(Self::Nearest),
            other => Err(SearchError::InvalidInput(format!(
                "unknown direction '{other}' (expected future, past or nearest)"
            ))),
        }
    }
}

/// Filters dropped to obtain a non-empty candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relaxation {
    /// Both filters applied.
    #[default]
    None,
    /// Age filter dropped.
    AgeDropped,
    /// Age and direction filters dropped.
    AgeAndDirectionDropped,
}

impl Relaxation {
    /// Human note for summaries, `None` when nothing was relaxed.
    pub const fn note(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::AgeDropped => Some("age filter relaxed"),
            Self::AgeAndDirectionDropped => Some("age and direction filters relaxed"),
        }
    }
}

/// One scored (top, mid, bottom) period triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedWindow {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub maha: DashaPeriod,
    pub antar: Option<DashaPeriod>,
    pub pratyantar: Option<DashaPeriod>,
    /// Bounds of the most specific period of the triple.
    pub start_jd: f64,
    pub end_jd: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Age in years at `start_jd` and `end_jd`.
    pub age_start: f64,
    pub age_end: f64,
    pub score: f64,
    /// `|start_jd - anchor|` in days.
    pub distance_days: f64,
}

impl RankedWindow {
    /// The most specific period of the triple.
    pub fn window_period(&self) -> &DashaPeriod {
        self.pratyantar
            .as_ref()
            .or(self.antar.as_ref())
            .unwrap_or(&self.maha)
    }
}

/// Result of a window search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSelection {
    /// Policy that scored the windows.
    pub policy: String,
    /// Human wording of the event.
    pub label: String,
    pub direction: Direction,
    pub anchor_jd: f64,
    pub anchor: DateTime<Utc>,
    pub relaxation: Relaxation,
    /// Best first.
    pub windows: Vec<RankedWindow>,
}

impl WindowSelection {
    pub fn best(&self) -> Option<&RankedWindow> {
        self.windows.first()
    }

    /// True if any filter had to be dropped.
    pub fn relaxed(&self) -> bool {
        self.relaxation != Relaxation::None
    }

    /// One-line wording of the best window.
    pub fn summary(&self) -> Option<String> {
        let best = self.best()?;
        let period = best.window_period();
        let mut text = format!(
            "Likely window for {}: {} – {} ({} lord: {}).",
            self.label,
            best.start.format("%B %Y"),
            best.end.format("%B %Y"),
            period.level.short_name(),
            period.lord,
        );
        if let Some(note) = self.relaxation.note() {
            text.push_str(&format!(" Note: {note}."));
        }
        Some(text)
    }
}
