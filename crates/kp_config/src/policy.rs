//! Event policies: which houses support or oppose an event, which lords get
//! a focus bonus, and the admissible age range.

use std::collections::BTreeMap;

use kp_vedic_base::Graha;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Name of the fallback policy.
pub const DEFAULT_POLICY: &str = "default";

/// Scoring rules for one event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPolicy {
    /// Lookup key, lowercase.
    pub name: String,
    /// Human wording used in summaries ("foreign travel").
    pub label: String,
    /// Houses (1..=12) whose signification supports the event.
    pub positive_houses: Vec<u8>,
    /// Houses (1..=12) whose signification opposes it.
    pub negative_houses: Vec<u8>,
    /// Additive bonus per period lord.
    pub focus: BTreeMap<Graha, f64>,
    /// Youngest admissible age, in years.
    pub age_min: f64,
    /// Oldest admissible age, in years.
    pub age_max: f64,
}

impl EventPolicy {
    /// The default policy: marriage houses, no focus bonus, ages 16-90.
    pub fn fallback() -> Self {
        policy(DEFAULT_POLICY, "event", &[7, 2, 11], &[1, 6, 10], &[], (16.0, 90.0))
    }

    /// Focus bonus for `lord`, 0 if it has none.
    pub fn focus_weight(&self, lord: Graha) -> f64 {
        self.focus.get(&lord).copied().unwrap_or(0.0)
    }

    /// Whether `[age_start, age_end]` overlaps the admissible range.
    pub fn admits_ages(&self, age_start: f64, age_end: f64) -> bool {
        age_end >= self.age_min && age_start <= self.age_max
    }

    /// Check houses, ages and focus weights.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidPolicy {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("empty name"));
        }
        let houses = self.positive_houses.iter().chain(&self.negative_houses);
        if houses.clone().any(|h| !(1..=12).contains(h)) {
            return Err(invalid("houses must be in 1..=12"));
        }
        if self.positive_houses.is_empty() {
            return Err(invalid("no positive houses"));
        }
        if !self.age_min.is_finite() || !self.age_max.is_finite() || self.age_min < 0.0 {
            return Err(invalid("ages must be finite and non-negative"));
        }
        if self.age_min > self.age_max {
            return Err(invalid("age_min exceeds age_max"));
        }
        if self.focus.values().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid("focus weights must be finite and non-negative"));
        }
        Ok(())
    }
}

fn policy(
    name: &str,
    label: &str,
    positive: &[u8],
    negative: &[u8],
    focus: &[(Graha, f64)],
    ages: (f64, f64),
) -> EventPolicy {
    EventPolicy {
        name: name.to_string(),
        label: label.to_string(),
        positive_houses: positive.to_vec(),
        negative_houses: negative.to_vec(),
        focus: focus.iter().copied().collect(),
        age_min: ages.0,
        age_max: ages.1,
    }
}

/// The built-in policies: marriage, child, promotion, travel and default.
pub fn builtin_policies() -> Vec<EventPolicy> {
    vec![
        policy(
            "marriage",
            "marriage",
            &[7, 2, 11],
            &[1, 6, 10],
            &[(Graha::Shukra, 2.0), (Graha::Guru, 1.2), (Graha::Chandra, 1.0)],
            (18.0, 70.0),
        ),
        policy(
            "child",
            "childbirth",
            &[5, 2, 11, 9],
            &[1, 4, 10],
            &[(Graha::Guru, 2.0), (Graha::Chandra, 1.2), (Graha::Shukra, 1.0)],
            (18.0, 55.0),
        ),
        policy(
            "promotion",
            "promotion",
            &[10, 11, 2, 6],
            &[12, 8],
            &[
                (Graha::Shani, 1.6),
                (Graha::Guru, 1.2),
                (Graha::Buddh, 1.0),
                (Graha::Surya, 0.8),
                (Graha::Mangal, 0.6),
            ],
            (20.0, 75.0),
        ),
        policy(
            "travel",
            "foreign travel",
            &[12, 9, 3],
            &[4, 2],
            &[
                (Graha::Rahu, 1.6),
                (Graha::Guru, 1.2),
                (Graha::Buddh, 1.0),
                (Graha::Chandra, 0.8),
            ],
            (5.0, 90.0),
        ),
        EventPolicy::fallback(),
    ]
}
