//! Engine-wide numeric settings.

use kp_time::DAYS_PER_YEAR;
use kp_vedic_base::LordCycle;
use kp_vedic_base::dasha::{
    DEFAULT_DASHA_LEVEL, DEFAULT_HORIZON_YEARS, DashaConfig, MAX_DASHA_LEVEL,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// `[engine]` table of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Years of mahadashas generated after birth.
    #[serde(default = "default_horizon_years")]
    pub horizon_years: f64,
    /// Year length used for dasha spans and ages.
    #[serde(default = "default_days_per_year")]
    pub days_per_year: f64,
    /// Deepest dasha level, 0-based.
    #[serde(default = "default_max_level")]
    pub max_level: u8,
    /// Ranked windows returned by a prediction.
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
    /// Orb for aspect-based transit triggers, in degrees.
    #[serde(default = "default_transit_orb_deg")]
    pub transit_orb_deg: f64,
}

fn default_horizon_years() -> f64 {
    DEFAULT_HORIZON_YEARS
}

fn default_days_per_year() -> f64 {
    DAYS_PER_YEAR
}

fn default_max_level() -> u8 {
    DEFAULT_DASHA_LEVEL
}

fn default_result_limit() -> usize {
    10
}

fn default_transit_orb_deg() -> f64 {
    1.5
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            horizon_years: default_horizon_years(),
            days_per_year: default_days_per_year(),
            max_level: default_max_level(),
            result_limit: default_result_limit(),
            transit_orb_deg: default_transit_orb_deg(),
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.horizon_years.is_finite() || self.horizon_years <= 0.0 {
            return Err(ConfigError::InvalidEngine(
                "horizon_years must be positive".to_string(),
            ));
        }
        if !self.days_per_year.is_finite() || self.days_per_year <= 0.0 {
            return Err(ConfigError::InvalidEngine(
                "days_per_year must be positive".to_string(),
            ));
        }
        if self.max_level > MAX_DASHA_LEVEL {
            return Err(ConfigError::InvalidEngine(format!(
                "max_level must be at most {MAX_DASHA_LEVEL}"
            )));
        }
        if self.result_limit == 0 {
            return Err(ConfigError::InvalidEngine(
                "result_limit must be at least 1".to_string(),
            ));
        }
        if !self.transit_orb_deg.is_finite() || !(0.0..=30.0).contains(&self.transit_orb_deg) {
            return Err(ConfigError::InvalidEngine(
                "transit_orb_deg must be within 0..=30".to_string(),
            ));
        }
        Ok(())
    }

    /// Dasha parameters over `cycle`.
    pub fn dasha_config(&self, cycle: LordCycle) -> DashaConfig {
        DashaConfig {
            cycle,
            days_per_year: self.days_per_year,
            horizon_years: self.horizon_years,
        }
    }
}
