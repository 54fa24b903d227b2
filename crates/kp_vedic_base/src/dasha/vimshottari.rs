//! Vimshottari-style dasha engine over any [`LordCycle`].
//!
//! Computation tiers:
//! - Tier 0: Level-0 (mahadasha) generation up to the horizon
//! - Tier 1: All children of one parent
//! - Tier 2: Complete level from parent level
//! - Tier 3: Full hierarchy (levels 0..N)
//! - Tier 4: Snapshot-only path (no full materialization)

use kp_time::DAYS_PER_YEAR;

use crate::error::VedicError;
use crate::nakshatra::nakshatra_from_longitude;

use super::cycle::LordCycle;
use super::query::find_active_period;
use super::subperiod::proportional_children;
use super::types::{
    DashaHierarchy, DashaLevel, DashaPeriod, DashaSnapshot, MAX_DASHA_LEVEL, MAX_PERIODS_PER_LEVEL,
};

/// Default span of generated mahadashas, in years from birth.
pub const DEFAULT_HORIZON_YEARS: f64 = 120.0;

/// Slack when comparing the running end against the horizon, in days.
const HORIZON_SLACK_DAYS: f64 = 1e-6;

/// Parameters for hierarchy generation.
#[derive(Debug, Clone, PartialEq)]
pub struct DashaConfig {
    /// Lords and weights.
    pub cycle: LordCycle,
    /// Length of a dasha year in days.
    pub days_per_year: f64,
    /// Mahadashas are generated until at least this many years after birth.
    pub horizon_years: f64,
}

impl DashaConfig {
    /// Vimshottari with the default year length and a 120-year horizon.
    pub fn vimshottari() -> Self {
        Self {
            cycle: LordCycle::vimshottari(),
            days_per_year: DAYS_PER_YEAR,
            horizon_years: DEFAULT_HORIZON_YEARS,
        }
    }

    /// Reject non-positive or non-finite year length and horizon.
    pub fn validate(&self) -> Result<(), VedicError> {
        if !self.days_per_year.is_finite() || self.days_per_year <= 0.0 {
            return Err(VedicError::InvalidInput("days_per_year must be finite and positive"));
        }
        if !self.horizon_years.is_finite() || self.horizon_years <= 0.0 {
            return Err(VedicError::InvalidInput("horizon_years must be finite and positive"));
        }
        Ok(())
    }

    /// Horizon expressed in days.
    pub fn horizon_days(&self) -> f64 {
        self.horizon_years * self.days_per_year
    }
}

impl Default for DashaConfig {
    fn default() -> Self {
        Self::vimshottari()
    }
}

fn check_birth(birth_jd: f64, moon_sidereal_lon: f64) -> Result<(), VedicError> {
    if !birth_jd.is_finite() {
        return Err(VedicError::InvalidInput("birth_jd must be finite"));
    }
    if !moon_sidereal_lon.is_finite() {
        return Err(VedicError::InvalidInput("moon longitude must be finite"));
    }
    Ok(())
}

// ── Tier 0: Level-0 (Mahadasha) generation ───────────────────────────

/// Generate level-0 (mahadasha) periods from birth to the horizon.
///
/// The first period belongs to the star lord of the Moon's nakshatra and is
/// shortened by the fraction of that nakshatra already traversed. Later
/// periods run full length; the last one may extend past the horizon.
pub fn vimshottari_level0(
    birth_jd: f64,
    moon_sidereal_lon: f64,
    config: &DashaConfig,
) -> Result<Vec<DashaPeriod>, VedicError> {
    check_birth(birth_jd, moon_sidereal_lon)?;
    config.validate()?;

    let info = nakshatra_from_longitude(moon_sidereal_lon);
    let start_pos = info.nakshatra_index as usize;
    let horizon_end = birth_jd + config.horizon_days();

    let mut periods = Vec::with_capacity(config.cycle.len() + 1);
    let mut cursor = birth_jd;
    let mut offset = 0usize;
    loop {
        let (lord, weight) = config.cycle.entry_at(start_pos + offset);
        let full_days = weight * config.days_per_year;
        let duration = if offset == 0 {
            full_days * (1.0 - info.fraction)
        } else {
            full_days
        };
        let end = cursor + duration;
        periods.push(DashaPeriod {
            lord,
            start_jd: cursor,
            end_jd: end,
            level: DashaLevel::Mahadasha,
            order: (offset as u16) + 1,
            parent_idx: 0,
            parent_lord: None,
        });
        cursor = end;
        offset += 1;
        if cursor >= horizon_end - HORIZON_SLACK_DAYS {
            break;
        }
        if periods.len() >= MAX_PERIODS_PER_LEVEL {
            return Err(VedicError::InvalidInput(
                "dasha level would exceed MAX_PERIODS_PER_LEVEL",
            ));
        }
    }

    Ok(periods)
}

// ── Tier 1: All children of one parent ───────────────────────────────

/// Calculate all child periods for a single parent period.
pub fn vimshottari_children(
    parent: &DashaPeriod,
    config: &DashaConfig,
) -> Result<Vec<DashaPeriod>, VedicError> {
    match parent.level.child_level() {
        Some(child_level) => proportional_children(parent, &config.cycle, child_level, 0),
        None => Ok(Vec::new()),
    }
}

// ── Tier 2: Complete level from parent level ─────────────────────────

/// Calculate complete level N given all periods at level N-1.
pub fn vimshottari_complete_level(
    parent_level: &[DashaPeriod],
    config: &DashaConfig,
    child_level: DashaLevel,
) -> Result<Vec<DashaPeriod>, VedicError> {
    let estimated = parent_level.len() * config.cycle.len();
    if estimated > MAX_PERIODS_PER_LEVEL {
        return Err(VedicError::InvalidInput(
            "dasha level would exceed MAX_PERIODS_PER_LEVEL",
        ));
    }

    let mut result = Vec::with_capacity(estimated);
    for (pidx, parent) in parent_level.iter().enumerate() {
        result.extend(proportional_children(
            parent,
            &config.cycle,
            child_level,
            pidx as u32,
        )?);
    }

    Ok(result)
}

// ── Tier 3: Full hierarchy (levels 0..N) ─────────────────────────────

/// Calculate all levels from 0 to max_level.
pub fn vimshottari_hierarchy(
    birth_jd: f64,
    moon_sidereal_lon: f64,
    config: &DashaConfig,
    max_level: u8,
) -> Result<DashaHierarchy, VedicError> {
    let max_level = max_level.min(MAX_DASHA_LEVEL);
    let level0 = vimshottari_level0(birth_jd, moon_sidereal_lon, config)?;
    let mut levels: Vec<Vec<DashaPeriod>> = vec![level0];

    for depth in 1..=max_level {
        let Some(child_level) = DashaLevel::from_u8(depth) else {
            break;
        };
        let parent = &levels[(depth - 1) as usize];
        let children = vimshottari_complete_level(parent, config, child_level)?;
        levels.push(children);
    }

    Ok(DashaHierarchy { birth_jd, levels })
}

// ── Tier 4: Snapshot-only path ───────────────────────────────────────

/// Find active periods at query_jd without materializing full hierarchy.
///
/// Generates only the chain of active periods from level 0 to max_level.
/// An empty snapshot means `query_jd` lies before birth or past the horizon.
pub fn vimshottari_snapshot(
    birth_jd: f64,
    moon_sidereal_lon: f64,
    config: &DashaConfig,
    query_jd: f64,
    max_level: u8,
) -> Result<DashaSnapshot, VedicError> {
    let max_level = max_level.min(MAX_DASHA_LEVEL);
    let level0 = vimshottari_level0(birth_jd, moon_sidereal_lon, config)?;
    let mut active_periods: Vec<DashaPeriod> = Vec::with_capacity((max_level + 1) as usize);

    let Some(active_idx) = find_active_period(&level0, query_jd) else {
        return Ok(DashaSnapshot {
            query_jd,
            periods: active_periods,
        });
    };
    active_periods.push(level0[active_idx]);

    // Drill down through levels
    let mut current_parent = level0[active_idx];
    for _ in 1..=max_level {
        let children = vimshottari_children(&current_parent, config)?;
        match find_active_period(&children, query_jd) {
            Some(idx) => {
                active_periods.push(children[idx]);
                current_parent = children[idx];
            }
            None => break,
        }
    }

    Ok(DashaSnapshot {
        query_jd,
        periods: active_periods,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graha::Graha;
    use crate::nakshatra::NAKSHATRA_SPAN_27;

    const BIRTH: f64 = 2451545.0;

    #[test]
    fn ashwini_0_deg_is_full_ketu() {
        let cfg = DashaConfig::vimshottari();
        let periods = vimshottari_level0(BIRTH, 0.0, &cfg).unwrap();

        assert_eq!(periods.len(), 9);
        assert_eq!(periods[0].lord, Graha::Ketu);
        let ketu_years = periods[0].duration_days() / cfg.days_per_year;
        assert!((ketu_years - 7.0).abs() < 1e-9);

        let total_years = (periods[8].end_jd - BIRTH) / cfg.days_per_year;
        assert!((total_years - 120.0).abs() < 1e-6);
    }

    #[test]
    fn mid_bharani_starts_with_half_venus() {
        let cfg = DashaConfig::vimshottari();
        let periods = vimshottari_level0(BIRTH, 1.5 * NAKSHATRA_SPAN_27, &cfg).unwrap();
        assert_eq!(periods[0].lord, Graha::Shukra);
        let years = periods[0].duration_days() / cfg.days_per_year;
        assert!((years - 10.0).abs() < 1e-9);
        assert_eq!(periods[1].lord, Graha::Surya);
        // truncated start means one extra period to cover the horizon
        assert_eq!(periods.len(), 10);
        assert_eq!(periods[9].lord, Graha::Shukra);
    }

    #[test]
    fn level0_is_contiguous() {
        let cfg = DashaConfig::vimshottari();
        let periods = vimshottari_level0(BIRTH, 123.4, &cfg).unwrap();
        assert_eq!(periods[0].start_jd, BIRTH);
        for w in periods.windows(2) {
            assert_eq!(w[0].end_jd, w[1].start_jd);
        }
        assert!(periods.last().unwrap().end_jd >= BIRTH + cfg.horizon_days());
    }

    #[test]
    fn short_horizon_stops_early() {
        let cfg = DashaConfig {
            horizon_years: 10.0,
            ..DashaConfig::vimshottari()
        };
        // Ketu 7y then Venus 20y crosses the horizon
        let periods = vimshottari_level0(BIRTH, 0.0, &cfg).unwrap();
        assert_eq!(periods.len(), 2);
    }

    #[test]
    fn rejects_bad_inputs() {
        let cfg = DashaConfig::vimshottari();
        assert!(vimshottari_level0(f64::NAN, 0.0, &cfg).is_err());
        assert!(vimshottari_level0(BIRTH, f64::INFINITY, &cfg).is_err());
        let bad = DashaConfig {
            days_per_year: 0.0,
            ..DashaConfig::vimshottari()
        };
        assert!(vimshottari_level0(BIRTH, 0.0, &bad).is_err());
    }

    #[test]
    fn hierarchy_three_levels() {
        let cfg = DashaConfig::vimshottari();
        let h = vimshottari_hierarchy(BIRTH, 0.0, &cfg, 2).unwrap();
        assert_eq!(h.levels.len(), 3);
        assert_eq!(h.levels[1].len(), 81);
        assert_eq!(h.levels[2].len(), 729);
        // every antardasha run starts with its parent's lord
        for (i, maha) in h.levels[0].iter().enumerate() {
            let first = h.levels[1].iter().find(|p| p.parent_idx == i as u32).unwrap();
            assert_eq!(first.lord, maha.lord);
            assert_eq!(first.start_jd, maha.start_jd);
        }
    }

    #[test]
    fn max_level_is_clamped() {
        let cfg = DashaConfig::vimshottari();
        let h = vimshottari_hierarchy(BIRTH, 0.0, &cfg, 9).unwrap();
        assert_eq!(h.levels.len(), (MAX_DASHA_LEVEL + 1) as usize);
    }

    #[test]
    fn snapshot_before_birth_is_empty() {
        let cfg = DashaConfig::vimshottari();
        let snap = vimshottari_snapshot(BIRTH, 0.0, &cfg, BIRTH - 1.0, 2).unwrap();
        assert!(snap.periods.is_empty());
    }

    #[test]
    fn snapshot_chain_nests() {
        let cfg = DashaConfig::vimshottari();
        let q = BIRTH + 9000.0;
        let snap = vimshottari_snapshot(BIRTH, 77.0, &cfg, q, 2).unwrap();
        assert_eq!(snap.periods.len(), 3);
        for w in snap.periods.windows(2) {
            assert_eq!(w[1].parent_lord, Some(w[0].lord));
            assert!(w[0].start_jd <= w[1].start_jd && w[1].end_jd <= w[0].end_jd);
        }
        assert!(snap.periods.iter().all(|p| p.contains(q)));
    }
}
