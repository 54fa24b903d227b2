//! Dasha orchestration: bridges a natal context with the pure-math dasha
//! computation in kp_vedic_base.
//!
//! Entry points:
//! - `dasha_hierarchy_for_natal`: computes full hierarchy (levels 0..N)
//! - `dasha_snapshot_at`: finds active periods at a query time (efficient)
//! - `birth_balance_for_natal`: the truncated first period in report form

use kp_vedic_base::dasha::{
    BirthBalance, DashaConfig, DashaHierarchy, DashaSnapshot, birth_balance,
    vimshottari_hierarchy, vimshottari_snapshot,
};
use log::debug;

use crate::error::SearchError;
use crate::natal::NatalContext;

/// Full hierarchy from birth, levels 0..=max_level.
pub fn dasha_hierarchy_for_natal(
    natal: &NatalContext,
    config: &DashaConfig,
    max_level: u8,
) -> Result<DashaHierarchy, SearchError> {
    let moon = natal.moon_longitude()?;
    let hierarchy = vimshottari_hierarchy(natal.birth_jd, moon, config, max_level)?;
    debug!(
        "dasha hierarchy: {} levels, sizes {:?}",
        hierarchy.levels.len(),
        hierarchy.levels.iter().map(Vec::len).collect::<Vec<_>>()
    );
    Ok(hierarchy)
}

/// Active periods at `query_jd`; empty if the query lies outside the hierarchy.
pub fn dasha_snapshot_at(
    natal: &NatalContext,
    config: &DashaConfig,
    query_jd: f64,
    max_level: u8,
) -> Result<DashaSnapshot, SearchError> {
    if !query_jd.is_finite() {
        return Err(SearchError::InvalidInput("query instant must be finite".to_string()));
    }
    let moon = natal.moon_longitude()?;
    Ok(vimshottari_snapshot(
        natal.birth_jd,
        moon,
        config,
        query_jd,
        max_level,
    )?)
}

/// Birth balance of the chart's Moon.
pub fn birth_balance_for_natal(
    natal: &NatalContext,
    config: &DashaConfig,
) -> Result<BirthBalance, SearchError> {
    let balance = birth_balance(natal.moon_longitude()?, &config.cycle, config.days_per_year);
    debug!(
        "moon in {} ({:.4} elapsed), {} balance {:.2} days",
        balance.nakshatra.name(),
        balance.elapsed_fraction,
        balance.lord,
        balance.balance_days
    );
    Ok(balance)
}
