//! Active-period lookup over contiguous, sorted period lists.

use super::types::{DashaHierarchy, DashaPeriod, DashaSnapshot};

/// Index of the period containing `jd`, treating each as `[start_jd, end_jd)`.
///
/// `periods` must be sorted and contiguous (as every generated level is).
/// An instant on a shared boundary belongs to the later period.
pub fn find_active_period(periods: &[DashaPeriod], jd: f64) -> Option<usize> {
    let after = periods.partition_point(|p| p.start_jd <= jd);
    let idx = after.checked_sub(1)?;
    periods[idx].contains(jd).then_some(idx)
}

/// Period containing `jd`, if any.
pub fn active_period(periods: &[DashaPeriod], jd: f64) -> Option<&DashaPeriod> {
    find_active_period(periods, jd).map(|i| &periods[i])
}

/// Active chain at `query_jd` from an already materialized hierarchy.
pub fn snapshot_from_hierarchy(hierarchy: &DashaHierarchy, query_jd: f64) -> DashaSnapshot {
    let mut periods = Vec::with_capacity(hierarchy.levels.len());
    for level in &hierarchy.levels {
        match active_period(level, query_jd) {
            Some(p) => periods.push(*p),
            None => break,
        }
    }
    DashaSnapshot { query_jd, periods }
}
