//! Proportional sub-period generation.
//!
//! child duration = (child_weight / cycle_total) * parent_duration, with the
//! child sequence rotated to start at the parent's own lord. The same
//! partition drives sub-lords, where the "span" is a fraction of a
//! nakshatra rather than a stretch of days.

use crate::error::VedicError;
use crate::graha::Graha;

use super::cycle::LordCycle;
use super::types::{DashaLevel, DashaPeriod};

/// One proportional slice of a span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub lord: Graha,
    pub start: f64,
    pub end: f64,
}

/// Split `[start, start + span)` into one slice per cycle lord, beginning at
/// cycle position `start_pos`. The last slice ends exactly at `start + span`.
pub fn proportional_slices(
    cycle: &LordCycle,
    start_pos: usize,
    start: f64,
    span: f64,
) -> Vec<Slice> {
    let total = cycle.total_weight();
    let end_of_span = start + span;
    let mut slices: Vec<Slice> = Vec::with_capacity(cycle.len());
    let mut cursor = start;
    for (lord, weight) in cycle.rotated(start_pos) {
        let end = cursor + span * (weight / total);
        slices.push(Slice {
            lord,
            start: cursor,
            end,
        });
        cursor = end;
    }
    if let Some(last) = slices.last_mut() {
        last.end = end_of_span;
    }
    slices
}

/// Snap the last child's end_jd to parent's end_jd to absorb floating-point drift.
pub fn snap_last_child_end(children: &mut [DashaPeriod], parent_end_jd: f64) {
    if let Some(last) = children.last_mut() {
        last.end_jd = parent_end_jd;
    }
}

/// Generate proportional children for a parent period.
///
/// `child_level`: the level to assign to generated children.
/// `parent_idx`: index of parent in its level array.
pub fn proportional_children(
    parent: &DashaPeriod,
    cycle: &LordCycle,
    child_level: DashaLevel,
    parent_idx: u32,
) -> Result<Vec<DashaPeriod>, VedicError> {
    let pos = cycle
        .position(parent.lord)
        .ok_or(VedicError::LordNotInCycle(parent.lord.english_name()))?;
    let mut children: Vec<DashaPeriod> =
        proportional_slices(cycle, pos, parent.start_jd, parent.duration_days())
            .into_iter()
            .enumerate()
            .map(|(order_0, s)| DashaPeriod {
                lord: s.lord,
                start_jd: s.start,
                end_jd: s.end,
                level: child_level,
                order: (order_0 as u16) + 1,
                parent_idx,
                parent_lord: Some(parent.lord),
            })
            .collect();
    snap_last_child_end(&mut children, parent.end_jd);
    Ok(children)
}

/// Partition one lord's span into nested levels.
///
/// Returns one `Vec` per generated level: `[0]` holds the direct children of
/// `parent_lord` at `first_level`, `[1]` their children, and so on for
/// `depth` levels (stopping early at the deepest supported level). Each
/// period's `parent_idx` points into the previous `Vec`; for the first one it
/// is 0.
pub fn partition(
    cycle: &LordCycle,
    parent_lord: Graha,
    start_jd: f64,
    duration_days: f64,
    first_level: DashaLevel,
    depth: u8,
) -> Result<Vec<Vec<DashaPeriod>>, VedicError> {
    if !start_jd.is_finite() || !duration_days.is_finite() || duration_days <= 0.0 {
        return Err(VedicError::InvalidInput("partition span must be finite and positive"));
    }
    if depth == 0 {
        return Ok(Vec::new());
    }
    // stand-in for the enclosing period; never emitted
    let parent = DashaPeriod {
        lord: parent_lord,
        start_jd,
        end_jd: start_jd + duration_days,
        level: first_level,
        order: 1,
        parent_idx: 0,
        parent_lord: None,
    };
    let mut levels = vec![proportional_children(&parent, cycle, first_level, 0)?];
    let mut level = first_level;
    for _ in 1..depth {
        let Some(next) = level.child_level() else {
            break;
        };
        let prev = &levels[levels.len() - 1];
        let mut out = Vec::with_capacity(prev.len() * cycle.len());
        for (pidx, p) in prev.iter().enumerate() {
            out.extend(proportional_children(p, cycle, next, pidx as u32)?);
        }
        levels.push(out);
        level = next;
    }
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cycle() -> LordCycle {
        LordCycle::new(&[
            (Graha::Ketu, 1.0),
            (Graha::Shukra, 2.0),
            (Graha::Surya, 1.0),
        ])
        .unwrap()
    }

    fn period(lord: Graha, start: f64, days: f64) -> DashaPeriod {
        DashaPeriod {
            lord,
            start_jd: start,
            end_jd: start + days,
            level: DashaLevel::Mahadasha,
            order: 1,
            parent_idx: 0,
            parent_lord: None,
        }
    }

    #[test]
    fn proportional_children_sum_to_parent() {
        let parent = period(Graha::Ketu, 2451545.0, 400.0);
        let children =
            proportional_children(&parent, &test_cycle(), DashaLevel::Antardasha, 0).unwrap();
        assert_eq!(children.len(), 3);
        assert!((children[0].start_jd - parent.start_jd).abs() < 1e-10);
        assert_eq!(children[2].end_jd, parent.end_jd);
        assert!((children[0].end_jd - children[1].start_jd).abs() < 1e-10);
        assert!((children[1].duration_days() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn children_rotate_from_parent_lord() {
        let parent = period(Graha::Shukra, 0.0, 400.0);
        let children =
            proportional_children(&parent, &test_cycle(), DashaLevel::Antardasha, 3).unwrap();
        let lords: Vec<Graha> = children.iter().map(|c| c.lord).collect();
        assert_eq!(lords, vec![Graha::Shukra, Graha::Surya, Graha::Ketu]);
        assert!(children.iter().all(|c| c.parent_idx == 3));
        assert!(children.iter().all(|c| c.parent_lord == Some(Graha::Shukra)));
        assert_eq!(children[0].order, 1);
        assert_eq!(children[2].order, 3);
    }

    #[test]
    fn foreign_lord_is_rejected() {
        let parent = period(Graha::Shani, 0.0, 10.0);
        let err = proportional_children(&parent, &test_cycle(), DashaLevel::Antardasha, 0);
        assert_eq!(err, Err(VedicError::LordNotInCycle("Saturn")));
    }

    #[test]
    fn slices_cover_unit_span() {
        let slices = proportional_slices(&test_cycle(), 1, 0.0, 1.0);
        assert_eq!(slices[0].lord, Graha::Shukra);
        assert!((slices[0].end - 0.5).abs() < 1e-15);
        assert_eq!(slices[2].end, 1.0);
    }

    #[test]
    fn partition_two_levels() {
        let cycle = LordCycle::vimshottari();
        let levels =
            partition(&cycle, Graha::Shukra, 0.0, 7305.0, DashaLevel::Antardasha, 2).unwrap();
        assert_eq!(levels.len(), 2);
        assert_eq!(levels[0].len(), 9);
        assert_eq!(levels[1].len(), 81);
        assert_eq!(levels[0][0].lord, Graha::Shukra);
        assert_eq!(levels[0][8].end_jd, 7305.0);
        // second antardasha (Surya) starts its own pratyantar run
        let surya_kids: Vec<&DashaPeriod> =
            levels[1].iter().filter(|p| p.parent_idx == 1).collect();
        assert_eq!(surya_kids[0].lord, Graha::Surya);
        assert_eq!(surya_kids[8].end_jd, levels[0][1].end_jd);
    }

    #[test]
    fn partition_stops_at_deepest_level() {
        let cycle = LordCycle::vimshottari();
        let levels =
            partition(&cycle, Graha::Ketu, 0.0, 100.0, DashaLevel::Pratyantardasha, 3).unwrap();
        assert_eq!(levels.len(), 1);
    }

    #[test]
    fn partition_rejects_empty_span() {
        let cycle = LordCycle::vimshottari();
        assert!(partition(&cycle, Graha::Ketu, 0.0, 0.0, DashaLevel::Antardasha, 1).is_err());
    }
}
