//! Integration tests for the dasha hierarchy.

use kp_vedic_base::dasha::{
    DashaConfig, DashaLevel, LordCycle, MAX_DASHA_LEVEL, find_active_period, partition,
    snapshot_from_hierarchy, vimshottari_hierarchy, vimshottari_level0, vimshottari_snapshot,
};
use kp_vedic_base::{Graha, NAKSHATRA_SPAN_27};

const BIRTH: f64 = 2451545.0;

fn next_down(x: f64) -> f64 {
    f64::from_bits(x.to_bits() - 1)
}

/// Moon at 40° (start of Rohini) → full Chandra mahadasha, then Mangal.
#[test]
fn moon_at_rohini_start() {
    let cfg = DashaConfig::vimshottari();
    let level0 = vimshottari_level0(BIRTH, 3.0 * NAKSHATRA_SPAN_27, &cfg).unwrap();
    assert_eq!(level0[0].lord, Graha::Chandra);
    assert!((level0[0].duration_days() - 10.0 * cfg.days_per_year).abs() < 1e-6);
    assert_eq!(level0[1].lord, Graha::Mangal);
}

/// Every child run tiles its parent exactly, at every level.
#[test]
fn children_tile_parents() {
    let cfg = DashaConfig::vimshottari();
    let h = vimshottari_hierarchy(BIRTH, 211.7, &cfg, MAX_DASHA_LEVEL).unwrap();
    for depth in 1..h.levels.len() {
        let parents = &h.levels[depth - 1];
        for (pidx, parent) in parents.iter().enumerate() {
            let kids: Vec<_> = h.levels[depth]
                .iter()
                .filter(|c| c.parent_idx == pidx as u32)
                .collect();
            assert_eq!(kids.len(), 9);
            assert_eq!(kids[0].start_jd, parent.start_jd);
            assert_eq!(kids[8].end_jd, parent.end_jd);
            assert_eq!(kids[0].lord, parent.lord);
            for w in kids.windows(2) {
                assert_eq!(w[0].end_jd, w[1].start_jd);
            }
            let sum: f64 = kids.iter().map(|k| k.duration_days()).sum();
            assert!((sum - parent.duration_days()).abs() < 1e-6);
        }
    }
}

/// Whole levels are contiguous so active lookup can binary-search them.
#[test]
fn levels_are_contiguous() {
    let cfg = DashaConfig::vimshottari();
    let h = vimshottari_hierarchy(BIRTH, 5.0, &cfg, 2).unwrap();
    for level in &h.levels {
        for w in level.windows(2) {
            assert_eq!(w[0].end_jd, w[1].start_jd);
        }
    }
}

/// Snapshot-only path agrees with the materialized hierarchy.
#[test]
fn snapshot_matches_hierarchy() {
    let cfg = DashaConfig::vimshottari();
    let moon = 301.25;
    let h = vimshottari_hierarchy(BIRTH, moon, &cfg, 2).unwrap();
    for offset in [0.0, 1.0, 3000.0, 12345.6, 30000.0, 43000.0] {
        let q = BIRTH + offset;
        let direct = vimshottari_snapshot(BIRTH, moon, &cfg, q, 2).unwrap();
        let from_h = snapshot_from_hierarchy(&h, q);
        assert_eq!(direct.periods.len(), from_h.periods.len());
        for (a, b) in direct.periods.iter().zip(&from_h.periods) {
            assert_eq!(a.lord, b.lord);
            assert_eq!(a.level, b.level);
            assert_eq!(a.start_jd, b.start_jd);
            assert_eq!(a.end_jd, b.end_jd);
        }
    }
}

/// The instant just before a boundary belongs to the earlier period; the
/// boundary itself belongs to the later one.
#[test]
fn boundary_instants_resolve_half_open() {
    let cfg = DashaConfig::vimshottari();
    let h = vimshottari_hierarchy(BIRTH, 17.0, &cfg, 2).unwrap();
    let antar = &h.levels[DashaLevel::Antardasha as usize];
    for k in [0usize, 4, 9, 40] {
        let boundary = antar[k].end_jd;
        assert_eq!(find_active_period(antar, next_down(boundary)), Some(k));
        assert_eq!(find_active_period(antar, boundary), Some(k + 1));
    }
}

/// A query past the horizon finds nothing.
#[test]
fn past_horizon_snapshot_is_empty() {
    let cfg = DashaConfig::vimshottari();
    let level0 = vimshottari_level0(BIRTH, 0.0, &cfg).unwrap();
    let end = level0.last().unwrap().end_jd;
    let snap = vimshottari_snapshot(BIRTH, 0.0, &cfg, end + 1.0, 2).unwrap();
    assert!(snap.periods.is_empty());
}

/// A cycle other than Vimshottari drives the same engine.
#[test]
fn injected_cycle() {
    let cycle = LordCycle::new(&[
        (Graha::Surya, 10.0),
        (Graha::Chandra, 20.0),
        (Graha::Mangal, 30.0),
    ])
    .unwrap();
    let cfg = DashaConfig {
        cycle,
        days_per_year: 365.25,
        horizon_years: 60.0,
    };
    let level0 = vimshottari_level0(BIRTH, 0.0, &cfg).unwrap();
    let lords: Vec<Graha> = level0.iter().map(|p| p.lord).collect();
    assert_eq!(lords, vec![Graha::Surya, Graha::Chandra, Graha::Mangal]);

    // nakshatra 4 → position 4 mod 3 = 1 → Chandra first
    let level0 = vimshottari_level0(BIRTH, 4.5 * NAKSHATRA_SPAN_27, &cfg).unwrap();
    assert_eq!(level0[0].lord, Graha::Chandra);
    assert!((level0[0].duration_days() - 10.0 * 365.25).abs() < 1e-6);
}

/// Partitioning a single mahadasha reproduces the hierarchy's antardashas.
#[test]
fn partition_matches_hierarchy_children() {
    let cfg = DashaConfig::vimshottari();
    let h = vimshottari_hierarchy(BIRTH, 0.0, &cfg, 1).unwrap();
    let venus = h.levels[0][1];
    let levels = partition(
        &cfg.cycle,
        venus.lord,
        venus.start_jd,
        venus.duration_days(),
        DashaLevel::Antardasha,
        1,
    )
    .unwrap();
    let from_h: Vec<_> = h.levels[1].iter().filter(|p| p.parent_idx == 1).collect();
    for (a, b) in levels[0].iter().zip(from_h) {
        assert_eq!(a.lord, b.lord);
        assert!((a.start_jd - b.start_jd).abs() < 1e-9);
        assert!((a.end_jd - b.end_jd).abs() < 1e-9);
    }
}
