//! Dasha (planetary period) hierarchy.
//!
//! A [`LordCycle`] drives three nested levels (mahadasha, antardasha,
//! pratyantardasha). Level 0 starts at birth with the Moon's star lord,
//! truncated by the elapsed fraction of its nakshatra; every deeper level
//! partitions its parent proportionally, starting from the parent's lord.

pub mod balance;
pub mod cycle;
pub mod query;
pub mod subperiod;
pub mod types;
pub mod vimshottari;

pub use balance::{BirthBalance, birth_balance, nakshatra_birth_balance};
pub use cycle::{LordCycle, VIMSHOTTARI_GRAHAS, VIMSHOTTARI_YEARS};
pub use query::{active_period, find_active_period, snapshot_from_hierarchy};
pub use subperiod::{
    Slice, partition, proportional_children, proportional_slices, snap_last_child_end,
};
pub use types::{
    ALL_DASHA_LEVELS, DEFAULT_DASHA_LEVEL, DashaHierarchy, DashaLevel, DashaPeriod, DashaSnapshot,
    MAX_DASHA_LEVEL, MAX_PERIODS_PER_LEVEL,
};
pub use vimshottari::{
    DEFAULT_HORIZON_YEARS, DashaConfig, vimshottari_children, vimshottari_complete_level,
    vimshottari_hierarchy, vimshottari_level0, vimshottari_snapshot,
};
