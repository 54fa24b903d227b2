//! Pure-math KP building blocks.
//!
//! This crate provides:
//! - Graha, rashi and nakshatra enums with sign lordship
//! - House containment and ownership over 12 cusps
//! - Lord cycles and the three-level dasha hierarchy built on them
//! - Star lords, sub-lords and cuspal sub-lords
//! - The house significator map
//!
//! Everything here is a deterministic function of longitudes, cusps and
//! instants; obtaining those is the ephemeris layer's job.

pub mod bhava;
pub mod dasha;
pub mod error;
pub mod graha;
pub mod nakshatra;
pub mod rashi;
pub mod significator;
pub mod sublord;
pub mod util;

pub use bhava::{CUSP_EPSILON_DEG, house_of_longitude, house_signs, owned_houses, validate_cusps};
pub use dasha::{
    BirthBalance, DashaConfig, DashaHierarchy, DashaLevel, DashaPeriod, DashaSnapshot, LordCycle,
    birth_balance, find_active_period, partition, snapshot_from_hierarchy, vimshottari_hierarchy,
    vimshottari_level0, vimshottari_snapshot,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, RashiLordship, rashi_lord};
pub use nakshatra::{
    ALL_NAKSHATRAS_27, NAKSHATRA_SPAN_27, Nakshatra, NakshatraInfo, nakshatra_from_longitude,
};
pub use rashi::{ALL_RASHIS, Rashi, rashi_from_longitude};
pub use significator::{
    GrahaLongitudes, SELF_WEIGHT, SIGN_LORD_WEIGHT, STAR_LORD_WEIGHT, SignificatorMap,
    build_significators,
};
pub use sublord::{KpPosition, cuspal_sub_lords, kp_position, star_lord, sub_lord, sub_lord_spans};
pub use util::{forward_arc, normalize_360};
