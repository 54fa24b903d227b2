//! Event-timing search over KP charts.
//!
//! This crate provides:
//! - Natal chart building from birth data through an ephemeris provider
//! - Dasha hierarchy and snapshot orchestration for a chart
//! - Window selection: policy scoring of dasha periods around an anchor
//! - Transit triggers against the natal chart
//! - `predict_event`, the end-to-end pipeline

pub mod dasha;
pub mod error;
pub mod natal;
pub mod predict;
pub mod transit;
pub mod window;
pub mod window_types;

pub use dasha::{birth_balance_for_natal, dasha_hierarchy_for_natal, dasha_snapshot_at};
pub use error::SearchError;
pub use natal::{
    BirthInput, CuspRow, GrahaRow, NatalContext, NatalSummary, build_natal, build_natal_at,
    graha_body, graha_longitudes_at, natal_summary,
};
pub use predict::{PredictRequest, predict_event, predict_event_with};
pub use transit::{DEFAULT_TRANSIT_ORB_DEG, TransitTriggers, transit_triggers, within_aspect};
pub use window::{
    BOTTOM_BONUS, BOTTOM_WEIGHT, MID_BONUS, MID_WEIGHT, NEGATIVE_HOUSE_FACTOR, TOP_WEIGHT,
    WindowQuery, lord_support, score_triple, select_windows,
};
pub use window_types::{Direction, RankedWindow, Relaxation, WindowSelection};
