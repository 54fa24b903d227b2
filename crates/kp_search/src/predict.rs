//! End-to-end event prediction: chart, dasha hierarchy, significators and
//! window ranking in one call.

use chrono::Utc;
use kp_config::{EngineSettings, PolicyStore};
use kp_core::EphemerisProvider;
use kp_time::{jd_from_datetime, parse_instant_jd};
use kp_vedic_base::{LordCycle, RashiLordship};
use log::info;
use serde::{Deserialize, Serialize};

use crate::dasha::dasha_hierarchy_for_natal;
use crate::error::SearchError;
use crate::natal::{BirthInput, build_natal};
use crate::window::{WindowQuery, select_windows};
use crate::window_types::{Direction, WindowSelection};

/// One prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub birth: BirthInput,
    /// Policy name; unknown names fall back to the default policy unless
    /// `strict_policy` is set.
    pub event: String,
    /// ISO-8601 instant the search is centred on; `None` means now.
    #[serde(default)]
    pub anchor: Option<String>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub strict_policy: bool,
    /// Overrides the configured result limit.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl PredictRequest {
    /// Request anchored at the time of the call.
    pub fn new(birth: BirthInput, event: impl Into<String>) -> Self {
        Self {
            birth,
            event: event.into(),
            anchor: None,
            direction: Direction::default(),
            strict_policy: false,
            limit: None,
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

/// Rank event windows for `request` with the Vimshottari cycle and
/// classical sign lordship.
pub fn predict_event(
    provider: &dyn EphemerisProvider,
    request: &PredictRequest,
    policies: &PolicyStore,
    settings: &EngineSettings,
) -> Result<WindowSelection, SearchError> {
    predict_event_with(
        provider,
        request,
        policies,
        settings,
        LordCycle::vimshottari(),
        &RashiLordship::classical(),
    )
}

/// [`predict_event`] over an explicit cycle and lordship table.
pub fn predict_event_with(
    provider: &dyn EphemerisProvider,
    request: &PredictRequest,
    policies: &PolicyStore,
    settings: &EngineSettings,
    cycle: LordCycle,
    lordship: &RashiLordship,
) -> Result<WindowSelection, SearchError> {
    settings.validate()?;
    let policy = if request.strict_policy {
        policies.get_strict(&request.event)?
    } else {
        policies.resolve(&request.event)
    };
    let anchor_jd = match &request.anchor {
        Some(anchor) => parse_instant_jd(anchor)?,
        None => jd_from_datetime(&Utc::now()),
    };

    let natal = build_natal(provider, &request.birth)?;
    let significators = natal.significators(&cycle, lordship)?;
    let dasha = settings.dasha_config(cycle);
    let hierarchy = dasha_hierarchy_for_natal(&natal, &dasha, settings.max_level)?;

    let query = WindowQuery {
        policy,
        anchor_jd,
        direction: request.direction,
        limit: request.limit.unwrap_or(settings.result_limit),
        days_per_year: settings.days_per_year,
    };
    let selection = select_windows(&natal, &hierarchy, &significators, &query)?;
    info!(
        "predicted '{}' ({}): {} windows{}",
        request.event,
        policy.name,
        selection.windows.len(),
        if selection.relaxed() { ", relaxed" } else { "" }
    );
    Ok(selection)
}
