//! Window selector: scores every (maha, antar, pratyantar) triple of a
//! dasha hierarchy against an event policy and ranks them around an anchor.
//!
//! score = 0.3·S(maha) + 0.6·S(antar) + 1.0·S(pratyantar) + depth bonus, with
//! S(lord) = Σ positive-house weights − 0.8·Σ negative-house weights + focus.

use kp_config::EventPolicy;
use kp_time::{datetime_from_jd, years_between};
use kp_vedic_base::dasha::{DashaHierarchy, DashaPeriod};
use kp_vedic_base::{Graha, SignificatorMap};
use log::{debug, info, warn};

use crate::error::SearchError;
use crate::natal::NatalContext;
use crate::window_types::{Direction, RankedWindow, Relaxation, WindowSelection};

/// Level multipliers.
pub const TOP_WEIGHT: f64 = 0.3;
pub const MID_WEIGHT: f64 = 0.6;
pub const BOTTOM_WEIGHT: f64 = 1.0;

/// Multiplier applied to negative-house weight.
pub const NEGATIVE_HOUSE_FACTOR: f64 = 0.8;

/// Bonus for a triple reaching the bottom level.
pub const BOTTOM_BONUS: f64 = 0.25;
/// Bonus for a triple stopping at the mid level.
pub const MID_BONUS: f64 = 0.12;

/// Scores closer than this count as tied for the past-direction rule.
pub const SCORE_TIE_EPSILON: f64 = 1e-6;

/// Parameters of one window search.
#[derive(Debug, Clone, Copy)]
pub struct WindowQuery<'a> {
    pub policy: &'a EventPolicy,
    pub anchor_jd: f64,
    pub direction: Direction,
    /// Maximum windows returned.
    pub limit: usize,
    /// Year length for ages.
    pub days_per_year: f64,
}

/// Support of one period lord for the policy.
pub fn lord_support(sig: &SignificatorMap, policy: &EventPolicy, lord: Graha) -> f64 {
    sig.house_sum(lord, &policy.positive_houses)
        - NEGATIVE_HOUSE_FACTOR * sig.house_sum(lord, &policy.negative_houses)
        + policy.focus_weight(lord)
}

/// Score of a triple given its lords.
pub fn score_triple(
    sig: &SignificatorMap,
    policy: &EventPolicy,
    top: Graha,
    mid: Option<Graha>,
    bottom: Option<Graha>,
) -> f64 {
    let mut score = TOP_WEIGHT * lord_support(sig, policy, top);
    if let Some(lord) = mid {
        score += MID_WEIGHT * lord_support(sig, policy, lord);
    }
    match bottom {
        Some(lord) => score += BOTTOM_WEIGHT * lord_support(sig, policy, lord) + BOTTOM_BONUS,
        None if mid.is_some() => score += MID_BONUS,
        None => {}
    }
    score
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    maha: usize,
    antar: Option<usize>,
    pratyantar: Option<usize>,
    start_jd: f64,
    end_jd: f64,
    age_start: f64,
    age_end: f64,
    score: f64,
    distance_days: f64,
}

fn children_index(level: &[DashaPeriod], parent_count: usize) -> Vec<Vec<usize>> {
    let mut out = vec![Vec::new(); parent_count];
    for (i, p) in level.iter().enumerate() {
        if let Some(slot) = out.get_mut(p.parent_idx as usize) {
            slot.push(i);
        }
    }
    out
}

fn enumerate_triples(h: &DashaHierarchy) -> Vec<(usize, Option<usize>, Option<usize>)> {
    let empty: &[DashaPeriod] = &[];
    let mahas = h.levels.first().map(Vec::as_slice).unwrap_or(empty);
    let antars = h.levels.get(1).map(Vec::as_slice).unwrap_or(empty);
    let pratyantars = h.levels.get(2).map(Vec::as_slice).unwrap_or(empty);
    let antars_of = children_index(antars, mahas.len());
    let pratyantars_of = children_index(pratyantars, antars.len());

    let mut triples = Vec::with_capacity(pratyantars.len().max(mahas.len()));
    for (m, kids) in antars_of.iter().enumerate() {
        if kids.is_empty() {
            triples.push((m, None, None));
            continue;
        }
        for &a in kids {
            match pratyantars_of.get(a).filter(|g| !g.is_empty()) {
                Some(grandkids) => triples.extend(grandkids.iter().map(|&p| (m, Some(a), Some(p)))),
                None => triples.push((m, Some(a), None)),
            }
        }
    }
    triples
}

fn build_candidates(
    birth_jd: f64,
    h: &DashaHierarchy,
    sig: &SignificatorMap,
    query: &WindowQuery<'_>,
) -> Vec<Candidate> {
    let lord_at = |depth: usize, idx: usize| h.levels[depth][idx].lord;
    enumerate_triples(h)
        .into_iter()
        .map(|(m, a, p)| {
            let window = match (a, p) {
                (_, Some(p)) => &h.levels[2][p],
                (Some(a), None) => &h.levels[1][a],
                (None, None) => &h.levels[0][m],
            };
            Candidate {
                maha: m,
                antar: a,
                pratyantar: p,
                start_jd: window.start_jd,
                end_jd: window.end_jd,
                age_start: years_between(birth_jd, window.start_jd, query.days_per_year),
                age_end: years_between(birth_jd, window.end_jd, query.days_per_year),
                score: score_triple(
                    sig,
                    query.policy,
                    lord_at(0, m),
                    a.map(|a| lord_at(1, a)),
                    p.map(|p| lord_at(2, p)),
                ),
                distance_days: (window.start_jd - query.anchor_jd).abs(),
            }
        })
        .collect()
}

fn passes_direction(c: &Candidate, direction: Direction, anchor_jd: f64) -> bool {
    match direction {
        Direction::Future => c.end_jd > anchor_jd,
        Direction::Past => c.start_jd <= anchor_jd,
        Direction::Nearest => true,
    }
}

fn filtered(
    all: &[Candidate],
    query: &WindowQuery<'_>,
    relaxation: Relaxation,
) -> Vec<Candidate> {
    let use_age = relaxation == Relaxation::None;
    let use_direction = relaxation != Relaxation::AgeAndDirectionDropped;
    all.iter()
        .filter(|c| !use_age || query.policy.admits_ages(c.age_start, c.age_end))
        .filter(|c| !use_direction || passes_direction(c, query.direction, query.anchor_jd))
        .copied()
        .collect()
}

fn rank(candidates: &mut [Candidate], past_rule: bool) {
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.distance_days.total_cmp(&b.distance_days))
            .then(a.start_jd.total_cmp(&b.start_jd))
    });
    if past_rule {
        if let Some(top) = candidates.first().map(|c| c.score) {
            let tied = candidates
                .iter()
                .take_while(|c| top - c.score <= SCORE_TIE_EPSILON)
                .count();
            candidates[..tied].sort_by(|a, b| b.start_jd.total_cmp(&a.start_jd));
        }
    }
}

/// Rank candidate windows of `hierarchy` for `query.policy`.
///
/// If the age and direction filters leave nothing, the age filter is
/// dropped, then the direction filter too; the applied step is reported in
/// [`WindowSelection::relaxation`]. Fails with [`SearchError::NoCandidates`]
/// only when the hierarchy itself yields no triples.
pub fn select_windows(
    natal: &NatalContext,
    hierarchy: &DashaHierarchy,
    significators: &SignificatorMap,
    query: &WindowQuery<'_>,
) -> Result<WindowSelection, SearchError> {
    if !query.anchor_jd.is_finite() {
        return Err(SearchError::InvalidInput("anchor instant must be finite".to_string()));
    }
    if query.limit == 0 {
        return Err(SearchError::InvalidInput("result limit must be at least 1".to_string()));
    }
    if !query.days_per_year.is_finite() || query.days_per_year <= 0.0 {
        return Err(SearchError::InvalidInput("days_per_year must be positive".to_string()));
    }

    let all = build_candidates(natal.birth_jd, hierarchy, significators, query);
    debug!("{} candidate triples for '{}'", all.len(), query.policy.name);

    let steps = [
        Relaxation::None,
        Relaxation::AgeDropped,
        Relaxation::AgeAndDirectionDropped,
    ];
    let mut chosen = None;
    for step in steps {
        let kept = filtered(&all, query, step);
        if !kept.is_empty() {
            chosen = Some((step, kept));
            break;
        }
        debug!("no candidates with {step:?}");
    }
    let Some((relaxation, mut kept)) = chosen else {
        return Err(SearchError::NoCandidates);
    };
    if relaxation != Relaxation::None {
        warn!(
            "window search for '{}' relaxed: {:?} ({} candidates)",
            query.policy.name,
            relaxation,
            kept.len()
        );
    }

    let past_rule = query.direction == Direction::Past
        && relaxation != Relaxation::AgeAndDirectionDropped;
    rank(&mut kept, past_rule);
    kept.truncate(query.limit);

    let windows = kept
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Ok(RankedWindow {
                rank: i + 1,
                maha: hierarchy.levels[0][c.maha],
                antar: c.antar.map(|a| hierarchy.levels[1][a]),
                pratyantar: c.pratyantar.map(|p| hierarchy.levels[2][p]),
                start_jd: c.start_jd,
                end_jd: c.end_jd,
                start: datetime_from_jd(c.start_jd)?,
                end: datetime_from_jd(c.end_jd)?,
                age_start: c.age_start,
                age_end: c.age_end,
                score: c.score,
                distance_days: c.distance_days,
            })
        })
        .collect::<Result<Vec<_>, SearchError>>()?;

    if let Some(best) = windows.first() {
        info!(
            "best window for '{}': jd {:.3}..{:.3} score {:.3}",
            query.policy.name, best.start_jd, best.end_jd, best.score
        );
    }

    Ok(WindowSelection {
        policy: query.policy.name.clone(),
        label: query.policy.label.clone(),
        direction: query.direction,
        anchor_jd: query.anchor_jd,
        anchor: datetime_from_jd(query.anchor_jd)?,
        relaxation,
        windows,
    })
}
