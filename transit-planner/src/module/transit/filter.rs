//! Admissibility filters
//!
//! A candidate survives only if every predicate in [`FILTER_CHAIN`] keeps
//! it. Rejections are silent apart from a debug log line.

use chrono::NaiveTime;
use tracing::{debug, info};

use super::types::TransitCandidate;

/// Thresholds the predicates compare against, fixed for one run
#[derive(Debug, Clone, PartialEq)]
pub struct FilterThresholds {
    pub min_magnitude_depth: f64,
    pub elevation_threshold_degrees: i32,
    /// Earliest begin time-of-day, in the transit table's zone
    pub min_start_time: NaiveTime,
    /// Latest end time-of-day, in the transit table's zone
    pub max_end_time: NaiveTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitFilter {
    Depth,
    MeridianFlip,
    TimeWindow,
    Elevation,
}

/// All predicates, cheapest first
pub const FILTER_CHAIN: [TransitFilter; 4] = [
    TransitFilter::Depth,
    TransitFilter::MeridianFlip,
    TransitFilter::TimeWindow,
    TransitFilter::Elevation,
];

impl TransitFilter {
    pub fn name(&self) -> &'static str {
        match self {
            TransitFilter::Depth => "depth",
            TransitFilter::MeridianFlip => "meridian flip",
            TransitFilter::TimeWindow => "time window",
            TransitFilter::Elevation => "elevation",
        }
    }

    /// `true` keeps the candidate
    pub fn keeps(&self, candidate: &TransitCandidate, thresholds: &FilterThresholds) -> bool {
        match self {
            TransitFilter::Depth => candidate.magnitude_depth >= thresholds.min_magnitude_depth,
            TransitFilter::MeridianFlip => !has_meridian_flip(candidate),
            TransitFilter::TimeWindow => {
                candidate.begin.time_of_day() >= thresholds.min_start_time
                    && candidate.end.time_of_day() <= thresholds.max_end_time
            }
            TransitFilter::Elevation => candidate
                .elevations()
                .iter()
                .all(|&elevation| elevation >= thresholds.elevation_threshold_degrees),
        }
    }
}

/// Elevation peaks inside the transit, so the mount flips mid-observation.
fn has_meridian_flip(candidate: &TransitCandidate) -> bool {
    let [begin, center, end] = candidate.elevations();
    begin < center && end < center
}

/// Check a candidate against the whole chain.
pub fn is_admissible(candidate: &TransitCandidate, thresholds: &FilterThresholds) -> bool {
    match FILTER_CHAIN
        .iter()
        .find(|filter| !filter.keeps(candidate, thresholds))
    {
        Some(filter) => {
            debug!("{} rejected by {} filter", candidate.object, filter.name());
            false
        }
        None => true,
    }
}

/// Keep the admissible candidates, preserving their order.
pub fn apply_filters(
    candidates: Vec<TransitCandidate>,
    thresholds: &FilterThresholds,
) -> Vec<TransitCandidate> {
    let total = candidates.len();
    let admissible: Vec<TransitCandidate> = candidates
        .into_iter()
        .filter(|candidate| is_admissible(candidate, thresholds))
        .collect();

    info!(
        "Filtering complete: {} -> {} candidates ({} discarded)",
        total,
        admissible.len(),
        total - admissible.len()
    );

    admissible
}
