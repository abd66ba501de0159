//! Priority ranking: least-observed first

use super::transit::TransitCandidate;

/// Stable sort by ascending sample count. Candidates that were never
/// enriched sort ahead of all enriched ones.
pub fn rank_by_priority(mut candidates: Vec<TransitCandidate>) -> Vec<TransitCandidate> {
    candidates.sort_by_key(|candidate| candidate.sample_count);
    candidates
}
