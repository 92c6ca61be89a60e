use std::collections::{HashMap, HashSet};

use crate::core::text::locations_match;
use crate::models::{CandidateInput, Factor, FactorWeights, RoleInput};

/// Check if a candidate lives within reach of the role
///
/// Batch pre-filter, using the same rule as the location factor.
#[inline]
pub fn matches_catchment(candidate: &CandidateInput, role: &RoleInput, anchors: &[String]) -> bool {
    locations_match(candidate.facts.locations(), role.facts.location(), anchors)
}

/// Check if a pair already has a persisted match
#[inline]
pub fn is_already_matched(
    candidate: &CandidateInput,
    role: &RoleInput,
    excluded: &HashMap<String, HashSet<String>>,
) -> bool {
    excluded
        .get(&role.role_id)
        .is_some_and(|ids| ids.contains(&candidate.candidate_id))
}

/// Factors for which no candidate in the batch carries any data
pub fn absent_factors(candidates: &[CandidateInput]) -> Vec<Factor> {
    let mut absent = Vec::new();

    if !candidates.iter().any(|c| !c.facts.locations().is_empty()) {
        absent.push(Factor::Location);
    }
    if !candidates.iter().any(|c| c.facts.salary().is_some()) {
        absent.push(Factor::Salary);
    }
    if !candidates.iter().any(|c| !c.facts.skills().is_empty()) {
        absent.push(Factor::Skills);
    }

    absent
}

/// Drop wholly-absent factors from the scoring budget
pub fn weights_for_batch(weights: FactorWeights, candidates: &[CandidateInput]) -> FactorWeights {
    absent_factors(candidates)
        .into_iter()
        .fold(weights, |weights, factor| weights.without(factor))
}
