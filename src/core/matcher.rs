use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rayon::prelude::*;
use uuid::Uuid;

use crate::core::filters::{is_already_matched, matches_catchment, weights_for_batch};
use crate::core::scorer::{MatchScorer, BATCH_THRESHOLD, EMPLOYER_THRESHOLD};
use crate::models::{
    CandidateInput, MatchCategory, MatchRecord, RankedCandidate, RankedMatches, RoleFacts, RoleInput,
};

/// Tunables for the two orchestration entry points
#[derive(Debug, Clone)]
pub struct MatcherOptions {
    pub employer_threshold: u8,
    pub batch_threshold: u8,
    pub default_top_n: usize,
    pub max_top_n: usize,
    /// Only score pairs whose locations match
    pub require_catchment: bool,
    /// Disable factors no candidate in a batch has data for
    pub drop_absent_factors: bool,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            employer_threshold: EMPLOYER_THRESHOLD,
            batch_threshold: BATCH_THRESHOLD,
            default_top_n: 10,
            max_top_n: 100,
            require_catchment: false,
            drop_absent_factors: false,
        }
    }
}

/// Per-run batch parameters
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub threshold: Option<u8>,
    /// Candidate ids with an existing match, keyed by role id
    pub excluded: HashMap<String, HashSet<String>>,
}

/// Result of a batch run
#[derive(Debug)]
pub struct BatchOutcome {
    pub records: Vec<MatchRecord>,
    pub total_pairs: usize,
    pub skipped_pairs: usize,
    pub filtered_pairs: usize,
}

/// Matching orchestrator over [`MatchScorer`]
///
/// # Entry points
/// 1. `rank_for_role` - one role against many candidates, grouped by category
/// 2. `match_batch` - every role against every candidate, as persistable records
#[derive(Debug, Clone)]
pub struct Matcher {
    scorer: MatchScorer,
    options: MatcherOptions,
}

impl Matcher {
    pub fn new(scorer: MatchScorer, options: MatcherOptions) -> Self {
        Self { scorer, options }
    }

    pub fn with_defaults() -> Self {
        Self::new(MatchScorer::default(), MatcherOptions::default())
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }

    pub fn options(&self) -> &MatcherOptions {
        &self.options
    }

    /// Rank candidates for one role
    ///
    /// # Arguments
    /// * `role` - The employer's role requirements
    /// * `candidates` - Candidates to consider, with optional soft-skill signals
    /// * `threshold` - Overrides the employer threshold
    /// * `top_n` - Maximum results per category, capped at `max_top_n`
    ///
    /// # Returns
    /// Matches grouped by category, each group sorted by score descending
    pub fn rank_for_role(
        &self,
        role: &RoleFacts,
        candidates: &[CandidateInput],
        threshold: Option<u8>,
        top_n: Option<usize>,
    ) -> RankedMatches {
        let scorer = self
            .scorer
            .clone()
            .with_threshold(threshold.unwrap_or(self.options.employer_threshold));
        let limit = top_n
            .unwrap_or(self.options.default_top_n)
            .min(self.options.max_top_n);

        let scored: Vec<RankedCandidate> = candidates
            .par_iter()
            .filter_map(|candidate| {
                let result = scorer.score_with_signal(&candidate.facts, role, candidate.signal.as_ref());
                result.category.is_match().then(|| RankedCandidate {
                    candidate_id: candidate.candidate_id.clone(),
                    score: result.score,
                    category: result.category,
                    explanation: result.explanation,
                })
            })
            .collect();

        let mut ranked = RankedMatches {
            total_candidates: candidates.len(),
            ..RankedMatches::default()
        };
        for entry in scored {
            match entry.category {
                MatchCategory::Primary => ranked.primary.push(entry),
                MatchCategory::HiddenGem => ranked.hidden_gem.push(entry),
                MatchCategory::Trainable => ranked.trainable.push(entry),
                MatchCategory::None => {}
            }
        }

        for group in [&mut ranked.primary, &mut ranked.hidden_gem, &mut ranked.trainable] {
            group.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| a.candidate_id.cmp(&b.candidate_id))
            });
            group.truncate(limit);
        }

        ranked
    }

    /// Score every role against every candidate
    ///
    /// Pairs already matched are skipped, and with `require_catchment` pairs
    /// outside the role's location are filtered before scoring. Pairs are
    /// scored in parallel; records come back ordered by role, then score
    /// descending, then candidate.
    pub fn match_batch(
        &self,
        roles: &[RoleInput],
        candidates: &[CandidateInput],
        batch: &BatchOptions,
    ) -> BatchOutcome {
        let mut scorer = self
            .scorer
            .clone()
            .with_threshold(batch.threshold.unwrap_or(self.options.batch_threshold));
        if self.options.drop_absent_factors {
            let weights = weights_for_batch(*scorer.weights(), candidates);
            scorer = scorer.with_weights(weights);
        }

        let total_pairs = roles.len() * candidates.len();
        let mut skipped_pairs = 0;
        let mut filtered_pairs = 0;
        let mut pairs = Vec::with_capacity(total_pairs);

        for role in roles {
            for candidate in candidates {
                if is_already_matched(candidate, role, &batch.excluded) {
                    skipped_pairs += 1;
                } else if self.options.require_catchment
                    && !matches_catchment(candidate, role, scorer.anchors())
                {
                    filtered_pairs += 1;
                } else {
                    pairs.push((role, candidate));
                }
            }
        }

        let created_at = Utc::now();
        let mut records: Vec<MatchRecord> = pairs
            .par_iter()
            .filter_map(|(role, candidate)| {
                let result =
                    scorer.score_with_signal(&candidate.facts, &role.facts, candidate.signal.as_ref());
                result.category.is_match().then(|| MatchRecord {
                    match_id: Uuid::new_v4(),
                    candidate_id: candidate.candidate_id.clone(),
                    role_id: role.role_id.clone(),
                    score: result.score,
                    category: result.category,
                    explanation: result.explanation,
                    created_at,
                })
            })
            .collect();

        records.sort_by(|a, b| {
            a.role_id
                .cmp(&b.role_id)
                .then_with(|| b.score.cmp(&a.score))
                .then_with(|| a.candidate_id.cmp(&b.candidate_id))
        });

        tracing::debug!(
            total_pairs,
            skipped_pairs,
            filtered_pairs,
            matched = records.len(),
            "Batch scoring complete"
        );

        BatchOutcome {
            records,
            total_pairs,
            skipped_pairs,
            filtered_pairs,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuxiliarySignal, CandidateFacts};

    fn create_candidate(id: &str, title: &str, years: i64) -> CandidateInput {
        CandidateInput {
            candidate_id: id.to_string(),
            facts: CandidateFacts::new(title)
                .with_locations(["Leeds"])
                .with_skills(["Excel", "SQL"])
                .with_years_experience(years),
            signal: None,
        }
    }

    fn create_role() -> RoleFacts {
        RoleFacts::new("Data Analyst")
            .with_location("Leeds")
            .with_required_skills(["Excel", "SQL"])
            .with_years_required(Some(4))
    }

    #[test]
    fn test_rank_groups_and_sorts() {
        let matcher = Matcher::with_defaults();
        let candidates = vec![
            create_candidate("b", "Data Analyst", 4),
            create_candidate("a", "Data Analyst", 4),
            create_candidate("c", "Data Analyst", 1),
            create_candidate("d", "Chef", 0),
        ];

        let ranked = matcher.rank_for_role(&create_role(), &candidates, None, None);

        assert_eq!(ranked.total_candidates, 4);
        let primary: Vec<_> = ranked.primary.iter().map(|c| c.candidate_id.as_str()).collect();
        assert_eq!(primary, vec!["a", "b"]);
        assert_eq!(ranked.trainable.len(), 1);
        assert_eq!(ranked.trainable[0].candidate_id, "c");
        assert!(ranked.hidden_gem.is_empty());
    }

    #[test]
    fn test_rank_respects_top_n_cap() {
        let options = MatcherOptions {
            max_top_n: 2,
            ..MatcherOptions::default()
        };
        let matcher = Matcher::new(MatchScorer::default(), options);
        let candidates: Vec<_> = (0..5)
            .map(|i| create_candidate(&i.to_string(), "Data Analyst", 5))
            .collect();

        let ranked = matcher.rank_for_role(&create_role(), &candidates, None, Some(50));
        assert_eq!(ranked.primary.len(), 2);
    }

    #[test]
    fn test_rank_hidden_gem_from_signal() {
        let matcher = Matcher::with_defaults();
        let mut candidate = CandidateInput {
            candidate_id: "gem".to_string(),
            facts: CandidateFacts::new("Barista")
                .with_locations(["Leeds"])
                .with_salary(Some(20_000), Some(30_000))
                .with_skills(["Excel"])
                .with_years_experience(6),
            signal: None,
        };
        let role = create_role().with_salary(Some(25_000), Some(28_000));

        // location 20 + salary 20 + skills 10 + experience 10 = 60
        let ranked = matcher.rank_for_role(&role, std::slice::from_ref(&candidate), None, None);
        assert_eq!(ranked.primary.len(), 1);

        candidate.signal = Some(AuxiliarySignal {
            matched_traits: vec!["attention to detail".to_string()],
            strength: 75,
        });
        let ranked = matcher.rank_for_role(&role, std::slice::from_ref(&candidate), None, None);
        assert_eq!(ranked.hidden_gem.len(), 1);
        assert!(ranked.primary.is_empty());
    }

    #[test]
    fn test_batch_skips_excluded_pairs() {
        let matcher = Matcher::with_defaults();
        let roles = vec![RoleInput {
            role_id: "r1".to_string(),
            facts: create_role(),
        }];
        let candidates = vec![
            create_candidate("c1", "Data Analyst", 5),
            create_candidate("c2", "Data Analyst", 5),
        ];

        let mut batch = BatchOptions::default();
        batch
            .excluded
            .insert("r1".to_string(), HashSet::from(["c1".to_string()]));

        let outcome = matcher.match_batch(&roles, &candidates, &batch);

        assert_eq!(outcome.total_pairs, 2);
        assert_eq!(outcome.skipped_pairs, 1);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].candidate_id, "c2");
    }

    #[test]
    fn test_batch_catchment_filter() {
        let options = MatcherOptions {
            require_catchment: true,
            ..MatcherOptions::default()
        };
        let matcher = Matcher::new(MatchScorer::default(), options);
        let roles = vec![RoleInput {
            role_id: "r1".to_string(),
            facts: create_role(),
        }];
        let mut remote = create_candidate("c2", "Data Analyst", 5);
        remote.facts = remote.facts.with_locations(["Bristol"]);
        let candidates = vec![create_candidate("c1", "Data Analyst", 5), remote];

        let outcome = matcher.match_batch(&roles, &candidates, &BatchOptions::default());

        assert_eq!(outcome.filtered_pairs, 1);
        assert_eq!(outcome.records.len(), 1);
    }
}
