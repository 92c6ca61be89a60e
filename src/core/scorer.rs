use std::fmt;
use std::sync::Arc;

use crate::core::classify::{ClassificationPolicy, DefaultPolicy};
use crate::core::explain::explain;
use crate::core::scoring::{calculate_breakdown, percentage};
use crate::core::text::fold;
use crate::models::{AuxiliarySignal, CandidateFacts, FactorWeights, MatchCategory, MatchResult, RoleFacts};

/// Minimum score the batch matcher publishes
pub const BATCH_THRESHOLD: u8 = 70;

/// Minimum score shown to employers
pub const EMPLOYER_THRESHOLD: u8 = 60;

/// Candidate/role compatibility scorer
///
/// Pure and deterministic: scoring the same pair twice yields the same
/// [`MatchResult`]. Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct MatchScorer {
    weights: FactorWeights,
    anchors: Vec<String>,
    threshold: u8,
    policy: Arc<dyn ClassificationPolicy>,
}

impl MatchScorer {
    pub fn new(threshold: u8) -> Self {
        Self {
            weights: FactorWeights::default(),
            anchors: Vec::new(),
            threshold: threshold.min(100),
            policy: Arc::new(DefaultPolicy::default()),
        }
    }

    /// Factor budgets, each capped at [`MAX_FACTOR_WEIGHT`](crate::models::MAX_FACTOR_WEIGHT)
    pub fn with_weights(mut self, weights: FactorWeights) -> Self {
        self.weights = weights.capped();
        self
    }

    /// Place names (e.g. the home city) treated as shared location evidence
    pub fn with_anchors<I, S>(mut self, anchors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.anchors = anchors
            .into_iter()
            .map(|anchor| fold(anchor.as_ref()))
            .filter(|anchor| !anchor.is_empty())
            .collect();
        self
    }

    pub fn with_policy<P>(mut self, policy: P) -> Self
    where
        P: ClassificationPolicy + 'static,
    {
        self.policy = Arc::new(policy);
        self
    }

    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold.min(100);
        self
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn weights(&self) -> &FactorWeights {
        &self.weights
    }

    pub fn anchors(&self) -> &[String] {
        &self.anchors
    }

    pub fn score(&self, candidate: &CandidateFacts, role: &RoleFacts) -> MatchResult {
        self.score_with_signal(candidate, role, None)
    }

    /// Score a pair, handing any auxiliary signal to the classification policy
    pub fn score_with_signal(
        &self,
        candidate: &CandidateFacts,
        role: &RoleFacts,
        signal: Option<&AuxiliarySignal>,
    ) -> MatchResult {
        let breakdown = calculate_breakdown(candidate, role, &self.weights, &self.anchors);
        let score = percentage(&breakdown);

        let category = if score < self.threshold {
            MatchCategory::None
        } else {
            self.policy.classify(&breakdown, signal)
        };

        MatchResult {
            score,
            category,
            explanation: explain(&breakdown),
            breakdown,
        }
    }
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self::new(BATCH_THRESHOLD)
    }
}

impl fmt::Debug for MatchScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchScorer")
            .field("weights", &self.weights)
            .field("anchors", &self.anchors)
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}
