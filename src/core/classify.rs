use crate::models::{AuxiliarySignal, MatchCategory, ScoreBreakdown};

/// Decides the category of a match that already cleared the threshold
///
/// Implemented for closures, so callers with their own hidden-gem rule can
/// pass `|breakdown, signal| ...` straight to the scorer.
pub trait ClassificationPolicy: Send + Sync {
    fn classify(&self, breakdown: &ScoreBreakdown, signal: Option<&AuxiliarySignal>) -> MatchCategory;
}

impl<F> ClassificationPolicy for F
where
    F: Fn(&ScoreBreakdown, Option<&AuxiliarySignal>) -> MatchCategory + Send + Sync,
{
    fn classify(&self, breakdown: &ScoreBreakdown, signal: Option<&AuxiliarySignal>) -> MatchCategory {
        self(breakdown, signal)
    }
}

/// Hidden gem when a strong auxiliary signal carries a weak resume,
/// otherwise primary vs trainable on the experience factor: a candidate who
/// earned half the experience points or fewer against a stated requirement
/// is trainable. Neutral credit for a role with no requirement is not a
/// shortfall.
#[derive(Debug, Clone, Copy)]
pub struct DefaultPolicy {
    pub hidden_gem_min_strength: u8,
}

impl Default for DefaultPolicy {
    fn default() -> Self {
        Self {
            hidden_gem_min_strength: 50,
        }
    }
}

impl DefaultPolicy {
    fn short_on_experience(breakdown: &ScoreBreakdown) -> bool {
        let experience = breakdown.experience;
        experience.is_evaluated()
            && !experience.neutral
            && u64::from(experience.earned) * 2 <= u64::from(experience.max)
    }

    fn resume_is_weak(breakdown: &ScoreBreakdown) -> bool {
        let earned = u64::from(breakdown.title.earned) + u64::from(breakdown.skills.earned);
        let max = u64::from(breakdown.title.max) + u64::from(breakdown.skills.max);
        max > 0 && earned * 2 < max
    }
}

impl ClassificationPolicy for DefaultPolicy {
    fn classify(&self, breakdown: &ScoreBreakdown, signal: Option<&AuxiliarySignal>) -> MatchCategory {
        let strong_signal = signal.is_some_and(|s| s.strength.min(100) >= self.hidden_gem_min_strength);
        if strong_signal && Self::resume_is_weak(breakdown) {
            return MatchCategory::HiddenGem;
        }

        if Self::short_on_experience(breakdown) {
            MatchCategory::Trainable
        } else {
            MatchCategory::Primary
        }
    }
}
