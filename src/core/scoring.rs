use crate::core::text::{either_contains, locations_match, share_significant_word};
use crate::models::{CandidateFacts, FactorScore, FactorWeights, RoleFacts, ScoreBreakdown};

/// `round(points * num / den)` with halves rounded up, in integer arithmetic
#[inline]
pub(crate) fn round_ratio(points: u32, num: u64, den: u64) -> u32 {
    if den == 0 {
        return 0;
    }
    let (points, num, den) = (u128::from(points), u128::from(num), u128::from(den));
    let scaled = (2 * points * num + den) / (2 * den);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Half credit, awarded when a factor has no evidence either way
#[inline]
fn neutral(max: u32) -> FactorScore {
    FactorScore::neutral_credit(round_ratio(max, 1, 2), max)
}

/// Calculate all five factor scores for a candidate/role pair
///
/// Factor budgets come from `weights`; a zero budget skips the factor.
///
/// | factor     | full credit                          | partial / neutral            |
/// |------------|--------------------------------------|------------------------------|
/// | title      | either title contains the other      | half on a shared key word    |
/// | location   | substring either way or shared anchor| none                         |
/// | salary     | bands overlap                        | half when a band is missing  |
/// | skills     | all required skills held             | prorated, half when none set |
/// | experience | meets the requirement                | prorated, half when none set |
pub fn calculate_breakdown(
    candidate: &CandidateFacts,
    role: &RoleFacts,
    weights: &FactorWeights,
    anchors: &[String],
) -> ScoreBreakdown {
    ScoreBreakdown {
        title: title_score(candidate, role, weights.title),
        location: location_score(candidate, role, anchors, weights.location),
        salary: salary_score(candidate, role, weights.salary),
        skills: skills_score(candidate, role, weights.skills),
        experience: experience_score(candidate, role, weights.experience),
    }
}

/// Final 0-100 score: rounded percentage of earned over evaluated points
pub fn percentage(breakdown: &ScoreBreakdown) -> u8 {
    let max = breakdown.total_max();
    let earned = round_ratio(100, breakdown.total_earned(), max);
    // earned <= max, so this never exceeds 100
    u8::try_from(earned.min(100)).unwrap_or(100)
}

pub fn title_score(candidate: &CandidateFacts, role: &RoleFacts, max: u32) -> FactorScore {
    let earned = if either_contains(candidate.title(), role.title()) {
        max
    } else if share_significant_word(candidate.title(), role.title()) {
        round_ratio(max, 1, 2)
    } else {
        0
    };
    FactorScore::new(earned, max)
}

pub fn location_score(
    candidate: &CandidateFacts,
    role: &RoleFacts,
    anchors: &[String],
    max: u32,
) -> FactorScore {
    let earned = if locations_match(candidate.locations(), role.location(), anchors) {
        max
    } else {
        0
    };
    FactorScore::new(earned, max)
}

pub fn salary_score(candidate: &CandidateFacts, role: &RoleFacts, max: u32) -> FactorScore {
    match (candidate.salary(), role.salary()) {
        (Some(wanted), Some(offered)) if wanted.overlaps(&offered) => FactorScore::new(max, max),
        (Some(_), Some(_)) => FactorScore::new(0, max),
        _ => neutral(max),
    }
}

pub fn skills_score(candidate: &CandidateFacts, role: &RoleFacts, max: u32) -> FactorScore {
    let required = role.required_skills();
    if required.is_empty() {
        return neutral(max);
    }

    let held = required.intersection(candidate.skills()).count();
    FactorScore::new(round_ratio(max, held as u64, required.len() as u64), max)
}

pub fn experience_score(candidate: &CandidateFacts, role: &RoleFacts, max: u32) -> FactorScore {
    let earned = match role.years_required() {
        None => return neutral(max),
        Some(required) if candidate.years_experience() >= required => max,
        Some(required) => round_ratio(
            max,
            u64::from(candidate.years_experience()),
            u64::from(required),
        ),
    };
    FactorScore::new(earned, max)
}
