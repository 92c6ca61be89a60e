use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Clamp a signed integer from the wire into the scorer's unsigned domain
#[inline]
pub(crate) fn clamp_non_negative(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|tag| tag.as_ref().trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Inclusive pay band. A missing bound is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl SalaryBand {
    /// Build a band from raw bounds, clamping negatives and reordering
    /// inverted bounds. Returns `None` when neither bound is known.
    pub fn new(min: Option<i64>, max: Option<i64>) -> Option<Self> {
        let min = min.map(clamp_non_negative);
        let max = max.map(clamp_non_negative);

        match (min, max) {
            (None, None) => None,
            (Some(lo), Some(hi)) if lo > hi => Some(Self { min: Some(hi), max: Some(lo) }),
            _ => Some(Self { min, max }),
        }
    }

    #[inline]
    pub fn lower(&self) -> u32 {
        self.min.unwrap_or(0)
    }

    #[inline]
    pub fn upper(&self) -> u32 {
        self.max.unwrap_or(u32::MAX)
    }

    /// `other.max >= self.min && other.min <= self.max`
    #[inline]
    pub fn overlaps(&self, other: &SalaryBand) -> bool {
        other.upper() >= self.lower() && other.lower() <= self.upper()
    }
}

/// The candidate fields the scorer reads
///
/// Built through the `with_*` constructors, which normalize their input:
/// strings are trimmed, skill tags lower-cased and deduplicated, and
/// negative numbers clamped to zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CandidateFacts {
    title: String,
    locations: Vec<String>,
    salary: Option<SalaryBand>,
    skills: BTreeSet<String>,
    years_experience: u32,
}

impl CandidateFacts {
    pub fn new(title: impl AsRef<str>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            ..Self::default()
        }
    }

    pub fn with_locations<I, S>(mut self, locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.locations = locations
            .into_iter()
            .map(|location| location.as_ref().trim().to_string())
            .filter(|location| !location.is_empty())
            .collect();
        self
    }

    pub fn with_salary(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.salary = SalaryBand::new(min, max);
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills = normalize_tags(skills);
        self
    }

    pub fn with_years_experience(mut self, years: i64) -> Self {
        self.years_experience = clamp_non_negative(years);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn salary(&self) -> Option<SalaryBand> {
        self.salary
    }

    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    pub fn years_experience(&self) -> u32 {
        self.years_experience
    }
}

/// The role fields the scorer reads
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoleFacts {
    title: String,
    location: String,
    salary: Option<SalaryBand>,
    required_skills: BTreeSet<String>,
    years_required: Option<u32>,
}

impl RoleFacts {
    pub fn new(title: impl AsRef<str>) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl AsRef<str>) -> Self {
        self.location = location.as_ref().trim().to_string();
        self
    }

    pub fn with_salary(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.salary = SalaryBand::new(min, max);
        self
    }

    pub fn with_required_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.required_skills = normalize_tags(skills);
        self
    }

    pub fn with_years_required(mut self, years: Option<i64>) -> Self {
        self.years_required = years.map(clamp_non_negative);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn salary(&self) -> Option<SalaryBand> {
        self.salary
    }

    pub fn required_skills(&self) -> &BTreeSet<String> {
        &self.required_skills
    }

    pub fn years_required(&self) -> Option<u32> {
        self.years_required
    }
}

/// A candidate with the identity the orchestration layer needs
#[derive(Debug, Clone)]
pub struct CandidateInput {
    pub candidate_id: String,
    pub facts: CandidateFacts,
    pub signal: Option<AuxiliarySignal>,
}

/// A role with its posting identity
#[derive(Debug, Clone)]
pub struct RoleInput {
    pub role_id: String,
    pub facts: RoleFacts,
}

/// Non-resume evidence (soft skills, interests, hobbies) supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, validator::Validate)]
pub struct AuxiliarySignal {
    #[serde(rename = "matchedTraits", default)]
    pub matched_traits: Vec<String>,
    /// 0-100
    #[validate(range(max = 100))]
    pub strength: u8,
}

/// The five scored factors, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Title,
    Location,
    Salary,
    Skills,
    Experience,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::Title,
        Factor::Location,
        Factor::Salary,
        Factor::Skills,
        Factor::Experience,
    ];
}

/// Points earned by one factor out of its budget
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorScore {
    pub earned: u32,
    pub max: u32,
    /// Credit awarded for missing data rather than evidence
    #[serde(default)]
    pub neutral: bool,
}

impl FactorScore {
    pub fn new(earned: u32, max: u32) -> Self {
        Self { earned: earned.min(max), max, neutral: false }
    }

    pub fn neutral_credit(earned: u32, max: u32) -> Self {
        Self { neutral: true, ..Self::new(earned, max) }
    }

    /// A factor with a zero budget was not evaluated
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.max > 0
    }

    /// `earned / max >= num / den`, without floating point
    #[inline]
    pub fn reaches(&self, num: u32, den: u32) -> bool {
        self.is_evaluated() && u64::from(self.earned) * u64::from(den) >= u64::from(self.max) * u64::from(num)
    }
}

/// Per-factor scores a match was computed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub title: FactorScore,
    pub location: FactorScore,
    pub salary: FactorScore,
    pub skills: FactorScore,
    pub experience: FactorScore,
}

impl ScoreBreakdown {
    pub fn get(&self, factor: Factor) -> FactorScore {
        match factor {
            Factor::Title => self.title,
            Factor::Location => self.location,
            Factor::Salary => self.salary,
            Factor::Skills => self.skills,
            Factor::Experience => self.experience,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, FactorScore)> + '_ {
        Factor::ALL.into_iter().map(move |factor| (factor, self.get(factor)))
    }

    pub fn total_earned(&self) -> u64 {
        self.iter().map(|(_, s)| u64::from(s.earned)).sum()
    }

    pub fn total_max(&self) -> u64 {
        self.iter().map(|(_, s)| u64::from(s.max)).sum()
    }
}

/// Category bucket a match is displayed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchCategory {
    Primary,
    HiddenGem,
    Trainable,
    /// Below threshold; never persisted or displayed
    None,
}

impl MatchCategory {
    #[inline]
    pub fn is_match(&self) -> bool {
        !matches!(self, MatchCategory::None)
    }
}

/// Output of scoring one candidate against one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u8,
    pub category: MatchCategory,
    pub explanation: String,
    pub breakdown: ScoreBreakdown,
}

/// Largest budget a single factor may carry
pub const MAX_FACTOR_WEIGHT: u32 = 1_000;

/// Maximum points per factor
///
/// A zero budget drops the factor from both numerator and denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorWeights {
    pub title: u32,
    pub location: u32,
    pub salary: u32,
    pub skills: u32,
    pub experience: u32,
}

impl FactorWeights {
    pub fn max_for(&self, factor: Factor) -> u32 {
        match factor {
            Factor::Title => self.title,
            Factor::Location => self.location,
            Factor::Salary => self.salary,
            Factor::Skills => self.skills,
            Factor::Experience => self.experience,
        }
    }

    pub fn without(mut self, factor: Factor) -> Self {
        match factor {
            Factor::Title => self.title = 0,
            Factor::Location => self.location = 0,
            Factor::Salary => self.salary = 0,
            Factor::Skills => self.skills = 0,
            Factor::Experience => self.experience = 0,
        }
        self
    }

    pub fn total(&self) -> u64 {
        Factor::ALL.iter().map(|f| u64::from(self.max_for(*f))).sum()
    }

    /// Clamp every budget to [`MAX_FACTOR_WEIGHT`]
    pub fn capped(self) -> Self {
        Self {
            title: self.title.min(MAX_FACTOR_WEIGHT),
            location: self.location.min(MAX_FACTOR_WEIGHT),
            salary: self.salary.min(MAX_FACTOR_WEIGHT),
            skills: self.skills.min(MAX_FACTOR_WEIGHT),
            experience: self.experience.min(MAX_FACTOR_WEIGHT),
        }
    }
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            title: 30,
            location: 20,
            salary: 20,
            skills: 20,
            experience: 10,
        }
    }
}

/// Persistable row produced by the batch matcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "matchId")]
    pub match_id: uuid::Uuid,
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    #[serde(rename = "roleId")]
    pub role_id: String,
    pub score: u8,
    pub category: MatchCategory,
    pub explanation: String,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One ranked candidate in the employer-facing view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    pub score: u8,
    pub category: MatchCategory,
    pub explanation: String,
}

/// Employer-facing results grouped by category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedMatches {
    pub primary: Vec<RankedCandidate>,
    #[serde(rename = "hiddenGem")]
    pub hidden_gem: Vec<RankedCandidate>,
    pub trainable: Vec<RankedCandidate>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

impl RankedMatches {
    pub fn len(&self) -> usize {
        self.primary.len() + self.hidden_gem.len() + self.trainable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
