use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use validator::Validate;

use crate::models::domain::{AuxiliarySignal, CandidateFacts, CandidateInput, RoleFacts, RoleInput};

/// Loosely-typed candidate record as stored by the marketplace
///
/// Every field is optional; conversion into [`CandidateFacts`] never fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Accepted as `title` or `currentOrDesiredTitle`; a record carrying
    /// both is rejected as a duplicate field.
    #[serde(default, alias = "currentOrDesiredTitle")]
    pub title: Option<String>,
    #[serde(default)]
    pub locations: Option<Vec<String>>,
    #[serde(rename = "minSalary", default)]
    pub min_salary: Option<i64>,
    #[serde(rename = "maxSalary", default)]
    pub max_salary: Option<i64>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(rename = "yearsExperience", default)]
    pub years_experience: Option<i64>,
}

impl From<&CandidateRecord> for CandidateFacts {
    fn from(record: &CandidateRecord) -> Self {
        CandidateFacts::new(record.title.as_deref().unwrap_or_default())
            .with_locations(record.locations.iter().flatten())
            .with_salary(record.min_salary, record.max_salary)
            .with_skills(record.skills.iter().flatten())
            .with_years_experience(record.years_experience.unwrap_or(0))
    }
}

/// Loosely-typed role posting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "salaryMin", default)]
    pub salary_min: Option<i64>,
    #[serde(rename = "salaryMax", default)]
    pub salary_max: Option<i64>,
    #[serde(rename = "requiredSkills", default)]
    pub required_skills: Option<Vec<String>>,
    #[serde(rename = "yearsExperienceRequired", default)]
    pub years_experience_required: Option<i64>,
}

impl From<&RoleRecord> for RoleFacts {
    fn from(record: &RoleRecord) -> Self {
        RoleFacts::new(record.title.as_deref().unwrap_or_default())
            .with_location(record.location.as_deref().unwrap_or_default())
            .with_salary(record.salary_min, record.salary_max)
            .with_required_skills(record.required_skills.iter().flatten())
            .with_years_required(record.years_experience_required)
    }
}

/// Candidate entry carrying its id and optional soft-skill enrichment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidateEntry {
    #[validate(length(min = 1))]
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    #[serde(flatten)]
    pub record: CandidateRecord,
    #[validate(nested)]
    #[serde(default)]
    pub signal: Option<AuxiliarySignal>,
}

impl From<&CandidateEntry> for CandidateInput {
    fn from(entry: &CandidateEntry) -> Self {
        CandidateInput {
            candidate_id: entry.candidate_id.clone(),
            facts: CandidateFacts::from(&entry.record),
            signal: entry.signal.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RoleEntry {
    #[validate(length(min = 1))]
    #[serde(rename = "roleId")]
    pub role_id: String,
    #[serde(flatten)]
    pub record: RoleRecord,
}

impl From<&RoleEntry> for RoleInput {
    fn from(entry: &RoleEntry) -> Self {
        RoleInput {
            role_id: entry.role_id.clone(),
            facts: RoleFacts::from(&entry.record),
        }
    }
}

/// Request to score a single candidate against a single role
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreRequest {
    pub candidate: CandidateRecord,
    pub role: RoleRecord,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub threshold: Option<u8>,
    #[validate(nested)]
    #[serde(default)]
    pub signal: Option<AuxiliarySignal>,
}

/// Employer-facing request: rank candidates for one role
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCandidatesRequest {
    pub role: RoleRecord,
    #[validate(nested)]
    pub candidates: Vec<CandidateEntry>,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub threshold: Option<u8>,
    #[validate(range(min = 1, max = 100))]
    #[serde(rename = "topN", alias = "top_n", default)]
    pub top_n: Option<u16>,
}

/// A `(candidate, role)` pair that already has a persisted match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExcludedPair {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    #[serde(rename = "roleId")]
    pub role_id: String,
}

/// Batch request: score every role against every candidate
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BatchMatchRequest {
    #[validate(nested)]
    pub roles: Vec<RoleEntry>,
    #[validate(nested)]
    pub candidates: Vec<CandidateEntry>,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub threshold: Option<u8>,
    #[serde(rename = "excludePairs", default)]
    pub exclude_pairs: Vec<ExcludedPair>,
}

impl BatchMatchRequest {
    /// Excluded candidate ids keyed by role id
    pub fn excluded_by_role(&self) -> HashMap<String, HashSet<String>> {
        let mut excluded: HashMap<String, HashSet<String>> = HashMap::new();
        for pair in &self.exclude_pairs {
            excluded
                .entry(pair.role_id.clone())
                .or_default()
                .insert(pair.candidate_id.clone());
        }
        excluded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_record_defaults() {
        let record: CandidateRecord = serde_json::from_str("{}").unwrap();
        let facts = CandidateFacts::from(&record);

        assert_eq!(facts.title(), "");
        assert!(facts.locations().is_empty());
        assert!(facts.salary().is_none());
        assert_eq!(facts.years_experience(), 0);
    }

    #[test]
    fn test_candidate_entry_flattens_record() {
        let json = r#"{
            "candidateId": "c1",
            "currentOrDesiredTitle": "Data Analyst",
            "minSalary": -5,
            "skills": ["SQL", "Excel"]
        }"#;
        let entry: CandidateEntry = serde_json::from_str(json).unwrap();
        let input = CandidateInput::from(&entry);

        assert_eq!(input.candidate_id, "c1");
        assert_eq!(input.facts.title(), "Data Analyst");
        assert_eq!(input.facts.salary().and_then(|b| b.min), Some(0));
        assert!(input.facts.skills().contains("sql"));
    }

    #[test]
    fn test_title_alias_is_exclusive() {
        let aliased: CandidateRecord =
            serde_json::from_str(r#"{"currentOrDesiredTitle": "Welder"}"#).unwrap();
        assert_eq!(aliased.title.as_deref(), Some("Welder"));

        let both = r#"{"title": "Welder", "currentOrDesiredTitle": "Fabricator"}"#;
        let err = serde_json::from_str::<CandidateRecord>(both).unwrap_err();
        assert!(err.to_string().contains("duplicate field"));
    }

    #[test]
    fn test_rank_request_validation() {
        let request = RankCandidatesRequest {
            role: RoleRecord::default(),
            candidates: vec![CandidateEntry {
                candidate_id: String::new(),
                record: CandidateRecord::default(),
                signal: None,
            }],
            threshold: Some(60),
            top_n: Some(0),
        };

        let errors = request.validate().unwrap_err();
        let fields = errors.errors();
        assert!(fields.contains_key("top_n"));
        assert!(fields.contains_key("candidates"));
    }

    #[test]
    fn test_excluded_by_role() {
        let request = BatchMatchRequest {
            roles: vec![],
            candidates: vec![],
            threshold: None,
            exclude_pairs: vec![
                ExcludedPair { candidate_id: "c1".into(), role_id: "r1".into() },
                ExcludedPair { candidate_id: "c2".into(), role_id: "r1".into() },
            ],
        };

        let excluded = request.excluded_by_role();
        assert_eq!(excluded["r1"].len(), 2);
        assert!(!excluded.contains_key("r2"));
    }
}
