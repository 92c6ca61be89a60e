// Integration tests for Jobz Match orchestration

use jobz_match::core::{BatchOptions, MatchScorer, Matcher, MatcherOptions};
use jobz_match::models::{CandidateFacts, CandidateInput, MatchCategory, RoleFacts, RoleInput};
use jobz_match::services::{deliver, MemorySink};
use std::collections::HashSet;

fn create_candidate(id: &str, title: &str, location: &str, skills: &[&str], years: i64) -> CandidateInput {
    CandidateInput {
        candidate_id: id.to_string(),
        facts: CandidateFacts::new(title)
            .with_locations([location])
            .with_skills(skills)
            .with_years_experience(years),
        signal: None,
    }
}

fn create_role(id: &str, title: &str, location: &str, skills: &[&str], years: i64) -> RoleInput {
    RoleInput {
        role_id: id.to_string(),
        facts: RoleFacts::new(title)
            .with_location(location)
            .with_required_skills(skills)
            .with_years_required(Some(years)),
    }
}

fn create_pool() -> Vec<CandidateInput> {
    vec![
        create_candidate("c1", "Frontend Developer", "Birmingham", &["React", "CSS"], 5),
        create_candidate("c2", "Junior Frontend Developer", "Birmingham", &["React"], 1),
        create_candidate("c3", "Backend Developer", "Leeds", &["Rust", "SQL"], 8),
        create_candidate("c4", "Care Assistant", "Coventry", &[], 2),
        create_candidate("c5", "Data Analyst", "Leeds", &["SQL", "Excel"], 3),
    ]
}

#[test]
fn test_integration_employer_ranking() {
    let matcher = Matcher::with_defaults();
    let role = create_role("r1", "Frontend Developer", "Birmingham", &["React", "CSS"], 3).facts;

    let ranked = matcher.rank_for_role(&role, &create_pool(), None, None);

    assert_eq!(ranked.total_candidates, 5);
    assert_eq!(ranked.primary.len(), 1);
    assert_eq!(ranked.primary[0].candidate_id, "c1");
    // No salary on either side: 90 of 100
    assert_eq!(ranked.primary[0].score, 90);
    assert_eq!(ranked.trainable.len(), 1);
    assert_eq!(ranked.trainable[0].candidate_id, "c2");

    for group in [&ranked.primary, &ranked.hidden_gem, &ranked.trainable] {
        assert!(group.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(group.iter().all(|c| c.score >= 60));
    }
}

#[test]
fn test_integration_batch_publishes_above_threshold_only() {
    let matcher = Matcher::with_defaults();
    let roles = vec![
        create_role("r1", "Frontend Developer", "Birmingham", &["React", "CSS"], 3),
        create_role("r2", "Data Analyst", "Leeds", &["SQL", "Excel"], 2),
    ];

    let outcome = matcher.match_batch(&roles, &create_pool(), &BatchOptions::default());

    assert_eq!(outcome.total_pairs, 10);
    assert!(outcome.records.iter().all(|r| r.score >= 70));
    assert!(outcome.records.iter().all(|r| r.category != MatchCategory::None));

    let pairs: Vec<(&str, &str)> = outcome
        .records
        .iter()
        .map(|r| (r.role_id.as_str(), r.candidate_id.as_str()))
        .collect();
    assert!(pairs.contains(&("r1", "c1")));
    assert!(pairs.contains(&("r2", "c5")));
    assert!(!pairs.contains(&("r1", "c4")));

    // Ordered by role, then score descending
    assert!(outcome.records.windows(2).all(|w| {
        w[0].role_id < w[1].role_id || (w[0].role_id == w[1].role_id && w[0].score >= w[1].score)
    }));
}

#[test]
fn test_integration_batch_is_repeatable() {
    let matcher = Matcher::with_defaults();
    let roles = vec![create_role("r1", "Frontend Developer", "Birmingham", &["React"], 2)];
    let pool = create_pool();

    let first = matcher.match_batch(&roles, &pool, &BatchOptions::default());
    let second = matcher.match_batch(&roles, &pool, &BatchOptions::default());

    let summarize = |records: &[jobz_match::models::MatchRecord]| -> Vec<(String, u8, MatchCategory)> {
        records
            .iter()
            .map(|r| (r.candidate_id.clone(), r.score, r.category))
            .collect()
    };
    assert_eq!(summarize(first.records.as_slice()), summarize(second.records.as_slice()));
}

#[test]
fn test_integration_drop_absent_factors() {
    let options = MatcherOptions {
        drop_absent_factors: true,
        ..MatcherOptions::default()
    };
    let matcher = Matcher::new(MatchScorer::default(), options);
    let roles = vec![create_role("r1", "Data Analyst", "Leeds", &["SQL", "Excel"], 3)];
    // Nobody in this pool has salary data
    let pool = vec![create_candidate("c5", "Data Analyst", "Leeds", &["SQL", "Excel"], 3)];

    let outcome = matcher.match_batch(&roles, &pool, &BatchOptions::default());

    assert_eq!(outcome.records.len(), 1);
    // 80 of 80 once salary is out of the denominator
    assert_eq!(outcome.records[0].score, 100);
}

#[test]
fn test_integration_batch_to_sink() {
    let matcher = Matcher::with_defaults();
    let roles = vec![create_role("r1", "Frontend Developer", "Birmingham", &["React", "CSS"], 3)];
    let mut batch = BatchOptions::default();
    batch
        .excluded
        .insert("r1".to_string(), HashSet::from(["c1".to_string()]));

    let outcome = matcher.match_batch(&roles, &create_pool(), &batch);
    let sink = MemorySink::new();
    let notified = deliver(&sink, &outcome.records).unwrap();

    assert_eq!(outcome.skipped_pairs, 1);
    assert!(sink.persisted().iter().all(|r| r.candidate_id != "c1"));
    assert_eq!(notified, outcome.records.len());
}
