// Criterion benchmarks for Jobz Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use jobz_match::core::{BatchOptions, MatchScorer, Matcher};
use jobz_match::models::{CandidateFacts, CandidateInput, RoleFacts, RoleInput};

const TITLES: [&str; 4] = ["Frontend Developer", "Data Analyst", "Care Assistant", "Backend Engineer"];
const CITIES: [&str; 3] = ["Birmingham", "Leeds", "Manchester"];
const SKILLS: [&str; 6] = ["React", "CSS", "SQL", "Excel", "Rust", "Communication"];

fn create_candidate(id: usize) -> CandidateInput {
    let min_salary = 25_000 + (id % 20) as i64 * 1_000;
    CandidateInput {
        candidate_id: id.to_string(),
        facts: CandidateFacts::new(TITLES[id % TITLES.len()])
            .with_locations([CITIES[id % CITIES.len()]])
            .with_salary(Some(min_salary), Some(min_salary + 10_000))
            .with_skills(SKILLS.iter().skip(id % 3).take(3))
            .with_years_experience((id % 10) as i64),
        signal: None,
    }
}

fn create_role(id: usize) -> RoleInput {
    RoleInput {
        role_id: format!("role-{}", id),
        facts: RoleFacts::new(TITLES[id % TITLES.len()])
            .with_location(format!("{}, UK", CITIES[id % CITIES.len()]))
            .with_salary(Some(30_000), Some(45_000))
            .with_required_skills(SKILLS.iter().skip(id % 4).take(2))
            .with_years_required(Some(3)),
    }
}

fn bench_score_pair(c: &mut Criterion) {
    let scorer = MatchScorer::default().with_anchors(["Birmingham"]);
    let candidate = create_candidate(0);
    let role = create_role(0);

    c.bench_function("score_pair", |b| {
        b.iter(|| scorer.score(black_box(&candidate.facts), black_box(&role.facts)));
    });
}

fn bench_rank_for_role(c: &mut Criterion) {
    let matcher = Matcher::with_defaults();
    let role = create_role(1);

    let mut group = c.benchmark_group("rank_for_role");

    for candidate_count in [10, 100, 1000, 10_000].iter() {
        let candidates: Vec<CandidateInput> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("candidates", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| matcher.rank_for_role(black_box(&role.facts), black_box(&candidates), None, Some(20)));
            },
        );
    }

    group.finish();
}

fn bench_match_batch(c: &mut Criterion) {
    let matcher = Matcher::with_defaults();
    let roles: Vec<RoleInput> = (0..50).map(create_role).collect();
    let candidates: Vec<CandidateInput> = (0..1000).map(create_candidate).collect();
    let options = BatchOptions::default();

    c.bench_function("match_batch_50x1000", |b| {
        b.iter(|| matcher.match_batch(black_box(&roles), black_box(&candidates), &options));
    });
}

criterion_group!(benches, bench_score_pair, bench_rank_for_role, bench_match_batch);

criterion_main!(benches);
