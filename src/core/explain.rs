use crate::models::{Factor, ScoreBreakdown};

pub const FALLBACK_EXPLANATION: &str = "This role could be a good fit based on your profile.";

fn clause(factor: Factor) -> &'static str {
    match factor {
        Factor::Title => "matches your job title",
        Factor::Location => "is in one of your preferred locations",
        Factor::Salary => "fits your salary expectations",
        Factor::Skills => "calls for skills you already have",
        Factor::Experience => "suits your level of experience",
    }
}

/// One clause per factor that earned at least 75% of its budget, in factor order
pub fn explain(breakdown: &ScoreBreakdown) -> String {
    let clauses: Vec<&str> = breakdown
        .iter()
        .filter(|(_, score)| score.reaches(3, 4))
        .map(|(factor, _)| clause(factor))
        .collect();

    match clauses.split_last() {
        None => FALLBACK_EXPLANATION.to_string(),
        Some((only, [])) => format!("This role {}.", only),
        Some((last, rest)) => format!("This role {} and {}.", rest.join(", "), last),
    }
}
