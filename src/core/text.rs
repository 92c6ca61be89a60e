//! Case-insensitive text comparisons used by the title and location factors.

use std::collections::BTreeSet;

/// Words too common in job titles to count as shared evidence
const STOPWORDS: &[&str] = &[
    "with", "from", "into", "over", "that", "this", "your", "their", "role", "team", "position",
    "level", "based",
];

#[inline]
pub fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Words longer than three characters, minus stopwords
pub fn significant_words(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() > 3)
        .map(str::to_lowercase)
        .filter(|word| !STOPWORDS.contains(&word.as_str()))
        .collect()
}

/// Either string contains the other. Empty strings never match.
pub fn either_contains(a: &str, b: &str) -> bool {
    let (a, b) = (fold(a), fold(b));
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

pub fn share_significant_word(a: &str, b: &str) -> bool {
    let left = significant_words(a);
    if left.is_empty() {
        return false;
    }
    significant_words(b).iter().any(|word| left.contains(word))
}

/// Location rule shared by the scorer and the batch catchment filter
///
/// Any candidate location contained in the role location (or the reverse)
/// matches, as does a place anchor present in both.
pub fn locations_match(candidate_locations: &[String], role_location: &str, anchors: &[String]) -> bool {
    let role_location = fold(role_location);
    if role_location.is_empty() {
        return false;
    }

    candidate_locations.iter().any(|location| {
        let location = fold(location);
        if location.is_empty() {
            return false;
        }
        if role_location.contains(&location) || location.contains(&role_location) {
            return true;
        }
        anchors
            .iter()
            .any(|anchor| role_location.contains(anchor.as_str()) && location.contains(anchor.as_str()))
    })
}
