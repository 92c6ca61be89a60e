// Core algorithm exports
pub mod classify;
pub mod explain;
pub mod filters;
pub mod matcher;
pub mod scorer;
pub mod scoring;
pub mod text;

pub use classify::{ClassificationPolicy, DefaultPolicy};
pub use explain::{explain, FALLBACK_EXPLANATION};
pub use filters::{absent_factors, is_already_matched, matches_catchment, weights_for_batch};
pub use matcher::{BatchOptions, BatchOutcome, Matcher, MatcherOptions};
pub use scorer::{MatchScorer, BATCH_THRESHOLD, EMPLOYER_THRESHOLD};
pub use scoring::{calculate_breakdown, percentage};
