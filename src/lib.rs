//! Jobz Match - candidate to role match scoring for the Jobz recruitment marketplace
//!
//! This library provides the match-scoring engine shared by the batch job
//! matcher and the employer-facing matcher, plus the thin HTTP shell around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, MatchScorer, ClassificationPolicy, DefaultPolicy};
pub use models::{CandidateFacts, RoleFacts, MatchResult, MatchCategory, FactorWeights};
