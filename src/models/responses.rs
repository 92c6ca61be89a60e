use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchRecord, RankedCandidate, RankedMatches};

/// Response for the employer ranking endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankMatchesResponse {
    pub primary: Vec<RankedCandidate>,
    #[serde(rename = "hiddenGem")]
    pub hidden_gem: Vec<RankedCandidate>,
    pub trainable: Vec<RankedCandidate>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

impl From<RankedMatches> for RankMatchesResponse {
    fn from(ranked: RankedMatches) -> Self {
        Self {
            primary: ranked.primary,
            hidden_gem: ranked.hidden_gem,
            trainable: ranked.trainable,
            total_candidates: ranked.total_candidates,
        }
    }
}

/// Response for the batch endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMatchResponse {
    pub matches: Vec<MatchRecord>,
    #[serde(rename = "totalPairs")]
    pub total_pairs: usize,
    #[serde(rename = "skippedPairs")]
    pub skipped_pairs: usize,
    #[serde(rename = "filteredPairs")]
    pub filtered_pairs: usize,
    pub notified: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
