// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AuxiliarySignal, CandidateFacts, CandidateInput, Factor, FactorScore, FactorWeights,
    MatchCategory, MatchRecord, MatchResult, RankedCandidate, RankedMatches, RoleFacts, RoleInput,
    SalaryBand, ScoreBreakdown, MAX_FACTOR_WEIGHT,
};
pub use requests::{
    BatchMatchRequest, CandidateEntry, CandidateRecord, ExcludedPair, RankCandidatesRequest,
    RoleEntry, RoleRecord, ScoreRequest,
};
pub use responses::{BatchMatchResponse, ErrorResponse, HealthResponse, RankMatchesResponse};
