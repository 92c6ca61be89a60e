use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{BatchOptions, Matcher};
use crate::models::{
    BatchMatchRequest, BatchMatchResponse, CandidateFacts, CandidateInput, ErrorResponse,
    HealthResponse, RankCandidatesRequest, RankMatchesResponse, RoleFacts, RoleInput, ScoreRequest,
};
use crate::services::{deliver, MatchSink};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub sink: Arc<dyn MatchSink>,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/score", web::post().to(score_pair))
        .route("/matches/rank", web::post().to(rank_candidates))
        .route("/matches/batch", web::post().to(batch_match));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn internal_error(error: &str, message: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 500,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score one candidate against one role
///
/// POST /api/v1/matches/score
///
/// Uses the batch publishing threshold unless `threshold` is given.
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScoreRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let mut scorer = state.matcher.scorer().clone();
    if let Some(threshold) = req.threshold {
        scorer = scorer.with_threshold(threshold);
    }

    let candidate = CandidateFacts::from(&req.candidate);
    let role = RoleFacts::from(&req.role);
    let result = scorer.score_with_signal(&candidate, &role, req.signal.as_ref());

    tracing::debug!(score = result.score, category = ?result.category, "Scored single pair");

    HttpResponse::Ok().json(result)
}

/// Rank candidates for an employer's role
///
/// POST /api/v1/matches/rank
///
/// Scoring runs on the blocking pool, like batch.
///
/// Request body:
/// ```json
/// {
///   "role": { "title": "string", "location": "string", "requiredSkills": ["string"] },
///   "candidates": [{ "candidateId": "string", "title": "string", "signal": { "strength": 80 } }],
///   "threshold": 60,
///   "topN": 10
/// }
/// ```
async fn rank_candidates(
    state: web::Data<AppState>,
    req: web::Json<RankCandidatesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank request: {}", errors);
        return validation_failed(errors);
    }

    let role = RoleFacts::from(&req.role);
    let title = role.title().to_string();
    let candidates: Vec<CandidateInput> = req.candidates.iter().map(CandidateInput::from).collect();
    let threshold = req.threshold;
    let top_n = req.top_n.map(usize::from);

    let matcher = state.matcher.clone();
    let ranked = match tokio::task::spawn_blocking(move || {
        matcher.rank_for_role(&role, &candidates, threshold, top_n)
    })
    .await
    {
        Ok(ranked) => ranked,
        Err(e) => {
            tracing::error!("Ranking task failed: {}", e);
            return internal_error("Ranking failed", e.to_string());
        }
    };

    tracing::info!(
        "Ranked {} of {} candidates for role '{}'",
        ranked.len(),
        ranked.total_candidates,
        title
    );

    HttpResponse::Ok().json(RankMatchesResponse::from(ranked))
}

/// Score every role against every candidate and hand matches to the sink
///
/// POST /api/v1/matches/batch
///
/// Scoring runs on the blocking pool. Records are persisted before any
/// notification fires; notification failures do not fail the request.
async fn batch_match(
    state: web::Data<AppState>,
    req: web::Json<BatchMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for batch request: {}", errors);
        return validation_failed(errors);
    }

    let req = req.into_inner();
    let roles: Vec<RoleInput> = req.roles.iter().map(RoleInput::from).collect();
    let candidates: Vec<CandidateInput> = req.candidates.iter().map(CandidateInput::from).collect();
    let options = BatchOptions {
        threshold: req.threshold,
        excluded: req.excluded_by_role(),
    };

    tracing::info!(
        "Starting batch: {} roles x {} candidates",
        roles.len(),
        candidates.len()
    );

    let matcher = state.matcher.clone();
    let outcome = match tokio::task::spawn_blocking(move || {
        matcher.match_batch(&roles, &candidates, &options)
    })
    .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Batch scoring task failed: {}", e);
            return internal_error("Batch scoring failed", e.to_string());
        }
    };

    let notified = match deliver(state.sink.as_ref(), &outcome.records) {
        Ok(notified) => notified,
        Err(e) => {
            tracing::error!("Failed to persist {} matches: {}", outcome.records.len(), e);
            return internal_error("Failed to persist matches", e.to_string());
        }
    };

    tracing::info!(
        "Batch complete: {} matches from {} pairs ({} skipped, {} filtered), {} notified",
        outcome.records.len(),
        outcome.total_pairs,
        outcome.skipped_pairs,
        outcome.filtered_pairs,
        notified
    );

    HttpResponse::Ok().json(BatchMatchResponse {
        matches: outcome.records,
        total_pairs: outcome.total_pairs,
        skipped_pairs: outcome.skipped_pairs,
        filtered_pairs: outcome.filtered_pairs,
        notified,
    })
}
