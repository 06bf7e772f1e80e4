//! Axum route handlers for the Matching API.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::ranker::{RankedCandidate, RankedJob, Ranking};
use crate::matching::score::MatchScore;
use crate::matching::weights::MatchWeights;
use crate::state::AppState;

/// Separator used for the flat explanation string.
pub const EXPLANATION_SEPARATOR: &str = "; ";
const SEEKER_ID_HEADER: &str = "x-seeker-id";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    pub job_id: Option<String>,
    pub seeker_id: Option<String>,
    pub weights: Option<MatchWeights>,
}

#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    #[serde(flatten)]
    pub match_score: MatchScore,
    pub explanation_text: String,
}

#[derive(Debug, Deserialize)]
pub struct CandidatesQuery {
    pub job_id: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub seeker_id: Option<String>,
    pub limit: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/matching/calculate
///
/// Body rejections (bad JSON, wrong field types, incomplete `weights`) are
/// reported as validation errors.
pub async fn handle_calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;
    let job_id = parse_id("job_id", request.job_id.as_deref())?;
    let seeker_id = parse_id("seeker_id", request.seeker_id.as_deref())?;

    let match_score = state
        .engine
        .compute_match_score(job_id, seeker_id, request.weights.as_ref())
        .await?;
    let explanation_text = match_score.explanation_text(EXPLANATION_SEPARATOR);

    Ok(Json(CalculateResponse {
        match_score,
        explanation_text,
    }))
}

/// GET /api/v1/matching/candidates?job_id=&limit=
pub async fn handle_top_candidates(
    State(state): State<AppState>,
    Query(params): Query<CandidatesQuery>,
) -> Result<Json<Ranking<RankedCandidate>>, AppError> {
    let job_id = parse_id("job_id", params.job_id.as_deref())?;
    let limit = parse_limit(&state, params.limit.as_deref())?;

    let ranking = state.ranker.top_candidates_for_job(job_id, limit).await?;
    Ok(Json(ranking))
}

/// GET /api/v1/matching/recommendations?seeker_id=&limit=
///
/// The seeker id may also be supplied through the `x-seeker-id` header.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<RecommendationsQuery>,
) -> Result<Json<Ranking<RankedJob>>, AppError> {
    let from_header = headers
        .get(SEEKER_ID_HEADER)
        .and_then(|v| v.to_str().ok());
    let seeker_id = parse_id("seeker_id", params.seeker_id.as_deref().or(from_header))?;
    let limit = parse_limit(&state, params.limit.as_deref())?;

    let ranking = state
        .ranker
        .recommended_jobs_for_seeker(seeker_id, limit)
        .await?;
    Ok(Json(ranking))
}

fn parse_id(name: &str, raw: Option<&str>) -> Result<Uuid, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation(format!("Missing {name}")))?;
    Uuid::parse_str(raw).map_err(|_| AppError::Validation(format!("{name} is not a valid id")))
}

fn parse_limit(state: &AppState, raw: Option<&str>) -> Result<usize, AppError> {
    let matching = &state.config.matching;
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(matching.default_limit);
    };

    match raw.parse::<usize>() {
        Ok(limit) if (1..=matching.max_limit).contains(&limit) => Ok(limit),
        _ => Err(AppError::Validation(format!(
            "limit must be an integer between 1 and {}",
            matching.max_limit
        ))),
    }
}
