//! Axum route handlers for the Matching API.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::{AppError, MatchError};
use crate::matching::example::example_request;
use crate::matching::ranking::{run_match, validate_job_description, MatchOutcome, MatchRequest};
use crate::matching::report::{render_report, REPORT_FILENAME};
use crate::matching::requirements::{extract_requirements, JobRequirement};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RequirementsRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct RequirementsResponse {
    pub requirement: JobRequirement,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

fn execute(state: &AppState, request: &MatchRequest) -> Result<MatchOutcome, MatchError> {
    run_match(
        request,
        &state.dictionaries,
        state.fit_scorer.as_ref(),
        state.config.default_weights,
        Utc::now().year(),
    )
}

/// POST /api/v1/requirements
///
/// Previews what the extractor pulls out of a job description.
pub async fn handle_extract_requirements(
    State(state): State<AppState>,
    Json(request): Json<RequirementsRequest>,
) -> Result<Json<RequirementsResponse>, AppError> {
    let jd = validate_job_description(&request.job_description)?;
    let requirement = extract_requirements(jd, &state.dictionaries);
    Ok(Json(RequirementsResponse { requirement }))
}

/// POST /api/v1/match
///
/// Stateless match: nothing is kept after the response.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchOutcome>, AppError> {
    let outcome = execute(&state, &request)?;
    Ok(Json(outcome))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Json<CreateSessionResponse> {
    let session_id = state.sessions.create();
    info!(%session_id, active = state.sessions.len(), "Session created");
    Json(CreateSessionResponse { session_id })
}

/// POST /api/v1/sessions/:id/match
///
/// Same as `/api/v1/match`; the outcome replaces the session's previous one.
pub async fn handle_session_match(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchOutcome>, AppError> {
    if state.sessions.get(session_id).is_none() {
        return Err(AppError::SessionNotFound(session_id));
    }

    let outcome = execute(&state, &request)?;

    // the session may have been evicted while scoring
    if !state.sessions.record_match(session_id, outcome.clone()) {
        return Err(AppError::SessionNotFound(session_id));
    }

    Ok(Json(outcome))
}

/// GET /api/v1/sessions/:id/results
pub async fn handle_session_results(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<MatchOutcome>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .ok_or(AppError::SessionNotFound(session_id))?;

    let outcome = session.last_match.ok_or(MatchError::NoMatchRun)?;
    Ok(Json(outcome))
}

/// GET /api/v1/sessions/:id/report
///
/// Plain-text report of the session's last match, served as a download.
pub async fn handle_session_report(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .ok_or(AppError::SessionNotFound(session_id))?;

    let report = render_report(session.last_match.as_ref())?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILENAME}\""),
            ),
        ],
        report,
    ))
}

/// GET /api/v1/example
///
/// Demo job description and résumés, shaped as a match request.
pub async fn handle_example() -> Json<MatchRequest> {
    Json(example_request())
}
