use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Input problems raised by the matching pipeline itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Job description too short: at least {min} characters required")]
    DescriptionTooShort { min: usize },

    #[error("No valid candidates: every resume needs at least {min} characters")]
    NoValidCandidates { min: usize },

    #[error("No match results yet: run match first")]
    NoMatchRun,
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error("Session {0} not found")]
    SessionNotFound(Uuid),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Match(MatchError::DescriptionTooShort { .. }) => {
                (StatusCode::BAD_REQUEST, "DESCRIPTION_TOO_SHORT")
            }
            AppError::Match(MatchError::NoValidCandidates { .. }) => {
                (StatusCode::BAD_REQUEST, "NO_VALID_CANDIDATES")
            }
            AppError::Match(MatchError::NoMatchRun) => (StatusCode::CONFLICT, "MATCH_NOT_RUN"),
            AppError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = match &self {
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
