pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/requirements",
            post(handlers::handle_extract_requirements),
        )
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/example", get(handlers::handle_example))
        // Sessions keep the last match so the report can be fetched later
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id/match",
            post(handlers::handle_session_match),
        )
        .route(
            "/api/v1/sessions/:id/results",
            get(handlers::handle_session_results),
        )
        .route(
            "/api/v1/sessions/:id/report",
            get(handlers::handle_session_report),
        )
        .with_state(state)
}
