use std::sync::Arc;

use crate::config::Config;
use crate::matching::dictionary::Dictionaries;
use crate::matching::scoring::FitScorer;
use crate::matching::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Built once at startup; never mutated afterwards.
    pub dictionaries: Arc<Dictionaries>,
    /// Pluggable fit scorer. Default: KeywordFitScorer.
    pub fit_scorer: Arc<dyn FitScorer>,
    pub sessions: SessionStore,
}
