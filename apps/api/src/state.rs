use std::sync::Arc;

use crate::chat::ChatHistory;
use crate::routing::IntentRouter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup; holds every responder and backend.
    pub router: Arc<IntentRouter>,
    pub history: ChatHistory,
}
