pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::analytics::handlers as analytics;
use crate::chat::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/chat", post(handlers::handle_chat))
        .route("/api/v1/chat/examples", get(handlers::handle_examples))
        .route(
            "/api/v1/chat/:session_id/export",
            get(handlers::handle_export),
        )
        .route("/api/v1/chat/:session_id", delete(handlers::handle_clear))
        .route(
            "/api/v1/documents/analyze",
            post(handlers::handle_analyze_document)
                .layer(DefaultBodyLimit::max(handlers::MAX_UPLOAD_BYTES)),
        )
        .route("/api/v1/analytics", post(analytics::handle_analytics))
        .route("/api/v1/analytics/presets", get(analytics::handle_presets))
        .with_state(state)
}
