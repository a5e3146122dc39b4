use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analytics::ANALYSIS_PRESETS;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyticsRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisPreset {
    pub title: &'static str,
    pub query: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub presets: Vec<AnalysisPreset>,
}

/// POST /api/v1/analytics
/// Sends the question straight to the structured data responder.
pub async fn handle_analytics(
    State(state): State<AppState>,
    Json(req): Json<AnalyticsRequest>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    if req.query.trim().is_empty() {
        return Err(AppError::Validation("query must not be empty".to_string()));
    }

    let envelope = state.router.analyze_data(&req.query).await;
    Ok(Json(AnalyticsResponse {
        response: envelope.into_text(),
    }))
}

/// GET /api/v1/analytics/presets
pub async fn handle_presets() -> Json<PresetsResponse> {
    Json(PresetsResponse {
        presets: ANALYSIS_PRESETS
            .iter()
            .map(|&(title, query)| AnalysisPreset { title, query })
            .collect(),
    })
}
