use std::path::Path;

use anyhow::Context;
use axum::{
    extract::{multipart::MultipartError, Multipart, Path as UrlPath, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::chat::history::{export_transcript, transcript_file_name, ChatMessage};
use crate::chat::EXAMPLE_QUESTIONS;
use crate::errors::AppError;
use crate::routing::Intent;
use crate::state::AppState;

/// Request body cap for CV uploads, multipart framing included.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const UPLOAD_TOO_LARGE_MESSAGE: &str =
    "❌ Ukuran file melebihi batas 10 MB. Silakan upload file PDF yang lebih kecil.";

// ────────────────────────────────────────────────────────────────────────────
// Request / response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    /// Absent when the request failed inside routing.
    pub intent: Option<Intent>,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct DocumentAnalysisResponse {
    pub file_name: String,
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct ExamplesResponse {
    pub examples: &'static [&'static str],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if req.query.trim().is_empty() {
        return Err(AppError::Validation("query must not be empty".to_string()));
    }

    let session_id = req.session_id.unwrap_or_else(Uuid::new_v4);
    let envelope = state.router.route(&req.query).await;

    let turn = [
        ChatMessage::user(req.query.as_str()),
        ChatMessage::assistant(envelope.text.as_str()),
    ];
    if let Err(e) = state.history.append(session_id, &turn).await {
        warn!("Could not record chat turn for session {session_id}: {e}");
    }

    Ok(Json(ChatResponse {
        session_id,
        intent: envelope.intent,
        response: envelope.into_text(),
    }))
}

/// POST /api/v1/documents/analyze
///
/// Multipart field `file`. The upload lives in a temporary file for the
/// duration of the request only.
pub async fn handle_analyze_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DocumentAnalysisResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await.map_err(upload_error)?;
        info!("Received document '{file_name}' ({} bytes)", bytes.len());

        let upload = tempfile::Builder::new()
            .prefix("cv_")
            .suffix(&upload_suffix(&file_name))
            .tempfile()
            .context("failed to create temporary upload file")?;
        tokio::fs::write(upload.path(), &bytes)
            .await
            .context("failed to write temporary upload file")?;

        let response = state.router.handle_document_analysis(upload.path()).await;

        return Ok(Json(DocumentAnalysisResponse {
            file_name,
            response,
        }));
    }

    Err(AppError::Validation(
        "multipart field 'file' is required".to_string(),
    ))
}

/// GET /api/v1/chat/examples
pub async fn handle_examples() -> Json<ExamplesResponse> {
    Json(ExamplesResponse {
        examples: EXAMPLE_QUESTIONS,
    })
}

/// GET /api/v1/chat/:session_id/export
pub async fn handle_export(
    State(state): State<AppState>,
    UrlPath(session_id): UrlPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let messages = state.history.list(session_id).await?;
    if messages.is_empty() {
        return Err(AppError::NotFound(
            "Tidak ada chat history untuk diexport".to_string(),
        ));
    }

    let now = Utc::now();
    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", transcript_file_name(now)),
        ),
    ];
    Ok((headers, export_transcript(&messages, now)))
}

/// DELETE /api/v1/chat/:session_id
pub async fn handle_clear(
    State(state): State<AppState>,
    UrlPath(session_id): UrlPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.history.clear(session_id).await?;
    info!("Cleared chat history for session {session_id}");
    Ok(StatusCode::NO_CONTENT)
}

fn upload_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Rejected oversized upload: {e}");
        AppError::PayloadTooLarge(UPLOAD_TOO_LARGE_MESSAGE.to_string())
    } else {
        AppError::Validation(e.body_text())
    }
}

/// Keeps the uploaded extension so the router's document check sees it.
fn upload_suffix(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
