use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("document not found: {0}")]
    NotFound(PathBuf),

    #[error("could not extract text: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait DocumentTextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Plain-text extraction from PDF files via `pdf-extract`.
/// Parsing is CPU-bound and runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl DocumentTextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ExtractionError::NotFound(path.to_path_buf()));
        }

        let owned = path.to_path_buf();
        tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
            .await
            .map_err(|e| ExtractionError::Malformed(e.to_string()))?
            .map_err(|e| ExtractionError::Malformed(e.to_string()))
    }
}
