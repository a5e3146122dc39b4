//! Structured data analysis: denylist check → query backend → formatted answer.

use std::sync::Arc;

use tracing::{error, warn};

use crate::analytics::executor::QueryExecutionBackend;
use crate::analytics::guard::find_mutating_keyword;
use crate::analytics::prompts::{ANSWER_PREFIXES, DATA_DISCLAIMER, REFUSAL_MESSAGE};
use crate::outcome::{error_excerpt, FailureKind, Outcome};

const ERROR_EXCERPT_CHARS: usize = 100;

pub struct StructuredQueryResponder {
    backend: Arc<dyn QueryExecutionBackend>,
}

impl StructuredQueryResponder {
    pub fn new(backend: Arc<dyn QueryExecutionBackend>) -> Self {
        Self { backend }
    }

    pub async fn run(&self, query: &str) -> Outcome {
        // Checked on the literal input, before anything is delegated.
        if let Some(keyword) = find_mutating_keyword(query) {
            warn!("Refusing data question containing mutating keyword {keyword}");
            return Outcome::Refused(REFUSAL_MESSAGE.to_string());
        }

        match self.backend.execute(query).await {
            Ok(result) => Outcome::Answer(format_answer(&result.output)),
            Err(e) => {
                error!("Structured query backend error: {e}");
                Outcome::failed(
                    FailureKind::Execution,
                    format!(
                        "Maaf, terjadi kesalahan saat mengakses database: {}... \
                         Silakan coba dengan pertanyaan yang lebih spesifik.",
                        error_excerpt(&e, ERROR_EXCERPT_CHARS)
                    ),
                )
            }
        }
    }
}

/// Strips known label prefixes and appends the data-provenance disclaimer.
pub fn format_answer(raw: &str) -> String {
    let mut answer = raw.trim();
    for prefix in ANSWER_PREFIXES {
        if let Some(rest) = answer.strip_prefix(prefix) {
            answer = rest;
        }
    }
    format!("{answer}{DATA_DISCLAIMER}")
}
