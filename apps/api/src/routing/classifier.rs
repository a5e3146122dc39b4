//! Two-stage intent classification.
//!
//! 1. Rule pass: keyword hit counts per intent; a strict winner with at
//!    least `RULE_THRESHOLD` hits is returned without any model call.
//! 2. Model pass: ties and sub-threshold scores ask the text generator for
//!    one label. Errors and unknown labels fall back to
//!    `Intent::FAIL_OPEN_DEFAULT`.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::{LlmError, TextGenerator};
use crate::routing::intent::{Intent, KeywordScoreTable, KeywordScores};
use crate::routing::prompts::CLASSIFICATION;

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("classification model failed: {0}")]
    Generation(#[from] LlmError),

    #[error("classification model returned an unrecognized label: {0:?}")]
    UnrecognizedLabel(String),
}

/// How a classification was reached, for logs and the API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Rule(KeywordScores),
    Model,
    FailOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub intent: Intent,
    pub decision: Decision,
}

pub struct IntentClassifier {
    table: KeywordScoreTable,
    llm: Arc<dyn TextGenerator>,
}

impl IntentClassifier {
    pub fn new(table: KeywordScoreTable, llm: Arc<dyn TextGenerator>) -> Self {
        Self { table, llm }
    }

    pub async fn classify(&self, query: &str) -> Classification {
        let scores = self.table.score(query);
        if let Some(intent) = scores.decisive() {
            debug!("Rule-based classification {intent:?} from {scores:?}");
            return Classification {
                intent,
                decision: Decision::Rule(scores),
            };
        }

        match self.classify_with_model(query).await {
            Ok(intent) => Classification {
                intent,
                decision: Decision::Model,
            },
            Err(e) => fail_open(e),
        }
    }

    async fn classify_with_model(&self, query: &str) -> Result<Intent, ClassificationError> {
        let raw = self
            .llm
            .generate(&CLASSIFICATION, &[("query", query)])
            .await?;
        Intent::from_label(&raw).ok_or(ClassificationError::UnrecognizedLabel(raw))
    }
}

/// The named default path: uncertainty never surfaces to the user, the
/// query goes to the most general responder instead.
fn fail_open(error: ClassificationError) -> Classification {
    warn!(
        "{error}, defaulting to {}",
        Intent::FAIL_OPEN_DEFAULT.label()
    );
    Classification {
        intent: Intent::FAIL_OPEN_DEFAULT,
        decision: Decision::FailOpen,
    }
}
