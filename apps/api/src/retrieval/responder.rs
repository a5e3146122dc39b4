//! Semantic job search: retrieve, build a grounded context, generate.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::llm_client::prompts::GROUNDING_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::outcome::{FailureKind, Outcome};
use crate::retrieval::document::RetrievedItem;
use crate::retrieval::embedder::{Embedder, EmbeddingError};
use crate::retrieval::prompts::{
    GENERATION_APOLOGY, GROUNDED_ANSWER, NO_RESULTS_MESSAGE, SEARCH_DISCLAIMER,
};
use crate::retrieval::vector_store::{RetrievalError, SearchFilter, SimilaritySearchBackend};

/// Number of postings used as context for a chat answer.
pub const ANSWER_CONTEXT_LIMIT: usize = 3;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),
}

pub struct SemanticSearchResponder {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn SimilaritySearchBackend>,
    llm: Arc<dyn TextGenerator>,
    filter: SearchFilter,
}

impl SemanticSearchResponder {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn SimilaritySearchBackend>,
        llm: Arc<dyn TextGenerator>,
        filter: SearchFilter,
    ) -> Self {
        Self {
            embedder,
            store,
            llm,
            filter,
        }
    }

    /// Embeds the query and runs the filtered similarity search.
    /// Results are re-sorted by descending score and capped at `limit`
    /// regardless of what the backend returned.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RetrievedItem>, SearchError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let vector = self.embedder.embed(query).await?;
        let mut hits = self.store.search(&vector, &self.filter, limit).await?;

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);

        Ok(hits.into_iter().map(RetrievedItem::from_hit).collect())
    }

    /// Fail-soft retrieval: any backend error becomes an empty result set.
    pub async fn retrieve_documents(&self, query: &str, limit: usize) -> Vec<RetrievedItem> {
        match self.search(query, limit).await {
            Ok(items) => {
                info!("Retrieved {} documents for query: '{}'", items.len(), query);
                items
            }
            Err(e) => {
                error!("Error retrieving documents: {e}");
                Vec::new()
            }
        }
    }

    pub async fn run(&self, query: &str) -> Outcome {
        let items = self.retrieve_documents(query, ANSWER_CONTEXT_LIMIT).await;
        if items.is_empty() {
            return Outcome::NoResults(NO_RESULTS_MESSAGE.to_string());
        }

        let context = build_context(&items);
        let answer = self
            .llm
            .generate(
                &GROUNDED_ANSWER,
                &[
                    ("grounding", GROUNDING_INSTRUCTION),
                    ("context", &context),
                    ("question", query),
                ],
            )
            .await;

        match answer {
            Ok(text) => Outcome::Answer(format!("{text}{SEARCH_DISCLAIMER}")),
            Err(e) => {
                warn!("Grounded answer generation failed: {e}");
                Outcome::failed(FailureKind::Generation, GENERATION_APOLOGY)
            }
        }
    }
}

/// Numbered context block: one `[LOWONGAN n]` section per item.
pub fn build_context(items: &[RetrievedItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("[LOWONGAN {}]\n{}\n", i + 1, item.content))
        .collect::<Vec<_>>()
        .join("\n")
}
