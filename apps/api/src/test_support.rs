// Deterministic stand-ins for the external services, shared by unit tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::advisory::{AdvisoryResponder, DocumentTextExtractor, ExtractionError};
use crate::analytics::executor::{ExecutionError, ExecutionOutput, QueryExecutionBackend};
use crate::analytics::StructuredQueryResponder;
use crate::llm_client::{LlmError, PromptTemplate, TextGenerator};
use crate::retrieval::embedder::{Embedder, EmbeddingError};
use crate::retrieval::vector_store::{RetrievalError, SearchHit, SimilaritySearchBackend};
use crate::retrieval::{SearchFilter, SemanticSearchResponder};
use crate::routing::{IntentClassifier, IntentRouter, KeywordScoreTable};

fn unavailable() -> LlmError {
    LlmError::Api {
        status: 503,
        message: "overloaded".to_string(),
    }
}

/// Replies per template name; a `None` default reply means every call fails.
pub struct StubGenerator {
    default_reply: Option<String>,
    overrides: Vec<(&'static str, String)>,
    log: Mutex<Vec<(&'static str, String)>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            default_reply: Some(reply.to_string()),
            overrides: Vec::new(),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            default_reply: None,
            overrides: Vec::new(),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(mut self, template: &'static str, reply: &str) -> Self {
        self.overrides.push((template, reply.to_string()));
        self
    }

    pub fn calls(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    pub fn calls_for(&self, template: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|(name, _)| *name == template)
            .count()
    }

    /// Rendered prompts in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap()
            .iter()
            .map(|(_, prompt)| prompt.clone())
            .collect()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(
        &self,
        template: &PromptTemplate,
        vars: &[(&str, &str)],
    ) -> Result<String, LlmError> {
        self.log
            .lock()
            .unwrap()
            .push((template.name, template.render(vars)));

        self.overrides
            .iter()
            .find(|(name, _)| *name == template.name)
            .map(|(_, reply)| reply.clone())
            .or_else(|| self.default_reply.clone())
            .ok_or_else(unavailable)
    }
}

pub struct StubEmbedder {
    fail: bool,
    calls: AtomicUsize,
    last_text: Mutex<Option<String>>,
}

impl StubEmbedder {
    pub fn ok() -> Self {
        Self {
            fail: false,
            calls: AtomicUsize::new(0),
            last_text: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::ok()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_text.lock().unwrap() = Some(text.to_string());
        if self.fail {
            return Err(EmbeddingError::Empty);
        }
        Ok(vec![0.1, 0.2, 0.3])
    }
}

/// Returns every configured hit regardless of `limit`, so callers' own
/// ordering and capping is what gets tested.
pub struct StubSearch {
    hits: Option<Vec<SearchHit>>,
    calls: AtomicUsize,
    last_filter: Mutex<Option<SearchFilter>>,
}

impl StubSearch {
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits: Some(hits),
            calls: AtomicUsize::new(0),
            last_filter: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            hits: None,
            ..Self::with_hits(Vec::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_filter(&self) -> Option<SearchFilter> {
        self.last_filter.lock().unwrap().clone()
    }
}

#[async_trait]
impl SimilaritySearchBackend for StubSearch {
    async fn search(
        &self,
        _vector: &[f32],
        filter: &SearchFilter,
        _limit: usize,
    ) -> Result<Vec<SearchHit>, RetrievalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_filter.lock().unwrap() = Some(filter.clone());
        self.hits.clone().ok_or(RetrievalError::Api {
            status: 502,
            message: "collection unavailable".to_string(),
        })
    }
}

/// A stored posting whose payload only carries a title.
pub fn job_hit(id: i64, score: f32, title: &str) -> SearchHit {
    let mut payload = Map::new();
    payload.insert("title".to_string(), Value::String(title.to_string()));
    SearchHit {
        id: json!(id),
        score,
        payload: Some(payload),
    }
}

pub struct StubExecutor {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl StubExecutor {
    pub fn answering(output: &str) -> Self {
        Self {
            reply: Ok(output.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_with(message: String) -> Self {
        Self {
            reply: Err(message),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryExecutionBackend for StubExecutor {
    async fn execute(&self, _question: &str) -> Result<ExecutionOutput, ExecutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(output) => Ok(ExecutionOutput {
                output: output.clone(),
            }),
            Err(message) => Err(ExecutionError::Llm(LlmError::Api {
                status: 500,
                message: message.clone(),
            })),
        }
    }
}

pub struct PanickingExecutor;

#[async_trait]
impl QueryExecutionBackend for PanickingExecutor {
    async fn execute(&self, _question: &str) -> Result<ExecutionOutput, ExecutionError> {
        panic!("connection pool exploded: {}", "x".repeat(300));
    }
}

enum ExtractorReply {
    Text(String),
    NotFound,
    Malformed,
}

pub struct StubExtractor {
    reply: ExtractorReply,
    calls: AtomicUsize,
}

impl StubExtractor {
    fn with(reply: ExtractorReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::with(ExtractorReply::Text(text.to_string()))
    }

    pub fn not_found() -> Self {
        Self::with(ExtractorReply::NotFound)
    }

    pub fn malformed() -> Self {
        Self::with(ExtractorReply::Malformed)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentTextExtractor for StubExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            ExtractorReply::Text(text) => Ok(text.clone()),
            ExtractorReply::NotFound => Err(ExtractionError::NotFound(path.to_path_buf())),
            ExtractorReply::Malformed => Err(ExtractionError::Malformed(
                "invalid cross-reference table".to_string(),
            )),
        }
    }
}

/// Handles on every stub behind a router built by `router_with`.
pub struct RouterStubs {
    pub llm: Arc<StubGenerator>,
    pub embedder: Arc<StubEmbedder>,
    pub search: Arc<StubSearch>,
    pub executor: Arc<StubExecutor>,
    pub extractor: Arc<StubExtractor>,
}

impl Default for RouterStubs {
    fn default() -> Self {
        Self {
            llm: Arc::new(StubGenerator::replying("Jawaban dari model.")),
            embedder: Arc::new(StubEmbedder::ok()),
            search: Arc::new(StubSearch::with_hits(Vec::new())),
            executor: Arc::new(StubExecutor::answering("Ada 10 lowongan")),
            extractor: Arc::new(StubExtractor::text("Budi, Python, Django")),
        }
    }
}

pub fn router_with(stubs: &RouterStubs) -> IntentRouter {
    let semantic = Arc::new(SemanticSearchResponder::new(
        stubs.embedder.clone(),
        stubs.search.clone(),
        stubs.llm.clone(),
        SearchFilter::new("country", "Indonesia"),
    ));
    IntentRouter::new(
        IntentClassifier::new(KeywordScoreTable::default(), stubs.llm.clone()),
        semantic.clone(),
        Arc::new(StructuredQueryResponder::new(stubs.executor.clone())),
        Arc::new(AdvisoryResponder::new(stubs.llm.clone(), Some(semantic))),
        stubs.extractor.clone(),
    )
}
