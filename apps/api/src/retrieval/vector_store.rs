//! Similarity search over the job-posting collection (Qdrant REST API).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Bounded connection and request timeout for the vector store.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("vector store error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Exact-match payload filter, e.g. `country = Indonesia`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub key: String,
    pub value: String,
}

impl SearchFilter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    fn to_qdrant(&self) -> Value {
        json!({
            "must": [
                { "key": self.key, "match": { "value": self.value } }
            ]
        })
    }
}

/// One raw hit: point id, similarity score and the stored payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: Value,
    pub score: f32,
    #[serde(default)]
    pub payload: Option<Map<String, Value>>,
}

#[async_trait]
pub trait SimilaritySearchBackend: Send + Sync {
    async fn search(
        &self,
        vector: &[f32],
        filter: &SearchFilter,
        limit: usize,
    ) -> Result<Vec<SearchHit>, RetrievalError>;
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    vector: &'a [f32],
    filter: Value,
    limit: usize,
    with_payload: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: Vec<SearchHit>,
}

#[derive(Clone)]
pub struct QdrantClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    collection: String,
}

impl QdrantClient {
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        collection: String,
    ) -> Result<Self, RetrievalError> {
        let client = Client::builder()
            .connect_timeout(SEARCH_TIMEOUT)
            .timeout(SEARCH_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            collection,
        })
    }

    fn search_url(&self) -> String {
        format!(
            "{}/collections/{}/points/search",
            self.base_url, self.collection
        )
    }
}

#[async_trait]
impl SimilaritySearchBackend for QdrantClient {
    async fn search(
        &self,
        vector: &[f32],
        filter: &SearchFilter,
        limit: usize,
    ) -> Result<Vec<SearchHit>, RetrievalError> {
        let mut request = self.client.post(self.search_url()).json(&SearchRequest {
            vector,
            filter: filter.to_qdrant(),
            limit,
            with_payload: true,
        });
        if let Some(key) = &self.api_key {
            request = request.header("api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.result)
    }
}
