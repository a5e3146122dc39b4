mod advisory;
mod analytics;
mod chat;
mod config;
mod db;
mod errors;
mod llm_client;
mod outcome;
mod retrieval;
mod routes;
mod routing;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::advisory::{AdvisoryResponder, PdfTextExtractor};
use crate::analytics::{SqlQueryExecutor, StructuredQueryResponder};
use crate::chat::ChatHistory;
use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::retrieval::{OpenAiEmbedder, QdrantClient, SearchFilter, SemanticSearchResponder};
use crate::routes::build_router;
use crate::routing::{IntentClassifier, IntentRouter, KeywordScoreTable};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (structured analysis backend)
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis (chat history)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let history = ChatHistory::new(redis, config.chat_history_ttl_secs);
    info!("Redis client initialized");

    // Initialize LLM client, shared by every responder
    let llm: Arc<dyn TextGenerator> = Arc::new(LlmClient::new(config.anthropic_api_key.clone())?);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let router = build_intent_router(&config, db, llm)?;

    let state = AppState {
        router: Arc::new(router),
        history,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web frontend has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Wires every responder and backend once; the result is read-only and
/// shared across requests.
fn build_intent_router(
    config: &Config,
    db: sqlx::PgPool,
    llm: Arc<dyn TextGenerator>,
) -> Result<IntentRouter> {
    let embedder = Arc::new(OpenAiEmbedder::new(
        config.openai_api_key.clone(),
        config.embedding_model.clone(),
    )?);
    let store = Arc::new(QdrantClient::new(
        config.qdrant_url.clone(),
        config.qdrant_api_key.clone(),
        config.qdrant_collection.clone(),
    )?);
    info!(
        "Vector store: {} (collection {})",
        config.qdrant_url, config.qdrant_collection
    );

    let semantic = Arc::new(SemanticSearchResponder::new(
        embedder,
        store,
        llm.clone(),
        SearchFilter::new("country", config.retrieval_country.as_str()),
    ));
    let structured = Arc::new(StructuredQueryResponder::new(Arc::new(
        SqlQueryExecutor::new(db, llm.clone()),
    )));
    let advisory = Arc::new(AdvisoryResponder::new(llm.clone(), Some(semantic.clone())));
    let classifier = IntentClassifier::new(KeywordScoreTable::default(), llm);

    Ok(IntentRouter::new(
        classifier,
        semantic,
        structured,
        advisory,
        Arc::new(PdfTextExtractor),
    ))
}
