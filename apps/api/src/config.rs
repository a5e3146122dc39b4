use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup aborts if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub openai_api_key: String,
    pub qdrant_url: String,
    pub qdrant_api_key: Option<String>,
    pub qdrant_collection: String,
    /// Payload value every similarity search is filtered on (`country`).
    pub retrieval_country: String,
    pub embedding_model: String,
    pub database_url: String,
    pub redis_url: String,
    pub chat_history_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            qdrant_url: require_env("QDRANT_URL")?,
            qdrant_api_key: std::env::var("QDRANT_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            qdrant_collection: env_or("QDRANT_COLLECTION", "indonesian_jobs"),
            retrieval_country: env_or("RETRIEVAL_COUNTRY", "Indonesia"),
            embedding_model: env_or("EMBEDDING_MODEL", "text-embedding-3-small"),
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            chat_history_ttl_secs: env_or("CHAT_HISTORY_TTL_SECS", "86400")
                .parse::<u64>()
                .context("CHAT_HISTORY_TTL_SECS must be a number of seconds")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
