//! Per-session chat history kept in a redis list.
//!
//! Key layout: `chat_history:{session_id}` → JSON-encoded `ChatMessage`s in
//! insertion order. Each append refreshes the session TTL and keeps only the
//! newest `MAX_SESSION_MESSAGES` entries.

use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Per-session cap; older messages are trimmed on append.
pub const MAX_SESSION_MESSAGES: isize = 200;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("corrupt history entry: {0}")]
    Corrupt(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            at: Utc::now(),
        }
    }
}

#[derive(Clone)]
pub struct ChatHistory {
    client: redis::Client,
    ttl_secs: i64,
}

impl ChatHistory {
    pub fn new(client: redis::Client, ttl_secs: u64) -> Self {
        Self {
            client,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    fn key(session_id: Uuid) -> String {
        format!("chat_history:{session_id}")
    }

    pub async fn append(
        &self,
        session_id: Uuid,
        messages: &[ChatMessage],
    ) -> Result<(), HistoryError> {
        let encoded = messages
            .iter()
            .map(serde_json::to_string)
            .collect::<Result<Vec<_>, _>>()?;
        let pipeline = self.append_pipeline(&Self::key(session_id), encoded);

        let mut con = self.client.get_multiplexed_async_connection().await?;
        let () = pipeline.query_async(&mut con).await?;
        Ok(())
    }

    /// RPUSH, trim to the newest `MAX_SESSION_MESSAGES`, refresh the TTL.
    fn append_pipeline(&self, key: &str, encoded: Vec<String>) -> redis::Pipeline {
        let mut pipe = redis::pipe();
        pipe.atomic()
            .rpush(key, encoded)
            .ignore()
            .ltrim(key, -MAX_SESSION_MESSAGES, -1)
            .ignore()
            .expire(key, self.ttl_secs)
            .ignore();
        pipe
    }

    pub async fn list(&self, session_id: Uuid) -> Result<Vec<ChatMessage>, HistoryError> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let raw: Vec<String> = con.lrange(Self::key(session_id), 0, -1).await?;
        raw.iter()
            .map(|entry| serde_json::from_str(entry).map_err(HistoryError::from))
            .collect()
    }

    pub async fn clear(&self, session_id: Uuid) -> Result<(), HistoryError> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.del::<_, ()>(Self::key(session_id)).await?;
        Ok(())
    }
}

const TRANSCRIPT_TITLE: &str = "AI Career Assistant - Chat History";

/// Plain-text transcript: title, export timestamp, a rule, then one block per
/// message.
pub fn export_transcript(messages: &[ChatMessage], exported_at: DateTime<Utc>) -> String {
    let mut out = format!(
        "{TRANSCRIPT_TITLE}\nExport Date: {}\n{}\n\n",
        exported_at.format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(50)
    );
    for message in messages {
        let prefix = match message.role {
            Role::User => "👤 User: ",
            Role::Assistant => "🤖 AI: ",
        };
        out.push_str(prefix);
        out.push_str(&message.content);
        out.push_str("\n\n");
    }
    out
}

pub fn transcript_file_name(exported_at: DateTime<Utc>) -> String {
    format!("career_chat_{}.txt", exported_at.format("%Y%m%d_%H%M%S"))
}
