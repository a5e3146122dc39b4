//! Natural language → read-only SQL → textual answer, over the `jobs` table.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};

use crate::analytics::guard::is_single_read_statement;
use crate::analytics::prompts::{JOBS_SCHEMA, RESULT_SUMMARY, SQL_GENERATION};
use crate::llm_client::{strip_json_fences, LlmError, TextGenerator};

/// Rows handed to the summarizer are capped to keep prompts bounded.
const MAX_RESULT_ROWS: i64 = 50;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("could not read a query plan from the model output")]
    InvalidPlan(#[from] serde_json::Error),

    #[error("generated query is not a single read-only statement")]
    NotReadOnly,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result structure returned by a query execution backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecutionOutput {
    pub output: String,
}

#[async_trait]
pub trait QueryExecutionBackend: Send + Sync {
    async fn execute(&self, question: &str) -> Result<ExecutionOutput, ExecutionError>;
}

#[derive(Debug, Deserialize)]
struct GeneratedSql {
    sql: String,
}

pub struct SqlQueryExecutor {
    pool: PgPool,
    llm: Arc<dyn TextGenerator>,
}

impl SqlQueryExecutor {
    pub fn new(pool: PgPool, llm: Arc<dyn TextGenerator>) -> Self {
        Self { pool, llm }
    }

    async fn generate_sql(&self, question: &str) -> Result<String, ExecutionError> {
        let raw = self
            .llm
            .generate(
                &SQL_GENERATION,
                &[("schema", JOBS_SCHEMA), ("question", question)],
            )
            .await?;
        parse_generated_sql(&raw)
    }

    /// Runs the query inside a read-only transaction and returns the rows as
    /// one JSON array.
    async fn fetch_rows(&self, sql: &str) -> Result<serde_json::Value, ExecutionError> {
        let wrapped = wrap_as_json_rows(sql);

        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await?;
        let rows: serde_json::Value = sqlx::query_scalar(&wrapped).fetch_one(&mut *tx).await?;
        tx.rollback().await?;

        Ok(rows)
    }
}

#[async_trait]
impl QueryExecutionBackend for SqlQueryExecutor {
    async fn execute(&self, question: &str) -> Result<ExecutionOutput, ExecutionError> {
        let sql = self.generate_sql(question).await?;
        debug!("Generated SQL: {sql}");

        let rows = self.fetch_rows(&sql).await?;
        let row_count = rows.as_array().map(Vec::len).unwrap_or(0);
        info!("Query returned {row_count} rows");

        let rows_json = rows.to_string();
        let output = self
            .llm
            .generate(
                &RESULT_SUMMARY,
                &[("question", question), ("rows", &rows_json)],
            )
            .await?;

        Ok(ExecutionOutput { output })
    }
}

fn parse_generated_sql(raw: &str) -> Result<String, ExecutionError> {
    let plan: GeneratedSql = serde_json::from_str(strip_json_fences(raw))?;
    let sql = plan.sql.trim().trim_end_matches(';').trim().to_string();
    if !is_single_read_statement(&sql) {
        return Err(ExecutionError::NotReadOnly);
    }
    Ok(sql)
}

fn wrap_as_json_rows(sql: &str) -> String {
    format!(
        "SELECT COALESCE(json_agg(t), '[]'::json) FROM (SELECT * FROM ({sql}) AS q LIMIT {MAX_RESULT_ROWS}) AS t"
    )
}
