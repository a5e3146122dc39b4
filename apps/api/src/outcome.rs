//! Tagged responder results.
//!
//! Every responder returns an `Outcome` instead of a bare string so callers
//! can tell "no results" from "backend failure" without inspecting text.
//! Every variant still carries the user-facing message.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Generation,
    Execution,
    Extraction,
    Unexpected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Answer(String),
    NoResults(String),
    /// Deliberate short-circuit, e.g. a mutating keyword in a data question.
    Refused(String),
    Failed { kind: FailureKind, message: String },
}

impl Outcome {
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Outcome::Failed {
            kind,
            message: message.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Outcome::Answer(t) | Outcome::NoResults(t) | Outcome::Refused(t) => t,
            Outcome::Failed { message, .. } => message,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Outcome::Answer(t) | Outcome::NoResults(t) | Outcome::Refused(t) => t,
            Outcome::Failed { message, .. } => message,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

/// Cuts an error representation down to at most `max_chars` characters so
/// backend internals never reach the user beyond a short excerpt.
pub fn error_excerpt(err: &impl std::fmt::Display, max_chars: usize) -> String {
    err.to_string().chars().take(max_chars).collect()
}
