use serde::Serialize;

use crate::outcome::Outcome;
use crate::routing::intent::Intent;

/// The final, displayable answer for one chat query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseEnvelope {
    /// `None` when the router's error boundary produced the text.
    pub intent: Option<Intent>,
    pub text: String,
}

impl ResponseEnvelope {
    /// Banner + responder text + category footer, each exactly once.
    pub fn from_outcome(intent: Intent, outcome: Outcome) -> Self {
        let body = outcome.into_text();
        Self {
            intent: Some(intent),
            text: format!(
                "{}\n\n{}\n\n---\n*Kategori: {}*",
                intent.banner(),
                body,
                intent
            ),
        }
    }

    /// Output of the router's error boundary: no banner, no footer.
    pub fn unexpected(outcome: Outcome) -> Self {
        Self {
            intent: None,
            text: outcome.into_text(),
        }
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
