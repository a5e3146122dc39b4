//! Career advice: CV analysis with optional related postings, and free-form
//! advice questions.

use std::sync::Arc;

use tracing::{error, info};

use crate::advisory::prompts::{
    ADVICE_APOLOGY, CV_ANALYSIS, CV_ANALYSIS_APOLOGY, GENERAL_ADVICE, RELATED_POSTINGS_HEADER,
    RELATED_POSTINGS_SEPARATOR,
};
use crate::llm_client::TextGenerator;
use crate::outcome::{FailureKind, Outcome};
use crate::retrieval::SemanticSearchResponder;

/// Postings attached to a CV analysis.
const RELATED_POSTINGS_LIMIT: usize = 3;

pub struct AdvisoryResponder {
    llm: Arc<dyn TextGenerator>,
    search: Option<Arc<SemanticSearchResponder>>,
}

impl AdvisoryResponder {
    pub fn new(llm: Arc<dyn TextGenerator>, search: Option<Arc<SemanticSearchResponder>>) -> Self {
        Self { llm, search }
    }

    pub async fn analyze_document(&self, text: &str) -> Outcome {
        if text.trim().is_empty() {
            error!("CV analysis called with an empty document");
            return Outcome::failed(FailureKind::Extraction, CV_ANALYSIS_APOLOGY);
        }

        let mut analysis = match self.llm.generate(&CV_ANALYSIS, &[("cv_text", text)]).await {
            Ok(analysis) => analysis,
            Err(e) => {
                error!("AdvisoryResponder CV analysis error: {e}");
                return Outcome::failed(FailureKind::Generation, CV_ANALYSIS_APOLOGY);
            }
        };

        if let Some(search) = &self.search {
            let follow_up = follow_up_query(&analysis);
            let postings = search
                .retrieve_documents(&follow_up, RELATED_POSTINGS_LIMIT)
                .await;
            info!("Attaching {} related postings to CV analysis", postings.len());
            if !postings.is_empty() {
                let related = postings
                    .iter()
                    .map(|p| p.content.as_str())
                    .collect::<Vec<_>>()
                    .join(RELATED_POSTINGS_SEPARATOR);
                analysis.push_str(RELATED_POSTINGS_HEADER);
                analysis.push_str(&related);
            }
        }

        Outcome::Answer(analysis)
    }

    pub async fn general_advice(&self, query: &str) -> Outcome {
        match self.llm.generate(&GENERAL_ADVICE, &[("query", query)]).await {
            Ok(advice) => Outcome::Answer(advice),
            Err(e) => {
                error!("Error in general advice: {e}");
                Outcome::failed(FailureKind::Generation, ADVICE_APOLOGY)
            }
        }
    }
}

/// The first two lines of the analysis usually name the profile and the
/// strongest skills, which makes them a usable search query.
fn follow_up_query(analysis: &str) -> String {
    analysis.lines().take(2).collect::<Vec<_>>().join("; ")
}
