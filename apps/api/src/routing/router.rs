//! IntentRouter: classify, dispatch to one responder, format the answer.
//!
//! Flow: classify → responder.run → ResponseEnvelope (banner + text + footer).
//!
//! `route` never fails. Responders already turn their own errors into
//! `Outcome`s; anything that still escapes (a panic inside a responder or
//! backend) is caught here and replaced by a generic apology carrying at
//! most `ERROR_EXCERPT_CHARS` characters of detail.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::Path;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::advisory::prompts::CV_ANALYSIS_APOLOGY;
use crate::advisory::{AdvisoryResponder, DocumentTextExtractor, ExtractionError};
use crate::analytics::StructuredQueryResponder;
use crate::outcome::{error_excerpt, FailureKind, Outcome};
use crate::retrieval::SemanticSearchResponder;
use crate::routing::classifier::{Classification, IntentClassifier};
use crate::routing::envelope::ResponseEnvelope;
use crate::routing::intent::Intent;
use crate::routing::prompts::{
    DOCUMENT_BANNER, DOCUMENT_EXTENSIONS, ROUTING_APOLOGY_FOOTER, ROUTING_APOLOGY_HEADER,
    UNSUPPORTED_DOCUMENT_MESSAGE,
};

const ERROR_EXCERPT_CHARS: usize = 100;

/// Built once at startup and shared read-only across requests.
pub struct IntentRouter {
    classifier: IntentClassifier,
    semantic: Arc<SemanticSearchResponder>,
    structured: Arc<StructuredQueryResponder>,
    advisory: Arc<AdvisoryResponder>,
    extractor: Arc<dyn DocumentTextExtractor>,
}

impl IntentRouter {
    pub fn new(
        classifier: IntentClassifier,
        semantic: Arc<SemanticSearchResponder>,
        structured: Arc<StructuredQueryResponder>,
        advisory: Arc<AdvisoryResponder>,
        extractor: Arc<dyn DocumentTextExtractor>,
    ) -> Self {
        Self {
            classifier,
            semantic,
            structured,
            advisory,
            extractor,
        }
    }

    pub async fn classify(&self, query: &str) -> Intent {
        self.classifier.classify(query).await.intent
    }

    pub async fn route(&self, query: &str) -> ResponseEnvelope {
        info!("Routing query: '{query}'");

        match AssertUnwindSafe(self.dispatch(query)).catch_unwind().await {
            Ok(envelope) => envelope,
            Err(panic) => {
                let detail = panic_detail(panic.as_ref());
                error!("Error routing query: {detail}");
                ResponseEnvelope::unexpected(routing_apology(&detail))
            }
        }
    }

    /// Direct data analysis: the question goes to the structured responder
    /// without classification. The denylist and the error boundary still
    /// apply.
    pub async fn analyze_data(&self, query: &str) -> ResponseEnvelope {
        info!("Direct data analysis: '{query}'");

        let run = AssertUnwindSafe(self.structured.run(query)).catch_unwind();
        match run.await {
            Ok(outcome) => ResponseEnvelope::from_outcome(Intent::StructuredQuery, outcome),
            Err(panic) => {
                let detail = panic_detail(panic.as_ref());
                error!("Error in data analysis: {detail}");
                ResponseEnvelope::unexpected(routing_apology(&detail))
            }
        }
    }

    async fn dispatch(&self, query: &str) -> ResponseEnvelope {
        let Classification { intent, decision } = self.classifier.classify(query).await;
        info!("Detected intent: {} via {decision:?}", intent.label());

        let outcome = match intent {
            Intent::StructuredQuery => {
                info!("Delegating to structured query responder");
                self.structured.run(query).await
            }
            Intent::Advisory => {
                info!("Delegating to advisory responder (general advice)");
                self.advisory.general_advice(query).await
            }
            Intent::SemanticSearch => {
                info!("Delegating to semantic search responder");
                self.semantic.run(query).await
            }
        };
        if outcome.is_failure() {
            warn!("{} responder answered with an apology", intent.label());
        }
        debug!("Responder output: {} chars", outcome.text().chars().count());

        ResponseEnvelope::from_outcome(intent, outcome)
    }

    /// CV analysis for an uploaded document. Only recognized document
    /// extensions are accepted; the file is never modified.
    pub async fn handle_document_analysis(&self, path: &Path) -> String {
        info!("Starting CV analysis for: {}", path.display());

        if !has_document_extension(path) {
            return UNSUPPORTED_DOCUMENT_MESSAGE.to_string();
        }

        let analysis = AssertUnwindSafe(self.analyze_document_at(path))
            .catch_unwind()
            .await;

        match analysis {
            Ok(outcome) => format!("{DOCUMENT_BANNER}\n\n{}", outcome.into_text()),
            Err(panic) => {
                let detail = panic_detail(panic.as_ref());
                error!("Error in CV analysis: {detail}");
                routing_apology(&detail).into_text()
            }
        }
    }

    /// Missing and unreadable documents both end in the CV apology.
    async fn analyze_document_at(&self, path: &Path) -> Outcome {
        match self.extractor.extract(path).await {
            Ok(text) => self.advisory.analyze_document(&text).await,
            Err(e @ ExtractionError::NotFound(_)) => {
                warn!("CV document missing: {e}");
                Outcome::failed(FailureKind::Extraction, CV_ANALYSIS_APOLOGY)
            }
            Err(e) => {
                error!("CV text extraction failed: {e}");
                Outcome::failed(FailureKind::Extraction, CV_ANALYSIS_APOLOGY)
            }
        }
    }
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            DOCUMENT_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

fn panic_detail(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}

fn routing_apology(detail: &str) -> Outcome {
    Outcome::failed(
        FailureKind::Unexpected,
        format!(
            "{ROUTING_APOLOGY_HEADER}\nError: {}\n\n{ROUTING_APOLOGY_FOOTER}",
            error_excerpt(&detail, ERROR_EXCERPT_CHARS)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::prompts::REFUSAL_MESSAGE;
    use crate::retrieval::prompts::NO_RESULTS_MESSAGE;
    use crate::test_support::{
        job_hit, router_with, PanickingExecutor, RouterStubs, StubExtractor, StubGenerator,
        StubSearch,
    };

    #[tokio::test]
    async fn test_classify_reports_intent_only() {
        let stubs = RouterStubs::default();
        let router = router_with(&stubs);

        assert_eq!(
            router.classify("Statistik gaji data analyst").await,
            Intent::StructuredQuery
        );
        assert_eq!(stubs.executor.calls(), 0);
    }

    #[tokio::test]
    async fn test_salary_question_routes_to_structured_without_classifier_call() {
        let stubs = RouterStubs::default();
        let router = router_with(&stubs);

        let envelope = router.route("Berapa rata-rata gaji software engineer?").await;

        assert_eq!(envelope.intent, Some(Intent::StructuredQuery));
        assert!(envelope.text.starts_with(Intent::StructuredQuery.banner()));
        assert!(envelope.text.ends_with("*Kategori: STRUCTURED QUERY*"));
        assert_eq!(stubs.llm.calls_for("intent_classification"), 0);
        assert_eq!(stubs.executor.calls(), 1);
    }

    #[tokio::test]
    async fn test_vacancy_question_routes_to_semantic_search() {
        let stubs = RouterStubs {
            llm: Arc::new(
                StubGenerator::replying("Ada lowongan Backend Developer di Jakarta.")
                    .with_reply("intent_classification", "SEMANTIC_SEARCH"),
            ),
            search: Arc::new(StubSearch::with_hits(vec![job_hit(
                1,
                0.93,
                "Backend Developer",
            )])),
            ..RouterStubs::default()
        };
        let router = router_with(&stubs);

        let envelope = router.route("Cari lowongan backend developer di Jakarta").await;

        assert_eq!(envelope.intent, Some(Intent::SemanticSearch));
        assert!(envelope
            .text
            .contains("Ada lowongan Backend Developer di Jakarta."));
        assert_eq!(stubs.llm.calls_for("intent_classification"), 1);
    }

    #[tokio::test]
    async fn test_drop_table_returns_refusal_without_backend_call() {
        let stubs = RouterStubs {
            llm: Arc::new(
                StubGenerator::replying("unused")
                    .with_reply("intent_classification", "STRUCTURED_QUERY"),
            ),
            ..RouterStubs::default()
        };
        let router = router_with(&stubs);

        let envelope = router.route("DROP TABLE jobs").await;

        assert!(envelope.text.contains(REFUSAL_MESSAGE));
        assert_eq!(stubs.executor.calls(), 0);
    }

    #[tokio::test]
    async fn test_advisory_question_gets_single_banner() {
        let stubs = RouterStubs {
            llm: Arc::new(StubGenerator::replying("Mulailah dengan portofolio.")),
            ..RouterStubs::default()
        };
        let router = router_with(&stubs);

        let envelope = router.route("Saran karir untuk fresh graduate IT").await;

        assert_eq!(envelope.intent, Some(Intent::Advisory));
        assert_eq!(envelope.text.matches(Intent::Advisory.banner()).count(), 1);
        assert_eq!(envelope.text.matches("*Kategori: ").count(), 1);
    }

    #[tokio::test]
    async fn test_classifier_failure_defaults_to_semantic_search() {
        let stubs = RouterStubs {
            llm: Arc::new(StubGenerator::failing()),
            ..RouterStubs::default()
        };
        let router = router_with(&stubs);

        let envelope = router.route("halo").await;

        assert_eq!(envelope.intent, Some(Intent::SemanticSearch));
        assert!(envelope.text.contains(NO_RESULTS_MESSAGE));
    }

    #[tokio::test]
    async fn test_route_never_fails_on_odd_input() {
        let stubs = RouterStubs {
            llm: Arc::new(StubGenerator::failing()),
            ..RouterStubs::default()
        };
        let router = router_with(&stubs);
        let long = "lowongan ".repeat(20_000);

        for query in ["", "   ", long.as_str(), "DROP DELETE INSERT UPDATE ALTER TRUNCATE"] {
            let envelope = router.route(query).await;
            assert!(!envelope.text.is_empty());
        }
    }

    #[tokio::test]
    async fn test_identical_queries_produce_identical_output() {
        let stubs = RouterStubs {
            llm: Arc::new(
                StubGenerator::replying("Jawaban tetap.")
                    .with_reply("intent_classification", "SEMANTIC_SEARCH"),
            ),
            search: Arc::new(StubSearch::with_hits(vec![job_hit(1, 0.9, "QA Engineer")])),
            ..RouterStubs::default()
        };
        let router = router_with(&stubs);

        let first = router.route("lowongan QA?").await;
        let second = router.route("lowongan QA?").await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_panicking_responder_is_caught_and_truncated() {
        let router = IntentRouter {
            structured: Arc::new(StructuredQueryResponder::new(Arc::new(PanickingExecutor))),
            ..router_with(&RouterStubs::default())
        };

        let envelope = router.route("Berapa rata-rata gaji di Jakarta?").await;

        assert_eq!(envelope.intent, None);
        assert!(envelope.text.starts_with(ROUTING_APOLOGY_HEADER));
        let detail = envelope
            .text
            .lines()
            .find_map(|l| l.strip_prefix("Error: "))
            .unwrap();
        assert!(detail.chars().count() <= 100);
        assert!(detail.starts_with("connection pool exploded"));
    }

    #[tokio::test]
    async fn test_document_analysis_rejects_non_pdf() {
        let stubs = RouterStubs::default();
        let router = router_with(&stubs);

        let reply = router
            .handle_document_analysis(Path::new("/tmp/cv.docx"))
            .await;

        assert_eq!(reply, UNSUPPORTED_DOCUMENT_MESSAGE);
        assert_eq!(stubs.extractor.calls(), 0);
    }

    #[tokio::test]
    async fn test_document_analysis_accepts_uppercase_extension() {
        let stubs = RouterStubs {
            llm: Arc::new(StubGenerator::replying("Ringkasan:\n- Data analyst")),
            search: Arc::new(StubSearch::with_hits(vec![])),
            extractor: Arc::new(StubExtractor::text("Siti, SQL, Tableau")),
            ..RouterStubs::default()
        };
        let router = router_with(&stubs);

        let reply = router
            .handle_document_analysis(Path::new("/tmp/CV_SITI.PDF"))
            .await;

        assert_eq!(
            reply,
            format!("{DOCUMENT_BANNER}\n\nRingkasan:\n- Data analyst")
        );
    }

    #[tokio::test]
    async fn test_document_analysis_missing_file_gets_cv_apology() {
        let stubs = RouterStubs {
            extractor: Arc::new(StubExtractor::not_found()),
            ..RouterStubs::default()
        };
        let router = router_with(&stubs);

        let reply = router
            .handle_document_analysis(Path::new("/tmp/missing.pdf"))
            .await;

        assert_eq!(reply, format!("{DOCUMENT_BANNER}\n\n{CV_ANALYSIS_APOLOGY}"));
        assert_eq!(stubs.llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_analyze_data_skips_classification() {
        let stubs = RouterStubs::default();
        let router = router_with(&stubs);

        // No structured-analysis keyword at all.
        let envelope = router
            .analyze_data("Tampilkan 5 skill yang paling banyak dicari untuk data scientist")
            .await;

        assert_eq!(envelope.intent, Some(Intent::StructuredQuery));
        assert!(envelope.text.starts_with(Intent::StructuredQuery.banner()));
        assert!(envelope.text.contains("Ada 10 lowongan"));
        assert_eq!(stubs.executor.calls(), 1);
        assert_eq!(stubs.llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_analyze_data_still_refuses_mutations() {
        let stubs = RouterStubs::default();
        let router = router_with(&stubs);

        let envelope = router.analyze_data("delete semua lowongan lama").await;

        assert!(envelope.text.contains(REFUSAL_MESSAGE));
        assert_eq!(stubs.executor.calls(), 0);
    }

    #[tokio::test]
    async fn test_analyze_data_catches_panics() {
        let router = IntentRouter {
            structured: Arc::new(StructuredQueryResponder::new(Arc::new(PanickingExecutor))),
            ..router_with(&RouterStubs::default())
        };

        let envelope = router.analyze_data("Kota mana paling ramai?").await;

        assert_eq!(envelope.intent, None);
        assert!(envelope.text.starts_with(ROUTING_APOLOGY_HEADER));
    }

    #[test]
    fn test_routing_apology_is_tagged_unexpected() {
        let outcome = routing_apology("boom");
        assert!(matches!(
            outcome,
            Outcome::Failed {
                kind: FailureKind::Unexpected,
                ..
            }
        ));
        assert!(outcome.text().contains("Error: boom"));
    }

    #[tokio::test]
    async fn test_document_analysis_malformed_file_apologizes() {
        let stubs = RouterStubs {
            extractor: Arc::new(StubExtractor::malformed()),
            ..RouterStubs::default()
        };
        let router = router_with(&stubs);

        let reply = router
            .handle_document_analysis(Path::new("/tmp/broken.pdf"))
            .await;

        assert_eq!(reply, format!("{DOCUMENT_BANNER}\n\n{CV_ANALYSIS_APOLOGY}"));
        assert_eq!(stubs.llm.calls(), 0);
    }

    #[test]
    fn test_has_document_extension() {
        assert!(has_document_extension(Path::new("cv.pdf")));
        assert!(has_document_extension(Path::new("cv.Pdf")));
        assert!(!has_document_extension(Path::new("cv")));
        assert!(!has_document_extension(Path::new("cv.pdf.exe")));
    }
}
