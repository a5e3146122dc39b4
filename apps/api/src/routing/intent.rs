use std::fmt;

use serde::{Deserialize, Serialize};

/// The category a query is classified into; decides which responder runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    SemanticSearch,
    StructuredQuery,
    Advisory,
}

impl Intent {
    pub const ALL: [Intent; 3] = [
        Intent::SemanticSearch,
        Intent::StructuredQuery,
        Intent::Advisory,
    ];

    /// Category used whenever classification is uncertain or fails: the most
    /// general responder.
    pub const FAIL_OPEN_DEFAULT: Intent = Intent::SemanticSearch;

    /// Literal label the classification model must answer with.
    pub fn label(self) -> &'static str {
        match self {
            Intent::SemanticSearch => "SEMANTIC_SEARCH",
            Intent::StructuredQuery => "STRUCTURED_QUERY",
            Intent::Advisory => "ADVISORY",
        }
    }

    /// Exact match against the three labels, after trimming and uppercasing.
    pub fn from_label(raw: &str) -> Option<Intent> {
        let normalized = raw.trim().to_uppercase();
        Intent::ALL
            .into_iter()
            .find(|intent| intent.label() == normalized)
    }

    /// Human-readable banner placed above the responder output.
    pub fn banner(self) -> &'static str {
        match self {
            Intent::SemanticSearch => "🔍 **Hasil Pencarian Lowongan:**",
            Intent::StructuredQuery => "📊 **Analisis Data:**",
            Intent::Advisory => "💼 **Konsultasi Karir:**",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().replace('_', " "))
    }
}

/// Minimum keyword hits for the rule pass to decide on its own.
pub const RULE_THRESHOLD: usize = 2;

const STRUCTURED_QUERY_TERMS: &[&str] = &[
    "gaji",
    "salary",
    "rata-rata",
    "statistik",
    "analisis",
    "trend",
    "perbandingan",
    "tertinggi",
    "terendah",
    "berapa banyak",
    "jumlah",
    "persentase",
    "distribusi",
    "histori",
    "tahun",
    "bulan",
];

const SEMANTIC_SEARCH_TERMS: &[&str] = &[
    "lowongan",
    "pekerjaan",
    "job",
    "cari kerja",
    "perusahaan",
    "posisi",
    "vacancy",
    "opening",
    "hire",
    "rekrutmen",
    "deskripsi",
    "persyaratan",
    "kualifikasi",
    "lamaran",
    "apply",
];

const ADVISORY_TERMS: &[&str] = &[
    "karir",
    "career",
    "saran",
    "advice",
    "konsultasi",
    "consult",
    "skill",
    "keahlian",
    "development",
    "pengembangan",
    "fresh graduate",
    "senior",
    "junior",
    "promosi",
    "resume",
    "cv",
    "interview",
];

/// Per-intent keyword hit counts for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeywordScores {
    pub semantic_search: usize,
    pub structured_query: usize,
    pub advisory: usize,
}

impl KeywordScores {
    pub fn get(&self, intent: Intent) -> usize {
        match intent {
            Intent::SemanticSearch => self.semantic_search,
            Intent::StructuredQuery => self.structured_query,
            Intent::Advisory => self.advisory,
        }
    }

    /// The intent whose score strictly beats both others and reaches the
    /// threshold. Ties, including all-zero, yield `None`.
    pub fn decisive(&self) -> Option<Intent> {
        Intent::ALL.into_iter().find(|&candidate| {
            let score = self.get(candidate);
            score >= RULE_THRESHOLD
                && Intent::ALL
                    .into_iter()
                    .filter(|&other| other != candidate)
                    .all(|other| score > self.get(other))
        })
    }
}

/// Static trigger terms per intent, matched as case-insensitive substrings.
#[derive(Debug, Clone)]
pub struct KeywordScoreTable {
    semantic_search: &'static [&'static str],
    structured_query: &'static [&'static str],
    advisory: &'static [&'static str],
}

impl Default for KeywordScoreTable {
    fn default() -> Self {
        Self {
            semantic_search: SEMANTIC_SEARCH_TERMS,
            structured_query: STRUCTURED_QUERY_TERMS,
            advisory: ADVISORY_TERMS,
        }
    }
}

impl KeywordScoreTable {
    pub fn terms(&self, intent: Intent) -> &'static [&'static str] {
        match intent {
            Intent::SemanticSearch => self.semantic_search,
            Intent::StructuredQuery => self.structured_query,
            Intent::Advisory => self.advisory,
        }
    }

    pub fn score(&self, query: &str) -> KeywordScores {
        let lowered = query.to_lowercase();
        let count = |intent: Intent| {
            self.terms(intent)
                .iter()
                .filter(|term| lowered.contains(*term))
                .count()
        };
        KeywordScores {
            semantic_search: count(Intent::SemanticSearch),
            structured_query: count(Intent::StructuredQuery),
            advisory: count(Intent::Advisory),
        }
    }
}
