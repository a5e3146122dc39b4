// Router prompt templates and fixed messages.

use crate::llm_client::prompts::PromptTemplate;

pub const CLASSIFICATION_SYSTEM: &str = "You are a routing classifier. \
    Respond with exactly one label and nothing else.";

/// Fallback classification prompt. Replace `{query}`.
pub const CLASSIFICATION: PromptTemplate = PromptTemplate {
    name: "intent_classification",
    system: CLASSIFICATION_SYSTEM,
    body: r#"Anda adalah Router AI yang mengklasifikasikan pertanyaan user ke kategori yang tepat.

**PERTANYAAN USER:**
{query}

**KATEGORI YANG TERSEDIA:**
1. SEMANTIC_SEARCH - Pertanyaan tentang lowongan pekerjaan, deskripsi kerja, persyaratan, perusahaan, atau pencarian pekerjaan berdasarkan kriteria.
   Contoh: "Cari lowongan backend developer di Jakarta", "Apa persyaratan untuk data scientist?"

2. STRUCTURED_QUERY - Pertanyaan yang membutuhkan analisis data, statistik, perbandingan, atau query numerik.
   Contoh: "Berapa rata-rata gaji software engineer?", "Tampilkan 5 kota dengan gaji tertinggi"

3. ADVISORY - Pertanyaan tentang konsultasi karir, pengembangan skill, atau saran profesional.
   Contoh: "Bagaimana cara meningkatkan skill Python?", "Saran karir untuk fresh graduate IT"

**HANYA respon dengan salah satu dari: SEMANTIC_SEARCH, STRUCTURED_QUERY, ADVISORY**"#,
    temperature: 0.0,
};

pub const ROUTING_APOLOGY_HEADER: &str =
    "❌ Maaf, terjadi kesalahan dalam memproses permintaan Anda.";
pub const ROUTING_APOLOGY_FOOTER: &str =
    "Silakan coba dengan pertanyaan yang berbeda atau lebih spesifik.";

pub const DOCUMENT_BANNER: &str = "📄 **Analisis CV & Rekomendasi Karir:**";
pub const UNSUPPORTED_DOCUMENT_MESSAGE: &str =
    "❌ File harus dalam format PDF. Silakan upload file PDF yang valid.";

/// Recognized document extensions for CV analysis.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];
