// Prompt templates for the semantic job search responder.

use crate::llm_client::prompts::{PromptTemplate, ASSISTANT_SYSTEM};

/// Grounded answer prompt. Replace `{context}` and `{question}`.
pub const GROUNDED_ANSWER: PromptTemplate = PromptTemplate {
    name: "grounded_answer",
    system: ASSISTANT_SYSTEM,
    body: r#"Anda adalah Career Assistant yang membantu mencari lowongan pekerjaan.

{grounding}

**CONTEXT (Data Lowongan):**
{context}

**PERTANYAAN USER:**
{question}

**JAWABAN ANDA:**"#,
    temperature: 0.0,
};

pub const NO_RESULTS_MESSAGE: &str = "Maaf, saya tidak menemukan lowongan yang sesuai dengan kriteria Anda. \
    Coba gunakan kata kunci yang lebih spesifik atau perjelas bidang yang Anda cari.";

pub const SEARCH_DISCLAIMER: &str = "\n\n📌 *Catatan: Informasi berdasarkan data lowongan yang tersedia. \
    Hubungi perusahaan langsung untuk detail lengkap.*";

pub const GENERATION_APOLOGY: &str =
    "Maaf, terjadi kesalahan dalam memproses permintaan Anda. Silakan coba lagi.";
