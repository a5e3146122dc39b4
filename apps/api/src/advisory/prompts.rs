// Career advice prompt templates and fixed messages.

use crate::llm_client::prompts::{PromptTemplate, ASSISTANT_SYSTEM};

/// CV analysis prompt. Replace `{cv_text}`.
pub const CV_ANALYSIS: PromptTemplate = PromptTemplate {
    name: "cv_analysis",
    system: ASSISTANT_SYSTEM,
    body: r#"Anda adalah Career Consultant profesional.
Berikut adalah teks CV pengguna:
{cv_text}

Berikan ringkasan singkat (2-3 kalimat), tiga rekomendasi posisi yang cocok,
dan tiga saran perbaikan CV atau skill yang perlu ditingkatkan.

Jawab dalam bahasa Indonesia dengan format:
Ringkasan:
- ...

Rekomendasi Posisi:
- ...

Saran:
- ..."#,
    temperature: 0.7,
};

/// General career advice prompt. Replace `{query}`.
pub const GENERAL_ADVICE: PromptTemplate = PromptTemplate {
    name: "general_advice",
    system: ASSISTANT_SYSTEM,
    body: r#"Anda adalah Career Consultant profesional. Berikan saran karir untuk pertanyaan berikut.

**PERTANYAAN:**
{query}

**PETUNJUK:**
1. Berikan saran yang praktis dan actionable
2. Sesuaikan dengan konteks pasar kerja Indonesia
3. Jika relevan, sarankan skill yang perlu dipelajari
4. Gunakan bahasa Indonesia yang jelas dan profesional
5. Jika memungkinkan, berikan contoh konkret

**JAWABAN ANDA:**"#,
    temperature: 0.7,
};

pub const RELATED_POSTINGS_HEADER: &str = "\n\nLowongan terkait:\n";
pub const RELATED_POSTINGS_SEPARATOR: &str = "\n---\n";

pub const CV_ANALYSIS_APOLOGY: &str =
    "Maaf, terjadi kesalahan saat menganalisis CV. Silakan coba lagi.";

pub const ADVICE_APOLOGY: &str =
    "Maaf, saya sedang tidak bisa memberikan saran karir. Silakan coba lagi nanti.";
