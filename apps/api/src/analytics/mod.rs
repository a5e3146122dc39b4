// Structured data analysis over the job-posting database.
// All SQL is generated and run by the executor; the responder never sees it.

pub mod executor;
pub mod guard;
pub mod handlers;
pub mod prompts;
pub mod responder;

pub use executor::SqlQueryExecutor;
pub use responder::StructuredQueryResponder;

/// Quick-analysis questions offered by the data analysis mode: (title, question).
pub const ANALYSIS_PRESETS: &[(&str, &str)] = &[
    (
        "💰 Gaji Rata-rata",
        "Berapa rata-rata gaji untuk software engineer di Indonesia?",
    ),
    (
        "📍 Lokasi Populer",
        "Kota apa yang memiliki paling banyak lowongan IT?",
    ),
    (
        "🏢 Perusahaan Top",
        "Perusahaan apa yang paling banyak membuka lowongan?",
    ),
    (
        "📈 Trend Remote",
        "Berapa persentase lowongan yang remote vs hybrid vs onsite?",
    ),
];
