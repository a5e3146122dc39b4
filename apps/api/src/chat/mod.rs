// HTTP chat surface: the chat endpoint, CV upload, example questions and
// per-session history (export / clear).

pub mod handlers;
pub mod history;

pub use history::ChatHistory;

/// Suggested questions shown to new users.
pub const EXAMPLE_QUESTIONS: &[&str] = &[
    "Cari lowongan backend developer di Jakarta dengan gaji di atas 10 juta",
    "Apa persyaratan untuk menjadi data scientist?",
    "Perusahaan apa yang sedang mencari product manager?",
    "Berapa rata-rata gaji software engineer di Bali?",
    "Skill apa yang paling dicari untuk digital marketing?",
    "Tampilkan lowongan remote untuk graphic designer",
    "Bagaimana perkembangan karir untuk fresh graduate IT?",
    "Apa bedanya frontend dan backend developer?",
];
