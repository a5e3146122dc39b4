// Prompt templates and fixed messages for the structured data responder.

use crate::llm_client::prompts::{PromptTemplate, ASSISTANT_SYSTEM};

pub const SQL_GENERATION_SYSTEM: &str = "You translate questions about an Indonesian job-posting database \
    into PostgreSQL. You MUST respond with valid JSON only. \
    Do NOT use markdown code fences. Do NOT include explanations.";

/// Schema description embedded in the SQL generation prompt.
pub const JOBS_SCHEMA: &str = "\
Table jobs:
- id INTEGER PRIMARY KEY
- title TEXT NOT NULL
- company TEXT NOT NULL
- location TEXT
- salary_min INTEGER (IDR per month)
- salary_max INTEGER (IDR per month)
- work_type TEXT (Full-time | Hybrid | Remote)
- posted_date DATE
- description TEXT";

/// Replace `{schema}` and `{question}`. Expected reply: `{"sql": "..."}`.
pub const SQL_GENERATION: PromptTemplate = PromptTemplate {
    name: "sql_generation",
    system: SQL_GENERATION_SYSTEM,
    body: r#"Write ONE read-only PostgreSQL query that answers the question.

RULES:
1. ONLY a single SELECT (a WITH ... SELECT is allowed).
2. NEVER use DROP, DELETE, INSERT, UPDATE, ALTER or TRUNCATE.
3. Use ILIKE for location and title matching.

SCHEMA:
{schema}

EXAMPLES:
Question: "Rata-rata gaji di Jakarta"
{"sql": "SELECT AVG((salary_min + salary_max) / 2) AS avg_salary FROM jobs WHERE location ILIKE '%Jakarta%'"}

Question: "Top 5 perusahaan dengan gaji tertinggi"
{"sql": "SELECT company, AVG((salary_min + salary_max) / 2) AS avg_salary FROM jobs GROUP BY company ORDER BY avg_salary DESC LIMIT 5"}

Question: {question}
Return exactly: {"sql": "<query>"}"#,
    temperature: 0.0,
};

/// Replace `{question}` and `{rows}`.
pub const RESULT_SUMMARY: PromptTemplate = PromptTemplate {
    name: "result_summary",
    system: ASSISTANT_SYSTEM,
    body: r#"Pertanyaan user: {question}

Data hasil query (JSON):
{rows}

Jawab pertanyaan user hanya berdasarkan data di atas, dalam bahasa Indonesia yang natural.
Format angka dengan pemisah ribuan (contoh: 10.000.000).
Jika data kosong, katakan bahwa data tidak ditemukan."#,
    temperature: 0.0,
};

pub const REFUSAL_MESSAGE: &str =
    "Maaf, saya hanya diperbolehkan membaca data, tidak bisa mengubah atau menghapus data.";

pub const DATA_DISCLAIMER: &str =
    "\n\n📊 *Data berdasarkan database lowongan pekerjaan Indonesia*";

/// Label prefixes some backends put in front of the answer.
pub const ANSWER_PREFIXES: &[&str] = &["Final Answer: ", "Answer: ", "Jawaban: "];
