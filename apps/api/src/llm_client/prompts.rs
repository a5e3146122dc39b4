// Shared prompt plumbing and cross-cutting prompt fragments.
// Each responder defines its own prompts.rs alongside it.

/// A prompt body with `{name}` placeholders plus the system prompt and
/// sampling temperature it is sent with.
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub system: &'static str,
    pub body: &'static str,
    pub temperature: f32,
}

impl PromptTemplate {
    /// Fills `{name}` placeholders in a single pass. Substituted values are
    /// never re-scanned, so user text containing braces stays literal.
    /// Unknown placeholders are left untouched.
    pub fn render(&self, vars: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.body.len());
        let mut rest = self.body;

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let value = after.find('}').and_then(|end| {
                let key = &after[..end];
                vars.iter()
                    .find(|(k, _)| *k == key)
                    .map(|(_, v)| (end, *v))
            });
            match value {
                Some((end, v)) => {
                    out.push_str(v);
                    rest = &after[end + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// System prompt fragment used by every Indonesian-facing responder.
pub const ASSISTANT_SYSTEM: &str = "You are an AI career assistant for the Indonesian job market. \
    Answer in clear, professional Indonesian. \
    Be concise and never fabricate job postings, companies or numbers.";

/// Common instruction embedded in every prompt that receives retrieved context.
pub const GROUNDING_INSTRUCTION: &str = "\
    ATURAN KETAT:\n\
    1. HANYA gunakan informasi dari context di bawah.\n\
    2. JANGAN membuat informasi yang tidak ada di context.\n\
    3. Jika context tidak memuat jawabannya, katakan \
    \"Berdasarkan data yang ada, saya tidak menemukan informasi tersebut\".";
