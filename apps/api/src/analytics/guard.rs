/// Keywords that would mutate data. A data question containing any of them
/// (case-insensitive substring) is refused before any backend call.
pub const MUTATING_KEYWORDS: &[&str] = &["DROP", "DELETE", "INSERT", "UPDATE", "ALTER", "TRUNCATE"];

/// Returns the first mutating keyword found in `text`, if any.
pub fn find_mutating_keyword(text: &str) -> Option<&'static str> {
    let upper = text.to_uppercase();
    MUTATING_KEYWORDS
        .iter()
        .copied()
        .find(|kw| upper.contains(kw))
}

/// Accepts exactly one statement that starts with SELECT or WITH and
/// contains no mutating keyword.
pub fn is_single_read_statement(sql: &str) -> bool {
    let sql = sql.trim().trim_end_matches(';').trim();
    if sql.is_empty() || sql.contains(';') {
        return false;
    }
    let upper = sql.to_uppercase();
    let starts_with_read = upper.starts_with("SELECT") || upper.starts_with("WITH");
    starts_with_read && find_mutating_keyword(sql).is_none()
}
