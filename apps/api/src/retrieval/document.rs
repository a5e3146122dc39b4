use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::retrieval::vector_store::SearchHit;

/// Source tag stamped on every item retrieved from the job collection.
pub const SOURCE_TAG: &str = "qdrant_job_dataset";
/// Descriptions longer than this are cut and marked with `...`.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Payload fields rendered into the item content, in display order.
const CONTENT_FIELDS: &[(&str, &str)] = &[
    ("title", "Posisi"),
    ("company", "Perusahaan"),
    ("description", "Deskripsi"),
    ("requirements", "Persyaratan"),
    ("salary_range", "Estimasi Gaji"),
    ("location", "Lokasi"),
    ("work_type", "Tipe Kerja"),
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItemMetadata {
    pub id: String,
    pub score: f32,
    pub source: String,
    /// Every payload field except the description, stringified.
    pub fields: BTreeMap<String, String>,
}

/// A retrieved job posting: display content plus metadata for reference.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RetrievedItem {
    pub content: String,
    pub metadata: ItemMetadata,
}

impl RetrievedItem {
    pub fn from_hit(hit: SearchHit) -> Self {
        let payload = hit.payload.unwrap_or_default();
        let content = render_content(&payload);

        let fields = payload
            .iter()
            .filter(|(k, _)| k.as_str() != "description")
            .map(|(k, v)| (k.clone(), value_to_string(v)))
            .collect();

        Self {
            content,
            metadata: ItemMetadata {
                id: value_to_string(&hit.id),
                score: hit.score,
                source: SOURCE_TAG.to_string(),
                fields,
            },
        }
    }
}

fn render_content(payload: &Map<String, Value>) -> String {
    CONTENT_FIELDS
        .iter()
        .filter_map(|(key, label)| {
            let value = value_to_string(payload.get(*key)?);
            let value = if *key == "description" {
                truncate_description(&value)
            } else {
                value
            };
            Some(format!("{label}: {value}"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_MAX_CHARS {
        let cut: String = text.chars().take(DESCRIPTION_MAX_CHARS).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
