use scraper::Html;
use serde_json::Value;

use super::{text_of, Fields};

const MAX_RAW_CHARS: usize = 1000;

pub fn extract(doc: &Html) -> Fields {
    let raw: String = text_of(doc, ".query_results_container").chars().take(MAX_RAW_CHARS).collect();
    let mut out = Fields::new();
    out.insert("raw".into(), Value::String(raw));
    out
}
