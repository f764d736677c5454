use scraper::Html;
use serde_json::Value;

use super::{selector, text_of, Fields};

/// Fallback for sites without a dedicated rule: page title, plus the meta
/// description when the page has one.
pub fn extract(doc: &Html) -> Fields {
    let mut out = Fields::new();
    out.insert("pageTitle".into(), Value::String(text_of(doc, "title")));
    if let Some(desc) = meta_description(doc) {
        out.insert("description".into(), Value::String(desc));
    }
    out
}

fn meta_description(doc: &Html) -> Option<String> {
    let sel = selector(r#"meta[name="description"]"#)?;
    let node = doc.select(&sel).next()?;
    Some(node.value().attr("content")?.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_description() {
        let html = r#"<html><head><title> Example Domain </title>
            <meta name="description" content=" Illustrative examples. "></head></html>"#;
        let f = extract(&Html::parse_document(html));
        assert_eq!(f["pageTitle"], "Example Domain");
        assert_eq!(f["description"], "Illustrative examples.");
    }

    #[test]
    fn description_absent_when_no_meta() {
        let f = extract(&Html::parse_document("<title>Example</title>"));
        assert_eq!(Value::Object(f), serde_json::json!({ "pageTitle": "Example" }));
    }
}
