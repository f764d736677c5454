use scraper::Html;
use serde_json::Value;

use super::{text_of, Fields};

const NO_PUBLIC_DATA: &str = "No public data found without API key.";

pub fn extract(doc: &Html) -> Fields {
    let text = text_of(doc, ".search-results");
    let info = if text.is_empty() { NO_PUBLIC_DATA.to_string() } else { text };
    let mut out = Fields::new();
    out.insert("info".into(), Value::String(info));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_results_fall_back_to_notice() {
        let f = extract(&Html::parse_document("<div class=\"search-results\">   </div>"));
        assert_eq!(f["info"], NO_PUBLIC_DATA);
    }

    #[test]
    fn results_text_is_trimmed() {
        let f = extract(&Html::parse_document("<div class=\"search-results\">\n 3 emails found \n</div>"));
        assert_eq!(f["info"], "3 emails found");
    }
}
