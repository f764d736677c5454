use scraper::Html;
use serde::Serialize;

use super::{selector, text_within, to_field, Fields};

const MAX_RESULTS: usize = 5;

#[derive(Serialize)]
struct SearchHit {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    snippet: String,
}

pub fn extract(doc: &Html) -> Fields {
    let mut out = Fields::new();
    out.insert("results".into(), to_field(&hits(doc)));
    out
}

fn hits(doc: &Html) -> Vec<SearchHit> {
    let (Some(block), Some(anchor)) = (selector(".g"), selector("a")) else { return Vec::new() };
    doc.select(&block)
        .filter_map(|g| {
            let title = text_within(g, "h3");
            if title.is_empty() { return None; }
            let link = g.select(&anchor).next().and_then(|a| a.value().attr("href")).map(str::to_string);
            Some(SearchHit { title, link, snippet: text_within(g, ".VwiC3b") })
        })
        .take(MAX_RESULTS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_five_titled_blocks() {
        let mut html = String::from("<html><body><div class=\"g\"><a href=\"/ad\">sponsored</a></div>");
        for i in 0..8 {
            html.push_str(&format!(
                "<div class=\"g\"><a href=\"https://r{i}.example\"><h3> Result {i} </h3></a><div class=\"VwiC3b\">snippet {i}</div></div>"
            ));
        }
        html.push_str("</body></html>");

        let f = extract(&Html::parse_document(&html));
        let results = f["results"].as_array().unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(results[0]["title"], "Result 0");
        assert_eq!(results[0]["link"], "https://r0.example");
        assert_eq!(results[4]["snippet"], "snippet 4");
    }

    #[test]
    fn link_is_omitted_without_anchor() {
        let html = "<div class=\"g\"><h3>Bare</h3></div>";
        let f = extract(&Html::parse_document(html));
        let first = &f["results"][0];
        assert_eq!(first["title"], "Bare");
        assert!(first.get("link").is_none());
        assert_eq!(first["snippet"], "");
    }
}
