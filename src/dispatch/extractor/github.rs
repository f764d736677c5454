use scraper::Html;
use serde_json::Value;

use super::{element_text, selector, text_of, text_within, Fields};

pub fn extract(doc: &Html) -> Fields {
    let mut out = Fields::new();
    out.insert("title".into(), Value::String(text_of(doc, "title")));
    out.insert("bio".into(), Value::String(text_of(doc, ".p-note.user-profile-bio")));
    out.insert("location".into(), Value::String(text_of(doc, r#".p-label[itemprop="homeLocation"]"#)));
    out.insert("followers".into(), Value::String(counter(doc, "followers")));
    out.insert("following".into(), Value::String(counter(doc, "following")));
    out
}

// Profile counters are `.Link--secondary` links whose label names the
// counter; the number sits in a nested `.text-bold`.
fn counter(doc: &Html, label: &str) -> String {
    let Some(link) = selector(".Link--secondary") else { return String::new() };
    doc.select(&link)
        .filter(|el| element_text(*el).contains(label))
        .map(|el| text_within(el, ".text-bold"))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE: &str = r#"
    <html><head><title>octocat (The Octocat) · GitHub</title></head><body>
      <div class="p-note user-profile-bio"><div>  Tentacles everywhere.  </div></div>
      <span class="p-label" itemprop="homeLocation">San Francisco</span>
      <a class="Link--secondary" href="/octocat?tab=followers"><span class="text-bold">12.4k</span> followers</a>
      <a class="Link--secondary" href="/octocat?tab=following"><span class="text-bold">9</span> following</a>
    </body></html>
    "#;

    #[test]
    fn profile_fields() {
        let doc = Html::parse_document(PROFILE);
        let f = extract(&doc);
        assert_eq!(f["title"], "octocat (The Octocat) · GitHub");
        assert_eq!(f["bio"], "Tentacles everywhere.");
        assert_eq!(f["location"], "San Francisco");
        assert_eq!(f["followers"], "12.4k");
        assert_eq!(f["following"], "9");
    }

    #[test]
    fn missing_bio_is_empty_string() {
        let doc = Html::parse_document("<html><head><title>ghost</title></head><body></body></html>");
        let f = extract(&doc);
        assert_eq!(f["bio"], Value::String(String::new()));
        assert_eq!(f["location"], "");
        assert_eq!(f["followers"], "");
        assert_eq!(f["following"], "");
    }
}
