use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use serde_json::{Map, Value};

mod crtsh;
mod generic;
mod github;
mod google;
mod hunter;
mod whois;

pub type Fields = Map<String, Value>;

/// A site-specific extraction rule, keyed on a URL substring.
pub struct SiteRule {
    pub signal: &'static str,
    pub extract: fn(&Html) -> Fields,
}

impl SiteRule {
    pub fn matches(&self, url: &str) -> bool { url.contains(self.signal) }
}

// Evaluated in order; first match wins.
pub const RULES: &[SiteRule] = &[
    SiteRule { signal: "github.com", extract: github::extract },
    SiteRule { signal: "crt.sh", extract: crtsh::extract },
    SiteRule { signal: "who.is", extract: whois::extract },
    SiteRule { signal: "google.com/search", extract: google::extract },
    SiteRule { signal: "hunter.io", extract: hunter::extract },
];

pub fn rule_for(url: &str) -> Option<&'static SiteRule> {
    RULES.iter().find(|r| r.matches(url))
}

pub fn extract(url: &str, doc: &Html) -> Fields {
    match rule_for(url) {
        Some(rule) => (rule.extract)(doc),
        None => generic::extract(doc),
    }
}

fn selector(s: &str) -> Option<Selector> { Selector::parse(s).ok() }

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

// Text of every match, concatenated then trimmed; "" when nothing matches.
fn text_of(doc: &Html, sel: &str) -> String {
    let Some(sel) = selector(sel) else { return String::new() };
    doc.select(&sel).flat_map(|el| el.text()).collect::<String>().trim().to_string()
}

fn text_within(el: ElementRef<'_>, sel: &str) -> String {
    let Some(sel) = selector(sel) else { return String::new() };
    el.select(&sel).flat_map(|e| e.text()).collect::<String>().trim().to_string()
}

fn to_field<T: Serialize>(v: &T) -> Value {
    serde_json::to_value(v).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins() {
        assert_eq!(rule_for("https://github.com/octocat").map(|r| r.signal), Some("github.com"));
        assert_eq!(rule_for("https://crt.sh/?q=example.com").map(|r| r.signal), Some("crt.sh"));
        assert_eq!(rule_for("https://www.google.com/search?q=x").map(|r| r.signal), Some("google.com/search"));
        assert!(rule_for("https://google.com/maps").is_none());
        assert!(rule_for("https://example.com").is_none());
    }

    #[test]
    fn unknown_site_uses_fallback() {
        let doc = Html::parse_document("<html><head><title>Example</title></head><body></body></html>");
        let fields = extract("https://example.com/search?q=a", &doc);
        assert_eq!(fields.get("pageTitle").and_then(Value::as_str), Some("Example"));
        assert!(fields.get("description").is_none());
        assert_eq!(fields.len(), 1);
    }
}
