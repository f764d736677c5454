use std::time::Duration;

use scraper::Html;
use serde_json::{json, Value};
use tokio::time::{timeout, Instant};
use tracing::{debug, warn};

use crate::tool::types::Tool;

pub mod extractor;
pub mod fetch;
pub mod types;

use fetch::{FetchError, FetchRequest, Fetcher};
use types::{Method, ToolResult};

/// Literal token in a tool's URL template that receives the encoded query.
pub const QUERY_PLACEHOLDER: &str = "<query>";

/// Upper bound on an API lookup, enforced by dropping the in-flight request.
pub const API_TIMEOUT: Duration = Duration::from_secs(10);

const SCRAPE_FAILED_NOTE: &str = "Scraping failed, displaying direct link.";

pub fn substitute_query(template: &str, query: &str) -> String {
    template.replacen(QUERY_PLACEHOLDER, &urlencoding::encode(query), 1)
}

/// Resolves one tool + query into one `ToolResult`. Never fails: transport,
/// status and body problems are folded into the result.
pub struct Dispatcher<F: Fetcher> {
    fetcher: F,
}

impl<F: Fetcher> Dispatcher<F> {
    pub fn new(fetcher: F) -> Self { Self { fetcher } }

    pub async fn execute(&self, tool: &Tool, query: &str) -> ToolResult {
        match Method::parse(&tool.method) {
            Some(Method::Api) => self.run_api(tool, query).await,
            Some(Method::Web) => self.run_web(tool, query).await,
            None => {
                debug!(tool = %tool.name, method = %tool.method, "unsupported method");
                ToolResult::unsupported(&tool.name, &tool.method.to_ascii_lowercase())
            }
        }
    }

    async fn run_api(&self, tool: &Tool, query: &str) -> ToolResult {
        let url = substitute_query(&tool.url, query);
        let started = Instant::now();

        let outcome = self.fetch_json(&url).await;
        let elapsed = elapsed_ms(started);

        match outcome {
            Ok(data) => ToolResult::success(&tool.name, Method::Api, data, elapsed),
            Err(e) => {
                debug!(tool = %tool.name, url = %url, error = %e, "api lookup failed");
                ToolResult::error(&tool.name, Method::Api, e.to_string(), elapsed)
            }
        }
    }

    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        let req = FetchRequest { url, accept: Some("application/json") };
        let resp = match timeout(API_TIMEOUT, self.fetcher.get(req)).await {
            Ok(res) => res?,
            Err(_) => return Err(FetchError::Aborted(API_TIMEOUT)),
        };
        if !resp.is_success() { return Err(resp.into_status_error()); }
        serde_json::from_slice(&resp.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    // Scrape failures of any kind still yield a success carrying the link.
    async fn run_web(&self, tool: &Tool, query: &str) -> ToolResult {
        let url = substitute_query(&tool.url, query);
        let started = Instant::now();

        let data = match self.fetch_html(&url).await {
            Ok(html) => Value::Object(scrape(&url, &html)),
            Err(e) => {
                warn!(tool = %tool.name, url = %url, error = %e, "scrape failed; returning direct link");
                json!({ "url": url, "note": SCRAPE_FAILED_NOTE })
            }
        };
        ToolResult::success(&tool.name, Method::Web, data, elapsed_ms(started))
    }

    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.fetcher.get(FetchRequest { url, accept: None }).await?;
        if !resp.is_success() { return Err(resp.into_status_error()); }
        Ok(String::from_utf8_lossy(&resp.body).into_owned())
    }
}

fn scrape(url: &str, html: &str) -> extractor::Fields {
    let doc = Html::parse_document(html);
    let mut data = extractor::Fields::new();
    data.insert("url".into(), Value::String(url.to_string()));
    data.extend(extractor::extract(url, &doc));
    data
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
