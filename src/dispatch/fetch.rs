use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::ACCEPT;

/// Desktop browser UA sent with every outbound request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),

    #[error("HTTP Error: {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("invalid JSON in response body: {0}")]
    Decode(String),

    #[error("request aborted: no response within {}s", .0.as_secs())]
    Aborted(Duration),
}

pub struct FetchRequest<'a> {
    pub url: &'a str,
    pub accept: Option<&'static str>,
}

pub struct FetchResponse {
    pub status: u16,
    pub reason: String,
    pub body: Bytes,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }

    pub fn into_status_error(self) -> FetchError {
        FetchError::Status { status: self.status, reason: self.reason }
    }
}

/// Single-shot GET. Non-2xx responses are returned as-is; callers decide
/// what a bad status means for them.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, req: FetchRequest<'_>) -> Result<FetchResponse, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, req: FetchRequest<'_>) -> Result<FetchResponse, FetchError> {
        let mut builder = self.client.get(req.url);
        if let Some(accept) = req.accept { builder = builder.header(ACCEPT, accept); }

        let resp = builder.send().await.map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| FetchError::Body(e.to_string()))?;
        Ok(FetchResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body,
        })
    }
}
