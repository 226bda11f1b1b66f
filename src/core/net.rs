// src/core/net.rs
// Blocking HTTP GET over one pooled client.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::FetchError;

/// Anything that can turn a URL into a page body.
/// Shared across crawl workers, hence `Send + Sync`.
pub trait Fetch: Send + Sync {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

/// Real transport: keeps connections alive between requests to the same host,
/// sends a fixed User-Agent and enforces a per-request timeout.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let inner = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Fetch for HttpClient {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        let t = std::time::Instant::now();
        let resp = self
            .inner
            .get(url)
            .send()
            .map_err(|e| FetchError::transport(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }

        let body = resp.text().map_err(|e| FetchError::Body {
            url: s!(url),
            message: e.to_string(),
        })?;
        logd!("GET {url} -> {} ({} bytes) in {:?}", status.as_u16(), body.len(), t.elapsed());
        Ok(body)
    }
}
