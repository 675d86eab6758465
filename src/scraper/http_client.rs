use crate::config::HttpConfig;
use crate::error::EtlError;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            // Accept cookies so session-based pages work
            .cookie_store(true)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { inner })
    }

    /// Fetch a URL as text. Single attempt: the scheduler re-invokes the
    /// whole process, so a failed fetch simply fails this run's symbol.
    pub async fn get_text(&self, url: &str) -> Result<String, EtlError> {
        debug!("GET {}", url);

        let resp = self
            .inner
            .get(url)
            .send()
            .await
            .map_err(|e| EtlError::transport(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EtlError::transport(url, format!("HTTP {}", status)));
        }

        resp.text()
            .await
            .map_err(|e| EtlError::transport(url, format!("reading body: {}", e)))
    }
}
