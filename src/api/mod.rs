pub mod outcome;

use crate::config::{ApiConfig, HttpConfig};
use crate::error::EtlError;
use crate::models::{AuthToken, StockSeries};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for the persistence API: one login, then one bearer-authenticated
/// POST per symbol.
pub struct ApiClient {
    inner: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: Option<String>,
}

impl ApiClient {
    pub fn new(http: &HttpConfig, api: &ApiConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .user_agent(&http.user_agent)
            .timeout(Duration::from_secs(http.timeout_secs))
            .gzip(true)
            .build()
            .context("Failed to build API client")?;

        let base_url = api.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .with_context(|| format!("Invalid API base URL {:?}", api.base_url))?;

        Ok(Self { inner, base_url })
    }

    /// `Url::join` would drop a path prefix on the base URL, so endpoints
    /// are built by concatenation.
    fn endpoint(&self, path: &str) -> Result<Url, EtlError> {
        let joined = format!("{}{}", self.base_url, path);
        Url::parse(&joined).map_err(|e| EtlError::transport(joined.as_str(), e))
    }

    /// Exchange credentials for a bearer token. Called exactly once per run;
    /// the token is never renewed — a long-lived process must restart.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthToken, EtlError> {
        let url = self.endpoint("/api/login_check")?;
        debug!("POST {}", url);

        let resp = self
            .inner
            .post(url)
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(|e| EtlError::auth(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(EtlError::auth(format!("login_check answered HTTP {}", status)));
        }

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| EtlError::auth(format!("decoding login response: {}", e)))?;

        body.token
            .map(AuthToken::new)
            .ok_or_else(|| EtlError::auth("token field missing from login response"))
    }

    /// POST one symbol's whole remaining series in a single request.
    /// Returns the status and body for interpretation; non-success statuses
    /// are an outcome to report, not an error to raise.
    pub async fn submit(
        &self,
        symbol: &str,
        records: &StockSeries,
        token: &AuthToken,
    ) -> Result<(u16, String), EtlError> {
        let url = self.endpoint(&format!("/api/stocks/{}", symbol))?;
        debug!("POST {} ({} records)", url, records.len());

        let resp = self
            .inner
            .post(url.clone())
            .bearer_auth(token.as_str())
            .json(records)
            .send()
            .await
            .map_err(|e| EtlError::transport(url.as_str(), e))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| EtlError::transport(url.as_str(), format!("reading body: {}", e)))?;

        Ok((status, body))
    }
}
