//! HTTP client for the MadDash document store
//!
//! A run acquires one access token and shares one client for every write.
//! Requests time out after [`REQUEST_TIMEOUT_SECS`] and are never retried
//! here; a failed request fails the run.

use crate::api::{endpoints, types::TokenResponse};
use crate::error::{IngestError, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

// ============================================================================
// API Client Constants
// ============================================================================

/// Per-request timeout for the token service and the document store
pub const REQUEST_TIMEOUT_SECS: u64 = 5;

fn http_client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}

/// Ask the token service for a credential that can write to production
pub async fn fetch_token(token_url: &str) -> Result<String> {
    let url = endpoints::token_url(token_url);
    debug!(url = %url, scope = endpoints::TOKEN_SCOPE, "Requesting access token");

    let response = http_client()?
        .get(&url)
        .query(&[("scope", endpoints::TOKEN_SCOPE)])
        .send()
        .await
        .map_err(|e| IngestError::auth(format!("request to {} failed ({})", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(IngestError::auth(format!("{} returned status {}", url, status)));
    }

    let body: TokenResponse = response
        .json()
        .await
        .map_err(|e| IngestError::auth(format!("unreadable response from {} ({})", url, e)))?;

    body.access
        .ok_or_else(|| IngestError::auth(format!("response from {} has no 'access' field", url)))
}

/// Authenticated client bound to the document store
#[derive(Debug, Clone)]
pub struct DbmsClient {
    client: Client,
    base_url: String,
    token: String,
}

impl DbmsClient {
    /// Create a client that sends `token` as its bearer credential
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.into(),
            token: token.into(),
        })
    }

    /// Fetch a token from `token_url`, then bind a client to `dbms_url`
    pub async fn acquire(token_url: &str, dbms_url: &str) -> Result<Self> {
        let token = fetch_token(token_url).await?;
        info!(dbms_url = %dbms_url, "Acquired access token");
        Self::new(dbms_url, token)
    }

    /// POST `body` as JSON to `path`, returning the acknowledgement.
    ///
    /// An empty success body acknowledges as `null`; a body that isn't JSON
    /// is passed back as a string.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<serde_json::Value> {
        let url = endpoints::dbms_url(&self.base_url, path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(IngestError::Publish {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
