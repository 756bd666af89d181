//! Short-code store network client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Failure talking to the short-code store.
///
/// Callers treat every variant identically: fall back to the local
/// path. The distinction only matters for logs.
#[derive(Debug, Error)]
pub enum ShareApiError {
    #[error("share request failed")]
    Transport(#[from] reqwest::Error),

    #[error("share request failed with status {0}")]
    Status(reqwest::StatusCode),
}

/// The short-code store's two network operations.
#[automock]
#[async_trait]
pub trait ShareCodeApi: Send + Sync {
    /// Parks an encoded cart server-side, returning its short code.
    async fn put(&self, encoded: &str) -> Result<String, ShareApiError>;

    /// Fetches the encoded cart stored under `code`.
    async fn get(&self, code: &str) -> Result<String, ShareApiError>;
}

/// HTTP client for the shared-cart endpoints.
#[derive(Debug, Clone)]
pub struct HttpShareCodeApi {
    api_base: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct ShareCodeResponse {
    code: String,
}

#[derive(Debug, Deserialize)]
struct SharedCartResponse {
    encoded: String,
}

impl HttpShareCodeApi {
    /// Creates a client against an API base such as
    /// `"https://example.com/api"`.
    #[must_use]
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl ShareCodeApi for HttpShareCodeApi {
    async fn put(&self, encoded: &str) -> Result<String, ShareApiError> {
        let url = format!("{}/shared-cart/", self.api_base);
        let body = serde_json::json!({ "encoded": encoded });

        let response = self.http.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(ShareApiError::Status(response.status()));
        }

        let parsed: ShareCodeResponse = response.json().await?;

        Ok(parsed.code)
    }

    async fn get(&self, code: &str) -> Result<String, ShareApiError> {
        let url = format!("{}/shared-cart/{code}", self.api_base);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ShareApiError::Status(response.status()));
        }

        let parsed: SharedCartResponse = response.json().await?;

        Ok(parsed.encoded)
    }
}
