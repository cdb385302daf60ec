//! HTTP client for a running contact relay.
//!
//! Configuration is via environment variables:
//! - `FOLIO_URL` - Base URL (default: `http://127.0.0.1:3000`)

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::api::{ContactReceipt, ErrorBody};
use crate::models::ContactMessage;

/// Default URL for local development.
const DEFAULT_URL: &str = "http://127.0.0.1:3000";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// Client that submits contact messages the way the site's form does.
#[derive(Debug, Clone)]
pub struct RelayClient {
    base_url: String,
    client: Client,
}

impl RelayClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("FOLIO_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a message. Returns the relay's confirmation text.
    pub async fn send_contact(&self, message: &ContactMessage) -> Result<String, ClientError> {
        let response = self
            .client
            .post(format!("{}/contact", self.base_url))
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let receipt: ContactReceipt = response.json().await?;
            return Ok(receipt.message);
        }

        let body = response.text().await.unwrap_or_default();
        let error = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        match status {
            StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(error)),
            _ => Err(ClientError::Server(format!("{}: {}", status, error))),
        }
    }
}
