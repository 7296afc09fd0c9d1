//! HTTP client for the external presence source.
//!
//! Configuration is via environment variables:
//! - `STAFFDIR_PRESENCE_URL` - Base URL of the presence API
//! - `STAFFDIR_PRESENCE_TOKEN_URL` - Token endpoint for client acquisition
//!   (optional; when unset, requests are sent unauthenticated)

use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::Presence;

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:17021/v1.0";

/// Presence source failure. Per-lookup errors are absorbed to offline by the
/// enricher; `Auth` failures fail the whole pass, which keeps last-known
/// statuses instead.
#[derive(Debug, Error)]
pub enum PresenceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Presence source returned {0}")]
    Status(u16),

    #[error("Client acquisition failed: {0}")]
    Auth(String),
}

/// A source of per-employee availability.
#[async_trait]
pub trait PresenceSource: Send + Sync {
    /// Prepare the source for one enrichment pass (e.g. refresh credentials).
    ///
    /// An error here fails the pass as a whole; the caller leaves all
    /// statuses at their last-known values.
    async fn prepare(&self) -> Result<(), PresenceError>;

    /// Look up availability for one email address. Exactly one request per
    /// call; the caller never retries within a pass.
    async fn availability(&self, email: &str) -> Result<Presence, PresenceError>;
}

#[derive(Debug, Deserialize)]
struct PresencePayload {
    #[serde(default)]
    availability: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
    access_token: String,
}

/// HTTP client for the presence API.
pub struct HttpPresenceClient {
    base_url: String,
    token_url: Option<String>,
    token: Mutex<Option<String>>,
    client: Client,
}

impl HttpPresenceClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("STAFFDIR_PRESENCE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let token_url = std::env::var("STAFFDIR_PRESENCE_TOKEN_URL").ok();
        Self::new(base_url, token_url)
    }

    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, token_url: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token_url,
            token: Mutex::new(None),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl PresenceSource for HttpPresenceClient {
    async fn prepare(&self) -> Result<(), PresenceError> {
        let Some(ref token_url) = self.token_url else {
            return Ok(());
        };

        let response = self
            .client
            .post(token_url)
            .send()
            .await
            .map_err(|e| PresenceError::Auth(e.to_string()))?;
        if !response.status().is_success() {
            return Err(PresenceError::Auth(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let payload: TokenPayload = response
            .json()
            .await
            .map_err(|e| PresenceError::Auth(e.to_string()))?;
        *self.token.lock().expect("token lock poisoned") = Some(payload.access_token);
        Ok(())
    }

    async fn availability(&self, email: &str) -> Result<Presence, PresenceError> {
        let url = format!("{}/users/{}/presence", self.base_url, email);
        let mut req = self.client.get(&url);
        if let Some(ref token) = *self.token.lock().expect("token lock poisoned") {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PresenceError::Status(status.as_u16()));
        }

        let payload: PresencePayload = response.json().await?;
        // Unrecognized or missing tokens collapse to offline, never an error.
        Ok(payload
            .availability
            .as_deref()
            .map(Presence::from_token)
            .unwrap_or(Presence::Offline))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_tokens_map_to_presence() {
        assert_eq!(Presence::from_token("Available"), Presence::Available);
        assert_eq!(Presence::from_token("busy"), Presence::Busy);
        assert_eq!(Presence::from_token("AWAY"), Presence::Away);
    }

    #[test]
    fn unrecognized_tokens_default_to_offline() {
        assert_eq!(Presence::from_token("BusyInACall"), Presence::Offline);
        assert_eq!(Presence::from_token("DoNotDisturb"), Presence::Offline);
        assert_eq!(Presence::from_token(""), Presence::Offline);
    }
}
