//! HTTP client for the remote authentication endpoint.
//!
//! Credentials are POSTed as JSON; the endpoint answers with a camelCase
//! `AuthResult`. 401/403 mean the pair was rejected, which is an answer,
//! not a failure.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use reqwest::{header, Client, Url};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::ApiError;
use crate::auth::{AuthProvider, AuthProviderError};
use crate::models::AuthResult;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    is_authenticated: bool,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default, deserialize_with = "deserialize_valid_to")]
    valid_to: Option<DateTime<Utc>>,
    #[serde(default)]
    role: Option<String>,
}

/// Parse an expiry timestamp. Servers that drop the offset send
/// times like `2025-01-01T00:00:00`, which are read as UTC; a bare date means
/// midnight UTC.
fn parse_valid_to(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_valid_to<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => parse_valid_to(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid validTo: {}", raw))),
    }
}

impl AuthResponse {
    fn into_result(self, requested_username: &str) -> Result<AuthResult, ApiError> {
        let username = self
            .username
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| requested_username.to_string());

        if !self.is_authenticated {
            return Ok(AuthResult::rejected(username));
        }

        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::InvalidResponse("missing token".to_string()))?;
        let valid_to = self
            .valid_to
            .ok_or_else(|| ApiError::InvalidResponse("missing validTo".to_string()))?;

        Ok(AuthResult::accepted(
            username,
            token,
            valid_to,
            self.role.unwrap_or_default(),
        ))
    }
}

/// `AuthProvider` talking to a JSON authentication endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpAuthProvider {
    client: Client,
    auth_url: Url,
}

impl HttpAuthProvider {
    pub fn new(auth_url: &str, timeout: Duration) -> Result<Self> {
        let auth_url = Url::parse(auth_url)
            .map_err(|e| anyhow::anyhow!("Invalid auth URL {}: {}", auth_url, e))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, auth_url })
    }

    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    async fn post_credentials(&self, username: &str, password: &str) -> Result<AuthResult, ApiError> {
        let response = self
            .client
            .post(self.auth_url.clone())
            .header(header::ACCEPT, "application/json")
            .json(&AuthRequest { username, password })
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "Authentication response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status, &body);
            if err.is_credential_rejection() {
                return Ok(AuthResult::rejected(username));
            }
            return Err(err);
        }

        let body = response.text().await?;
        let parsed: AuthResponse = serde_json::from_str(&body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse auth response: {}", e)))?;
        parsed.into_result(username)
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthResult, AuthProviderError> {
        Ok(self.post_credentials(username, password).await?)
    }
}
