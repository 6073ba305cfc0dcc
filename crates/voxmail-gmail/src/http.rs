//! HTTP backend abstraction for the Gmail API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest with automatic retry logic for transient errors.

use crate::config::GmailConfig;
use crate::error::{GmailError, GmailResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can talk to the Gmail and OAuth endpoints.
///
/// This abstraction allows for dependency injection of HTTP clients,
/// making it easy to test code that depends on HTTP requests.
///
/// This is an implementation detail - external code should use `DefaultGmailClient`.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> GmailResult<T>;

    /// POST a form body (used for OAuth token refresh) and return the JSON
    /// response.
    async fn post_form(
        &self,
        url: &Url,
        params: &[(&str, &str)],
    ) -> GmailResult<serde_json::Value>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for transient server errors (5xx) and
/// rate limiting (429). Authorization failures and missing messages map to
/// their own error variants so callers can react to them.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay_ms: u64,
    access_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub(crate) fn new(config: &GmailConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay_ms: config.retry_base_delay_ms,
            access_token: config.access_token.clone(),
        }
    }

    /// Build a request with bearer authorization when a token is present.
    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url.as_str());
        if let Some(ref token) = self.access_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    /// Fetch a URL with automatic retry for transient errors.
    async fn fetch_with_retry(&self, url: &Url) -> GmailResult<reqwest::Response> {
        let mut last_error: Option<GmailError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(
                    self.retry_base_delay_ms * 2u64.pow(u32::from(attempt) - 1),
                );
                tokio::time::sleep(delay).await;
            }

            match self.build_request(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    // 5xx and rate limiting are retryable
                    if (status.is_server_error() || status.as_u16() == 429)
                        && attempt < self.max_retries
                    {
                        last_error = Some(GmailError::ApiRequestFailed {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                        continue;
                    }

                    // Rejected credentials are not retryable
                    if status.as_u16() == 401 {
                        return Err(GmailError::AuthRequired {
                            reason: "the Gmail API rejected the access token".to_string(),
                        });
                    }

                    // 404 is a special case
                    if status.as_u16() == 404 {
                        if let Some(id) = extract_message_id_from_path(url.path()) {
                            return Err(GmailError::MessageNotFound { id });
                        }
                    }

                    // Remaining 4xx errors or final attempt - fail immediately
                    return Err(GmailError::ApiRequestFailed {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    // Network errors are retryable
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| GmailError::InvalidResponse {
            message: "Unknown error during fetch".to_string(),
        }))
    }
}

/// Try to extract a message ID from an API path.
fn extract_message_id_from_path(path: &str) -> Option<String> {
    let (_, rest) = path.split_once("/messages/")?;
    let id = rest.split('/').next()?;
    (!id.is_empty()).then(|| id.to_string())
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> GmailResult<T> {
        let response = self.fetch_with_retry(url).await?;
        let data: T = response.json().await?;
        Ok(data)
    }

    async fn post_form(
        &self,
        url: &Url,
        params: &[(&str, &str)],
    ) -> GmailResult<serde_json::Value> {
        let response = self.client.post(url.as_str()).form(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GmailError::ApiRequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json().await?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
