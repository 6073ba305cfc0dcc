//! Configuration for the Gmail client.
//!
//! [`GmailClientConfig`] is the stable public surface; the internal
//! [`GmailConfig`] is derived from it with the endpoint URLs parsed.

use std::time::Duration;

use url::Url;

/// Configuration for the Gmail client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use voxmail_gmail::GmailClientConfig;
/// use std::time::Duration;
///
/// let config = GmailClientConfig::new()
///     .with_timeout(Duration::from_secs(60))
///     .with_access_token("ya29.example");
/// ```
#[derive(Debug, Clone)]
pub struct GmailClientConfig {
    /// Base URL for the Gmail REST API
    pub(crate) base_url: String,
    /// OAuth token endpoint used for refresh
    pub(crate) token_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// OAuth access token sent as a bearer credential
    pub(crate) access_token: Option<String>,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for GmailClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gmail.googleapis.com/gmail/v1".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            user_agent: concat!("voxmail/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            access_token: None,
            max_retries: 3,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl GmailClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL for the Gmail REST API.
    ///
    /// Defaults to `https://gmail.googleapis.com/gmail/v1`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the OAuth token endpoint used for access token refresh.
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the OAuth access token used to authorize API requests.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 3 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    ///
    /// Defaults to 500ms.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }
}

/// Internal configuration with the endpoint URLs parsed.
#[derive(Debug, Clone)]
pub(crate) struct GmailConfig {
    pub(crate) base_url: Url,
    pub(crate) token_url: Url,
    pub(crate) user_agent: String,
    pub(crate) timeout: Duration,
    pub(crate) access_token: Option<String>,
    pub(crate) max_retries: u8,
    pub(crate) retry_base_delay_ms: u64,
}

impl GmailConfig {
    pub(crate) fn from_public(config: &GmailClientConfig) -> Self {
        let defaults = GmailClientConfig::default();
        Self {
            base_url: Url::parse(&config.base_url).unwrap_or_else(|_| {
                Url::parse(&defaults.base_url).expect("default URL is valid")
            }),
            token_url: Url::parse(&config.token_url).unwrap_or_else(|_| {
                Url::parse(&defaults.token_url).expect("default URL is valid")
            }),
            user_agent: config.user_agent.clone(),
            timeout: config.timeout,
            access_token: config.access_token.clone(),
            max_retries: config.max_retries,
            #[allow(clippy::cast_possible_truncation)] // Duration milliseconds won't exceed u64 in practice
            retry_base_delay_ms: config.retry_base_delay.as_millis() as u64,
        }
    }
}

#[cfg(test)]
impl Default for GmailConfig {
    fn default() -> Self {
        Self::from_public(&GmailClientConfig::default())
    }
}
