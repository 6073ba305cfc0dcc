//! Error types for Gmail API operations.

use thiserror::Error;

/// Result type alias for Gmail operations.
pub type GmailResult<T> = Result<T, GmailError>;

/// Errors related to Gmail API operations.
#[derive(Debug, Error)]
pub enum GmailError {
    /// API request failed with an HTTP error status.
    #[error("Gmail API request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from the Gmail API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// The requested message was not found.
    #[error("Message '{id}' not found in this mailbox")]
    MessageNotFound {
        /// The message ID that was not found
        id: String,
    },

    /// Authorization is missing, expired beyond repair, or was rejected.
    #[error("Gmail authorization required: {reason}")]
    AuthRequired {
        /// What is missing and where to start
        reason: String,
    },

    /// A message body could not be decoded.
    #[error("Could not decode message body: {0}")]
    BodyDecode(#[from] base64::DecodeError),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Credential or token file access failed.
    #[error("Credential storage error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_request_failed_mentions_status_and_url() {
        let error = GmailError::ApiRequestFailed {
            status: 403,
            url: "https://gmail.googleapis.com/gmail/v1/users/me/messages".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("403"));
        assert!(msg.contains("gmail.googleapis.com"));
    }

    #[test]
    fn message_not_found_mentions_the_id() {
        let error = GmailError::MessageNotFound {
            id: "18c2a1f0aa1b2c3d".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("18c2a1f0aa1b2c3d"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn auth_required_carries_the_reason() {
        let error = GmailError::AuthRequired {
            reason: "no stored token".to_string(),
        };
        assert!(error.to_string().contains("no stored token"));
    }

    #[test]
    fn invalid_response_carries_the_message() {
        let error = GmailError::InvalidResponse {
            message: "message has no payload".to_string(),
        };
        assert!(error.to_string().contains("no payload"));
    }
}
