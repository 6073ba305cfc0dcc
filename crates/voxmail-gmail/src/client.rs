//! Gmail client for listing the inbox and fetching messages.

use voxmail_core::Message;

use crate::body::extract_body;
use crate::config::{GmailClientConfig, GmailConfig};
use crate::error::{GmailError, GmailResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::types::{MessageList, MessageRef, WireMessage};
use crate::url::{build_list_url, build_message_url};

/// Default Gmail client using the reqwest HTTP backend.
pub type DefaultGmailClient = GmailClient<ReqwestBackend>;

/// Client for the Gmail REST API.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultGmailClient` for production code. The generic parameter `B`
/// is an implementation detail - external code should not instantiate this
/// directly but use `DefaultGmailClient::new()`.
pub struct GmailClient<B: HttpBackend> {
    backend: B,
    config: GmailConfig,
}

impl DefaultGmailClient {
    /// Create a new client with the given configuration.
    ///
    /// The configuration should carry an access token; requests without
    /// one are rejected by the API.
    #[must_use]
    pub fn new(config: &GmailClientConfig) -> Self {
        let internal = GmailConfig::from_public(config);
        let backend = ReqwestBackend::new(&internal);
        Self {
            backend,
            config: internal,
        }
    }
}

impl<B: HttpBackend> GmailClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: GmailConfig, backend: B) -> Self {
        Self { backend, config }
    }

    /// List the newest inbox messages, up to `max_results` of them.
    ///
    /// Returns only message references; fetch each message for content.
    pub async fn list_inbox(&self, max_results: u32) -> GmailResult<Vec<MessageRef>> {
        let url = build_list_url(&self.config, max_results);
        let list: MessageList = self.backend.get_json(&url).await?;
        Ok(list.messages)
    }

    /// Fetch one message and reduce it to the reader's [`Message`].
    ///
    /// Missing headers fall back to placeholders rather than failing, so a
    /// malformed message still shows up in the mailbox.
    pub async fn fetch_message(&self, id: &str) -> GmailResult<Message> {
        let url = build_message_url(&self.config, id);
        let wire: WireMessage = self.backend.get_json(&url).await?;

        let payload = wire.payload.ok_or_else(|| GmailError::InvalidResponse {
            message: format!("message {id} has no payload"),
        })?;

        let sender = payload.header("From").unwrap_or("Unknown Sender").to_string();
        let subject = payload.header("Subject").unwrap_or("No Subject").to_string();
        let date_raw = payload.header("Date").unwrap_or_default().to_string();
        let body = extract_body(&payload)?;

        Ok(Message::new(wire.id, sender, subject, date_raw, body))
    }
}
