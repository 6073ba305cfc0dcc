//! Wire types for the Gmail REST API.
//!
//! Field names follow the API's camelCase JSON; unknown fields are ignored
//! so schema additions on Google's side stay harmless.

use serde::Deserialize;

/// One page of the message list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessageList {
    #[serde(default)]
    pub(crate) messages: Vec<MessageRef>,
}

/// Reference to a message, as returned by the list endpoint.
///
/// Carries only identifiers; fetch the message itself for content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRef {
    /// The immutable message ID.
    pub id: String,
    /// The conversation this message belongs to.
    #[serde(default)]
    pub thread_id: String,
}

/// A full message as returned with `format=full`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireMessage {
    pub(crate) id: String,
    pub(crate) payload: Option<MessagePart>,
}

/// A MIME part: the top-level payload or any nested part.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MessagePart {
    #[serde(default)]
    pub(crate) mime_type: String,
    #[serde(default)]
    pub(crate) headers: Vec<Header>,
    pub(crate) body: Option<PartBody>,
    #[serde(default)]
    pub(crate) parts: Vec<MessagePart>,
}

impl MessagePart {
    /// First header with the given name, compared case-insensitively.
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case(name))
            .map(|header| header.value.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Header {
    pub(crate) name: String,
    pub(crate) value: String,
}

/// Part content; `data` is base64url-encoded when present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PartBody {
    pub(crate) data: Option<String>,
}
