//! Mail message domain type.
//!
//! Headers arrive as raw strings from the provider; `Message` owns the
//! parsing rules the views rely on (send-date parsing with a raw fallback,
//! list-line formatting, the spoken summary).

use chrono::{DateTime, FixedOffset, Local};

/// A single mail message with headers extracted and the body already
/// reduced to plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Provider-side message id.
    pub id: String,
    /// Raw `From` header value, e.g. `Alice Example <alice@example.com>`.
    pub sender: String,
    /// `Subject` header value.
    pub subject: String,
    /// Raw `Date` header value, kept for display when parsing fails.
    pub date_raw: String,
    /// Parsed send date, `None` when the header is not valid RFC 2822.
    pub sent_at: Option<DateTime<FixedOffset>>,
    /// Plain-text body.
    pub body: String,
}

impl Message {
    /// Build a message from extracted header values and a plain-text body.
    ///
    /// An unparseable `Date` header is not an error; the raw value is kept
    /// and shown as-is.
    #[must_use]
    pub fn new(id: String, sender: String, subject: String, date_raw: String, body: String) -> Self {
        let sent_at = DateTime::parse_from_rfc2822(&date_raw).ok();
        Self {
            id,
            sender,
            subject,
            date_raw,
            sent_at,
            body,
        }
    }

    /// Mailbox index row in the classic mutt style.
    pub fn list_line(&self) -> String {
        format!(
            "Date:{}  From:{}  Subject:{}",
            self.date_display(),
            self.sender,
            self.subject
        )
    }

    /// Send date for the list view: local time in `asctime` form, or the
    /// raw header when it did not parse.
    pub fn date_display(&self) -> String {
        match self.sent_at {
            Some(sent) => sent
                .with_timezone(&Local)
                .format("%a %b %e %H:%M:%S %Y")
                .to_string(),
            None => self.date_raw.clone(),
        }
    }

    /// Full send date for the detail view, keeping the sender's UTC offset.
    pub fn date_full(&self) -> String {
        match self.sent_at {
            Some(sent) => sent.format("%a, %d %b %Y %H:%M:%S %z").to_string(),
            None => self.date_raw.clone(),
        }
    }

    /// One-line spoken summary used when scrolling the mailbox list.
    pub fn speech_summary(&self) -> String {
        format!("From {}. Subject: {}.", self.sender_name(), self.subject)
    }

    /// Display name from the `From` header, without the address part.
    ///
    /// Falls back to the bare address when the header has no display name.
    pub fn sender_name(&self) -> &str {
        match self.sender.split_once('<') {
            Some((name, address)) => {
                let name = name.trim().trim_matches('"').trim();
                if name.is_empty() {
                    address.trim_end().trim_end_matches('>')
                } else {
                    name
                }
            }
            None => self.sender.trim(),
        }
    }

    /// Plain-text body.
    pub fn body_text(&self) -> &str {
        &self.body
    }
}
