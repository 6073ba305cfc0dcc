//! URL construction helpers for the Gmail REST API.
//!
//! Pure functions so every API call builds its URL the same way.

use crate::config::GmailConfig;
use url::Url;

/// Hard ceiling the Gmail list endpoint accepts for `maxResults`.
const MAX_RESULTS_CEILING: u32 = 500;

/// Build the inbox listing URL.
pub(crate) fn build_list_url(config: &GmailConfig, max_results: u32) -> Url {
    let mut url = config.base_url.clone();

    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/users/me/messages"));
    url.set_query(Some(&format!(
        "labelIds=INBOX&maxResults={}",
        max_results.clamp(1, MAX_RESULTS_CEILING)
    )));

    url
}

/// Build the URL for a single message, requesting the full payload.
pub(crate) fn build_message_url(config: &GmailConfig, id: &str) -> Url {
    let mut url = config.base_url.clone();

    let base_path = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base_path}/users/me/messages/{id}"));
    url.set_query(Some("format=full"));

    url
}
