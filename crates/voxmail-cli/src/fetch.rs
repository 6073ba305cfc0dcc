//! Inbox loading with a progress bar and spoken progress.
//!
//! Fetching runs before the reader takes over the terminal, so progress can
//! draw on stderr via indicatif. When loading is slow the progress is also
//! announced out loud, on the original cadence: nothing before three
//! seconds, then at most one announcement every four seconds.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use voxmail_core::Message;
use voxmail_gmail::{DefaultGmailClient, GmailError, GmailResult};
use voxmail_speech::SpeechController;

/// Progress is never spoken before this much time has passed.
const ANNOUNCE_AFTER: Duration = Duration::from_secs(3);

/// Minimum gap between spoken progress announcements.
const ANNOUNCE_GAP: Duration = Duration::from_secs(4);

/// Fetch up to `limit` inbox messages.
///
/// A message that disappears between the list call and its fetch is
/// skipped with a warning; any other fetch error aborts the load.
pub async fn load_inbox(
    gmail: &DefaultGmailClient,
    speech: &SpeechController,
    limit: u32,
) -> GmailResult<Vec<Message>> {
    let refs = gmail.list_inbox(limit).await?;
    let total = refs.len();

    let bar = ProgressBar::new(total as u64);
    bar.set_style(progress_style());
    bar.set_message("Fetching emails");

    let started = Instant::now();
    let mut last_announced = started;

    let mut messages = Vec::with_capacity(total);
    for reference in &refs {
        match gmail.fetch_message(&reference.id).await {
            Ok(message) => messages.push(message),
            Err(GmailError::MessageNotFound { id }) => {
                tracing::warn!(%id, "message vanished between list and fetch; skipping");
            }
            Err(error) => {
                bar.abandon();
                return Err(error);
            }
        }
        bar.inc(1);

        if should_announce(started.elapsed(), last_announced.elapsed()) {
            speech.speak(format!("Loaded {} of {} emails.", messages.len(), total));
            last_announced = Instant::now();
        }
    }

    bar.finish_and_clear();
    Ok(messages)
}

/// Whether a spoken progress update is due.
///
/// `since_last` counts from the start of the fetch until the first
/// announcement goes out.
fn should_announce(elapsed: Duration, since_last: Duration) -> bool {
    elapsed > ANNOUNCE_AFTER && since_last > ANNOUNCE_GAP
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("█▓░")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_while_the_fetch_is_young() {
        assert!(!should_announce(
            Duration::from_secs(2),
            Duration::from_secs(2)
        ));
    }

    #[test]
    fn first_announcement_needs_both_gates() {
        // Past the startup delay but not the announcement gap
        assert!(!should_announce(
            Duration::from_millis(3500),
            Duration::from_millis(3500)
        ));
        assert!(should_announce(
            Duration::from_secs(5),
            Duration::from_secs(5)
        ));
    }

    #[test]
    fn repeat_announcements_respect_the_gap() {
        assert!(!should_announce(
            Duration::from_secs(10),
            Duration::from_secs(2)
        ));
        assert!(should_announce(
            Duration::from_secs(10),
            Duration::from_millis(4100)
        ));
    }
}
