//! Playback controller configuration.

use std::time::Duration;

/// Default speech rate in words per minute.
pub const DEFAULT_RATE_WPM: u32 = 130;

/// Default number of words per spoken chunk.
pub const DEFAULT_CHUNK_WORDS: usize = 20;

/// Default length in characters above which plain announcements are chunked.
pub const DEFAULT_LONG_TEXT_CHARS: usize = 200;

/// Default idle poll interval for the worker's command loop.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default time `shutdown` waits for the worker thread to exit.
pub const DEFAULT_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Configuration for [`SpeechController`](crate::SpeechController).
///
/// The defaults suit spoken email reading; chunk size trades interrupt
/// latency (a stop takes effect at the next chunk boundary) against the
/// audible seams between chunks.
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    pub(crate) rate_wpm: u32,
    pub(crate) chunk_words: usize,
    pub(crate) long_text_chars: usize,
    pub(crate) poll_interval: Duration,
    pub(crate) join_timeout: Duration,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate_wpm: DEFAULT_RATE_WPM,
            chunk_words: DEFAULT_CHUNK_WORDS,
            long_text_chars: DEFAULT_LONG_TEXT_CHARS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            join_timeout: DEFAULT_JOIN_TIMEOUT,
        }
    }
}

impl SpeechConfig {
    /// Set the initial speech rate in words per minute.
    #[must_use]
    pub const fn with_rate_wpm(mut self, wpm: u32) -> Self {
        self.rate_wpm = wpm;
        self
    }

    /// Set the number of words spoken per chunk.
    #[must_use]
    pub const fn with_chunk_words(mut self, words: usize) -> Self {
        self.chunk_words = words;
        self
    }

    /// Set the length above which plain announcements are chunked.
    #[must_use]
    pub const fn with_long_text_chars(mut self, chars: usize) -> Self {
        self.long_text_chars = chars;
        self
    }

    /// Set the worker's idle poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set how long `shutdown` waits for the worker thread.
    #[must_use]
    pub const fn with_join_timeout(mut self, timeout: Duration) -> Self {
        self.join_timeout = timeout;
        self
    }
}
