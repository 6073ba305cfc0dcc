//! Settings types, validation and JSON persistence.
//!
//! All fields are optional so a hand-edited settings file only needs the
//! keys the user cares about; everything else falls back to the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default speech rate in words per minute.
pub const DEFAULT_RATE_WPM: u32 = 130;

/// Default number of inbox messages fetched at startup.
pub const DEFAULT_FETCH_LIMIT: u32 = 25;

/// Default number of words spoken per chunk when reading a message body.
pub const DEFAULT_CHUNK_WORDS: usize = 20;

/// Default length in characters above which plain announcements are chunked.
pub const DEFAULT_LONG_TEXT_CHARS: usize = 200;

/// Largest fetch limit the Gmail list endpoint will be asked for.
pub const MAX_FETCH_LIMIT: u32 = 500;

/// Application settings structure.
///
/// All fields are optional to support sparse settings files and graceful
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Speech rate in words per minute.
    pub rate_wpm: Option<u32>,

    /// Whether moving the mailbox cursor announces the selected message.
    pub speak_on_scroll: Option<bool>,

    /// Whether message bodies show full URLs instead of a `[URL]` marker.
    pub show_urls: Option<bool>,

    /// How many inbox messages to fetch at startup (1-500).
    pub fetch_limit: Option<u32>,

    /// Words per spoken chunk when reading a message body.
    pub chunk_words: Option<usize>,

    /// Announcements longer than this many characters are chunked too.
    pub long_text_chars: Option<usize>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            rate_wpm: Some(DEFAULT_RATE_WPM),
            speak_on_scroll: Some(true),
            show_urls: Some(false),
            fetch_limit: Some(DEFAULT_FETCH_LIMIT),
            chunk_words: Some(DEFAULT_CHUNK_WORDS),
            long_text_chars: Some(DEFAULT_LONG_TEXT_CHARS),
        }
    }

    /// Get the effective speech rate (with default fallback).
    #[must_use]
    pub const fn effective_rate_wpm(&self) -> u32 {
        match self.rate_wpm {
            Some(rate) => rate,
            None => DEFAULT_RATE_WPM,
        }
    }

    /// Get the effective speak-on-scroll flag (with default fallback).
    #[must_use]
    pub const fn effective_speak_on_scroll(&self) -> bool {
        match self.speak_on_scroll {
            Some(flag) => flag,
            None => true,
        }
    }

    /// Get the effective show-URLs flag (with default fallback).
    #[must_use]
    pub const fn effective_show_urls(&self) -> bool {
        match self.show_urls {
            Some(flag) => flag,
            None => false,
        }
    }

    /// Get the effective startup fetch limit (with default fallback).
    #[must_use]
    pub const fn effective_fetch_limit(&self) -> u32 {
        match self.fetch_limit {
            Some(limit) => limit,
            None => DEFAULT_FETCH_LIMIT,
        }
    }

    /// Get the effective chunk size in words (with default fallback).
    #[must_use]
    pub const fn effective_chunk_words(&self) -> usize {
        match self.chunk_words {
            Some(words) => words,
            None => DEFAULT_CHUNK_WORDS,
        }
    }

    /// Get the effective long-announcement threshold (with default fallback).
    #[must_use]
    pub const fn effective_long_text_chars(&self) -> usize {
        match self.long_text_chars {
            Some(chars) => chars,
            None => DEFAULT_LONG_TEXT_CHARS,
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Speech rate must be greater than zero")]
    ZeroRate,

    #[error("Chunk size must be at least one word")]
    ZeroChunkWords,

    #[error("Fetch limit must be between 1 and {max}, got {0}", max = MAX_FETCH_LIMIT)]
    InvalidFetchLimit(u32),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.rate_wpm == Some(0) {
        return Err(SettingsError::ZeroRate);
    }

    if settings.chunk_words == Some(0) {
        return Err(SettingsError::ZeroChunkWords);
    }

    if let Some(limit) = settings.fetch_limit {
        if !(1..=MAX_FETCH_LIMIT).contains(&limit) {
            return Err(SettingsError::InvalidFetchLimit(limit));
        }
    }

    Ok(())
}

/// Error reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsFileError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load settings from `path`.
///
/// A missing file is not an error: first runs get the defaults, and the
/// file is only created once something saves it.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsFileError> {
    if !path.exists() {
        return Ok(Settings::with_defaults());
    }
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Save settings to `path` as pretty-printed JSON.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), SettingsFileError> {
    let contents = serde_json::to_string_pretty(settings)?;
    fs::write(path, contents)?;
    Ok(())
}
