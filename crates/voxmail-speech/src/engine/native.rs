//! Platform speech synthesis through the `tts` crate.

use std::thread;
use std::time::{Duration, Instant};

use tts::Tts;

use super::SpeechEngine;
use crate::error::SpeechError;

/// Words-per-minute value the platform engines treat as their normal rate.
const NORMAL_RATE_WPM: u32 = 150;

/// Poll interval while waiting for an utterance to finish.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Speech engine backed by the platform TTS stack (Speech Dispatcher,
/// `AVFoundation`, SAPI).
///
/// The `tts` crate speaks asynchronously, so `say` polls `is_speaking`
/// until the utterance drains. Backends that cannot report utterance state
/// fall back to a duration estimate from the current rate.
pub struct NativeEngine {
    tts: Tts,
    rate_wpm: u32,
}

impl NativeEngine {
    /// Initialise the default platform TTS engine.
    pub fn new() -> Result<Self, SpeechError> {
        let tts = Tts::default().map_err(|e| SpeechError::EngineInit(e.to_string()))?;
        Ok(Self {
            tts,
            rate_wpm: NORMAL_RATE_WPM,
        })
    }

    fn estimate_duration(&self, text: &str) -> Duration {
        let words = u64::try_from(text.split_whitespace().count()).unwrap_or(u64::MAX);
        let wpm = u64::from(self.rate_wpm.max(1));
        Duration::from_millis((words.saturating_mul(60_000) / wpm).max(400))
    }

    /// Block until the engine reports the utterance finished.
    fn wait_until_done(&self, text: &str) {
        let estimate = self.estimate_duration(text);

        // Give the engine a moment to start before the first poll.
        thread::sleep(POLL_INTERVAL);

        let deadline = Instant::now() + estimate * 2 + Duration::from_secs(2);
        while Instant::now() < deadline {
            match self.tts.is_speaking() {
                Ok(true) => thread::sleep(POLL_INTERVAL),
                Ok(false) => return,
                Err(_) => {
                    // No utterance tracking on this platform; trust the estimate.
                    thread::sleep(estimate.saturating_sub(POLL_INTERVAL));
                    return;
                }
            }
        }
    }
}

impl SpeechEngine for NativeEngine {
    fn say(&mut self, text: &str) -> Result<(), SpeechError> {
        self.tts
            .speak(text, false)
            .map_err(|e| SpeechError::Synthesis(e.to_string()))?;
        self.wait_until_done(text);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), SpeechError> {
        self.tts
            .stop()
            .map(|_| ())
            .map_err(|e| SpeechError::Synthesis(e.to_string()))
    }

    #[allow(clippy::cast_precision_loss)]
    fn set_rate(&mut self, wpm: u32) -> Result<(), SpeechError> {
        self.rate_wpm = wpm.max(1);

        // 150 wpm maps to the engine's normal rate; scale linearly and clamp
        // to the engine's supported range.
        let scaled = self.tts.normal_rate() * (self.rate_wpm as f32 / NORMAL_RATE_WPM as f32);
        let clamped = scaled.clamp(self.tts.min_rate(), self.tts.max_rate());
        self.tts
            .set_rate(clamped)
            .map(|_| ())
            .map_err(|e| SpeechError::Synthesis(e.to_string()))
    }
}
