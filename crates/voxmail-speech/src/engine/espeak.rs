//! Subprocess speech through `espeak-ng`.

use std::process::{Command, Stdio};

use super::SpeechEngine;
use crate::error::SpeechError;

/// Speech engine that shells out to `espeak-ng`.
///
/// Each `say` runs one synthesizer process to completion, so the blocking
/// contract holds by construction and `stop` has nothing to cut off. This
/// backend needs no audio bindings at all, which makes it the fallback when
/// the platform TTS stack is unavailable.
pub struct EspeakEngine {
    binary: String,
    rate_wpm: u32,
}

impl EspeakEngine {
    /// Probe for `espeak-ng` on `PATH` and build the engine.
    pub fn new() -> Result<Self, SpeechError> {
        Self::with_binary("espeak-ng")
    }

    /// Like [`EspeakEngine::new`] with an explicit binary name or path.
    pub fn with_binary(binary: &str) -> Result<Self, SpeechError> {
        let status = Command::new(binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| SpeechError::EngineInit(format!("cannot run {binary}: {e}")))?;

        if !status.success() {
            return Err(SpeechError::EngineInit(format!(
                "{binary} --version exited with {status}"
            )));
        }

        Ok(Self {
            binary: binary.to_string(),
            rate_wpm: crate::config::DEFAULT_RATE_WPM,
        })
    }
}

impl SpeechEngine for EspeakEngine {
    fn say(&mut self, text: &str) -> Result<(), SpeechError> {
        let status = Command::new(&self.binary)
            .arg("-s")
            .arg(self.rate_wpm.to_string())
            .arg("--")
            .arg(text)
            .status()?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Synthesis(format!(
                "{} exited with {status}",
                self.binary
            )))
        }
    }

    fn stop(&mut self) -> Result<(), SpeechError> {
        // Synchronous backend: nothing plays outside of say().
        Ok(())
    }

    fn set_rate(&mut self, wpm: u32) -> Result<(), SpeechError> {
        self.rate_wpm = wpm.max(1);
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_fails_initialization() {
        let result = EspeakEngine::with_binary("/definitely/not/a/synthesizer");
        assert!(matches!(result, Err(SpeechError::EngineInit(_))));
    }

    #[test]
    fn say_runs_the_binary_to_completion() {
        // `true` accepts any arguments and exits 0, standing in for a
        // synthesizer without making noise in CI.
        let mut engine = EspeakEngine::with_binary("true").unwrap();
        engine.set_rate(160).unwrap();
        engine.say("hello there").unwrap();
        engine.stop().unwrap();
    }
}
