//! Speech synthesis backends.
//!
//! [`SpeechEngine`] is the seam between the playback worker and a concrete
//! synthesizer. Platform TTS handles are not reliably `Send`, so engines are
//! constructed inside the worker thread: callers hand a factory closure to
//! [`SpeechController::spawn_with_engine`](crate::SpeechController::spawn_with_engine)
//! and the engine itself never crosses a thread boundary.

mod espeak;
#[cfg(feature = "native")]
mod native;

pub use espeak::EspeakEngine;
#[cfg(feature = "native")]
pub use native::NativeEngine;

use crate::error::SpeechError;

/// A blocking speech synthesis backend driven by the playback worker.
///
/// The worker feeds one chunk at a time and relies on `say` returning only
/// when the chunk has been spoken; that blocking call is what gives the
/// chunk boundaries their meaning as interruption points.
pub trait SpeechEngine {
    /// Speak `text`, returning once playback has finished.
    fn say(&mut self, text: &str) -> Result<(), SpeechError>;

    /// Stop any audio the backend still has queued or playing.
    fn stop(&mut self) -> Result<(), SpeechError>;

    /// Set the speaking rate in words per minute.
    fn set_rate(&mut self, wpm: u32) -> Result<(), SpeechError>;
}

#[cfg(test)]
pub(crate) mod testing {
    //! Engine double for worker and controller tests.

    use std::sync::{Arc, Mutex};

    use super::SpeechEngine;
    use crate::error::SpeechError;

    /// Shared log of every engine call, in order.
    pub(crate) type CallLog = Arc<Mutex<Vec<String>>>;

    /// Records every call; optionally runs a callback inside `say` (to
    /// emulate commands arriving mid-utterance) or fails a scripted call.
    pub(crate) struct RecordingEngine {
        log: CallLog,
        on_say: Option<Box<dyn FnMut(usize) + Send>>,
        fail_at: Option<usize>,
        says: usize,
    }

    impl RecordingEngine {
        pub(crate) fn new() -> (Self, CallLog) {
            let log: CallLog = Arc::default();
            let engine = Self {
                log: Arc::clone(&log),
                on_say: None,
                fail_at: None,
                says: 0,
            };
            (engine, log)
        }

        /// Run `callback` with the 1-based call index inside every `say`.
        pub(crate) fn with_on_say(callback: impl FnMut(usize) + Send + 'static) -> (Self, CallLog) {
            let (mut engine, log) = Self::new();
            engine.on_say = Some(Box::new(callback));
            (engine, log)
        }

        /// Fail the `n`th `say` call (1-based) with a synthesis error.
        pub(crate) fn failing_at(n: usize) -> (Self, CallLog) {
            let (mut engine, log) = Self::new();
            engine.fail_at = Some(n);
            (engine, log)
        }
    }

    impl SpeechEngine for RecordingEngine {
        fn say(&mut self, text: &str) -> Result<(), SpeechError> {
            self.says += 1;
            self.log
                .lock()
                .unwrap()
                .push(format!("say:{text}"));
            if let Some(callback) = self.on_say.as_mut() {
                callback(self.says);
            }
            if self.fail_at == Some(self.says) {
                return Err(SpeechError::Synthesis("scripted failure".to_string()));
            }
            Ok(())
        }

        fn stop(&mut self) -> Result<(), SpeechError> {
            self.log.lock().unwrap().push("stop".to_string());
            Ok(())
        }

        fn set_rate(&mut self, wpm: u32) -> Result<(), SpeechError> {
            self.log.lock().unwrap().push(format!("rate:{wpm}"));
            Ok(())
        }
    }
}
