//! Speech playback facade.
//!
//! [`SpeechController`] owns the playback worker thread and exposes the
//! whole speech surface as fire-and-forget calls. Every method returns
//! immediately; the worker picks commands up from the shared queue and
//! drives the engine on its own thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::command::Command;
use crate::config::SpeechConfig;
use crate::engine::SpeechEngine;
#[cfg(not(feature = "native"))]
use crate::engine::EspeakEngine;
#[cfg(feature = "native")]
use crate::engine::NativeEngine;
use crate::error::SpeechError;
use crate::queue::PlaybackQueue;
use crate::worker::Worker;

/// Handle to the playback worker thread.
///
/// Dropping the controller shuts the worker down; call [`shutdown`] first
/// for an orderly stop with a bounded wait.
///
/// [`shutdown`]: SpeechController::shutdown
pub struct SpeechController {
    queue: Arc<PlaybackQueue>,
    speaking: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    done_rx: Mutex<mpsc::Receiver<()>>,
    join_timeout: Duration,
    shut_down: bool,
}

impl SpeechController {
    /// Start a playback worker with the default engine for this build.
    pub fn spawn(config: SpeechConfig) -> Result<Self, SpeechError> {
        #[cfg(feature = "native")]
        {
            Self::spawn_with_engine(config, NativeEngine::new)
        }
        #[cfg(not(feature = "native"))]
        {
            Self::spawn_with_engine(config, EspeakEngine::new)
        }
    }

    /// Start a playback worker around an engine built by `factory`.
    ///
    /// The factory runs on the worker thread itself, so engines whose
    /// platform handles are not `Send` still work. Returns an error if the
    /// factory fails; the worker thread is gone by then.
    pub fn spawn_with_engine<E, F>(config: SpeechConfig, factory: F) -> Result<Self, SpeechError>
    where
        E: SpeechEngine + 'static,
        F: FnOnce() -> Result<E, SpeechError> + Send + 'static,
    {
        let queue = Arc::new(PlaybackQueue::new());
        let speaking = Arc::new(AtomicBool::new(false));
        let join_timeout = config.join_timeout;

        let (init_tx, init_rx) = mpsc::channel::<Result<(), SpeechError>>();
        let (done_tx, done_rx) = mpsc::channel::<()>();

        let worker_queue = Arc::clone(&queue);
        let worker_speaking = Arc::clone(&speaking);
        let handle = thread::Builder::new()
            .name("voxmail-speech".to_string())
            .spawn(move || {
                let engine = match factory() {
                    Ok(engine) => {
                        let _ = init_tx.send(Ok(()));
                        engine
                    }
                    Err(error) => {
                        let _ = init_tx.send(Err(error));
                        return;
                    }
                };
                Worker::new(engine, worker_queue, worker_speaking, config).run();
                let _ = done_tx.send(());
            })?;

        // Block until the engine is up or its construction failed.
        init_rx.recv().map_err(|_| SpeechError::WorkerGone)??;

        Ok(Self {
            queue,
            speaking,
            handle: Some(handle),
            done_rx: Mutex::new(done_rx),
            join_timeout,
            shut_down: false,
        })
    }

    /// Queue a one-shot announcement. No resume position is kept.
    pub fn speak(&self, text: impl Into<String>) {
        self.queue_speak(text.into(), false);
    }

    /// Queue an utterance that can be stopped and later continued from the
    /// word it was stopped at by speaking the same text again.
    pub fn speak_resumable(&self, text: impl Into<String>) {
        self.queue_speak(text.into(), true);
    }

    fn queue_speak(&self, text: String, resumable: bool) {
        if self.shut_down {
            return;
        }
        self.speaking.store(true, Ordering::SeqCst);
        self.queue.push(Command::Speak { text, resumable });
    }

    /// Cancel the current utterance and everything queued behind it.
    ///
    /// A stopped resumable utterance keeps its position; see
    /// [`speak_resumable`](Self::speak_resumable).
    pub fn stop(&self) {
        if self.shut_down {
            return;
        }
        self.speaking.store(false, Ordering::SeqCst);
        self.queue.purge();
        self.queue.push(Command::Stop);
    }

    /// Change the speaking rate, effective from the next chunk.
    pub fn set_rate(&self, wpm: u32) {
        if self.shut_down {
            return;
        }
        self.queue.push(Command::SetRate { wpm });
    }

    /// Forget any recorded resume position.
    pub fn reset_resumable(&self) {
        if self.shut_down {
            return;
        }
        self.queue.push(Command::ResetResumable);
    }

    /// Whether speech is in progress or has been requested.
    ///
    /// Reads speaking intent: true from the moment a speak call is made
    /// until the worker finishes the utterance or a stop lands.
    pub fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }

    /// Stop playback and wait for the worker to exit, bounded by the
    /// configured join timeout. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        self.speaking.store(false, Ordering::SeqCst);
        self.queue.purge();
        self.queue.push(Command::Stop);
        self.queue.push(Command::Shutdown);

        let done = self
            .done_rx
            .lock()
            .expect("worker done channel mutex poisoned")
            .recv_timeout(self.join_timeout);
        match done {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if let Some(handle) = self.handle.take() {
                    if handle.join().is_err() {
                        tracing::warn!("playback worker panicked");
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    timeout = ?self.join_timeout,
                    "playback worker did not stop in time; detaching"
                );
                self.handle.take();
            }
        }
    }
}

impl Drop for SpeechController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
