//! Playback worker: the single thread that owns the speech engine.
//!
//! The worker is the only code that touches the engine or the resume
//! cursor. It polls the command queue with a timeout when idle and checks
//! it once per chunk boundary while speaking, which is what makes long
//! utterances interruptible without the facade ever reaching into the
//! engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::command::Command;
use crate::config::SpeechConfig;
use crate::engine::SpeechEngine;
use crate::queue::PlaybackQueue;

/// Position inside a resumable utterance.
///
/// Owned exclusively by the worker; the facade influences it only through
/// commands. `index` counts whole words from the start of `words`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ResumeCursor {
    words: Vec<String>,
    index: usize,
}

impl ResumeCursor {
    fn clear(&mut self) {
        self.words.clear();
        self.index = 0;
    }
}

/// What the worker loop should do after handling a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Shutdown,
}

/// Commands observed at a chunk boundary while an utterance is in progress.
enum Interrupt {
    None,
    Stop,
    Shutdown,
}

pub(crate) struct Worker<E> {
    engine: E,
    queue: Arc<PlaybackQueue>,
    speaking: Arc<AtomicBool>,
    config: SpeechConfig,
    cursor: ResumeCursor,
}

impl<E: SpeechEngine> Worker<E> {
    pub(crate) fn new(
        engine: E,
        queue: Arc<PlaybackQueue>,
        speaking: Arc<AtomicBool>,
        config: SpeechConfig,
    ) -> Self {
        let mut worker = Self {
            engine,
            queue,
            speaking,
            config,
            cursor: ResumeCursor::default(),
        };
        worker.apply_rate(worker.config.rate_wpm);
        worker
    }

    /// The worker thread body: poll, execute, repeat until shutdown.
    pub(crate) fn run(mut self) {
        loop {
            match self.queue.pop_timeout(self.config.poll_interval) {
                Some(command) => {
                    if self.execute(command) == Flow::Shutdown {
                        break;
                    }
                }
                None => {
                    // Queue strong count 1 means the facade is gone.
                    if Arc::strong_count(&self.queue) == 1 {
                        tracing::warn!(
                            "controller dropped without shutdown; stopping playback worker"
                        );
                        break;
                    }
                }
            }
        }
        tracing::debug!("playback worker shutting down");
    }

    fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Speak { text, resumable } => {
                self.speaking.store(true, Ordering::SeqCst);
                let flow = if resumable {
                    self.speak_resumable(&text)
                } else {
                    self.speak_plain(&text)
                };
                self.speaking.store(false, Ordering::SeqCst);
                flow
            }
            Command::Stop => {
                self.stop_engine();
                Flow::Continue
            }
            Command::SetRate { wpm } => {
                self.apply_rate(wpm);
                Flow::Continue
            }
            Command::ResetResumable => {
                self.cursor.clear();
                Flow::Continue
            }
            Command::Shutdown => Flow::Shutdown,
        }
    }

    /// Speak `text` in chunks, recording the cursor so a stopped utterance
    /// can continue later.
    fn speak_resumable(&mut self, text: &str) -> Flow {
        let words = split_words(text);
        if words.is_empty() {
            self.cursor.clear();
            return Flow::Continue;
        }

        // Speaking the text the cursor points into resumes it; anything
        // else starts fresh.
        let start = if self.cursor.words == words && self.cursor.index > 0 {
            self.cursor.index
        } else {
            0
        };
        self.cursor = ResumeCursor { words, index: start };

        while self.cursor.index < self.cursor.words.len() {
            match self.check_interrupt() {
                Interrupt::None => {}
                // The cursor keeps its position for the next resume.
                Interrupt::Stop => return Flow::Continue,
                Interrupt::Shutdown => return Flow::Shutdown,
            }

            let end = (self.cursor.index + self.config.chunk_words.max(1))
                .min(self.cursor.words.len());
            let chunk = self.cursor.words[self.cursor.index..end].join(" ");
            self.say_chunk(&chunk);
            self.cursor.index = end;
        }

        // Ran to completion: the next speak of this text starts over.
        self.cursor.clear();
        Flow::Continue
    }

    /// Speak a plain announcement. Long text is chunked so stop stays
    /// responsive, but no resume position is ever recorded.
    fn speak_plain(&mut self, text: &str) -> Flow {
        // A plain announcement invalidates any recorded resume position.
        self.cursor.clear();

        if text.trim().is_empty() {
            return Flow::Continue;
        }

        if text.chars().count() <= self.config.long_text_chars {
            self.say_chunk(text);
            return Flow::Continue;
        }

        let words = split_words(text);
        let mut index = 0;
        while index < words.len() {
            match self.check_interrupt() {
                Interrupt::None => {}
                Interrupt::Stop => return Flow::Continue,
                Interrupt::Shutdown => return Flow::Shutdown,
            }

            let end = (index + self.config.chunk_words.max(1)).min(words.len());
            self.say_chunk(&words[index..end].join(" "));
            index = end;
        }
        Flow::Continue
    }

    /// One non-blocking queue check at a chunk boundary.
    ///
    /// `Stop` and `Shutdown` abort the utterance; `SetRate` applies and the
    /// utterance continues. Anything else arriving mid-utterance should
    /// have been preceded by a purge, so it is logged and dropped.
    fn check_interrupt(&mut self) -> Interrupt {
        match self.queue.try_pop() {
            None => Interrupt::None,
            Some(Command::Stop) => {
                self.stop_engine();
                Interrupt::Stop
            }
            Some(Command::SetRate { wpm }) => {
                self.apply_rate(wpm);
                Interrupt::None
            }
            Some(Command::Shutdown) => {
                tracing::warn!("shutdown received mid-utterance; expected a stop first");
                self.stop_engine();
                Interrupt::Shutdown
            }
            Some(other) => {
                tracing::warn!(command = ?other, "dropping command received mid-utterance");
                Interrupt::None
            }
        }
    }

    fn say_chunk(&mut self, chunk: &str) {
        if let Err(error) = self.engine.say(chunk) {
            tracing::warn!(%error, "speech chunk failed; continuing with the next one");
        }
    }

    fn apply_rate(&mut self, wpm: u32) {
        self.config.rate_wpm = wpm;
        if let Err(error) = self.engine.set_rate(wpm) {
            tracing::warn!(%error, wpm, "failed to apply speech rate");
        }
    }

    fn stop_engine(&mut self) {
        if let Err(error) = self.engine.stop() {
            tracing::warn!(%error, "speech engine stop failed");
        }
    }
}

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}
