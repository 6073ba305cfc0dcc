//! Speech engine and playback controller error types.

use thiserror::Error;

/// Errors from the speech engine or the playback controller.
#[derive(Debug, Error)]
pub enum SpeechError {
    /// The speech engine could not be constructed.
    #[error("Speech engine initialization failed: {0}")]
    EngineInit(String),

    /// The engine rejected or failed a synthesis request.
    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    /// The playback worker thread is no longer running.
    #[error("Playback worker thread died")]
    WorkerGone,

    /// I/O failure talking to an external synthesizer process.
    #[error("Speech I/O error: {0}")]
    Io(#[from] std::io::Error),
}
