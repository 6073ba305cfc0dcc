//! Commands sent from the controller facade to the playback worker.

/// A command sent from the controller to the playback worker thread.
///
/// Every variant is fire-and-forget; the worker never replies. Results the
/// caller can observe (the speaking flag, audible playback) are side effects
/// of execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Speak `text`. Resumable utterances record how far they got when
    /// stopped, so speaking the same text again continues from there.
    Speak { text: String, resumable: bool },

    /// Abort the current utterance. The facade purges the queue before
    /// sending this, so it is handled ahead of anything queued earlier.
    Stop,

    /// Change the speaking rate in words per minute.
    SetRate { wpm: u32 },

    /// Forget any recorded resume position.
    ResetResumable,

    /// Exit the worker thread, dropping the engine with it.
    Shutdown,
}
