//! The command queue between the controller facade and the playback worker.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};
use std::time::Duration;

use crate::command::Command;

/// FIFO command queue shared by the facade and the worker thread.
///
/// This is the only channel between the two sides. `push` never blocks, so
/// facade calls stay fire-and-forget; `purge` lets `stop` discard stale
/// commands so its `Stop` is handled ahead of anything queued before it.
pub(crate) struct PlaybackQueue {
    inner: Mutex<VecDeque<Command>>,
    available: Condvar,
}

impl PlaybackQueue {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
        }
    }

    /// Append a command. Never blocks.
    pub(crate) fn push(&self, command: Command) {
        let mut queue = self.inner.lock().expect("playback queue mutex poisoned");
        queue.push_back(command);
        self.available.notify_one();
    }

    /// Pop the oldest command, waiting up to `timeout` for one to arrive.
    pub(crate) fn pop_timeout(&self, timeout: Duration) -> Option<Command> {
        let queue = self.inner.lock().expect("playback queue mutex poisoned");
        let (mut queue, _timed_out) = self
            .available
            .wait_timeout_while(queue, timeout, |queue| queue.is_empty())
            .expect("playback queue mutex poisoned");
        queue.pop_front()
    }

    /// Pop the oldest command without waiting. Used between chunks so an
    /// in-progress utterance stays responsive.
    pub(crate) fn try_pop(&self) -> Option<Command> {
        self.inner
            .lock()
            .expect("playback queue mutex poisoned")
            .pop_front()
    }

    /// Discard everything queued, returning how many commands were dropped.
    pub(crate) fn purge(&self) -> usize {
        let mut queue = self.inner.lock().expect("playback queue mutex poisoned");
        let dropped = queue.len();
        queue.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn pops_in_push_order() {
        let queue = PlaybackQueue::new();
        queue.push(Command::Stop);
        queue.push(Command::SetRate { wpm: 160 });

        assert_eq!(queue.try_pop(), Some(Command::Stop));
        assert_eq!(queue.try_pop(), Some(Command::SetRate { wpm: 160 }));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn pop_timeout_returns_none_when_empty() {
        let queue = PlaybackQueue::new();
        assert_eq!(queue.pop_timeout(Duration::from_millis(10)), None);
    }

    #[test]
    fn pop_timeout_wakes_on_push() {
        let queue = Arc::new(PlaybackQueue::new());
        let producer = Arc::clone(&queue);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            producer.push(Command::Shutdown);
        });

        let popped = queue.pop_timeout(Duration::from_secs(5));
        handle.join().unwrap();
        assert_eq!(popped, Some(Command::Shutdown));
    }

    #[test]
    fn purge_discards_everything_and_counts() {
        let queue = PlaybackQueue::new();
        queue.push(Command::Speak {
            text: "one".to_string(),
            resumable: false,
        });
        queue.push(Command::Speak {
            text: "two".to_string(),
            resumable: false,
        });

        assert_eq!(queue.purge(), 2);
        assert_eq!(queue.try_pop(), None);
        assert_eq!(queue.purge(), 0);
    }

    #[test]
    fn commands_pushed_after_purge_survive() {
        let queue = PlaybackQueue::new();
        queue.push(Command::Speak {
            text: "stale".to_string(),
            resumable: false,
        });
        queue.purge();
        queue.push(Command::Stop);

        assert_eq!(queue.try_pop(), Some(Command::Stop));
    }
}
