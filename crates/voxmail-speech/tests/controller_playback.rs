//! End-to-end playback behavior through the public [`SpeechController`] API.
//!
//! What is tested:
//! - commands are executed in submission order
//! - stop cancels the current utterance and discards everything queued
//! - stopping twice behaves like stopping once
//! - a stopped resumable utterance continues from the interrupted chunk
//! - an utterance that ran to completion starts over next time
//! - rate changes land mid-utterance without cancelling playback
//! - back-to-back rate changes settle on the last value, silently
//! - `reset_resumable` forgets the recorded position
//! - plain (non-resumable) speech always starts from the beginning
//! - shutdown during playback stops the engine and joins promptly
//! - empty text never reaches the engine
//! - an engine failure skips the chunk instead of wedging the worker
//! - the speaking flag tracks the utterance lifecycle
//!
//! The scripted engine below can hold one designated `say` call open on a
//! channel gate, which lets a test issue controller calls while the worker
//! is provably inside an utterance.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use voxmail_speech::engine::SpeechEngine;
use voxmail_speech::{SpeechConfig, SpeechController, SpeechError};

type Log = Arc<Mutex<Vec<String>>>;

/// Rendezvous installed on one `say` call: the engine reports that it has
/// been reached, then waits for the test to let it finish.
struct Gate {
    at_call: usize,
    reached_tx: Sender<()>,
    resume_rx: Receiver<()>,
}

struct ScriptedEngine {
    log: Log,
    gate: Option<Gate>,
    fail_at: Option<usize>,
    says: usize,
}

impl ScriptedEngine {
    fn new() -> (Self, Log) {
        let log: Log = Arc::default();
        let engine = Self {
            log: Arc::clone(&log),
            gate: None,
            fail_at: None,
            says: 0,
        };
        (engine, log)
    }

    /// Hold the `at_call`th `say` (1-based) open until the returned sender
    /// fires. The returned receiver reports when that call is reached.
    fn gated(at_call: usize) -> (Self, Log, Receiver<()>, Sender<()>) {
        let (reached_tx, reached_rx) = channel();
        let (resume_tx, resume_rx) = channel();
        let (mut engine, log) = Self::new();
        engine.gate = Some(Gate {
            at_call,
            reached_tx,
            resume_rx,
        });
        (engine, log, reached_rx, resume_tx)
    }

    fn failing_at(n: usize) -> (Self, Log) {
        let (mut engine, log) = Self::new();
        engine.fail_at = Some(n);
        (engine, log)
    }
}

impl SpeechEngine for ScriptedEngine {
    fn say(&mut self, text: &str) -> Result<(), SpeechError> {
        self.says += 1;
        self.log.lock().unwrap().push(format!("say:{text}"));
        if let Some(gate) = &self.gate {
            if gate.at_call == self.says {
                gate.reached_tx.send(()).expect("test dropped the gate");
                gate.resume_rx.recv().expect("test dropped the gate");
            }
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

// Six words, 17 chars: three chunks of two words under the test config,
// and long enough that even plain speech takes the chunked path.
const SIX_WORDS: &str = "w1 w2 w3 w4 w5 w6";

fn test_config() -> SpeechConfig {
    SpeechConfig::default()
        .with_chunk_words(2)
        .with_long_text_chars(10)
        .with_poll_interval(Duration::from_millis(5))
}

fn spawn(engine: ScriptedEngine) -> SpeechController {
    SpeechController::spawn_with_engine(test_config(), move || Ok(engine))
        .expect("worker should start")
}

fn wait_for(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn reached(gate: &Receiver<()>, what: &str) {
    gate.recv_timeout(Duration::from_secs(2))
        .unwrap_or_else(|_| panic!("timed out waiting to reach {what}"));
}

fn says(log: &Log) -> Vec<String> {
    log.lock()
        .unwrap()
        .iter()
        .filter(|entry| entry.starts_with("say:"))
        .cloned()
        .collect()
}

fn contains(log: &Log, needle: &str) -> bool {
    log.lock().unwrap().iter().any(|entry| entry == needle)
}

#[test]
fn utterances_play_in_submission_order() {
    let (engine, log) = ScriptedEngine::new();
    let mut controller = spawn(engine);

    controller.speak("first");
    controller.speak("second");
    wait_for("both announcements", || says(&log).len() == 2);

    assert_eq!(says(&log), vec!["say:first", "say:second"]);
    controller.shutdown();
}

#[test]
fn stop_discards_everything_queued_behind_the_current_utterance() {
    let (engine, log, reached_rx, resume_tx) = ScriptedEngine::gated(1);
    let mut controller = spawn(engine);

    controller.speak_resumable(SIX_WORDS);
    reached(&reached_rx, "the first chunk");

    controller.speak("queued behind");
    controller.stop();
    resume_tx.send(()).unwrap();

    wait_for("the engine stop", || contains(&log, "stop"));
    assert!(
        !contains(&log, "say:queued behind"),
        "purge must discard speech queued before the stop"
    );
    controller.shutdown();
}

#[test]
fn stopped_resumable_speech_continues_from_the_interrupted_chunk() {
    let (engine, log, reached_rx, resume_tx) = ScriptedEngine::gated(1);
    let mut controller = spawn(engine);

    controller.speak_resumable(SIX_WORDS);
    reached(&reached_rx, "the first chunk");
    controller.stop();
    resume_tx.send(()).unwrap();
    wait_for("the engine stop", || contains(&log, "stop"));

    controller.speak_resumable(SIX_WORDS);
    wait_for("the rest of the text", || says(&log).len() == 3);

    assert_eq!(
        log.lock().unwrap().as_slice(),
        [
            "rate:130",
            "say:w1 w2",
            "stop",
            "say:w3 w4",
            "say:w5 w6"
        ]
    );
    controller.shutdown();
}

#[test]
fn stopping_twice_matches_stopping_once() {
    let (engine, log, reached_rx, resume_tx) = ScriptedEngine::gated(1);
    let mut controller = spawn(engine);

    controller.speak_resumable(SIX_WORDS);
    reached(&reached_rx, "the first chunk");
    // The second stop purges the first one's command; the worker sees a
    // single Stop either way.
    controller.stop();
    controller.stop();
    resume_tx.send(()).unwrap();
    wait_for("the engine stop", || contains(&log, "stop"));
    assert!(!controller.is_speaking());

    // The second stop left the resume point where the first one put it.
    controller.speak_resumable(SIX_WORDS);
    wait_for("the rest of the text", || says(&log).len() == 3);
    assert_eq!(says(&log)[1], "say:w3 w4");
    controller.shutdown();
}

#[test]
fn completed_speech_starts_over_when_spoken_again() {
    let (engine, log) = ScriptedEngine::new();
    let mut controller = spawn(engine);

    controller.speak_resumable(SIX_WORDS);
    wait_for("the first pass", || says(&log).len() == 3);
    controller.speak_resumable(SIX_WORDS);
    wait_for("the second pass", || says(&log).len() == 6);

    let says = says(&log);
    assert_eq!(says[3], "say:w1 w2", "completion clears the resume point");
    controller.shutdown();
}

#[test]
fn rate_change_lands_mid_utterance_without_cancelling_playback() {
    let (engine, log, reached_rx, resume_tx) = ScriptedEngine::gated(1);
    let mut controller = spawn(engine);

    controller.speak_resumable(SIX_WORDS);
    reached(&reached_rx, "the first chunk");
    controller.set_rate(200);
    resume_tx.send(()).unwrap();

    wait_for("the full utterance", || says(&log).len() == 3);
    assert_eq!(
        log.lock().unwrap().as_slice(),
        [
            "rate:130",
            "say:w1 w2",
            "rate:200",
            "say:w3 w4",
            "say:w5 w6"
        ]
    );
    controller.shutdown();
}

#[test]
fn back_to_back_rate_changes_settle_on_the_last_value() {
    let (engine, log) = ScriptedEngine::new();
    let mut controller = spawn(engine);

    controller.set_rate(100);
    controller.set_rate(200);
    wait_for("both rate changes", || contains(&log, "rate:200"));

    assert!(!controller.is_speaking(), "rate changes make no sound");
    assert_eq!(
        log.lock().unwrap().as_slice(),
        ["rate:130", "rate:100", "rate:200"]
    );
    controller.shutdown();
}

#[test]
fn speak_then_immediate_shutdown_terminates_cleanly() {
    let (engine, _log) = ScriptedEngine::new();
    let mut controller = spawn(engine);

    controller.speak("hello");
    controller.shutdown();
    assert!(!controller.is_speaking());
}

#[test]
fn reset_resumable_forgets_the_recorded_position() {
    let (engine, log, reached_rx, resume_tx) = ScriptedEngine::gated(1);
    let mut controller = spawn(engine);

    controller.speak_resumable(SIX_WORDS);
    reached(&reached_rx, "the first chunk");
    controller.stop();
    resume_tx.send(()).unwrap();
    wait_for("the engine stop", || contains(&log, "stop"));

    controller.reset_resumable();
    controller.speak_resumable(SIX_WORDS);
    wait_for("the fresh pass", || says(&log).len() == 4);

    assert_eq!(says(&log)[1], "say:w1 w2", "playback restarted from the top");
    controller.shutdown();
}

#[test]
fn plain_speech_always_starts_from_the_beginning() {
    let (engine, log, reached_rx, resume_tx) = ScriptedEngine::gated(1);
    let mut controller = spawn(engine);

    controller.speak(SIX_WORDS);
    reached(&reached_rx, "the first chunk");
    controller.stop();
    resume_tx.send(()).unwrap();
    wait_for("the engine stop", || contains(&log, "stop"));

    controller.speak(SIX_WORDS);
    wait_for("the restarted utterance", || says(&log).len() >= 2);

    assert_eq!(says(&log)[1], "say:w1 w2", "no resume point for plain speech");
    controller.shutdown();
}

#[test]
fn shutdown_during_playback_stops_the_engine_and_joins() {
    let (engine, log, reached_rx, resume_tx) = ScriptedEngine::gated(1);
    let mut controller = spawn(engine);

    controller.speak_resumable(SIX_WORDS);
    reached(&reached_rx, "the first chunk");
    resume_tx.send(()).unwrap();
    controller.shutdown();

    let entries = log.lock().unwrap();
    assert_eq!(
        entries.last().map(String::as_str),
        Some("stop"),
        "the engine is silenced on the way out"
    );
}

#[test]
fn empty_text_never_reaches_the_engine() {
    let (engine, log) = ScriptedEngine::new();
    let mut controller = spawn(engine);

    controller.speak_resumable("");
    controller.speak("   ");
    controller.speak("real thing");
    wait_for("the real announcement", || contains(&log, "say:real thing"));

    assert_eq!(says(&log), vec!["say:real thing"]);
    controller.shutdown();
}

#[test]
fn engine_failure_skips_the_chunk_and_keeps_the_worker_alive() {
    let (engine, log) = ScriptedEngine::failing_at(2);
    let mut controller = spawn(engine);

    controller.speak_resumable(SIX_WORDS);
    wait_for("all chunks", || says(&log).len() == 3);

    controller.speak("still here");
    wait_for("the follow-up", || contains(&log, "say:still here"));
    controller.shutdown();
}

#[test]
fn speaking_flag_tracks_the_utterance_lifecycle() {
    let (engine, log, reached_rx, resume_tx) = ScriptedEngine::gated(1);
    let mut controller = spawn(engine);

    assert!(!controller.is_speaking(), "idle at start");

    controller.speak_resumable(SIX_WORDS);
    reached(&reached_rx, "the first chunk");
    assert!(controller.is_speaking(), "raised while the engine is busy");

    resume_tx.send(()).unwrap();
    wait_for("the utterance to finish", || {
        says(&log).len() == 3 && !controller.is_speaking()
    });
    controller.shutdown();
}
