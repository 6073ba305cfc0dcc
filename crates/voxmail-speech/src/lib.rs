#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_RUSTDOC.md"))]
#![deny(unused_crate_dependencies)]

mod command;
mod controller;
mod queue;
mod worker;

pub mod config;
pub mod engine;
pub mod error;

// Playback facade.
pub use controller::SpeechController;

// Configuration.
pub use config::{
    DEFAULT_CHUNK_WORDS, DEFAULT_JOIN_TIMEOUT, DEFAULT_LONG_TEXT_CHARS, DEFAULT_POLL_INTERVAL,
    DEFAULT_RATE_WPM, SpeechConfig,
};

// Engine seam and bundled backends.
pub use engine::{EspeakEngine, SpeechEngine};
#[cfg(feature = "native")]
pub use engine::NativeEngine;

// Errors.
pub use error::SpeechError;
