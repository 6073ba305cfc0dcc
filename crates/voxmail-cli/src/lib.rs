#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_RUSTDOC.md"))]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings for async test helpers
#[cfg(test)]
use tokio_test as _;

// Dependencies used only by the binary entry point in main.rs
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod fetch;
pub mod parser;
pub mod ui;

// Re-export primary types for convenient access
pub use bootstrap::{AppContext, bootstrap};
pub use commands::Commands;
pub use parser::{Cli, EngineChoice};
