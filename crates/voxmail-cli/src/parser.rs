//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::{Parser, ValueEnum};

use crate::commands::Commands;

/// Command-line interface definition for the speaking mail reader.
///
/// This is the top-level parser; without a subcommand it starts the
/// reader itself.
#[derive(Parser)]
#[command(name = "voxmail")]
#[command(about = "Read your Gmail inbox aloud in the terminal")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Override how many inbox messages to fetch (1-500)
    #[arg(long = "limit", env = "VOXMAIL_LIMIT")]
    pub limit: Option<u32>,

    /// Override the speech rate in words per minute
    #[arg(long = "rate", env = "VOXMAIL_RATE")]
    pub rate: Option<u32>,

    /// Speech backend driving the playback worker
    #[arg(long = "engine", value_enum, default_value_t = EngineChoice::Native)]
    pub engine: EngineChoice,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Which speech backend the playback worker is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineChoice {
    /// Platform speech engine (the default backend of this build)
    Native,
    /// espeak-ng subprocess
    Espeak,
}
