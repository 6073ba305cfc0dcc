//! Subcommands of the `voxmail` binary.
//!
//! Running `voxmail` without a command is the main act: fetch the inbox
//! and open the reader. The subcommands cover everything else.

use clap::Subcommand;

/// Available commands for the voxmail reader.
#[derive(Subcommand)]
pub enum Commands {
    /// Show resolved paths for the voxmail config files
    Paths,
}
