//! Path utilities for the voxmail config directory and the files under it.
//!
//! This module provides the canonical path resolution for all voxmail
//! components:
//! - Settings file
//! - OAuth client credentials
//! - Cached OAuth token
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately
//! - OS-specific logic is kept private in `platform`

mod ensure;
mod error;
mod files;
mod platform;
mod resolver;

#[cfg(test)]
mod test_utils;

// Error type
pub use error::PathError;

// Config root resolution
pub use platform::{CONFIG_DIR_ENV, config_root};

// Well-known files
pub use files::{credentials_path, settings_path, token_path};

// Directory operations
pub use ensure::{ensure_directory, verify_writable};

// Pure resolver for testing and CLI
pub use resolver::ResolvedPaths;
