#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_RUSTDOC.md"))]
#![deny(unused_crate_dependencies)]

pub mod message;
pub mod paths;
pub mod settings;
pub mod text;

// Re-export commonly used types for convenience
pub use message::Message;
pub use settings::{
    DEFAULT_CHUNK_WORDS, DEFAULT_FETCH_LIMIT, DEFAULT_LONG_TEXT_CHARS, DEFAULT_RATE_WPM,
    MAX_FETCH_LIMIT, Settings, SettingsError, SettingsFileError, load_settings, save_settings,
    validate_settings,
};
pub use text::{collapse_whitespace, redact_urls, wrap_text};

// Re-export path utilities
pub use paths::{
    CONFIG_DIR_ENV, PathError, ResolvedPaths, config_root, credentials_path, ensure_directory,
    settings_path, token_path, verify_writable,
};
