#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// Allow private types in public type alias - DefaultGmailClient is meant to be
// used directly, not through its internal generic structure
#![allow(private_interfaces)]

mod auth;
mod body;
mod client;
mod config;
mod error;
mod http;
mod types;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultGmailClient;

// Configuration
pub use config::GmailClientConfig;

// Authorization
pub use auth::{ACCESS_TOKEN_ENV, consent_instructions, ensure_credentials_file, obtain_access_token};

// Message references returned by the list endpoint
pub use types::MessageRef;

// Errors
pub use error::{GmailError, GmailResult};

// Silence unused dev-dependency warnings
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
