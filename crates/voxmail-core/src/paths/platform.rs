//! Platform-specific resolution of the voxmail config root.

use std::env;
use std::fs;
use std::path::PathBuf;

use super::error::PathError;

/// Environment variable that overrides the config root.
pub const CONFIG_DIR_ENV: &str = "VOXMAIL_CONFIG_DIR";

/// Get the root directory for configuration (settings, credentials, token).
///
/// Resolution order:
/// 1. `VOXMAIL_CONFIG_DIR` environment variable (highest priority)
/// 2. Platform config directory (e.g., `~/.config/voxmail`)
pub fn config_root() -> Result<PathBuf, PathError> {
    // 1. Runtime override (highest priority)
    if let Ok(path) = env::var(CONFIG_DIR_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // 2. Default to the platform config directory
    let config_dir = dirs::config_dir().ok_or(PathError::NoConfigDir)?;
    let root = config_dir.join("voxmail");

    // Ensure it exists
    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}
