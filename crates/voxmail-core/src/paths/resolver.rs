//! Pure path resolver for testing and CLI introspection.
//!
//! Captures every resolved path in one struct so the `voxmail paths`
//! command and integration tests can inspect resolution in a single call.

use std::path::PathBuf;

use super::files::{CREDENTIALS_FILE, SETTINGS_FILE, TOKEN_FILE};
use super::{PathError, config_root};

/// All resolved paths captured in a single struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Root directory for configuration files.
    pub config_root: PathBuf,
    /// Path to the settings file.
    pub settings_path: PathBuf,
    /// Path to the OAuth client credentials file.
    pub credentials_path: PathBuf,
    /// Path to the cached OAuth token file.
    pub token_path: PathBuf,
}

impl ResolvedPaths {
    /// Resolve all paths using the current environment.
    pub fn resolve() -> Result<Self, PathError> {
        Ok(Self::in_root(config_root()?))
    }

    /// Join the well-known files onto `config_root` without consulting the
    /// environment.
    #[must_use]
    pub fn in_root(config_root: PathBuf) -> Self {
        Self {
            settings_path: config_root.join(SETTINGS_FILE),
            credentials_path: config_root.join(CREDENTIALS_FILE),
            token_path: config_root.join(TOKEN_FILE),
            config_root,
        }
    }
}

impl std::fmt::Display for ResolvedPaths {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "config_root = {}", self.config_root.display())?;
        writeln!(f, "settings_path = {}", self.settings_path.display())?;
        writeln!(f, "credentials_path = {}", self.credentials_path.display())?;
        write!(f, "token_path = {}", self.token_path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::CONFIG_DIR_ENV;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};
    use tempfile::tempdir;

    #[test]
    fn resolve_returns_consistent_paths() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp = tempdir().unwrap();
        let _env = EnvVarGuard::set(CONFIG_DIR_ENV, temp.path().to_string_lossy().as_ref());

        let first = ResolvedPaths::resolve().expect("first resolve");
        let second = ResolvedPaths::resolve().expect("second resolve");

        assert_eq!(first, second, "path resolution should be deterministic");
        assert_eq!(first.config_root, temp.path());
    }

    #[test]
    fn in_root_joins_without_the_environment() {
        let paths = ResolvedPaths::in_root(PathBuf::from("/tmp/vox"));
        assert_eq!(paths.config_root, PathBuf::from("/tmp/vox"));
        assert_eq!(paths.settings_path, PathBuf::from("/tmp/vox/settings.json"));
        assert_eq!(
            paths.credentials_path,
            PathBuf::from("/tmp/vox/credentials.json")
        );
        assert_eq!(paths.token_path, PathBuf::from("/tmp/vox/token.json"));
    }

    #[test]
    fn display_format_is_parseable() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp = tempdir().unwrap();
        let _env = EnvVarGuard::set(CONFIG_DIR_ENV, temp.path().to_string_lossy().as_ref());

        let output = ResolvedPaths::resolve().expect("resolve").to_string();

        // Should contain key = value pairs
        assert!(output.contains("config_root = "));
        assert!(output.contains("settings_path = "));
        assert!(output.contains("credentials_path = "));
        assert!(output.contains("token_path = "));
    }
}
