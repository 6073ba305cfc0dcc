//! Well-known file locations under the config root.

use std::path::PathBuf;

use super::error::PathError;
use super::platform::config_root;

pub(super) const SETTINGS_FILE: &str = "settings.json";
pub(super) const CREDENTIALS_FILE: &str = "credentials.json";
pub(super) const TOKEN_FILE: &str = "token.json";

/// Location of the settings file.
pub fn settings_path() -> Result<PathBuf, PathError> {
    Ok(config_root()?.join(SETTINGS_FILE))
}

/// Location of the OAuth client credentials file.
pub fn credentials_path() -> Result<PathBuf, PathError> {
    Ok(config_root()?.join(CREDENTIALS_FILE))
}

/// Location of the cached OAuth token file.
pub fn token_path() -> Result<PathBuf, PathError> {
    Ok(config_root()?.join(TOKEN_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::CONFIG_DIR_ENV;
    use crate::paths::test_utils::{ENV_LOCK, EnvVarGuard};
    use tempfile::tempdir;

    #[test]
    fn files_live_under_the_config_root() {
        let _guard = ENV_LOCK.lock().unwrap();
        let temp = tempdir().unwrap();
        let _env = EnvVarGuard::set(CONFIG_DIR_ENV, temp.path().to_string_lossy().as_ref());

        assert_eq!(settings_path().unwrap(), temp.path().join("settings.json"));
        assert_eq!(
            credentials_path().unwrap(),
            temp.path().join("credentials.json")
        );
        assert_eq!(token_path().unwrap(), temp.path().join("token.json"));
    }
}
