//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the reader:
//! - Config directory and file paths (via voxmail-core)
//! - Persisted settings with per-invocation CLI overrides
//! - The speech playback worker (via voxmail-speech)
//! - Gmail authorization and client (via voxmail-gmail)
//!
//! `main` hands the composed context to the fetch step and the views.

use std::path::Path;

use anyhow::{Context, Result};
use voxmail_core::{
    ResolvedPaths, Settings, ensure_directory, load_settings, save_settings, validate_settings,
};
use voxmail_gmail::{
    DefaultGmailClient, GmailClientConfig, GmailError, consent_instructions,
    ensure_credentials_file, obtain_access_token,
};
use voxmail_speech::{EspeakEngine, SpeechConfig, SpeechController};

use crate::parser::{Cli, EngineChoice};

/// Fully composed application context for the reader.
pub struct AppContext {
    /// Settings after file load and CLI overrides.
    pub settings: Settings,
    /// Resolved config file locations.
    pub paths: ResolvedPaths,
    /// Speech playback facade, already announcing the load.
    pub speech: SpeechController,
    /// Gmail client authorized with the resolved access token.
    pub gmail: DefaultGmailClient,
}

/// Bootstrap the reader.
///
/// This is the composition root. It:
/// 1. Resolves the config directory and makes sure it exists
/// 2. Loads settings, applies CLI overrides and validates the result
/// 3. Spawns the speech worker and announces that loading has started
/// 4. Resolves Gmail credentials and an access token, printing the setup
///    instructions and failing when either is missing
/// 5. Builds the Gmail client
pub async fn bootstrap(cli: &Cli) -> Result<AppContext> {
    // 1. Config directory
    let paths = ResolvedPaths::resolve()?;
    ensure_directory(&paths.config_root)?;

    // 2. Settings with per-invocation overrides
    let settings = prepare_settings(&paths.settings_path, cli.limit, cli.rate)?;

    // 3. Speech worker; the announcement plays while the fetch runs
    let speech = spawn_speech(&settings, cli.engine).context("starting the speech worker")?;
    speech.speak("Please wait while I load your email");

    // 4. Gmail authorization
    let gmail_config = GmailClientConfig::new();
    if ensure_credentials_file(&paths.credentials_path)? {
        anyhow::bail!(
            "No OAuth client credentials found. A template was written to {}.\n\n{}",
            paths.credentials_path.display(),
            consent_instructions(&paths.credentials_path, &paths.token_path)
        );
    }
    let access_token =
        match obtain_access_token(&gmail_config, &paths.credentials_path, &paths.token_path).await {
            Ok(token) => token,
            Err(GmailError::AuthRequired { reason }) => anyhow::bail!(
                "{reason}\n\n{}",
                consent_instructions(&paths.credentials_path, &paths.token_path)
            ),
            Err(error) => {
                return Err(error).context("resolving the Gmail access token");
            }
        };

    // 5. Gmail client
    let gmail = DefaultGmailClient::new(&gmail_config.with_access_token(access_token));

    Ok(AppContext {
        settings,
        paths,
        speech,
        gmail,
    })
}

/// Load settings from `settings_path`, then apply the CLI overrides.
///
/// The first run writes the defaults back so the user has a file to edit.
/// Overrides are per-invocation and are not persisted here.
fn prepare_settings(
    settings_path: &Path,
    limit: Option<u32>,
    rate: Option<u32>,
) -> Result<Settings> {
    let first_run = !settings_path.exists();
    let mut settings = load_settings(settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;

    if first_run {
        save_settings(settings_path, &settings)
            .with_context(|| format!("writing default settings to {}", settings_path.display()))?;
    }

    if let Some(limit) = limit {
        settings.fetch_limit = Some(limit);
    }
    if let Some(rate) = rate {
        settings.rate_wpm = Some(rate);
    }
    validate_settings(&settings)?;

    Ok(settings)
}

/// Spawn the playback worker with the backend picked on the command line.
fn spawn_speech(settings: &Settings, engine: EngineChoice) -> Result<SpeechController> {
    let config = SpeechConfig::default()
        .with_rate_wpm(settings.effective_rate_wpm())
        .with_chunk_words(settings.effective_chunk_words())
        .with_long_text_chars(settings.effective_long_text_chars());

    let controller = match engine {
        EngineChoice::Native => SpeechController::spawn(config)?,
        EngineChoice::Espeak => SpeechController::spawn_with_engine(config, EspeakEngine::new)?,
    };
    Ok(controller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmail_core::{DEFAULT_FETCH_LIMIT, DEFAULT_RATE_WPM};

    #[test]
    fn first_run_writes_the_default_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = prepare_settings(&path, None, None).unwrap();

        assert!(path.exists(), "first run should persist the defaults");
        assert_eq!(settings, Settings::with_defaults());
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn cli_overrides_win_without_touching_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        save_settings(&path, &Settings::with_defaults()).unwrap();

        let settings = prepare_settings(&path, Some(5), Some(250)).unwrap();
        assert_eq!(settings.effective_fetch_limit(), 5);
        assert_eq!(settings.effective_rate_wpm(), 250);

        let on_disk = load_settings(&path).unwrap();
        assert_eq!(on_disk.effective_fetch_limit(), DEFAULT_FETCH_LIMIT);
        assert_eq!(on_disk.effective_rate_wpm(), DEFAULT_RATE_WPM);
    }

    #[test]
    fn sparse_settings_files_keep_their_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "rate_wpm": 180 }"#).unwrap();

        let settings = prepare_settings(&path, None, None).unwrap();
        assert_eq!(settings.effective_rate_wpm(), 180);

        // An existing file is left alone
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{ "rate_wpm": 180 }"#
        );
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let error = prepare_settings(&path, Some(0), None).unwrap_err();
        assert!(error.to_string().contains("Fetch limit"));

        let error = prepare_settings(&path, None, Some(0)).unwrap_err();
        assert!(error.to_string().contains("rate"));
    }
}
