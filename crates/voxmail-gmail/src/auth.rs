//! OAuth credential handling.
//!
//! voxmail never runs a browser consent flow itself. It reads the client
//! credentials and token files the user provisioned once (see
//! [`consent_instructions`]), refreshes the short-lived access token with
//! the stored refresh token when it expires, and writes the rotated token
//! back. `GMAIL_ACCESS_TOKEN` bypasses the files entirely for quick tests.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{GmailClientConfig, GmailConfig};
use crate::error::{GmailError, GmailResult};
use crate::http::{HttpBackend, ReqwestBackend};

/// Environment variable that overrides the stored token.
pub const ACCESS_TOKEN_ENV: &str = "GMAIL_ACCESS_TOKEN";

/// Tokens older than their expiry minus this margin count as expired.
const EXPIRY_SKEW_SECONDS: i64 = 60;

/// OAuth client credentials, as downloaded from the Google Cloud console.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ClientCredentials {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
}

/// The credential download wraps the fields in an application-type key.
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    installed: Option<ClientCredentials>,
    web: Option<ClientCredentials>,
}

/// The token file on disk. Field names match the JSON written by Google's
/// own client libraries so an existing token keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct StoredToken {
    #[serde(rename = "token", alias = "access_token")]
    pub(crate) access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    /// Whether the access token is still usable at `now`.
    ///
    /// A token without an expiry is assumed usable; a rejection would
    /// surface as an authorization error on the first request.
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expiry
            .is_none_or(|expiry| now + Duration::seconds(EXPIRY_SKEW_SECONDS) < expiry)
    }
}

/// Resolve an access token for API calls.
///
/// Order: the [`ACCESS_TOKEN_ENV`] override, then the stored token, then a
/// refresh against the token endpoint. Fails with
/// [`GmailError::AuthRequired`] when no usable credential exists.
pub async fn obtain_access_token(
    config: &GmailClientConfig,
    credentials_path: &Path,
    token_path: &Path,
) -> GmailResult<String> {
    if let Ok(token) = env::var(ACCESS_TOKEN_ENV) {
        let token = token.trim();
        if !token.is_empty() {
            return Ok(token.to_string());
        }
    }

    let internal = GmailConfig::from_public(config);
    let backend = ReqwestBackend::new(&internal);
    resolve_access_token(&backend, &internal, credentials_path, token_path).await
}

/// File-and-refresh part of token resolution, separated from the
/// environment override so it can run against any backend.
pub(crate) async fn resolve_access_token<B: HttpBackend>(
    backend: &B,
    config: &GmailConfig,
    credentials_path: &Path,
    token_path: &Path,
) -> GmailResult<String> {
    let stored = read_token(token_path)?;
    if stored.is_fresh(Utc::now()) {
        return Ok(stored.access_token);
    }

    let Some(refresh_token) = stored.refresh_token else {
        return Err(GmailError::AuthRequired {
            reason: "the stored token expired and has no refresh token".to_string(),
        });
    };

    let credentials = load_client_credentials(credentials_path)?;
    let refreshed = refresh_access_token(backend, config, &credentials, &refresh_token).await?;
    save_token(token_path, &refreshed)?;
    Ok(refreshed.access_token)
}

/// Exchange a refresh token for a fresh access token.
async fn refresh_access_token<B: HttpBackend>(
    backend: &B,
    config: &GmailConfig,
    credentials: &ClientCredentials,
    refresh_token: &str,
) -> GmailResult<StoredToken> {
    let params = [
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("refresh_token", refresh_token),
        ("grant_type", "refresh_token"),
    ];
    let response = backend.post_form(&config.token_url, &params).await?;

    let access_token = response
        .get("access_token")
        .and_then(Value::as_str)
        .ok_or_else(|| GmailError::InvalidResponse {
            message: "token endpoint response has no access_token".to_string(),
        })?;
    let expires_in = response.get("expires_in").and_then(Value::as_i64);
    // Google rotates the refresh token only occasionally; keep the old one
    // unless a new one arrives.
    let rotated = response
        .get("refresh_token")
        .and_then(Value::as_str)
        .unwrap_or(refresh_token);

    Ok(StoredToken {
        access_token: access_token.to_string(),
        refresh_token: Some(rotated.to_string()),
        expiry: expires_in.map(|seconds| Utc::now() + Duration::seconds(seconds)),
    })
}

pub(crate) fn load_client_credentials(path: &Path) -> GmailResult<ClientCredentials> {
    let raw = fs::read_to_string(path).map_err(|error| {
        if error.kind() == io::ErrorKind::NotFound {
            GmailError::AuthRequired {
                reason: format!("no client credentials at {}", path.display()),
            }
        } else {
            GmailError::Io(error)
        }
    })?;

    let file: CredentialsFile = serde_json::from_str(&raw)?;
    let credentials = file
        .installed
        .or(file.web)
        .ok_or_else(|| GmailError::AuthRequired {
            reason: format!(
                "{} has neither an \"installed\" nor a \"web\" section",
                path.display()
            ),
        })?;

    if credentials.client_id.starts_with("YOUR_") || credentials.client_secret.starts_with("YOUR_")
    {
        return Err(GmailError::AuthRequired {
            reason: format!(
                "{} still contains the placeholder values",
                path.display()
            ),
        });
    }

    Ok(credentials)
}

fn read_token(path: &Path) -> GmailResult<StoredToken> {
    let raw = fs::read_to_string(path).map_err(|error| {
        if error.kind() == io::ErrorKind::NotFound {
            GmailError::AuthRequired {
                reason: format!("no stored token at {}", path.display()),
            }
        } else {
            GmailError::Io(error)
        }
    })?;
    Ok(serde_json::from_str(&raw)?)
}

fn save_token(path: &Path, token: &StoredToken) -> GmailResult<()> {
    let json = serde_json::to_string_pretty(token)?;
    fs::write(path, json)?;
    Ok(())
}

/// Write a placeholder credentials file if none exists yet.
///
/// Returns true when the template was created, so callers can point the
/// user at it.
pub fn ensure_credentials_file(path: &Path) -> GmailResult<bool> {
    if path.exists() {
        return Ok(false);
    }

    let template = serde_json::json!({
        "installed": {
            "client_id": "YOUR_CLIENT_ID.apps.googleusercontent.com",
            "client_secret": "YOUR_CLIENT_SECRET"
        }
    });
    fs::write(path, serde_json::to_string_pretty(&template)?)?;
    Ok(true)
}

/// Step-by-step setup text shown when authorization is missing.
pub fn consent_instructions(credentials_path: &Path, token_path: &Path) -> String {
    format!(
        "To let voxmail read your inbox:\n\
         \n\
         1. Create a project at https://console.cloud.google.com/ and enable the Gmail API.\n\
         2. Under \"APIs & Services > Credentials\", create an OAuth client ID of type\n   \
         \"Desktop app\" and download the client secret JSON.\n\
         3. Copy the downloaded file to {credentials}.\n\
         4. Authorize the gmail.readonly scope once (for example with the OAuth 2.0\n   \
         Playground at https://developers.google.com/oauthplayground, configured to\n   \
         use your own client credentials) and save the issued token to {token} as:\n   \
         {{\"token\": \"...\", \"refresh_token\": \"...\", \"expiry\": \"...\"}}\n\
         \n\
         voxmail refreshes the access token automatically from then on. For quick\n\
         tests you can instead set {env} to a ready-made access token.",
        credentials = credentials_path.display(),
        token = token_path.display(),
        env = ACCESS_TOKEN_ENV,
    )
}
