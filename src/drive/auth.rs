//! OAuth user credentials for the Google APIs.
//!
//! The bot does not run the interactive consent flow. It expects a client
//! secrets bundle (`credentials.json`, as downloaded from the Google Cloud
//! console) and a previously authorized token (`token.json`, in the format
//! written by `google-auth`'s `Credentials.to_json()`). Expired access tokens
//! are refreshed with the refresh token and written back to the token file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::drive::{DriveError, DriveResult};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Tokens this close to expiry are refreshed ahead of time.
const EXPIRY_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// OAuth client identity, from the `installed` or `web` section of the
/// client secrets file.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Debug, Deserialize)]
struct ClientSecrets {
    installed: Option<ClientConfig>,
    web: Option<ClientConfig>,
}

/// Authorized user token as persisted on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    #[serde(rename = "token")]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
    /// Fields written by other tools, preserved on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StoredToken {
    /// A token without expiry is treated as valid.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_none_or(|expiry| expiry - Duration::seconds(EXPIRY_MARGIN_SECS) > now)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
}

/// Supplies bearer tokens, refreshing and persisting them when they expire.
pub struct TokenProvider {
    client: Client,
    config: ClientConfig,
    token_path: PathBuf,
    token: RwLock<StoredToken>,
}

impl TokenProvider {
    pub fn new(
        client: Client,
        config: ClientConfig,
        token_path: impl Into<PathBuf>,
        token: StoredToken,
    ) -> Self {
        Self { client, config, token_path: token_path.into(), token: RwLock::new(token) }
    }

    /// Reads the client secrets and the cached token from disk.
    pub async fn from_files(
        client: Client,
        credentials_path: &Path,
        token_path: &Path,
    ) -> DriveResult<Self> {
        let secrets = tokio::fs::read_to_string(credentials_path).await.map_err(|e| {
            DriveError::Auth(format!("cannot read {}: {e}", credentials_path.display()))
        })?;
        let config = parse_client_config(&secrets)?;

        let token = tokio::fs::read_to_string(token_path).await.map_err(|e| {
            DriveError::Auth(format!(
                "cannot read cached token {}: {e}. Complete the OAuth consent flow and save the \
                 authorized user token there",
                token_path.display()
            ))
        })?;
        let token: StoredToken = serde_json::from_str(&token)?;
        tracing::debug!("Loaded cached Google token from {}", token_path.display());

        Ok(Self::new(client, config, token_path, token))
    }

    /// Returns a valid access token.
    pub async fn access_token(&self) -> DriveResult<String> {
        {
            let token = self.token.read().await;
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.clone());
            }
        }

        self.refresh().await
    }

    async fn refresh(&self) -> DriveResult<String> {
        let mut token = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if token.is_fresh(Utc::now()) {
            return Ok(token.access_token.clone());
        }

        let refresh_token = token
            .refresh_token
            .clone()
            .ok_or_else(|| DriveError::Auth("token expired and has no refresh token".into()))?;
        tracing::info!("Refreshing Google access token");

        let response = self
            .client
            .post(&self.config.token_uri)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DriveError::Auth(format!("token refresh failed ({status}): {body}")));
        }

        let refreshed: TokenResponse = response.json().await?;
        token.access_token = refreshed.access_token;
        token.expiry = refreshed.expires_in.map(|secs| Utc::now() + Duration::seconds(secs));
        if let Some(new_refresh_token) = refreshed.refresh_token {
            token.refresh_token = Some(new_refresh_token);
        }

        let serialized = serde_json::to_string_pretty(&*token)?;
        tokio::fs::write(&self.token_path, serialized).await?;
        tracing::debug!("Saved refreshed token to {}", self.token_path.display());

        Ok(token.access_token.clone())
    }
}

fn parse_client_config(json: &str) -> DriveResult<ClientConfig> {
    let secrets: ClientSecrets = serde_json::from_str(json)?;
    secrets.installed.or(secrets.web).ok_or_else(|| {
        DriveError::Auth("client secrets contain neither an `installed` nor a `web` client".into())
    })
}
