//! OAuth credential storage and refresh.
//!
//! Reads the `oauth2.json` file produced by the one-time interactive OAuth
//! bootstrap and keeps the access token usable for the duration of a run.
//! A refreshed token lives in memory only: the file keeps the original
//! refresh token, which stays valid across refreshes, so re-persisting is
//! deliberately skipped.

use crate::error::CredentialError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The credential record as written by the OAuth bootstrap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub token_uri: String,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Absent for freshly bootstrapped credentials; treated as non-expiring.
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredCredential {
    /// A credential is valid when it carries an access token that has not
    /// passed its expiry timestamp.
    pub fn is_valid(&self) -> bool {
        !self.token.is_empty() && self.expiry.map_or(true, |e| e > Utc::now())
    }

    /// An invalid credential can still be refreshed if the bootstrap stored
    /// a refresh token.
    pub fn is_refreshable(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
            && !self.token_uri.is_empty()
    }
}

/// Token endpoint response for a `refresh_token` grant.
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    grant_type: &'static str,
    refresh_token: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

/// Loads and validates the OAuth credential backing file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read and validate the credential file.
    pub fn load(&self) -> Result<StoredCredential, CredentialError> {
        let display = self.path.display().to_string();
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CredentialError::Missing(display.clone())
            } else {
                CredentialError::Io {
                    path: display.clone(),
                    source: e,
                }
            }
        })?;

        let cred: StoredCredential =
            serde_json::from_str(&raw).map_err(CredentialError::Malformed)?;

        if cred.token.is_empty() {
            return Err(CredentialError::Incomplete("token"));
        }
        if cred.token_uri.is_empty() {
            return Err(CredentialError::Incomplete("token_uri"));
        }
        if cred.client_id.is_empty() {
            return Err(CredentialError::Incomplete("client_id"));
        }
        if cred.client_secret.is_empty() {
            return Err(CredentialError::Incomplete("client_secret"));
        }

        debug!("Loaded credential from {} ({} scopes)", self.path.display(), cred.scopes.len());
        Ok(cred)
    }

    /// Return a credential that is usable for API calls.
    ///
    /// A valid credential passes through untouched with no network traffic.
    /// An expired credential with a refresh token gets exactly one refresh
    /// call against its token endpoint; a failed refresh is terminal for the
    /// run and is not retried.
    pub async fn ensure_valid(
        &self,
        client: &reqwest::Client,
        cred: StoredCredential,
    ) -> Result<StoredCredential, CredentialError> {
        if cred.is_valid() {
            return Ok(cred);
        }
        if !cred.is_refreshable() {
            return Err(CredentialError::Expired);
        }

        let refresh_token = cred
            .refresh_token
            .as_deref()
            .ok_or(CredentialError::Expired)?;

        info!("Access token expired, refreshing against {}", cred.token_uri);

        let response = client
            .post(&cred.token_uri)
            .form(&RefreshRequest {
                grant_type: "refresh_token",
                refresh_token,
                client_id: &cred.client_id,
                client_secret: &cred.client_secret,
            })
            .send()
            .await
            .map_err(CredentialError::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CredentialError::Refresh { status, message });
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(CredentialError::Http)?;

        let mut cred = cred;
        cred.token = refreshed.access_token;
        cred.expiry = refreshed
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));

        info!("Access token refreshed");
        Ok(cred)
    }
}
