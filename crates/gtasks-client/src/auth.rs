//! OAuth token management for Google API calls.
//!
//! Loads an authorized-user credentials file (the JSON written by Google's
//! client libraries after a consent flow) and exchanges its refresh token
//! for short-lived access tokens. Tokens are cached in memory only; the
//! credentials file is never rewritten.

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;

use gtasks_shared::errors::{ClientError, ClientResult};

/// Tokens within this window of expiry are refreshed eagerly.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Authorized-user credentials as stored on disk.
#[derive(Debug, Clone, Deserialize)]
struct StoredCredentials {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    expiry: Option<DateTime<Utc>>,
}

/// Successful response from the token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expiry: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expiry - Duration::seconds(EXPIRY_MARGIN_SECS) > now
    }
}

enum TokenSource {
    /// Refreshable credentials from an authorized-user file.
    Refresh {
        credentials: StoredCredentials,
        token_url: String,
        http: reqwest::Client,
    },
    /// Fixed token, used by tests and stub environments.
    Static(String),
}

/// Hands out bearer tokens, refreshing through the OAuth token endpoint
/// when the cached one is missing or near expiry. Cloning is cheap and all
/// clones share one cache.
#[derive(Clone)]
pub struct TokenManager {
    source: Arc<TokenSource>,
    cache: Arc<RwLock<Option<CachedToken>>>,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match *self.source {
            TokenSource::Refresh { .. } => "refresh",
            TokenSource::Static(_) => "static",
        };
        f.debug_struct("TokenManager").field("source", &kind).finish()
    }
}

impl TokenManager {
    /// Load credentials from an authorized-user JSON file.
    pub fn from_credentials_file(path: &Path, token_url: &str) -> ClientResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClientError::config_error(format!(
                "Cannot read credentials file {}: {e}",
                path.display()
            ))
        })?;
        let credentials: StoredCredentials = serde_json::from_str(&contents).map_err(|e| {
            ClientError::config_error(format!(
                "Invalid credentials file {}: {e}",
                path.display()
            ))
        })?;
        if credentials.refresh_token.is_empty() {
            return Err(ClientError::config_error(
                "Credentials file has no refresh_token; re-authorize the application",
            ));
        }

        // Seed the cache with the stored access token if it is still usable.
        let cache = match (&credentials.token, credentials.expiry) {
            (Some(token), Some(expiry)) => {
                let cached = CachedToken {
                    access_token: token.clone(),
                    expiry,
                };
                cached.is_fresh(Utc::now()).then_some(cached)
            }
            _ => None,
        };

        Ok(Self {
            source: Arc::new(TokenSource::Refresh {
                credentials,
                token_url: token_url.to_string(),
                http: reqwest::Client::new(),
            }),
            cache: Arc::new(RwLock::new(cache)),
        })
    }

    /// Token manager that always returns the given token. For tests.
    pub fn static_token(token: impl Into<String>) -> Self {
        Self {
            source: Arc::new(TokenSource::Static(token.into())),
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Current access token, refreshing first if the cached one is missing
    /// or expires within the margin.
    pub async fn access_token(&self) -> ClientResult<String> {
        match &*self.source {
            TokenSource::Static(token) => Ok(token.clone()),
            TokenSource::Refresh {
                credentials,
                token_url,
                http,
            } => {
                if let Some(cached) = &*self.cache.read().await {
                    if cached.is_fresh(Utc::now()) {
                        return Ok(cached.access_token.clone());
                    }
                }

                let mut cache = self.cache.write().await;
                // Another caller may have refreshed while we waited.
                if let Some(cached) = &*cache {
                    if cached.is_fresh(Utc::now()) {
                        return Ok(cached.access_token.clone());
                    }
                }

                tracing::debug!("Refreshing Google access token");
                let refreshed = refresh_token(http, token_url, credentials).await?;
                let token = refreshed.access_token.clone();
                *cache = Some(refreshed);
                Ok(token)
            }
        }
    }

    /// True when a usable token is currently cached, without refreshing.
    pub async fn has_fresh_token(&self) -> bool {
        match &*self.source {
            TokenSource::Static(_) => true,
            TokenSource::Refresh { .. } => self
                .cache
                .read()
                .await
                .as_ref()
                .is_some_and(|c| c.is_fresh(Utc::now())),
        }
    }
}

async fn refresh_token(
    http: &reqwest::Client,
    token_url: &str,
    credentials: &StoredCredentials,
) -> ClientResult<CachedToken> {
    let response = http
        .post(token_url)
        .form(&[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("refresh_token", credentials.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Auth(format!(
            "Token refresh failed with status {status}: {body}"
        )));
    }

    let token: TokenResponse = response.json().await?;
    Ok(CachedToken {
        expiry: Utc::now() + Duration::seconds(token.expires_in),
        access_token: token.access_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_credentials(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_static_token() {
        let manager = TokenManager::static_token("test-token");
        assert_eq!(manager.access_token().await.unwrap(), "test-token");
        assert!(manager.has_fresh_token().await);
    }

    #[tokio::test]
    async fn test_load_credentials_with_fresh_stored_token() {
        let expiry = Utc::now() + Duration::hours(1);
        let json = format!(
            r#"{{
                "client_id": "id.apps.googleusercontent.com",
                "client_secret": "secret",
                "refresh_token": "1//refresh",
                "token": "ya29.stored",
                "expiry": "{}"
            }}"#,
            expiry.to_rfc3339()
        );
        let file = write_credentials(&json);
        let manager =
            TokenManager::from_credentials_file(file.path(), "http://unused.test/token").unwrap();

        // Stored token is still valid, so no network call happens.
        assert_eq!(manager.access_token().await.unwrap(), "ya29.stored");
        assert!(manager.has_fresh_token().await);
    }

    #[tokio::test]
    async fn test_expired_stored_token_is_not_seeded() {
        let expiry = Utc::now() - Duration::hours(1);
        let json = format!(
            r#"{{
                "client_id": "id",
                "client_secret": "secret",
                "refresh_token": "1//refresh",
                "token": "ya29.stale",
                "expiry": "{}"
            }}"#,
            expiry.to_rfc3339()
        );
        let file = write_credentials(&json);
        let manager =
            TokenManager::from_credentials_file(file.path(), "http://unused.test/token").unwrap();
        assert!(!manager.has_fresh_token().await);
    }

    #[test]
    fn test_missing_refresh_token_rejected() {
        let file = write_credentials(
            r#"{"client_id": "id", "client_secret": "secret", "refresh_token": ""}"#,
        );
        let err =
            TokenManager::from_credentials_file(file.path(), "http://unused.test/token")
                .unwrap_err();
        assert!(err.to_string().contains("refresh_token"));
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = TokenManager::from_credentials_file(
            Path::new("/nonexistent/credentials.json"),
            "http://unused.test/token",
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_cached_token_margin() {
        let now = Utc::now();
        let fresh = CachedToken {
            access_token: "a".to_string(),
            expiry: now + Duration::seconds(120),
        };
        assert!(fresh.is_fresh(now));

        // Within the 60-second margin counts as expired.
        let nearly = CachedToken {
            access_token: "b".to_string(),
            expiry: now + Duration::seconds(30),
        };
        assert!(!nearly.is_fresh(now));
    }
}
