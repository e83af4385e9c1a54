//! OAuth2 client-credentials authentication.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::{ClientConfig, ClientError, ClientResult};

/// OAuth2 token response from the auth service.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[allow(dead_code)]
    token_type: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Returns true if the token is expired or will expire within the grace period.
    fn is_expired(&self, grace_period: Duration) -> bool {
        Utc::now() + grace_period >= self.expires_at
    }
}

/// Caches the access token until shortly before it expires.
#[derive(Debug)]
pub struct TokenCache {
    token_url: String,
    client_id: String,
    client_secret: String,
    scope: Option<String>,
    http_client: reqwest::Client,
    cached_token: RwLock<Option<CachedToken>>,
    grace_period: Duration,
}

impl TokenCache {
    pub fn new(config: &ClientConfig, http_client: reqwest::Client) -> Self {
        let scope = if config.scopes.is_empty() {
            None
        } else {
            Some(config.scopes.join(" "))
        };

        Self {
            token_url: format!("{}/oauth/token", config.auth_url.trim_end_matches('/')),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scope,
            http_client,
            cached_token: RwLock::new(None),
            grace_period: Duration::minutes(5),
        }
    }

    /// Gets a valid access token, refreshing if necessary.
    #[instrument(skip(self))]
    pub async fn get_token(&self) -> ClientResult<String> {
        {
            let cache = self.cached_token.read().await;
            if let Some(token) = cache.as_ref() {
                if !token.is_expired(self.grace_period) {
                    debug!("Using cached token");
                    return Ok(token.access_token.clone());
                }
            }
        }

        debug!("Refreshing access token");
        let new_token = self.acquire_token().await?;
        let access_token = new_token.access_token.clone();
        *self.cached_token.write().await = Some(new_token);

        Ok(access_token)
    }

    async fn acquire_token(&self) -> ClientResult<CachedToken> {
        let mut params = vec![("grant_type", "client_credentials")];
        if let Some(scope) = &self.scope {
            params.push(("scope", scope.as_str()));
        }

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&params)
            .send()
            .await
            .map_err(|e| ClientError::Auth(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Auth(format!(
                "Token request failed with status {}: {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Auth(format!("Failed to parse token response: {}", e)))?;

        let expires_at = Utc::now() + Duration::seconds(token_response.expires_in);
        debug!(
            "Acquired new token, expires at {}",
            expires_at.format("%Y-%m-%d %H:%M:%S UTC")
        );

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at,
        })
    }

    /// Invalidates the cached token, forcing a refresh on next use.
    pub async fn invalidate(&self) {
        *self.cached_token.write().await = None;
    }
}
