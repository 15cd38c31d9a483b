//! Authenticator implementation
//!
//! Handles applying authentication to requests and managing IAM token refresh.

use super::types::{AuthConfig, CachedToken, DEFAULT_IAM_URL, IAM_APIKEY_GRANT_TYPE, IAM_TOKEN_PATH};
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached token for IAM auth
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Result<Self> {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        })
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::NoAuth => Ok(req),

            AuthConfig::Basic { username, password } => {
                Ok(req.basic_auth(username, Some(password)))
            }

            AuthConfig::BearerToken { token } => Ok(req.bearer_auth(token)),

            AuthConfig::Iam { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.needs_refresh() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if !token.needs_refresh() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Fetch a new token based on auth type
    async fn fetch_new_token(&self) -> Result<CachedToken> {
        match &self.config {
            AuthConfig::Iam {
                apikey,
                url,
                client_id,
                client_secret,
                scope,
            } => {
                self.fetch_iam_token(
                    apikey,
                    url.as_deref().unwrap_or(DEFAULT_IAM_URL),
                    client_id.as_deref().zip(client_secret.as_deref()),
                    scope.as_deref(),
                )
                .await
            }
            _ => Err(Error::auth(
                "Token refresh not supported for this auth type",
            )),
        }
    }

    /// Exchange an API key for an IAM access token
    async fn fetch_iam_token(
        &self,
        apikey: &str,
        base_url: &str,
        client: Option<(&str, &str)>,
        scope: Option<&str>,
    ) -> Result<CachedToken> {
        let token_url = format!("{}{IAM_TOKEN_PATH}", base_url.trim_end_matches('/'));

        let mut form = vec![
            ("grant_type", IAM_APIKEY_GRANT_TYPE),
            ("apikey", apikey),
            ("response_type", "cloud_iam"),
        ];
        if let Some(scope) = scope {
            form.push(("scope", scope));
        }

        let mut req = self
            .http_client
            .post(&token_url)
            .header("Accept", "application/json")
            .form(&form);
        if let Some((id, secret)) = client {
            req = req.basic_auth(id, Some(secret));
        }

        debug!("Requesting IAM access token from {}", token_url);
        let response = req.send().await.map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenRequest {
                message: format!("IAM token request failed with status {status}: {body}"),
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        info!("Obtained new IAM access token");
        Ok(token_response.into_cached_token())
    }

    /// Clear the cached token, forcing a refresh on the next request
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("auth_type", &self.config.auth_type())
            .finish_non_exhaustive()
    }
}

/// IAM token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expiration: Option<i64>,
    #[serde(default)]
    #[allow(dead_code)]
    token_type: Option<String>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        match (self.expires_in, self.expiration) {
            (Some(secs), _) => CachedToken::expires_in(self.access_token, secs),
            (None, Some(epoch)) => CachedToken::new(
                self.access_token,
                chrono::DateTime::from_timestamp(epoch, 0),
            ),
            (None, None) => CachedToken::new(self.access_token, None),
        }
    }
}
