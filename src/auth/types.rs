//! Auth configuration types
//!
//! These types represent the runtime auth configuration, either built
//! directly by the caller or resolved from external configuration.

use crate::error::{Error, Result};
use crate::types::AuthType;
use chrono::{DateTime, Utc};

/// Default IAM token service endpoint
pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com";

/// Path of the token operation on the IAM token service
pub const IAM_TOKEN_PATH: &str = "/identity/token";

/// Grant type used to exchange an API key for an IAM access token
pub const IAM_APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Authentication configuration
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    NoAuth,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Bearer token managed by the caller
    BearerToken {
        /// The bearer token
        token: String,
    },

    /// IAM API key exchanged for short-lived access tokens
    Iam {
        /// The IAM API key
        apikey: String,
        /// Token service base URL (defaults to [`DEFAULT_IAM_URL`])
        url: Option<String>,
        /// Optional client id for the token request
        client_id: Option<String>,
        /// Optional client secret for the token request
        client_secret: Option<String>,
        /// Optional scope for the token request
        scope: Option<String>,
    },
}

impl AuthConfig {
    /// Create a basic auth config
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Create a bearer token config
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::BearerToken {
            token: token.into(),
        }
    }

    /// Create an IAM config that uses the default token service
    pub fn iam(apikey: impl Into<String>) -> Self {
        Self::Iam {
            apikey: apikey.into(),
            url: None,
            client_id: None,
            client_secret: None,
            scope: None,
        }
    }

    /// The auth scheme of this config
    pub fn auth_type(&self) -> AuthType {
        match self {
            Self::NoAuth => AuthType::NoAuth,
            Self::Basic { .. } => AuthType::Basic,
            Self::BearerToken { .. } => AuthType::BearerToken,
            Self::Iam { .. } => AuthType::Iam,
        }
    }

    /// Validate the credentials held by this config
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::NoAuth => Ok(()),
            Self::Basic { username, password } => {
                check_credential("username", username)?;
                check_credential("password", password)
            }
            Self::BearerToken { token } => {
                if token.is_empty() {
                    return Err(Error::missing_field("bearer_token"));
                }
                Ok(())
            }
            Self::Iam {
                apikey,
                client_id,
                client_secret,
                ..
            } => {
                check_credential("apikey", apikey)?;
                match (client_id, client_secret) {
                    (Some(_), None) | (None, Some(_)) => Err(Error::config(
                        "Client id and client secret must both be specified or both omitted",
                    )),
                    _ => Ok(()),
                }
            }
        }
    }
}

/// Reject credentials that are empty or still carry placeholder punctuation
fn check_credential(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::missing_field(field));
    }
    let has_braces = value.starts_with('{') && value.ends_with('}');
    let has_quotes = value.starts_with('"') && value.ends_with('"');
    if has_braces || has_quotes {
        return Err(Error::invalid_value(
            field,
            "must not start or end with curly brackets or quotation marks",
        ));
    }
    Ok(())
}

/// Cached access token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
    /// When a replacement should be fetched
    pub refresh_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token,
            expires_at,
            refresh_at: expires_at,
        }
    }

    /// Create a token that expires in N seconds from now.
    ///
    /// The token is refreshed once 80% of its lifetime has elapsed.
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let now = Utc::now();
        Self {
            token,
            expires_at: Some(now + chrono::Duration::seconds(seconds)),
            refresh_at: Some(now + chrono::Duration::seconds(seconds * 4 / 5)),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }

    /// Check if the token should be replaced before the next request
    pub fn needs_refresh(&self) -> bool {
        if self.is_expired() {
            return true;
        }
        self.refresh_at.is_some_and(|at| Utc::now() >= at)
    }
}
