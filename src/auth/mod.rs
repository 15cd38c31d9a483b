//! Authentication module
//!
//! Supports: No Auth, Basic, Bearer Token, IAM API key
//!
//! The `Authenticator` handles all auth types and caches IAM access tokens
//! until they are due for refresh.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken, DEFAULT_IAM_URL, IAM_APIKEY_GRANT_TYPE};
