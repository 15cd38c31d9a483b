//! External configuration
//!
//! Service clients can be configured without code changes. Properties for a
//! service named `case_management` are looked up under keys such as
//! `CASE_MANAGEMENT_URL` and `CASE_MANAGEMENT_APIKEY`, first in a credentials
//! file and then in the process environment.
//!
//! The credentials file is located through `IBM_CREDENTIALS_FILE`, falling
//! back to `ibm-credentials.env` in the working directory and then in the
//! home directory. It uses dotenv syntax.

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::types::{AuthType, StringMap};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable naming an explicit credentials file
pub const CREDENTIALS_FILE_ENV: &str = "IBM_CREDENTIALS_FILE";

/// Default credentials file name
pub const DEFAULT_CREDENTIALS_FILE_NAME: &str = "ibm-credentials.env";

// ============================================================================
// Service Properties
// ============================================================================

/// Properties configured externally for one service
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceProperties {
    /// Service endpoint
    pub url: Option<String>,
    /// Explicit authentication scheme
    pub auth_type: Option<AuthType>,
    /// IAM API key
    pub apikey: Option<String>,
    /// IAM token service URL
    pub auth_url: Option<String>,
    /// IAM client id
    pub client_id: Option<String>,
    /// IAM client secret
    pub client_secret: Option<String>,
    /// IAM scope
    pub scope: Option<String>,
    /// Basic auth username
    pub username: Option<String>,
    /// Basic auth password
    pub password: Option<String>,
    /// Static bearer token
    pub bearer_token: Option<String>,
    /// Skip TLS certificate verification
    pub disable_ssl: bool,
    /// Negotiate gzip-compressed responses
    pub enable_gzip: bool,
    /// Turn on automatic retries
    pub enable_retries: bool,
    /// Retry count when retries are enabled
    pub max_retries: Option<u32>,
    /// Maximum delay between retries
    pub retry_interval: Option<Duration>,
}

impl ServiceProperties {
    /// Extract the properties for `service_name` from a flat key/value map.
    ///
    /// Returns `Ok(None)` when the map holds no key for the service.
    pub fn from_map(service_name: &str, values: &StringMap) -> Result<Option<Self>> {
        let prefix = format!("{}_", env_prefix(service_name));
        let mut props = Self::default();
        let mut found = false;

        for (key, value) in values {
            let Some(suffix) = key.strip_prefix(&prefix) else {
                continue;
            };
            let value = value.trim();
            found = true;

            match suffix {
                "URL" => props.url = non_empty(value),
                "AUTH_TYPE" => {
                    let auth_type = AuthType::parse(value).ok_or_else(|| {
                        Error::invalid_value(key.as_str(), format!("unknown auth type '{value}'"))
                    })?;
                    props.auth_type = Some(auth_type);
                }
                "APIKEY" => props.apikey = non_empty(value),
                "AUTH_URL" => props.auth_url = non_empty(value),
                "CLIENT_ID" => props.client_id = non_empty(value),
                "CLIENT_SECRET" => props.client_secret = non_empty(value),
                "SCOPE" => props.scope = non_empty(value),
                "USERNAME" => props.username = non_empty(value),
                "PASSWORD" => props.password = non_empty(value),
                "BEARER_TOKEN" => props.bearer_token = non_empty(value),
                "DISABLE_SSL" => props.disable_ssl = parse_bool(key, value)?,
                "ENABLE_GZIP" => props.enable_gzip = parse_bool(key, value)?,
                "ENABLE_RETRIES" => props.enable_retries = parse_bool(key, value)?,
                "MAX_RETRIES" => {
                    let retries = value.parse().map_err(|_| {
                        Error::invalid_value(key.as_str(), format!("'{value}' is not a count"))
                    })?;
                    props.max_retries = Some(retries);
                }
                "RETRY_INTERVAL" => {
                    let secs: u64 = value.parse().map_err(|_| {
                        Error::invalid_value(key.as_str(), format!("'{value}' is not a number of seconds"))
                    })?;
                    props.retry_interval = Some(Duration::from_secs(secs));
                }
                _ => debug!("Ignoring unknown property {}", key),
            }
        }

        Ok(found.then_some(props))
    }

    /// The authentication scheme: explicit, or inferred from the credentials present
    pub fn resolved_auth_type(&self) -> Result<AuthType> {
        if let Some(auth_type) = self.auth_type {
            return Ok(auth_type);
        }
        if self.apikey.is_some() {
            Ok(AuthType::Iam)
        } else if self.bearer_token.is_some() {
            Ok(AuthType::BearerToken)
        } else if self.username.is_some() {
            Ok(AuthType::Basic)
        } else {
            Err(Error::missing_field("AUTH_TYPE"))
        }
    }

    /// Build and validate the authenticator configuration
    pub fn auth_config(&self) -> Result<AuthConfig> {
        let config = match self.resolved_auth_type()? {
            AuthType::NoAuth => AuthConfig::NoAuth,
            AuthType::Basic => AuthConfig::Basic {
                username: required(&self.username, "USERNAME")?,
                password: required(&self.password, "PASSWORD")?,
            },
            AuthType::BearerToken => AuthConfig::BearerToken {
                token: required(&self.bearer_token, "BEARER_TOKEN")?,
            },
            AuthType::Iam => AuthConfig::Iam {
                apikey: required(&self.apikey, "APIKEY")?,
                url: self.auth_url.clone(),
                client_id: self.client_id.clone(),
                client_secret: self.client_secret.clone(),
                scope: self.scope.clone(),
            },
        };
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Lookup
// ============================================================================

/// Upper-cased service name with `-` replaced by `_`
pub fn env_prefix(service_name: &str) -> String {
    service_name.to_ascii_uppercase().replace('-', "_")
}

/// Read a dotenv-style credentials file into a map
pub fn load_credentials_file(path: &Path) -> Result<StringMap> {
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let iter = dotenvy::from_path_iter(path).map_err(|e| {
        Error::config(format!("Failed to read credentials file {}: {e}", path.display()))
    })?;

    let mut values = StringMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| {
            Error::config(format!("Failed to parse credentials file {}: {e}", path.display()))
        })?;
        values.insert(key, value);
    }
    Ok(values)
}

/// Locate the credentials file, if any
pub fn credentials_file_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(CREDENTIALS_FILE_ENV) {
        let path = PathBuf::from(explicit);
        return path.is_file().then_some(path);
    }

    let cwd = PathBuf::from(DEFAULT_CREDENTIALS_FILE_NAME);
    if cwd.is_file() {
        return Some(cwd);
    }

    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(DEFAULT_CREDENTIALS_FILE_NAME))
        .filter(|path| path.is_file())
}

/// Resolve the properties for a service from the credentials file, then the environment
pub fn get_service_properties(service_name: &str) -> Result<ServiceProperties> {
    if let Some(path) = credentials_file_path() {
        let values = load_credentials_file(&path)?;
        if let Some(props) = ServiceProperties::from_map(service_name, &values)? {
            debug!("Loaded {} properties from {}", service_name, path.display());
            return Ok(props);
        }
    }

    let env: StringMap = std::env::vars().collect();
    if let Some(props) = ServiceProperties::from_map(service_name, &env)? {
        debug!("Loaded {} properties from environment", service_name);
        return Ok(props);
    }

    Ok(ServiceProperties::default())
}

/// Build the authenticator configuration for a service from external configuration
pub fn get_authenticator_from_environment(service_name: &str) -> Result<AuthConfig> {
    get_service_properties(service_name)?.auth_config()
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn required(value: &Option<String>, suffix: &str) -> Result<String> {
    value.clone().ok_or_else(|| Error::missing_field(suffix))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(Error::invalid_value(key, format!("'{value}' is not a boolean"))),
    }
}
