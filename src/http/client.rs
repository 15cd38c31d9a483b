//! HTTP client with retry and authentication
//!
//! Provides the transport shared by every service client. It handles:
//! - Service URL resolution and path parameter encoding
//! - Opt-in retries with exponential backoff
//! - Authentication through the auth module
//! - Gzip response negotiation
//! - Error classification and service error message extraction

use super::request::{RequestBody, RequestConfig};
use super::response::DetailedResponse;
use crate::auth::Authenticator;
use crate::error::{Error, Result};
use crate::types::StringMap;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default number of retries once retries are enabled
pub const DEFAULT_MAX_RETRIES: u32 = 4;

/// Default cap on the delay between retries once retries are enabled
pub const DEFAULT_MAX_RETRY_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub service_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries (0 disables retries)
    pub max_retries: u32,
    /// Delay before the first retry, doubled on each further attempt
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
    /// Negotiate and decode gzip-compressed responses
    pub enable_gzip: bool,
    /// Skip TLS certificate verification
    pub disable_ssl_verification: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 0,
            initial_backoff: Duration::from_secs(1),
            max_backoff: DEFAULT_MAX_RETRY_INTERVAL,
            default_headers: StringMap::new(),
            user_agent: crate::common::user_agent().to_string(),
            enable_gzip: false,
            disable_ssl_verification: false,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the service URL
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.config.service_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the initial and maximum backoff delays
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Enable or disable gzip response negotiation
    pub fn gzip(mut self, enable: bool) -> Self {
        self.config.enable_gzip = enable;
        self
    }

    /// Skip TLS certificate verification
    pub fn disable_ssl_verification(mut self, disable: bool) -> Self {
        self.config.disable_ssl_verification = disable;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client with retry and authentication
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Authenticator>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        if let Some(url) = &config.service_url {
            validate_service_url(url)?;
        }
        let client = build_client(&config)?;
        Ok(Self {
            client,
            config,
            authenticator: None,
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, authenticator: Authenticator) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.authenticator = Some(authenticator);
        Ok(client)
    }

    /// Set the authenticator
    pub fn set_authenticator(&mut self, authenticator: Authenticator) {
        self.authenticator = Some(authenticator);
    }

    /// Get the authenticator, if any
    pub fn authenticator(&self) -> Option<&Authenticator> {
        self.authenticator.as_ref()
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Get the service URL
    pub fn service_url(&self) -> &str {
        self.config.service_url.as_deref().unwrap_or_default()
    }

    /// Set the service URL
    pub fn set_service_url(&mut self, url: impl Into<String>) -> Result<()> {
        let url = url.into();
        validate_service_url(&url)?;
        self.config.service_url = Some(url);
        Ok(())
    }

    /// Replace the headers sent with every request
    pub fn set_default_headers(&mut self, headers: StringMap) {
        self.config.default_headers = headers;
    }

    /// Enable or disable gzip response negotiation
    pub fn set_enable_gzip(&mut self, enable: bool) -> Result<()> {
        if self.config.enable_gzip != enable {
            self.config.enable_gzip = enable;
            self.client = build_client(&self.config)?;
        }
        Ok(())
    }

    /// Whether gzip response negotiation is enabled
    pub fn gzip_enabled(&self) -> bool {
        self.config.enable_gzip
    }

    /// Enable automatic retries. Zero values select the defaults.
    pub fn enable_retries(&mut self, max_retries: u32, max_retry_interval: Duration) {
        self.config.max_retries = if max_retries == 0 {
            DEFAULT_MAX_RETRIES
        } else {
            max_retries
        };
        self.config.max_backoff = if max_retry_interval.is_zero() {
            DEFAULT_MAX_RETRY_INTERVAL
        } else {
            max_retry_interval
        };
    }

    /// Disable automatic retries
    pub fn disable_retries(&mut self) {
        self.config.max_retries = 0;
    }

    /// Send a request, retrying transient failures
    pub async fn send(&self, config: &RequestConfig) -> Result<Response> {
        let full_url = config.resolve_url(self.service_url())?;
        let max_retries = config.max_retries.unwrap_or(self.config.max_retries);
        let timeout = config.timeout.unwrap_or(self.config.timeout);

        let mut attempt = 0;

        loop {
            let mut req = self
                .client
                .request(config.method.clone(), full_url.clone());

            // Request-specific headers override defaults with the same name
            for (key, value) in &self.config.default_headers {
                if !config.has_header(key) {
                    req = req.header(key.as_str(), value.as_str());
                }
            }
            for (key, value) in &config.headers {
                req = req.header(key.as_str(), value.as_str());
            }

            if !config.query.is_empty() {
                req = req.query(&config.query);
            }

            match &config.body {
                RequestBody::Empty => {}
                RequestBody::Json(body) => {
                    req = req.json(body);
                }
                RequestBody::Multipart(parts) => {
                    let mut form = Form::new();
                    for part in parts {
                        let mut p = Part::bytes(part.data.to_vec());
                        if let Some(filename) = &part.filename {
                            p = p.file_name(filename.clone());
                        }
                        if let Some(content_type) = &part.content_type {
                            p = p.mime_str(content_type)?;
                        }
                        form = form.part(part.name.clone(), p);
                    }
                    req = req.multipart(form);
                }
            }

            req = req.timeout(timeout);

            if let Some(ref auth) = self.authenticator {
                req = auth.apply(req).await?;
            }

            debug!(
                "{} {} (attempt {}/{})",
                config.method,
                full_url,
                attempt + 1,
                max_retries + 1
            );

            let (err, retry_after) = match req.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(
                        "Request succeeded: {} {} -> {}",
                        config.method,
                        full_url,
                        response.status()
                    );
                    return Ok(response);
                }
                Ok(response) => {
                    let status = response.status();
                    let retry_after = if status == StatusCode::TOO_MANY_REQUESTS {
                        extract_retry_after(&response)
                    } else {
                        None
                    };
                    let body = response.text().await.unwrap_or_default();
                    (status_error(status, body), retry_after)
                }
                Err(e) if e.is_timeout() => (
                    Error::Timeout {
                        timeout_ms: timeout.as_millis() as u64,
                    },
                    None,
                ),
                Err(e) => (Error::Http(e), None),
            };

            if attempt >= max_retries || !err.is_retryable() {
                return Err(err);
            }

            let delay = retry_after.map_or_else(
                || self.calculate_backoff(attempt),
                |d| d.min(self.config.max_backoff),
            );
            warn!(
                "{}, attempt {}/{}, retrying in {:?}",
                err,
                attempt + 1,
                max_retries + 1,
                delay
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    /// Send a request and decode the JSON response body
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        config: &RequestConfig,
    ) -> Result<DetailedResponse<T>> {
        let response = self.send(config).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::Http)?;
        let result: T = if body.is_empty() {
            serde_json::from_value(Value::Null)?
        } else {
            serde_json::from_slice(&body)?
        };
        Ok(DetailedResponse::new(status, headers, result))
    }

    /// Send a request and return the raw response body
    pub async fn request_bytes(&self, config: &RequestConfig) -> Result<DetailedResponse<Bytes>> {
        let response = self.send(config).await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::Http)?;
        Ok(DetailedResponse::new(status, headers, body))
    }

    /// Exponential backoff delay for a given attempt, capped at `max_backoff`
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = self
            .config
            .initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt));
        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_authenticator", &self.authenticator.is_some())
            .finish_non_exhaustive()
    }
}

fn build_client(config: &HttpClientConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .user_agent(&config.user_agent)
        .gzip(config.enable_gzip)
        .danger_accept_invalid_certs(config.disable_ssl_verification)
        .build()
        .map_err(Error::Http)
}

/// Service URLs must be absolute and must not contain unresolved placeholders
fn validate_service_url(url: &str) -> Result<()> {
    if url.contains('{') || url.contains('}') {
        return Err(Error::invalid_value(
            "service_url",
            "must not contain curly brackets",
        ));
    }
    url::Url::parse(url)?;
    Ok(())
}

/// Build a status error, pulling a readable message out of the response body
fn status_error(status: StatusCode, body: String) -> Error {
    let message = extract_error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    });
    Error::HttpStatus {
        status: status.as_u16(),
        message,
        body,
    }
}

/// Extract the error message from an IBM Cloud error envelope
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    if let Some(message) = json
        .get("errors")
        .and_then(|e| e.get(0))
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
    {
        return Some(message.to_string());
    }

    ["error", "message", "errorMessage"]
        .iter()
        .find_map(|key| json.get(*key).and_then(Value::as_str))
        .map(String::from)
}

/// Extract the Retry-After header value, in seconds
fn extract_retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
        .map(Duration::from_secs)
}
