//! Error types for the Platform Services SDK
//!
//! This module defines the error hierarchy for the entire SDK.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the SDK
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid client or pager configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with the configuration
        message: String,
    },

    /// A required configuration property is absent
    #[error("Missing required config field: {field}")]
    MissingConfigField {
        /// Name of the missing property
        field: String,
    },

    /// A configuration property has an unusable value
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue {
        /// Name of the property
        field: String,
        /// Why the value was rejected
        message: String,
    },

    /// An operation argument failed validation before any request was sent
    #[error("Invalid argument: {message}")]
    Validation {
        /// Which argument is invalid and why
        message: String,
    },

    /// JSON could not be encoded or decoded
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    /// Credentials could not be applied to a request
    #[error("Authentication failed: {message}")]
    Auth {
        /// Failure detail
        message: String,
    },

    /// The IAM token endpoint rejected the exchange
    #[error("Token request failed: {message}")]
    TokenRequest {
        /// Status and body returned by the token endpoint
        message: String,
    },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// Response status code
        status: u16,
        /// Message taken from the error envelope, or the status reason
        message: String,
        /// Raw response body
        body: String,
    },

    /// The request did not complete within its timeout
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed, in milliseconds
        timeout_ms: u64,
    },

    /// A URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    /// The `next` link of a page carries an unreadable cursor
    #[error("Error retrieving '{param}' query parameter from URL '{url}': {message}")]
    CursorParse {
        /// Query parameter that was read
        param: String,
        /// The link it was read from
        url: String,
        /// Parse failure detail
        message: String,
    },

    /// `get_next` was called on an exhausted pager
    #[error("No more results available")]
    NoMoreResults,

    // ============================================================================
    // Payload Errors
    // ============================================================================
    /// The discriminator property is missing, empty or not a string
    #[error("Error unmarshalling discriminator property '{property}': {message}")]
    Discriminator {
        /// Name of the discriminator property
        property: String,
        /// Failure detail
        message: String,
    },

    /// The discriminator names no known variant
    #[error("Unrecognized value for discriminator property '{property}': {value}")]
    UnrecognizedVariant {
        /// Name of the discriminator property
        property: String,
        /// The value found
        value: String,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Local I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A named local file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was looked up
        path: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Any other error, usually with added context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a validation error for a bad argument
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
            body: body.into(),
        }
    }

    /// Create a cursor parse error
    pub fn cursor_parse(
        param: impl Into<String>,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::CursorParse {
            param: param.into(),
            url: url.into(),
            message: message.into(),
        }
    }

    /// Status code of a failed HTTP response, if this error carries one
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the transport should retry the request that produced this error
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// 429 and every 5xx except 501 Not Implemented
fn is_retryable_status(status: u16) -> bool {
    status == 429 || (status >= 500 && status != 501)
}

/// Result type alias for the SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
