//! Common types used throughout the SDK
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Authentication Types
// ============================================================================

/// Authentication scheme named in external configuration (`<SERVICE>_AUTH_TYPE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// No authentication
    #[serde(alias = "noAuth")]
    NoAuth,
    /// HTTP Basic authentication
    Basic,
    /// Caller-managed bearer token
    #[serde(alias = "bearerToken")]
    BearerToken,
    /// IAM API key exchanged for an access token
    #[default]
    Iam,
}

impl AuthType {
    /// Parse an auth type name, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "noauth" => Some(Self::NoAuth),
            "basic" => Some(Self::Basic),
            "bearertoken" => Some(Self::BearerToken),
            "iam" => Some(Self::Iam),
            _ => None,
        }
    }

    /// Canonical name of the auth type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAuth => "noauth",
            Self::Basic => "basic",
            Self::BearerToken => "bearertoken",
            Self::Iam => "iam",
        }
    }
}

impl std::fmt::Display for AuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
