//! Case status transitions
//!
//! The status endpoint takes one of three payload shapes, selected by the
//! `action` property. Decoding reads `action` first and then the fields of
//! the matching variant.

use crate::error::{Error, Result};
use crate::types::JsonObject;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Discriminator property of a status payload
pub const ACTION_PROPERTY: &str = "action";

/// A status change for a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum StatusPayload {
    /// Mark the case resolved
    Resolve {
        /// Resolution comment
        #[serde(skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
        /// Resolution code, see [`ResolutionCode`]
        resolution_code: i64,
    },
    /// Reopen a resolved case
    Unresolve {
        /// Why the case is reopened
        comment: String,
    },
    /// Accept the proposed resolution
    Accept {
        /// Comment on the resolution
        #[serde(skip_serializing_if = "Option::is_none")]
        comment: Option<String>,
    },
}

impl StatusPayload {
    /// Value of `action` for resolving
    pub const ACTION_RESOLVE: &'static str = "resolve";
    /// Value of `action` for unresolving
    pub const ACTION_UNRESOLVE: &'static str = "unresolve";
    /// Value of `action` for accepting
    pub const ACTION_ACCEPT: &'static str = "accept";

    /// Resolve with a resolution code
    pub fn resolve(resolution_code: impl Into<i64>, comment: Option<String>) -> Self {
        Self::Resolve {
            comment,
            resolution_code: resolution_code.into(),
        }
    }

    /// Unresolve, explaining why
    pub fn unresolve(comment: impl Into<String>) -> Self {
        Self::Unresolve {
            comment: comment.into(),
        }
    }

    /// Accept the proposed resolution
    pub fn accept(comment: Option<String>) -> Self {
        Self::Accept { comment }
    }

    /// The `action` value of this payload
    pub fn action(&self) -> &'static str {
        match self {
            Self::Resolve { .. } => Self::ACTION_RESOLVE,
            Self::Unresolve { .. } => Self::ACTION_UNRESOLVE,
            Self::Accept { .. } => Self::ACTION_ACCEPT,
        }
    }

    /// Decode a payload from a JSON object
    pub fn from_object(object: &JsonObject) -> Result<Self> {
        let action = match object.get(ACTION_PROPERTY) {
            None | Some(Value::Null) => {
                return Err(Error::Discriminator {
                    property: ACTION_PROPERTY.to_string(),
                    message: "required discriminator property 'action' not found".to_string(),
                })
            }
            Some(Value::String(action)) if action.is_empty() => {
                return Err(Error::Discriminator {
                    property: ACTION_PROPERTY.to_string(),
                    message: "required discriminator property 'action' not found".to_string(),
                })
            }
            Some(Value::String(action)) => action.as_str(),
            Some(other) => {
                return Err(Error::Discriminator {
                    property: ACTION_PROPERTY.to_string(),
                    message: format!("expected a string, found {other}"),
                })
            }
        };

        let comment = optional_string(object, "comment")?;
        match action {
            Self::ACTION_RESOLVE => {
                let resolution_code = object
                    .get("resolution_code")
                    .and_then(Value::as_i64)
                    .ok_or_else(|| {
                        Error::validation("resolve payload requires an integer 'resolution_code'")
                    })?;
                Ok(Self::Resolve {
                    comment,
                    resolution_code,
                })
            }
            Self::ACTION_UNRESOLVE => {
                let comment = comment
                    .ok_or_else(|| Error::validation("unresolve payload requires a 'comment'"))?;
                Ok(Self::Unresolve { comment })
            }
            Self::ACTION_ACCEPT => Ok(Self::Accept { comment }),
            other => Err(Error::UnrecognizedVariant {
                property: ACTION_PROPERTY.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// Decode a payload from a JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Object(object) => Self::from_object(object),
            other => Err(Error::validation(format!(
                "status payload must be a JSON object, found {other}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for StatusPayload {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn optional_string(object: &JsonObject, key: &str) -> Result<Option<String>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::validation(format!(
            "'{key}' must be a string, found {other}"
        ))),
    }
}

/// Why a case was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum ResolutionCode {
    /// Client error
    ClientError = 1,
    /// Defect found with component or service
    DefectFound = 2,
    /// Documentation error
    DocumentationError = 3,
    /// Solution found in forums
    SolutionInForums = 4,
    /// Solution found in public documentation
    SolutionInPublicDocumentation = 5,
    /// Solution no longer required
    NoLongerRequired = 6,
    /// Solution provided by IBM outside of the support case
    SolvedOutsideCase = 7,
    /// Solution provided by an IBM support engineer
    SolvedBySupport = 8,
}

impl From<ResolutionCode> for i64 {
    fn from(code: ResolutionCode) -> Self {
        code as i64
    }
}

impl TryFrom<i64> for ResolutionCode {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Ok(match value {
            1 => Self::ClientError,
            2 => Self::DefectFound,
            3 => Self::DocumentationError,
            4 => Self::SolutionInForums,
            5 => Self::SolutionInPublicDocumentation,
            6 => Self::NoLongerRequired,
            7 => Self::SolvedOutsideCase,
            8 => Self::SolvedBySupport,
            other => {
                return Err(Error::invalid_value(
                    "resolution_code",
                    format!("{other} is not between 1 and 8"),
                ))
            }
        })
    }
}
