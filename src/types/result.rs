//! Tagged outcome of one relay call.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::Result;

/// Result surfaced to the caller of `improve`.
///
/// Serializes as `{"success": true, "suggestions": [...]}` or
/// `{"success": false, "errorKind": "...", "reason": "...", "rawResponse": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImprovementResult {
    Success {
        success: Success<true>,
        suggestions: Vec<String>,
    },
    Failure {
        success: Success<false>,
        #[serde(rename = "errorKind")]
        error_kind: String,
        reason: String,
        #[serde(rename = "rawResponse", skip_serializing_if = "Option::is_none", default)]
        raw_response: Option<String>,
    },
}

/// Boolean literal used as the `success` discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Success<const V: bool>;

impl<const V: bool> Serialize for Success<V> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_bool(V)
    }
}

impl<'de, const V: bool> Deserialize<'de> for Success<V> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = bool::deserialize(deserializer)?;
        if value == V {
            Ok(Success)
        } else {
            Err(serde::de::Error::custom(format!("expected success = {}", V)))
        }
    }
}

impl ImprovementResult {
    pub fn success(suggestions: Vec<String>) -> Self {
        ImprovementResult::Success {
            success: Success,
            suggestions,
        }
    }

    pub fn failure(error: &Error) -> Self {
        ImprovementResult::Failure {
            success: Success,
            error_kind: error.kind().to_string(),
            reason: error.to_string(),
            raw_response: error.raw_response().map(String::from),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ImprovementResult::Success { .. })
    }

    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            ImprovementResult::Success { suggestions, .. } => Some(suggestions),
            ImprovementResult::Failure { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<&str> {
        match self {
            ImprovementResult::Success { .. } => None,
            ImprovementResult::Failure { error_kind, .. } => Some(error_kind),
        }
    }
}

impl From<Result<Vec<String>>> for ImprovementResult {
    fn from(result: Result<Vec<String>>) -> Self {
        match result {
            Ok(suggestions) => ImprovementResult::success(suggestions),
            Err(e) => ImprovementResult::failure(&e),
        }
    }
}
