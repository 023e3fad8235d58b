//! Documentation metadata carried through serialization untouched.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// OpenAPI-style documentation for a validator or property.
///
/// The engine never reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OasInfo {
    /// Short title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Format hint such as `email` or `date-time`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Example value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    /// Marked deprecated.
    #[serde(skip_serializing_if = "crate::is_false")]
    pub deprecated: bool,
}

impl OasInfo {
    /// Creates metadata with a description.
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }
}
