//! String length constraints
//!
//! Length is measured in Unicode scalar values (chars). Values that are not
//! strings pass: the property type decides what shape a value has.

use crate::core::{Check, Constraint, Context, SchemaResult, Translator, fields_of, message_for};
use crate::macros::registrable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// LENGTH
// ============================================================================

/// String length within `[Minimum, Maximum]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Length {
    /// Minimum length (inclusive).
    #[serde(default)]
    pub minimum: usize,
    /// Maximum length (inclusive), unbounded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<usize>,
    /// Message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Length {
    /// Creates a length constraint.
    #[must_use]
    pub fn new(minimum: usize, maximum: Option<usize>) -> Self {
        Self {
            minimum,
            maximum,
            message: None,
        }
    }

    /// Overrides the failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Constraint for Length {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        let Value::String(text) = value else {
            return Check::Passed;
        };
        let len = text.chars().count();
        if len >= self.minimum && self.maximum.is_none_or(|max| len <= max) {
            Check::Passed
        } else {
            Check::fail("length", message_for(self, self.message.as_deref(), ctx.translator()))
        }
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        match (self.minimum, self.maximum) {
            (0, Some(max)) => translator.translate_format("Length must be at most {}", &[&max]),
            (min, Some(max)) => {
                translator.translate_format("Length must be between {} and {}", &[&min, &max])
            }
            (min, None) => translator.translate_format("Length must be at least {}", &[&min]),
        }
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }
}

// ============================================================================
// NOT EMPTY
// ============================================================================

/// Strings, arrays and objects must not be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NotEmpty {
    /// Message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Constraint for NotEmpty {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        let empty = match value {
            Value::String(text) => text.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            _ => false,
        };
        if empty {
            Check::fail("not_empty", message_for(self, self.message.as_deref(), ctx.translator()))
        } else {
            Check::Passed
        }
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        translator.translate_message("Value must not be empty")
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }
}

registrable!(Length, NotEmpty);
