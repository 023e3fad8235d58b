//! Collection size constraint

use crate::core::{Check, Constraint, Context, SchemaResult, Translator, fields_of, message_for};
use crate::macros::registrable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Element count of an array, or key count of an object, within bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Size {
    /// Minimum count (inclusive).
    #[serde(default)]
    pub minimum: usize,
    /// Maximum count (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<usize>,
    /// Message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Size {
    /// Creates a size constraint.
    #[must_use]
    pub fn new(minimum: usize, maximum: Option<usize>) -> Self {
        Self {
            minimum,
            maximum,
            message: None,
        }
    }
}

impl Constraint for Size {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        let count = match value {
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => return Check::Passed,
        };
        if count >= self.minimum && self.maximum.is_none_or(|max| count <= max) {
            Check::Passed
        } else {
            Check::fail("size", message_for(self, self.message.as_deref(), ctx.translator()))
        }
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        match self.maximum {
            Some(max) => translator
                .translate_format("Size must be between {} and {}", &[&self.minimum, &max]),
            None => translator.translate_format("Size must be at least {}", &[&self.minimum]),
        }
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }
}

registrable!(Size);
