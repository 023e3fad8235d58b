//! Regular expression constraint

use crate::core::{Check, Constraint, Context, SchemaResult, Translator, fields_of, message_for};
use crate::macros::registrable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Strings must match `Regexp` (unanchored, `regex` crate syntax).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "PatternFields")]
pub struct Pattern {
    /// Source of the expression, as serialized.
    pub regexp: String,
    /// Message override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip)]
    compiled: Regex,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PatternFields {
    regexp: String,
    #[serde(default)]
    message: Option<String>,
}

impl TryFrom<PatternFields> for Pattern {
    type Error = regex::Error;

    fn try_from(fields: PatternFields) -> Result<Self, Self::Error> {
        let mut pattern = Self::new(&fields.regexp)?;
        pattern.message = fields.message;
        Ok(pattern)
    }
}

impl Pattern {
    /// Compiles `regexp`.
    pub fn new(regexp: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regexp: regexp.to_string(),
            message: None,
            compiled: Regex::new(regexp)?,
        })
    }

    /// Overrides the failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Constraint for Pattern {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        match value {
            Value::String(text) if !self.compiled.is_match(text) => {
                Check::fail("pattern", message_for(self, self.message.as_deref(), ctx.translator()))
            }
            _ => Check::Passed,
        }
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        translator.translate_format("Value must match {}", &[&self.regexp])
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }
}

registrable!(Pattern);
