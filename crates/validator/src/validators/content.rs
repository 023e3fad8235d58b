//! Value equality constraints

use crate::core::{Check, Constraint, Context, SchemaResult, Translator, fields_of, message_for};
use crate::macros::registrable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// EQUALS
// ============================================================================

/// The value must equal `Value` exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Equals {
    /// Expected value.
    pub value: Value,
    /// Message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Equals {
    /// Creates an equality constraint.
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            message: None,
        }
    }
}

impl Constraint for Equals {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        if *value == self.value {
            Check::Passed
        } else {
            Check::fail("equals", message_for(self, self.message.as_deref(), ctx.translator()))
        }
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        translator.translate_format("Value must equal {}", &[&self.value])
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }
}

// ============================================================================
// ONE OF VALUES
// ============================================================================

/// The value must equal one of `Values`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneOfValues {
    /// Allowed values.
    pub values: Vec<Value>,
    /// Message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OneOfValues {
    /// Creates the constraint from allowed values.
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            message: None,
        }
    }
}

impl Constraint for OneOfValues {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        if self.values.contains(value) {
            Check::Passed
        } else {
            Check::fail(
                "one_of_values",
                message_for(self, self.message.as_deref(), ctx.translator()),
            )
        }
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        let listed = self
            .values
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        translator.translate_format("Value must be one of {}", &[&listed])
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }
}

registrable!(Equals, OneOfValues);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equality_is_exact() {
        let mut ctx = Context::new();
        let eq = Equals::new("premium");
        assert!(eq.check(&json!("premium"), &mut ctx).is_passed());
        assert!(!eq.check(&json!("Premium"), &mut ctx).is_passed());
        assert_eq!(
            eq.default_message(&crate::core::DefaultTranslator),
            "Value must equal \"premium\""
        );
    }

    #[test]
    fn membership() {
        let mut ctx = Context::new();
        let one_of = OneOfValues::new([json!("a"), json!(1)]);
        assert!(one_of.check(&json!(1), &mut ctx).is_passed());
        assert_eq!(
            one_of.check(&json!("b"), &mut ctx),
            Check::fail("one_of_values", "Value must be one of \"a\", 1")
        );
    }
}
