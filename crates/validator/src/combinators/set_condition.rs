//! Constraints that set condition tokens
//!
//! These never fail. They exist to drive later steps: a token set here can
//! make another property mandatory (`mandatoryWhen`), open a
//! [`Conditional`](super::Conditional) gate or select a conditional variant.

use crate::core::{
    Check, ConditionTarget, Constraint, Context, SchemaResult, SharedConstraint, Translator,
    fields_of,
};
use crate::macros::registrable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// SET CONDITION IF
// ============================================================================

/// Sets `Condition` when the inner constraint passes.
///
/// # Examples
///
/// ```
/// use vigil_validator::combinators::SetConditionIf;
/// use vigil_validator::core::ConditionTarget;
/// use vigil_validator::validators::Equals;
///
/// let premium = SetConditionIf::new(Equals::new("premium"), "IS_PREMIUM")
///     .target(ConditionTarget::Global);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetConditionIf {
    /// The test.
    pub constraint: SharedConstraint,
    /// Token to set.
    pub condition: String,
    /// Scope the token is set in.
    #[serde(default)]
    pub target: ConditionTarget,
}

impl SetConditionIf {
    /// Sets `condition` in the current scope when `constraint` passes.
    pub fn new(constraint: impl Into<SharedConstraint>, condition: impl Into<String>) -> Self {
        Self {
            constraint: constraint.into(),
            condition: condition.into(),
            target: ConditionTarget::Current,
        }
    }

    /// Chooses the scope.
    #[must_use = "builder methods must be chained or built"]
    pub fn target(mut self, target: ConditionTarget) -> Self {
        self.target = target;
        self
    }
}

impl Constraint for SetConditionIf {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        if ctx.isolated(|ctx| self.constraint.check(value, ctx)).is_passed() {
            ctx.set_condition(self.condition.as_str(), self.target);
        }
        Check::Passed
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        self.constraint.default_message(translator)
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }

    fn children(&self) -> &[SharedConstraint] {
        std::slice::from_ref(&self.constraint)
    }
}

// ============================================================================
// SET CONDITION FROM
// ============================================================================

/// Sets a token derived from the value: `Prefix` followed by the value's text.
///
/// Strings contribute their content, numbers and booleans their JSON text.
/// Other values set nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetConditionFrom {
    /// Prepended to the value text.
    #[serde(default)]
    pub prefix: String,
    /// Scope the token is set in.
    #[serde(default)]
    pub target: ConditionTarget,
}

impl SetConditionFrom {
    /// Creates the constraint.
    pub fn new(prefix: impl Into<String>, target: ConditionTarget) -> Self {
        Self {
            prefix: prefix.into(),
            target,
        }
    }
}

impl Constraint for SetConditionFrom {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        let text = match value {
            Value::String(text) => text.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return Check::Passed,
        };
        ctx.set_condition(format!("{}{text}", self.prefix), self.target);
        Check::Passed
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        translator.translate_message("Condition could not be set")
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }
}

registrable!(SetConditionIf, SetConditionFrom);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::ConstraintSet;
    use crate::validators::Equals;
    use serde_json::json;

    #[test]
    fn sets_token_when_inner_passes() {
        let c = SetConditionIf::new(Equals::new("premium"), "IS_PREMIUM").target(ConditionTarget::Global);
        let mut ctx = Context::new();
        assert!(c.check(&json!("free"), &mut ctx).is_passed());
        assert!(!ctx.has_condition("IS_PREMIUM"));
        assert!(c.check(&json!("premium"), &mut ctx).is_passed());
        assert!(ctx.has_condition("IS_PREMIUM"));
        assert!(ctx.violations().is_empty());
    }

    #[test]
    fn failing_test_keeps_chain_going() {
        let c = SetConditionIf::new(ConstraintSet::all_of().with(Equals::new("x")).stop_on_fail(), "X");
        let mut ctx = Context::new();
        assert!(c.check(&json!("toolong"), &mut ctx).is_passed());
        assert!(!ctx.has_condition("X"));
        assert!(ctx.chain_continues());
    }

    #[test]
    fn derives_token_from_value() {
        let c = SetConditionFrom::new("kind:", ConditionTarget::Current);
        let mut ctx = Context::new();
        c.check(&json!("gold"), &mut ctx);
        c.check(&json!(3), &mut ctx);
        c.check(&json!(null), &mut ctx);
        assert!(ctx.has_condition("kind:gold"));
        assert!(ctx.has_condition("kind:3"));
    }

    #[test]
    fn reserved_derived_tokens_are_skipped() {
        let c = SetConditionFrom::default();
        let mut ctx = Context::new();
        assert!(c.check(&json!("%2"), &mut ctx).is_passed());
        assert!(ctx.conditions().tokens().is_empty());
    }
}
