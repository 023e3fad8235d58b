//! Constraint sets: all-of and one-of composition

use crate::core::{
    Check, Constraint, Context, Failure, SchemaResult, SharedConstraint, Translator, fields_of,
};
use crate::is_false;
use crate::macros::registrable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A list of constraints checked together.
///
/// All-of (the default) fails with the first failing member. One-of passes
/// as soon as any member passes and otherwise fails with every member's
/// message. With `StopOnFail`, a failure also ends the rest of the
/// property's constraint chain and its nested validation.
///
/// # Examples
///
/// ```
/// use vigil_validator::combinators::ConstraintSet;
/// use vigil_validator::validators::{Length, Pattern};
///
/// let username = ConstraintSet::all_of()
///     .with(Length::new(3, Some(20)))
///     .with(Pattern::new("^[a-z0-9_]+$").unwrap())
///     .stop_on_fail();
/// assert_eq!(username.constraints.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConstraintSet {
    /// Members, checked in order.
    #[serde(default)]
    pub constraints: Vec<SharedConstraint>,
    /// Pass if any member passes.
    #[serde(default, skip_serializing_if = "is_false")]
    pub one_of: bool,
    /// On failure, cease the rest of the chain.
    #[serde(default, skip_serializing_if = "is_false")]
    pub stop_on_fail: bool,
    /// Message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConstraintSet {
    /// Creates an empty all-of set.
    #[must_use]
    pub fn all_of() -> Self {
        Self::default()
    }

    /// Creates an empty one-of set.
    #[must_use]
    pub fn one_of() -> Self {
        Self {
            one_of: true,
            ..Self::default()
        }
    }

    /// Adds a member.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, constraint: impl Into<SharedConstraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Ceases the property's chain when the set fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn stop_on_fail(mut self) -> Self {
        self.stop_on_fail = true;
        self
    }

    /// Overrides the failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn failed(&self, failure: Failure, ctx: &mut Context<'_>) -> Check {
        if self.stop_on_fail {
            ctx.cease_further();
        }
        let message = match &self.message {
            Some(message) => ctx.translator().translate_message(message),
            None => failure.message,
        };
        Check::Failed(Failure {
            code: failure.code,
            message,
        })
    }
}

impl Constraint for ConstraintSet {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        // Members never cease the enclosing chain; only the set's own flag does.
        if !self.one_of {
            for member in &self.constraints {
                if let Check::Failed(failure) = ctx.isolated(|ctx| member.check(value, ctx)) {
                    return self.failed(failure, ctx);
                }
            }
            return Check::Passed;
        }

        if self.constraints.is_empty() {
            return Check::Passed;
        }
        let mut messages = Vec::with_capacity(self.constraints.len());
        for member in &self.constraints {
            match ctx.isolated(|ctx| member.check(value, ctx)) {
                Check::Passed => return Check::Passed,
                Check::Failed(failure) => messages.push(failure.message),
            }
        }
        let joined = messages.join("; ");
        let message = ctx
            .translator()
            .translate_format("Must satisfy one of: {}", &[&joined]);
        self.failed(
            Failure {
                code: "one_of".into(),
                message,
            },
            ctx,
        )
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        if self.one_of {
            let members: Vec<String> = self
                .constraints
                .iter()
                .map(|c| c.default_message(translator))
                .collect();
            translator.translate_format("Must satisfy one of: {}", &[&members.join("; ")])
        } else {
            translator.translate_message("Value does not satisfy all constraints")
        }
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }

    fn children(&self) -> &[SharedConstraint] {
        &self.constraints
    }
}

registrable!(ConstraintSet);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::{Equals, Length, Range};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn all_of_reports_first_failure() {
        let set = ConstraintSet::all_of()
            .with(Length::new(1, Some(10)))
            .with(Length::new(8, None));
        let mut ctx = Context::new();
        assert_eq!(
            set.check(&json!("hello"), &mut ctx),
            Check::fail("length", "Length must be at least 8")
        );
        assert!(ctx.chain_continues());
    }

    #[test]
    fn one_of_passes_on_any_member() {
        let set = ConstraintSet::one_of()
            .with(Range::new(3.0, 4.0))
            .with(Range::new(10.0, 20.0));
        let mut ctx = Context::new();
        assert!(set.check(&json!(3), &mut ctx).is_passed());
        assert!(set.check(&json!(15), &mut ctx).is_passed());
        assert!(!set.check(&json!(7), &mut ctx).is_passed());
        // Range does not apply to strings, so it passes them.
        assert!(set.check(&json!("short"), &mut ctx).is_passed());
    }

    #[test]
    fn one_of_fails_when_no_member_passes() {
        let set = ConstraintSet::one_of()
            .with(Length::new(10, None))
            .with(Length::new(0, Some(2)));
        let mut ctx = Context::new();
        assert_eq!(
            set.check(&json!("short"), &mut ctx),
            Check::fail(
                "one_of",
                "Must satisfy one of: Length must be at least 10; Length must be at most 2"
            )
        );
    }

    #[test]
    fn stop_on_fail_ceases_chain() {
        let set = ConstraintSet::all_of()
            .with(Length::new(10, None))
            .stop_on_fail()
            .with_message("bad value");
        let mut ctx = Context::new();
        assert_eq!(set.check(&json!("x"), &mut ctx), Check::fail("length", "bad value"));
        assert!(!ctx.chain_continues());
    }

    #[test]
    fn passing_one_of_keeps_chain_despite_member_stop() {
        let set = ConstraintSet::one_of()
            .with(ConstraintSet::all_of().with(Equals::new("a")).stop_on_fail())
            .with(Length::new(0, None));
        let mut ctx = Context::new();
        assert!(set.check(&json!("toolong"), &mut ctx).is_passed());
        assert!(ctx.chain_continues());
    }

    #[test]
    fn member_stop_does_not_outlive_the_set() {
        let set = ConstraintSet::all_of().with(ConstraintSet::all_of().with(Length::new(10, None)).stop_on_fail());
        let mut ctx = Context::new();
        assert!(!set.check(&json!("x"), &mut ctx).is_passed());
        assert!(ctx.chain_continues());
    }

    #[test]
    fn serializes_members() {
        let set = ConstraintSet::all_of()
            .with(Length::new(1, Some(10)))
            .with(Range::new(3.0, 4.0));
        assert_eq!(
            set.fields().unwrap(),
            json!({"Constraints": [
                {"name": "Length", "fields": {"Minimum": 1, "Maximum": 10}},
                {"name": "Range", "fields": {"Minimum": 3.0, "Maximum": 4.0}}
            ]})
        );
    }
}
