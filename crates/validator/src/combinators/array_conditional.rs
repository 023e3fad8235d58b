//! Constraints gated by array position
//!
//! Inside an array element the engine answers the position tokens `first`,
//! `last` and `%N` (1-based position divisible by `N`). `When` names one of
//! them, optionally negated with a leading `!`. Outside array iteration the
//! gate is closed and the check passes.

use crate::core::{
    Check, Constraint, Context, SchemaResult, SharedConstraint, Translator, fields_of,
};
use crate::macros::registrable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inner constraint applied only at matching array positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArrayConditional {
    /// Position token, e.g. `first`, `!last`, `%2`.
    pub when: String,
    /// The gated constraint.
    pub constraint: SharedConstraint,
}

impl ArrayConditional {
    /// Creates a position-gated constraint.
    pub fn new(when: impl Into<String>, constraint: impl Into<SharedConstraint>) -> Self {
        Self {
            when: when.into(),
            constraint: constraint.into(),
        }
    }

    /// Returns true when the current array position matches `When`.
    #[must_use]
    pub fn applies(&self, ctx: &Context<'_>) -> bool {
        if !ctx.in_array() {
            return false;
        }
        let (negated, token) = match self.when.strip_prefix('!') {
            Some(token) => (true, token),
            None => (false, self.when.as_str()),
        };
        ctx.has_condition(token) != negated
    }
}

impl Constraint for ArrayConditional {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        if self.applies(ctx) {
            self.constraint.check(value, ctx)
        } else {
            Check::Passed
        }
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

registrable!(ArrayConditional);
