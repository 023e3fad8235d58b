//! Conditional constraints
//!
//! A [`Conditional`] applies its inner constraint only when every token in
//! `WhenConditions` is set and the `Others` expression holds. When the gate
//! is closed the check passes.
//!
//! Serialized, a conditional around a plain constraint takes the lifted
//! form, with the gate next to the inner constraint's name and fields:
//!
//! ```json
//! { "name": "NotEmpty", "fields": {}, "whenConditions": ["strict"], "othersExpr": "a && !b" }
//! ```
//!
//! A conditional read from the explicit `{"name": "Conditional", "fields": ...}`
//! form is written back in that form.

use crate::core::{
    Check, Constraint, ConstraintRef, Context, SchemaResult, SharedConstraint, Translator,
    fields_of,
};
use crate::macros::registrable;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vigil_expression::OthersExpr;

/// Inner constraint gated by condition tokens and/or an others-expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Conditional {
    /// The gated constraint.
    pub constraint: SharedConstraint,
    /// Tokens that must all be set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub when_conditions: Vec<String>,
    /// Expression that must hold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub others: Option<OthersExpr>,
    #[serde(skip, default = "explicit_form")]
    explicit: bool,
}

fn explicit_form() -> bool {
    true
}

impl Conditional {
    /// Creates a conditional with both gates.
    pub fn new(
        constraint: impl Into<SharedConstraint>,
        when_conditions: Vec<String>,
        others: Option<OthersExpr>,
    ) -> Self {
        Self {
            constraint: constraint.into(),
            when_conditions,
            others,
            explicit: false,
        }
    }

    /// Serializes as `{"name": "Conditional", ...}` instead of the lifted form.
    #[must_use = "builder methods must be chained or built"]
    pub fn explicit(mut self) -> Self {
        self.explicit = true;
        self
    }

    /// Applies `constraint` only while all `tokens` are set.
    pub fn when<I, S>(constraint: impl Into<SharedConstraint>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(constraint, tokens.into_iter().map(Into::into).collect(), None)
    }

    /// Applies `constraint` only while `expr` holds.
    pub fn others(constraint: impl Into<SharedConstraint>, expr: OthersExpr) -> Self {
        Self::new(constraint, Vec::new(), Some(expr))
    }

    /// Returns true when the gate is open.
    #[must_use]
    pub fn applies(&self, ctx: &Context<'_>) -> bool {
        ctx.all_conditions(&self.when_conditions)
            && self.others.as_ref().is_none_or(|expr| ctx.evaluate(expr))
    }

    fn is_gated(&self) -> bool {
        !self.when_conditions.is_empty() || self.others.as_ref().is_some_and(|e| !e.is_empty())
    }
}

impl Constraint for Conditional {
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

    fn to_ref(&self) -> SchemaResult<ConstraintRef> {
        let nested = self.constraint.name() == <Self as crate::core::Registrable>::NAME;
        if self.explicit || nested || !self.is_gated() {
            return Ok(ConstraintRef::new(self.name(), self.fields()?));
        }
        let mut lifted = self.constraint.to_ref()?;
        lifted.when_conditions.clone_from(&self.when_conditions);
        lifted.others_expr = self.others.clone().filter(|e| !e.is_empty());
        Ok(lifted)
    }

    fn children(&self) -> &[SharedConstraint] {
        std::slice::from_ref(&self.constraint)
    }
}

registrable!(Conditional);
