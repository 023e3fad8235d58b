//! Closure-backed constraints
//!
//! A [`Custom`] constraint wraps code, so it has no serialized form: a
//! schema holding one can be evaluated but not serialized.

use crate::core::{Check, Constraint, Context, Translator};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type Predicate = dyn Fn(&Value, &mut Context<'_>) -> bool + Send + Sync;

/// A predicate defined in code.
///
/// # Examples
///
/// ```
/// use vigil_validator::combinators::Custom;
///
/// let even = Custom::new("even", "Value must be even", |v| {
///     v.as_i64().is_some_and(|n| n % 2 == 0)
/// });
/// ```
#[derive(Clone)]
pub struct Custom {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
    predicate: Arc<Predicate>,
}

impl Custom {
    /// Creates a constraint from a value predicate.
    pub fn new<F>(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::with_context(code, message, move |value, _ctx| predicate(value))
    }

    /// Creates a constraint whose predicate may also read or update the context.
    pub fn with_context<F>(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
        predicate: F,
    ) -> Self
    where
        F: Fn(&Value, &mut Context<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            code: code.into(),
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("code", &self.code)
            .field("message", &self.message)
            .finish()
    }
}

impl Constraint for Custom {
    fn name(&self) -> &'static str {
        "Custom"
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        if (self.predicate)(value, ctx) {
            Check::Passed
        } else {
            Check::fail(self.code.clone(), self.default_message(ctx.translator()))
        }
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        translator.translate_message(&self.message)
    }
}
