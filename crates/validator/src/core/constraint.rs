//! The constraint trait and its shared, serializable handle
//!
//! Constraints are value-like predicates over a JSON value. Schemas hold them
//! through [`SharedConstraint`], an `Arc` handle: cloning a schema shares the
//! constraint instances instead of copying them.
//!
//! On the wire a constraint is a [`ConstraintRef`]:
//!
//! ```json
//! { "name": "Length", "fields": { "Minimum": 1, "Maximum": 10 } }
//! ```
//!
//! A ref carrying `whenConditions` or `othersExpr` is lifted into a
//! [`Conditional`](crate::combinators::Conditional) wrapper on read.

use crate::core::context::Context;
use crate::core::error::{SchemaError, SchemaResult};
use crate::core::translate::Translator;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use vigil_expression::OthersExpr;

// ============================================================================
// CHECK
// ============================================================================

/// Why a constraint failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Violation code.
    pub code: Cow<'static, str>,
    /// Translated message.
    pub message: String,
}

/// Outcome of a single constraint check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// The value satisfies the constraint (or the constraint does not apply).
    Passed,
    /// The value violates the constraint.
    Failed(Failure),
}

impl Check {
    /// Creates a failed check.
    pub fn fail(code: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self::Failed(Failure {
            code: code.into(),
            message: message.into(),
        })
    }

    /// Returns true for [`Check::Passed`].
    #[must_use]
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Passes when `ok`, otherwise fails with `failure()`.
    pub fn from_bool(ok: bool, failure: impl FnOnce() -> Failure) -> Self {
        if ok { Self::Passed } else { Self::Failed(failure()) }
    }
}

// ============================================================================
// CONSTRAINT TRAIT
// ============================================================================

/// A predicate over a JSON value, registered by a stable name.
///
/// `check` may read and set condition tokens and may ask the engine to cease
/// the current chain or stop altogether, through the [`Context`].
pub trait Constraint: fmt::Debug + Send + Sync {
    /// Stable registry name.
    fn name(&self) -> &'static str;

    /// Checks `value`.
    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check;

    /// The message reported on failure when none is configured.
    fn default_message(&self, translator: &dyn Translator) -> String;

    /// The `fields` object of the serialized form.
    ///
    /// Constraints without a serialized form keep the default, which makes
    /// any schema holding them unserializable.
    fn fields(&self) -> SchemaResult<Value> {
        Err(SchemaError::NotSerializable {
            name: self.name().to_string(),
        })
    }

    /// The full serialized form.
    fn to_ref(&self) -> SchemaResult<ConstraintRef> {
        Ok(ConstraintRef::new(self.name(), self.fields()?))
    }

    /// Constraints nested inside this one.
    fn children(&self) -> &[SharedConstraint] {
        &[]
    }
}

/// A constraint the registry can build from its `fields` object.
pub trait Registrable: Constraint + DeserializeOwned + 'static {
    /// Registry name; equal to what [`Constraint::name`] returns.
    const NAME: &'static str;
}

/// Serializes a constraint's own fields for [`Constraint::fields`].
pub fn fields_of<T: Serialize>(constraint: &T) -> SchemaResult<Value> {
    Ok(serde_json::to_value(constraint)?)
}

/// Picks the configured message or the constraint's default, translated.
pub fn message_for(
    constraint: &dyn Constraint,
    custom: Option<&str>,
    translator: &dyn Translator,
) -> String {
    match custom {
        Some(message) => translator.translate_message(message),
        None => constraint.default_message(translator),
    }
}

// ============================================================================
// WIRE FORM
// ============================================================================

/// Serialized form of a constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintRef {
    /// Registry name.
    pub name: String,
    /// Constraint-specific fields.
    #[serde(default = "empty_fields")]
    pub fields: Value,
    /// Tokens that must all be set for the constraint to apply.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub when_conditions: Vec<String>,
    /// Others-expression that must hold for the constraint to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub others_expr: Option<OthersExpr>,
}

fn empty_fields() -> Value {
    Value::Object(serde_json::Map::new())
}

impl ConstraintRef {
    /// Creates an ungated ref.
    pub fn new(name: impl Into<String>, fields: Value) -> Self {
        Self {
            name: name.into(),
            fields,
            when_conditions: Vec::new(),
            others_expr: None,
        }
    }

    /// True when the ref carries gating keys.
    #[must_use]
    pub fn is_gated(&self) -> bool {
        !self.when_conditions.is_empty() || self.others_expr.as_ref().is_some_and(|e| !e.is_empty())
    }
}

// ============================================================================
// SHARED HANDLE
// ============================================================================

/// Reference-counted handle to a constraint.
#[derive(Clone)]
pub struct SharedConstraint(Arc<dyn Constraint>);

impl SharedConstraint {
    /// Wraps a constraint.
    pub fn new<C: Constraint + 'static>(constraint: C) -> Self {
        Self(Arc::new(constraint))
    }

    /// Wraps an existing `Arc`.
    #[must_use]
    pub fn from_arc(constraint: Arc<dyn Constraint>) -> Self {
        Self(constraint)
    }

    /// Returns true when both handles point at the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Builds a constraint from its serialized form through the registry.
    pub fn from_ref(raw: ConstraintRef) -> SchemaResult<Self> {
        let gated = raw.is_gated();
        let inner = crate::registry::build(&raw.name, raw.fields)?;
        if !gated {
            return Ok(inner);
        }
        let others = raw.others_expr.filter(|e| !e.is_empty());
        Ok(Self::new(crate::combinators::Conditional::new(inner, raw.when_conditions, others)))
    }

    /// Fails with [`SchemaError::NotSerializable`] if this constraint, or any
    /// constraint nested in it, has no serialized form.
    pub fn ensure_serializable(&self) -> SchemaResult<()> {
        for child in self.children() {
            child.ensure_serializable()?;
        }
        self.to_ref().map(drop)
    }
}

impl Deref for SharedConstraint {
    type Target = dyn Constraint;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl fmt::Debug for SharedConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<C: Constraint + 'static> From<C> for SharedConstraint {
    fn from(constraint: C) -> Self {
        Self::new(constraint)
    }
}

/// Equal when both handles share an instance or serialize identically.
impl PartialEq for SharedConstraint {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        match (self.to_ref(), other.to_ref()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl Serialize for SharedConstraint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_ref()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SharedConstraint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = ConstraintRef::deserialize(deserializer)?;
        Self::from_ref(raw).map_err(de::Error::custom)
    }
}
