//! JSON form of validators
//!
//! Serialization checks every constraint for a serialized form first, so a
//! schema holding a closure-backed constraint fails with
//! [`SchemaError::NotSerializable`] instead of a generic serde message.
//! Deserialization rebuilds constraints through the registry; a name the
//! registry does not know fails with [`SchemaError::UnknownConstraint`].

use crate::core::{SchemaError, SchemaResult, SharedConstraint};
use crate::schema::property::PropertyValidator;
use crate::schema::validator::Validator;
use crate::schema::variant::ConditionalVariant;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Keys whose values hold serialized constraints, in validators and in the
/// fields of the built-in combinators.
const CONSTRAINT_KEYS: [&str; 4] = ["constraints", "arrayConstraints", "Constraints", "Constraint"];

impl Validator {
    /// Reads a validator from JSON text.
    ///
    /// # Errors
    ///
    /// Malformed JSON, an unknown constraint name, bad constraint fields or a
    /// bad expression.
    pub fn from_json_str(text: &str) -> SchemaResult<Self> {
        Self::from_json_value(serde_json::from_str(text)?)
    }

    /// Reads a validator from a decoded JSON value.
    ///
    /// # Errors
    ///
    /// As for [`Validator::from_json_str`].
    pub fn from_json_value(value: Value) -> SchemaResult<Self> {
        Self::deserialize(&value).map_err(|err| match unknown_constraint(&value) {
            Some(name) => SchemaError::UnknownConstraint { name },
            None => SchemaError::Json(err),
        })
    }

    /// Writes the validator as a JSON value.
    ///
    /// # Errors
    ///
    /// [`SchemaError::NotSerializable`] when a constraint has no serialized form.
    pub fn to_json_value(&self) -> SchemaResult<Value> {
        self.ensure_serializable()?;
        Ok(serde_json::to_value(self)?)
    }

    /// Writes the validator as pretty-printed JSON text.
    ///
    /// # Errors
    ///
    /// As for [`Validator::to_json_value`].
    pub fn to_json_string(&self) -> SchemaResult<String> {
        self.ensure_serializable()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every constraint in the tree for a serialized form.
    ///
    /// # Errors
    ///
    /// The first [`SchemaError::NotSerializable`] found.
    pub fn ensure_serializable(&self) -> SchemaResult<()> {
        check_all(&self.constraints)?;
        check_all(&self.array_constraints)?;
        check_properties(&self.properties)?;
        self.conditional_variants
            .iter()
            .try_for_each(ConditionalVariant::ensure_serializable)
    }
}

impl ConditionalVariant {
    fn ensure_serializable(&self) -> SchemaResult<()> {
        check_all(&self.constraints)?;
        check_properties(&self.properties)?;
        self.conditional_variants
            .iter()
            .try_for_each(Self::ensure_serializable)
    }
}

impl PropertyValidator {
    fn ensure_serializable(&self) -> SchemaResult<()> {
        check_all(&self.constraints)?;
        match &self.object_validator {
            Some(nested) => nested.ensure_serializable(),
            None => Ok(()),
        }
    }
}

fn check_all(constraints: &[SharedConstraint]) -> SchemaResult<()> {
    constraints
        .iter()
        .try_for_each(SharedConstraint::ensure_serializable)
}

/// First constraint name in `value` that the registry does not know.
fn unknown_constraint(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.iter().find_map(|(key, inner)| {
            let refs: &[Value] = match inner {
                _ if !CONSTRAINT_KEYS.contains(&key.as_str()) => &[],
                Value::Array(items) => items.as_slice(),
                Value::Object(_) => std::slice::from_ref(inner),
                _ => &[],
            };
            refs.iter()
                .filter_map(|r| r.get("name").and_then(Value::as_str))
                .find(|name| !crate::registry::contains(name))
                .map(str::to_string)
                .or_else(|| unknown_constraint(inner))
        }),
        Value::Array(items) => items.iter().find_map(unknown_constraint),
        _ => None,
    }
}

fn check_properties(properties: &IndexMap<String, Option<PropertyValidator>>) -> SchemaResult<()> {
    properties
        .values()
        .flatten()
        .try_for_each(PropertyValidator::ensure_serializable)
}
