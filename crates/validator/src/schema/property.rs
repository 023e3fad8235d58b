//! Property validators: the rules for one named property

use crate::core::SharedConstraint;
use crate::is_false;
use crate::schema::oas::OasInfo;
use crate::schema::validator::Validator;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use vigil_expression::OthersExpr;

// ============================================================================
// PROPERTY TYPE
// ============================================================================

/// Expected JSON type of a property.
///
/// Serialized as its token (`"string"`); read from either the token or the
/// numeric code (`1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PropertyType {
    /// Anything.
    #[default]
    Any,
    /// A JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A whole number; whole-valued floats such as `3.0` qualify.
    Integer,
    /// `true` or `false`.
    Boolean,
    /// A JSON object.
    Object,
    /// A JSON array.
    Array,
}

impl PropertyType {
    const ALL: [Self; 7] = [
        Self::Any,
        Self::String,
        Self::Number,
        Self::Integer,
        Self::Boolean,
        Self::Object,
        Self::Array,
    ];

    /// The wire token.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// The numeric code.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Looks a type up by numeric code.
    #[must_use]
    pub fn from_code(code: u64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Returns true when `value` (non-null) has this type.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => match value {
                Value::Number(n) => {
                    n.is_i64()
                        || n.is_u64()
                        || n.as_f64().is_some_and(|f| f.is_finite() && f.fract() == 0.0)
                }
                _ => false,
            },
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown property type '{s}'"))
    }
}

impl Serialize for PropertyType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PropertyType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TypeVisitor;

        impl Visitor<'_> for TypeVisitor {
            type Value = PropertyType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a property type token or code 0-6")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                PropertyType::from_code(v)
                    .ok_or_else(|| E::custom(format!("unknown property type code {v}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom(format!("unknown property type code {v}")))
                    .and_then(|v| self.visit_u64(v))
            }
        }

        deserializer.deserialize_any(TypeVisitor)
    }
}

// ============================================================================
// PROPERTY VALIDATOR
// ============================================================================

/// Rules for one named property.
///
/// # Examples
///
/// ```
/// use vigil_validator::schema::PropertyValidator;
/// use vigil_validator::validators::Length;
///
/// let name = PropertyValidator::string()
///     .mandatory()
///     .not_null()
///     .constraint(Length::new(1, Some(64)));
/// assert!(name.mandatory);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyValidator {
    /// Expected type.
    #[serde(rename = "type")]
    pub kind: PropertyType,
    /// `null` is rejected.
    #[serde(skip_serializing_if = "is_false")]
    pub not_null: bool,
    /// The property must be present (see `mandatory_when`).
    #[serde(skip_serializing_if = "is_false")]
    pub mandatory: bool,
    /// When non-empty, `mandatory` only applies while all these tokens are set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mandatory_when: Vec<String>,
    /// Position for ordered property checks.
    #[serde(skip_serializing_if = "is_zero")]
    pub order: i64,
    /// The property is ignored unless all these tokens are set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub when_conditions: Vec<String>,
    /// The property must be absent while any of these tokens is set.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unwanted_conditions: Vec<String>,
    /// Constraint chain, checked in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<SharedConstraint>,
    /// Validator for object (or array-of-object) values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_validator: Option<Box<Validator>>,
    /// Makes the property mandatory while the expression holds.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_empty_expr"
    )]
    pub required_with: Option<OthersExpr>,
    /// Message for a `required_with` miss.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_with_message: Option<String>,
    /// Makes the property unwanted while the expression holds.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::non_empty_expr"
    )]
    pub unwanted_with: Option<OthersExpr>,
    /// Message for an `unwanted_with` hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unwanted_with_message: Option<String>,
    /// Documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oas_info: Option<OasInfo>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(n: &i64) -> bool {
    *n == 0
}

impl PropertyValidator {
    /// Creates rules for a property of type `kind`.
    #[must_use]
    pub fn new(kind: PropertyType) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Any type.
    #[must_use]
    pub fn any() -> Self {
        Self::new(PropertyType::Any)
    }

    /// A string.
    #[must_use]
    pub fn string() -> Self {
        Self::new(PropertyType::String)
    }

    /// A number.
    #[must_use]
    pub fn number() -> Self {
        Self::new(PropertyType::Number)
    }

    /// A whole number.
    #[must_use]
    pub fn integer() -> Self {
        Self::new(PropertyType::Integer)
    }

    /// A boolean.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(PropertyType::Boolean)
    }

    /// An object checked by `nested`.
    #[must_use]
    pub fn object(nested: Validator) -> Self {
        Self::new(PropertyType::Object).validator(nested)
    }

    /// An array whose elements are objects checked by `nested`.
    #[must_use]
    pub fn array(nested: Validator) -> Self {
        Self::new(PropertyType::Array).validator(nested)
    }

    /// Requires presence.
    #[must_use = "builder methods must be chained or built"]
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Rejects `null`.
    #[must_use = "builder methods must be chained or built"]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Requires presence only while all `tokens` are set.
    #[must_use = "builder methods must be chained or built"]
    pub fn mandatory_when<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory = true;
        self.mandatory_when = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the position for ordered checks.
    #[must_use = "builder methods must be chained or built"]
    pub fn order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Ignores the property unless all `tokens` are set.
    #[must_use = "builder methods must be chained or built"]
    pub fn when<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.when_conditions = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Rejects the property while any of `tokens` is set.
    #[must_use = "builder methods must be chained or built"]
    pub fn unwanted_when<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unwanted_conditions = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a constraint to the chain.
    #[must_use = "builder methods must be chained or built"]
    pub fn constraint(mut self, constraint: impl Into<SharedConstraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Attaches a nested validator.
    #[must_use = "builder methods must be chained or built"]
    pub fn validator(mut self, nested: Validator) -> Self {
        self.object_validator = Some(Box::new(nested));
        self
    }

    /// Requires the property while `expr` holds.
    #[must_use = "builder methods must be chained or built"]
    pub fn required_with(mut self, expr: OthersExpr) -> Self {
        self.required_with = Some(expr).filter(|e| !e.is_empty());
        self
    }

    /// Sets the `required_with` message.
    #[must_use = "builder methods must be chained or built"]
    pub fn required_with_message(mut self, message: impl Into<String>) -> Self {
        self.required_with_message = Some(message.into());
        self
    }

    /// Rejects the property while `expr` holds.
    #[must_use = "builder methods must be chained or built"]
    pub fn unwanted_with(mut self, expr: OthersExpr) -> Self {
        self.unwanted_with = Some(expr).filter(|e| !e.is_empty());
        self
    }

    /// Sets the `unwanted_with` message.
    #[must_use = "builder methods must be chained or built"]
    pub fn unwanted_with_message(mut self, message: impl Into<String>) -> Self {
        self.unwanted_with_message = Some(message.into());
        self
    }

    /// Attaches documentation.
    #[must_use = "builder methods must be chained or built"]
    pub fn oas(mut self, info: OasInfo) -> Self {
        self.oas_info = Some(info);
        self
    }
}
