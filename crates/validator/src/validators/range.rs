//! Numeric bound constraints
//!
//! Bounds compare as `f64`. Non-numeric values pass.

use crate::core::{Check, Constraint, Context, SchemaResult, Translator, fields_of, message_for};
use crate::is_false;
use crate::macros::registrable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[inline]
fn above(value: f64, bound: f64, exclusive: bool) -> bool {
    if exclusive { value > bound } else { value >= bound }
}

#[inline]
fn below(value: f64, bound: f64, exclusive: bool) -> bool {
    if exclusive { value < bound } else { value <= bound }
}

// ============================================================================
// RANGE
// ============================================================================

/// Number within optional lower and upper bounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Range {
    /// Lower bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Upper bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Lower bound excluded.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive_minimum: bool,
    /// Upper bound excluded.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive_maximum: bool,
    /// Message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Range {
    /// Creates an inclusive range.
    #[must_use]
    pub fn new(minimum: f64, maximum: f64) -> Self {
        Self {
            minimum: Some(minimum),
            maximum: Some(maximum),
            ..Self::default()
        }
    }

    /// Excludes both bounds.
    #[must_use = "builder methods must be chained or built"]
    pub fn exclusive(mut self) -> Self {
        self.exclusive_minimum = true;
        self.exclusive_maximum = true;
        self
    }

    /// Overrides the failure message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn contains(&self, n: f64) -> bool {
        self.minimum.is_none_or(|min| above(n, min, self.exclusive_minimum))
            && self.maximum.is_none_or(|max| below(n, max, self.exclusive_maximum))
    }
}

impl Constraint for Range {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        match value.as_f64() {
            Some(n) if !self.contains(n) => {
                Check::fail("range", message_for(self, self.message.as_deref(), ctx.translator()))
            }
            _ => Check::Passed,
        }
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        match (self.minimum, self.maximum) {
            (Some(min), Some(max)) => {
                translator.translate_format("Value must be between {} and {}", &[&min, &max])
            }
            (Some(min), None) => Minimum {
                value: min,
                exclusive: self.exclusive_minimum,
                message: None,
            }
            .default_message(translator),
            (None, Some(max)) => Maximum {
                value: max,
                exclusive: self.exclusive_maximum,
                message: None,
            }
            .default_message(translator),
            (None, None) => translator.translate_message("Value must be a number"),
        }
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }
}

// ============================================================================
// MINIMUM / MAXIMUM
// ============================================================================

/// Number at or above (or strictly above) `Value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Minimum {
    /// The bound.
    pub value: f64,
    /// Bound excluded.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive: bool,
    /// Message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Minimum {
    /// `value >= bound`.
    #[must_use]
    pub fn inclusive(bound: f64) -> Self {
        Self {
            value: bound,
            exclusive: false,
            message: None,
        }
    }

    /// `value > bound`.
    #[must_use]
    pub fn exclusive(bound: f64) -> Self {
        Self {
            value: bound,
            exclusive: true,
            message: None,
        }
    }
}

impl Constraint for Minimum {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        match value.as_f64() {
            Some(n) if !above(n, self.value, self.exclusive) => {
                Check::fail("minimum", message_for(self, self.message.as_deref(), ctx.translator()))
            }
            _ => Check::Passed,
        }
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        if self.exclusive {
            translator.translate_format("Value must be greater than {}", &[&self.value])
        } else {
            translator.translate_format("Value must be at least {}", &[&self.value])
        }
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }
}

/// Number at or below (or strictly below) `Value`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Maximum {
    /// The bound.
    pub value: f64,
    /// Bound excluded.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclusive: bool,
    /// Message override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Maximum {
    /// `value <= bound`.
    #[must_use]
    pub fn inclusive(bound: f64) -> Self {
        Self {
            value: bound,
            exclusive: false,
            message: None,
        }
    }

    /// `value < bound`.
    #[must_use]
    pub fn exclusive(bound: f64) -> Self {
        Self {
            value: bound,
            exclusive: true,
            message: None,
        }
    }
}

impl Constraint for Maximum {
    fn name(&self) -> &'static str {
        <Self as crate::core::Registrable>::NAME
    }

    fn check(&self, value: &Value, ctx: &mut Context<'_>) -> Check {
        match value.as_f64() {
            Some(n) if !below(n, self.value, self.exclusive) => {
                Check::fail("maximum", message_for(self, self.message.as_deref(), ctx.translator()))
            }
            _ => Check::Passed,
        }
    }

    fn default_message(&self, translator: &dyn Translator) -> String {
        if self.exclusive {
            translator.translate_format("Value must be less than {}", &[&self.value])
        } else {
            translator.translate_format("Value must be at most {}", &[&self.value])
        }
    }

    fn fields(&self) -> SchemaResult<Value> {
        fields_of(self)
    }
}

registrable!(Range, Minimum, Maximum);
