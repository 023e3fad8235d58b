//! Violations and the evaluation report
//!
//! A [`Violation`] is a data problem: the input does not satisfy the schema.
//! Codes use `Cow<'static, str>` so the built-in codes never allocate.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// CODES
// ============================================================================

/// Stable codes for violations raised by the engine itself.
///
/// Constraint failures carry the code of the constraint that failed.
pub mod codes {
    /// A mandatory property is absent.
    pub const MISSING_PROPERTY: &str = "missing_property";
    /// A property is present although its unwanted gate holds.
    pub const UNWANTED_PROPERTY: &str = "unwanted_property";
    /// A `notNull` property holds `null`.
    pub const NULL_NOT_ALLOWED: &str = "null_not_allowed";
    /// A property value has the wrong JSON type.
    pub const INVALID_TYPE: &str = "invalid_type";
    /// A key the schema does not declare.
    pub const UNKNOWN_PROPERTY: &str = "unknown_property";
    /// Two active declarations disagree on a property's type.
    pub const VARIANT_CONFLICT: &str = "variant_conflict";
    /// The body is `null` and `allowNullJson` is off.
    pub const NULL_BODY: &str = "null_body";
    /// An object where the schema is array-only.
    pub const OBJECT_NOT_ALLOWED: &str = "object_not_allowed";
    /// An array where the schema does not allow arrays.
    pub const ARRAY_NOT_ALLOWED: &str = "array_not_allowed";
    /// The body is neither object nor array.
    pub const INVALID_BODY: &str = "invalid_body";
    /// A `null` array element while `allowNullItems` is off.
    pub const NULL_ITEM: &str = "null_item";
    /// The raw body could not be decoded.
    pub const INVALID_JSON: &str = "invalid_json";
}

// ============================================================================
// VIOLATION
// ============================================================================

/// One reason the input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Location in dot/bracket notation, e.g. `items[0].name`. Empty for the body.
    pub path: String,

    /// Name of the property the violation belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,

    /// Translated, human-readable message.
    pub message: String,

    /// Stable code for programmatic handling.
    pub code: Cow<'static, str>,

    /// Registry name of the constraint that raised it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Cow<'static, str>>,
}

impl Violation {
    /// Creates a violation with a code and message at the body root.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            property: None,
            message: message.into(),
            code: code.into(),
            constraint: None,
        }
    }

    /// Sets the path.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the owning property.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    /// Links the violation to a constraint.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_constraint(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.constraint = Some(name.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.code, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.path, self.code, self.message)
        }
    }
}

// ============================================================================
// REPORT
// ============================================================================

/// Outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    /// True when no violations were recorded.
    pub ok: bool,
    /// Violations in the order they were found.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Builds a report from collected violations.
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            ok: violations.is_empty(),
            violations,
        }
    }

    /// Returns true when the input passed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Returns the number of violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Iterates over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Returns the violations recorded at `path`.
    pub fn at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.path == path)
    }

    /// Returns the paths of all violations, in order.
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.path.as_str()).collect()
    }

    /// Converts into a `Result`, keeping the report on failure.
    #[must_use = "result must be used"]
    pub fn into_result(self) -> Result<(), Self> {
        if self.ok { Ok(()) } else { Err(self) }
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ok {
            return f.write_str("valid");
        }
        writeln!(f, "Validation failed with {} violation(s):", self.violations.len())?;
        for (i, violation) in self.violations.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_includes_path_when_set() {
        let v = Violation::new(codes::MISSING_PROPERTY, "Missing property").with_path("a.b");
        assert_eq!(v.to_string(), "[a.b] missing_property: Missing property");

        let v = Violation::new(codes::NULL_BODY, "Body must not be null");
        assert_eq!(v.to_string(), "null_body: Body must not be null");
    }

    #[test]
    fn report_serializes_compactly() {
        let report = ValidationReport::from_violations(vec![
            Violation::new(codes::INVALID_TYPE, "Expected type string")
                .with_path("foo")
                .with_property("foo"),
        ]);
        assert!(!report.is_ok());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "ok": false,
                "violations": [{
                    "path": "foo",
                    "property": "foo",
                    "message": "Expected type string",
                    "code": "invalid_type"
                }]
            })
        );
    }

    #[test]
    fn into_result_keeps_failures() {
        assert!(ValidationReport::from_violations(Vec::new()).into_result().is_ok());
        let failed = ValidationReport::from_violations(vec![Violation::new("x", "y")]);
        assert_eq!(failed.clone().into_result().unwrap_err(), failed);
    }
}
