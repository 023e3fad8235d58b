//! Per-call evaluation options

use serde::{Deserialize, Serialize};

/// Options for [`Validator::validate_with`](crate::schema::Validator::validate_with).
///
/// Deserializable so it can live in application configuration:
///
/// ```
/// use vigil_validator::ValidateOptions;
///
/// let options: ValidateOptions =
///     serde_json::from_str(r#"{"conditions": ["admin"], "maxViolations": 10}"#).unwrap();
/// assert_eq!(options.max_violations, Some(10));
/// assert!(!options.stop_on_first);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidateOptions {
    /// Tokens set globally before the evaluation starts.
    pub conditions: Vec<String>,
    /// Ends the evaluation at the first violation, whatever the schema says.
    pub stop_on_first: bool,
    /// Ends the evaluation once this many violations are recorded.
    pub max_violations: Option<usize>,
}

impl ValidateOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets initial condition tokens.
    #[must_use = "builder methods must be chained or built"]
    pub fn conditions<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conditions = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Ends the evaluation at the first violation.
    #[must_use = "builder methods must be chained or built"]
    pub fn stop_on_first(mut self) -> Self {
        self.stop_on_first = true;
        self
    }

    /// Caps the number of violations.
    #[must_use = "builder methods must be chained or built"]
    pub fn max_violations(mut self, max: usize) -> Self {
        self.max_violations = Some(max);
        self
    }
}
