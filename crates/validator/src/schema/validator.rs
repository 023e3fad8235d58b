//! Object and array validators

use crate::core::SharedConstraint;
use crate::is_false;
use crate::schema::oas::OasInfo;
use crate::schema::property::PropertyValidator;
use crate::schema::variant::ConditionalVariant;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Rules for a whole object, or for a uniform array of objects.
///
/// Built fluently, or loaded with [`Validator::from_json_str`]. Once built a
/// validator is immutable and may be shared across threads; cloning copies
/// the collections and shares the constraint instances.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vigil_validator::schema::{PropertyValidator, Validator};
///
/// let schema = Validator::new()
///     .property("foo", PropertyValidator::string().mandatory())
///     .property("bar", PropertyValidator::integer());
///
/// let report = schema.validate(&json!({"bar": 1})).unwrap();
/// assert_eq!(report.paths(), vec!["foo"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Validator {
    /// Property rules in declaration order. `None` resolves through the
    /// properties repository.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Option<PropertyValidator>>,
    /// Object-level constraints, run before the properties.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<SharedConstraint>,
    /// Whole-array constraints, run before the elements.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub array_constraints: Vec<SharedConstraint>,
    /// The object is skipped unless all hold.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub when_conditions: Vec<String>,
    /// Variants merged in while their conditions hold.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditional_variants: Vec<ConditionalVariant>,
    /// Keys without rules are accepted.
    #[serde(skip_serializing_if = "is_false")]
    pub ignore_unknown_properties: bool,
    /// An array of objects is accepted.
    #[serde(skip_serializing_if = "is_false")]
    pub allow_array: bool,
    /// A plain object is rejected.
    #[serde(skip_serializing_if = "is_false")]
    pub disallow_object: bool,
    /// A `null` body is accepted.
    #[serde(skip_serializing_if = "is_false")]
    pub allow_null_json: bool,
    /// `null` array elements are accepted.
    #[serde(skip_serializing_if = "is_false")]
    pub allow_null_items: bool,
    /// The evaluation ends at the first violation. Only read at the root.
    #[serde(skip_serializing_if = "is_false")]
    pub stop_on_first: bool,
    /// Numbers are handled as decimals. Carried through to the context.
    #[serde(skip_serializing_if = "is_false")]
    pub use_number: bool,
    /// Properties are checked by ascending `order`, then name.
    #[serde(skip_serializing_if = "is_false")]
    pub ordered_property_checks: bool,
    /// Documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oas_info: Option<OasInfo>,
}

impl Validator {
    /// An empty validator: accepts objects, rejects arrays and unknown keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property.
    #[must_use = "builder methods must be chained or built"]
    pub fn property(mut self, name: impl Into<String>, rules: PropertyValidator) -> Self {
        self.properties.insert(name.into(), Some(rules));
        self
    }

    /// Adds a property resolved from the properties repository.
    #[must_use = "builder methods must be chained or built"]
    pub fn shared_property(mut self, name: impl Into<String>) -> Self {
        self.properties.insert(name.into(), None);
        self
    }

    /// Adds an object-level constraint.
    #[must_use = "builder methods must be chained or built"]
    pub fn constraint(mut self, constraint: impl Into<SharedConstraint>) -> Self {
        self.constraints.push(constraint.into());
        self
    }

    /// Adds a whole-array constraint.
    #[must_use = "builder methods must be chained or built"]
    pub fn array_constraint(mut self, constraint: impl Into<SharedConstraint>) -> Self {
        self.array_constraints.push(constraint.into());
        self
    }

    /// Skips the object unless all `tokens` are set.
    #[must_use = "builder methods must be chained or built"]
    pub fn when<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.when_conditions = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a conditional variant.
    #[must_use = "builder methods must be chained or built"]
    pub fn variant(mut self, variant: ConditionalVariant) -> Self {
        self.conditional_variants.push(variant);
        self
    }

    /// Accepts keys without rules.
    #[must_use = "builder methods must be chained or built"]
    pub fn ignore_unknown_properties(mut self) -> Self {
        self.ignore_unknown_properties = true;
        self
    }

    /// Accepts arrays of objects.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_array(mut self) -> Self {
        self.allow_array = true;
        self
    }

    /// Rejects plain objects.
    #[must_use = "builder methods must be chained or built"]
    pub fn disallow_object(mut self) -> Self {
        self.disallow_object = true;
        self
    }

    /// Accepts a `null` body.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_null_json(mut self) -> Self {
        self.allow_null_json = true;
        self
    }

    /// Accepts `null` array elements.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_null_items(mut self) -> Self {
        self.allow_null_items = true;
        self
    }

    /// Ends the evaluation at the first violation.
    #[must_use = "builder methods must be chained or built"]
    pub fn stop_on_first(mut self) -> Self {
        self.stop_on_first = true;
        self
    }

    /// Handles numbers as decimals.
    #[must_use = "builder methods must be chained or built"]
    pub fn use_number(mut self) -> Self {
        self.use_number = true;
        self
    }

    /// Checks properties by ascending `order`, then name.
    #[must_use = "builder methods must be chained or built"]
    pub fn ordered_property_checks(mut self) -> Self {
        self.ordered_property_checks = true;
        self
    }

    /// Attaches documentation.
    #[must_use = "builder methods must be chained or built"]
    pub fn oas(mut self, info: OasInfo) -> Self {
        self.oas_info = Some(info);
        self
    }

    /// Returns true when no input other than `null` can pass.
    #[must_use]
    pub fn rejects_everything(&self) -> bool {
        self.disallow_object && !self.allow_array
    }
}
