//! Conditional variants

use crate::core::SharedConstraint;
use crate::schema::property::PropertyValidator;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Extra rules merged into an object's schema while all of its
/// when-conditions hold.
///
/// Variants nest: an active variant's own variants are considered after its
/// properties have been checked, so tokens set by those checks can select
/// them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConditionalVariant {
    /// All must hold for the variant to apply. Empty always applies.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub when_conditions: Vec<String>,
    /// Object-level constraints.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<SharedConstraint>,
    /// Additional properties. `None` resolves through the repository.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Option<PropertyValidator>>,
    /// Nested variants.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditional_variants: Vec<ConditionalVariant>,
}

impl ConditionalVariant {
    /// A variant active while all `tokens` are set.
    pub fn when<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            when_conditions: tokens.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Adds a property.
    #[must_use = "builder methods must be chained or built"]
    pub fn property(mut self, name: impl Into<String>, rules: PropertyValidator) -> Self {
        self.properties.insert(name.into(), Some(rules));
        self
    }

    /// Adds a property resolved from the repository.
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

    /// Adds a nested variant.
    #[must_use = "builder methods must be chained or built"]
    pub fn variant(mut self, variant: ConditionalVariant) -> Self {
        self.conditional_variants.push(variant);
        self
    }
}
