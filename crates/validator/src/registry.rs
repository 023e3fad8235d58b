//! Process-wide constraint registry
//!
//! Maps a stable constraint name to a constructor that builds the constraint
//! from the `fields` object of its serialized form. The serializer relies on
//! it to rebuild schemas, so every constraint that appears in a serialized
//! schema must be registered before that schema is read.
//!
//! The registry starts out holding the built-in constraints. It is guarded
//! by a single `parking_lot::Mutex`; every read and write takes the lock.
//! Populate it at startup: changing it while evaluations or deserializations
//! are running is unsupported.
//!
//! # Example
//!
//! ```
//! use vigil_validator::registry;
//!
//! assert!(registry::contains("Length"));
//! let c = registry::build("Length", serde_json::json!({"Minimum": 2})).unwrap();
//! assert_eq!(c.name(), "Length");
//! ```

use crate::combinators::{
    ArrayConditional, Conditional, ConstraintSet, SetConditionFrom, SetConditionIf,
};
use crate::core::{Registrable, SchemaError, SchemaResult, SharedConstraint};
use crate::validators::{
    Equals, Length, Maximum, Minimum, NotEmpty, OneOfValues, Pattern, Range, Size,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Builds a constraint from its `fields` object.
pub type Factory = fn(Value) -> SchemaResult<SharedConstraint>;

fn factory<C: Registrable>(fields: Value) -> SchemaResult<SharedConstraint> {
    let constraint: C =
        serde_json::from_value(fields).map_err(|source| SchemaError::InvalidFields {
            name: C::NAME.to_string(),
            source,
        })?;
    Ok(SharedConstraint::new(constraint))
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Name-to-constructor table.
#[derive(Debug, Clone, Default)]
pub struct ConstraintRegistry {
    factories: HashMap<String, Factory>,
}

impl ConstraintRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in constraints.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert::<Length>();
        registry.insert::<NotEmpty>();
        registry.insert::<Pattern>();
        registry.insert::<Range>();
        registry.insert::<Minimum>();
        registry.insert::<Maximum>();
        registry.insert::<Size>();
        registry.insert::<Equals>();
        registry.insert::<OneOfValues>();
        registry.insert::<ConstraintSet>();
        registry.insert::<Conditional>();
        registry.insert::<ArrayConditional>();
        registry.insert::<SetConditionIf>();
        registry.insert::<SetConditionFrom>();
        registry
    }

    /// Registers `C` under its own name.
    pub fn insert<C: Registrable>(&mut self) -> bool {
        self.insert_as::<C>(C::NAME)
    }

    /// Registers `C` under `name`. Returns false if `name` was already taken
    /// (the old entry is replaced).
    pub fn insert_as<C: Registrable>(&mut self, name: impl Into<String>) -> bool {
        self.factories.insert(name.into(), factory::<C>).is_none()
    }

    /// Looks up the constructor for `name`.
    #[must_use]
    pub fn factory(&self, name: &str) -> Option<Factory> {
        self.factories.get(name).copied()
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Removes `name`. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.factories.remove(name).is_some()
    }

    /// Builds a constraint by name.
    pub fn build(&self, name: &str, fields: Value) -> SchemaResult<SharedConstraint> {
        let factory = self.factory(name).ok_or_else(|| SchemaError::UnknownConstraint {
            name: name.to_string(),
        })?;
        factory(fields)
    }
}

// ============================================================================
// GLOBAL INSTANCE
// ============================================================================

static REGISTRY: LazyLock<Mutex<ConstraintRegistry>> =
    LazyLock::new(|| Mutex::new(ConstraintRegistry::with_builtins()));

/// Registers `C` under its own name in the global registry.
pub fn register<C: Registrable>() -> bool {
    tracing::debug!(name = C::NAME, "registering constraint");
    REGISTRY.lock().insert::<C>()
}

/// Registers `C` under an alias in the global registry.
///
/// Constraints registered under an alias are read back from either name but
/// always serialize under their own name.
pub fn register_as<C: Registrable>(name: impl Into<String>) -> bool {
    let name = name.into();
    tracing::debug!(name = %name, constraint = C::NAME, "registering constraint alias");
    REGISTRY.lock().insert_as::<C>(name)
}

/// Returns true if `name` is registered globally.
pub fn contains(name: &str) -> bool {
    REGISTRY.lock().contains(name)
}

/// Globally registered names, sorted.
pub fn names() -> Vec<String> {
    REGISTRY.lock().names()
}

/// Removes `name` from the global registry.
pub fn unregister(name: &str) -> bool {
    tracing::debug!(name, "unregistering constraint");
    REGISTRY.lock().remove(name)
}

/// Empties the global registry, built-ins included.
pub fn clear() {
    tracing::debug!("clearing constraint registry");
    *REGISTRY.lock() = ConstraintRegistry::new();
}

/// Restores the global registry to the built-ins only.
pub fn reset() {
    tracing::debug!("resetting constraint registry");
    *REGISTRY.lock() = ConstraintRegistry::with_builtins();
}

/// Builds a constraint through the global registry.
pub fn build(name: &str, fields: Value) -> SchemaResult<SharedConstraint> {
    // Composite constraints build their members through this function, so
    // the lock must be released before the constructor runs.
    let factory = REGISTRY.lock().factory(name);
    let factory = factory.ok_or_else(|| SchemaError::UnknownConstraint {
        name: name.to_string(),
    })?;
    factory(fields)
}
