//! Process-wide properties repository
//!
//! Named, reusable property rules. A validator that maps a property to
//! `null` (or declares it with [`Validator::shared_property`]) picks the rules
//! up from here by the property's name during evaluation.
//!
//! In strict mode (the default) a missing entry fails the evaluation with
//! [`SchemaError::UnknownRepositoryProperty`]. In lax mode it is treated as
//! an optional property of any type and a warning is logged.
//!
//! [`Validator::shared_property`]: crate::schema::Validator::shared_property
//!
//! # Example
//!
//! ```
//! use vigil_validator::repository;
//! use vigil_validator::schema::PropertyValidator;
//!
//! repository::register("email", PropertyValidator::string().not_null());
//! assert!(repository::contains("email"));
//! ```

use crate::core::{SchemaError, SchemaResult};
use crate::schema::PropertyValidator;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

struct Repository {
    properties: HashMap<String, Arc<PropertyValidator>>,
    strict: bool,
}

impl Repository {
    fn new() -> Self {
        Self {
            properties: HashMap::new(),
            strict: true,
        }
    }
}

static REPOSITORY: LazyLock<Mutex<Repository>> = LazyLock::new(|| Mutex::new(Repository::new()));
static ANY: LazyLock<Arc<PropertyValidator>> =
    LazyLock::new(|| Arc::new(PropertyValidator::any()));

/// Stores `rules` under `name`, returning the rules it replaced.
pub fn register(name: impl Into<String>, rules: PropertyValidator) -> Option<Arc<PropertyValidator>> {
    let name = name.into();
    tracing::debug!(name = %name, "registering repository property");
    REPOSITORY.lock().properties.insert(name, Arc::new(rules))
}

/// The rules stored under `name`.
pub fn get(name: &str) -> Option<Arc<PropertyValidator>> {
    REPOSITORY.lock().properties.get(name).cloned()
}

/// Returns true when `name` is stored.
pub fn contains(name: &str) -> bool {
    REPOSITORY.lock().properties.contains_key(name)
}

/// Removes `name`.
pub fn remove(name: &str) -> Option<Arc<PropertyValidator>> {
    tracing::debug!(name, "removing repository property");
    REPOSITORY.lock().properties.remove(name)
}

/// Removes every property, keeping the mode.
pub fn clear() {
    tracing::debug!("clearing properties repository");
    REPOSITORY.lock().properties.clear();
}

/// Removes every property and restores strict mode.
pub fn reset() {
    tracing::debug!("resetting properties repository");
    *REPOSITORY.lock() = Repository::new();
}

/// Chooses between strict and lax lookups.
pub fn set_strict(strict: bool) {
    REPOSITORY.lock().strict = strict;
}

/// Whether lookups are strict.
pub fn is_strict() -> bool {
    REPOSITORY.lock().strict
}

/// Looks `name` up for the engine, applying the strictness mode.
pub(crate) fn resolve(name: &str) -> SchemaResult<Arc<PropertyValidator>> {
    let repo = REPOSITORY.lock();
    if let Some(rules) = repo.properties.get(name) {
        return Ok(Arc::clone(rules));
    }
    if repo.strict {
        return Err(SchemaError::UnknownRepositoryProperty {
            name: name.to_string(),
        });
    }
    tracing::warn!(name, "property not in repository, treating it as optional any");
    Ok(Arc::clone(&ANY))
}
