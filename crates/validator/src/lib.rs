//! # vigil-validator
//!
//! Declarative validation of decoded JSON request bodies.
//!
//! A [`Validator`](schema::Validator) describes an expected object (or array
//! of objects). Evaluating a value against it yields a
//! [`ValidationReport`](core::ValidationReport) listing every
//! [`Violation`](core::Violation) with its path, code and translated message.
//!
//! ## Quick Start
//!
//! ```
//! use serde_json::json;
//! use vigil_validator::prelude::*;
//!
//! let schema = Validator::new()
//!     .property("name", PropertyValidator::string().mandatory().constraint(Length::new(1, Some(32))))
//!     .property("age", PropertyValidator::integer().constraint(Range::new(0.0, 150.0)));
//!
//! let report = schema.validate(&json!({"age": 200})).unwrap();
//! assert_eq!(report.paths(), vec!["name", "age"]);
//! ```
//!
//! ## Serialized Schemas
//!
//! Validators round-trip through JSON. Constraints are written as
//! `{name, fields}` and rebuilt through the [`registry`], so custom
//! constraints must be registered before a schema naming them is read.
//!
//! ## Conditions
//!
//! Constraints such as [`SetConditionIf`](combinators::SetConditionIf) set
//! condition tokens while the walk runs; later properties react through
//! `mandatoryWhen`, `whenConditions`, `unwantedConditions`, conditional
//! variants and `~token` terms in others-expressions.

pub mod combinators;
pub mod core;
mod engine;
mod macros;
pub mod options;
pub mod prelude;
pub mod registry;
pub mod repository;
pub mod schema;
pub mod validators;

pub use options::ValidateOptions;
pub use vigil_expression as expression;

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}
