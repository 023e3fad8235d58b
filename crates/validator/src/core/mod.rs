//! Core evaluation types
//!
//! - **Constraints**: [`Constraint`], [`SharedConstraint`], [`ConstraintRef`], [`Check`]
//! - **Context**: [`Context`], [`PathFrame`], [`ConditionSet`], [`ConditionTarget`]
//! - **Results**: [`Violation`], [`ValidationReport`], [`codes`]
//! - **Errors**: [`SchemaError`]
//! - **Messages**: [`Translator`], [`DefaultTranslator`], [`CatalogTranslator`]

pub mod conditions;
pub mod constraint;
pub mod context;
pub mod error;
pub mod translate;
pub mod violation;

pub use conditions::{ConditionSet, ConditionTarget, is_reserved};
pub use constraint::{
    Check, Constraint, ConstraintRef, Failure, Registrable, SharedConstraint, fields_of,
    message_for,
};
pub use context::{Context, PathFrame};
pub use error::{SchemaError, SchemaResult};
pub use translate::{CatalogTranslator, DefaultTranslator, Translator, fill};
pub use violation::{ValidationReport, Violation, codes};
