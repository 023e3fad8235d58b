//! Prelude module for convenient imports.
//!
//! Provides a single `use vigil_validator::prelude::*;` import that brings
//! in the schema builders, the built-in constraints and the result types.
//!
//! # Examples
//!
//! ```
//! use vigil_validator::prelude::*;
//!
//! let schema = Validator::new()
//!     .property("email", PropertyValidator::string().mandatory())
//!     .variant(ConditionalVariant::when(["BUSINESS"]).property("vat", PropertyValidator::string()));
//! ```

// ============================================================================
// SCHEMA
// ============================================================================

pub use crate::schema::{ConditionalVariant, OasInfo, PropertyType, PropertyValidator, Validator};

// ============================================================================
// CORE
// ============================================================================

pub use crate::core::{
    CatalogTranslator, Check, ConditionTarget, Constraint, Context, DefaultTranslator,
    SchemaError, SchemaResult, SharedConstraint, Translator, ValidationReport, Violation, codes,
};
pub use crate::options::ValidateOptions;

// ============================================================================
// CONSTRAINTS
// ============================================================================

pub use crate::combinators::{
    ArrayConditional, Conditional, ConstraintSet, Custom, SetConditionFrom, SetConditionIf,
};
pub use crate::validators::{
    Equals, Length, Maximum, Minimum, NotEmpty, OneOfValues, Pattern, Range, Size,
};

// ============================================================================
// EXPRESSIONS
// ============================================================================

pub use vigil_expression::{OthersExpr, parse as parse_expr};
