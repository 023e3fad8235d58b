//! Structural errors
//!
//! A [`SchemaError`] means the schema itself (or its serialized form) is
//! unusable. It aborts the operation that hit it and is never reported as a
//! [`Violation`](crate::core::Violation).

use vigil_expression::ExprError;

/// Result alias for schema-level operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// A malformed schema or a lookup that cannot be satisfied.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A serialized constraint names nothing in the registry.
    #[error("unknown constraint '{name}'")]
    UnknownConstraint {
        /// Name found in the serialized form.
        name: String,
    },

    /// A registered constraint rejected its `fields` object.
    #[error("invalid fields for constraint '{name}': {source}")]
    InvalidFields {
        /// Registry name of the constraint.
        name: String,
        /// Decoding failure.
        source: serde_json::Error,
    },

    /// The schema holds a constraint that has no serialized form.
    #[error("constraint '{name}' cannot be serialized")]
    NotSerializable {
        /// Name reported by the constraint.
        name: String,
    },

    /// A `null` property entry was not found in the repository in strict mode.
    #[error("property '{name}' is not registered in the properties repository")]
    UnknownRepositoryProperty {
        /// Property name.
        name: String,
    },

    /// A condition token from the reserved `%` namespace was set or cleared.
    #[error("condition token '{token}' is reserved")]
    ReservedCondition {
        /// The rejected token.
        token: String,
    },

    /// An others-expression failed to parse.
    #[error("invalid expression: {0}")]
    Expression(#[from] ExprError),

    /// The schema JSON could not be read or written.
    #[error("schema json: {0}")]
    Json(#[from] serde_json::Error),
}
