//! Schema model
//!
//! - [`Validator`]: rules for an object or array of objects
//! - [`PropertyValidator`], [`PropertyType`]: rules for one property
//! - [`ConditionalVariant`]: rules merged in while conditions hold
//! - [`OasInfo`]: documentation carried through serialization
//!
//! Every type here serializes to the camelCase JSON form and reads it back,
//! with constraints rebuilt through the [registry](crate::registry).

mod codec;
mod oas;
mod property;
mod validator;
mod variant;

pub use oas::OasInfo;
pub use property::{PropertyType, PropertyValidator};
pub use validator::Validator;
pub use variant::ConditionalVariant;

use serde::{Deserialize, Deserializer};
use vigil_expression::OthersExpr;

/// Reads an optional expression, treating the empty expression as absent.
pub(crate) fn non_empty_expr<'de, D>(deserializer: D) -> Result<Option<OthersExpr>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OthersExpr>::deserialize(deserializer)?.filter(|expr| !expr.is_empty()))
}
