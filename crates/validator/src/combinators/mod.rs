//! Composite constraints
//!
//! These wrap other constraints, and the engine understands them through the
//! ordinary [`Constraint`](crate::core::Constraint) interface:
//!
//! - [`ConstraintSet`]: all-of / one-of over a list
//! - [`Conditional`]: gated by condition tokens and an others-expression
//! - [`ArrayConditional`]: gated by the position inside an array
//! - [`SetConditionIf`], [`SetConditionFrom`]: set condition tokens
//! - [`Custom`]: closure-backed, not serializable

mod array_conditional;
mod conditional;
mod custom;
mod set;
mod set_condition;

pub use array_conditional::ArrayConditional;
pub use conditional::Conditional;
pub use custom::Custom;
pub use set::ConstraintSet;
pub use set_condition::{SetConditionFrom, SetConditionIf};
