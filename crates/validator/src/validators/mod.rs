//! Built-in leaf constraints
//!
//! Each constraint applies to one JSON shape and passes any other shape, so
//! a string constraint on a numeric property never double-reports the type
//! mismatch the engine already raised.
//!
//! - **Strings**: [`Length`], [`Pattern`], [`NotEmpty`] (also arrays and objects)
//! - **Numbers**: [`Range`], [`Minimum`], [`Maximum`]
//! - **Collections**: [`Size`]
//! - **Any value**: [`Equals`], [`OneOfValues`]

mod content;
mod length;
mod pattern;
mod range;
mod size;

pub use content::{Equals, OneOfValues};
pub use length::{Length, NotEmpty};
pub use pattern::Pattern;
pub use range::{Maximum, Minimum, Range};
pub use size::Size;
