//! # vigil-expression
//!
//! Boolean expressions over *other-property presence*, used by the vigil
//! validation engine for `requiredWith`, `unwantedWith` and conditional
//! constraints.
//!
//! ## Syntax
//!
//! ```text
//! a && !b            a present and b absent
//! (a || b) && ~flag  a or b present, and condition token `flag` set
//! .parent_key        key in the enclosing object
//! /.root.nested      key reached from the outermost object
//! 'first name'       quoted name for characters outside [A-Za-z0-9$_@~.-]
//! ```
//!
//! Operators have **no precedence**: terms combine strictly left to right,
//! so `a || b && c` is `(a || b) && c`. Parenthesise to group differently.
//!
//! ## Quick Start
//!
//! ```
//! use std::collections::HashSet;
//! use vigil_expression::{Scope, parse};
//!
//! let expr = parse("a && !c").unwrap();
//! let object = serde_json::json!({"a": "x"});
//! let map = object.as_object().unwrap();
//! let conditions: HashSet<String> = HashSet::new();
//!
//! assert!(expr.evaluate(&Scope::new(map, &conditions)));
//! ```

pub mod ast;
pub mod error;
pub mod error_formatter;
pub mod eval;
mod lexer;
pub mod parser;
pub mod path;

pub use ast::{Name, Node, Op, OthersExpr, Term};
pub use error::{ExprError, ExprResult};
pub use error_formatter::ErrorFormatter;
pub use eval::{ConditionLookup, NoConditions, Scope};
pub use lexer::is_bare_name;
pub use parser::{MAX_NESTING, parse};
pub use path::{Anchor, PropertyPath, Reference};
