//! Error formatting with the offending expression and a caret marker
//!
//! Expressions are single-line, so the output is always two lines of source
//! context under a header:
//!
//! ```text
//! Error at position 5:
//!   misplaced operator '||' at position 5
//!
//!   a && || b
//!        ^
//! ```

use crate::error::ExprError;

/// Formats an [`ExprError`] against the expression it came from.
pub struct ErrorFormatter<'a> {
    source: &'a str,
    error: &'a ExprError,
}

impl<'a> ErrorFormatter<'a> {
    /// Creates a formatter for `error` raised while parsing `source`.
    pub fn new(source: &'a str, error: &'a ExprError) -> Self {
        Self { source, error }
    }

    /// Renders the header, the source line and the caret marker.
    pub fn format(&self) -> String {
        let position = self.error.position();
        let mut output = String::with_capacity(64 + self.source.len() * 2);
        output.push_str(&format!("Error at position {position}:\n"));
        output.push_str(&format!("  {}\n\n", self.error));
        output.push_str(&format!("  {}\n", self.source));
        output.push_str("  ");
        output.push_str(&" ".repeat(position));
        output.push_str("^\n");
        output
    }
}
