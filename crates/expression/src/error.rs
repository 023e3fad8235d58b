//! Error types for expression parsing
//!
//! Every variant carries the 0-based character position (not byte offset)
//! of the offending input, so callers can point at the exact spot with
//! [`crate::error_formatter::ErrorFormatter`].

/// Result alias for expression operations.
pub type ExprResult<T> = Result<T, ExprError>;

/// A syntax error found while parsing an others-expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ExprError {
    /// A character outside the bare-name set appeared unquoted.
    #[error("unexpected character '{ch}' at position {position} (quote names containing it)")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// 0-based character position.
        position: usize,
    },

    /// A quoted name was never closed.
    #[error("unclosed quote at position {position}")]
    UnclosedQuote {
        /// Position of the opening quote.
        position: usize,
    },

    /// A `(` without matching `)`, or a stray `)`.
    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParens {
        /// Position of the unmatched parenthesis.
        position: usize,
    },

    /// `&&` or `||` appeared where an operand was expected, or at the end.
    #[error("misplaced operator '{op}' at position {position}")]
    MisplacedOperator {
        /// The operator text.
        op: &'static str,
        /// Position of the operator.
        position: usize,
    },

    /// `!` was not preceded by start, an operator, `(` or another `!`.
    #[error("misplaced '!' at position {position}")]
    MisplacedNot {
        /// Position of the `!`.
        position: usize,
    },

    /// A name followed an operand without an operator in between.
    #[error("name must be preceded by an operator at position {position}")]
    MisplacedName {
        /// Position where the name starts.
        position: usize,
    },

    /// A `(` followed an operand without an operator in between.
    #[error("group must be preceded by an operator at position {position}")]
    MisplacedGroup {
        /// Position of the `(`.
        position: usize,
    },

    /// `()` with nothing inside.
    #[error("empty group at position {position}")]
    EmptyGroup {
        /// Position of the `(`.
        position: usize,
    },

    /// A name (or its final path segment) was empty.
    #[error("empty property name at position {position}")]
    EmptyName {
        /// Position where the name starts.
        position: usize,
    },

    /// Groups nested deeper than [`crate::parser::MAX_NESTING`].
    #[error("expression nested deeper than {max} at position {position}")]
    NestingTooDeep {
        /// Maximum supported depth.
        max: usize,
        /// Position of the `(` that exceeded the limit.
        position: usize,
    },
}

impl ExprError {
    /// Returns the 0-based character position the error refers to.
    #[must_use]
    pub fn position(&self) -> usize {
        match self {
            Self::UnexpectedChar { position, .. }
            | Self::UnclosedQuote { position }
            | Self::UnbalancedParens { position }
            | Self::MisplacedOperator { position, .. }
            | Self::MisplacedNot { position }
            | Self::MisplacedName { position }
            | Self::MisplacedGroup { position }
            | Self::EmptyGroup { position }
            | Self::EmptyName { position }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }
}
