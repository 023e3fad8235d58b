//! Parser for converting tokens into an expression tree
//!
//! The grammar is deliberately flat:
//!
//! ```text
//! expr := term (OP term)*
//! term := '!'* (NAME | '(' expr ')')
//! OP   := '&&' | '||'
//! ```
//!
//! There is no operator precedence. Terms are joined left to right and
//! parentheses are the only way to group.

use crate::ast::{Name, Node, Op, OthersExpr, Term};
use crate::error::{ExprError, ExprResult};
use crate::lexer::{Token, TokenKind, tokenize};
use crate::path::Reference;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::str::FromStr;

/// Maximum supported nesting depth for parenthesised groups.
pub const MAX_NESTING: usize = 32;

/// Parses an others-expression.
///
/// The empty string parses to the empty expression, which evaluates to `true`.
///
/// # Examples
///
/// ```
/// let expr = vigil_expression::parse("a && !(b || ~flag)").unwrap();
/// assert_eq!(expr.to_string(), "a && !(b || ~flag)");
/// ```
pub fn parse(input: &str) -> ExprResult<OthersExpr> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, index: 0 };
    let terms = parser.parse_group(None, 0)?;
    tracing::trace!(expression = input, terms = terms.len(), "parsed others-expression");
    Ok(OthersExpr { terms })
}

/// What the parser saw last within the current group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Start,
    Operand,
    Operator(&'static str, usize),
    Not(usize),
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
}

impl Parser {
    fn parse_group(&mut self, open: Option<usize>, depth: usize) -> ExprResult<Vec<Term>> {
        let mut terms = Vec::new();
        let mut prev = Prev::Start;
        let mut op: Option<Op> = None;
        let mut negated = false;

        loop {
            let Some(Token { kind, position }) = self.tokens.get(self.index).cloned() else {
                if let Some(position) = open {
                    return Err(ExprError::UnbalancedParens { position });
                }
                return match prev {
                    Prev::Operator(op, position) => Err(ExprError::MisplacedOperator { op, position }),
                    Prev::Not(position) => Err(ExprError::MisplacedNot { position }),
                    Prev::Start | Prev::Operand => Ok(terms),
                };
            };
            self.index += 1;

            match kind {
                TokenKind::RightParen => {
                    let Some(open_at) = open else {
                        return Err(ExprError::UnbalancedParens { position });
                    };
                    return match prev {
                        Prev::Start => Err(ExprError::EmptyGroup { position: open_at }),
                        Prev::Operator(op, position) => {
                            Err(ExprError::MisplacedOperator { op, position })
                        }
                        Prev::Not(position) => Err(ExprError::MisplacedNot { position }),
                        Prev::Operand => Ok(terms),
                    };
                }
                TokenKind::LeftParen => {
                    if prev == Prev::Operand {
                        return Err(ExprError::MisplacedGroup { position });
                    }
                    if depth >= MAX_NESTING {
                        return Err(ExprError::NestingTooDeep {
                            max: MAX_NESTING,
                            position,
                        });
                    }
                    let inner = self.parse_group(Some(position), depth + 1)?;
                    terms.push(Term {
                        op: op.take(),
                        negated: std::mem::take(&mut negated),
                        node: Node::Group(inner),
                    });
                    prev = Prev::Operand;
                }
                TokenKind::Not => {
                    if prev == Prev::Operand {
                        return Err(ExprError::MisplacedNot { position });
                    }
                    negated = !negated;
                    prev = Prev::Not(position);
                }
                TokenKind::And | TokenKind::Or => {
                    let this = if kind == TokenKind::And { Op::And } else { Op::Or };
                    if prev != Prev::Operand {
                        return Err(ExprError::MisplacedOperator {
                            op: this.as_str(),
                            position,
                        });
                    }
                    op = Some(this);
                    prev = Prev::Operator(this.as_str(), position);
                }
                TokenKind::Name(raw) => {
                    if prev == Prev::Operand {
                        return Err(ExprError::MisplacedName { position });
                    }
                    let reference =
                        Reference::parse(&raw).ok_or(ExprError::EmptyName { position })?;
                    terms.push(Term {
                        op: op.take(),
                        negated: std::mem::take(&mut negated),
                        node: Node::Name(Name::new(raw, reference)),
                    });
                    prev = Prev::Operand;
                }
            }
        }
    }
}

impl FromStr for OthersExpr {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl Serialize for OthersExpr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OthersExpr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).map_err(de::Error::custom)
    }
}
