//! Expression tree and its canonical printed form

use crate::lexer::is_bare_name;
use crate::path::Reference;
use std::fmt;

/// Boolean operator joining a term to its previous sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `&&`
    And,
    /// `||`
    Or,
}

impl Op {
    /// Returns the operator as written in expressions.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Op::And => "&&",
            Op::Or => "||",
        }
    }

    pub(crate) fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Op::And => left && right,
            Op::Or => left || right,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named leaf: the raw text plus what it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name {
    raw: String,
    reference: Reference,
}

impl Name {
    pub(crate) fn new(raw: String, reference: Reference) -> Self {
        Self { raw, reference }
    }

    /// Returns the name exactly as written (without quotes).
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed reference.
    #[must_use]
    pub fn reference(&self) -> &Reference {
        &self.reference
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_bare_name(&self.raw) {
            f.write_str(&self.raw)
        } else if self.raw.contains('\'') {
            write!(f, "\"{}\"", self.raw)
        } else {
            write!(f, "'{}'", self.raw)
        }
    }
}

/// The operand of a term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// A property or condition name.
    Name(Name),
    /// A parenthesised sub-expression.
    Group(Vec<Term>),
}

/// One operand with its negation and the operator linking it to the previous term.
///
/// The first term of any group has `op == None`; every later term has `Some`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    /// Operator to the previous sibling.
    pub op: Option<Op>,
    /// Whether the operand is negated (an odd number of `!`).
    pub negated: bool,
    /// The operand.
    pub node: Node,
}

/// A parsed others-expression.
///
/// Evaluation is strictly left to right: `a || b && c` means `(a || b) && c`.
/// Use parentheses to express any other grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OthersExpr {
    pub(crate) terms: Vec<Term>,
}

impl OthersExpr {
    /// Returns the top-level terms.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Returns true for the empty expression (which evaluates to `true`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Collects every leaf name in the tree, depth-first.
    #[must_use]
    pub fn names(&self) -> Vec<&Name> {
        fn walk<'a>(terms: &'a [Term], out: &mut Vec<&'a Name>) {
            for term in terms {
                match &term.node {
                    Node::Name(name) => out.push(name),
                    Node::Group(inner) => walk(inner, out),
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.terms, &mut out);
        out
    }
}

fn write_terms(terms: &[Term], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for term in terms {
        if let Some(op) = term.op {
            write!(f, " {op} ")?;
        }
        if term.negated {
            f.write_str("!")?;
        }
        match &term.node {
            Node::Name(name) => write!(f, "{name}")?,
            Node::Group(inner) => {
                f.write_str("(")?;
                write_terms(inner, f)?;
                f.write_str(")")?;
            }
        }
    }
    Ok(())
}

impl fmt::Display for OthersExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_terms(&self.terms, f)
    }
}
