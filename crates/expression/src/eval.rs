//! Evaluation of others-expressions against a JSON object and its ancestry

use crate::ast::{Node, OthersExpr, Term};
use crate::path::Reference;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Source of condition tokens for `~token` leaves.
pub trait ConditionLookup {
    /// Returns true when `token` is currently set.
    fn has_condition(&self, token: &str) -> bool;
}

impl<T: ConditionLookup + ?Sized> ConditionLookup for &T {
    fn has_condition(&self, token: &str) -> bool {
        (**self).has_condition(token)
    }
}

impl ConditionLookup for HashSet<String> {
    fn has_condition(&self, token: &str) -> bool {
        self.contains(token)
    }
}

/// A lookup with no conditions set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConditions;

impl ConditionLookup for NoConditions {
    fn has_condition(&self, _token: &str) -> bool {
        false
    }
}

/// Everything a leaf needs to answer "is it there?".
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    /// The object whose properties are being checked.
    pub current: &'a Map<String, Value>,
    /// Enclosing objects, root first, immediate parent last.
    pub ancestors: &'a [&'a Map<String, Value>],
    /// Condition tokens for `~token` leaves.
    pub conditions: &'a dyn ConditionLookup,
}

impl std::fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("current", &self.current)
            .field("ancestors", &self.ancestors.len())
            .field("conditions", &"<lookup>")
            .finish()
    }
}

impl<'a> Scope<'a> {
    /// Creates a scope for `current` with no ancestors.
    pub fn new(current: &'a Map<String, Value>, conditions: &'a dyn ConditionLookup) -> Self {
        Self {
            current,
            ancestors: &[],
            conditions,
        }
    }

    /// Sets the ancestry (root first).
    #[must_use]
    pub fn with_ancestors(mut self, ancestors: &'a [&'a Map<String, Value>]) -> Self {
        self.ancestors = ancestors;
        self
    }
}

impl OthersExpr {
    /// Evaluates the expression.
    ///
    /// Terms combine strictly left to right; the empty expression is `true`.
    #[must_use]
    pub fn evaluate(&self, scope: &Scope<'_>) -> bool {
        evaluate_terms(&self.terms, scope)
    }
}

fn evaluate_terms(terms: &[Term], scope: &Scope<'_>) -> bool {
    let mut result = true;
    for (index, term) in terms.iter().enumerate() {
        let value = evaluate_term(term, scope);
        result = match term.op {
            Some(op) if index > 0 => op.apply(result, value),
            _ => value,
        };
    }
    result
}

fn evaluate_term(term: &Term, scope: &Scope<'_>) -> bool {
    let value = match &term.node {
        Node::Name(name) => match name.reference() {
            Reference::Condition(token) => scope.conditions.has_condition(token),
            Reference::Property(path) => path.is_present(scope.current, scope.ancestors),
        },
        Node::Group(inner) => evaluate_terms(inner, scope),
    };
    value != term.negated
}
