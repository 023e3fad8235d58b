//! Condition tokens with scoped visibility
//!
//! The set is a stack of scopes. A token set in a scope is visible to that
//! scope and every scope pushed after it. The engine pushes a scope when it
//! enters a nested validator or an array element, so tokens set there vanish
//! on the way back out unless they were aimed at the parent or global scope.
//!
//! Tokens beginning with `%` are reserved for array positions and can be
//! neither set nor cleared.

use crate::core::error::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Which scope a set or clear applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionTarget {
    /// The innermost scope.
    #[default]
    Current,
    /// The scope just outside the innermost one (the root if there is none).
    Parent,
    /// The outermost scope.
    Global,
}

/// Returns true for tokens in the reserved `%` namespace.
#[inline]
#[must_use]
pub fn is_reserved(token: &str) -> bool {
    token.starts_with('%')
}

/// A stack of condition scopes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSet {
    scopes: Vec<HashSet<String>>,
}

impl Default for ConditionSet {
    fn default() -> Self {
        Self {
            scopes: vec![HashSet::new()],
        }
    }
}

impl ConditionSet {
    /// Creates a set with a single empty root scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set whose root scope holds `tokens`.
    pub fn with_tokens<I, S>(tokens: I) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for token in tokens {
            set.set(token, ConditionTarget::Global)?;
        }
        Ok(set)
    }

    /// Returns true when any visible scope holds `token`.
    #[must_use]
    pub fn has(&self, token: &str) -> bool {
        self.scopes.iter().any(|scope| scope.contains(token))
    }

    /// Sets `token` in the targeted scope.
    pub fn set(&mut self, token: impl Into<String>, target: ConditionTarget) -> SchemaResult<()> {
        let token = token.into();
        if is_reserved(&token) {
            return Err(SchemaError::ReservedCondition { token });
        }
        let index = self.target_index(target);
        tracing::trace!(token = %token, ?target, depth = self.scopes.len(), "condition set");
        self.scopes[index].insert(token);
        Ok(())
    }

    /// Clears `token` from the targeted scope and every scope nested inside it.
    ///
    /// Returns whether anything was removed.
    pub fn clear(&mut self, token: &str, target: ConditionTarget) -> SchemaResult<bool> {
        if is_reserved(token) {
            return Err(SchemaError::ReservedCondition {
                token: token.to_string(),
            });
        }
        let index = self.target_index(target);
        let mut removed = false;
        for scope in &mut self.scopes[index..] {
            removed |= scope.remove(token);
        }
        Ok(removed)
    }

    /// Opens a new innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(HashSet::new());
    }

    /// Drops the innermost scope. The root scope is never dropped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Number of open scopes, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// All visible tokens, sorted.
    #[must_use]
    pub fn tokens(&self) -> BTreeSet<&str> {
        self.scopes
            .iter()
            .flat_map(|scope| scope.iter().map(String::as_str))
            .collect()
    }

    fn target_index(&self, target: ConditionTarget) -> usize {
        let last = self.scopes.len() - 1;
        match target {
            ConditionTarget::Current => last,
            ConditionTarget::Parent => last.saturating_sub(1),
            ConditionTarget::Global => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_scopes_see_outer_tokens() {
        let mut set = ConditionSet::new();
        set.set("outer", ConditionTarget::Current).unwrap();
        set.push_scope();
        assert!(set.has("outer"));
        set.set("inner", ConditionTarget::Current).unwrap();
        set.pop_scope();
        assert!(!set.has("inner"));
    }

    #[test]
    fn targets_reach_outward() {
        let mut set = ConditionSet::new();
        set.push_scope();
        set.push_scope();
        set.set("to_parent", ConditionTarget::Parent).unwrap();
        set.set("to_root", ConditionTarget::Global).unwrap();

        set.pop_scope();
        assert!(set.has("to_parent"));
        set.pop_scope();
        assert!(!set.has("to_parent"));
        assert!(set.has("to_root"));
    }

    #[test]
    fn clear_removes_from_nested_scopes() {
        let mut set = ConditionSet::new();
        set.set("flag", ConditionTarget::Current).unwrap();
        set.push_scope();
        set.set("flag", ConditionTarget::Current).unwrap();

        assert!(set.clear("flag", ConditionTarget::Current).unwrap());
        assert!(set.has("flag"), "root copy is untouched");
        assert!(set.clear("flag", ConditionTarget::Global).unwrap());
        assert!(!set.has("flag"));
        assert!(!set.clear("flag", ConditionTarget::Global).unwrap());
    }

    #[test]
    fn root_scope_survives_extra_pops() {
        let mut set = ConditionSet::with_tokens(["a"]).unwrap();
        set.pop_scope();
        set.pop_scope();
        assert_eq!(set.depth(), 1);
        assert!(set.has("a"));
    }

    #[test]
    fn reserved_tokens_are_rejected() {
        let mut set = ConditionSet::new();
        assert!(matches!(
            set.set("%2", ConditionTarget::Current),
            Err(SchemaError::ReservedCondition { .. })
        ));
        assert!(set.clear("%3", ConditionTarget::Global).is_err());
        assert!(ConditionSet::with_tokens(["ok", "%1"]).is_err());
        // Position names outside the % namespace remain usable.
        assert!(set.set("first", ConditionTarget::Current).is_ok());
    }

    #[test]
    fn target_deserializes_lowercase() {
        let target: ConditionTarget = serde_json::from_str("\"global\"").unwrap();
        assert_eq!(target, ConditionTarget::Global);
    }
}
