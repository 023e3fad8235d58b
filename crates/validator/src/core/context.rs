//! Evaluation context
//!
//! The [`Context`] is the walker state of a single evaluation: where we are
//! (path and ancestry), which condition tokens are set, what has been
//! reported so far, and whether the walk should go on. One evaluation owns
//! its context exclusively; constraints get `&mut Context` for the duration
//! of a check and must not keep anything from it.

use crate::core::conditions::{ConditionSet, ConditionTarget};
use crate::core::translate::{DefaultTranslator, Translator};
use crate::core::violation::{ValidationReport, Violation};
use serde_json::{Map, Value};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt::{self, Write as _};
use std::sync::LazyLock;
use vigil_expression::{ConditionLookup, OthersExpr, Scope};

static EMPTY_OBJECT: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);
static DEFAULT_TRANSLATOR: DefaultTranslator = DefaultTranslator;

// ============================================================================
// PATH
// ============================================================================

/// One step of the current path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFrame {
    /// A property name.
    Property(String),
    /// An array index.
    Index(usize),
}

/// Position inside the array currently being iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArrayFrame {
    index: usize,
    len: usize,
}

impl ArrayFrame {
    /// Answers the synthetic position tokens `first`, `last` and `%N`.
    ///
    /// `%N` holds when the 1-based position is a multiple of `N`.
    fn holds(self, token: &str) -> bool {
        match token {
            "first" => self.index == 0,
            "last" => self.index + 1 == self.len,
            _ => token
                .strip_prefix('%')
                .and_then(|n| n.parse::<usize>().ok())
                .is_some_and(|n| n > 0 && (self.index + 1) % n == 0),
        }
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Walker state for one evaluation.
pub struct Context<'v> {
    path: SmallVec<[PathFrame; 8]>,
    objects: Vec<&'v Map<String, Value>>,
    arrays: Vec<ArrayFrame>,
    conditions: ConditionSet,
    violations: Vec<Violation>,
    continue_all: bool,
    continue_property: bool,
    stop_on_first: bool,
    max_violations: Option<usize>,
    use_number: bool,
    translator: &'v dyn Translator,
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("path", &self.path_string())
            .field("depth", &self.objects.len())
            .field("conditions", &self.conditions.tokens())
            .field("violations", &self.violations.len())
            .field("continue_all", &self.continue_all)
            .field("continue_property", &self.continue_property)
            .finish()
    }
}

impl Default for Context<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'v> Context<'v> {
    /// Creates a context with no conditions and the pass-through translator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: SmallVec::new(),
            objects: Vec::new(),
            arrays: Vec::new(),
            conditions: ConditionSet::new(),
            violations: Vec::new(),
            continue_all: true,
            continue_property: true,
            stop_on_first: false,
            max_violations: None,
            use_number: false,
            translator: &DEFAULT_TRANSLATOR,
        }
    }

    /// Replaces the translator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_translator(mut self, translator: &'v dyn Translator) -> Self {
        self.translator = translator;
        self
    }

    /// Replaces the initial condition set.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_conditions(mut self, conditions: ConditionSet) -> Self {
        self.conditions = conditions;
        self
    }

    /// Stops the evaluation after the first violation.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_stop_on_first(mut self, stop: bool) -> Self {
        self.stop_on_first = stop;
        self
    }

    /// Stops the evaluation once `max` violations have been recorded.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_violations(mut self, max: Option<usize>) -> Self {
        self.max_violations = max;
        self
    }

    /// Records the schema's numeric policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_use_number(mut self, use_number: bool) -> Self {
        self.use_number = use_number;
        self
    }

    // ------------------------------------------------------------------------
    // Path
    // ------------------------------------------------------------------------

    /// Enters a property.
    pub fn push_property(&mut self, name: impl Into<String>) {
        self.path.push(PathFrame::Property(name.into()));
    }

    /// Enters an array index.
    pub fn push_index(&mut self, index: usize) {
        self.path.push(PathFrame::Index(index));
    }

    /// Leaves the innermost path frame.
    pub fn pop_path(&mut self) {
        self.path.pop();
    }

    /// The path frames, outermost first.
    #[must_use]
    pub fn path(&self) -> &[PathFrame] {
        &self.path
    }

    /// Renders the path as `a.b[0].c`.
    #[must_use]
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for frame in &self.path {
            match frame {
                PathFrame::Property(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                PathFrame::Index(index) => {
                    let _ = write!(out, "[{index}]");
                }
            }
        }
        out
    }

    /// Name of the innermost property frame, if any.
    #[must_use]
    pub fn current_property(&self) -> Option<&str> {
        self.path.iter().rev().find_map(|frame| match frame {
            PathFrame::Property(name) => Some(name.as_str()),
            PathFrame::Index(_) => None,
        })
    }

    // ------------------------------------------------------------------------
    // Ancestry
    // ------------------------------------------------------------------------

    /// Makes `object` the current object.
    pub fn enter_object(&mut self, object: &'v Map<String, Value>) {
        self.objects.push(object);
    }

    /// Returns to the enclosing object.
    pub fn exit_object(&mut self) {
        self.objects.pop();
    }

    /// The object whose properties are being checked.
    #[must_use]
    pub fn current_object(&self) -> Option<&'v Map<String, Value>> {
        self.objects.last().copied()
    }

    /// Enclosing objects, root first, excluding the current one.
    #[must_use]
    pub fn ancestors(&self) -> &[&'v Map<String, Value>] {
        match self.objects.split_last() {
            Some((_, ancestors)) => ancestors,
            None => &[],
        }
    }

    /// Enters element `index` of an array of `len` elements.
    pub fn enter_array_item(&mut self, index: usize, len: usize) {
        self.arrays.push(ArrayFrame { index, len });
    }

    /// Leaves the innermost array element.
    pub fn exit_array_item(&mut self) {
        self.arrays.pop();
    }

    /// True while an array element (or anything nested in one) is being checked.
    #[must_use]
    pub fn in_array(&self) -> bool {
        !self.arrays.is_empty()
    }

    // ------------------------------------------------------------------------
    // Conditions
    // ------------------------------------------------------------------------

    /// Returns true when `token` is set, including the synthetic position
    /// tokens of the innermost array element.
    #[must_use]
    pub fn has_condition(&self, token: &str) -> bool {
        self.conditions.has(token) || self.arrays.last().is_some_and(|frame| frame.holds(token))
    }

    /// Returns true when every token is set. An empty list always holds.
    #[must_use]
    pub fn all_conditions(&self, tokens: &[String]) -> bool {
        tokens.iter().all(|token| self.has_condition(token))
    }

    /// Returns true when any token is set.
    #[must_use]
    pub fn any_condition(&self, tokens: &[String]) -> bool {
        tokens.iter().any(|token| self.has_condition(token))
    }

    /// Sets a condition token. Reserved tokens are ignored with a warning.
    pub fn set_condition(&mut self, token: impl Into<String>, target: ConditionTarget) -> bool {
        match self.conditions.set(token, target) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path_string(), "condition not set");
                false
            }
        }
    }

    /// Clears a condition token. Reserved tokens are ignored with a warning.
    pub fn clear_condition(&mut self, token: &str, target: ConditionTarget) -> bool {
        match self.conditions.clear(token, target) {
            Ok(removed) => removed,
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path_string(), "condition not cleared");
                false
            }
        }
    }

    /// Opens a condition scope.
    pub fn push_scope(&mut self) {
        self.conditions.push_scope();
    }

    /// Closes the innermost condition scope.
    pub fn pop_scope(&mut self) {
        self.conditions.pop_scope();
    }

    /// The condition set.
    #[must_use]
    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    /// Evaluates an others-expression against the current object and its ancestry.
    #[must_use]
    pub fn evaluate(&self, expr: &OthersExpr) -> bool {
        let (current, ancestors) = match self.objects.split_last() {
            Some((current, ancestors)) => (*current, ancestors),
            None => (&*EMPTY_OBJECT, &[][..]),
        };
        expr.evaluate(&Scope::new(current, self).with_ancestors(ancestors))
    }

    // ------------------------------------------------------------------------
    // Violations and flow
    // ------------------------------------------------------------------------

    /// Records a violation at the current path.
    pub fn report(
        &mut self,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        constraint: Option<&'static str>,
    ) {
        let mut violation = Violation::new(code, message).with_path(self.path_string());
        violation.property = self.current_property().map(str::to_string);
        violation.constraint = constraint.map(Cow::Borrowed);
        self.add_violation(violation);
    }

    /// Appends a violation, honouring stop-on-first and the violation cap.
    pub fn add_violation(&mut self, violation: Violation) {
        if !self.continue_all {
            return;
        }
        if self.max_violations.is_some_and(|max| self.violations.len() >= max) {
            self.continue_all = false;
            return;
        }
        tracing::trace!(path = %violation.path, code = %violation.code, "violation");
        self.violations.push(violation);
        let capped = self
            .max_violations
            .is_some_and(|max| self.violations.len() >= max);
        if self.stop_on_first || capped {
            self.continue_all = false;
        }
    }

    /// Violations recorded so far.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Skips the rest of the current constraint chain (and, for object-level
    /// constraints, the property checks).
    pub fn cease_further(&mut self) {
        self.continue_property = false;
    }

    /// Ends the evaluation.
    pub fn stop_all(&mut self) {
        self.continue_all = false;
    }

    /// Runs `f` as a fresh chain whose `cease_further` stays local to it. The
    /// caller's chain flag is restored afterwards.
    pub fn isolated<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.continue_property;
        self.continue_property = true;
        let result = f(self);
        self.continue_property = saved;
        result
    }

    /// Resets the per-chain flag before a constraint chain runs.
    pub(crate) fn begin_chain(&mut self) {
        self.continue_property = true;
    }

    /// False once the evaluation has been stopped.
    #[must_use]
    pub fn should_continue(&self) -> bool {
        self.continue_all
    }

    /// False once the current chain asked to cease.
    #[must_use]
    pub fn chain_continues(&self) -> bool {
        self.continue_property && self.continue_all
    }

    /// The translator for messages.
    #[must_use]
    pub fn translator(&self) -> &'v dyn Translator {
        self.translator
    }

    /// Whether the schema asked for decimal number handling.
    #[must_use]
    pub fn use_number(&self) -> bool {
        self.use_number
    }

    /// Finishes the evaluation.
    #[must_use]
    pub fn into_report(self) -> ValidationReport {
        ValidationReport::from_violations(self.violations)
    }
}

impl ConditionLookup for Context<'_> {
    fn has_condition(&self, token: &str) -> bool {
        Context::has_condition(self, token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::violation::codes;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn renders_paths() {
        let mut ctx = Context::new();
        assert_eq!(ctx.path_string(), "");
        ctx.push_index(1);
        ctx.push_property("n");
        assert_eq!(ctx.path_string(), "[1].n");
        ctx.pop_path();
        ctx.pop_path();
        ctx.push_property("a");
        ctx.push_property("b");
        ctx.push_index(0);
        ctx.push_property("c");
        assert_eq!(ctx.path_string(), "a.b[0].c");
        assert_eq!(ctx.current_property(), Some("c"));
    }

    #[rstest]
    #[case(0, 3, "first", true)]
    #[case(2, 3, "last", true)]
    #[case(1, 3, "first", false)]
    #[case(1, 3, "%2", true)]
    #[case(0, 3, "%2", false)]
    #[case(2, 6, "%3", true)]
    #[case(0, 1, "%1", true)]
    #[case(0, 1, "%0", false)]
    #[case(0, 1, "%x", false)]
    fn synthetic_position_tokens(
        #[case] index: usize,
        #[case] len: usize,
        #[case] token: &str,
        #[case] expected: bool,
    ) {
        let mut ctx = Context::new();
        assert!(!ctx.has_condition(token));
        ctx.enter_array_item(index, len);
        assert_eq!(ctx.has_condition(token), expected);
    }

    #[test]
    fn stop_on_first_keeps_one_violation() {
        let mut ctx = Context::new().with_stop_on_first(true);
        ctx.report(codes::MISSING_PROPERTY, "a", None);
        ctx.report(codes::MISSING_PROPERTY, "b", None);
        assert_eq!(ctx.violations().len(), 1);
        assert!(!ctx.should_continue());
    }

    #[test]
    fn cap_stops_evaluation() {
        let mut ctx = Context::new().with_max_violations(Some(2));
        for _ in 0..5 {
            ctx.report(codes::UNKNOWN_PROPERTY, "x", None);
        }
        assert_eq!(ctx.violations().len(), 2);
    }

    #[test]
    fn zero_cap_records_nothing() {
        let mut ctx = Context::new().with_max_violations(Some(0));
        ctx.report(codes::UNKNOWN_PROPERTY, "x", None);
        assert!(ctx.violations().is_empty());
        assert!(!ctx.should_continue());
    }

    #[test]
    fn isolated_chain_keeps_cease_local() {
        let mut ctx = Context::new();
        ctx.begin_chain();
        ctx.isolated(|inner| {
            inner.cease_further();
            assert!(!inner.chain_continues());
        });
        assert!(ctx.chain_continues());

        ctx.cease_further();
        ctx.isolated(|inner| assert!(inner.chain_continues()));
        assert!(!ctx.chain_continues());
    }

    #[test]
    fn reserved_tokens_are_not_set() {
        let mut ctx = Context::new();
        assert!(!ctx.set_condition("%2", ConditionTarget::Global));
        assert!(ctx.set_condition("ok", ConditionTarget::Global));
        assert!(ctx.has_condition("ok"));
    }

    #[test]
    fn expressions_see_ancestry() {
        let root = json!({"mode": "strict", "child": {"x": 1}});
        let root_map = root.as_object().unwrap();
        let child_map = root_map["child"].as_object().unwrap();

        let mut ctx = Context::new();
        ctx.enter_object(root_map);
        ctx.enter_object(child_map);
        ctx.set_condition("flag", ConditionTarget::Current);

        let expr = vigil_expression::parse("x && .mode && ~flag").unwrap();
        assert!(ctx.evaluate(&expr));
        assert_eq!(ctx.ancestors().len(), 1);
    }

    #[test]
    fn evaluates_without_objects() {
        let ctx = Context::new();
        assert!(!ctx.evaluate(&vigil_expression::parse("a").unwrap()));
        assert!(ctx.evaluate(&vigil_expression::parse("!a").unwrap()));
    }
}
