//! Evaluation engine
//!
//! Walks a decoded JSON value against a [`Validator`]. The walk is split into
//! four mutually recursive steps:
//!
//! - value: dispatches a body on its shape (`null`, object, array, other)
//! - object: object-level constraints, properties, variants, unknown keys
//! - array: whole-array constraints, then every element
//! - property: nullability, type, constraint chain, nested validator
//!
//! Structural problems met on the way (a strict repository miss) abort the
//! walk with a [`SchemaError`]; everything else becomes a violation.

use crate::core::{
    Check, ConditionSet, Context, DefaultTranslator, SchemaResult, SharedConstraint, Translator,
    ValidationReport, Violation, codes,
};
use crate::options::ValidateOptions;
use crate::repository;
use crate::schema::{ConditionalVariant, PropertyType, PropertyValidator, Validator};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::ops::Deref;
use std::sync::Arc;

// ============================================================================
// ENTRY POINTS
// ============================================================================

impl Validator {
    /// Validates a decoded JSON value with default options.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownRepositoryProperty`](crate::core::SchemaError) when a
    /// shared property is missing from a strict repository.
    pub fn validate(&self, value: &Value) -> SchemaResult<ValidationReport> {
        self.validate_with(value, &ValidateOptions::default(), &DefaultTranslator)
    }

    /// Validates a decoded JSON value with explicit options and translator.
    ///
    /// # Errors
    ///
    /// As for [`Validator::validate`], plus a reserved token in
    /// `options.conditions`.
    pub fn validate_with(
        &self,
        value: &Value,
        options: &ValidateOptions,
        translator: &dyn Translator,
    ) -> SchemaResult<ValidationReport> {
        let conditions = ConditionSet::with_tokens(options.conditions.iter().map(String::as_str))?;
        let mut ctx = Context::new()
            .with_translator(translator)
            .with_conditions(conditions)
            .with_stop_on_first(self.stop_on_first || options.stop_on_first)
            .with_max_violations(options.max_violations)
            .with_use_number(self.use_number);

        tracing::debug!(
            properties = self.properties.len(),
            conditions = options.conditions.len(),
            "validation started"
        );
        validate_value(self, value, &mut ctx)?;
        let report = ctx.into_report();
        tracing::debug!(violations = report.len(), "validation finished");
        Ok(report)
    }

    /// Decodes `text` and validates it. Text that is not JSON yields a single
    /// `invalid_json` violation.
    ///
    /// # Errors
    ///
    /// As for [`Validator::validate`].
    pub fn validate_str(&self, text: &str) -> SchemaResult<ValidationReport> {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => self.validate(&value),
            Err(err) => {
                tracing::debug!(error = %err, "body is not valid json");
                let message = DefaultTranslator.translate_format("Invalid JSON: {}", &[&err]);
                Ok(ValidationReport::from_violations(vec![Violation::new(
                    codes::INVALID_JSON,
                    message,
                )]))
            }
        }
    }
}

// ============================================================================
// RESOLVED RULES
// ============================================================================

/// Property rules declared inline or fetched from the repository.
enum Rules<'s> {
    Declared(&'s PropertyValidator),
    Shared(Arc<PropertyValidator>),
}

impl Deref for Rules<'_> {
    type Target = PropertyValidator;

    fn deref(&self) -> &PropertyValidator {
        match self {
            Self::Declared(rules) => rules,
            Self::Shared(rules) => rules,
        }
    }
}

fn resolve<'s>(
    properties: &'s IndexMap<String, Option<PropertyValidator>>,
    ordered: bool,
) -> SchemaResult<Vec<(&'s str, Rules<'s>)>> {
    let mut resolved = properties
        .iter()
        .map(|(name, rules)| -> SchemaResult<(&'s str, Rules<'s>)> {
            let rules = match rules {
                Some(rules) => Rules::Declared(rules),
                None => Rules::Shared(repository::resolve(name)?),
            };
            Ok((name.as_str(), rules))
        })
        .collect::<SchemaResult<Vec<_>>>()?;
    if ordered {
        resolved.sort_by(|(a_name, a), (b_name, b)| a.order.cmp(&b.order).then(a_name.cmp(b_name)));
    }
    Ok(resolved)
}

// ============================================================================
// WALK
// ============================================================================

fn validate_value<'v>(
    validator: &Validator,
    value: &'v Value,
    ctx: &mut Context<'v>,
) -> SchemaResult<()> {
    match value {
        Value::Null => {
            if !validator.allow_null_json {
                let message = ctx.translator().translate_message("Body must not be null");
                ctx.report(codes::NULL_BODY, message, None);
            }
            Ok(())
        }
        Value::Object(map) => {
            if validator.disallow_object {
                let message = ctx.translator().translate_message("Object not allowed");
                ctx.report(codes::OBJECT_NOT_ALLOWED, message, None);
                return Ok(());
            }
            validate_object(validator, value, map, ctx)
        }
        Value::Array(items) => {
            if !validator.allow_array {
                let message = ctx.translator().translate_message("Array not allowed");
                ctx.report(codes::ARRAY_NOT_ALLOWED, message, None);
                return Ok(());
            }
            validate_array(validator, value, items, ctx)
        }
        _ => {
            let message = ctx.translator().translate_message("Expected object or array");
            ctx.report(codes::INVALID_BODY, message, None);
            Ok(())
        }
    }
}

fn validate_object<'v>(
    validator: &Validator,
    value: &'v Value,
    map: &'v Map<String, Value>,
    ctx: &mut Context<'v>,
) -> SchemaResult<()> {
    if !ctx.all_conditions(&validator.when_conditions) {
        tracing::trace!(path = %ctx.path_string(), "object skipped by when-conditions");
        return Ok(());
    }
    ctx.enter_object(map);
    let result = check_object(validator, value, map, ctx);
    ctx.exit_object();
    result
}

fn check_object<'v>(
    validator: &Validator,
    value: &'v Value,
    map: &'v Map<String, Value>,
    ctx: &mut Context<'v>,
) -> SchemaResult<()> {
    let proceed = run_chain(&validator.constraints, value, ctx);
    if !ctx.should_continue() {
        return Ok(());
    }

    let mut covered: HashSet<&str> = validator.properties.keys().map(String::as_str).collect();
    if proceed {
        for (name, rules) in resolve(&validator.properties, validator.ordered_property_checks)? {
            if !ctx.should_continue() {
                return Ok(());
            }
            check_property(name, &rules, map, ctx)?;
        }
    } else {
        tracing::trace!(path = %ctx.path_string(), "property checks ceased by object constraints");
    }

    let mut variant_types = HashMap::new();
    apply_variants(
        &validator.conditional_variants,
        validator.ordered_property_checks,
        value,
        map,
        ctx,
        &mut covered,
        &mut variant_types,
    )?;

    if !validator.ignore_unknown_properties {
        for key in map.keys() {
            if !ctx.should_continue() {
                break;
            }
            if !covered.contains(key.as_str()) {
                ctx.push_property(key.as_str());
                let message = ctx.translator().translate_message("Unknown property");
                ctx.report(codes::UNKNOWN_PROPERTY, message, None);
                ctx.pop_path();
            }
        }
    }
    Ok(())
}

fn apply_variants<'s, 'v>(
    variants: &'s [ConditionalVariant],
    ordered: bool,
    value: &'v Value,
    map: &'v Map<String, Value>,
    ctx: &mut Context<'v>,
    covered: &mut HashSet<&'s str>,
    types: &mut HashMap<&'s str, PropertyType>,
) -> SchemaResult<()> {
    for variant in variants {
        if !ctx.should_continue() {
            return Ok(());
        }
        if !ctx.all_conditions(&variant.when_conditions) {
            tracing::trace!(when = ?variant.when_conditions, "variant inactive");
            continue;
        }
        tracing::trace!(when = ?variant.when_conditions, "variant active");

        let proceed = run_chain(&variant.constraints, value, ctx);
        if !ctx.should_continue() {
            return Ok(());
        }
        covered.extend(variant.properties.keys().map(String::as_str));

        if proceed {
            for (name, rules) in resolve(&variant.properties, ordered)? {
                if !ctx.should_continue() {
                    return Ok(());
                }
                if map.contains_key(name) {
                    match types.entry(name) {
                        Entry::Occupied(earlier) if *earlier.get() != rules.kind => {
                            ctx.push_property(name);
                            let message = ctx.translator().translate_format(
                                "Conflicting types {} and {}",
                                &[earlier.get(), &rules.kind],
                            );
                            ctx.report(codes::VARIANT_CONFLICT, message, None);
                            ctx.pop_path();
                            continue;
                        }
                        Entry::Occupied(_) => {}
                        Entry::Vacant(slot) => {
                            slot.insert(rules.kind);
                        }
                    }
                }
                check_property(name, &rules, map, ctx)?;
            }
        }

        apply_variants(&variant.conditional_variants, ordered, value, map, ctx, covered, types)?;
    }
    Ok(())
}

fn check_property<'v>(
    name: &str,
    rules: &PropertyValidator,
    map: &'v Map<String, Value>,
    ctx: &mut Context<'v>,
) -> SchemaResult<()> {
    if !ctx.all_conditions(&rules.when_conditions) {
        tracing::trace!(property = name, "property skipped by when-conditions");
        return Ok(());
    }

    let required_with = rules.required_with.as_ref().is_some_and(|expr| ctx.evaluate(expr));
    let mandatory = (rules.mandatory && ctx.all_conditions(&rules.mandatory_when)) || required_with;

    let Some(value) = map.get(name) else {
        if mandatory {
            ctx.push_property(name);
            let key = match &rules.required_with_message {
                Some(custom) if required_with => custom.as_str(),
                _ => "Missing property",
            };
            let message = ctx.translator().translate_message(key);
            ctx.report(codes::MISSING_PROPERTY, message, None);
            ctx.pop_path();
        }
        return Ok(());
    };

    let unwanted_with = rules.unwanted_with.as_ref().is_some_and(|expr| ctx.evaluate(expr));
    ctx.push_property(name);
    let result = if unwanted_with || ctx.any_condition(&rules.unwanted_conditions) {
        let key = match &rules.unwanted_with_message {
            Some(custom) if unwanted_with => custom.as_str(),
            _ => "Property not allowed",
        };
        let message = ctx.translator().translate_message(key);
        ctx.report(codes::UNWANTED_PROPERTY, message, None);
        Ok(())
    } else {
        validate_property(rules, value, ctx)
    };
    ctx.pop_path();
    result
}

fn validate_property<'v>(
    rules: &PropertyValidator,
    value: &'v Value,
    ctx: &mut Context<'v>,
) -> SchemaResult<()> {
    if value.is_null() {
        if rules.not_null {
            let message = ctx.translator().translate_message("Value cannot be null");
            ctx.report(codes::NULL_NOT_ALLOWED, message, None);
        }
        return Ok(());
    }

    if !admits(rules, value) {
        let translator = ctx.translator();
        let kind = translator.translate_token(rules.kind.as_str());
        let message = translator.translate_format("Expected type {}", &[&kind]);
        ctx.report(codes::INVALID_TYPE, message, None);
        return Ok(());
    }

    if !run_chain(&rules.constraints, value, ctx) {
        return Ok(());
    }

    match &rules.object_validator {
        Some(nested) => validate_nested(rules.kind, nested, value, ctx),
        None => Ok(()),
    }
}

/// Type check. With a nested validator, `object` and `array` properties admit
/// both shapes and leave the choice to the nested validator's flags.
fn admits(rules: &PropertyValidator, value: &Value) -> bool {
    let polymorphic = rules.object_validator.is_some()
        && matches!(rules.kind, PropertyType::Object | PropertyType::Array)
        && (value.is_object() || value.is_array());
    polymorphic || rules.kind.matches(value)
}

fn validate_nested<'v>(
    kind: PropertyType,
    nested: &Validator,
    value: &'v Value,
    ctx: &mut Context<'v>,
) -> SchemaResult<()> {
    match value {
        Value::Object(map) => {
            if nested.disallow_object {
                let message = ctx.translator().translate_message("Object not allowed");
                ctx.report(codes::OBJECT_NOT_ALLOWED, message, None);
                return Ok(());
            }
            // Array elements open their own scopes, so only objects need one here.
            ctx.push_scope();
            let result = validate_object(nested, value, map, ctx);
            ctx.pop_scope();
            result
        }
        Value::Array(items) => {
            if kind != PropertyType::Array && !nested.allow_array {
                let message = ctx.translator().translate_message("Array not allowed");
                ctx.report(codes::ARRAY_NOT_ALLOWED, message, None);
                return Ok(());
            }
            validate_array(nested, value, items, ctx)
        }
        _ => {
            let message = ctx.translator().translate_message("Expected object or array");
            ctx.report(codes::INVALID_TYPE, message, None);
            Ok(())
        }
    }
}

fn validate_array<'v>(
    validator: &Validator,
    value: &'v Value,
    items: &'v [Value],
    ctx: &mut Context<'v>,
) -> SchemaResult<()> {
    if !run_chain(&validator.array_constraints, value, ctx) {
        return Ok(());
    }

    let len = items.len();
    for (index, item) in items.iter().enumerate() {
        if !ctx.should_continue() {
            break;
        }
        ctx.push_index(index);
        ctx.enter_array_item(index, len);
        ctx.push_scope();
        let result = validate_item(validator, item, ctx);
        ctx.pop_scope();
        ctx.exit_array_item();
        ctx.pop_path();
        result?;
    }
    Ok(())
}

fn validate_item<'v>(
    validator: &Validator,
    item: &'v Value,
    ctx: &mut Context<'v>,
) -> SchemaResult<()> {
    match item {
        Value::Null => {
            if !validator.allow_null_items {
                let message = ctx.translator().translate_message("Array item cannot be null");
                ctx.report(codes::NULL_ITEM, message, None);
            }
            Ok(())
        }
        Value::Object(map) => validate_object(validator, item, map, ctx),
        Value::Array(inner) if validator.allow_array => validate_array(validator, item, inner, ctx),
        Value::Array(_) => {
            let message = ctx.translator().translate_message("Array not allowed");
            ctx.report(codes::ARRAY_NOT_ALLOWED, message, None);
            Ok(())
        }
        _ => {
            let message = ctx.translator().translate_message("Expected object or array");
            ctx.report(codes::INVALID_TYPE, message, None);
            Ok(())
        }
    }
}

/// Runs a constraint chain. Returns false when a constraint ceased further
/// checks or the evaluation was stopped.
fn run_chain(constraints: &[SharedConstraint], value: &Value, ctx: &mut Context<'_>) -> bool {
    ctx.begin_chain();
    for constraint in constraints {
        if !ctx.chain_continues() {
            break;
        }
        if let Check::Failed(failure) = constraint.check(value, ctx) {
            ctx.report(failure.code, failure.message, Some(constraint.name()));
        }
    }
    let proceed = ctx.chain_continues();
    ctx.begin_chain();
    proceed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{ConstraintSet, SetConditionIf};
    use crate::core::{CatalogTranslator, ConditionTarget};
    use crate::validators::{Equals, Length, NotEmpty, Range};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn codes_of(report: &ValidationReport) -> Vec<(&str, &str)> {
        report.iter().map(|v| (v.path.as_str(), v.code.as_ref())).collect()
    }

    #[rstest]
    #[case(Validator::new(), json!(null), Some(codes::NULL_BODY))]
    #[case(Validator::new().allow_null_json(), json!(null), None)]
    #[case(Validator::new(), json!([]), Some(codes::ARRAY_NOT_ALLOWED))]
    #[case(Validator::new().allow_array(), json!([]), None)]
    #[case(Validator::new().disallow_object().allow_array(), json!({}), Some(codes::OBJECT_NOT_ALLOWED))]
    #[case(Validator::new(), json!(42), Some(codes::INVALID_BODY))]
    #[case(Validator::new(), json!({}), None)]
    fn body_shapes(#[case] schema: Validator, #[case] body: Value, #[case] expected: Option<&str>) {
        let report = schema.validate(&body).unwrap();
        assert_eq!(report.iter().next().map(|v| v.code.as_ref()), expected);
    }

    #[test]
    fn null_property_rules() {
        let schema = Validator::new()
            .property("a", PropertyValidator::string().not_null())
            .property("b", PropertyValidator::string().constraint(NotEmpty::default()));
        let report = schema.validate(&json!({"a": null, "b": null})).unwrap();
        assert_eq!(codes_of(&report), vec![("a", codes::NULL_NOT_ALLOWED)]);
    }

    #[test]
    fn type_failure_skips_constraints() {
        let schema =
            Validator::new().property("n", PropertyValidator::integer().constraint(Range::new(0.0, 1.0)));
        let report = schema.validate(&json!({"n": 2.5})).unwrap();
        assert_eq!(codes_of(&report), vec![("n", codes::INVALID_TYPE)]);
        assert_eq!(report.violations[0].message, "Expected type integer");
        assert!(schema.validate(&json!({"n": 1.0})).unwrap().is_ok());
    }

    #[test]
    fn cease_further_skips_rest_of_chain() {
        let schema = Validator::new().property(
            "s",
            PropertyValidator::string()
                .constraint(ConstraintSet::all_of().with(Length::new(5, None)).stop_on_fail())
                .constraint(Equals::new("never")),
        );
        let report = schema.validate(&json!({"s": "abc"})).unwrap();
        assert_eq!(codes_of(&report), vec![("s", "length")]);
        assert_eq!(report.violations[0].constraint.as_deref(), Some("ConstraintSet"));
    }

    #[test]
    fn object_constraints_can_cease_property_checks() {
        let schema = Validator::new()
            .constraint(ConstraintSet::all_of().with(Equals::new(json!({"ok": true}))).stop_on_fail())
            .property("ok", PropertyValidator::boolean().mandatory());
        let report = schema.validate(&json!({"other": 1})).unwrap();
        assert_eq!(codes_of(&report), vec![("", "equals"), ("other", codes::UNKNOWN_PROPERTY)]);
    }

    #[test]
    fn unwanted_conditions() {
        let schema = Validator::new()
            .property(
                "kind",
                PropertyValidator::string()
                    .constraint(SetConditionIf::new(Equals::new("guest"), "GUEST").target(ConditionTarget::Current)),
            )
            .property("password", PropertyValidator::string().unwanted_when(["GUEST"]));
        let report = schema.validate(&json!({"kind": "guest", "password": "x"})).unwrap();
        assert_eq!(codes_of(&report), vec![("password", codes::UNWANTED_PROPERTY)]);
        assert!(schema.validate(&json!({"kind": "user", "password": "x"})).unwrap().is_ok());
    }

    #[test]
    fn nested_scopes_do_not_leak_upward() {
        let inner = Validator::new().property(
            "flag",
            PropertyValidator::boolean().constraint(SetConditionIf::new(Equals::new(true), "INNER")),
        );
        let schema = Validator::new()
            .ordered_property_checks()
            .property("child", PropertyValidator::object(inner).order(1))
            .property("needs", PropertyValidator::string().mandatory_when(["INNER"]).order(2));
        assert!(schema.validate(&json!({"child": {"flag": true}})).unwrap().is_ok());
    }

    #[test]
    fn parent_target_reaches_enclosing_scope() {
        let inner = Validator::new().property(
            "flag",
            PropertyValidator::boolean()
                .constraint(SetConditionIf::new(Equals::new(true), "INNER").target(ConditionTarget::Parent)),
        );
        let schema = Validator::new()
            .ordered_property_checks()
            .property("child", PropertyValidator::object(inner).order(1))
            .property("needs", PropertyValidator::string().mandatory_when(["INNER"]).order(2));
        let report = schema.validate(&json!({"child": {"flag": true}})).unwrap();
        assert_eq!(codes_of(&report), vec![("needs", codes::MISSING_PROPERTY)]);
    }

    #[test]
    fn parent_target_from_array_elements_reaches_enclosing_scope() {
        let inner = Validator::new().allow_array().property(
            "flag",
            PropertyValidator::boolean()
                .constraint(SetConditionIf::new(Equals::new(true), "INNER").target(ConditionTarget::Parent)),
        );
        let schema = Validator::new()
            .ordered_property_checks()
            .property("child", PropertyValidator::object(inner).order(1))
            .property("needs", PropertyValidator::string().mandatory_when(["INNER"]).order(2));

        let as_object = schema.validate(&json!({"child": {"flag": true}})).unwrap();
        let as_array = schema.validate(&json!({"child": [{"flag": true}]})).unwrap();
        assert_eq!(codes_of(&as_array), vec![("needs", codes::MISSING_PROPERTY)]);
        assert_eq!(as_array, as_object);
    }

    #[test]
    fn current_target_in_array_elements_stays_in_the_element() {
        let inner = Validator::new().allow_array().property(
            "flag",
            PropertyValidator::boolean().constraint(SetConditionIf::new(Equals::new(true), "INNER")),
        );
        let schema = Validator::new()
            .ordered_property_checks()
            .property("child", PropertyValidator::object(inner).order(1))
            .property("needs", PropertyValidator::string().mandatory_when(["INNER"]).order(2));
        assert!(schema.validate(&json!({"child": [{"flag": true}]})).unwrap().is_ok());
    }

    #[test]
    fn polymorphic_nested_validator() {
        let item = Validator::new().property("id", PropertyValidator::integer().mandatory());
        let schema = Validator::new().property("items", PropertyValidator::object(item.clone().allow_array()));
        let report = schema.validate(&json!({"items": [{"id": 1}, {}]})).unwrap();
        assert_eq!(codes_of(&report), vec![("items[1].id", codes::MISSING_PROPERTY)]);
        assert!(schema.validate(&json!({"items": {"id": 1}})).unwrap().is_ok());

        let objects_only = Validator::new().property("items", PropertyValidator::object(item));
        let report = objects_only.validate(&json!({"items": []})).unwrap();
        assert_eq!(codes_of(&report), vec![("items", codes::ARRAY_NOT_ALLOWED)]);
    }

    #[test]
    fn array_items() {
        let schema = Validator::new().allow_array().property("n", PropertyValidator::integer());
        let report = schema.validate(&json!([{"n": 1}, null, 3, {"n": "x"}])).unwrap();
        assert_eq!(
            codes_of(&report),
            vec![("[1]", codes::NULL_ITEM), ("[2]", codes::INVALID_TYPE), ("[3].n", codes::INVALID_TYPE)]
        );
        let lenient = schema.clone().allow_null_items();
        assert_eq!(lenient.validate(&json!([null])).unwrap().len(), 0);
    }

    #[test]
    fn variants_merge_properties() {
        let schema = Validator::new()
            .property(
                "kind",
                PropertyValidator::string()
                    .mandatory()
                    .constraint(SetConditionIf::new(Equals::new("card"), "CARD")),
            )
            .variant(ConditionalVariant::when(["CARD"]).property("number", PropertyValidator::string().mandatory()));
        let report = schema.validate(&json!({"kind": "card"})).unwrap();
        assert_eq!(codes_of(&report), vec![("number", codes::MISSING_PROPERTY)]);
        let report = schema.validate(&json!({"kind": "cash", "number": "1"})).unwrap();
        assert_eq!(codes_of(&report), vec![("number", codes::UNKNOWN_PROPERTY)]);
    }

    #[test]
    fn conflicting_variants() {
        let schema = Validator::new()
            .variant(ConditionalVariant::when(["A"]).property("x", PropertyValidator::string()))
            .variant(ConditionalVariant::when(["B"]).property("x", PropertyValidator::integer()));
        let options = ValidateOptions::new().conditions(["A", "B"]);
        let report = schema.validate_with(&json!({"x": "s"}), &options, &DefaultTranslator).unwrap();
        assert_eq!(codes_of(&report), vec![("x", codes::VARIANT_CONFLICT)]);
    }

    #[test]
    fn when_conditions_skip_objects_and_properties() {
        let schema = Validator::new()
            .ignore_unknown_properties()
            .property("admin", PropertyValidator::string().mandatory().when(["ADMIN"]));
        assert!(schema.validate(&json!({})).unwrap().is_ok());
        let options = ValidateOptions::new().conditions(["ADMIN"]);
        let report = schema.validate_with(&json!({}), &options, &DefaultTranslator).unwrap();
        assert_eq!(report.len(), 1);

        let gated = Validator::new().when(["NEVER"]).property("x", PropertyValidator::any().mandatory());
        assert!(gated.validate(&json!({"y": 1})).unwrap().is_ok());
    }

    #[test]
    fn messages_are_translated() {
        let catalog = CatalogTranslator::new()
            .with_message("Missing property", "Propriété manquante")
            .with_format("Expected type {}", "Type attendu : {}")
            .with_token("integer", "entier");
        let schema = Validator::new()
            .property("a", PropertyValidator::any().mandatory())
            .property("b", PropertyValidator::integer());
        let report = schema
            .validate_with(&json!({"b": "x"}), &ValidateOptions::new(), &catalog)
            .unwrap();
        let messages: Vec<_> = report.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(messages, ["Propriété manquante", "Type attendu : entier"]);
    }

    #[test]
    fn options_cap_and_reserved_tokens() {
        let schema = Validator::new();
        let options = ValidateOptions::new().max_violations(2);
        let report = schema.validate_with(&json!({"a": 1, "b": 2, "c": 3}), &options, &DefaultTranslator).unwrap();
        assert_eq!(report.len(), 2);

        let reserved = ValidateOptions::new().conditions(["%2"]);
        assert!(schema.validate_with(&json!({}), &reserved, &DefaultTranslator).is_err());
    }

    #[test]
    fn zero_cap_reports_nothing() {
        let options = ValidateOptions::new().max_violations(0);
        let report = Validator::new().validate_with(&json!({"a": 1}), &options, &DefaultTranslator).unwrap();
        assert!(report.is_ok());
    }

    #[rstest]
    #[case::set_condition_test(
        SetConditionIf::new(ConstraintSet::all_of().with(Equals::new("x")).stop_on_fail(), "X").into()
    )]
    #[case::passing_one_of(
        ConstraintSet::one_of()
            .with(ConstraintSet::all_of().with(Equals::new("a")).stop_on_fail())
            .with(Length::new(0, None))
            .into()
    )]
    fn nested_stop_on_fail_stays_inside(#[case] first: SharedConstraint) {
        let schema = Validator::new().property(
            "s",
            PropertyValidator::string().constraint(first).constraint(Length::new(0, Some(2))),
        );
        let report = schema.validate(&json!({"s": "toolong"})).unwrap();
        assert_eq!(codes_of(&report), vec![("s", "length")]);
    }

    #[test]
    fn invalid_json_text() {
        let report = Validator::new().validate_str("{not json").unwrap();
        assert_eq!(codes_of(&report), vec![("", codes::INVALID_JSON)]);
        assert!(report.violations[0].message.starts_with("Invalid JSON: "));
        assert!(Validator::new().validate_str("{}").unwrap().is_ok());
    }
}
