//! End-to-end evaluation scenarios.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use vigil_validator::prelude::*;

fn summary(report: &ValidationReport) -> Vec<(String, String)> {
    report
        .iter()
        .map(|v| (v.path.clone(), v.code.to_string()))
        .collect()
}

fn required_foo() -> Validator {
    Validator::new().property("foo", PropertyValidator::string().mandatory().not_null())
}

// ============================================================================
// PRESENCE AND TYPES
// ============================================================================

#[test]
fn missing_required_property() {
    let report = required_foo().validate(&json!({})).unwrap();
    assert!(!report.ok);
    assert_eq!(summary(&report), [("foo".to_string(), codes::MISSING_PROPERTY.to_string())]);
    assert_eq!(report.violations[0].property.as_deref(), Some("foo"));
}

#[test]
fn type_mismatch() {
    let report = required_foo().validate(&json!({"foo": 42})).unwrap();
    assert!(!report.ok);
    assert_eq!(report.len(), 1);
    let violation = &report.violations[0];
    assert_eq!(violation.path, "foo");
    assert_eq!(violation.code, codes::INVALID_TYPE);
    assert_eq!(violation.message, "Expected type string");
}

// ============================================================================
// CONDITIONS
// ============================================================================

#[test]
fn set_condition_drives_mandatoriness() {
    let schema = Validator::new()
        .property(
            "kind",
            PropertyValidator::string().mandatory().constraint(
                SetConditionIf::new(Equals::new("premium"), "IS_PREMIUM")
                    .target(ConditionTarget::Global),
            ),
        )
        .property("plan", PropertyValidator::string().mandatory_when(["IS_PREMIUM"]));

    assert!(schema.validate(&json!({"kind": "free"})).unwrap().is_ok());

    let report = schema.validate(&json!({"kind": "premium"})).unwrap();
    assert_eq!(summary(&report), [("plan".to_string(), codes::MISSING_PROPERTY.to_string())]);
    assert!(
        schema
            .validate(&json!({"kind": "premium", "plan": "gold"}))
            .unwrap()
            .is_ok()
    );
}

#[test]
fn required_with_expression() {
    let schema = Validator::new()
        .property("a", PropertyValidator::any())
        .property(
            "b",
            PropertyValidator::any()
                .required_with(parse_expr("a && !c").unwrap())
                .required_with_message("b is needed when a is given without c"),
        )
        .property("c", PropertyValidator::any());

    let report = schema.validate(&json!({"a": "x"})).unwrap();
    assert_eq!(summary(&report), [("b".to_string(), codes::MISSING_PROPERTY.to_string())]);
    assert_eq!(report.violations[0].message, "b is needed when a is given without c");

    assert!(schema.validate(&json!({"a": "x", "c": "y"})).unwrap().is_ok());
    assert!(schema.validate(&json!({"b": "x"})).unwrap().is_ok());
}

#[test]
fn required_with_reaches_ancestors() {
    let address = Validator::new()
        .property("street", PropertyValidator::string())
        .property("zip", PropertyValidator::string().required_with(parse_expr(".shipping").unwrap()));
    let schema = Validator::new()
        .property("shipping", PropertyValidator::boolean())
        .property("address", PropertyValidator::object(address));

    let report = schema
        .validate(&json!({"shipping": true, "address": {"street": "Main"}}))
        .unwrap();
    assert_eq!(summary(&report), [("address.zip".to_string(), codes::MISSING_PROPERTY.to_string())]);
    assert!(schema.validate(&json!({"address": {"street": "Main"}})).unwrap().is_ok());
}

#[test]
fn unwanted_with_expression() {
    let schema = Validator::new()
        .property("card", PropertyValidator::string())
        .property(
            "iban",
            PropertyValidator::string()
                .unwanted_with(parse_expr("card").unwrap())
                .unwanted_with_message("Pay by card or by transfer, not both"),
        );
    let report = schema.validate(&json!({"card": "4111", "iban": "DE00"})).unwrap();
    assert_eq!(summary(&report), [("iban".to_string(), codes::UNWANTED_PROPERTY.to_string())]);
    assert_eq!(report.violations[0].message, "Pay by card or by transfer, not both");
}

// ============================================================================
// ARRAYS
// ============================================================================

#[test]
fn array_conditional_on_every_second_item() {
    let schema = Validator::new().allow_array().property(
        "n",
        PropertyValidator::integer().constraint(ArrayConditional::new("%2", Minimum::exclusive(0.0))),
    );

    let report = schema
        .validate(&json!([{"n": -1}, {"n": -2}, {"n": 3}]))
        .unwrap();
    assert_eq!(summary(&report), [("[1].n".to_string(), "minimum".to_string())]);
    assert_eq!(report.violations[0].constraint.as_deref(), Some("ArrayConditional"));
}

#[test]
fn array_conditional_first_and_last() {
    let schema = Validator::new().allow_array().property(
        "n",
        PropertyValidator::integer()
            .constraint(ArrayConditional::new("first", Equals::new(0)))
            .constraint(ArrayConditional::new("!first", Minimum::exclusive(0.0))),
    );
    assert!(schema.validate(&json!([{"n": 0}, {"n": 1}, {"n": 2}])).unwrap().is_ok());

    let report = schema.validate(&json!([{"n": 1}, {"n": 0}])).unwrap();
    assert_eq!(
        summary(&report),
        [
            ("[0].n".to_string(), "equals".to_string()),
            ("[1].n".to_string(), "minimum".to_string()),
        ]
    );
}

#[test]
fn array_constraints_see_the_whole_array() {
    let schema = Validator::new()
        .allow_array()
        .array_constraint(Size::new(1, Some(2)))
        .ignore_unknown_properties();
    assert!(schema.validate(&json!([{}])).unwrap().is_ok());
    let report = schema.validate(&json!([{}, {}, {}])).unwrap();
    assert_eq!(summary(&report), [(String::new(), "size".to_string())]);
}

// ============================================================================
// SERIALIZATION
// ============================================================================

fn round_trip_schema() -> Validator {
    let nested = Validator::new().property(
        "foo",
        PropertyValidator::string().constraint(
            ConstraintSet::all_of()
                .with(Length::new(1, Some(10)))
                .with(Range::new(3.0, 4.0)),
        ),
    );
    nested.variant(
        ConditionalVariant::when(["EXTENDED"]).property("bar", PropertyValidator::integer().mandatory()),
    )
}

#[test]
fn serializer_round_trip_preserves_results() {
    let schema = round_trip_schema();
    let text = schema.to_json_string().unwrap();
    let restored = Validator::from_json_str(&text).unwrap();

    let input = json!({"foo": "hello"});
    assert_eq!(schema.validate(&input).unwrap(), restored.validate(&input).unwrap());
    assert!(restored.validate(&input).unwrap().is_ok());

    let long = json!({"foo": "far too long a value"});
    assert_eq!(schema.validate(&long).unwrap(), restored.validate(&long).unwrap());
    assert_eq!(restored.to_json_value().unwrap(), schema.to_json_value().unwrap());
}

#[test]
fn serialized_form_uses_stable_keys() {
    let value: Value = round_trip_schema().to_json_value().unwrap();
    assert_eq!(
        value,
        json!({
            "properties": {
                "foo": {
                    "type": "string",
                    "constraints": [{
                        "name": "ConstraintSet",
                        "fields": {
                            "Constraints": [
                                {"name": "Length", "fields": {"Minimum": 1, "Maximum": 10}},
                                {"name": "Range", "fields": {"Minimum": 3.0, "Maximum": 4.0}}
                            ]
                        }
                    }]
                }
            },
            "conditionalVariants": [{
                "whenConditions": ["EXTENDED"],
                "properties": {"bar": {"type": "integer", "mandatory": true}}
            }]
        })
    );
}
