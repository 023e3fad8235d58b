//! Property-based tests for vigil-validator.

use proptest::prelude::*;
use serde_json::{Map, Value, json};
use vigil_validator::prelude::*;

fn schema() -> Validator {
    Validator::new()
        .ordered_property_checks()
        .property("id", PropertyValidator::integer().mandatory().constraint(Minimum::inclusive(1.0)).order(1))
        .property(
            "name",
            PropertyValidator::string()
                .not_null()
                .constraint(Length::new(2, Some(8)))
                .order(2),
        )
        .property("tags", PropertyValidator::array(Validator::new().ignore_unknown_properties()).order(3))
        .property("flag", PropertyValidator::boolean().order(4))
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-5i64..20).prop_map(Value::from),
        "[a-z]{0,10}".prop_map(Value::from),
    ]
}

fn body() -> impl Strategy<Value = Value> {
    let key = prop_oneof![
        Just("id".to_string()),
        Just("name".to_string()),
        Just("tags".to_string()),
        Just("flag".to_string()),
        "[a-z]{1,4}",
    ];
    let field = prop_oneof![
        scalar(),
        prop::collection::vec(scalar(), 0..3).prop_map(Value::from),
        prop::collection::vec(Just(json!({})), 0..3).prop_map(Value::from),
    ];
    prop::collection::vec((key, field), 0..6)
        .prop_map(|entries| Value::Object(entries.into_iter().collect::<Map<_, _>>()))
}

// ============================================================================
// DETERMINISM: validate(x) == validate(x)
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic(input in body()) {
        let schema = schema();
        let first = schema.validate(&input).unwrap();
        let second = schema.validate(&input).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn round_tripped_schema_agrees(input in body()) {
        let schema = schema();
        let restored = Validator::from_json_value(schema.to_json_value().unwrap()).unwrap();
        prop_assert_eq!(schema.validate(&input).unwrap(), restored.validate(&input).unwrap());
    }
}

// ============================================================================
// SHORT-CIRCUIT: stopOnFirst and the cap bound the report
// ============================================================================

proptest! {
    #[test]
    fn stop_on_first_reports_at_most_one(input in body()) {
        let full = schema().validate(&input).unwrap();
        let stopped = schema().stop_on_first().validate(&input).unwrap();
        prop_assert!(stopped.len() <= 1);
        prop_assert_eq!(stopped.is_ok(), full.is_ok());
        prop_assert_eq!(stopped.violations.first(), full.violations.first());
    }

    #[test]
    fn cap_truncates_the_full_report(input in body(), cap in 1usize..4) {
        let full = schema().validate(&input).unwrap();
        let options = ValidateOptions::new().max_violations(cap);
        let capped = schema().validate_with(&input, &options, &DefaultTranslator).unwrap();
        prop_assert_eq!(capped.len(), full.len().min(cap));
        prop_assert_eq!(&capped.violations[..], &full.violations[..capped.len()]);
    }

    #[test]
    fn ok_matches_violations(input in body()) {
        let report = schema().validate(&input).unwrap();
        prop_assert_eq!(report.ok, report.violations.is_empty());
    }
}
