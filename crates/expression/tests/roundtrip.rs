//! Property-based tests for the expression parser and printer.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vigil_expression::{ExprError, parse};

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z][a-z0-9_$@-]{0,5}",
        "~[a-z]{1,4}",
        "\\.{1,2}[a-z]{1,3}",
        "/\\.[a-z]{1,3}(\\.[a-z]{1,3}){0,2}",
        "[a-z]{1,3}\\\\\\.[a-z]{1,3}",
        "'[a-z][a-z ]{0,4}[a-z]'",
        "\"[a-z]'[a-z]\"",
    ]
}

fn expression() -> impl Strategy<Value = String> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        let term = (0usize..3, prop_oneof![leaf(), inner.prop_map(|e| format!("({e})"))])
            .prop_map(|(bangs, operand)| format!("{}{operand}", "!".repeat(bangs)));
        (
            term.clone(),
            prop::collection::vec((prop_oneof![Just("&&"), Just("||")], " {0,2}", term), 0..4),
        )
            .prop_map(|(first, rest)| {
                let mut out = first;
                for (op, pad, term) in rest {
                    out.push_str(&pad);
                    out.push_str(op);
                    out.push_str(&pad);
                    out.push_str(&term);
                }
                out
            })
    })
}

proptest! {
    #[test]
    fn printed_form_reparses_to_same_tree(source in expression()) {
        let parsed = parse(&source).unwrap();
        let printed = parsed.to_string();
        let reparsed = parse(&printed).unwrap();
        prop_assert_eq!(&parsed, &reparsed);
        prop_assert_eq!(printed, reparsed.to_string());
    }

    #[test]
    fn error_positions_are_within_input(source in "[a-z!()&|' ~.]{0,16}") {
        if let Err(error) = parse(&source) {
            prop_assert!(error.position() < source.chars().count().max(1));
        }
    }
}

#[test]
fn unquoted_special_characters_need_quotes() {
    let err = parse("first name && b").unwrap_err();
    assert_eq!(err, ExprError::MisplacedName { position: 6 });

    let expr = parse("'first name' && b").unwrap();
    assert_eq!(expr.to_string(), "'first name' && b");
}

#[test]
fn reserved_shapes_print_stably() {
    for source in ["/.a.b", "..x", r"a\.b", "~flag", "!(a || !b) && c"] {
        let expr = parse(source).unwrap();
        assert_eq!(expr.to_string(), source);
    }
}
