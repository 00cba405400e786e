use crate::validation::tests::assert_error_containing;
use crate::validation::tests::assert_valid;
use crate::validation::tests::test_schema;
use crate::validation::tests::validate_source;
use crate::validation::validate;
use crate::validation::validate_with_options;
use crate::validation::ValidationOptions;
use libgql_parser::parse_document;
use libgql_parser::ParseOptions;

#[test]
fn a_simple_valid_query_passes() {
    assert_valid("{ version hero { name } }");
}

#[test]
fn validation_is_idempotent() {
    let schema = test_schema();
    let source = "{ nope } query Q { alsoNope }";
    let first = validate_source(&schema, source);
    let second = validate_source(&schema, source);
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn type_system_definitions_are_rejected() {
    // Parse with SDL allowed to get such a document past the parser.
    let schema = test_schema();
    let document = parse_document(
        "query Q { version } type Sneaky { x: Int }",
        ParseOptions {
            allow_type_system: true,
        },
    )
    .unwrap();
    let errors = validate(&schema, &document);
    assert!(
        errors
            .iter()
            .any(|e| e.message.contains("executable definitions")),
        "{errors:?}",
    );
}

#[test]
fn operation_names_must_be_unique() {
    assert_error_containing(
        "query Q { version } query Q { version }",
        "only one operation named `Q`",
    );
}

#[test]
fn anonymous_operation_must_be_alone() {
    // Parses fine; fails validation (spec boundary behavior).
    assert_error_containing(
        "{ version } query Named { version }",
        "anonymous operation",
    );
}

#[test]
fn lone_anonymous_operation_is_fine() {
    assert_valid("{ version }");
}

#[test]
fn subscriptions_must_have_one_root_field() {
    assert_error_containing(
        "subscription Sub { heroUpdates { name } petUpdates { __typename } }",
        "exactly one top-level field",
    );
    assert_valid("subscription Sub { heroUpdates { name } }");
}

#[test]
fn subscription_root_count_sees_through_fragments() {
    assert_error_containing(
        "subscription Sub { ...Both }
         fragment Both on Subscription {
             heroUpdates { name }
             petUpdates { __typename }
         }",
        "exactly one top-level field",
    );
}

#[test]
fn max_depth_rule_is_opt_in() {
    let schema = test_schema();
    let source = "{ hero { friends { friends { friends { name } } } } }";
    let document = libgql_parser::parse_executable_document(source).unwrap();

    assert!(validate(&schema, &document).is_empty());

    let errors = validate_with_options(
        &schema,
        &document,
        ValidationOptions { max_depth: Some(3) },
    );
    assert!(
        errors.iter().any(|e| e.message.contains("maximum depth")),
        "{errors:?}",
    );
}

#[test]
fn fragment_names_must_be_unique() {
    assert_error_containing(
        "{ hero { ...F } }
         fragment F on Character { name }
         fragment F on Character { id }",
        "only one fragment named `F`",
    );
}

#[test]
fn spreads_must_name_known_fragments() {
    assert_error_containing("{ hero { ...Missing } }", "unknown fragment `Missing`");
}

#[test]
fn fragments_must_be_used() {
    assert_error_containing(
        "{ version }
         fragment Unused on Character { name }",
        "never used",
    );
}

#[test]
fn self_referential_fragment_is_reported_exactly_once() {
    let schema = test_schema();
    let errors = validate_source(
        &schema,
        "{ hero { ...Loop } }
         fragment Loop on Character { name ...Loop }",
    );
    let cycle_errors: Vec<_> = errors
        .iter()
        .filter(|e| e.message.contains("cannot spread itself"))
        .collect();
    assert_eq!(cycle_errors.len(), 1, "{errors:?}");
}

#[test]
fn mutual_fragment_cycles_are_reported_once() {
    let schema = test_schema();
    let errors = validate_source(
        &schema,
        "{ hero { ...A } }
         fragment A on Character { ...B }
         fragment B on Character { ...A }",
    );
    let cycle_errors: Vec<_> = errors
        .iter()
        .filter(|e| e.message.contains("fragment cycle"))
        .collect();
    assert_eq!(cycle_errors.len(), 1, "{errors:?}");
}

#[test]
fn fragment_conditions_must_be_composite() {
    assert_error_containing(
        "{ hero { ...F } }
         fragment F on Episode { name }",
        "non-composite",
    );
    assert_error_containing(
        "{ hero { ... on String { length } } }",
        "non-composite",
    );
}

#[test]
fn impossible_spreads_are_rejected() {
    // Cat is not a possible type of Character.
    assert_error_containing(
        "{ hero { ... on Cat { meows } } }",
        "can never spread",
    );
    // Human is a possible type of Character.
    assert_valid("{ hero { ... on Human { height } } }");
    // Pet members spread fine.
    assert_valid("{ pet { ... on Cat { meows } ... on Dog { barks } } }");
}
