use crate::validation::tests::assert_error_containing;
use crate::validation::tests::assert_valid;

#[test]
fn unknown_fields_are_rejected() {
    assert_error_containing(
        "{ hero { name favoriteColor } }",
        "cannot query field `favoriteColor` on type `Character`",
    );
}

#[test]
fn unions_only_expose_typename_directly() {
    assert_error_containing("{ pet { meows } }", "on union `Pet`");
    assert_valid("{ pet { __typename } }");
}

#[test]
fn typename_is_selectable_everywhere() {
    assert_valid("{ __typename hero { __typename } pet { __typename } }");
}

#[test]
fn leaf_fields_take_no_subselection() {
    assert_error_containing("{ version { length } }", "must not have a subselection");
}

#[test]
fn composite_fields_require_a_subselection() {
    assert_error_containing("{ hero }", "must have a subselection");
}

#[test]
fn arguments_must_be_known() {
    assert_error_containing(
        "{ human(identifier: 4) { name } }",
        "unknown argument `identifier`",
    );
    assert_error_containing(
        "{ version @once(wrong: true) }",
        "unknown argument `wrong` on directive `@once`",
    );
}

#[test]
fn arguments_must_be_unique() {
    assert_error_containing(
        r#"{ human(id: "1", id: "2") { name } }"#,
        "duplicate argument `id`",
    );
}

#[test]
fn required_arguments_must_be_provided() {
    assert_error_containing("{ human { name } }", "requires the argument `id`");
    assert_valid(r#"{ human(id: "1") { name } }"#);
}

#[test]
fn skip_and_include_require_their_condition() {
    assert_error_containing(
        "{ version @skip }",
        "requires the argument `if`",
    );
    assert_valid("{ version @skip(if: true) }");
}

#[test]
fn directives_must_be_known() {
    assert_error_containing("{ version @mystery }", "unknown directive `@mystery`");
}

#[test]
fn directives_must_be_legal_at_their_location() {
    // `@once` is declared `on FIELD` only.
    assert_error_containing(
        "query Q @once { version }",
        "may not be applied at location QUERY",
    );
}

#[test]
fn non_repeatable_directives_apply_once_per_location() {
    assert_error_containing(
        "{ version @once @once }",
        "only once",
    );
    assert_valid("{ version @many @many }");
}

#[test]
fn same_response_key_requires_same_field() {
    assert_error_containing(
        "{ v: version v: hero { name } }",
        "cannot be merged",
    );
}

#[test]
fn same_response_key_requires_same_arguments() {
    assert_error_containing(
        r#"{ human(id: "1") { name } human(id: "2") { name } }"#,
        "differing arguments",
    );
    assert_valid(r#"{ human(id: "1") { name } human(id: "1") { id } }"#);
}

#[test]
fn aliases_resolve_merging_conflicts() {
    assert_valid(r#"{ first: human(id: "1") { name } second: human(id: "2") { name } }"#);
}
