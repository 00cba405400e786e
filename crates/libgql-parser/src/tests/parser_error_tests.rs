use crate::parse_executable_document;
use crate::parse_schema_document;
use crate::ParseErrorKind;

#[test]
fn empty_document_is_an_error() {
    let err = parse_executable_document("   # just a comment\n").unwrap_err();
    assert!(matches!(err.kind(), ParseErrorKind::UnexpectedEof { .. }));
}

#[test]
fn reports_one_based_locations() {
    let err = parse_executable_document("{\n  field(:\n}").unwrap_err();
    // The stray `:` sits on line 2 (1-based).
    assert!(err.format_oneline().starts_with("2:"), "{}", err.format_oneline());
}

#[test]
fn lexer_errors_surface_as_parse_errors() {
    let err = parse_executable_document("{ f(x: 0xF1) }").unwrap_err();
    assert!(matches!(err.kind(), ParseErrorKind::LexerError));
    assert!(err.message().contains("invalid number"), "{err}");
}

#[test]
fn unterminated_selection_set() {
    let err = parse_executable_document("{ f ").unwrap_err();
    assert!(matches!(err.kind(), ParseErrorKind::UnexpectedEof { .. }));
}

#[test]
fn empty_selection_set_is_an_error() {
    let err = parse_executable_document("{ }").unwrap_err();
    assert!(err.message().contains("selection"), "{err}");
}

#[test]
fn variables_rejected_in_default_values() {
    let err = parse_executable_document("query Q($a: Int = $b) { f }").unwrap_err();
    assert!(err.message().contains("default values"), "{err}");
}

#[test]
fn variables_rejected_in_schema_directive_arguments() {
    let err = parse_schema_document("type T @dir(x: $v) { f: Int }").unwrap_err();
    assert!(err.message().contains("schema directive arguments"), "{err}");
}

#[test]
fn fragment_named_on_is_rejected() {
    let err = parse_executable_document("fragment on on User { id }").unwrap_err();
    assert!(err.message().contains("`on`"), "{err}");
}

#[test]
fn unknown_directive_location_is_rejected() {
    let err = parse_schema_document("directive @d on NOT_A_LOCATION").unwrap_err();
    assert!(err.message().contains("directive location"), "{err}");
}

#[test]
fn deep_nesting_hits_the_recursion_limit() {
    let mut source = String::from("{ f(x: ");
    for _ in 0..200 {
        source.push('[');
    }
    let err = parse_executable_document(&source).unwrap_err();
    assert!(matches!(
        err.kind(),
        ParseErrorKind::RecursionLimitExceeded,
    ));
}

#[test]
fn detailed_formatting_includes_a_caret_line() {
    let err = parse_executable_document("{ f(x ) }").unwrap_err();
    let detailed = err.format_detailed("{ f(x ) }");
    assert!(detailed.contains("^"), "{detailed}");
    assert!(detailed.contains("--> 1:"), "{detailed}");
}
