use crate::coercion::coerce_variable_values;
use crate::execution::PathSegment;
use crate::schema::build_schema;
use crate::schema::Schema;
use crate::Value;
use indexmap::IndexMap;
use libgql_parser::ast;
use libgql_parser::parse_executable_document;

fn coercion_schema() -> Schema {
    build_schema(
        r#"
        enum Color { RED GREEN }
        input Point { x: Int!, y: Int! = 0 }
        type Query {
            f(
                n: Int,
                name: String,
                c: Color,
                p: Point,
                ns: [Int!],
                req: ID!
            ): Int
        }
        "#,
    )
    .expect("coercion schema builds")
}

fn operation(source: &str) -> ast::OperationDefinition {
    parse_executable_document(source)
        .expect("parses")
        .operations()
        .next()
        .expect("one operation")
        .clone()
}

fn coerce(
    schema: &Schema,
    source: &str,
    raw: Value,
) -> Result<IndexMap<String, Value>, Vec<crate::coercion::CoercionError>> {
    let operation = operation(source);
    coerce_variable_values(schema, &operation, Some(&raw))
}

#[test]
fn coerces_scalars_enums_and_lists() {
    let schema = coercion_schema();
    let coerced = coerce(
        &schema,
        "query Q($n: Int, $c: Color, $ns: [Int!]) { f(n: $n, c: $c, ns: $ns, req: 1) }",
        Value::object([
            ("n".to_string(), Value::Int(3)),
            ("c".to_string(), Value::String("RED".to_string())),
            ("ns".to_string(), Value::List(vec![Value::Int(1), Value::Int(2)])),
        ]),
    )
    .unwrap();

    assert_eq!(coerced["n"], Value::Int(3));
    assert_eq!(coerced["c"], Value::Enum("RED".to_string()));
    assert_eq!(coerced["ns"], Value::List(vec![Value::Int(1), Value::Int(2)]));
}

#[test]
fn single_values_auto_wrap_into_lists() {
    let schema = coercion_schema();
    let coerced = coerce(
        &schema,
        "query Q($ns: [Int!]) { f(ns: $ns, req: 1) }",
        Value::object([("ns".to_string(), Value::Int(7))]),
    )
    .unwrap();
    assert_eq!(coerced["ns"], Value::List(vec![Value::Int(7)]));
}

#[test]
fn input_objects_fill_defaults_and_require_fields() {
    let schema = coercion_schema();

    let coerced = coerce(
        &schema,
        "query Q($p: Point) { f(p: $p, req: 1) }",
        Value::object([(
            "p".to_string(),
            Value::object([("x".to_string(), Value::Int(5))]),
        )]),
    )
    .unwrap();
    assert_eq!(
        coerced["p"],
        Value::object([
            ("x".to_string(), Value::Int(5)),
            ("y".to_string(), Value::Int(0)),
        ]),
    );

    let errors = coerce(
        &schema,
        "query Q($p: Point) { f(p: $p, req: 1) }",
        Value::object([("p".to_string(), Value::object([]))]),
    )
    .unwrap_err();
    assert_eq!(
        errors[0].path,
        vec![
            PathSegment::Key("p".to_string()),
            PathSegment::Key("x".to_string()),
        ],
    );
}

#[test]
fn strings_do_not_coerce_to_int() {
    let schema = coercion_schema();
    let errors = coerce(
        &schema,
        "query Q($n: Int) { f(n: $n, req: 1) }",
        Value::object([("n".to_string(), Value::String("3".to_string()))]),
    )
    .unwrap_err();
    assert!(errors[0].message.contains("Int"), "{errors:?}");
}

#[test]
fn int_range_is_enforced() {
    let schema = coercion_schema();
    let errors = coerce(
        &schema,
        "query Q($n: Int) { f(n: $n, req: 1) }",
        Value::object([("n".to_string(), Value::Int(1 << 40))]),
    )
    .unwrap_err();
    assert!(errors[0].message.contains("32-bit"), "{errors:?}");
}

#[test]
fn missing_required_variables_are_errors() {
    let schema = coercion_schema();
    let errors = coerce(
        &schema,
        "query Q($r: ID!) { f(req: $r) }",
        Value::object([]),
    )
    .unwrap_err();
    assert!(errors[0].message.contains("was not provided"), "{errors:?}");
}

#[test]
fn absent_nullable_variables_stay_absent() {
    let schema = coercion_schema();
    let coerced = coerce(
        &schema,
        "query Q($n: Int) { f(n: $n, req: 1) }",
        Value::object([]),
    )
    .unwrap();
    assert!(!coerced.contains_key("n"));
}

#[test]
fn defaults_apply_when_variables_are_absent() {
    let schema = coercion_schema();
    let coerced = coerce(
        &schema,
        "query Q($n: Int = 12) { f(n: $n, req: 1) }",
        Value::object([]),
    )
    .unwrap();
    assert_eq!(coerced["n"], Value::Int(12));
}

#[test]
fn coercion_is_idempotent_on_coerced_values() {
    let schema = coercion_schema();
    let source =
        "query Q($n: Int, $c: Color, $p: Point) { f(n: $n, c: $c, p: $p, req: 1) }";
    let raw = Value::object([
        ("n".to_string(), Value::Int(3)),
        ("c".to_string(), Value::String("GREEN".to_string())),
        (
            "p".to_string(),
            Value::object([("x".to_string(), Value::Int(1))]),
        ),
    ]);

    let once = coerce(&schema, source, raw).unwrap();
    let twice = coerce(&schema, source, Value::Object(once.clone())).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn unknown_input_object_keys_are_errors() {
    let schema = coercion_schema();
    let errors = coerce(
        &schema,
        "query Q($p: Point) { f(p: $p, req: 1) }",
        Value::object([(
            "p".to_string(),
            Value::object([
                ("x".to_string(), Value::Int(1)),
                ("z".to_string(), Value::Int(9)),
            ]),
        )]),
    )
    .unwrap_err();
    assert!(errors[0].message.contains("unknown field `z`"), "{errors:?}");
}
