//! End-to-end scenarios covering the executor contract: defaults, null
//! propagation, skip/include, mutation ordering, coercion aborts, and
//! repeatable directive introspection from resolvers.

use crate::execution::tests::assert_response;
use crate::execution::tests::run;
use crate::execution::tests::run_with;
use crate::execution::ExecuteOptions;
use crate::execution::Resolved;
use crate::execution::ResolverContext;
use crate::schema::Schema;
use crate::Value;
use serde_json::json;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

/// A resolver receives coerced arguments, including declared defaults.
#[test]
fn hello_with_argument_defaults() {
    let schema = Schema::builder()
        .load_sdl(r#"type Query { hello(value: String = "world"): String! }"#)
        .unwrap()
        .with_resolver("Query", "hello", |ctx: ResolverContext<'_>| {
            let Some(Value::String(value)) = ctx.args.get("value") else {
                return Err("missing argument".into());
            };
            Ok(Resolved::value(format!("Hello {value}!")))
        })
        .build()
        .unwrap();

    let response = run(&schema, r#"{ hello(value: "Foo") }"#);
    assert_response(&response, json!({ "data": { "hello": "Hello Foo!" } }));

    let with_default = run(&schema, "{ hello }");
    assert_response(&with_default, json!({ "data": { "hello": "Hello world!" } }));
}

/// A null at a non-null position bubbles to the nearest nullable
/// ancestor; with none, `data` itself becomes null.
#[test]
fn null_propagation_reaches_the_root() {
    let schema = Schema::builder()
        .load_sdl("type Query { a: A! } type A { b: String! }")
        .unwrap()
        .with_resolver("Query", "a", |_ctx: ResolverContext<'_>| {
            // An empty object: `b` will default-resolve to null.
            Ok(Resolved::value(Value::object([])))
        })
        .build()
        .unwrap();

    let response = run(&schema, "{ a { b } }");
    assert_eq!(response.data, Some(Value::Null));
    assert_eq!(response.errors.len(), 1);

    let error = &response.errors[0];
    assert!(error.message.contains("non-null"), "{}", error.message);
    assert!(error.message.contains("A.b"), "{}", error.message);
    let serialized = serde_json::to_value(&response.errors[0]).unwrap();
    assert_eq!(serialized["path"], json!(["a", "b"]));
}

/// An intermediate nullable position absorbs the null.
#[test]
fn null_propagation_stops_at_nullable_ancestors() {
    let schema = Schema::builder()
        .load_sdl("type Query { a: A } type A { b: String! }")
        .unwrap()
        .with_resolver("Query", "a", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(Value::object([])))
        })
        .build()
        .unwrap();

    let response = run(&schema, "{ a { b } }");
    assert_eq!(response.data, Some(Value::object([("a".to_string(), Value::Null)])));
    assert_eq!(response.errors.len(), 1);
}

/// `@skip` removes the field from the response entirely.
#[test]
fn skip_directive_omits_the_response_key() {
    let schema = Schema::builder()
        .load_sdl("type Query { x: Int, y: Int }")
        .unwrap()
        .with_resolver("Query", "x", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(1))
        })
        .with_resolver("Query", "y", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(2))
        })
        .build()
        .unwrap();

    let response = run_with(
        &schema,
        "query Q($s: Boolean!) { x @skip(if: $s) y }",
        ExecuteOptions {
            variables: Some(Value::object([("s".to_string(), Value::Bool(true))])),
            ..Default::default()
        },
    );
    assert_response(&response, json!({ "data": { "y": 2 } }));
}

/// Mutation fields run strictly serially in document order.
#[test]
fn mutation_fields_run_in_document_order() {
    let counter = Arc::new(AtomicI64::new(0));
    let schema = Schema::builder()
        .load_sdl("type Mutation { inc: Int } type Query { noop: Int }")
        .unwrap()
        .with_resolver("Mutation", "inc", {
            let counter = counter.clone();
            move |_ctx: ResolverContext<'_>| {
                Ok(Resolved::value(counter.fetch_add(1, Ordering::SeqCst) + 1))
            }
        })
        .build()
        .unwrap();

    let response = run(&schema, "mutation { a: inc b: inc }");
    assert_response(&response, json!({ "data": { "a": 1, "b": 2 } }));
}

/// A variable coercion error aborts the operation before execution.
#[test]
fn variable_coercion_errors_abort_before_execution() {
    let schema = Schema::builder()
        .load_sdl("input I { n: Int! } type Query { f(i: I!): Int }")
        .unwrap()
        .with_resolver("Query", "f", |_ctx: ResolverContext<'_>| {
            panic!("resolver must not run");
        })
        .build()
        .unwrap();

    let response = run_with(
        &schema,
        "query Q($i: I!) { f(i: $i) }",
        ExecuteOptions {
            variables: Some(Value::object([(
                "i".to_string(),
                Value::object([("n".to_string(), Value::String("3".to_string()))]),
            )])),
            ..Default::default()
        },
    );

    // No data key at all: execution never started.
    assert!(response.data.is_none());
    assert_eq!(response.errors.len(), 1);
    let serialized = serde_json::to_value(&response.errors[0]).unwrap();
    assert_eq!(serialized["path"], json!(["i", "n"]));
}

/// Repeatable directive applications surface through `ResolveInfo` in
/// source order.
#[test]
fn resolve_info_exposes_repeatable_directive_arguments() {
    let schema = Schema::builder()
        .load_sdl(
            r#"
            directive @tag(name: String!) repeatable on FIELD_DEFINITION
            type Query {
                tags: [String!] @tag(name: "a") @tag(name: "b")
            }
            "#,
        )
        .unwrap()
        .with_resolver("Query", "tags", |ctx: ResolverContext<'_>| {
            let applications = ctx
                .info
                .all_directive_arguments("tag")
                .map_err(|err| err.to_string())?;
            let names: Vec<Value> = applications
                .iter()
                .map(|args| args.get("name").cloned().unwrap_or(Value::Null))
                .collect();
            Ok(Resolved::value(Value::List(names)))
        })
        .build()
        .unwrap();

    let response = run(&schema, "{ tags }");
    assert_response(&response, json!({ "data": { "tags": ["a", "b"] } }));
}

/// Asking `ResolveInfo` about a directive the schema does not define is a
/// caller error, surfaced as a field error.
#[test]
fn unknown_directive_lookup_raises() {
    let schema = Schema::builder()
        .load_sdl("type Query { x: Int }")
        .unwrap()
        .with_resolver("Query", "x", |ctx: ResolverContext<'_>| {
            ctx.info
                .directive_arguments("mystery")
                .map_err(|err| err.to_string())?;
            Ok(Resolved::value(1))
        })
        .build()
        .unwrap();

    let response = run(&schema, "{ x }");
    assert_eq!(response.errors.len(), 1);
    assert!(
        response.errors[0].message.contains("@mystery"),
        "{}",
        response.errors[0].message,
    );
}
