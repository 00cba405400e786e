use crate::execution::subscribe;
use crate::execution::EventStream;
use crate::execution::ExecuteOptions;
use crate::execution::ResolverContext;
use crate::schema::Schema;
use crate::Value;
use libgql_parser::parse_executable_document;
use serde_json::json;

fn ticker_schema(events: Vec<Value>) -> Schema {
    Schema::builder()
        .load_sdl(
            "type Query { noop: Int }
             type Subscription { ticks(label: String): Tick }
             type Tick { n: Int!, label: String }",
        )
        .unwrap()
        .with_subscription_resolver("Subscription", "ticks", {
            move |ctx: ResolverContext<'_>| {
                let label = match ctx.args.get("label") {
                    Some(Value::String(label)) => label.clone(),
                    _ => "tick".to_string(),
                };
                let stream: EventStream = Box::new(
                    events
                        .clone()
                        .into_iter()
                        .map(move |mut event| {
                            if let Value::Object(entries) = &mut event {
                                entries.insert(
                                    "label".to_string(),
                                    Value::String(label.clone()),
                                );
                            }
                            event
                        }),
                );
                Ok(stream)
            }
        })
        .build()
        .unwrap()
}

fn tick(n: i64) -> Value {
    Value::object([("n".to_string(), Value::Int(n))])
}

#[test]
fn each_event_drives_one_execution() {
    let schema = ticker_schema(vec![tick(1), tick(2), tick(3)]);
    let document =
        parse_executable_document(r#"subscription { ticks(label: "beat") { n label } }"#)
            .unwrap();

    let stream = subscribe(&schema, &document, ExecuteOptions::default())
        .unwrap_or_else(|response| panic!("subscribe failed: {response:?}"));

    let responses: Vec<serde_json::Value> = stream
        .map(|response| serde_json::to_value(&response).unwrap())
        .collect();

    assert_eq!(
        responses,
        vec![
            json!({ "data": { "ticks": { "n": 1, "label": "beat" } } }),
            json!({ "data": { "ticks": { "n": 2, "label": "beat" } } }),
            json!({ "data": { "ticks": { "n": 3, "label": "beat" } } }),
        ],
    );
}

#[test]
fn event_errors_null_the_event_payload() {
    // The second event violates `n: Int!`.
    let schema = ticker_schema(vec![tick(1), Value::object([])]);
    let document = parse_executable_document("subscription { ticks { n } }").unwrap();

    let stream = subscribe(&schema, &document, ExecuteOptions::default())
        .unwrap_or_else(|response| panic!("subscribe failed: {response:?}"));
    let responses: Vec<_> = stream.collect();

    assert!(responses[0].is_ok());
    assert_eq!(responses[1].data, Some(Value::Null));
    assert!(!responses[1].errors.is_empty());
}

#[test]
fn aliases_apply_to_subscription_responses() {
    let schema = ticker_schema(vec![tick(7)]);
    let document =
        parse_executable_document("subscription { beat: ticks { n } }").unwrap();

    let stream = subscribe(&schema, &document, ExecuteOptions::default())
        .unwrap_or_else(|response| panic!("subscribe failed: {response:?}"));
    let responses: Vec<serde_json::Value> = stream
        .map(|response| serde_json::to_value(&response).unwrap())
        .collect();
    assert_eq!(responses, vec![json!({ "data": { "beat": { "n": 7 } } })]);
}

#[test]
fn subscribe_rejects_non_subscription_operations() {
    let schema = ticker_schema(vec![]);
    let document = parse_executable_document("{ noop }").unwrap();
    let err = subscribe(&schema, &document, ExecuteOptions::default())
        .err()
        .expect("must fail");
    assert!(
        err.errors[0].message.contains("subscription operation"),
        "{}",
        err.errors[0].message,
    );
}

#[test]
fn subscribe_requires_a_registered_event_source() {
    let schema = Schema::builder()
        .load_sdl(
            "type Query { noop: Int }
             type Subscription { silent: Int }",
        )
        .unwrap()
        .build()
        .unwrap();
    let document = parse_executable_document("subscription { silent }").unwrap();
    let err = subscribe(&schema, &document, ExecuteOptions::default())
        .err()
        .expect("must fail");
    assert!(
        err.errors[0].message.contains("no subscription resolver"),
        "{}",
        err.errors[0].message,
    );
}

#[test]
fn execute_refuses_subscription_operations() {
    let schema = ticker_schema(vec![]);
    let document = parse_executable_document("subscription { ticks { n } }").unwrap();
    let response = crate::execution::execute(&schema, &document, ExecuteOptions::default());
    assert!(response.data.is_none());
    assert!(
        response.errors[0].message.contains("subscribe"),
        "{}",
        response.errors[0].message,
    );
}
