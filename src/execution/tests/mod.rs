mod coercion_tests;
mod executor_tests;
mod introspection_tests;
mod runtime_tests;
mod scenario_tests;
mod subscription_tests;

use crate::execution::execute;
use crate::execution::ExecuteOptions;
use crate::execution::Response;
use crate::schema::Schema;
use libgql_parser::parse_executable_document;

/// Executes `source` against `schema` with default options.
pub(crate) fn run(schema: &Schema, source: &str) -> Response {
    run_with(schema, source, ExecuteOptions::default())
}

pub(crate) fn run_with(schema: &Schema, source: &str, options: ExecuteOptions<'_>) -> Response {
    let document = parse_executable_document(source).expect("test document parses");
    execute(schema, &document, options)
}

/// Asserts a response's serialized form equals `expected`.
pub(crate) fn assert_response(response: &Response, expected: serde_json::Value) {
    let actual = serde_json::to_value(response).expect("response serializes");
    assert_eq!(actual, expected);
}
