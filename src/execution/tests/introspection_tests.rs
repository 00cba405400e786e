use crate::execution::tests::run;
use crate::schema::build_schema;
use crate::schema::Schema;
use serde_json::json;

fn introspectable_schema() -> Schema {
    build_schema(
        r#"
        "The entry point."
        type Query {
            hero(limit: Int = 5): Character
            pet: Pet
        }

        interface Character { id: ID! }

        type Human implements Character {
            id: ID!
            height: Float @deprecated(reason: "metric wars")
        }

        type Cat { meows: Boolean }
        type Dog { barks: Boolean }
        union Pet = Cat | Dog

        enum Mood { HAPPY GRUMPY @deprecated }
        "#,
    )
    .expect("schema builds")
}

#[test]
fn typename_resolves_on_every_object() {
    let schema = introspectable_schema();
    let response = run(&schema, "{ __typename }");
    let serialized = serde_json::to_value(&response).unwrap();
    assert_eq!(serialized["data"]["__typename"], json!("Query"));
}

#[test]
fn schema_field_exposes_roots_and_types() {
    let schema = introspectable_schema();
    let response = run(
        &schema,
        "{ __schema {
            description
            queryType { name kind }
            mutationType { name }
            types { name }
        } }",
    );
    assert!(response.is_ok(), "{:?}", response.errors);
    let serialized = serde_json::to_value(&response).unwrap();
    let schema_data = &serialized["data"]["__schema"];

    assert_eq!(schema_data["queryType"], json!({ "name": "Query", "kind": "OBJECT" }));
    assert_eq!(schema_data["mutationType"], json!(null));

    let type_names: Vec<&str> = schema_data["types"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert!(type_names.contains(&"Human"));
    assert!(type_names.contains(&"Int"));
    assert!(type_names.contains(&"__Schema"));
}

#[test]
fn type_field_looks_up_named_types() {
    let schema = introspectable_schema();
    let response = run(
        &schema,
        r#"{ __type(name: "Human") {
            kind
            name
            interfaces { name }
            fields { name }
        } }"#,
    );
    assert!(response.is_ok(), "{:?}", response.errors);
    let serialized = serde_json::to_value(&response).unwrap();
    let human = &serialized["data"]["__type"];
    assert_eq!(human["kind"], json!("OBJECT"));
    assert_eq!(human["name"], json!("Human"));
    assert_eq!(human["interfaces"], json!([{ "name": "Character" }]));
    // Deprecated fields are hidden by default; `__typename` never shows.
    assert_eq!(human["fields"], json!([{ "name": "id" }]));
}

#[test]
fn unknown_type_lookup_is_null() {
    let schema = introspectable_schema();
    let response = run(&schema, r#"{ __type(name: "Ghost") { name } }"#);
    let serialized = serde_json::to_value(&response).unwrap();
    assert_eq!(serialized["data"]["__type"], json!(null));
}

#[test]
fn field_types_expand_wrapping_chains() {
    let schema = introspectable_schema();
    let response = run(
        &schema,
        r#"{ __type(name: "Character") {
            fields { name type { kind ofType { kind name } } }
        } }"#,
    );
    let serialized = serde_json::to_value(&response).unwrap();
    // `id: ID!` introspects as NON_NULL wrapping ID.
    assert_eq!(
        serialized["data"]["__type"]["fields"],
        json!([{
            "name": "id",
            "type": { "kind": "NON_NULL", "ofType": { "kind": "SCALAR", "name": "ID" } },
        }]),
    );
}

#[test]
fn deprecated_members_are_opt_in() {
    let schema = introspectable_schema();
    let response = run(
        &schema,
        r#"{
            hidden: __type(name: "Mood") { enumValues { name } }
            shown: __type(name: "Mood") {
                enumValues(includeDeprecated: true) { name isDeprecated deprecationReason }
            }
        }"#,
    );
    let serialized = serde_json::to_value(&response).unwrap();
    assert_eq!(
        serialized["data"]["hidden"]["enumValues"],
        json!([{ "name": "HAPPY" }]),
    );
    assert_eq!(
        serialized["data"]["shown"]["enumValues"],
        json!([
            { "name": "HAPPY", "isDeprecated": false, "deprecationReason": null },
            {
                "name": "GRUMPY",
                "isDeprecated": true,
                "deprecationReason": "No longer supported",
            },
        ]),
    );
}

#[test]
fn unions_report_possible_types() {
    let schema = introspectable_schema();
    let response = run(
        &schema,
        r#"{ __type(name: "Pet") { kind possibleTypes { name } } }"#,
    );
    let serialized = serde_json::to_value(&response).unwrap();
    assert_eq!(serialized["data"]["__type"]["kind"], json!("UNION"));
    assert_eq!(
        serialized["data"]["__type"]["possibleTypes"],
        json!([{ "name": "Cat" }, { "name": "Dog" }]),
    );
}

#[test]
fn argument_defaults_print_as_literals() {
    let schema = introspectable_schema();
    let response = run(
        &schema,
        r#"{ __type(name: "Query") {
            fields { name args { name defaultValue } }
        } }"#,
    );
    let serialized = serde_json::to_value(&response).unwrap();
    let fields = serialized["data"]["__type"]["fields"].as_array().unwrap();
    let hero = fields.iter().find(|f| f["name"] == json!("hero")).unwrap();
    assert_eq!(
        hero["args"],
        json!([{ "name": "limit", "defaultValue": "5" }]),
    );
}

#[test]
fn directives_are_listed_with_locations() {
    let schema = introspectable_schema();
    let response = run(
        &schema,
        "{ __schema { directives { name isRepeatable locations } } }",
    );
    let serialized = serde_json::to_value(&response).unwrap();
    let directives = serialized["data"]["__schema"]["directives"]
        .as_array()
        .unwrap();
    let skip = directives
        .iter()
        .find(|d| d["name"] == json!("skip"))
        .unwrap();
    assert_eq!(skip["isRepeatable"], json!(false));
    assert!(skip["locations"]
        .as_array()
        .unwrap()
        .contains(&json!("FIELD")));
}

#[test]
fn introspection_queries_validate() {
    // The injected meta fields and types must be visible to validation.
    let schema = introspectable_schema();
    let document = libgql_parser::parse_executable_document(
        "{ __schema { types { name fields { name type { name } } } } }",
    )
    .unwrap();
    let errors = crate::validation::validate(&schema, &document);
    assert!(errors.is_empty(), "{errors:?}");
}
