use crate::execution::tests::assert_response;
use crate::execution::tests::run;
use crate::execution::tests::run_with;
use crate::execution::ExecuteOptions;
use crate::execution::Resolved;
use crate::execution::ResolverContext;
use crate::schema::Schema;
use crate::Value;
use serde_json::json;

fn library_schema() -> Schema {
    Schema::builder()
        .load_sdl(
            r#"
            type Query {
                book: Book
                books: [Book!]
                searchable: Searchable
                node: Node
            }

            type Book implements Node {
                id: ID!
                title: String!
                pages: Int
            }

            type Author implements Node {
                id: ID!
                name: String!
            }

            interface Node { id: ID! }
            union Searchable = Book | Author
            "#,
        )
        .unwrap()
        .with_resolver("Query", "book", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(book_value("1", "Dune", 412)))
        })
        .with_resolver("Query", "books", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(Value::List(vec![
                book_value("1", "Dune", 412),
                book_value("2", "Solaris", 204),
            ])))
        })
        .with_resolver("Query", "searchable", |_ctx: ResolverContext<'_>| {
            // Concrete type via the `__typename` key on the value.
            let mut value = book_value("9", "Hyperion", 482);
            if let Value::Object(entries) = &mut value {
                entries.insert(
                    "__typename".to_string(),
                    Value::String("Book".to_string()),
                );
            }
            Ok(Resolved::value(value))
        })
        .with_resolver("Query", "node", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(book_value("3", "Blindsight", 384)))
        })
        .with_type_resolver("Node", |_value: &Value, _schema: &Schema| {
            Some("Book".to_string())
        })
        .build()
        .unwrap()
}

fn book_value(id: &str, title: &str, pages: i64) -> Value {
    Value::object([
        ("id".to_string(), Value::String(id.to_string())),
        ("title".to_string(), Value::String(title.to_string())),
        ("pages".to_string(), Value::Int(pages)),
    ])
}

#[test]
fn default_resolver_reads_object_keys() {
    let response = run(&library_schema(), "{ book { id title pages } }");
    assert_response(
        &response,
        json!({ "data": { "book": { "id": "1", "title": "Dune", "pages": 412 } } }),
    );
}

#[test]
fn missing_keys_default_to_null() {
    let schema = library_schema();
    let response = run(&schema, "{ book { pages } books { pages } }");
    assert!(response.errors.is_empty());
    // `pages` is nullable; a book without the key would yield null.
    let response = run(&schema, "{ book { title } }");
    assert!(response.is_ok());
}

#[test]
fn aliases_rename_response_keys_in_selection_order() {
    let response = run(
        &library_schema(),
        "{ second: book { t: title } first: book { id } }",
    );
    let data = serde_json::to_value(&response).unwrap();
    assert_eq!(
        data,
        json!({ "data": {
            "second": { "t": "Dune" },
            "first": { "id": "1" },
        }}),
    );
    // Response keys come out in first-occurrence order.
    let keys: Vec<&String> = match &response.data {
        Some(Value::Object(entries)) => entries.keys().collect(),
        other => panic!("expected object data, got {other:?}"),
    };
    assert_eq!(keys, ["second", "first"]);
}

#[test]
fn fragments_merge_into_their_parent_selection() {
    let response = run(
        &library_schema(),
        "query Q { book { ...Meta id } }
         fragment Meta on Book { title pages }",
    );
    assert_response(
        &response,
        json!({ "data": { "book": {
            "title": "Dune", "pages": 412, "id": "1",
        }}}),
    );
}

#[test]
fn duplicate_response_keys_merge_subselections() {
    let response = run(
        &library_schema(),
        "{ book { id } book { title } }",
    );
    assert_response(
        &response,
        json!({ "data": { "book": { "id": "1", "title": "Dune" } } }),
    );
}

#[test]
fn lists_complete_element_wise() {
    let response = run(&library_schema(), "{ books { title } }");
    assert_response(
        &response,
        json!({ "data": { "books": [
            { "title": "Dune" },
            { "title": "Solaris" },
        ]}}),
    );
}

#[test]
fn union_resolution_uses_typename_key() {
    let response = run(
        &library_schema(),
        "{ searchable { __typename ... on Book { title } ... on Author { name } } }",
    );
    assert_response(
        &response,
        json!({ "data": { "searchable": {
            "__typename": "Book", "title": "Hyperion",
        }}}),
    );
}

#[test]
fn interface_resolution_uses_resolve_type_callback() {
    let response = run(
        &library_schema(),
        "{ node { id ... on Book { title } } }",
    );
    assert_response(
        &response,
        json!({ "data": { "node": { "id": "3", "title": "Blindsight" } } }),
    );
}

#[test]
fn unidentifiable_abstract_values_are_field_errors() {
    // No resolve_type callback and no `__typename` key: the concrete type
    // cannot be determined, even though only one possible type exists.
    let schema = Schema::builder()
        .load_sdl(
            "type Query { c: Character }
             interface Character { id: ID! }
             type OnlyOne implements Character { id: ID! }",
        )
        .unwrap()
        .with_resolver("Query", "c", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(Value::object([(
                "id".to_string(),
                Value::String("1".to_string()),
            )])))
        })
        .build()
        .unwrap();

    let response = run(&schema, "{ c { id } }");
    let serialized = serde_json::to_value(&response).unwrap();
    assert_eq!(serialized["data"], json!({ "c": null }));
    assert!(
        response.errors[0]
            .message
            .contains("could not resolve the concrete type"),
        "{}",
        response.errors[0].message,
    );
}

#[test]
fn resolver_errors_carry_paths_and_locations() {
    let schema = Schema::builder()
        .load_sdl("type Query { boom: Int, fine: Int }")
        .unwrap()
        .with_resolver("Query", "boom", |_ctx: ResolverContext<'_>| {
            Err("kaboom".into())
        })
        .with_resolver("Query", "fine", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(7))
        })
        .build()
        .unwrap();

    let response = run(&schema, "{\n  boom\n  fine\n}");
    let serialized = serde_json::to_value(&response).unwrap();
    assert_eq!(serialized["data"], json!({ "boom": null, "fine": 7 }));
    assert_eq!(serialized["errors"][0]["message"], json!("kaboom"));
    assert_eq!(serialized["errors"][0]["path"], json!(["boom"]));
    assert_eq!(
        serialized["errors"][0]["locations"],
        json!([{ "line": 2, "column": 3 }]),
    );
}

#[test]
fn failing_non_null_list_elements_invalidate_the_list() {
    let schema = Schema::builder()
        .load_sdl("type Query { strict: [Int!], loose: [Int] }")
        .unwrap()
        .with_resolver("Query", "strict", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(Value::List(vec![
                Value::Int(1),
                Value::Null,
                Value::Int(3),
            ])))
        })
        .with_resolver("Query", "loose", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(Value::List(vec![
                Value::Int(1),
                Value::Null,
            ])))
        })
        .build()
        .unwrap();

    let response = run(&schema, "{ strict loose }");
    let serialized = serde_json::to_value(&response).unwrap();
    // `strict`'s element failure nulls the (nullable) list; `loose` keeps
    // its null element.
    assert_eq!(
        serialized["data"],
        json!({ "strict": null, "loose": [1, null] }),
    );
    assert_eq!(serialized["errors"][0]["path"], json!(["strict", 1]));
}

#[test]
fn deferred_resolver_values_are_awaited() {
    let schema = Schema::builder()
        .load_sdl("type Query { later: Int }")
        .unwrap()
        .with_resolver("Query", "later", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::deferred(|| Ok(Value::Int(42))))
        })
        .build()
        .unwrap();

    let response = run(&schema, "{ later }");
    assert_response(&response, json!({ "data": { "later": 42 } }));
}

#[test]
fn scalar_serialization_failures_are_field_errors() {
    let schema = Schema::builder()
        .load_sdl("type Query { n: Int }")
        .unwrap()
        .with_resolver("Query", "n", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value("not a number"))
        })
        .build()
        .unwrap();

    let response = run(&schema, "{ n }");
    let serialized = serde_json::to_value(&response).unwrap();
    assert_eq!(serialized["data"], json!({ "n": null }));
    assert!(
        response.errors[0].message.contains("serialize"),
        "{}",
        response.errors[0].message,
    );
}

#[test]
fn operation_selection_requires_a_name_for_multi_operation_documents() {
    let schema = library_schema();
    let response = run(&schema, "query A { book { id } } query B { book { title } }");
    assert!(response.data.is_none());
    assert!(
        response.errors[0].message.contains("operation name"),
        "{}",
        response.errors[0].message,
    );

    let response = run_with(
        &schema,
        "query A { book { id } } query B { book { title } }",
        ExecuteOptions {
            operation_name: Some("B"),
            ..Default::default()
        },
    );
    assert_response(&response, json!({ "data": { "book": { "title": "Dune" } } }));
}

#[test]
fn root_value_feeds_root_level_default_resolvers() {
    let schema = Schema::builder()
        .load_sdl("type Query { answer: Int }")
        .unwrap()
        .build()
        .unwrap();

    let response = run_with(
        &schema,
        "{ answer }",
        ExecuteOptions {
            root: Value::object([("answer".to_string(), Value::Int(42))]),
            ..Default::default()
        },
    );
    assert_response(&response, json!({ "data": { "answer": 42 } }));
}

#[test]
fn context_value_reaches_resolvers() {
    let schema = Schema::builder()
        .load_sdl("type Query { whoami: String }")
        .unwrap()
        .with_resolver("Query", "whoami", |ctx: ResolverContext<'_>| {
            Ok(Resolved::Value(
                ctx.context.get("user").cloned().unwrap_or(Value::Null),
            ))
        })
        .build()
        .unwrap();

    let response = run_with(
        &schema,
        "{ whoami }",
        ExecuteOptions {
            context: Value::object([(
                "user".to_string(),
                Value::String("ada".to_string()),
            )]),
            ..Default::default()
        },
    );
    assert_response(&response, json!({ "data": { "whoami": "ada" } }));
}

#[test]
fn enum_values_serialize_as_their_names() {
    let schema = Schema::builder()
        .load_sdl("enum Mood { HAPPY GRUMPY } type Query { mood: Mood }")
        .unwrap()
        .with_resolver("Query", "mood", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(Value::Enum("HAPPY".to_string())))
        })
        .build()
        .unwrap();

    let response = run(&schema, "{ mood }");
    assert_response(&response, json!({ "data": { "mood": "HAPPY" } }));
}

#[test]
fn unknown_enum_results_are_field_errors() {
    let schema = Schema::builder()
        .load_sdl("enum Mood { HAPPY } type Query { mood: Mood }")
        .unwrap()
        .with_resolver("Query", "mood", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(Value::Enum("FURIOUS".to_string())))
        })
        .build()
        .unwrap();

    let response = run(&schema, "{ mood }");
    assert_eq!(response.data, Some(Value::object([("mood".to_string(), Value::Null)])));
    assert!(response.errors[0].message.contains("Mood"));
}
