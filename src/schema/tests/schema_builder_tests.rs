use crate::schema::build_schema;
use crate::schema::Schema;
use crate::schema::SchemaBuildError;
use crate::types::DeprecationState;
use crate::types::GraphQLType;
use crate::types::TypeRef;

type Result<T> = std::result::Result<T, SchemaBuildError>;

#[test]
fn builds_a_minimal_schema() -> Result<()> {
    let schema = build_schema("type Query { hello: String }")?;
    assert_eq!(schema.query_type().name, "Query");
    assert!(schema.mutation_type().is_none());
    assert!(schema.subscription_type().is_none());

    let hello = schema.query_type().fields.get("hello").unwrap();
    assert!(hello.type_ref.is_nullable());
    assert_eq!(hello.type_ref.innermost_name(), "String");
    Ok(())
}

#[test]
fn resolves_default_root_type_names() -> Result<()> {
    let schema = build_schema(
        "type Query { q: Int }
         type Mutation { m: Int }
         type Subscription { s: Int }",
    )?;
    assert_eq!(schema.mutation_type().unwrap().name, "Mutation");
    assert_eq!(schema.subscription_type().unwrap().name, "Subscription");
    Ok(())
}

#[test]
fn honors_explicit_schema_definition() -> Result<()> {
    let schema = build_schema(
        "\"\"\"My service.\"\"\"
        schema { query: TheRoot }
        type TheRoot { x: Int }",
    )?;
    assert_eq!(schema.query_type().name, "TheRoot");
    assert_eq!(schema.description(), Some("My service."));
    Ok(())
}

#[test]
fn builds_cyclic_type_references() -> Result<()> {
    // A <-> B cycles resolve because references are by name.
    let schema = build_schema(
        "type Query { a: A }
         type A { b: B }
         type B { a: A }",
    )?;
    let a = schema.type_by_name("A").unwrap();
    let b_field = a.field("b").unwrap();
    assert_eq!(
        b_field.type_ref.innermost_type(&schema).unwrap().name(),
        "B",
    );
    Ok(())
}

#[test]
fn merges_type_extensions() -> Result<()> {
    let schema = build_schema(
        "type Query { base: Int }
         enum Color { RED }
         extend type Query { extended: String }
         extend enum Color { GREEN }",
    )?;
    assert!(schema.query_type().fields.contains_key("base"));
    assert!(schema.query_type().fields.contains_key("extended"));

    let GraphQLType::Enum(color) = schema.type_by_name("Color").unwrap() else {
        panic!("expected enum");
    };
    assert_eq!(color.values.len(), 2);
    Ok(())
}

#[test]
fn reads_deprecation_annotations() -> Result<()> {
    let schema = build_schema(
        r#"type Query {
            old: Int @deprecated(reason: "use `new`")
            implicit: Int @deprecated
            new: Int
        }"#,
    )?;
    let fields = &schema.query_type().fields;
    assert_eq!(
        fields["old"].deprecation,
        DeprecationState::Deprecated(Some("use `new`".to_string())),
    );
    assert_eq!(
        fields["implicit"].deprecation,
        DeprecationState::Deprecated(Some("No longer supported".to_string())),
    );
    assert_eq!(fields["new"].deprecation, DeprecationState::NotDeprecated);
    Ok(())
}

#[test]
fn coerces_argument_defaults_to_values() -> Result<()> {
    let schema = build_schema(
        r#"type Query { greet(name: String = "world", count: Int = 2): String }"#,
    )?;
    let greet = schema.query_type().fields.get("greet").unwrap();
    assert_eq!(
        greet.arguments["name"].default_value,
        Some(crate::Value::String("world".to_string())),
    );
    assert_eq!(
        greet.arguments["count"].default_value,
        Some(crate::Value::Int(2)),
    );
    Ok(())
}

#[test]
fn registers_custom_scalars_by_name() -> Result<()> {
    let schema = Schema::builder()
        .load_sdl("type Query { when: DateTime } scalar DateTime")?
        .with_scalar("DateTime", crate::scalars::datetime_scalar())
        .build()?;
    assert!(matches!(
        schema.type_by_name("DateTime"),
        Some(GraphQLType::Scalar(_)),
    ));
    Ok(())
}

#[test]
fn unknown_scalars_fail_the_build() {
    let err = build_schema("type Query { x: Mystery } scalar Mystery").unwrap_err();
    assert!(matches!(err, SchemaBuildError::UnknownScalar { .. }), "{err}");
}

#[test]
fn missing_query_root_fails_the_build() {
    let err = build_schema("type NotQuery { x: Int }").unwrap_err();
    assert!(matches!(err, SchemaBuildError::NoQueryOperationTypeDefined));
}

#[test]
fn duplicate_type_definitions_are_rejected() {
    let err = build_schema("type Query { x: Int } type Query { y: Int }").unwrap_err();
    assert!(matches!(
        err,
        SchemaBuildError::DuplicateTypeDefinition { type_name, .. } if type_name == "Query",
    ));
}

#[test]
fn dunder_prefixed_names_are_rejected() {
    let err = build_schema("type __Private { x: Int } type Query { x: Int }").unwrap_err();
    assert!(matches!(
        err,
        SchemaBuildError::InvalidDunderPrefixedTypeName { .. },
    ));

    let err = build_schema("type Query { __x: Int }").unwrap_err();
    assert!(matches!(
        err,
        SchemaBuildError::InvalidDunderPrefixedFieldName { .. },
    ));
}

#[test]
fn builtin_directives_cannot_be_redefined() {
    let err = build_schema(
        "directive @skip(if: Boolean!) on FIELD
         type Query { x: Int }",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SchemaBuildError::RedefinitionOfBuiltinDirective { .. },
    ));
}

#[test]
fn shared_root_operation_types_are_rejected() {
    let err = build_schema(
        "schema { query: Root, mutation: Root }
         type Root { x: Int }",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SchemaBuildError::NonUniqueOperationTypes { .. },
    ));
}

#[test]
fn extension_of_undefined_type_is_rejected() {
    let err = build_schema(
        "type Query { x: Int }
         extend type Ghost { y: Int }",
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SchemaBuildError::ExtensionOfUndefinedType { type_name, .. } if type_name == "Ghost",
    ));
}

#[test]
fn mismatched_extension_kind_is_rejected() {
    let err = build_schema(
        "type Query { x: Int }
         enum Color { RED }
         extend type Color { y: Int }",
    )
    .unwrap_err();
    assert!(matches!(err, SchemaBuildError::InvalidExtensionType { .. }));
}

#[test]
fn attaches_resolver_targets_strictly() {
    let err = Schema::builder()
        .load_sdl("type Query { x: Int }")
        .unwrap()
        .with_resolver(
            "Query",
            "missing",
            |_ctx: crate::execution::ResolverContext<'_>| {
                Ok(crate::execution::Resolved::value(1))
            },
        )
        .build()
        .unwrap_err();
    assert!(matches!(err, SchemaBuildError::UnknownResolverTarget { .. }));
}

#[test]
fn custom_directives_are_registered() -> Result<()> {
    let schema = build_schema(
        "directive @tag(name: String!) repeatable on FIELD_DEFINITION
         type Query { x: Int }",
    )?;
    let tag = schema.directive_by_name("tag").unwrap();
    assert!(tag.repeatable);
    assert_eq!(tag.arguments.len(), 1);
    assert!(schema.directive_by_name("skip").is_some());
    assert!(schema.directive_by_name("include").is_some());
    assert!(schema.directive_by_name("deprecated").is_some());
    Ok(())
}

#[test]
fn resolver_name_mappings_apply() -> Result<()> {
    let schema = Schema::builder()
        .load_sdl("type Query { userName: String } input I { firstName: String }")?
        .with_resolver_name("Query", "userName", "user_name")
        .with_input_field_resolver_name("I", "firstName", "first_name")
        .build()?;
    assert_eq!(
        schema.query_type().fields["userName"].resolver_key(),
        "user_name",
    );
    let GraphQLType::InputObject(input) = schema.type_by_name("I").unwrap() else {
        panic!("expected input object");
    };
    assert_eq!(input.fields["firstName"].resolver_key(), "first_name");
    Ok(())
}

#[test]
fn injects_typename_and_introspection_types() -> Result<()> {
    let schema = build_schema("type Query { x: Int }")?;
    assert!(schema.query_type().fields.contains_key("__typename"));
    assert!(schema.query_type().fields.contains_key("__schema"));
    assert!(schema.query_type().fields.contains_key("__type"));
    assert!(schema.type_by_name("__Schema").is_some());
    assert!(schema.type_by_name("__Type").is_some());
    assert!(schema.type_by_name("__TypeKind").is_some());
    Ok(())
}

#[test]
fn type_ref_display_round_trips() -> Result<()> {
    let schema = build_schema("type Query { m: [[String!]]! }")?;
    let m = schema.query_type().fields.get("m").unwrap();
    assert_eq!(m.type_ref.to_string(), "[[String!]]!");
    assert!(matches!(&m.type_ref, TypeRef::List { nullable: false, .. }));
    Ok(())
}
