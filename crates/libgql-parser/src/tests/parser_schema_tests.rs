use crate::ast;
use crate::parse_schema_document;
use crate::ParseError;

type Result<T> = std::result::Result<T, ParseError>;

fn single_type_def(source: &str) -> Result<ast::TypeDefinition> {
    let doc = parse_schema_document(source)?;
    for def in doc.definitions {
        if let ast::Definition::Type(type_def) = def {
            return Ok(type_def);
        }
    }
    panic!("no type definition found");
}

#[test]
fn parses_schema_definition_with_description() -> Result<()> {
    let doc = parse_schema_document(
        "\"\"\"The root schema.\"\"\"
        schema {
            query: QueryRoot
            mutation: MutationRoot
        }",
    )?;
    let ast::Definition::Schema(schema_def) = &doc.definitions[0] else {
        panic!("expected schema definition");
    };
    assert_eq!(
        schema_def.description.as_ref().unwrap().value,
        "The root schema.",
    );
    assert_eq!(schema_def.operation_types.len(), 2);
    assert_eq!(schema_def.operation_types[0].operation, ast::OperationKind::Query);
    assert_eq!(schema_def.operation_types[0].named_type.as_str(), "QueryRoot");
    Ok(())
}

#[test]
fn parses_object_type_with_fields_and_arguments() -> Result<()> {
    let def = single_type_def(
        r#"type Query {
            "A friendly greeting."
            hello(value: String = "world"): String!
            numbers: [Int!]
        }"#,
    )?;
    let ast::TypeDefinition::Object(object) = def else {
        panic!("expected object type");
    };
    assert_eq!(object.name.as_str(), "Query");
    assert_eq!(object.fields.len(), 2);

    let hello = &object.fields[0];
    assert_eq!(hello.description.as_ref().unwrap().value, "A friendly greeting.");
    assert_eq!(hello.arguments.len(), 1);
    assert_eq!(hello.arguments[0].name.as_str(), "value");
    assert!(matches!(
        hello.arguments[0].default_value,
        Some(ast::Value::String(_)),
    ));
    assert!(!hello.field_type.is_nullable());
    Ok(())
}

#[test]
fn parses_implements_with_ampersands() -> Result<()> {
    let def = single_type_def("type A implements & B & C { x: Int }")?;
    let ast::TypeDefinition::Object(object) = def else {
        panic!("expected object type");
    };
    let names: Vec<_> = object.interfaces.iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["B", "C"]);
    Ok(())
}

#[test]
fn parses_interface_implementing_interface() -> Result<()> {
    // graphql-spec PR 373.
    let def = single_type_def("interface Image implements Resource { url: String }")?;
    let ast::TypeDefinition::Interface(interface) = def else {
        panic!("expected interface type");
    };
    assert_eq!(interface.interfaces[0].as_str(), "Resource");
    Ok(())
}

#[test]
fn parses_union_enum_input_and_scalar() -> Result<()> {
    let doc = parse_schema_document(
        r#"
        union Pet = | Cat | Dog

        enum Color { RED GREEN "deep blue" BLUE @deprecated }

        input Point { x: Int!, y: Int! = 0 }

        scalar DateTime @specifiedBy(url: "https://example.com")
        "#,
    )?;

    let mut type_defs = doc.definitions.iter().filter_map(|def| match def {
        ast::Definition::Type(t) => Some(t),
        _ => None,
    });

    let ast::TypeDefinition::Union(union_def) = type_defs.next().unwrap() else {
        panic!("expected union");
    };
    let members: Vec<_> = union_def.members.iter().map(|m| m.as_str()).collect();
    assert_eq!(members, vec!["Cat", "Dog"]);

    let ast::TypeDefinition::Enum(enum_def) = type_defs.next().unwrap() else {
        panic!("expected enum");
    };
    assert_eq!(enum_def.values.len(), 3);
    assert_eq!(
        enum_def.values[2].description.as_ref().unwrap().value,
        "deep blue",
    );
    assert_eq!(enum_def.values[2].directives[0].name.as_str(), "deprecated");

    let ast::TypeDefinition::InputObject(input_def) = type_defs.next().unwrap() else {
        panic!("expected input object");
    };
    assert_eq!(input_def.fields.len(), 2);
    assert!(input_def.fields[1].default_value.is_some());

    let ast::TypeDefinition::Scalar(scalar_def) = type_defs.next().unwrap() else {
        panic!("expected scalar");
    };
    assert_eq!(scalar_def.directives[0].name.as_str(), "specifiedBy");
    Ok(())
}

#[test]
fn parses_directive_definition_with_repeatable() -> Result<()> {
    // graphql-spec PR 472.
    let doc = parse_schema_document(
        "directive @tag(name: String!) repeatable on FIELD_DEFINITION | OBJECT",
    )?;
    let ast::Definition::Directive(directive) = &doc.definitions[0] else {
        panic!("expected directive definition");
    };
    assert_eq!(directive.name.as_str(), "tag");
    assert!(directive.repeatable);
    assert_eq!(
        directive.locations,
        vec![
            ast::DirectiveLocation::FieldDefinition,
            ast::DirectiveLocation::Object,
        ],
    );
    Ok(())
}

#[test]
fn parses_type_extensions() -> Result<()> {
    let doc = parse_schema_document(
        "extend type Query { extra: Int }
         extend enum Color { MAUVE }
         extend schema { mutation: Mutation }
         extend union Pet = Hamster",
    )?;
    assert!(matches!(
        &doc.definitions[0],
        ast::Definition::TypeExtension(ast::TypeExtension::Object(obj))
            if obj.name.as_str() == "Query" && obj.fields.len() == 1,
    ));
    assert!(matches!(
        &doc.definitions[1],
        ast::Definition::TypeExtension(ast::TypeExtension::Enum(e))
            if e.values.len() == 1,
    ));
    assert!(matches!(
        &doc.definitions[2],
        ast::Definition::SchemaExtension(ext) if ext.operation_types.len() == 1,
    ));
    assert!(matches!(
        &doc.definitions[3],
        ast::Definition::TypeExtension(ast::TypeExtension::Union(u))
            if u.members[0].as_str() == "Hamster",
    ));
    Ok(())
}

#[test]
fn parses_block_string_descriptions() -> Result<()> {
    let def = single_type_def(
        "\"\"\"\n    Multi-line\n    description.\n    \"\"\"\ntype T { x: Int }",
    )?;
    assert_eq!(
        def.name().as_str(),
        "T",
    );
    let ast::TypeDefinition::Object(object) = def else {
        panic!("expected object");
    };
    assert_eq!(
        object.description.as_ref().unwrap().value,
        "Multi-line\ndescription.",
    );
    Ok(())
}

#[test]
fn rejects_operations_in_schema_documents() {
    let err = parse_schema_document("query Q { x }").unwrap_err();
    assert!(err.message().contains("schema document"), "{err}");
}

#[test]
fn rejects_type_definitions_in_executable_documents() {
    let err = crate::parse_executable_document("type Query { x: Int }").unwrap_err();
    assert!(err.message().contains("executable document"), "{err}");
}

#[test]
fn mixed_documents_require_opt_in() -> Result<()> {
    let source = "type Query { x: Int } query Q { x }";

    assert!(crate::parse_document(
        source,
        crate::ParseOptions {
            allow_type_system: false,
        },
    )
    .is_err());

    let doc = crate::parse_document(
        source,
        crate::ParseOptions {
            allow_type_system: true,
        },
    )?;
    assert_eq!(doc.definitions.len(), 2);
    Ok(())
}
