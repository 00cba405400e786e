use crate::ast;
use crate::parse_executable_document;
use crate::ParseError;

type Result<T> = std::result::Result<T, ParseError>;

fn single_operation(source: &str) -> Result<ast::OperationDefinition> {
    let doc = parse_executable_document(source)?;
    let mut operations: Vec<_> = doc.operations().cloned().collect();
    assert_eq!(operations.len(), 1, "expected exactly one operation");
    Ok(operations.remove(0))
}

#[test]
fn parses_shorthand_query() -> Result<()> {
    let op = single_operation("{ hello world }")?;
    assert_eq!(op.kind, ast::OperationKind::Query);
    assert!(op.shorthand);
    assert!(op.name.is_none());
    assert_eq!(op.selection_set.selections.len(), 2);
    Ok(())
}

#[test]
fn parses_named_operation_with_variables() -> Result<()> {
    let op = single_operation(
        "query GetUser($id: ID!, $verbose: Boolean = false) {
            user(id: $id) { name }
        }",
    )?;
    assert_eq!(op.kind, ast::OperationKind::Query);
    assert_eq!(op.name.as_ref().unwrap().as_str(), "GetUser");
    assert_eq!(op.variable_definitions.len(), 2);

    let id_var = &op.variable_definitions[0];
    assert_eq!(id_var.name.as_str(), "id");
    assert!(!id_var.var_type.is_nullable());
    assert_eq!(id_var.var_type.innermost_name().as_str(), "ID");

    let verbose_var = &op.variable_definitions[1];
    assert!(matches!(
        verbose_var.default_value,
        Some(ast::Value::Boolean(ast::BooleanValue { value: false, .. })),
    ));
    Ok(())
}

#[test]
fn parses_field_alias_arguments_and_directives() -> Result<()> {
    let op = single_operation(
        "{ renamed: user(id: 4, active: true) @include(if: $yes) { name } }",
    )?;
    let ast::Selection::Field(field) = &op.selection_set.selections[0] else {
        panic!("expected a field");
    };
    assert_eq!(field.alias.as_ref().unwrap().as_str(), "renamed");
    assert_eq!(field.name.as_str(), "user");
    assert_eq!(field.arguments.len(), 2);
    assert_eq!(field.directives.len(), 1);
    assert_eq!(field.directives[0].name.as_str(), "include");
    assert!(field.selection_set.is_some());
    Ok(())
}

#[test]
fn parses_mutation_and_subscription_kinds() -> Result<()> {
    let doc = parse_executable_document(
        "mutation M { inc }
         subscription S { events }",
    )?;
    let kinds: Vec<_> = doc.operations().map(|op| op.kind).collect();
    assert_eq!(
        kinds,
        vec![ast::OperationKind::Mutation, ast::OperationKind::Subscription],
    );
    Ok(())
}

#[test]
fn parses_fragment_definition_and_spread() -> Result<()> {
    let doc = parse_executable_document(
        "query Q { me { ...userFields } }
         fragment userFields on User { id name }",
    )?;
    let fragment = doc.fragments().next().unwrap();
    assert_eq!(fragment.name.as_str(), "userFields");
    assert_eq!(fragment.type_condition.on_type.as_str(), "User");

    let op = doc.operations().next().unwrap();
    let ast::Selection::Field(me) = &op.selection_set.selections[0] else {
        panic!("expected a field");
    };
    let subselections = &me.selection_set.as_ref().unwrap().selections;
    assert!(matches!(
        &subselections[0],
        ast::Selection::FragmentSpread(spread) if spread.name.as_str() == "userFields",
    ));
    Ok(())
}

#[test]
fn parses_inline_fragments() -> Result<()> {
    let op = single_operation(
        "{
            node {
                ... on User { name }
                ... @include(if: $x) { id }
                ... { typeless }
            }
        }",
    )?;
    let ast::Selection::Field(node) = &op.selection_set.selections[0] else {
        panic!("expected a field");
    };
    let selections = &node.selection_set.as_ref().unwrap().selections;

    let ast::Selection::InlineFragment(with_cond) = &selections[0] else {
        panic!("expected inline fragment");
    };
    assert_eq!(
        with_cond.type_condition.as_ref().unwrap().on_type.as_str(),
        "User",
    );

    let ast::Selection::InlineFragment(with_dir) = &selections[1] else {
        panic!("expected inline fragment");
    };
    assert!(with_dir.type_condition.is_none());
    assert_eq!(with_dir.directives.len(), 1);

    assert!(matches!(&selections[2], ast::Selection::InlineFragment(f) if f.type_condition.is_none()));
    Ok(())
}

#[test]
fn parses_all_value_kinds() -> Result<()> {
    let op = single_operation(
        r#"{ f(
            a: 42, b: -3.5, c: "str", d: true, e: null, f: RED,
            g: [1, 2], h: {x: 1, y: [$v]}, i: $var
        ) }"#,
    )?;
    let ast::Selection::Field(field) = &op.selection_set.selections[0] else {
        panic!("expected a field");
    };
    let values: Vec<&ast::Value> =
        field.arguments.iter().map(|arg| &arg.value).collect();

    assert!(matches!(values[0], ast::Value::Int(v) if v.as_i64() == Some(42)));
    assert!(matches!(values[1], ast::Value::Float(v) if v.as_f64() == Some(-3.5)));
    assert!(matches!(values[2], ast::Value::String(v) if v.value == "str"));
    assert!(matches!(values[3], ast::Value::Boolean(v) if v.value));
    assert!(matches!(values[4], ast::Value::Null(_)));
    assert!(matches!(values[5], ast::Value::Enum(v) if v.value == "RED"));
    assert!(matches!(values[6], ast::Value::List(v) if v.values.len() == 2));
    assert!(matches!(values[7], ast::Value::Object(v) if v.fields.len() == 2));
    assert!(matches!(values[8], ast::Value::Variable(v) if v.name == "var"));
    Ok(())
}

#[test]
fn parses_nested_type_annotations() -> Result<()> {
    let op = single_operation("query Q($m: [[String!]]!) { f(x: $m) }")?;
    let annotation = &op.variable_definitions[0].var_type;
    assert!(!annotation.is_nullable());
    let ast::TypeAnnotation::List(outer) = annotation else {
        panic!("expected list");
    };
    let ast::TypeAnnotation::List(inner) = &outer.inner else {
        panic!("expected inner list");
    };
    assert!(inner.nullable);
    let ast::TypeAnnotation::Named(named) = &inner.inner else {
        panic!("expected named");
    };
    assert_eq!(named.name.as_str(), "String");
    assert!(!named.nullable);
    Ok(())
}

#[test]
fn parses_directives_on_variable_definitions() -> Result<()> {
    let op = single_operation("query Q($x: Int @sensitive) { f(x: $x) }")?;
    assert_eq!(op.variable_definitions[0].directives.len(), 1);
    assert_eq!(
        op.variable_definitions[0].directives[0].name.as_str(),
        "sensitive",
    );
    Ok(())
}

#[test]
fn anonymous_plus_named_operation_is_not_a_parse_error() -> Result<()> {
    // The lone-anonymous-operation rule belongs to validation, so parsing
    // must accept this document.
    let doc = parse_executable_document("{ a } query B { b }")?;
    assert_eq!(doc.operations().count(), 2);
    Ok(())
}

#[test]
fn keywords_are_valid_field_names() -> Result<()> {
    let op = single_operation("{ query fragment on type null }")?;
    let names: Vec<_> = op
        .selection_set
        .selections
        .iter()
        .map(|sel| match sel {
            ast::Selection::Field(field) => field.name.as_str().to_string(),
            _ => panic!("expected fields"),
        })
        .collect();
    assert_eq!(names, vec!["query", "fragment", "on", "type", "null"]);
    Ok(())
}
