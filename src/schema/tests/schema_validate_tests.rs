use crate::schema::build_schema;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaValidationError;

fn validation_errors(sdl: &str) -> Vec<SchemaValidationError> {
    match build_schema(sdl) {
        Ok(_) => vec![],
        Err(SchemaBuildError::TypeValidationErrors { errors }) => errors,
        Err(other) => panic!("expected validation errors, got: {other}"),
    }
}

#[test]
fn unresolved_type_references_are_reported() {
    let errors = validation_errors("type Query { x: Ghost }");
    assert!(errors.iter().any(|e| matches!(
        e,
        SchemaValidationError::UnresolvedTypeReference { type_name, .. }
            if type_name == "Ghost",
    )));
}

#[test]
fn output_positions_reject_input_objects() {
    let errors = validation_errors(
        "type Query { x: I }
         input I { n: Int }",
    );
    assert!(errors.iter().any(|e| matches!(
        e,
        SchemaValidationError::NonOutputTypeInOutputPosition { .. },
    )));
}

#[test]
fn input_positions_reject_objects() {
    let errors = validation_errors(
        "type Query { x(arg: Obj): Int }
         type Obj { y: Int }",
    );
    assert!(errors.iter().any(|e| matches!(
        e,
        SchemaValidationError::NonInputTypeInInputPosition { .. },
    )));
}

#[test]
fn interface_implementations_must_cover_fields() {
    let errors = validation_errors(
        "type Query { n: Node }
         interface Node { id: ID! }
         type Thing implements Node { name: String }
         ",
    );
    assert!(errors.iter().any(|e| matches!(
        e,
        SchemaValidationError::MissingInterfaceField { field_name, .. }
            if field_name == "id",
    )));
}

#[test]
fn interface_field_types_are_covariant() {
    // Narrowing nullability is fine.
    assert!(validation_errors(
        "type Query { n: Node }
         interface Node { id: ID }
         type Thing implements Node { id: ID! }",
    )
    .is_empty());

    // Widening nullability is not.
    let errors = validation_errors(
        "type Query { n: Node }
         interface Node { id: ID! }
         type Thing implements Node { id: ID }",
    );
    assert!(errors.iter().any(|e| matches!(
        e,
        SchemaValidationError::IncompatibleInterfaceFieldType { .. },
    )));
}

#[test]
fn implementations_may_narrow_to_possible_types() {
    // An interface field typed by an interface may be implemented with an
    // object type that implements it.
    assert!(validation_errors(
        "type Query { n: Node }
         interface Named { name: String }
         interface Node { owner: Named }
         type User implements Named { name: String }
         type Thing implements Node { owner: User }",
    )
    .is_empty());
}

#[test]
fn interface_field_arguments_are_invariant() {
    let errors = validation_errors(
        "type Query { n: Node }
         interface Node { pick(limit: Int): Int }
         type Thing implements Node { pick(limit: Int!): Int }",
    );
    assert!(errors.iter().any(|e| matches!(
        e,
        SchemaValidationError::IncompatibleInterfaceFieldArgumentType { .. },
    )));
}

#[test]
fn added_implementation_arguments_must_be_optional() {
    let errors = validation_errors(
        "type Query { n: Node }
         interface Node { pick: Int }
         type Thing implements Node { pick(extra: Int!): Int }",
    );
    assert!(errors.iter().any(|e| matches!(
        e,
        SchemaValidationError::RequiredArgumentAddedByImplementation { .. },
    )));
}

#[test]
fn union_members_must_be_objects() {
    let errors = validation_errors(
        "type Query { u: U }
         union U = Color
         enum Color { RED }",
    );
    assert!(errors.iter().any(|e| matches!(
        e,
        SchemaValidationError::UnionMemberNotObject { .. },
    )));
}

#[test]
fn unbreakable_input_cycles_are_reported_once() {
    let errors = validation_errors(
        "type Query { f(i: A): Int }
         input A { b: B! }
         input B { a: A! }",
    );
    let cycle_errors: Vec<_> = errors
        .iter()
        .filter(|e| matches!(e, SchemaValidationError::InputObjectNonNullCycle { .. }))
        .collect();
    assert_eq!(cycle_errors.len(), 1, "{errors:?}");
}

#[test]
fn nullable_edges_break_input_cycles() {
    // A nullable field or a list edge makes the cycle constructible.
    assert!(validation_errors(
        "type Query { f(i: A): Int }
         input A { b: B }
         input B { a: [A!]! }",
    )
    .is_empty());
}

#[test]
fn self_referential_input_object_is_reported() {
    let errors = validation_errors(
        "type Query { f(i: A): Int }
         input A { again: A! }",
    );
    assert!(errors.iter().any(|e| matches!(
        e,
        SchemaValidationError::InputObjectNonNullCycle { type_name, .. }
            if type_name == "A",
    )));
}
