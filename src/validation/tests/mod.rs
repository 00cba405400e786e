mod document_rule_tests;
mod selection_rule_tests;

use crate::schema::build_schema;
use crate::schema::Schema;
use crate::validation::validate;
use crate::validation::ValidationError;
use libgql_parser::parse_executable_document;

/// A schema exercising every composite kind, shared by the rule tests.
pub(crate) fn test_schema() -> Schema {
    build_schema(
        r#"
        type Query {
            hero(episode: Episode): Character
            human(id: ID!): Human
            humans(filter: HumanFilter): [Human]
            pet: Pet
            version: String
        }

        type Mutation {
            rename(id: ID!, name: String!): Human
        }

        type Subscription {
            heroUpdates: Character
            petUpdates: Pet
        }

        interface Character {
            id: ID!
            name: String!
            friends: [Character]
        }

        type Human implements Character {
            id: ID!
            name: String!
            friends: [Character]
            height(unit: LengthUnit = METER): Float
        }

        type Droid implements Character {
            id: ID!
            name: String!
            friends: [Character]
            primaryFunction: String
        }

        type Cat { meows: Boolean }
        type Dog { barks: Boolean }
        union Pet = Cat | Dog

        enum Episode { NEWHOPE EMPIRE JEDI }
        enum LengthUnit { METER FOOT }

        input HumanFilter {
            name: String
            episode: Episode
            minHeight: Float = 0
            ids: [ID!]
        }

        directive @once on FIELD
        directive @many repeatable on FIELD
        "#,
    )
    .expect("test schema builds")
}

pub(crate) fn validate_source(schema: &Schema, source: &str) -> Vec<ValidationError> {
    let document = parse_executable_document(source).expect("test document parses");
    validate(schema, &document)
}

/// Asserts the document is valid against the shared test schema.
pub(crate) fn assert_valid(source: &str) {
    let schema = test_schema();
    let errors = validate_source(&schema, source);
    assert!(errors.is_empty(), "expected no errors, got: {errors:?}");
}

/// Asserts validation fails with a message containing `needle`.
pub(crate) fn assert_error_containing(source: &str, needle: &str) {
    let schema = test_schema();
    let errors = validate_source(&schema, source);
    assert!(
        errors.iter().any(|error| error.message.contains(needle)),
        "expected an error containing `{needle}`, got: {errors:?}",
    );
}
