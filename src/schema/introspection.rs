//! Injection of the introspection type system.
//!
//! The `__Schema`/`__Type`/… types are declared in SDL and built through
//! the same type builders as user types, then marked built-in. The
//! `__schema` and `__type` meta fields are added to the query root, and
//! every object and interface type already carries `__typename`. Executing
//! these fields is the executor's business (see
//! [`crate::execution::introspection`]); this module only makes them
//! *exist* so validation and type lookup treat introspection queries like
//! any other query.

use crate::loc::DefLocation;
use crate::schema::type_builders;
use crate::schema::type_builders::NamePolicy;
use crate::types::DeprecationState;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputValue;
use crate::types::TypeRef;
use indexmap::IndexMap;
use libgql_parser::ast;
use libgql_parser::parse_schema_document;

/// The introspection type system, as SDL.
const INTROSPECTION_SDL: &str = r#"
type __Schema {
  description: String
  types: [__Type!]!
  queryType: __Type!
  mutationType: __Type
  subscriptionType: __Type
  directives: [__Directive!]!
}

type __Type {
  kind: __TypeKind!
  name: String
  description: String
  fields(includeDeprecated: Boolean = false): [__Field!]
  interfaces: [__Type!]
  possibleTypes: [__Type!]
  enumValues(includeDeprecated: Boolean = false): [__EnumValue!]
  inputFields: [__InputValue!]
  ofType: __Type
}

type __Field {
  name: String!
  description: String
  args: [__InputValue!]!
  type: __Type!
  isDeprecated: Boolean!
  deprecationReason: String
}

type __InputValue {
  name: String!
  description: String
  type: __Type!
  defaultValue: String
}

type __EnumValue {
  name: String!
  description: String
  isDeprecated: Boolean!
  deprecationReason: String
}

enum __TypeKind {
  SCALAR
  OBJECT
  INTERFACE
  UNION
  ENUM
  INPUT_OBJECT
  LIST
  NON_NULL
}

type __Directive {
  name: String!
  description: String
  locations: [__DirectiveLocation!]!
  args: [__InputValue!]!
  isRepeatable: Boolean!
}

enum __DirectiveLocation {
  QUERY
  MUTATION
  SUBSCRIPTION
  FIELD
  FRAGMENT_DEFINITION
  FRAGMENT_SPREAD
  INLINE_FRAGMENT
  VARIABLE_DEFINITION
  SCHEMA
  SCALAR
  OBJECT
  FIELD_DEFINITION
  ARGUMENT_DEFINITION
  INTERFACE
  UNION
  ENUM
  ENUM_VALUE
  INPUT_OBJECT
  INPUT_FIELD_DEFINITION
}
"#;

/// Adds the introspection types to `types` and the `__schema`/`__type`
/// meta fields to the query root.
pub(crate) fn inject_introspection_types(
    types: &mut std::collections::HashMap<String, GraphQLType>,
    type_order: &mut Vec<String>,
    query_type_name: &str,
) {
    let doc = parse_schema_document(INTROSPECTION_SDL)
        .expect("introspection SDL parses");

    for def in &doc.definitions {
        let ast::Definition::Type(type_def) = def else {
            continue;
        };
        let built = match type_def {
            ast::TypeDefinition::Object(def) => {
                let mut object = type_builders::build_object_type(def, NamePolicy::AllowDunder)
                    .expect("introspection SDL builds");
                object.def_location = DefLocation::Builtin;
                GraphQLType::Object(object)
            }
            ast::TypeDefinition::Enum(def) => {
                let mut enum_type = type_builders::build_enum_type(def, NamePolicy::AllowDunder)
                    .expect("introspection SDL builds");
                enum_type.def_location = DefLocation::Builtin;
                GraphQLType::Enum(enum_type)
            }
            _ => unreachable!("introspection SDL only declares objects and enums"),
        };
        type_order.push(built.name().to_string());
        types.insert(built.name().to_string(), built);
    }

    // Meta fields on the query root. These exist so validation sees them;
    // the executor resolves them itself.
    if let Some(GraphQLType::Object(query_root)) = types.get_mut(query_type_name) {
        query_root.fields.insert(
            "__schema".to_string(),
            meta_field(
                "__schema",
                TypeRef::named("__Schema", false, DefLocation::Builtin),
                IndexMap::new(),
            ),
        );

        let name_argument = InputValue {
            name: "name".to_string(),
            description: None,
            def_location: DefLocation::Builtin,
            type_ref: TypeRef::named("String", false, DefLocation::Builtin),
            default_value: None,
            directives: vec![],
            deprecation: DeprecationState::NotDeprecated,
            resolver_name: None,
        };
        query_root.fields.insert(
            "__type".to_string(),
            meta_field(
                "__type",
                TypeRef::named("__Type", true, DefLocation::Builtin),
                IndexMap::from([("name".to_string(), name_argument)]),
            ),
        );
    }
}

fn meta_field(
    name: &str,
    type_ref: TypeRef,
    arguments: IndexMap<String, InputValue>,
) -> Field {
    Field {
        name: name.to_string(),
        description: None,
        def_location: DefLocation::Builtin,
        type_ref,
        arguments,
        directives: vec![],
        deprecation: DeprecationState::NotDeprecated,
        resolver_name: None,
        resolver: None,
        subscription_resolver: None,
    }
}
