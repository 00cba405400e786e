use crate::schema::SchemaBuilder;
use crate::types::Directive;
use crate::types::GraphQLType;
use crate::types::NamedGraphQLTypeRef;
use crate::types::ObjectType;
use libgql_parser::ast::OperationKind;
use std::collections::HashMap;

/// A fully built, validated, and immutable GraphQL schema.
///
/// Schemas are built once via [`SchemaBuilder`] and read-only afterwards;
/// validation and execution take them by shared reference.
#[derive(Debug)]
pub struct Schema {
    pub(crate) description: Option<String>,
    pub(crate) directive_defs: HashMap<String, Directive>,
    pub(crate) query_type: NamedGraphQLTypeRef,
    pub(crate) mutation_type: Option<NamedGraphQLTypeRef>,
    pub(crate) subscription_type: Option<NamedGraphQLTypeRef>,
    pub(crate) types: HashMap<String, GraphQLType>,

    /// Type names in SDL declaration order (built-ins first). Keeps
    /// introspection and SDL export deterministic.
    pub(crate) type_order: Vec<String>,
}

impl Schema {
    /// Starts a [`SchemaBuilder`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn type_by_name(&self, name: &str) -> Option<&GraphQLType> {
        self.types.get(name)
    }

    pub fn directive_by_name(&self, name: &str) -> Option<&Directive> {
        self.directive_defs.get(name)
    }

    /// All types in declaration order, built-ins included.
    pub fn types(&self) -> impl Iterator<Item = &GraphQLType> {
        self.type_order
            .iter()
            .filter_map(|name| self.types.get(name))
    }

    /// Schema-defined types only (no built-in scalars, no introspection
    /// types).
    pub fn schema_types(&self) -> impl Iterator<Item = &GraphQLType> {
        self.types().filter(|t| !t.is_builtin())
    }

    /// All directive definitions, built-ins included. Order is undefined.
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.directive_defs.values()
    }

    /// Schema-defined directives only.
    pub fn schema_directives(&self) -> impl Iterator<Item = &Directive> {
        self.directives().filter(|d| !d.is_builtin())
    }

    /// This schema's Query root type.
    ///
    /// Build validation guarantees the root refs resolve to object types,
    /// so the expect here documents an invariant rather than a reachable
    /// panic.
    pub fn query_type(&self) -> &ObjectType {
        self.query_type
            .deref(self)
            .expect("query type is present in schema")
            .as_object()
            .expect("query type is an object type")
    }

    pub fn mutation_type(&self) -> Option<&ObjectType> {
        self.mutation_type.as_ref().map(|named_ref| {
            named_ref
                .deref(self)
                .expect("mutation type is present in schema")
                .as_object()
                .expect("mutation type is an object type")
        })
    }

    pub fn subscription_type(&self) -> Option<&ObjectType> {
        self.subscription_type.as_ref().map(|named_ref| {
            named_ref
                .deref(self)
                .expect("subscription type is present in schema")
                .as_object()
                .expect("subscription type is an object type")
        })
    }

    /// The root object type for an operation kind, if the schema defines
    /// one.
    pub fn root_type(&self, kind: OperationKind) -> Option<&ObjectType> {
        match kind {
            OperationKind::Query => Some(self.query_type()),
            OperationKind::Mutation => self.mutation_type(),
            OperationKind::Subscription => self.subscription_type(),
        }
    }

    /// The concrete object types an abstract type can resolve to. Returns
    /// an empty list for non-abstract types.
    pub fn possible_types(&self, abstract_type: &GraphQLType) -> Vec<&ObjectType> {
        match abstract_type {
            GraphQLType::Interface(interface) => self
                .types()
                .filter_map(GraphQLType::as_object)
                .filter(|object| object.implements(&interface.name))
                .collect(),
            GraphQLType::Union(union_type) => union_type
                .members
                .iter()
                .filter_map(|member| self.type_by_name(member))
                .filter_map(GraphQLType::as_object)
                .collect(),
            _ => vec![],
        }
    }

    /// Whether `object_name` is a possible runtime type of `condition`:
    /// the same object, a member of the union, or an implementor of the
    /// interface.
    pub fn is_possible_type(&self, condition: &GraphQLType, object_name: &str) -> bool {
        match condition {
            GraphQLType::Object(object) => object.name == object_name,
            GraphQLType::Union(union_type) => union_type.has_member(object_name),
            GraphQLType::Interface(interface) => self
                .type_by_name(object_name)
                .and_then(GraphQLType::as_object)
                .is_some_and(|object| object.implements(&interface.name)),
            _ => false,
        }
    }

    /// Whether two composite types can possibly describe the same runtime
    /// object (used to reject impossible fragment spreads).
    pub fn types_overlap(&self, a: &GraphQLType, b: &GraphQLType) -> bool {
        if a.name() == b.name() {
            return true;
        }
        match (a.is_abstract(), b.is_abstract()) {
            (false, false) => false,
            (true, false) => self.is_possible_type(a, b.name()),
            (false, true) => self.is_possible_type(b, a.name()),
            (true, true) => {
                let b_possible: Vec<&str> = self
                    .possible_types(b)
                    .iter()
                    .map(|object| object.name.as_str())
                    .collect();
                self.possible_types(a)
                    .iter()
                    .any(|object| b_possible.contains(&object.name.as_str()))
            }
        }
    }
}
