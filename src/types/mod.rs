//! The schema type model: everything a built
//! [`Schema`](crate::schema::Schema) is made of.

mod deprecation_state;
mod directive;
mod directive_annotation;
mod enum_type;
mod field;
mod graphql_type;
mod input_object_type;
mod interface_type;
mod object_type;
mod scalar_type;
mod type_annotation;
mod union_type;

pub use deprecation_state::DeprecationState;
pub use directive::Directive;
pub use directive::NamedDirectiveRef;
pub use directive_annotation::DirectiveAnnotation;
pub use enum_type::EnumType;
pub use enum_type::EnumValue;
pub use field::Field;
pub use field::InputValue;
pub use graphql_type::GraphQLType;
pub use graphql_type::NamedGraphQLTypeRef;
pub use input_object_type::InputObjectType;
pub use interface_type::InterfaceType;
pub use object_type::ObjectType;
pub use scalar_type::ScalarType;
pub use type_annotation::TypeRef;
pub use union_type::UnionType;

use crate::schema::Schema;
use crate::Value;

/// Resolves the concrete object type of a value at an abstract-typed
/// position (interface or union). Returns the object type's name.
pub trait TypeResolver: Send + Sync {
    fn resolve_type(&self, value: &Value, schema: &Schema) -> Option<String>;
}

impl<F> TypeResolver for F
where
    F: Fn(&Value, &Schema) -> Option<String> + Send + Sync,
{
    fn resolve_type(&self, value: &Value, schema: &Schema) -> Option<String> {
        self(value, schema)
    }
}
