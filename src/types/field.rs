use crate::execution::Resolver;
use crate::execution::SubscriptionResolver;
use crate::loc::DefLocation;
use crate::types::DeprecationState;
use crate::types::DirectiveAnnotation;
use crate::types::TypeRef;
use crate::Value;
use indexmap::IndexMap;
use std::sync::Arc;

/// A field defined on an [`ObjectType`](crate::types::ObjectType) or
/// [`InterfaceType`](crate::types::InterfaceType).
#[derive(Clone)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub def_location: DefLocation,
    pub type_ref: TypeRef,
    pub arguments: IndexMap<String, InputValue>,
    pub directives: Vec<DirectiveAnnotation>,
    pub deprecation: DeprecationState,

    /// The key resolvers see instead of the exposed GraphQL name, when the
    /// two differ (e.g. a snake_case host key behind a camelCase field).
    pub resolver_name: Option<String>,

    pub resolver: Option<Arc<dyn Resolver>>,
    pub subscription_resolver: Option<Arc<dyn SubscriptionResolver>>,
}

impl Field {
    /// The key the default resolver reads from the parent value:
    /// `resolver_name` when set, the field name otherwise.
    pub fn resolver_key(&self) -> &str {
        self.resolver_name.as_deref().unwrap_or(&self.name)
    }

    pub fn argument(&self, name: &str) -> Option<&InputValue> {
        self.arguments.get(name)
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type_ref", &self.type_ref)
            .field("arguments", &self.arguments)
            .field("deprecation", &self.deprecation)
            .field("has_resolver", &self.resolver.is_some())
            .finish_non_exhaustive()
    }
}

/// An input value definition: a field argument or an input-object field.
#[derive(Clone, Debug)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub def_location: DefLocation,
    pub type_ref: TypeRef,
    /// The declared default, already coerced to a runtime value.
    pub default_value: Option<Value>,
    pub directives: Vec<DirectiveAnnotation>,
    pub deprecation: DeprecationState,

    /// The key this value is delivered under to resolvers, when it differs
    /// from the exposed GraphQL name.
    pub resolver_name: Option<String>,
}

impl InputValue {
    pub fn resolver_key(&self) -> &str {
        self.resolver_name.as_deref().unwrap_or(&self.name)
    }

    /// Required means non-nullable with no default.
    pub fn is_required(&self) -> bool {
        !self.type_ref.is_nullable() && self.default_value.is_none()
    }
}
