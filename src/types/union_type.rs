use crate::loc::DefLocation;
use crate::types::DirectiveAnnotation;
use crate::types::TypeResolver;
use std::sync::Arc;

/// A union type: a closed set of object-type members.
#[derive(Clone)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub def_location: DefLocation,
    pub directives: Vec<DirectiveAnnotation>,
    pub members: Vec<String>,
    pub resolve_type: Option<Arc<dyn TypeResolver>>,
}

impl UnionType {
    pub fn has_member(&self, type_name: &str) -> bool {
        self.members.iter().any(|name| name == type_name)
    }
}

impl std::fmt::Debug for UnionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnionType")
            .field("name", &self.name)
            .field("members", &self.members)
            .field("has_resolve_type", &self.resolve_type.is_some())
            .finish_non_exhaustive()
    }
}
