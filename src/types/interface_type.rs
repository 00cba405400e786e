use crate::loc::DefLocation;
use crate::types::DirectiveAnnotation;
use crate::types::Field;
use crate::types::TypeResolver;
use indexmap::IndexMap;
use std::sync::Arc;

/// An interface type. `resolve_type`, when present, maps a runtime value to
/// the name of its concrete object type; without it the executor scans the
/// interface's implementors.
#[derive(Clone)]
pub struct InterfaceType {
    pub name: String,
    pub description: Option<String>,
    pub def_location: DefLocation,
    pub interfaces: Vec<String>,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: IndexMap<String, Field>,
    pub resolve_type: Option<Arc<dyn TypeResolver>>,
}

impl std::fmt::Debug for InterfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceType")
            .field("name", &self.name)
            .field("interfaces", &self.interfaces)
            .field("fields", &self.fields)
            .field("has_resolve_type", &self.resolve_type.is_some())
            .finish_non_exhaustive()
    }
}
