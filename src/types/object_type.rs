use crate::loc::DefLocation;
use crate::types::DirectiveAnnotation;
use crate::types::Field;
use indexmap::IndexMap;

/// An object type: a named bag of output fields, possibly implementing
/// interfaces.
#[derive(Clone, Debug)]
pub struct ObjectType {
    pub name: String,
    pub description: Option<String>,
    pub def_location: DefLocation,
    pub interfaces: Vec<String>,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: IndexMap<String, Field>,
}

impl ObjectType {
    pub fn implements(&self, interface_name: &str) -> bool {
        self.interfaces.iter().any(|name| name == interface_name)
    }
}
