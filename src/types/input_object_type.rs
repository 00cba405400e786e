use crate::loc::DefLocation;
use crate::types::DirectiveAnnotation;
use crate::types::InputValue;
use indexmap::IndexMap;

/// An input object type: a named bag of input fields.
#[derive(Clone, Debug)]
pub struct InputObjectType {
    pub name: String,
    pub description: Option<String>,
    pub def_location: DefLocation,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: IndexMap<String, InputValue>,
}
