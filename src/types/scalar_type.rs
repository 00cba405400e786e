use crate::loc::DefLocation;
use crate::scalars::ScalarImpl;
use crate::types::DirectiveAnnotation;

/// A scalar type plus its implementation (serialization and the two
/// coercion directions).
#[derive(Clone)]
pub struct ScalarType {
    pub name: String,
    pub description: Option<String>,
    pub def_location: DefLocation,
    pub directives: Vec<DirectiveAnnotation>,
    pub implementation: ScalarImpl,
}

impl std::fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalarType")
            .field("name", &self.name)
            .field("def_location", &self.def_location)
            .finish_non_exhaustive()
    }
}
