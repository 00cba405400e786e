use crate::loc::DefLocation;
use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::types::DeprecationState;
use crate::types::DirectiveAnnotation;
use indexmap::IndexMap;

/// An enum type and its values.
#[derive(Clone, Debug)]
pub struct EnumType {
    pub name: String,
    pub description: Option<String>,
    pub def_location: DefLocation,
    pub directives: Vec<DirectiveAnnotation>,
    pub values: IndexMap<String, EnumValue>,
}

impl EnumType {
    pub fn value(&self, name: &str) -> Option<&EnumValue> {
        self.values.get(name)
    }
}

/// A single value of an [`EnumType`].
#[derive(Clone, Debug)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub def_location: DefLocation,
    pub directives: Vec<DirectiveAnnotation>,
    pub deprecation: DeprecationState,
}

impl DerefByName for EnumValue {
    type Source = EnumType;

    fn deref_name<'a>(
        enum_type: &'a EnumType,
        name: &str,
    ) -> Result<&'a Self, DerefByNameError> {
        enum_type
            .values
            .get(name)
            .ok_or_else(|| DerefByNameError::DanglingReference(name.to_string()))
    }
}
