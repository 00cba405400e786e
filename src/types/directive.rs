use crate::loc::DefLocation;
use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::schema::Schema;
use crate::types::InputValue;
use indexmap::IndexMap;
use libgql_parser::ast::DirectiveLocation;

pub type NamedDirectiveRef = NamedRef<Schema, Directive>;

/// A directive definition registered in a schema.
///
/// The three built-in directives (`@skip`, `@include`, `@deprecated`) are
/// always present with [`DefLocation::Builtin`](crate::loc::DefLocation)
/// and may not be redefined.
#[derive(Clone, Debug)]
pub struct Directive {
    pub name: String,
    pub description: Option<String>,
    pub def_location: DefLocation,
    pub locations: Vec<DirectiveLocation>,
    pub arguments: IndexMap<String, InputValue>,
    pub repeatable: bool,
}

impl Directive {
    pub fn is_builtin(&self) -> bool {
        matches!(self.def_location, DefLocation::Builtin)
    }

    pub fn allows_location(&self, location: DirectiveLocation) -> bool {
        self.locations.contains(&location)
    }
}

impl DerefByName for Directive {
    type Source = Schema;

    fn deref_name<'a>(
        schema: &'a Schema,
        name: &str,
    ) -> Result<&'a Self, DerefByNameError> {
        schema
            .directive_by_name(name)
            .ok_or_else(|| DerefByNameError::DanglingReference(name.to_string()))
    }
}
