use crate::loc::DefLocation;
use crate::scalars;
use crate::schema::SchemaBuildError;
use crate::types::GraphQLType;
use crate::types::ScalarType;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Accumulates named types during a schema build, pre-seeded with the five
/// built-in scalars, and rejects duplicate names on insertion.
#[derive(Debug)]
pub(crate) struct TypesMapBuilder {
    types: HashMap<String, GraphQLType>,
    order: Vec<String>,
}

impl TypesMapBuilder {
    pub fn new() -> Self {
        let builtins = [
            ("Int", scalars::int_scalar()),
            ("Float", scalars::float_scalar()),
            ("String", scalars::string_scalar()),
            ("Boolean", scalars::boolean_scalar()),
            ("ID", scalars::id_scalar()),
        ];

        let mut builder = Self {
            types: HashMap::new(),
            order: vec![],
        };
        for (name, implementation) in builtins {
            builder.insert_unchecked(GraphQLType::Scalar(ScalarType {
                name: name.to_string(),
                description: None,
                def_location: DefLocation::Builtin,
                directives: vec![],
                implementation,
            }));
        }
        builder
    }

    pub fn add_new_type(
        &mut self,
        def_location: DefLocation,
        type_: GraphQLType,
    ) -> Result<()> {
        if let Some(conflicting) = self.types.get(type_.name()) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name: type_.name().to_string(),
                def1: conflicting.def_location().clone(),
                def2: def_location,
            });
        }
        self.insert_unchecked(type_);
        Ok(())
    }

    pub(crate) fn insert_unchecked(&mut self, type_: GraphQLType) {
        self.order.push(type_.name().to_string());
        self.types.insert(type_.name().to_string(), type_);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn get_type_mut(&mut self, name: &str) -> Option<&mut GraphQLType> {
        self.types.get_mut(name)
    }

    pub fn into_parts(self) -> (HashMap<String, GraphQLType>, Vec<String>) {
        (self.types, self.order)
    }
}
