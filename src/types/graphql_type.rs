use crate::loc::DefLocation;
use crate::named_ref::DerefByName;
use crate::named_ref::DerefByNameError;
use crate::named_ref::NamedRef;
use crate::schema::Schema;
use crate::types::EnumType;
use crate::types::Field;
use crate::types::InputObjectType;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::UnionType;
use indexmap::IndexMap;

pub type NamedGraphQLTypeRef = NamedRef<Schema, GraphQLType>;

/// A named type registered in a [`Schema`].
///
/// Built-in scalars (`Int`, `Float`, `String`, `Boolean`, `ID`) are
/// [`ScalarType`]s whose `def_location` is
/// [`DefLocation::Builtin`](crate::loc::DefLocation::Builtin), as are the
/// introspection types.
#[derive(Debug)]
pub enum GraphQLType {
    Scalar(ScalarType),
    Object(ObjectType),
    Interface(InterfaceType),
    Union(UnionType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl GraphQLType {
    pub fn name(&self) -> &str {
        match self {
            GraphQLType::Scalar(t) => &t.name,
            GraphQLType::Object(t) => &t.name,
            GraphQLType::Interface(t) => &t.name,
            GraphQLType::Union(t) => &t.name,
            GraphQLType::Enum(t) => &t.name,
            GraphQLType::InputObject(t) => &t.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            GraphQLType::Scalar(t) => t.description.as_deref(),
            GraphQLType::Object(t) => t.description.as_deref(),
            GraphQLType::Interface(t) => t.description.as_deref(),
            GraphQLType::Union(t) => t.description.as_deref(),
            GraphQLType::Enum(t) => t.description.as_deref(),
            GraphQLType::InputObject(t) => t.description.as_deref(),
        }
    }

    pub fn def_location(&self) -> &DefLocation {
        match self {
            GraphQLType::Scalar(t) => &t.def_location,
            GraphQLType::Object(t) => &t.def_location,
            GraphQLType::Interface(t) => &t.def_location,
            GraphQLType::Union(t) => &t.def_location,
            GraphQLType::Enum(t) => &t.def_location,
            GraphQLType::InputObject(t) => &t.def_location,
        }
    }

    /// Whether this type was defined by GraphQL itself rather than the
    /// schema's SDL (built-in scalars and introspection types).
    pub fn is_builtin(&self) -> bool {
        matches!(self.def_location(), DefLocation::Builtin)
    }

    /// The kind of this type, in the words used by error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            GraphQLType::Scalar(_) => "scalar",
            GraphQLType::Object(_) => "object",
            GraphQLType::Interface(_) => "interface",
            GraphQLType::Union(_) => "union",
            GraphQLType::Enum(_) => "enum",
            GraphQLType::InputObject(_) => "input object",
        }
    }

    /// Output fields, for object and interface types.
    pub fn fields(&self) -> Option<&IndexMap<String, Field>> {
        match self {
            GraphQLType::Object(t) => Some(&t.fields),
            GraphQLType::Interface(t) => Some(&t.fields),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().and_then(|fields| fields.get(name))
    }

    /// Input-position types: scalar, enum, input object.
    pub fn is_input_type(&self) -> bool {
        matches!(
            self,
            GraphQLType::Scalar(_) | GraphQLType::Enum(_) | GraphQLType::InputObject(_),
        )
    }

    /// Output-position types: everything except input objects.
    pub fn is_output_type(&self) -> bool {
        !matches!(self, GraphQLType::InputObject(_))
    }

    /// Leaf types complete to a serialized value with no subselection.
    pub fn is_leaf(&self) -> bool {
        matches!(self, GraphQLType::Scalar(_) | GraphQLType::Enum(_))
    }

    /// Composite types require a subselection.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            GraphQLType::Object(_) | GraphQLType::Interface(_) | GraphQLType::Union(_),
        )
    }

    /// Abstract types resolve to a concrete object type at execution time.
    pub fn is_abstract(&self) -> bool {
        matches!(self, GraphQLType::Interface(_) | GraphQLType::Union(_))
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            GraphQLType::Object(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_input_object(&self) -> Option<&InputObjectType> {
        match self {
            GraphQLType::InputObject(t) => Some(t),
            _ => None,
        }
    }
}

impl DerefByName for GraphQLType {
    type Source = Schema;

    fn deref_name<'a>(
        schema: &'a Schema,
        name: &str,
    ) -> Result<&'a Self, DerefByNameError> {
        schema
            .type_by_name(name)
            .ok_or_else(|| DerefByNameError::DanglingReference(name.to_string()))
    }
}
