use crate::ast::DirectiveAnnotation;
use crate::ast::Name;
use crate::ast::OperationKind;
use crate::ast::StringValue;
use crate::ast::TypeAnnotation;
use crate::ast::Value;
use crate::SourceSpan;

/// A `schema { … }` definition, optionally carrying a description
/// (graphql-spec PR 466).
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaDefinition {
    pub description: Option<StringValue>,
    pub directives: Vec<DirectiveAnnotation>,
    pub operation_types: Vec<RootOperationTypeDefinition>,
    pub span: SourceSpan,
}

/// An `extend schema …` definition.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaExtension {
    pub directives: Vec<DirectiveAnnotation>,
    pub operation_types: Vec<RootOperationTypeDefinition>,
    pub span: SourceSpan,
}

/// One `query: TypeName` entry of a schema definition.
#[derive(Clone, Debug, PartialEq)]
pub struct RootOperationTypeDefinition {
    pub operation: OperationKind,
    pub named_type: Name,
    pub span: SourceSpan,
}

/// A type definition of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeDefinition {
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
}

impl TypeDefinition {
    pub fn name(&self) -> &Name {
        match self {
            TypeDefinition::Scalar(def) => &def.name,
            TypeDefinition::Object(def) => &def.name,
            TypeDefinition::Interface(def) => &def.name,
            TypeDefinition::Union(def) => &def.name,
            TypeDefinition::Enum(def) => &def.name,
            TypeDefinition::InputObject(def) => &def.name,
        }
    }

    pub fn span(&self) -> &SourceSpan {
        match self {
            TypeDefinition::Scalar(def) => &def.span,
            TypeDefinition::Object(def) => &def.span,
            TypeDefinition::Interface(def) => &def.span,
            TypeDefinition::Union(def) => &def.span,
            TypeDefinition::Enum(def) => &def.span,
            TypeDefinition::InputObject(def) => &def.span,
        }
    }

    /// The SDL keyword that introduces this kind of definition.
    pub fn keyword(&self) -> &'static str {
        match self {
            TypeDefinition::Scalar(_) => "scalar",
            TypeDefinition::Object(_) => "type",
            TypeDefinition::Interface(_) => "interface",
            TypeDefinition::Union(_) => "union",
            TypeDefinition::Enum(_) => "enum",
            TypeDefinition::InputObject(_) => "input",
        }
    }
}

/// `scalar Name @dir`
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarTypeDefinition {
    pub description: Option<StringValue>,
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: SourceSpan,
}

/// `type Name implements I1 & I2 @dir { fields… }`
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectTypeDefinition {
    pub description: Option<StringValue>,
    pub name: Name,
    pub interfaces: Vec<Name>,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<FieldDefinition>,
    pub span: SourceSpan,
}

/// `interface Name implements I1 @dir { fields… }`
///
/// `implements` on interfaces is graphql-spec PR 373.
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceTypeDefinition {
    pub description: Option<StringValue>,
    pub name: Name,
    pub interfaces: Vec<Name>,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<FieldDefinition>,
    pub span: SourceSpan,
}

/// `union Name = A | B`
#[derive(Clone, Debug, PartialEq)]
pub struct UnionTypeDefinition {
    pub description: Option<StringValue>,
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub members: Vec<Name>,
    pub span: SourceSpan,
}

/// `enum Name { A B }`
#[derive(Clone, Debug, PartialEq)]
pub struct EnumTypeDefinition {
    pub description: Option<StringValue>,
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub values: Vec<EnumValueDefinition>,
    pub span: SourceSpan,
}

/// One value of an enum definition.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValueDefinition {
    pub description: Option<StringValue>,
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: SourceSpan,
}

/// `input Name { fields… }`
#[derive(Clone, Debug, PartialEq)]
pub struct InputObjectTypeDefinition {
    pub description: Option<StringValue>,
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub fields: Vec<InputValueDefinition>,
    pub span: SourceSpan,
}

/// A field definition on an object or interface type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub description: Option<StringValue>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub field_type: TypeAnnotation,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: SourceSpan,
}

/// An input value definition: a field argument or an input-object field.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub description: Option<StringValue>,
    pub name: Name,
    pub value_type: TypeAnnotation,
    pub default_value: Option<Value>,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: SourceSpan,
}

/// A type extension of any kind. Extensions reuse the definition node of
/// the kind they extend; descriptions are not permitted on extensions and
/// stay `None`.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeExtension {
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Interface(InterfaceTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
}

impl TypeExtension {
    pub fn name(&self) -> &Name {
        match self {
            TypeExtension::Scalar(def) => &def.name,
            TypeExtension::Object(def) => &def.name,
            TypeExtension::Interface(def) => &def.name,
            TypeExtension::Union(def) => &def.name,
            TypeExtension::Enum(def) => &def.name,
            TypeExtension::InputObject(def) => &def.name,
        }
    }

    pub fn span(&self) -> &SourceSpan {
        match self {
            TypeExtension::Scalar(def) => &def.span,
            TypeExtension::Object(def) => &def.span,
            TypeExtension::Interface(def) => &def.span,
            TypeExtension::Union(def) => &def.span,
            TypeExtension::Enum(def) => &def.span,
            TypeExtension::InputObject(def) => &def.span,
        }
    }
}

/// `directive @name(args…) repeatable on LOCATION | …`
///
/// `repeatable` is graphql-spec PR 472.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveDefinition {
    pub description: Option<StringValue>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
    pub span: SourceSpan,
}

/// The locations a directive may be applied to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DirectiveLocation {
    // Executable locations.
    Query,
    Mutation,
    Subscription,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    VariableDefinition,

    // Type-system locations.
    Schema,
    Scalar,
    Object,
    FieldDefinition,
    ArgumentDefinition,
    Interface,
    Union,
    Enum,
    EnumValue,
    InputObject,
    InputFieldDefinition,
}

impl DirectiveLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectiveLocation::Query => "QUERY",
            DirectiveLocation::Mutation => "MUTATION",
            DirectiveLocation::Subscription => "SUBSCRIPTION",
            DirectiveLocation::Field => "FIELD",
            DirectiveLocation::FragmentDefinition => "FRAGMENT_DEFINITION",
            DirectiveLocation::FragmentSpread => "FRAGMENT_SPREAD",
            DirectiveLocation::InlineFragment => "INLINE_FRAGMENT",
            DirectiveLocation::VariableDefinition => "VARIABLE_DEFINITION",
            DirectiveLocation::Schema => "SCHEMA",
            DirectiveLocation::Scalar => "SCALAR",
            DirectiveLocation::Object => "OBJECT",
            DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
            DirectiveLocation::ArgumentDefinition => "ARGUMENT_DEFINITION",
            DirectiveLocation::Interface => "INTERFACE",
            DirectiveLocation::Union => "UNION",
            DirectiveLocation::Enum => "ENUM",
            DirectiveLocation::EnumValue => "ENUM_VALUE",
            DirectiveLocation::InputObject => "INPUT_OBJECT",
            DirectiveLocation::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Some(match s {
            "QUERY" => DirectiveLocation::Query,
            "MUTATION" => DirectiveLocation::Mutation,
            "SUBSCRIPTION" => DirectiveLocation::Subscription,
            "FIELD" => DirectiveLocation::Field,
            "FRAGMENT_DEFINITION" => DirectiveLocation::FragmentDefinition,
            "FRAGMENT_SPREAD" => DirectiveLocation::FragmentSpread,
            "INLINE_FRAGMENT" => DirectiveLocation::InlineFragment,
            "VARIABLE_DEFINITION" => DirectiveLocation::VariableDefinition,
            "SCHEMA" => DirectiveLocation::Schema,
            "SCALAR" => DirectiveLocation::Scalar,
            "OBJECT" => DirectiveLocation::Object,
            "FIELD_DEFINITION" => DirectiveLocation::FieldDefinition,
            "ARGUMENT_DEFINITION" => DirectiveLocation::ArgumentDefinition,
            "INTERFACE" => DirectiveLocation::Interface,
            "UNION" => DirectiveLocation::Union,
            "ENUM" => DirectiveLocation::Enum,
            "ENUM_VALUE" => DirectiveLocation::EnumValue,
            "INPUT_OBJECT" => DirectiveLocation::InputObject,
            "INPUT_FIELD_DEFINITION" => DirectiveLocation::InputFieldDefinition,
            _ => return None,
        })
    }
}

impl std::fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
