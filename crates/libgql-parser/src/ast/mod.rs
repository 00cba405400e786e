//! Typed AST for GraphQL documents.
//!
//! One struct per node kind, every node carrying a
//! [`SourceSpan`](crate::SourceSpan). Nodes are owned (`String`, not
//! borrowed slices), `Clone`, and structurally comparable with
//! `PartialEq`.
//!
//! The node set covers the June 2018 specification plus the widely adopted
//! amendments: schema descriptions, `interface … implements …`,
//! `repeatable` directive definitions, and directives on variable
//! definitions.

mod document;
mod executable;
mod name;
mod type_annotation;
mod type_system;
mod values;
pub mod visit;

pub use document::Definition;
pub use document::Document;
pub use executable::Argument;
pub use executable::DirectiveAnnotation;
pub use executable::Field;
pub use executable::FragmentDefinition;
pub use executable::FragmentSpread;
pub use executable::InlineFragment;
pub use executable::OperationDefinition;
pub use executable::OperationKind;
pub use executable::Selection;
pub use executable::SelectionSet;
pub use executable::TypeCondition;
pub use executable::VariableDefinition;
pub use name::Name;
pub use type_annotation::ListTypeAnnotation;
pub use type_annotation::NamedTypeAnnotation;
pub use type_annotation::TypeAnnotation;
pub use type_system::DirectiveDefinition;
pub use type_system::DirectiveLocation;
pub use type_system::EnumTypeDefinition;
pub use type_system::EnumValueDefinition;
pub use type_system::FieldDefinition;
pub use type_system::InputObjectTypeDefinition;
pub use type_system::InputValueDefinition;
pub use type_system::InterfaceTypeDefinition;
pub use type_system::ObjectTypeDefinition;
pub use type_system::RootOperationTypeDefinition;
pub use type_system::ScalarTypeDefinition;
pub use type_system::SchemaDefinition;
pub use type_system::SchemaExtension;
pub use type_system::TypeDefinition;
pub use type_system::TypeExtension;
pub use type_system::UnionTypeDefinition;
pub use values::BooleanValue;
pub use values::EnumValue;
pub use values::FloatValue;
pub use values::IntValue;
pub use values::ListValue;
pub use values::NullValue;
pub use values::ObjectField;
pub use values::ObjectValue;
pub use values::StringValue;
pub use values::Value;
pub use values::VariableValue;
