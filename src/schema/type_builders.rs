//! Per-kind construction of schema types from SDL AST definitions.

use crate::loc::DefLocation;
use crate::scalars::ScalarImpl;
use crate::schema::SchemaBuildError;
use crate::types::DeprecationState;
use crate::types::DirectiveAnnotation;
use crate::types::EnumType;
use crate::types::EnumValue;
use crate::types::Field;
use crate::types::InputObjectType;
use crate::types::InputValue;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::TypeRef;
use crate::types::UnionType;
use crate::Value;
use indexmap::IndexMap;
use libgql_parser::ast;

type Result<T> = std::result::Result<T, SchemaBuildError>;

/// Name policy for a build pass. The introspection types are built through
/// the same functions but are allowed their `__` prefix.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NamePolicy {
    RejectDunder,
    AllowDunder,
}

fn check_type_name(name: &ast::Name, policy: NamePolicy) -> Result<()> {
    if policy == NamePolicy::RejectDunder && name.as_str().starts_with("__") {
        return Err(SchemaBuildError::InvalidDunderPrefixedTypeName {
            def_location: DefLocation::from(&name.span),
            type_name: name.as_str().to_string(),
        });
    }
    Ok(())
}

fn description_of(description: &Option<ast::StringValue>) -> Option<String> {
    description.as_ref().map(|s| s.value.clone())
}

/// Reads a `@deprecated(reason)` annotation into a [`DeprecationState`].
fn deprecation_of(directives: &[DirectiveAnnotation]) -> DeprecationState {
    for annotation in directives {
        if annotation.directive_name() == "deprecated" {
            let reason = match annotation.args().get("reason") {
                Some(Value::String(reason)) => Some(reason.clone()),
                _ => Some("No longer supported".to_string()),
            };
            return DeprecationState::Deprecated(reason);
        }
    }
    DeprecationState::NotDeprecated
}

pub(crate) fn build_object_type(
    def: &ast::ObjectTypeDefinition,
    policy: NamePolicy,
) -> Result<ObjectType> {
    check_type_name(&def.name, policy)?;
    Ok(ObjectType {
        name: def.name.as_str().to_string(),
        description: description_of(&def.description),
        def_location: DefLocation::from(&def.name.span),
        interfaces: check_unique_interfaces(def.name.as_str(), &def.interfaces)?,
        directives: DirectiveAnnotation::from_ast(&def.directives),
        fields: build_fields(def.name.as_str(), &def.fields, policy)?,
    })
}

pub(crate) fn build_interface_type(
    def: &ast::InterfaceTypeDefinition,
    policy: NamePolicy,
) -> Result<InterfaceType> {
    check_type_name(&def.name, policy)?;
    if def.interfaces.iter().any(|i| i.as_str() == def.name.as_str()) {
        return Err(SchemaBuildError::SelfImplementingInterface {
            def_location: DefLocation::from(&def.name.span),
            interface_name: def.name.as_str().to_string(),
        });
    }
    Ok(InterfaceType {
        name: def.name.as_str().to_string(),
        description: description_of(&def.description),
        def_location: DefLocation::from(&def.name.span),
        interfaces: check_unique_interfaces(def.name.as_str(), &def.interfaces)?,
        directives: DirectiveAnnotation::from_ast(&def.directives),
        fields: build_fields(def.name.as_str(), &def.fields, policy)?,
        resolve_type: None,
    })
}

fn check_unique_interfaces(
    type_name: &str,
    interfaces: &[ast::Name],
) -> Result<Vec<String>> {
    let mut seen: Vec<String> = vec![];
    for interface in interfaces {
        if seen.iter().any(|name| name == interface.as_str()) {
            return Err(SchemaBuildError::DuplicateInterfaceImplementsDeclaration {
                def_location: DefLocation::from(&interface.span),
                interface_name: interface.as_str().to_string(),
                type_name: type_name.to_string(),
            });
        }
        seen.push(interface.as_str().to_string());
    }
    Ok(seen)
}

/// Builds the field map of an object or interface type, injecting the
/// implicit `__typename: String!` meta field.
fn build_fields(
    type_name: &str,
    fields: &[ast::FieldDefinition],
    policy: NamePolicy,
) -> Result<IndexMap<String, Field>> {
    let mut field_map = IndexMap::new();
    field_map.insert(
        "__typename".to_string(),
        Field {
            name: "__typename".to_string(),
            description: None,
            def_location: DefLocation::Builtin,
            type_ref: TypeRef::named("String", false, DefLocation::Builtin),
            arguments: IndexMap::new(),
            directives: vec![],
            deprecation: DeprecationState::NotDeprecated,
            resolver_name: None,
            resolver: None,
            subscription_resolver: None,
        },
    );

    for field_def in fields {
        // https://spec.graphql.org/June2018/#sec-Objects (field names must
        // not begin with two underscores)
        if policy == NamePolicy::RejectDunder && field_def.name.as_str().starts_with("__") {
            return Err(SchemaBuildError::InvalidDunderPrefixedFieldName {
                def_location: DefLocation::from(&field_def.name.span),
                field_name: field_def.name.as_str().to_string(),
                type_name: type_name.to_string(),
            });
        }

        let field = build_field(type_name, field_def, policy)?;
        if let Some(existing) = field_map.insert(field_def.name.as_str().to_string(), field) {
            return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                type_name: type_name.to_string(),
                field_name: field_def.name.as_str().to_string(),
                field_def1: existing.def_location.clone(),
                field_def2: DefLocation::from(&field_def.name.span),
            });
        }
    }
    Ok(field_map)
}

pub(crate) fn build_field(
    type_name: &str,
    def: &ast::FieldDefinition,
    policy: NamePolicy,
) -> Result<Field> {
    let mut arguments = IndexMap::new();
    for arg_def in &def.arguments {
        if policy == NamePolicy::RejectDunder && arg_def.name.as_str().starts_with("__") {
            return Err(SchemaBuildError::InvalidDunderPrefixedArgumentName {
                def_location: DefLocation::from(&arg_def.name.span),
                field_name: def.name.as_str().to_string(),
                argument_name: arg_def.name.as_str().to_string(),
                type_name: type_name.to_string(),
            });
        }
        let argument = build_input_value(arg_def)?;
        if arguments
            .insert(arg_def.name.as_str().to_string(), argument)
            .is_some()
        {
            return Err(SchemaBuildError::DuplicateArgumentDefinition {
                def_location: DefLocation::from(&arg_def.name.span),
                field_name: def.name.as_str().to_string(),
                argument_name: arg_def.name.as_str().to_string(),
                type_name: type_name.to_string(),
            });
        }
    }

    let directives = DirectiveAnnotation::from_ast(&def.directives);
    let deprecation = deprecation_of(&directives);
    Ok(Field {
        name: def.name.as_str().to_string(),
        description: description_of(&def.description),
        def_location: DefLocation::from(&def.name.span),
        type_ref: TypeRef::from_ast(&def.field_type),
        arguments,
        directives,
        deprecation,
        resolver_name: None,
        resolver: None,
        subscription_resolver: None,
    })
}

pub(crate) fn build_input_value(def: &ast::InputValueDefinition) -> Result<InputValue> {
    let directives = DirectiveAnnotation::from_ast(&def.directives);
    let deprecation = deprecation_of(&directives);
    Ok(InputValue {
        name: def.name.as_str().to_string(),
        description: description_of(&def.description),
        def_location: DefLocation::from(&def.name.span),
        type_ref: TypeRef::from_ast(&def.value_type),
        default_value: def.default_value.as_ref().and_then(Value::from_const_ast),
        directives,
        deprecation,
        resolver_name: None,
    })
}

pub(crate) fn build_union_type(
    def: &ast::UnionTypeDefinition,
    policy: NamePolicy,
) -> Result<UnionType> {
    check_type_name(&def.name, policy)?;
    let mut members: Vec<String> = vec![];
    for member in &def.members {
        if members.iter().any(|name| name == member.as_str()) {
            return Err(SchemaBuildError::DuplicateUnionMember {
                type_name: def.name.as_str().to_string(),
                member_name: member.as_str().to_string(),
                def_location: DefLocation::from(&member.span),
            });
        }
        members.push(member.as_str().to_string());
    }
    Ok(UnionType {
        name: def.name.as_str().to_string(),
        description: description_of(&def.description),
        def_location: DefLocation::from(&def.name.span),
        directives: DirectiveAnnotation::from_ast(&def.directives),
        members,
        resolve_type: None,
    })
}

pub(crate) fn build_enum_type(
    def: &ast::EnumTypeDefinition,
    policy: NamePolicy,
) -> Result<EnumType> {
    check_type_name(&def.name, policy)?;
    let mut values = IndexMap::new();
    for value_def in &def.values {
        let directives = DirectiveAnnotation::from_ast(&value_def.directives);
        let deprecation = deprecation_of(&directives);
        let value = EnumValue {
            name: value_def.name.as_str().to_string(),
            description: description_of(&value_def.description),
            def_location: DefLocation::from(&value_def.name.span),
            directives,
            deprecation,
        };
        if let Some(existing) = values.insert(value_def.name.as_str().to_string(), value) {
            return Err(SchemaBuildError::DuplicateEnumValueDefinition {
                enum_name: def.name.as_str().to_string(),
                value_name: value_def.name.as_str().to_string(),
                value_def1: existing.def_location.clone(),
                value_def2: DefLocation::from(&value_def.name.span),
            });
        }
    }
    Ok(EnumType {
        name: def.name.as_str().to_string(),
        description: description_of(&def.description),
        def_location: DefLocation::from(&def.name.span),
        directives: DirectiveAnnotation::from_ast(&def.directives),
        values,
    })
}

pub(crate) fn build_input_object_type(
    def: &ast::InputObjectTypeDefinition,
    policy: NamePolicy,
) -> Result<InputObjectType> {
    check_type_name(&def.name, policy)?;
    let mut fields = IndexMap::new();
    for field_def in &def.fields {
        if policy == NamePolicy::RejectDunder && field_def.name.as_str().starts_with("__") {
            return Err(SchemaBuildError::InvalidDunderPrefixedFieldName {
                def_location: DefLocation::from(&field_def.name.span),
                field_name: field_def.name.as_str().to_string(),
                type_name: def.name.as_str().to_string(),
            });
        }
        let field = build_input_value(field_def)?;
        if let Some(existing) = fields.insert(field_def.name.as_str().to_string(), field) {
            return Err(SchemaBuildError::DuplicateFieldNameDefinition {
                type_name: def.name.as_str().to_string(),
                field_name: field_def.name.as_str().to_string(),
                field_def1: existing.def_location.clone(),
                field_def2: DefLocation::from(&field_def.name.span),
            });
        }
    }
    Ok(InputObjectType {
        name: def.name.as_str().to_string(),
        description: description_of(&def.description),
        def_location: DefLocation::from(&def.name.span),
        directives: DirectiveAnnotation::from_ast(&def.directives),
        fields,
    })
}

pub(crate) fn build_scalar_type(
    def: &ast::ScalarTypeDefinition,
    implementation: ScalarImpl,
    policy: NamePolicy,
) -> Result<ScalarType> {
    check_type_name(&def.name, policy)?;
    Ok(ScalarType {
        name: def.name.as_str().to_string(),
        description: description_of(&def.description),
        def_location: DefLocation::from(&def.name.span),
        directives: DirectiveAnnotation::from_ast(&def.directives),
        implementation,
    })
}
