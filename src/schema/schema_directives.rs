//! Schema-directive application: build-time hooks invoked for every SDL
//! directive application that has a registered implementation.

use crate::schema::SchemaBuildError;
use crate::types::EnumValue;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputValue;
use crate::types::InterfaceType;
use crate::types::ObjectType;
use crate::types::ScalarType;
use crate::types::UnionType;
use crate::types::EnumType;
use crate::types::InputObjectType;
use crate::Value;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SchemaBuildError>;
type Args = IndexMap<String, Value>;

/// The outcome of a schema-directive hook: keep the (possibly modified)
/// element, or remove it from the schema.
pub enum DirectiveOutcome<T> {
    Keep(T),
    Remove,
}

/// Build-time hooks for one schema directive.
///
/// Each hook receives the directive's argument values (as written in the
/// SDL) and owns the element it runs on; returning
/// [`DirectiveOutcome::Keep`] with a modified element rewrites the schema,
/// and [`DirectiveOutcome::Remove`] drops the element with transitive
/// removal of dangling references. Hooks default to keeping the element
/// untouched. Repeatable directives invoke their hook once per
/// application, in source order.
#[allow(unused_variables)]
pub trait SchemaDirective: Send + Sync {
    fn on_schema(&self, args: &Args) {}

    fn on_scalar(&self, args: &Args, scalar: ScalarType) -> DirectiveOutcome<ScalarType> {
        DirectiveOutcome::Keep(scalar)
    }

    fn on_object(&self, args: &Args, object: ObjectType) -> DirectiveOutcome<ObjectType> {
        DirectiveOutcome::Keep(object)
    }

    fn on_interface(
        &self,
        args: &Args,
        interface: InterfaceType,
    ) -> DirectiveOutcome<InterfaceType> {
        DirectiveOutcome::Keep(interface)
    }

    fn on_union(&self, args: &Args, union_type: UnionType) -> DirectiveOutcome<UnionType> {
        DirectiveOutcome::Keep(union_type)
    }

    fn on_enum(&self, args: &Args, enum_type: EnumType) -> DirectiveOutcome<EnumType> {
        DirectiveOutcome::Keep(enum_type)
    }

    fn on_enum_value(&self, args: &Args, value: EnumValue) -> DirectiveOutcome<EnumValue> {
        DirectiveOutcome::Keep(value)
    }

    fn on_input_object(
        &self,
        args: &Args,
        input_object: InputObjectType,
    ) -> DirectiveOutcome<InputObjectType> {
        DirectiveOutcome::Keep(input_object)
    }

    fn on_field(&self, args: &Args, field: Field) -> DirectiveOutcome<Field> {
        DirectiveOutcome::Keep(field)
    }

    fn on_argument(&self, args: &Args, argument: InputValue) -> DirectiveOutcome<InputValue> {
        DirectiveOutcome::Keep(argument)
    }

    fn on_input_field(&self, args: &Args, field: InputValue) -> DirectiveOutcome<InputValue> {
        DirectiveOutcome::Keep(field)
    }
}

type Impls = HashMap<String, Arc<dyn SchemaDirective>>;

/// Applies registered schema directives to every annotated element, in
/// declaration order, then prunes references to anything removed.
pub(crate) fn apply_schema_directives(
    types: &mut HashMap<String, GraphQLType>,
    type_order: &mut Vec<String>,
    impls: &Impls,
    schema_annotations: &[crate::types::DirectiveAnnotation],
) -> Result<()> {
    if impls.is_empty() {
        return Ok(());
    }

    for annotation in schema_annotations {
        if let Some(implementation) = impls.get(annotation.directive_name()) {
            implementation.on_schema(annotation.args());
        }
    }

    let mut removed_types: HashSet<String> = HashSet::new();

    for type_name in type_order.iter() {
        let Some(type_) = types.remove(type_name) else {
            continue;
        };
        match apply_to_type(type_, impls) {
            Some(kept) => {
                types.insert(type_name.clone(), kept);
            }
            None => {
                log::debug!("schema directive removed type `{type_name}`");
                removed_types.insert(type_name.clone());
            }
        }
    }
    type_order.retain(|name| !removed_types.contains(name));

    prune_dangling_references(types, type_order, removed_types);
    Ok(())
}

/// Runs all hooks for one type. Returns `None` when a hook removed it.
fn apply_to_type(type_: GraphQLType, impls: &Impls) -> Option<GraphQLType> {
    match type_ {
        GraphQLType::Scalar(mut scalar) => {
            for annotation in scalar.directives.clone() {
                let Some(implementation) = impls.get(annotation.directive_name()) else {
                    continue;
                };
                match implementation.on_scalar(annotation.args(), scalar) {
                    DirectiveOutcome::Keep(kept) => scalar = kept,
                    DirectiveOutcome::Remove => return None,
                }
            }
            Some(GraphQLType::Scalar(scalar))
        }

        GraphQLType::Object(mut object) => {
            for annotation in object.directives.clone() {
                let Some(implementation) = impls.get(annotation.directive_name()) else {
                    continue;
                };
                match implementation.on_object(annotation.args(), object) {
                    DirectiveOutcome::Keep(kept) => object = kept,
                    DirectiveOutcome::Remove => return None,
                }
            }
            object.fields = apply_to_fields(object.fields, impls);
            Some(GraphQLType::Object(object))
        }

        GraphQLType::Interface(mut interface) => {
            for annotation in interface.directives.clone() {
                let Some(implementation) = impls.get(annotation.directive_name()) else {
                    continue;
                };
                match implementation.on_interface(annotation.args(), interface) {
                    DirectiveOutcome::Keep(kept) => interface = kept,
                    DirectiveOutcome::Remove => return None,
                }
            }
            interface.fields = apply_to_fields(interface.fields, impls);
            Some(GraphQLType::Interface(interface))
        }

        GraphQLType::Union(mut union_type) => {
            for annotation in union_type.directives.clone() {
                let Some(implementation) = impls.get(annotation.directive_name()) else {
                    continue;
                };
                match implementation.on_union(annotation.args(), union_type) {
                    DirectiveOutcome::Keep(kept) => union_type = kept,
                    DirectiveOutcome::Remove => return None,
                }
            }
            Some(GraphQLType::Union(union_type))
        }

        GraphQLType::Enum(mut enum_type) => {
            for annotation in enum_type.directives.clone() {
                let Some(implementation) = impls.get(annotation.directive_name()) else {
                    continue;
                };
                match implementation.on_enum(annotation.args(), enum_type) {
                    DirectiveOutcome::Keep(kept) => enum_type = kept,
                    DirectiveOutcome::Remove => return None,
                }
            }
            let values = std::mem::take(&mut enum_type.values);
            'values: for (name, mut value) in values {
                for annotation in value.directives.clone() {
                    let Some(implementation) = impls.get(annotation.directive_name()) else {
                        continue;
                    };
                    match implementation.on_enum_value(annotation.args(), value) {
                        DirectiveOutcome::Keep(kept) => value = kept,
                        DirectiveOutcome::Remove => continue 'values,
                    }
                }
                enum_type.values.insert(name, value);
            }
            Some(GraphQLType::Enum(enum_type))
        }

        GraphQLType::InputObject(mut input_object) => {
            for annotation in input_object.directives.clone() {
                let Some(implementation) = impls.get(annotation.directive_name()) else {
                    continue;
                };
                match implementation.on_input_object(annotation.args(), input_object) {
                    DirectiveOutcome::Keep(kept) => input_object = kept,
                    DirectiveOutcome::Remove => return None,
                }
            }
            input_object.fields =
                apply_to_input_values(input_object.fields, impls, InputPosition::InputField);
            Some(GraphQLType::InputObject(input_object))
        }
    }
}

fn apply_to_fields(fields: IndexMap<String, Field>, impls: &Impls) -> IndexMap<String, Field> {
    let mut kept_fields = IndexMap::with_capacity(fields.len());
    'fields: for (name, mut field) in fields {
        for annotation in field.directives.clone() {
            let Some(implementation) = impls.get(annotation.directive_name()) else {
                continue;
            };
            match implementation.on_field(annotation.args(), field) {
                DirectiveOutcome::Keep(kept) => field = kept,
                DirectiveOutcome::Remove => continue 'fields,
            }
        }
        field.arguments =
            apply_to_input_values(field.arguments, impls, InputPosition::Argument);
        kept_fields.insert(name, field);
    }
    kept_fields
}

#[derive(Clone, Copy)]
enum InputPosition {
    Argument,
    InputField,
}

fn apply_to_input_values(
    values: IndexMap<String, InputValue>,
    impls: &Impls,
    position: InputPosition,
) -> IndexMap<String, InputValue> {
    let mut kept_values = IndexMap::with_capacity(values.len());
    'values: for (name, mut value) in values {
        for annotation in value.directives.clone() {
            let Some(implementation) = impls.get(annotation.directive_name()) else {
                continue;
            };
            let outcome = match position {
                InputPosition::Argument => implementation.on_argument(annotation.args(), value),
                InputPosition::InputField => {
                    implementation.on_input_field(annotation.args(), value)
                }
            };
            match outcome {
                DirectiveOutcome::Keep(kept) => value = kept,
                DirectiveOutcome::Remove => continue 'values,
            }
        }
        kept_values.insert(name, value);
    }
    kept_values
}

/// Removes references to removed types: fields and input fields typed by
/// them, arguments typed by them, union members, and `implements` entries.
/// A union left with no members cascades into removal itself.
fn prune_dangling_references(
    types: &mut HashMap<String, GraphQLType>,
    type_order: &mut Vec<String>,
    mut removed: HashSet<String>,
) {
    while !removed.is_empty() {
        let mut next_removed: HashSet<String> = HashSet::new();

        for type_ in types.values_mut() {
            match type_ {
                GraphQLType::Object(object) => {
                    object
                        .fields
                        .retain(|_, field| !removed.contains(field.type_ref.innermost_name()));
                    for field in object.fields.values_mut() {
                        field.arguments.retain(|_, argument| {
                            !removed.contains(argument.type_ref.innermost_name())
                        });
                    }
                    object.interfaces.retain(|name| !removed.contains(name));
                }
                GraphQLType::Interface(interface) => {
                    interface
                        .fields
                        .retain(|_, field| !removed.contains(field.type_ref.innermost_name()));
                    for field in interface.fields.values_mut() {
                        field.arguments.retain(|_, argument| {
                            !removed.contains(argument.type_ref.innermost_name())
                        });
                    }
                    interface.interfaces.retain(|name| !removed.contains(name));
                }
                GraphQLType::Union(union_type) => {
                    union_type.members.retain(|name| !removed.contains(name));
                    if union_type.members.is_empty() {
                        next_removed.insert(union_type.name.clone());
                    }
                }
                GraphQLType::InputObject(input_object) => {
                    input_object.fields.retain(|_, field| {
                        !removed.contains(field.type_ref.innermost_name())
                    });
                }
                GraphQLType::Scalar(_) | GraphQLType::Enum(_) => {}
            }
        }

        for name in &next_removed {
            types.remove(name);
        }
        type_order.retain(|name| !next_removed.contains(name));
        removed = next_removed;
    }
}
