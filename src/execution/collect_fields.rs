//! The `collect_fields` algorithm: flattens a selection set against a
//! concrete object type into response-key groups, honoring `@skip`,
//! `@include`, and fragment type conditions. Groups preserve
//! first-occurrence order, which fixes response-key order.

use crate::schema::Schema;
use crate::types::ObjectType;
use crate::Value;
use indexmap::IndexMap;
use libgql_parser::ast;
use std::collections::HashMap;
use std::collections::HashSet;

pub(crate) type FieldGroups<'exec> = IndexMap<String, Vec<&'exec ast::Field>>;

/// Collects the response-key groups for one level. Several selection sets
/// may feed one level: a field selected more than once under the same
/// response key contributes all of its subselections.
pub(crate) fn collect_fields<'exec>(
    schema: &Schema,
    fragments: &HashMap<&'exec str, &'exec ast::FragmentDefinition>,
    variables: &IndexMap<String, Value>,
    object_type: &ObjectType,
    selection_sets: &[&'exec ast::SelectionSet],
) -> FieldGroups<'exec> {
    let mut groups = FieldGroups::new();
    let mut visited_fragments = HashSet::new();
    for selection_set in selection_sets {
        collect_into(
            schema,
            fragments,
            variables,
            object_type,
            selection_set,
            &mut groups,
            &mut visited_fragments,
        );
    }
    groups
}

fn collect_into<'exec>(
    schema: &Schema,
    fragments: &HashMap<&'exec str, &'exec ast::FragmentDefinition>,
    variables: &IndexMap<String, Value>,
    object_type: &ObjectType,
    selection_set: &'exec ast::SelectionSet,
    groups: &mut FieldGroups<'exec>,
    visited_fragments: &mut HashSet<&'exec str>,
) {
    for selection in &selection_set.selections {
        if !should_include(selection.directives(), variables) {
            continue;
        }

        match selection {
            ast::Selection::Field(field) => {
                groups
                    .entry(field.response_key().to_string())
                    .or_default()
                    .push(field);
            }

            ast::Selection::InlineFragment(fragment) => {
                let applies = fragment
                    .type_condition
                    .as_ref()
                    .map(|condition| {
                        type_condition_applies(schema, condition, object_type)
                    })
                    .unwrap_or(true);
                if applies {
                    collect_into(
                        schema,
                        fragments,
                        variables,
                        object_type,
                        &fragment.selection_set,
                        groups,
                        visited_fragments,
                    );
                }
            }

            ast::Selection::FragmentSpread(spread) => {
                // Each named fragment expands at most once per collection.
                if !visited_fragments.insert(spread.name.as_str()) {
                    continue;
                }
                let Some(fragment) = fragments.get(spread.name.as_str()) else {
                    continue;
                };
                if type_condition_applies(schema, &fragment.type_condition, object_type) {
                    collect_into(
                        schema,
                        fragments,
                        variables,
                        object_type,
                        &fragment.selection_set,
                        groups,
                        visited_fragments,
                    );
                }
            }
        }
    }
}

/// Whether a fragment with this type condition applies to the concrete
/// `object_type`. Collection always runs against a concrete type, so a
/// spread with an abstract condition applies exactly when the object is
/// one of its possible types.
fn type_condition_applies(
    schema: &Schema,
    condition: &ast::TypeCondition,
    object_type: &ObjectType,
) -> bool {
    let condition_name = condition.on_type.as_str();
    if condition_name == object_type.name {
        return true;
    }
    schema
        .type_by_name(condition_name)
        .is_some_and(|condition_type| {
            schema.is_possible_type(condition_type, &object_type.name)
        })
}

/// Evaluates `@skip`/`@include` on a selection. Both may reference
/// variables; validation guarantees the `if` arguments are booleans.
fn should_include(
    directives: &[ast::DirectiveAnnotation],
    variables: &IndexMap<String, Value>,
) -> bool {
    for directive in directives {
        match directive.name.as_str() {
            "skip" => {
                if condition_argument(directive, variables) == Some(true) {
                    return false;
                }
            }
            "include" => {
                if condition_argument(directive, variables) == Some(false) {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

fn condition_argument(
    directive: &ast::DirectiveAnnotation,
    variables: &IndexMap<String, Value>,
) -> Option<bool> {
    let argument = directive
        .arguments
        .iter()
        .find(|argument| argument.name.as_str() == "if")?;
    match &argument.value {
        ast::Value::Boolean(literal) => Some(literal.value),
        ast::Value::Variable(variable) => match variables.get(variable.name.as_str()) {
            Some(Value::Bool(value)) => Some(*value),
            _ => None,
        },
        _ => None,
    }
}
