use crate::types::GraphQLType;
use crate::validation::rules::Rule;
use crate::validation::ValidationContext;
use libgql_parser::ast;
use std::collections::HashMap;

/// Named types referenced by variable definitions and fragment conditions
/// must exist in the schema.
pub(crate) struct KnownTypeNames;

impl<'a> Rule<'a> for KnownTypeNames {
    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        var_def: &'a ast::VariableDefinition,
    ) {
        let name = var_def.var_type.innermost_name();
        if ctx.schema.type_by_name(name.as_str()).is_none() {
            ctx.report(
                format!("unknown type `{name}`"),
                &[&name.span],
            );
        }
    }

    fn enter_fragment_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        let name = &fragment.type_condition.on_type;
        if ctx.schema.type_by_name(name.as_str()).is_none() {
            ctx.report(format!("unknown type `{name}`"), &[&name.span]);
        }
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::InlineFragment,
    ) {
        if let Some(condition) = &fragment.type_condition {
            let name = &condition.on_type;
            if ctx.schema.type_by_name(name.as_str()).is_none() {
                ctx.report(format!("unknown type `{name}`"), &[&name.span]);
            }
        }
    }
}

/// Every selected field must be defined on the enclosing composite type.
/// On unions, only `__typename` is selectable directly.
pub(crate) struct FieldsOnCorrectType;

impl<'a> Rule<'a> for FieldsOnCorrectType {
    fn enter_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a ast::Field) {
        let Some(parent) = ctx.parent_type() else {
            return;
        };
        let field_name = field.name.as_str();

        match parent {
            GraphQLType::Union(union_type) => {
                if field_name != "__typename" {
                    ctx.report(
                        format!(
                            "cannot query field `{field_name}` on union \
                             `{}`; use a fragment on a member type",
                            union_type.name,
                        ),
                        &[&field.name.span],
                    );
                }
            }
            _ => {
                if ctx.field_def().is_none() && field_name != "__typename" {
                    ctx.report(
                        format!(
                            "cannot query field `{field_name}` on type `{}`",
                            parent.name(),
                        ),
                        &[&field.name.span],
                    );
                }
            }
        }
    }
}

/// Leaf-typed fields take no subselection; composite-typed fields require
/// one.
pub(crate) struct LeafFieldSelections;

impl<'a> Rule<'a> for LeafFieldSelections {
    fn enter_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a ast::Field) {
        let Some(field_def) = ctx.field_def() else {
            return;
        };
        let Some(inner) = field_def.type_ref.innermost_type(ctx.schema) else {
            return;
        };

        if inner.is_leaf() && field.selection_set.is_some() {
            ctx.report(
                format!(
                    "field `{}` of {} type `{}` must not have a subselection",
                    field.name.as_str(),
                    inner.kind_name(),
                    inner.name(),
                ),
                &[&field.span],
            );
        }
        if inner.is_composite() && field.selection_set.is_none() {
            ctx.report(
                format!(
                    "field `{}` of {} type `{}` must have a subselection",
                    field.name.as_str(),
                    inner.kind_name(),
                    inner.name(),
                ),
                &[&field.span],
            );
        }
    }
}

/// Two selections for the same response key within one selection-set scope
/// must be mergeable: same field name, same arguments, and compatible
/// shape (both leaves or both composites).
#[derive(Default)]
pub(crate) struct OverlappingFields<'a> {
    scopes: Vec<HashMap<&'a str, &'a ast::Field>>,
}

impl<'a> Rule<'a> for OverlappingFields<'a> {
    fn enter_selection_set(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _selection_set: &'a ast::SelectionSet,
    ) {
        self.scopes.push(HashMap::new());
    }

    fn leave_selection_set(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _selection_set: &'a ast::SelectionSet,
    ) {
        self.scopes.pop();
    }

    fn enter_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a ast::Field) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        let response_key = field.response_key();

        let Some(existing) = scope.get(response_key) else {
            scope.insert(response_key, field);
            return;
        };

        if existing.name.as_str() != field.name.as_str() {
            ctx.report(
                format!(
                    "fields for response key `{response_key}` conflict: \
                     `{}` and `{}` cannot be merged",
                    existing.name.as_str(),
                    field.name.as_str(),
                ),
                &[&existing.span, &field.span],
            );
            return;
        }

        if !arguments_equal(&existing.arguments, &field.arguments) {
            ctx.report(
                format!(
                    "fields for response key `{response_key}` conflict: \
                     they have differing arguments"
                ),
                &[&existing.span, &field.span],
            );
        }

        if existing.selection_set.is_some() != field.selection_set.is_some() {
            ctx.report(
                format!(
                    "fields for response key `{response_key}` conflict: \
                     one has a subselection and the other does not"
                ),
                &[&existing.span, &field.span],
            );
        }
    }
}

fn arguments_equal(a: &[ast::Argument], b: &[ast::Argument]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|arg_a| {
        b.iter().any(|arg_b| {
            arg_a.name.as_str() == arg_b.name.as_str()
                && values_equal(&arg_a.value, &arg_b.value)
        })
    })
}

/// Structural value equality, ignoring source spans.
pub(crate) fn values_equal(a: &ast::Value, b: &ast::Value) -> bool {
    use ast::Value::*;
    match (a, b) {
        (Variable(a), Variable(b)) => a.name == b.name,
        (Int(a), Int(b)) => a.raw == b.raw,
        (Float(a), Float(b)) => a.raw == b.raw,
        (String(a), String(b)) => a.value == b.value,
        (Boolean(a), Boolean(b)) => a.value == b.value,
        (Null(_), Null(_)) => true,
        (Enum(a), Enum(b)) => a.value == b.value,
        (List(a), List(b)) => {
            a.values.len() == b.values.len()
                && a.values
                    .iter()
                    .zip(&b.values)
                    .all(|(a, b)| values_equal(a, b))
        }
        (Object(a), Object(b)) => {
            a.fields.len() == b.fields.len()
                && a.fields.iter().all(|field_a| {
                    b.fields.iter().any(|field_b| {
                        field_a.name.as_str() == field_b.name.as_str()
                            && values_equal(&field_a.value, &field_b.value)
                    })
                })
        }
        _ => false,
    }
}
