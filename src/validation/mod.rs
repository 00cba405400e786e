//! Query validation: every specification-defined validity rule, enforced
//! against a schema before execution.
//!
//! One orchestrated pass walks the document while maintaining a type-info
//! tracker (current parent type, field definition, argument type); each
//! rule is a visitor over that shared context. Validation is pure: it
//! returns the full error list and is idempotent.

mod context;
mod rules;

pub use context::ValidationContext;
pub use context::ValidationError;

use crate::schema::Schema;
use libgql_parser::ast;
use libgql_parser::ast::DirectiveLocation;
use libgql_parser::ast::OperationKind;
use rules::Rule;

/// Options for [`validate_with_options`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ValidationOptions {
    /// When set, selection sets nested deeper than this fail validation.
    /// Off by default.
    pub max_depth: Option<usize>,
}

/// Validates `document` against `schema` with the default rule set.
pub fn validate(schema: &Schema, document: &ast::Document) -> Vec<ValidationError> {
    validate_with_options(schema, document, ValidationOptions::default())
}

pub fn validate_with_options(
    schema: &Schema,
    document: &ast::Document,
    options: ValidationOptions,
) -> Vec<ValidationError> {
    let mut ctx = ValidationContext::new(schema, document);
    let mut rule_set = rules::default_rules(options);
    walk_document(&mut ctx, &mut rule_set, document);
    let errors = ctx.into_errors();
    log::debug!("validated document: {} errors", errors.len());
    errors
}

/// A caller-supplied validation rule: anything that produces errors from a
/// schema and a document.
pub trait CustomValidator {
    fn validate(&self, schema: &Schema, document: &ast::Document) -> Vec<ValidationError>;
}

impl<F> CustomValidator for F
where
    F: Fn(&Schema, &ast::Document) -> Vec<ValidationError>,
{
    fn validate(&self, schema: &Schema, document: &ast::Document) -> Vec<ValidationError> {
        self(schema, document)
    }
}

/// Validates with the default rules plus `custom` validators; errors
/// concatenate in rule order.
pub fn validate_with(
    schema: &Schema,
    document: &ast::Document,
    options: ValidationOptions,
    custom: &[&dyn CustomValidator],
) -> Vec<ValidationError> {
    let mut errors = validate_with_options(schema, document, options);
    for validator in custom {
        errors.extend(validator.validate(schema, document));
    }
    errors
}

#[cfg(test)]
mod tests;

// =============================================================================
// The walker
// =============================================================================

type Rules<'a> = Vec<Box<dyn Rule<'a> + 'a>>;

fn walk_document<'a>(ctx: &mut ValidationContext<'a>, rules: &mut Rules<'a>, document: &'a ast::Document) {
    for rule in rules.iter_mut() {
        rule.enter_document(ctx, document);
    }

    for definition in &document.definitions {
        match definition {
            ast::Definition::Operation(operation) => {
                walk_operation(ctx, rules, operation);
            }
            ast::Definition::Fragment(fragment) => {
                walk_fragment_definition(ctx, rules, fragment);
            }
            // Non-executable definitions are rejected wholesale by the
            // executable-definitions rule in enter_document.
            _ => {}
        }
    }

    for rule in rules.iter_mut() {
        rule.leave_document(ctx, document);
    }
}

fn walk_operation<'a>(
    ctx: &mut ValidationContext<'a>,
    rules: &mut Rules<'a>,
    operation: &'a ast::OperationDefinition,
) {
    let root_type = ctx
        .schema
        .root_type(operation.kind)
        .and_then(|object| ctx.schema.type_by_name(&object.name));

    for rule in rules.iter_mut() {
        rule.enter_operation(ctx, operation);
    }

    for var_def in &operation.variable_definitions {
        for rule in rules.iter_mut() {
            rule.enter_variable_definition(ctx, var_def);
        }
        walk_directives(ctx, rules, &var_def.directives, DirectiveLocation::VariableDefinition);
    }

    let location = match operation.kind {
        OperationKind::Query => DirectiveLocation::Query,
        OperationKind::Mutation => DirectiveLocation::Mutation,
        OperationKind::Subscription => DirectiveLocation::Subscription,
    };
    walk_directives(ctx, rules, &operation.directives, location);

    ctx.push_parent_type(root_type);
    walk_selection_set(ctx, rules, &operation.selection_set);
    ctx.pop_parent_type();

    for rule in rules.iter_mut() {
        rule.leave_operation(ctx, operation);
    }
}

fn walk_fragment_definition<'a>(
    ctx: &mut ValidationContext<'a>,
    rules: &mut Rules<'a>,
    fragment: &'a ast::FragmentDefinition,
) {
    for rule in rules.iter_mut() {
        rule.enter_fragment_definition(ctx, fragment);
    }

    walk_directives(ctx, rules, &fragment.directives, DirectiveLocation::FragmentDefinition);

    let condition_type = ctx
        .schema
        .type_by_name(fragment.type_condition.on_type.as_str());
    ctx.push_parent_type(condition_type);
    walk_selection_set(ctx, rules, &fragment.selection_set);
    ctx.pop_parent_type();

    for rule in rules.iter_mut() {
        rule.leave_fragment_definition(ctx, fragment);
    }
}

fn walk_selection_set<'a>(
    ctx: &mut ValidationContext<'a>,
    rules: &mut Rules<'a>,
    selection_set: &'a ast::SelectionSet,
) {
    for rule in rules.iter_mut() {
        rule.enter_selection_set(ctx, selection_set);
    }

    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => walk_field(ctx, rules, field),

            ast::Selection::FragmentSpread(spread) => {
                for rule in rules.iter_mut() {
                    rule.enter_fragment_spread(ctx, spread);
                }
                walk_directives(ctx, rules, &spread.directives, DirectiveLocation::FragmentSpread);
            }

            ast::Selection::InlineFragment(fragment) => {
                for rule in rules.iter_mut() {
                    rule.enter_inline_fragment(ctx, fragment);
                }
                walk_directives(
                    ctx,
                    rules,
                    &fragment.directives,
                    DirectiveLocation::InlineFragment,
                );

                let new_parent = match &fragment.type_condition {
                    Some(condition) => {
                        ctx.schema.type_by_name(condition.on_type.as_str())
                    }
                    None => ctx.parent_type(),
                };
                ctx.push_parent_type(new_parent);
                walk_selection_set(ctx, rules, &fragment.selection_set);
                ctx.pop_parent_type();

                for rule in rules.iter_mut() {
                    rule.leave_inline_fragment(ctx, fragment);
                }
            }
        }
    }

    for rule in rules.iter_mut() {
        rule.leave_selection_set(ctx, selection_set);
    }
}

fn walk_field<'a>(
    ctx: &mut ValidationContext<'a>,
    rules: &mut Rules<'a>,
    field: &'a ast::Field,
) {
    let field_def = ctx
        .parent_type()
        .and_then(|parent| parent.field(field.name.as_str()));
    ctx.push_field_def(field_def);

    for rule in rules.iter_mut() {
        rule.enter_field(ctx, field);
    }

    for argument in &field.arguments {
        let arg_type = field_def
            .and_then(|def| def.argument(argument.name.as_str()))
            .map(|arg_def| arg_def.type_ref.clone());
        ctx.push_input_type(arg_type);
        for rule in rules.iter_mut() {
            rule.enter_argument(ctx, argument);
        }
        ctx.pop_input_type();
    }

    walk_directives(ctx, rules, &field.directives, DirectiveLocation::Field);

    if let Some(selection_set) = &field.selection_set {
        let child_parent = field_def.and_then(|def| {
            let inner = def.type_ref.innermost_type(ctx.schema)?;
            inner.is_composite().then_some(inner)
        });
        ctx.push_parent_type(child_parent);
        walk_selection_set(ctx, rules, selection_set);
        ctx.pop_parent_type();
    }

    for rule in rules.iter_mut() {
        rule.leave_field(ctx, field);
    }
    ctx.pop_field_def();
}

fn walk_directives<'a>(
    ctx: &mut ValidationContext<'a>,
    rules: &mut Rules<'a>,
    directives: &'a [ast::DirectiveAnnotation],
    location: DirectiveLocation,
) {
    for directive in directives {
        let directive_def = ctx.schema.directive_by_name(directive.name.as_str());
        ctx.set_directive_context(Some((directive, directive_def)));

        for rule in rules.iter_mut() {
            rule.enter_directive(ctx, directive, location);
        }

        for argument in &directive.arguments {
            let arg_type = directive_def
                .and_then(|def| def.arguments.get(argument.name.as_str()))
                .map(|arg_def| arg_def.type_ref.clone());
            ctx.push_input_type(arg_type);
            for rule in rules.iter_mut() {
                rule.enter_argument(ctx, argument);
            }
            ctx.pop_input_type();
        }

        ctx.set_directive_context(None);
    }
}
