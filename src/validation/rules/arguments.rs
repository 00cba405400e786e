use crate::validation::rules::Rule;
use crate::validation::ValidationContext;
use libgql_parser::ast;
use libgql_parser::ast::DirectiveLocation;
use std::collections::HashSet;

/// Every supplied argument must be defined on the field or directive it is
/// passed to.
pub(crate) struct KnownArgumentNames;

impl<'a> Rule<'a> for KnownArgumentNames {
    fn enter_argument(&mut self, ctx: &mut ValidationContext<'a>, argument: &'a ast::Argument) {
        let arg_name = argument.name.as_str();

        if let Some((annotation, directive_def)) = ctx.directive_context() {
            let Some(directive_def) = directive_def else {
                // Unknown directive: reported by the known-directives rule.
                return;
            };
            if !directive_def.arguments.contains_key(arg_name) {
                ctx.report(
                    format!(
                        "unknown argument `{arg_name}` on directive `@{}`",
                        annotation.name,
                    ),
                    &[&argument.name.span],
                );
            }
            return;
        }

        if let Some(field_def) = ctx.field_def() {
            if field_def.argument(arg_name).is_none() {
                ctx.report(
                    format!(
                        "unknown argument `{arg_name}` on field `{}`",
                        field_def.name,
                    ),
                    &[&argument.name.span],
                );
            }
        }
    }
}

/// Argument names must be unique per field or directive application.
pub(crate) struct UniqueArgumentNames;

impl UniqueArgumentNames {
    fn check(ctx: &mut ValidationContext<'_>, arguments: &[ast::Argument]) {
        let mut seen: HashSet<&str> = HashSet::new();
        for argument in arguments {
            if !seen.insert(argument.name.as_str()) {
                ctx.report(
                    format!("duplicate argument `{}`", argument.name),
                    &[&argument.name.span],
                );
            }
        }
    }
}

impl<'a> Rule<'a> for UniqueArgumentNames {
    fn enter_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a ast::Field) {
        Self::check(ctx, &field.arguments);
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        directive: &'a ast::DirectiveAnnotation,
        _location: DirectiveLocation,
    ) {
        Self::check(ctx, &directive.arguments);
    }
}

/// Non-nullable arguments without defaults must be provided (with a
/// non-null value).
pub(crate) struct ProvidedRequiredArguments;

impl<'a> Rule<'a> for ProvidedRequiredArguments {
    fn leave_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a ast::Field) {
        let Some(field_def) = ctx.field_def() else {
            return;
        };
        for (arg_name, arg_def) in &field_def.arguments {
            if !arg_def.is_required() {
                continue;
            }
            let provided = field
                .arguments
                .iter()
                .any(|argument| argument.name.as_str() == arg_name);
            if !provided {
                ctx.report(
                    format!(
                        "field `{}` requires the argument `{arg_name}` of \
                         type `{}`",
                        field_def.name, arg_def.type_ref,
                    ),
                    &[&field.span],
                );
            }
        }
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        directive: &'a ast::DirectiveAnnotation,
        _location: DirectiveLocation,
    ) {
        let Some((_, Some(directive_def))) = ctx.directive_context() else {
            return;
        };
        for (arg_name, arg_def) in &directive_def.arguments {
            if !arg_def.is_required() {
                continue;
            }
            let provided = directive
                .arguments
                .iter()
                .any(|argument| argument.name.as_str() == arg_name);
            if !provided {
                ctx.report(
                    format!(
                        "directive `@{}` requires the argument `{arg_name}` \
                         of type `{}`",
                        directive.name, arg_def.type_ref,
                    ),
                    &[&directive.span],
                );
            }
        }
    }
}
