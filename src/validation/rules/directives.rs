use crate::validation::rules::Rule;
use crate::validation::ValidationContext;
use libgql_parser::ast;
use libgql_parser::ast::DirectiveLocation;
use std::collections::HashSet;

/// Directives must be defined in the schema and legal at the location they
/// are applied to.
pub(crate) struct KnownDirectives;

impl<'a> Rule<'a> for KnownDirectives {
    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        directive: &'a ast::DirectiveAnnotation,
        location: DirectiveLocation,
    ) {
        let Some(directive_def) = ctx.schema.directive_by_name(directive.name.as_str())
        else {
            ctx.report(
                format!("unknown directive `@{}`", directive.name),
                &[&directive.name.span],
            );
            return;
        };
        if !directive_def.allows_location(location) {
            ctx.report(
                format!(
                    "directive `@{}` may not be applied at location {location}",
                    directive.name,
                ),
                &[&directive.span],
            );
        }
    }
}

/// A non-repeatable directive may appear at most once per location.
pub(crate) struct UniqueDirectivesPerLocation;

impl UniqueDirectivesPerLocation {
    fn check(ctx: &mut ValidationContext<'_>, directives: &[ast::DirectiveAnnotation]) {
        let mut seen: HashSet<&str> = HashSet::new();
        for directive in directives {
            let name = directive.name.as_str();
            let repeatable = ctx
                .schema
                .directive_by_name(name)
                .map(|def| def.repeatable)
                .unwrap_or(false);
            if repeatable {
                continue;
            }
            if !seen.insert(name) {
                ctx.report(
                    format!("directive `@{name}` may be applied here only once"),
                    &[&directive.span],
                );
            }
        }
    }
}

impl<'a> Rule<'a> for UniqueDirectivesPerLocation {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        Self::check(ctx, &operation.directives);
        for var_def in &operation.variable_definitions {
            Self::check(ctx, &var_def.directives);
        }
    }

    fn enter_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a ast::Field) {
        Self::check(ctx, &field.directives);
    }

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        spread: &'a ast::FragmentSpread,
    ) {
        Self::check(ctx, &spread.directives);
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::InlineFragment,
    ) {
        Self::check(ctx, &fragment.directives);
    }

    fn enter_fragment_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        Self::check(ctx, &fragment.directives);
    }
}
