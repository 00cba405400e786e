use crate::validation::rules::Rule;
use crate::validation::ValidationContext;
use libgql_parser::ast;
use libgql_parser::ast::OperationKind;
use libgql_parser::SourceSpan;
use std::collections::HashMap;
use std::collections::HashSet;

/// Documents submitted for execution may contain only operations and
/// fragments.
pub(crate) struct ExecutableDefinitions;

impl<'a> Rule<'a> for ExecutableDefinitions {
    fn enter_document(&mut self, ctx: &mut ValidationContext<'a>, document: &'a ast::Document) {
        for definition in &document.definitions {
            if !definition.is_executable() {
                ctx.report(
                    "a document submitted for execution may contain only \
                     executable definitions",
                    &[definition.span()],
                );
            }
        }
    }
}

/// Named operations must be uniquely named.
#[derive(Default)]
pub(crate) struct UniqueOperationNames<'a> {
    seen: HashMap<&'a str, &'a SourceSpan>,
}

impl<'a> Rule<'a> for UniqueOperationNames<'a> {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        let Some(name) = &operation.name else { return };
        if let Some(first) = self.seen.get(name.as_str()).copied() {
            ctx.report(
                format!("there can be only one operation named `{name}`"),
                &[first, &name.span],
            );
        } else {
            self.seen.insert(name.as_str(), &name.span);
        }
    }
}

/// An anonymous operation must be the only operation in the document.
#[derive(Default)]
pub(crate) struct LoneAnonymousOperation {
    operation_count: usize,
}

impl<'a> Rule<'a> for LoneAnonymousOperation {
    fn enter_document(&mut self, _ctx: &mut ValidationContext<'a>, document: &'a ast::Document) {
        self.operation_count = document.operations().count();
    }

    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        if operation.name.is_none() && self.operation_count > 1 {
            ctx.report(
                "an anonymous operation must be the only defined operation",
                &[&operation.span],
            );
        }
    }
}

/// Subscription operations must select exactly one top-level field (after
/// fragment expansion).
pub(crate) struct SingleFieldSubscriptions;

impl<'a> Rule<'a> for SingleFieldSubscriptions {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        if operation.kind != OperationKind::Subscription {
            return;
        }
        let mut response_keys: HashSet<&str> = HashSet::new();
        let mut visited: HashSet<&str> = HashSet::new();
        count_root_fields(ctx, &operation.selection_set, &mut response_keys, &mut visited);
        if response_keys.len() != 1 {
            let name = operation
                .name
                .as_ref()
                .map(|name| format!("subscription `{name}`"))
                .unwrap_or_else(|| "anonymous subscription".to_string());
            ctx.report(
                format!("{name} must select exactly one top-level field"),
                &[&operation.span],
            );
        }
    }
}

fn count_root_fields<'a>(
    ctx: &ValidationContext<'a>,
    selection_set: &'a ast::SelectionSet,
    response_keys: &mut HashSet<&'a str>,
    visited: &mut HashSet<&'a str>,
) {
    for selection in &selection_set.selections {
        match selection {
            ast::Selection::Field(field) => {
                response_keys.insert(field.response_key());
            }
            ast::Selection::InlineFragment(fragment) => {
                count_root_fields(ctx, &fragment.selection_set, response_keys, visited);
            }
            ast::Selection::FragmentSpread(spread) => {
                if visited.insert(spread.name.as_str()) {
                    if let Some(fragment) = ctx.fragments.get(spread.name.as_str()) {
                        count_root_fields(
                            ctx,
                            &fragment.selection_set,
                            response_keys,
                            visited,
                        );
                    }
                }
            }
        }
    }
}
