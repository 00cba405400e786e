//! The validation rule set. Each rule is a visitor over the shared
//! [`ValidationContext`]; rules are independent and composable.

mod arguments;
mod depth;
mod directives;
mod fields;
mod fragments;
mod operations;
mod values;
mod variables;

use crate::validation::ValidationContext;
use crate::validation::ValidationOptions;
use libgql_parser::ast;
use libgql_parser::ast::DirectiveLocation;

/// A validation rule. Every callback defaults to a no-op; rules implement
/// only the events they care about.
#[allow(unused_variables)]
pub(crate) trait Rule<'a> {
    fn enter_document(&mut self, ctx: &mut ValidationContext<'a>, document: &'a ast::Document) {}
    fn leave_document(&mut self, ctx: &mut ValidationContext<'a>, document: &'a ast::Document) {}

    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
    }
    fn leave_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        var_def: &'a ast::VariableDefinition,
    ) {
    }

    fn enter_selection_set(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        selection_set: &'a ast::SelectionSet,
    ) {
    }
    fn leave_selection_set(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        selection_set: &'a ast::SelectionSet,
    ) {
    }

    fn enter_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a ast::Field) {}
    fn leave_field(&mut self, ctx: &mut ValidationContext<'a>, field: &'a ast::Field) {}

    fn enter_fragment_spread(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        spread: &'a ast::FragmentSpread,
    ) {
    }

    fn enter_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::InlineFragment,
    ) {
    }
    fn leave_inline_fragment(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::InlineFragment,
    ) {
    }

    fn enter_fragment_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
    }
    fn leave_fragment_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
    }

    fn enter_directive(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        directive: &'a ast::DirectiveAnnotation,
        location: DirectiveLocation,
    ) {
    }

    fn enter_argument(&mut self, ctx: &mut ValidationContext<'a>, argument: &'a ast::Argument) {}
}

/// The default rule set, in reporting order.
pub(crate) fn default_rules<'a>(options: ValidationOptions) -> Vec<Box<dyn Rule<'a> + 'a>> {
    let mut rules: Vec<Box<dyn Rule<'a> + 'a>> = vec![
        Box::new(operations::ExecutableDefinitions),
        Box::new(operations::UniqueOperationNames::default()),
        Box::new(operations::LoneAnonymousOperation::default()),
        Box::new(operations::SingleFieldSubscriptions),
        Box::new(fields::KnownTypeNames),
        Box::new(fields::FieldsOnCorrectType),
        Box::new(fields::LeafFieldSelections),
        Box::new(fields::OverlappingFields::default()),
        Box::new(fragments::UniqueFragmentNames::default()),
        Box::new(fragments::KnownFragmentNames),
        Box::new(fragments::FragmentsOnCompositeTypes),
        Box::new(fragments::PossibleFragmentSpreads),
        Box::new(fragments::NoUnusedFragments::default()),
        Box::new(fragments::NoFragmentCycles),
        Box::new(arguments::KnownArgumentNames),
        Box::new(arguments::UniqueArgumentNames),
        Box::new(arguments::ProvidedRequiredArguments),
        Box::new(directives::KnownDirectives),
        Box::new(directives::UniqueDirectivesPerLocation),
        Box::new(variables::Variables::default()),
        Box::new(values::ValuesOfCorrectType),
    ];
    if let Some(max_depth) = options.max_depth {
        rules.push(Box::new(depth::MaxDepth::new(max_depth)));
    }
    rules
}
