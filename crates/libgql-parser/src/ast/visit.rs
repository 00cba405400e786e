//! Traversal and transformation over GraphQL ASTs.
//!
//! [`Visitor`] is a read-only traversal: implement the `enter_*`/`leave_*`
//! callbacks you care about and hand the visitor to [`visit_document`].
//! Every callback defaults to a no-op, and `enter_*` callbacks return a
//! [`VisitFlow`] that can skip the current subtree or halt the whole
//! traversal. Nodes are visited in document order; children are visited
//! between their parent's `enter` and `leave` events.
//!
//! [`VisitorChain`] composes two visitors: `enter` events fan out in chain
//! order, `leave` events in reverse order, and the more severe flow result
//! wins.
//!
//! [`Rewriter`] is the transformation counterpart: it produces a new
//! document, replacing or removing selections and definitions where the
//! rewriter says so.

use crate::ast;

/// Flow control returned from `enter_*` callbacks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VisitFlow {
    /// Visit the node's children, then its `leave_*` callback.
    Continue,
    /// Skip the node's children (its `leave_*` callback still runs).
    SkipSubtree,
    /// Halt the entire traversal.
    Break,
}

impl VisitFlow {
    /// The more severe of two flows: `Break` > `SkipSubtree` > `Continue`.
    fn merge(self, other: VisitFlow) -> VisitFlow {
        use VisitFlow::*;
        match (self, other) {
            (Break, _) | (_, Break) => Break,
            (SkipSubtree, _) | (_, SkipSubtree) => SkipSubtree,
            _ => Continue,
        }
    }
}

/// A read-only AST visitor. All callbacks default to no-ops.
#[allow(unused_variables)]
pub trait Visitor {
    fn enter_document(&mut self, node: &ast::Document) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_document(&mut self, node: &ast::Document) {}

    fn enter_operation(&mut self, node: &ast::OperationDefinition) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_operation(&mut self, node: &ast::OperationDefinition) {}

    fn enter_variable_definition(&mut self, node: &ast::VariableDefinition) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_variable_definition(&mut self, node: &ast::VariableDefinition) {}

    fn enter_selection_set(&mut self, node: &ast::SelectionSet) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_selection_set(&mut self, node: &ast::SelectionSet) {}

    fn enter_field(&mut self, node: &ast::Field) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_field(&mut self, node: &ast::Field) {}

    fn enter_fragment_spread(&mut self, node: &ast::FragmentSpread) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_fragment_spread(&mut self, node: &ast::FragmentSpread) {}

    fn enter_inline_fragment(&mut self, node: &ast::InlineFragment) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_inline_fragment(&mut self, node: &ast::InlineFragment) {}

    fn enter_fragment_definition(&mut self, node: &ast::FragmentDefinition) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_fragment_definition(&mut self, node: &ast::FragmentDefinition) {}

    fn enter_directive(&mut self, node: &ast::DirectiveAnnotation) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_directive(&mut self, node: &ast::DirectiveAnnotation) {}

    fn enter_argument(&mut self, node: &ast::Argument) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_argument(&mut self, node: &ast::Argument) {}

    fn enter_value(&mut self, node: &ast::Value) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_value(&mut self, node: &ast::Value) {}

    fn enter_schema_definition(&mut self, node: &ast::SchemaDefinition) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_schema_definition(&mut self, node: &ast::SchemaDefinition) {}

    fn enter_type_definition(&mut self, node: &ast::TypeDefinition) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_type_definition(&mut self, node: &ast::TypeDefinition) {}

    fn enter_type_extension(&mut self, node: &ast::TypeExtension) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_type_extension(&mut self, node: &ast::TypeExtension) {}

    fn enter_directive_definition(&mut self, node: &ast::DirectiveDefinition) -> VisitFlow {
        VisitFlow::Continue
    }
    fn leave_directive_definition(&mut self, node: &ast::DirectiveDefinition) {}
}

// =============================================================================
// Walkers
// =============================================================================

macro_rules! guard {
    ($flow:expr) => {
        match $flow {
            VisitFlow::Break => return VisitFlow::Break,
            VisitFlow::SkipSubtree => false,
            VisitFlow::Continue => true,
        }
    };
}

/// Visits every node of `document` in document order.
pub fn visit_document(visitor: &mut impl Visitor, document: &ast::Document) -> VisitFlow {
    if guard!(visitor.enter_document(document)) {
        for definition in &document.definitions {
            match definition {
                ast::Definition::Operation(def) => {
                    if visit_operation(visitor, def) == VisitFlow::Break {
                        return VisitFlow::Break;
                    }
                }
                ast::Definition::Fragment(def) => {
                    if visit_fragment_definition(visitor, def) == VisitFlow::Break {
                        return VisitFlow::Break;
                    }
                }
                ast::Definition::Schema(def) => {
                    if guard!(visitor.enter_schema_definition(def)) {
                        if visit_directives(visitor, &def.directives) == VisitFlow::Break {
                            return VisitFlow::Break;
                        }
                    }
                    visitor.leave_schema_definition(def);
                }
                ast::Definition::SchemaExtension(_) => {}
                ast::Definition::Type(def) => {
                    if guard!(visitor.enter_type_definition(def)) {
                        if visit_type_definition_children(visitor, def) == VisitFlow::Break {
                            return VisitFlow::Break;
                        }
                    }
                    visitor.leave_type_definition(def);
                }
                ast::Definition::TypeExtension(def) => {
                    if visitor.enter_type_extension(def) == VisitFlow::Break {
                        return VisitFlow::Break;
                    }
                    visitor.leave_type_extension(def);
                }
                ast::Definition::Directive(def) => {
                    if visitor.enter_directive_definition(def) == VisitFlow::Break {
                        return VisitFlow::Break;
                    }
                    visitor.leave_directive_definition(def);
                }
            }
        }
    }
    visitor.leave_document(document);
    VisitFlow::Continue
}

pub fn visit_operation(
    visitor: &mut impl Visitor,
    operation: &ast::OperationDefinition,
) -> VisitFlow {
    if guard!(visitor.enter_operation(operation)) {
        for var_def in &operation.variable_definitions {
            if guard!(visitor.enter_variable_definition(var_def)) {
                if let Some(default) = &var_def.default_value {
                    if visit_value(visitor, default) == VisitFlow::Break {
                        return VisitFlow::Break;
                    }
                }
                if visit_directives(visitor, &var_def.directives) == VisitFlow::Break {
                    return VisitFlow::Break;
                }
            }
            visitor.leave_variable_definition(var_def);
        }
        if visit_directives(visitor, &operation.directives) == VisitFlow::Break {
            return VisitFlow::Break;
        }
        if visit_selection_set(visitor, &operation.selection_set) == VisitFlow::Break {
            return VisitFlow::Break;
        }
    }
    visitor.leave_operation(operation);
    VisitFlow::Continue
}

pub fn visit_fragment_definition(
    visitor: &mut impl Visitor,
    fragment: &ast::FragmentDefinition,
) -> VisitFlow {
    if guard!(visitor.enter_fragment_definition(fragment)) {
        if visit_directives(visitor, &fragment.directives) == VisitFlow::Break {
            return VisitFlow::Break;
        }
        if visit_selection_set(visitor, &fragment.selection_set) == VisitFlow::Break {
            return VisitFlow::Break;
        }
    }
    visitor.leave_fragment_definition(fragment);
    VisitFlow::Continue
}

pub fn visit_selection_set(
    visitor: &mut impl Visitor,
    selection_set: &ast::SelectionSet,
) -> VisitFlow {
    if guard!(visitor.enter_selection_set(selection_set)) {
        for selection in &selection_set.selections {
            let flow = match selection {
                ast::Selection::Field(field) => visit_field(visitor, field),
                ast::Selection::FragmentSpread(spread) => {
                    if guard!(visitor.enter_fragment_spread(spread)) {
                        if visit_directives(visitor, &spread.directives)
                            == VisitFlow::Break
                        {
                            return VisitFlow::Break;
                        }
                    }
                    visitor.leave_fragment_spread(spread);
                    VisitFlow::Continue
                }
                ast::Selection::InlineFragment(frag) => {
                    if guard!(visitor.enter_inline_fragment(frag)) {
                        if visit_directives(visitor, &frag.directives) == VisitFlow::Break {
                            return VisitFlow::Break;
                        }
                        if visit_selection_set(visitor, &frag.selection_set)
                            == VisitFlow::Break
                        {
                            return VisitFlow::Break;
                        }
                    }
                    visitor.leave_inline_fragment(frag);
                    VisitFlow::Continue
                }
            };
            if flow == VisitFlow::Break {
                return VisitFlow::Break;
            }
        }
    }
    visitor.leave_selection_set(selection_set);
    VisitFlow::Continue
}

pub fn visit_field(visitor: &mut impl Visitor, field: &ast::Field) -> VisitFlow {
    if guard!(visitor.enter_field(field)) {
        if visit_arguments(visitor, &field.arguments) == VisitFlow::Break {
            return VisitFlow::Break;
        }
        if visit_directives(visitor, &field.directives) == VisitFlow::Break {
            return VisitFlow::Break;
        }
        if let Some(selection_set) = &field.selection_set {
            if visit_selection_set(visitor, selection_set) == VisitFlow::Break {
                return VisitFlow::Break;
            }
        }
    }
    visitor.leave_field(field);
    VisitFlow::Continue
}

fn visit_directives(
    visitor: &mut impl Visitor,
    directives: &[ast::DirectiveAnnotation],
) -> VisitFlow {
    for directive in directives {
        if guard!(visitor.enter_directive(directive)) {
            if visit_arguments(visitor, &directive.arguments) == VisitFlow::Break {
                return VisitFlow::Break;
            }
        }
        visitor.leave_directive(directive);
    }
    VisitFlow::Continue
}

fn visit_arguments(visitor: &mut impl Visitor, arguments: &[ast::Argument]) -> VisitFlow {
    for argument in arguments {
        if guard!(visitor.enter_argument(argument)) {
            if visit_value(visitor, &argument.value) == VisitFlow::Break {
                return VisitFlow::Break;
            }
        }
        visitor.leave_argument(argument);
    }
    VisitFlow::Continue
}

pub fn visit_value(visitor: &mut impl Visitor, value: &ast::Value) -> VisitFlow {
    if guard!(visitor.enter_value(value)) {
        match value {
            ast::Value::List(list) => {
                for item in &list.values {
                    if visit_value(visitor, item) == VisitFlow::Break {
                        return VisitFlow::Break;
                    }
                }
            }
            ast::Value::Object(object) => {
                for field in &object.fields {
                    if visit_value(visitor, &field.value) == VisitFlow::Break {
                        return VisitFlow::Break;
                    }
                }
            }
            _ => {}
        }
    }
    visitor.leave_value(value);
    VisitFlow::Continue
}

fn visit_type_definition_children(
    visitor: &mut impl Visitor,
    def: &ast::TypeDefinition,
) -> VisitFlow {
    let directives = match def {
        ast::TypeDefinition::Scalar(d) => &d.directives,
        ast::TypeDefinition::Object(d) => &d.directives,
        ast::TypeDefinition::Interface(d) => &d.directives,
        ast::TypeDefinition::Union(d) => &d.directives,
        ast::TypeDefinition::Enum(d) => &d.directives,
        ast::TypeDefinition::InputObject(d) => &d.directives,
    };
    visit_directives(visitor, directives)
}

// =============================================================================
// Visitor chaining
// =============================================================================

/// Composes two visitors: `A` sees `enter` events first and `leave` events
/// last. Chain more than two by nesting.
pub struct VisitorChain<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> VisitorChain<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

macro_rules! chain_callbacks {
    ($($enter:ident, $leave:ident, $node:ty;)*) => {
        $(
            fn $enter(&mut self, node: &$node) -> VisitFlow {
                let flow = self.first.$enter(node);
                flow.merge(self.second.$enter(node))
            }
            fn $leave(&mut self, node: &$node) {
                self.second.$leave(node);
                self.first.$leave(node);
            }
        )*
    };
}

impl<A: Visitor, B: Visitor> Visitor for VisitorChain<A, B> {
    chain_callbacks! {
        enter_document, leave_document, ast::Document;
        enter_operation, leave_operation, ast::OperationDefinition;
        enter_variable_definition, leave_variable_definition, ast::VariableDefinition;
        enter_selection_set, leave_selection_set, ast::SelectionSet;
        enter_field, leave_field, ast::Field;
        enter_fragment_spread, leave_fragment_spread, ast::FragmentSpread;
        enter_inline_fragment, leave_inline_fragment, ast::InlineFragment;
        enter_fragment_definition, leave_fragment_definition, ast::FragmentDefinition;
        enter_directive, leave_directive, ast::DirectiveAnnotation;
        enter_argument, leave_argument, ast::Argument;
        enter_value, leave_value, ast::Value;
        enter_schema_definition, leave_schema_definition, ast::SchemaDefinition;
        enter_type_definition, leave_type_definition, ast::TypeDefinition;
        enter_type_extension, leave_type_extension, ast::TypeExtension;
        enter_directive_definition, leave_directive_definition, ast::DirectiveDefinition;
    }
}

// =============================================================================
// Transformation
// =============================================================================

/// The outcome of a rewrite callback.
pub enum Rewrite<T> {
    /// Keep the node (children are still rewritten).
    Keep,
    /// Replace the node; the replacement's children are *not* rewritten.
    Replace(T),
    /// Remove the node from its parent.
    Remove,
}

/// A document transformer. Callbacks default to [`Rewrite::Keep`].
#[allow(unused_variables)]
pub trait Rewriter {
    fn rewrite_definition(&mut self, definition: &ast::Definition) -> Rewrite<ast::Definition> {
        Rewrite::Keep
    }

    fn rewrite_selection(&mut self, selection: &ast::Selection) -> Rewrite<ast::Selection> {
        Rewrite::Keep
    }
}

/// Produces a new document by applying `rewriter` to every definition and
/// selection. The input document is untouched.
pub fn rewrite_document(rewriter: &mut impl Rewriter, document: &ast::Document) -> ast::Document {
    let definitions = document
        .definitions
        .iter()
        .filter_map(|definition| match rewriter.rewrite_definition(definition) {
            Rewrite::Remove => None,
            Rewrite::Replace(new_def) => Some(new_def),
            Rewrite::Keep => Some(rewrite_definition_children(rewriter, definition)),
        })
        .collect();

    ast::Document {
        definitions,
        span: document.span.clone(),
    }
}

fn rewrite_definition_children(
    rewriter: &mut impl Rewriter,
    definition: &ast::Definition,
) -> ast::Definition {
    match definition {
        ast::Definition::Operation(op) => {
            let mut op = op.clone();
            op.selection_set = rewrite_selection_set(rewriter, &op.selection_set);
            ast::Definition::Operation(op)
        }
        ast::Definition::Fragment(frag) => {
            let mut frag = frag.clone();
            frag.selection_set = rewrite_selection_set(rewriter, &frag.selection_set);
            ast::Definition::Fragment(frag)
        }
        other => other.clone(),
    }
}

fn rewrite_selection_set(
    rewriter: &mut impl Rewriter,
    selection_set: &ast::SelectionSet,
) -> ast::SelectionSet {
    let selections = selection_set
        .selections
        .iter()
        .filter_map(|selection| match rewriter.rewrite_selection(selection) {
            Rewrite::Remove => None,
            Rewrite::Replace(new_sel) => Some(new_sel),
            Rewrite::Keep => Some(match selection {
                ast::Selection::Field(field) => {
                    let mut field = field.clone();
                    field.selection_set = field
                        .selection_set
                        .as_ref()
                        .map(|ss| rewrite_selection_set(rewriter, ss));
                    ast::Selection::Field(field)
                }
                ast::Selection::InlineFragment(frag) => {
                    let mut frag = frag.clone();
                    frag.selection_set = rewrite_selection_set(rewriter, &frag.selection_set);
                    ast::Selection::InlineFragment(frag)
                }
                spread => spread.clone(),
            }),
        })
        .collect();

    ast::SelectionSet {
        selections,
        span: selection_set.span.clone(),
    }
}
