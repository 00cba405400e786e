use crate::ast::Name;
use crate::ast::TypeAnnotation;
use crate::ast::Value;
use crate::SourceSpan;

/// The kind of a GraphQL operation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation definition.
///
/// Covers both the full form (`query Foo($x: Int) { … }`) and the
/// query-shorthand form (`{ … }`); the latter has `shorthand: true` and no
/// name.
///
/// See
/// [Operations](https://spec.graphql.org/June2018/#sec-Language.Operations)
/// in the spec.
#[derive(Clone, Debug, PartialEq)]
pub struct OperationDefinition {
    pub kind: OperationKind,
    pub name: Option<Name>,
    pub variable_definitions: Vec<VariableDefinition>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub shorthand: bool,
    pub span: SourceSpan,
}

/// A variable definition: `$name: Type = default @dir`.
///
/// Directives on variable definitions are accepted syntactically
/// (graphql-spec PR 510) and carried through the AST.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDefinition {
    pub name: Name,
    pub var_type: TypeAnnotation,
    pub default_value: Option<Value>,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: SourceSpan,
}

/// A selection set: the braces-enclosed list of selections.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSet {
    pub selections: Vec<Selection>,
    pub span: SourceSpan,
}

/// A single selection within a selection set.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Field(Field),
    FragmentSpread(FragmentSpread),
    InlineFragment(InlineFragment),
}

impl Selection {
    pub fn span(&self) -> &SourceSpan {
        match self {
            Selection::Field(field) => &field.span,
            Selection::FragmentSpread(spread) => &spread.span,
            Selection::InlineFragment(frag) => &frag.span,
        }
    }

    pub fn directives(&self) -> &[DirectiveAnnotation] {
        match self {
            Selection::Field(field) => &field.directives,
            Selection::FragmentSpread(spread) => &spread.directives,
            Selection::InlineFragment(frag) => &frag.directives,
        }
    }
}

/// A field selection, optionally aliased, with arguments, directives, and a
/// nested selection set.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: Option<SelectionSet>,
    pub span: SourceSpan,
}

impl Field {
    /// The response key for this field: its alias when present, its name
    /// otherwise.
    pub fn response_key(&self) -> &str {
        self.alias
            .as_ref()
            .map(|alias| alias.as_str())
            .unwrap_or(self.name.as_str())
    }
}

/// An argument: `name: value`.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    pub name: Name,
    pub value: Value,
    pub span: SourceSpan,
}

/// An applied directive: `@name(args…)`.
///
/// This is an annotation site, not a directive *definition*; see
/// [`DirectiveDefinition`](crate::ast::DirectiveDefinition) for the latter.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation {
    pub name: Name,
    pub arguments: Vec<Argument>,
    pub span: SourceSpan,
}

/// A named fragment spread: `...FragmentName`.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentSpread {
    pub name: Name,
    pub directives: Vec<DirectiveAnnotation>,
    pub span: SourceSpan,
}

/// An inline fragment: `... on Type { … }`.
#[derive(Clone, Debug, PartialEq)]
pub struct InlineFragment {
    pub type_condition: Option<TypeCondition>,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub span: SourceSpan,
}

/// A fragment definition: `fragment Name on Type { … }`.
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub name: Name,
    pub type_condition: TypeCondition,
    pub directives: Vec<DirectiveAnnotation>,
    pub selection_set: SelectionSet,
    pub span: SourceSpan,
}

/// A type condition: the `on TypeName` part of a fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeCondition {
    pub on_type: Name,
    pub span: SourceSpan,
}
