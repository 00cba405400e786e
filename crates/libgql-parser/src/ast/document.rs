use crate::ast::DirectiveDefinition;
use crate::ast::FragmentDefinition;
use crate::ast::OperationDefinition;
use crate::ast::SchemaDefinition;
use crate::ast::SchemaExtension;
use crate::ast::TypeDefinition;
use crate::ast::TypeExtension;
use crate::SourceSpan;

/// Root AST node for any GraphQL document.
///
/// A document holds a list of [`Definition`]s, which may be executable
/// definitions (operations and fragments), type-system definitions, or
/// type-system extensions. Which definition kinds are *permitted* depends
/// on the entry point used to parse it: see
/// [`parse_executable_document`](crate::parse_executable_document) and
/// [`parse_schema_document`](crate::parse_schema_document).
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub definitions: Vec<Definition>,
    pub span: SourceSpan,
}

impl Document {
    /// Iterate over only the operation definitions in this document.
    pub fn operations(&self) -> impl Iterator<Item = &OperationDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            _ => None,
        })
    }

    /// Iterate over only the fragment definitions in this document.
    pub fn fragments(&self) -> impl Iterator<Item = &FragmentDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(frag) => Some(frag),
            _ => None,
        })
    }
}

/// A top-level definition in a GraphQL document.
#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Operation(OperationDefinition),
    Fragment(FragmentDefinition),
    Schema(SchemaDefinition),
    SchemaExtension(SchemaExtension),
    Type(TypeDefinition),
    TypeExtension(TypeExtension),
    Directive(DirectiveDefinition),
}

impl Definition {
    /// Whether this definition may appear in an executable document.
    pub fn is_executable(&self) -> bool {
        matches!(self, Definition::Operation(_) | Definition::Fragment(_))
    }

    pub fn span(&self) -> &SourceSpan {
        match self {
            Definition::Operation(def) => &def.span,
            Definition::Fragment(def) => &def.span,
            Definition::Schema(def) => &def.span,
            Definition::SchemaExtension(def) => &def.span,
            Definition::Type(def) => def.span(),
            Definition::TypeExtension(def) => def.span(),
            Definition::Directive(def) => &def.span,
        }
    }
}
