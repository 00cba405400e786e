use crate::ast::Name;
use crate::SourceSpan;

/// A type annotation (a "type reference"), e.g. `[String!]!`.
///
/// Non-null wrapping is folded into the `nullable` flag on each level
/// rather than modeled as a separate wrapper node; `NonNull(NonNull(T))`
/// is unrepresentable by construction.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeAnnotation {
    Named(NamedTypeAnnotation),
    List(Box<ListTypeAnnotation>),
}

impl TypeAnnotation {
    /// The innermost named type of this annotation.
    pub fn innermost_name(&self) -> &Name {
        match self {
            TypeAnnotation::Named(named) => &named.name,
            TypeAnnotation::List(list) => list.inner.innermost_name(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeAnnotation::Named(named) => named.nullable,
            TypeAnnotation::List(list) => list.nullable,
        }
    }

    pub fn span(&self) -> &SourceSpan {
        match self {
            TypeAnnotation::Named(named) => &named.span,
            TypeAnnotation::List(list) => &list.span,
        }
    }
}

impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeAnnotation::Named(named) => {
                write!(f, "{}", named.name)?;
                if !named.nullable {
                    write!(f, "!")?;
                }
            }
            TypeAnnotation::List(list) => {
                write!(f, "[{}]", list.inner)?;
                if !list.nullable {
                    write!(f, "!")?;
                }
            }
        }
        Ok(())
    }
}

/// A named type annotation: `Foo` or `Foo!`.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeAnnotation {
    pub name: Name,
    pub nullable: bool,
    pub span: SourceSpan,
}

/// A list type annotation: `[Inner]` or `[Inner]!`.
#[derive(Clone, Debug, PartialEq)]
pub struct ListTypeAnnotation {
    pub inner: TypeAnnotation,
    pub nullable: bool,
    pub span: SourceSpan,
}
