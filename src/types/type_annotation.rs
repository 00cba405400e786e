use crate::loc::DefLocation;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::NamedGraphQLTypeRef;
use libgql_parser::ast;

/// A schema-side type annotation: the type written after `:` on a field,
/// argument, input field, or variable definition.
///
/// Non-null wrapping is the `nullable` flag on each level, so
/// `NonNull(NonNull(T))` is unrepresentable. The innermost position is a
/// [`NamedRef`](crate::NamedRef): type references are resolved by name at
/// use time, which is how cyclic schemas stay buildable.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeRef {
    Named {
        nullable: bool,
        type_ref: NamedGraphQLTypeRef,
    },
    List {
        inner: Box<TypeRef>,
        nullable: bool,
    },
}

impl TypeRef {
    pub fn named(name: &str, nullable: bool, location: DefLocation) -> TypeRef {
        TypeRef::Named {
            nullable,
            type_ref: NamedGraphQLTypeRef::new(name, location),
        }
    }

    pub(crate) fn from_ast(annotation: &ast::TypeAnnotation) -> TypeRef {
        match annotation {
            ast::TypeAnnotation::Named(named) => TypeRef::Named {
                nullable: named.nullable,
                type_ref: NamedGraphQLTypeRef::new(
                    named.name.as_str(),
                    DefLocation::from(&named.span),
                ),
            },
            ast::TypeAnnotation::List(list) => TypeRef::List {
                inner: Box::new(TypeRef::from_ast(&list.inner)),
                nullable: list.nullable,
            },
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeRef::Named { nullable, .. } => *nullable,
            TypeRef::List { nullable, .. } => *nullable,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeRef::List { .. })
    }

    /// The innermost named reference of this annotation.
    pub fn innermost_named_ref(&self) -> &NamedGraphQLTypeRef {
        match self {
            TypeRef::Named { type_ref, .. } => type_ref,
            TypeRef::List { inner, .. } => inner.innermost_named_ref(),
        }
    }

    pub fn innermost_name(&self) -> &str {
        self.innermost_named_ref().name()
    }

    /// Dereferences the innermost named type against `schema`.
    pub fn innermost_type<'schema>(&self, schema: &'schema Schema) -> Option<&'schema GraphQLType> {
        self.innermost_named_ref().deref(schema).ok()
    }

    /// A copy of this annotation with the outermost level made nullable.
    pub fn with_nullable(&self) -> TypeRef {
        match self {
            TypeRef::Named { type_ref, .. } => TypeRef::Named {
                nullable: true,
                type_ref: type_ref.clone(),
            },
            TypeRef::List { inner, .. } => TypeRef::List {
                inner: inner.clone(),
                nullable: true,
            },
        }
    }

    /// Whether a value of type `self` is usable where `target` is expected,
    /// per the spec's type-compatibility rules: equal names, matching list
    /// depth, and `self` at least as strict about nullability at every
    /// level.
    pub fn is_sub_type_of(&self, target: &TypeRef) -> bool {
        if target.is_nullable() || !self.is_nullable() {
            match (self, target) {
                (
                    TypeRef::Named { type_ref: a, .. },
                    TypeRef::Named { type_ref: b, .. },
                ) => a.name() == b.name(),
                (
                    TypeRef::List { inner: a, .. },
                    TypeRef::List { inner: b, .. },
                ) => a.is_sub_type_of(b),
                _ => false,
            }
        } else {
            false
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named { nullable, type_ref } => {
                write!(f, "{}", type_ref.name())?;
                if !nullable {
                    write!(f, "!")?;
                }
            }
            TypeRef::List { inner, nullable } => {
                write!(f, "[{inner}]")?;
                if !nullable {
                    write!(f, "!")?;
                }
            }
        }
        Ok(())
    }
}
