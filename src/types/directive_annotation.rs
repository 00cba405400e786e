use crate::loc::DefLocation;
use crate::schema::Schema;
use crate::types::Directive;
use crate::types::NamedDirectiveRef;
use crate::Value;
use indexmap::IndexMap;
use libgql_parser::ast;

/// A directive *application* on a schema element: `@name(args…)` written in
/// SDL above a type, field, argument, or enum value.
///
/// A `DirectiveAnnotation` is a pointer to some [`Directive`] definition
/// paired with the (constant) argument values it was applied with, in
/// source order.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectiveAnnotation {
    pub(crate) args: IndexMap<String, Value>,
    pub(crate) directive_ref: NamedDirectiveRef,
}

impl DirectiveAnnotation {
    /// ArgumentName -> [`Value`] for all arguments passed to this
    /// annotation, in source order.
    pub fn args(&self) -> &IndexMap<String, Value> {
        &self.args
    }

    pub fn directive_name(&self) -> &str {
        self.directive_ref.name()
    }

    /// The [`Directive`] definition this annotation refers to.
    pub fn directive<'schema>(&self, schema: &'schema Schema) -> Option<&'schema Directive> {
        self.directive_ref.deref(schema).ok()
    }

    pub fn ref_location(&self) -> &DefLocation {
        self.directive_ref.ref_location()
    }

    /// Converts SDL directive annotations. SDL positions are const, so
    /// every argument folds to a runtime [`Value`].
    pub(crate) fn from_ast(annotations: &[ast::DirectiveAnnotation]) -> Vec<DirectiveAnnotation> {
        annotations
            .iter()
            .map(|annotation| {
                let mut args = IndexMap::new();
                for argument in &annotation.arguments {
                    args.insert(
                        argument.name.value.clone(),
                        Value::from_const_ast(&argument.value)
                            .unwrap_or(Value::Null),
                    );
                }
                DirectiveAnnotation {
                    args,
                    directive_ref: NamedDirectiveRef::new(
                        annotation.name.as_str(),
                        DefLocation::from(&annotation.span),
                    ),
                }
            })
            .collect()
    }
}
