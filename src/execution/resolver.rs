use crate::execution::PathSegment;
use crate::runtime::Runtime;
use crate::schema::Schema;
use crate::types::Field;
use crate::Value;
use indexmap::IndexMap;
use libgql_parser::ast;
use std::collections::HashMap;

/// An error produced by (or on behalf of) a resolver. Captured as a field
/// error with the failing path; never aborts the whole operation by
/// itself.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldError {
    pub message: String,
    pub extensions: Option<IndexMap<String, Value>>,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            extensions: None,
        }
    }

    pub fn with_extensions(
        message: impl Into<String>,
        extensions: IndexMap<String, Value>,
    ) -> Self {
        Self {
            message: message.into(),
            extensions: Some(extensions),
        }
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        FieldError::new(message)
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        FieldError::new(message)
    }
}

/// What a resolver hands back: a plain value, or a deferred computation
/// the executor awaits before completing the value.
pub enum Resolved {
    Value(Value),
    Deferred(DeferredValue),
}

impl Resolved {
    /// Convenience for the common immediate case.
    pub fn value(value: impl Into<Value>) -> Resolved {
        Resolved::Value(value.into())
    }

    /// Defers the computation; the executor invokes it (at most once)
    /// while completing the field.
    pub fn deferred(
        thunk: impl FnOnce() -> Result<Value, FieldError> + Send + 'static,
    ) -> Resolved {
        Resolved::Deferred(Box::new(thunk))
    }
}

pub type DeferredValue = Box<dyn FnOnce() -> Result<Value, FieldError> + Send>;

/// Everything a resolver can see, bundled to keep the [`Resolver`] trait
/// one method.
pub struct ResolverContext<'exec> {
    /// The parent object's resolved value.
    pub root: &'exec Value,
    /// The caller-supplied context value, shared by the whole execution.
    pub context: &'exec Value,
    /// Coerced argument values, keyed by each argument's resolver key.
    pub args: &'exec IndexMap<String, Value>,
    pub info: &'exec ResolveInfo<'exec>,
}

/// A field resolver.
pub trait Resolver: Send + Sync {
    fn resolve(&self, ctx: ResolverContext<'_>) -> Result<Resolved, FieldError>;
}

impl<F> Resolver for F
where
    F: Fn(ResolverContext<'_>) -> Result<Resolved, FieldError> + Send + Sync,
{
    fn resolve(&self, ctx: ResolverContext<'_>) -> Result<Resolved, FieldError> {
        self(ctx)
    }
}

/// The source of a subscription's events: resolved once per subscription,
/// then each yielded event drives one execution of the selection set.
pub trait SubscriptionResolver: Send + Sync {
    fn subscribe(&self, ctx: ResolverContext<'_>) -> Result<EventStream, FieldError>;
}

impl<F> SubscriptionResolver for F
where
    F: Fn(ResolverContext<'_>) -> Result<EventStream, FieldError> + Send + Sync,
{
    fn subscribe(&self, ctx: ResolverContext<'_>) -> Result<EventStream, FieldError> {
        self(ctx)
    }
}

pub type EventStream = Box<dyn Iterator<Item = Value> + Send>;

/// Raised by [`ResolveInfo::directive_arguments`] when the named directive
/// does not exist in the schema.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("the directive `@{0}` is not defined in this schema")]
pub struct UnknownDirectiveError(pub String);

/// Per-field execution context delivered to resolvers.
pub struct ResolveInfo<'exec> {
    pub field_name: &'exec str,
    pub field_def: &'exec Field,
    pub parent_type_name: &'exec str,
    pub path: Vec<PathSegment>,
    pub schema: &'exec Schema,
    pub variables: &'exec IndexMap<String, Value>,
    pub operation: &'exec ast::OperationDefinition,
    pub fragments: &'exec HashMap<&'exec str, &'exec ast::FragmentDefinition>,
    pub runtime: &'exec dyn Runtime,
}

impl ResolveInfo<'_> {
    /// The arguments of the first application of `@directive_name` on this
    /// field's definition, with declared defaults filled in. `None` when
    /// the field carries no such annotation.
    ///
    /// Asking for a directive the schema doesn't define is a caller bug
    /// and raises [`UnknownDirectiveError`].
    pub fn directive_arguments(
        &self,
        directive_name: &str,
    ) -> Result<Option<IndexMap<String, Value>>, UnknownDirectiveError> {
        Ok(self
            .all_directive_arguments(directive_name)?
            .into_iter()
            .next())
    }

    /// The arguments of *every* application of `@directive_name` on this
    /// field's definition, in source order. Repeatable directives make
    /// this list longer than one.
    pub fn all_directive_arguments(
        &self,
        directive_name: &str,
    ) -> Result<Vec<IndexMap<String, Value>>, UnknownDirectiveError> {
        let Some(directive_def) = self.schema.directive_by_name(directive_name) else {
            return Err(UnknownDirectiveError(directive_name.to_string()));
        };

        let mut applications = vec![];
        for annotation in &self.field_def.directives {
            if annotation.directive_name() != directive_name {
                continue;
            }
            let mut args = annotation.args().clone();
            for (arg_name, arg_def) in &directive_def.arguments {
                if !args.contains_key(arg_name) {
                    if let Some(default) = &arg_def.default_value {
                        args.insert(arg_name.clone(), default.clone());
                    }
                }
            }
            applications.push(args);
        }
        Ok(applications)
    }
}

/// The default resolver: a key lookup on the parent object value.
///
/// The key is the field's `resolver_name` when set, its GraphQL name
/// otherwise. Anything else (missing key, non-object parent) resolves to
/// null. There is no method dispatch of any kind; parents expose plain
/// data, and behavior belongs in registered [`Resolver`]s.
pub(crate) fn default_resolve(parent: &Value, field_def: &Field) -> Value {
    parent
        .get(field_def.resolver_key())
        .cloned()
        .unwrap_or(Value::Null)
}
