//! Operation execution: the executor, resolvers, errors, responses, and
//! subscriptions.

mod collect_fields;
mod error;
mod executor;
pub(crate) mod introspection;
mod resolver;
mod response;
mod subscribe;

pub use error::ExecutionError;
pub use error::PathSegment;
pub use resolver::DeferredValue;
pub use resolver::EventStream;
pub use resolver::FieldError;
pub use resolver::Resolved;
pub use resolver::ResolveInfo;
pub use resolver::Resolver;
pub use resolver::ResolverContext;
pub use resolver::SubscriptionResolver;
pub use resolver::UnknownDirectiveError;
pub use response::Response;
pub use subscribe::subscribe;
pub use subscribe::ResponseStream;

pub(crate) use error::PathNode;
pub(crate) use resolver::default_resolve;

use crate::coercion;
use crate::runtime::BlockingRuntime;
use crate::runtime::Runtime;
use crate::schema::Schema;
use crate::Value;
use executor::Executor;
use libgql_parser::ast;
use libgql_parser::ast::OperationKind;
use std::sync::OnceLock;

#[cfg(test)]
mod tests;

/// Per-request inputs to [`execute`] and
/// [`subscribe`](crate::execution::subscribe).
pub struct ExecuteOptions<'a> {
    /// Raw variable values (a [`Value::Object`]); coerced against the
    /// operation's variable definitions before execution.
    pub variables: Option<Value>,

    /// Which operation to run when the document has several.
    pub operation_name: Option<&'a str>,

    /// The root value handed to root-level resolvers.
    pub root: Value,

    /// An opaque context value shared with every resolver.
    pub context: Value,

    /// The concurrency capability; defaults to [`BlockingRuntime`].
    pub runtime: Option<&'a dyn Runtime>,
}

impl Default for ExecuteOptions<'_> {
    fn default() -> Self {
        Self {
            variables: None,
            operation_name: None,
            root: Value::Null,
            context: Value::Null,
            runtime: None,
        }
    }
}

pub(crate) fn default_runtime() -> &'static BlockingRuntime {
    static RUNTIME: OnceLock<BlockingRuntime> = OnceLock::new();
    RUNTIME.get_or_init(BlockingRuntime::new)
}

/// Executes a query or mutation operation.
///
/// `document` is assumed to be valid against `schema`; run
/// [`validate`](crate::validation::validate) first (or use
/// [`graphql`](crate::graphql), which does). Subscription operations go
/// through [`subscribe`] instead.
pub fn execute(schema: &Schema, document: &ast::Document, options: ExecuteOptions<'_>) -> Response {
    let runtime = options
        .runtime
        .unwrap_or_else(|| default_runtime() as &dyn Runtime);

    let operation = match select_operation(document, options.operation_name) {
        Ok(operation) => operation,
        Err(message) => return Response::request_error(message),
    };

    if operation.kind == OperationKind::Subscription {
        return Response::request_error(
            "subscription operations must be started with `subscribe`",
        );
    }

    let variables =
        match coercion::coerce_variable_values(schema, operation, options.variables.as_ref()) {
            Ok(variables) => variables,
            Err(errors) => return Response::from_coercion_errors(errors),
        };

    let Some(root_type) = schema.root_type(operation.kind) else {
        return Response::request_error(format!(
            "the schema does not define a {} root type",
            operation.kind,
        ));
    };

    let executor = Executor::new(
        schema,
        document,
        operation,
        variables,
        &options.context,
        runtime,
    );
    let serial = operation.kind == OperationKind::Mutation;
    let data = executor.execute_root(root_type, &options.root, serial);
    let errors = executor.into_errors();

    Response::new(data, errors)
}

/// Picks the operation to run: the lone operation when the document has
/// exactly one, otherwise the one matching `operation_name`.
pub(crate) fn select_operation<'doc>(
    document: &'doc ast::Document,
    operation_name: Option<&str>,
) -> Result<&'doc ast::OperationDefinition, String> {
    let operations: Vec<&ast::OperationDefinition> = document.operations().collect();

    match operation_name {
        Some(name) => operations
            .into_iter()
            .find(|operation| {
                operation
                    .name
                    .as_ref()
                    .is_some_and(|op_name| op_name.as_str() == name)
            })
            .ok_or_else(|| format!("the document defines no operation named `{name}`")),
        None => match operations.len() {
            0 => Err("the document defines no operations".to_string()),
            1 => Ok(operations[0]),
            _ => Err(
                "the document defines multiple operations; an operation name \
                 is required"
                    .to_string(),
            ),
        },
    }
}
