//! Subscription initiation.
//!
//! [`subscribe`] resolves the subscription root field once to obtain an
//! event source, then maps each emitted event through a fresh execution of
//! the selection set, serially, one response per event. Transport
//! (WebSocket, SSE, …) is entirely the caller's concern: a
//! [`ResponseStream`] is just a blocking iterator of [`Response`]s.

use crate::coercion;
use crate::execution::collect_fields::collect_fields;
use crate::execution::default_runtime;
use crate::execution::executor::Executor;
use crate::execution::EventStream;
use crate::execution::ExecuteOptions;
use crate::execution::PathNode;
use crate::execution::PathSegment;
use crate::execution::ResolveInfo;
use crate::execution::ResolverContext;
use crate::execution::Response;
use crate::loc::Location;
use crate::runtime::Runtime;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::ObjectType;
use crate::Value;
use indexmap::IndexMap;
use libgql_parser::ast;
use libgql_parser::ast::OperationKind;

/// Starts a subscription: validates the request shape, resolves the event
/// source, and returns the response stream. Request-level failures come
/// back as an error [`Response`].
pub fn subscribe<'a>(
    schema: &'a Schema,
    document: &'a ast::Document,
    options: ExecuteOptions<'a>,
) -> Result<ResponseStream<'a>, Box<Response>> {
    let runtime = options
        .runtime
        .unwrap_or_else(|| default_runtime() as &dyn Runtime);

    let operation = match super::select_operation(document, options.operation_name) {
        Ok(operation) => operation,
        Err(message) => return Err(Box::new(Response::request_error(message))),
    };
    if operation.kind != OperationKind::Subscription {
        return Err(Box::new(Response::request_error(
            "`subscribe` requires a subscription operation",
        )));
    }

    let variables =
        match coercion::coerce_variable_values(schema, operation, options.variables.as_ref()) {
            Ok(variables) => variables,
            Err(errors) => return Err(Box::new(Response::from_coercion_errors(errors))),
        };

    let Some(root_type) = schema.subscription_type() else {
        return Err(Box::new(Response::request_error(
            "the schema does not define a subscription root type",
        )));
    };

    let fragments: std::collections::HashMap<&str, &ast::FragmentDefinition> = document
        .fragments()
        .map(|fragment| (fragment.name.as_str(), fragment))
        .collect();
    let groups = collect_fields(
        schema,
        &fragments,
        &variables,
        root_type,
        &[&operation.selection_set],
    );
    if groups.len() != 1 {
        return Err(Box::new(Response::request_error(
            "subscription operations must select exactly one root field",
        )));
    }
    let (response_key, fields) = groups.into_iter().next().expect("one group");
    let field_ast = fields[0];
    let field_name = field_ast.name.as_str();

    let Some(field_def) = root_type.fields.get(field_name) else {
        return Err(Box::new(Response::request_error(format!(
            "field `{field_name}` is not defined on type `{}`",
            root_type.name,
        ))));
    };
    let Some(subscription_resolver) = &field_def.subscription_resolver else {
        return Err(Box::new(Response::request_error(format!(
            "no subscription resolver is registered for `{}.{field_name}`",
            root_type.name,
        ))));
    };

    let args = match coercion::coerce_argument_values(schema, field_def, field_ast, &variables) {
        Ok(args) => args,
        Err(errors) => return Err(Box::new(Response::from_coercion_errors(errors))),
    };

    let events: EventStream = {
        let info = ResolveInfo {
            field_name,
            field_def,
            parent_type_name: &root_type.name,
            path: vec![PathSegment::Key(response_key.clone())],
            schema,
            variables: &variables,
            operation,
            fragments: &fragments,
            runtime,
        };
        let ctx = ResolverContext {
            root: &options.root,
            context: &options.context,
            args: &args,
            info: &info,
        };
        match subscription_resolver.subscribe(ctx) {
            Ok(events) => events,
            Err(field_error) => {
                return Err(Box::new(Response {
                    data: None,
                    errors: vec![crate::execution::ExecutionError {
                        message: field_error.message,
                        path: vec![PathSegment::Key(response_key)],
                        locations: vec![Location::from(&field_ast.span)],
                        extensions: field_error.extensions,
                    }],
                }));
            }
        }
    };

    log::debug!(
        "subscription started on `{}.{field_name}`",
        root_type.name,
    );

    Ok(ResponseStream {
        schema,
        document,
        operation,
        root_type,
        field_def,
        fields,
        response_key,
        variables,
        context: options.context,
        runtime,
        events,
    })
}

/// A stream of per-event responses for one subscription.
pub struct ResponseStream<'a> {
    schema: &'a Schema,
    document: &'a ast::Document,
    operation: &'a ast::OperationDefinition,
    root_type: &'a ObjectType,
    field_def: &'a Field,
    fields: Vec<&'a ast::Field>,
    response_key: String,
    variables: IndexMap<String, Value>,
    context: Value,
    runtime: &'a dyn Runtime,
    events: EventStream,
}

impl Iterator for ResponseStream<'_> {
    type Item = Response;

    fn next(&mut self) -> Option<Response> {
        let event = self.events.next()?;

        let executor = Executor::new(
            self.schema,
            self.document,
            self.operation,
            self.variables.clone(),
            &self.context,
            self.runtime,
        );

        let segment = PathSegment::Key(self.response_key.clone());
        let path = PathNode::new(&segment);
        let data = match executor.complete_subscription_event(
            self.root_type,
            self.field_def,
            &self.fields,
            event,
            &path,
        ) {
            Ok(value) => {
                Value::object([(self.response_key.clone(), value)])
            }
            Err(_) => Value::Null,
        };
        let errors = executor.into_errors();

        Some(Response::new(data, errors))
    }
}
