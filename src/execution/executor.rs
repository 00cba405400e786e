//! The field-execution engine: selection-set walking, resolver dispatch,
//! value completion, and non-null propagation.

use crate::coercion;
use crate::execution::collect_fields::collect_fields;
use crate::execution::default_resolve;
use crate::execution::introspection;
use crate::execution::ExecutionError;
use crate::execution::FieldError;
use crate::execution::PathNode;
use crate::execution::PathSegment;
use crate::execution::Resolved;
use crate::execution::ResolveInfo;
use crate::execution::ResolverContext;
use crate::loc::Location;
use crate::runtime::FieldOutcome;
use crate::runtime::FieldTask;
use crate::runtime::Runtime;
use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::ObjectType;
use crate::types::TypeRef;
use crate::Value;
use indexmap::IndexMap;
use libgql_parser::ast;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Mutex;

/// Marker: a non-nullable position failed and the null must propagate to
/// the nearest nullable ancestor. The error itself was already recorded.
pub(crate) struct Propagated;

type Completion = Result<Value, Propagated>;

/// Per-execution state. Stateless across operations: one `Executor` drives
/// exactly one operation (or one subscription event) to completion.
pub(crate) struct Executor<'exec> {
    pub schema: &'exec Schema,
    pub operation: &'exec ast::OperationDefinition,
    pub fragments: HashMap<&'exec str, &'exec ast::FragmentDefinition>,
    pub variables: IndexMap<String, Value>,
    pub context_value: &'exec Value,
    pub runtime: &'exec dyn Runtime,

    /// The shared error sink. Appends are serialized; ordering across
    /// parallel branches is unspecified.
    errors: Mutex<Vec<ExecutionError>>,

    /// Ensures cancellation is reported as a single execution error no
    /// matter how many fields observe it.
    cancel_reported: AtomicBool,
}

impl<'exec> Executor<'exec> {
    pub fn new(
        schema: &'exec Schema,
        document: &'exec ast::Document,
        operation: &'exec ast::OperationDefinition,
        variables: IndexMap<String, Value>,
        context_value: &'exec Value,
        runtime: &'exec dyn Runtime,
    ) -> Self {
        let fragments = document
            .fragments()
            .map(|fragment| (fragment.name.as_str(), fragment))
            .collect();
        Self {
            schema,
            operation,
            fragments,
            variables,
            context_value,
            runtime,
            errors: Mutex::new(vec![]),
            cancel_reported: AtomicBool::new(false),
        }
    }

    pub fn into_errors(self) -> Vec<ExecutionError> {
        self.errors
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_error(&self, error: ExecutionError) {
        self.errors
            .lock()
            .expect("error sink is never poisoned")
            .push(error);
    }

    fn record_at(
        &self,
        message: impl Into<String>,
        path: Option<&PathNode<'_>>,
        field_ast: &ast::Field,
    ) {
        self.record_error(ExecutionError::at(
            message,
            path.map(PathNode::to_vec).unwrap_or_default(),
            vec![Location::from(&field_ast.span)],
        ));
    }

    /// Executes the operation's root selection set against the
    /// caller-supplied root value. `serial` is true for mutations: their
    /// top-level fields never overlap and run in document order.
    pub fn execute_root(
        &self,
        root_type: &'exec ObjectType,
        root_value: &Value,
        serial: bool,
    ) -> Value {
        log::debug!(
            "executing {} operation against `{}` ({} runtime)",
            self.operation.kind,
            root_type.name,
            self.runtime.name(),
        );
        match self.execute_object(
            root_type,
            root_value,
            &[&self.operation.selection_set],
            None,
            serial,
        ) {
            Ok(data) => data,
            // A non-nullable root field failed and there is no nullable
            // ancestor: the entire data becomes null.
            Err(Propagated) => Value::Null,
        }
    }

    /// Completes one subscription event against the subscribed root field,
    /// as if the field's resolver had returned `event`.
    pub fn complete_subscription_event(
        &self,
        root_type: &'exec ObjectType,
        field_def: &'exec crate::types::Field,
        fields: &[&'exec ast::Field],
        event: Value,
        path: &PathNode<'_>,
    ) -> Result<Value, Propagated> {
        match self.complete_value(root_type, field_def, &field_def.type_ref, event, fields, path)
        {
            Ok(completed) => Ok(completed),
            Err(Propagated) => self.null_or_propagate(&field_def.type_ref),
        }
    }

    /// Executes a set of selection sets against a concrete object type,
    /// producing the response object for this level.
    fn execute_object(
        &self,
        object_type: &'exec ObjectType,
        parent_value: &Value,
        selection_sets: &[&'exec ast::SelectionSet],
        parent_path: Option<&PathNode<'_>>,
        serial: bool,
    ) -> Completion {
        let groups = collect_fields(
            self.schema,
            &self.fragments,
            &self.variables,
            object_type,
            selection_sets,
        );
        let group_list: Vec<(String, Vec<&'exec ast::Field>)> = groups.into_iter().collect();
        let segments: Vec<PathSegment> = group_list
            .iter()
            .map(|(key, _)| PathSegment::Key(key.clone()))
            .collect();

        let tasks: Vec<FieldTask<'_>> = group_list
            .iter()
            .zip(&segments)
            .map(|((_, fields), segment)| {
                let task: FieldTask<'_> = Box::new(move || {
                    let path = match parent_path {
                        Some(parent) => parent.child(segment),
                        None => PathNode::new(segment),
                    };
                    match self.execute_field(object_type, parent_value, fields, &path) {
                        Ok(value) => FieldOutcome::Value(value),
                        Err(Propagated) => FieldOutcome::PropagateNull,
                    }
                });
                task
            })
            .collect();

        let outcomes = if serial {
            tasks.into_iter().map(|task| task()).collect::<Vec<_>>()
        } else {
            self.runtime.run_group(tasks)
        };

        let mut response = IndexMap::with_capacity(group_list.len());
        let mut failed = false;
        for ((key, _), outcome) in group_list.into_iter().zip(outcomes) {
            match outcome {
                FieldOutcome::Value(value) => {
                    response.insert(key, value);
                }
                FieldOutcome::PropagateNull => {
                    failed = true;
                }
            }
        }

        if failed {
            Err(Propagated)
        } else {
            Ok(Value::Object(response))
        }
    }

    /// Executes one response-key group: field lookup, argument coercion,
    /// resolver dispatch, value completion. Returns `Err(Propagated)` when
    /// the field is non-nullable and failed (error already recorded).
    fn execute_field(
        &self,
        object_type: &'exec ObjectType,
        parent_value: &Value,
        fields: &[&'exec ast::Field],
        path: &PathNode<'_>,
    ) -> Completion {
        let field_ast = fields[0];
        let field_name = field_ast.name.as_str();

        if field_name == "__typename" {
            return Ok(Value::String(object_type.name.clone()));
        }

        let Some(field_def) = object_type.fields.get(field_name) else {
            self.record_at(
                format!(
                    "field `{field_name}` is not defined on type `{}`",
                    object_type.name,
                ),
                Some(path),
                field_ast,
            );
            return Err(Propagated);
        };

        // Cooperative cancellation checkpoint: once the token trips, no
        // new resolver is dispatched.
        if let Some(token) = self.runtime.cancel_token() {
            if token.is_cancelled() {
                if !self.cancel_reported.swap(true, Ordering::SeqCst) {
                    self.record_at("execution was cancelled", Some(path), field_ast);
                }
                return self.null_or_propagate(&field_def.type_ref);
            }
        }

        let args = match coercion::coerce_argument_values(
            self.schema,
            field_def,
            field_ast,
            &self.variables,
        ) {
            Ok(args) => args,
            Err(errors) => {
                for error in errors {
                    self.record_at(error.message, Some(path), field_ast);
                }
                return self.null_or_propagate(&field_def.type_ref);
            }
        };

        let resolved: Result<Value, FieldError> = if field_name == "__schema" {
            Ok(introspection::schema_repr())
        } else if field_name == "__type" {
            Ok(introspection::named_type_repr_checked(
                self.schema,
                args.get("name"),
            ))
        } else {
            let info = ResolveInfo {
                field_name,
                field_def,
                parent_type_name: &object_type.name,
                path: path.to_vec(),
                schema: self.schema,
                variables: &self.variables,
                operation: self.operation,
                fragments: &self.fragments,
                runtime: self.runtime,
            };
            let resolver = field_def
                .resolver
                .as_ref()
                .or_else(|| introspection::builtin_resolver(&object_type.name, field_name));
            match resolver {
                Some(resolver) => {
                    let ctx = ResolverContext {
                        root: parent_value,
                        context: self.context_value,
                        args: &args,
                        info: &info,
                    };
                    resolver.resolve(ctx).and_then(|resolved| match resolved {
                        Resolved::Value(value) => Ok(value),
                        // A deferred result is awaited here; by the time
                        // completion starts, the value is concrete.
                        Resolved::Deferred(thunk) => thunk(),
                    })
                }
                None => Ok(default_resolve(parent_value, field_def)),
            }
        };

        match resolved {
            Ok(value) => {
                match self.complete_value(object_type, field_def, &field_def.type_ref, value, fields, path)
                {
                    Ok(completed) => Ok(completed),
                    Err(Propagated) => self.null_or_propagate(&field_def.type_ref),
                }
            }
            Err(field_error) => {
                self.record_error(ExecutionError {
                    message: field_error.message,
                    path: path.to_vec(),
                    locations: vec![Location::from(&field_ast.span)],
                    extensions: field_error.extensions,
                });
                self.null_or_propagate(&field_def.type_ref)
            }
        }
    }

    /// An already-recorded failure becomes a null at nullable positions
    /// and keeps propagating past non-nullable ones.
    fn null_or_propagate(&self, type_ref: &TypeRef) -> Completion {
        if type_ref.is_nullable() {
            Ok(Value::Null)
        } else {
            Err(Propagated)
        }
    }

    /// Completes `value` against `type_ref`.
    ///
    /// Contract: `Err(Propagated)` means completion failed *at this
    /// position* and the error was recorded; the caller decides whether
    /// its own position absorbs the null.
    #[allow(clippy::too_many_arguments)]
    fn complete_value(
        &self,
        parent_type: &'exec ObjectType,
        field_def: &'exec crate::types::Field,
        type_ref: &'exec TypeRef,
        value: Value,
        fields: &[&'exec ast::Field],
        path: &PathNode<'_>,
    ) -> Completion {
        let field_ast = fields[0];

        if value.is_null() {
            if type_ref.is_nullable() {
                return Ok(Value::Null);
            }
            self.record_at(
                format!(
                    "cannot return null for non-nullable field \
                     `{}.{}`",
                    parent_type.name, field_def.name,
                ),
                Some(path),
                field_ast,
            );
            return Err(Propagated);
        }

        match type_ref {
            TypeRef::List { inner, .. } => {
                let Value::List(items) = value else {
                    self.record_at(
                        format!(
                            "field `{}.{}` resolved to a non-list value for \
                             list type `{type_ref}`",
                            parent_type.name, field_def.name,
                        ),
                        Some(path),
                        field_ast,
                    );
                    return Err(Propagated);
                };

                // Elements complete in index order; a failing non-nullable
                // element invalidates the whole list.
                let mut completed_items = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let segment = PathSegment::Index(index);
                    let item_path = path.child(&segment);
                    match self.complete_value(
                        parent_type,
                        field_def,
                        inner,
                        item,
                        fields,
                        &item_path,
                    ) {
                        Ok(completed) => completed_items.push(completed),
                        Err(Propagated) => {
                            if inner.is_nullable() {
                                completed_items.push(Value::Null);
                            } else {
                                return Err(Propagated);
                            }
                        }
                    }
                }
                Ok(Value::List(completed_items))
            }

            TypeRef::Named { type_ref: named, .. } => {
                let Ok(target) = named.deref(self.schema) else {
                    self.record_at(
                        format!("unknown type `{}`", named.name()),
                        Some(path),
                        field_ast,
                    );
                    return Err(Propagated);
                };
                self.complete_named_value(parent_type, field_def, target, value, fields, path)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn complete_named_value(
        &self,
        parent_type: &'exec ObjectType,
        field_def: &'exec crate::types::Field,
        target: &'exec GraphQLType,
        value: Value,
        fields: &[&'exec ast::Field],
        path: &PathNode<'_>,
    ) -> Completion {
        let field_ast = fields[0];
        match target {
            GraphQLType::Scalar(scalar) => {
                match scalar.implementation.serialize(&value) {
                    Ok(serialized) => Ok(serialized),
                    Err(message) => {
                        self.record_at(
                            format!(
                                "failed to serialize value of scalar `{}`: {message}",
                                scalar.name,
                            ),
                            Some(path),
                            field_ast,
                        );
                        Err(Propagated)
                    }
                }
            }

            GraphQLType::Enum(enum_type) => {
                let name = match &value {
                    Value::Enum(name) | Value::String(name) => Some(name.as_str()),
                    _ => None,
                };
                match name {
                    Some(name) if enum_type.value(name).is_some() => {
                        Ok(Value::Enum(name.to_string()))
                    }
                    _ => {
                        self.record_at(
                            format!(
                                "enum `{}` cannot represent value {}",
                                enum_type.name,
                                value.to_literal(),
                            ),
                            Some(path),
                            field_ast,
                        );
                        Err(Propagated)
                    }
                }
            }

            GraphQLType::Object(object_type) => {
                let subselections = child_selection_sets(fields);
                self.execute_object(object_type, &value, &subselections, Some(path), false)
            }

            GraphQLType::Interface(_) | GraphQLType::Union(_) => {
                let Some(concrete) = self.resolve_concrete_type(target, &value) else {
                    self.record_at(
                        format!(
                            "could not resolve the concrete type of abstract \
                             type `{}` for field `{}.{}`",
                            target.name(),
                            parent_type.name,
                            field_def.name,
                        ),
                        Some(path),
                        field_ast,
                    );
                    return Err(Propagated);
                };
                let subselections = child_selection_sets(fields);
                self.execute_object(concrete, &value, &subselections, Some(path), false)
            }

            GraphQLType::InputObject(input_object) => {
                self.record_at(
                    format!(
                        "input object `{}` cannot be used as an output type",
                        input_object.name,
                    ),
                    Some(path),
                    field_ast,
                );
                Err(Propagated)
            }
        }
    }

    /// Resolves the concrete object type behind an abstract-typed value:
    /// the abstract type's `resolve_type` callback, then a `__typename`
    /// key on the value. A value that identifies itself neither way is a
    /// field error, even when only one possible type exists.
    fn resolve_concrete_type(
        &self,
        abstract_type: &'exec GraphQLType,
        value: &Value,
    ) -> Option<&'exec ObjectType> {
        let resolve_type = match abstract_type {
            GraphQLType::Interface(interface) => interface.resolve_type.as_ref(),
            GraphQLType::Union(union_type) => union_type.resolve_type.as_ref(),
            _ => None,
        };

        if let Some(resolver) = resolve_type {
            let name = resolver.resolve_type(value, self.schema)?;
            return self.possible_object(abstract_type, &name);
        }

        if let Some(Value::String(name)) = value.get("__typename") {
            return self.possible_object(abstract_type, &name.clone());
        }

        None
    }

    fn possible_object(
        &self,
        abstract_type: &GraphQLType,
        name: &str,
    ) -> Option<&'exec ObjectType> {
        if !self.schema.is_possible_type(abstract_type, name) {
            return None;
        }
        self.schema
            .type_by_name(name)
            .and_then(GraphQLType::as_object)
    }

}

/// The child selection sets of a field group: one per field node carrying
/// a subselection. They merge during the child's own `collect_fields`.
fn child_selection_sets<'exec>(
    fields: &[&'exec ast::Field],
) -> Vec<&'exec ast::SelectionSet> {
    fields
        .iter()
        .filter_map(|field| field.selection_set.as_ref())
        .collect()
}
