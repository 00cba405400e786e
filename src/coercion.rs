//! Input coercion: variable values and argument literals.
//!
//! Two routines per the runtime contract:
//!
//! - [`coerce_variable_values`] coerces a raw variable map against an
//!   operation's variable definitions (scalars via `parse_value`).
//! - [`coerce_argument_values`] coerces one field's argument literals
//!   against its definition, resolving variable references from the
//!   already-coerced variable map (scalars via `parse_literal`).
//!
//! Coercion errors carry a path of field names and list indices; variable
//! coercion errors abort the operation before any resolver runs.

use crate::execution::PathSegment;
use crate::schema::Schema;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::TypeRef;
use crate::Value;
use indexmap::IndexMap;
use libgql_parser::ast;

/// A failed input coercion, with the path to the offending value.
///
/// The path starts at the variable or argument name: coercing variables
/// `{ i: { n: "3" } }` against `input I { n: Int! }` fails with path
/// `["i", "n"]`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct CoercionError {
    pub message: String,
    pub path: Vec<PathSegment>,
}

impl CoercionError {
    fn new(message: impl Into<String>, path: &[PathSegment]) -> Self {
        Self {
            message: message.into(),
            path: path.to_vec(),
        }
    }
}

type Errors = Vec<CoercionError>;

/// Coerces the raw variable values supplied with a request against
/// `operation`'s variable definitions.
///
/// Absent nullable variables without defaults stay absent (they are not
/// `null`); coercing an already-coerced map again is a no-op.
pub fn coerce_variable_values(
    schema: &Schema,
    operation: &ast::OperationDefinition,
    raw: Option<&Value>,
) -> Result<IndexMap<String, Value>, Errors> {
    let mut coerced = IndexMap::new();
    let mut errors: Errors = vec![];
    let empty = IndexMap::new();
    let raw_entries = match raw {
        Some(Value::Object(entries)) => entries,
        Some(Value::Null) | None => &empty,
        Some(other) => {
            return Err(vec![CoercionError::new(
                format!("variables must be an object, not {}", other.kind_name()),
                &[],
            )]);
        }
    };

    for var_def in &operation.variable_definitions {
        let name = var_def.name.as_str();
        let type_ref = TypeRef::from_ast(&var_def.var_type);
        let path = vec![PathSegment::Key(name.to_string())];

        match raw_entries.get(name) {
            None => {
                if let Some(default) = &var_def.default_value {
                    match coerce_literal(schema, &type_ref, default, &coerced, &path) {
                        Ok(Some(value)) => {
                            coerced.insert(name.to_string(), value);
                        }
                        Ok(None) => {}
                        Err(errs) => errors.extend(errs),
                    }
                } else if !type_ref.is_nullable() {
                    errors.push(CoercionError::new(
                        format!(
                            "variable `${name}` of required type `{type_ref}` \
                             was not provided"
                        ),
                        &path,
                    ));
                }
                // Absent nullable variable: stays absent.
            }
            Some(value) => match coerce_value(schema, &type_ref, value, &path) {
                Ok(value) => {
                    coerced.insert(name.to_string(), value);
                }
                Err(errs) => errors.extend(errs),
            },
        }
    }

    if errors.is_empty() {
        Ok(coerced)
    } else {
        Err(errors)
    }
}

/// Coerces one field selection's arguments against its field definition.
///
/// Output keys are each argument's resolver key. Variable references pull
/// from `variables` (the coerced map); an unset variable makes the
/// argument fall back to its default, or fail when required.
pub fn coerce_argument_values(
    schema: &Schema,
    field_def: &Field,
    field_ast: &ast::Field,
    variables: &IndexMap<String, Value>,
) -> Result<IndexMap<String, Value>, Errors> {
    let mut coerced = IndexMap::new();
    let mut errors: Errors = vec![];

    for (arg_name, arg_def) in &field_def.arguments {
        let path = vec![PathSegment::Key(arg_name.clone())];
        let provided = field_ast
            .arguments
            .iter()
            .find(|argument| argument.name.as_str() == arg_name);

        let coerced_value: Option<Value> = match provided {
            None => default_or_missing(arg_def.default_value.as_ref(), arg_name, &arg_def.type_ref, &path, &mut errors),
            Some(argument) => {
                match coerce_literal(schema, &arg_def.type_ref, &argument.value, variables, &path)
                {
                    Ok(Some(value)) => Some(value),
                    Ok(None) => default_or_missing(
                        arg_def.default_value.as_ref(),
                        arg_name,
                        &arg_def.type_ref,
                        &path,
                        &mut errors,
                    ),
                    Err(errs) => {
                        errors.extend(errs);
                        None
                    }
                }
            }
        };

        if let Some(value) = coerced_value {
            coerced.insert(arg_def.resolver_key().to_string(), value);
        }
    }

    if errors.is_empty() {
        Ok(coerced)
    } else {
        Err(errors)
    }
}

fn default_or_missing(
    default: Option<&Value>,
    arg_name: &str,
    type_ref: &TypeRef,
    path: &[PathSegment],
    errors: &mut Errors,
) -> Option<Value> {
    match default {
        Some(default) => Some(default.clone()),
        None => {
            if !type_ref.is_nullable() {
                errors.push(CoercionError::new(
                    format!(
                        "argument `{arg_name}` of required type `{type_ref}` \
                         was not provided"
                    ),
                    path,
                ));
            }
            None
        }
    }
}

/// Coerces an externally supplied value (already parsed out of transport,
/// e.g. JSON) against `type_ref`.
pub fn coerce_value(
    schema: &Schema,
    type_ref: &TypeRef,
    value: &Value,
    path: &[PathSegment],
) -> Result<Value, Errors> {
    if value.is_null() {
        if type_ref.is_nullable() {
            return Ok(Value::Null);
        }
        return Err(vec![CoercionError::new(
            format!("null provided for non-nullable type `{type_ref}`"),
            path,
        )]);
    }

    match type_ref {
        TypeRef::List { inner, .. } => match value {
            Value::List(items) => {
                let mut coerced_items = Vec::with_capacity(items.len());
                let mut errors: Errors = vec![];
                for (index, item) in items.iter().enumerate() {
                    let mut item_path = path.to_vec();
                    item_path.push(PathSegment::Index(index));
                    match coerce_value(schema, inner, item, &item_path) {
                        Ok(coerced) => coerced_items.push(coerced),
                        Err(errs) => errors.extend(errs),
                    }
                }
                if errors.is_empty() {
                    Ok(Value::List(coerced_items))
                } else {
                    Err(errors)
                }
            }
            // Single values auto-wrap to one-element lists.
            _ => Ok(Value::List(vec![coerce_value(schema, inner, value, path)?])),
        },

        TypeRef::Named { type_ref: named, .. } => {
            let Ok(target) = named.deref(schema) else {
                return Err(vec![CoercionError::new(
                    format!("unknown type `{}`", named.name()),
                    path,
                )]);
            };
            coerce_named_value(schema, target, value, path)
        }
    }
}

fn coerce_named_value(
    schema: &Schema,
    target: &GraphQLType,
    value: &Value,
    path: &[PathSegment],
) -> Result<Value, Errors> {
    match target {
        GraphQLType::Scalar(scalar) => scalar
            .implementation
            .parse_value(value)
            .map_err(|message| vec![CoercionError::new(message, path)]),

        GraphQLType::Enum(enum_type) => {
            let name = match value {
                Value::Enum(name) | Value::String(name) => name.as_str(),
                other => {
                    return Err(vec![CoercionError::new(
                        format!(
                            "enum `{}` cannot represent {}",
                            enum_type.name,
                            other.kind_name(),
                        ),
                        path,
                    )]);
                }
            };
            if enum_type.value(name).is_some() {
                Ok(Value::Enum(name.to_string()))
            } else {
                Err(vec![CoercionError::new(
                    format!("`{name}` is not a value of enum `{}`", enum_type.name),
                    path,
                )])
            }
        }

        GraphQLType::InputObject(input_object) => {
            let Value::Object(entries) = value else {
                return Err(vec![CoercionError::new(
                    format!(
                        "input object `{}` cannot represent {}",
                        input_object.name,
                        value.kind_name(),
                    ),
                    path,
                )]);
            };

            let mut coerced = IndexMap::new();
            let mut errors: Errors = vec![];

            for key in entries.keys() {
                if !input_object.fields.contains_key(key) {
                    errors.push(CoercionError::new(
                        format!(
                            "unknown field `{key}` for input object `{}`",
                            input_object.name,
                        ),
                        path,
                    ));
                }
            }

            for (field_name, field_def) in &input_object.fields {
                let mut field_path = path.to_vec();
                field_path.push(PathSegment::Key(field_name.clone()));
                match entries.get(field_name) {
                    Some(field_value) => {
                        match coerce_value(schema, &field_def.type_ref, field_value, &field_path)
                        {
                            Ok(coerced_value) => {
                                coerced.insert(
                                    field_def.resolver_key().to_string(),
                                    coerced_value,
                                );
                            }
                            Err(errs) => errors.extend(errs),
                        }
                    }
                    None => {
                        if let Some(default) = &field_def.default_value {
                            coerced.insert(
                                field_def.resolver_key().to_string(),
                                default.clone(),
                            );
                        } else if field_def.is_required() {
                            errors.push(CoercionError::new(
                                format!(
                                    "required field `{field_name}` of input \
                                     object `{}` was not provided",
                                    input_object.name,
                                ),
                                &field_path,
                            ));
                        }
                    }
                }
            }

            if errors.is_empty() {
                Ok(Value::Object(coerced))
            } else {
                Err(errors)
            }
        }

        other => Err(vec![CoercionError::new(
            format!(
                "type `{}` ({}) cannot be used as an input type",
                other.name(),
                other.kind_name(),
            ),
            path,
        )]),
    }
}

/// Coerces an AST literal against `type_ref`, resolving variable
/// references from the coerced variable map.
///
/// Returns `Ok(None)` when the literal is a reference to an *unset*
/// variable; the position is then treated as "not provided" (defaults
/// apply).
pub fn coerce_literal(
    schema: &Schema,
    type_ref: &TypeRef,
    literal: &ast::Value,
    variables: &IndexMap<String, Value>,
    path: &[PathSegment],
) -> Result<Option<Value>, Errors> {
    if let ast::Value::Variable(variable) = literal {
        return match variables.get(variable.name.as_str()) {
            // Variable values were coerced up front; type compatibility at
            // this position is the validator's job.
            Some(value) => {
                if value.is_null() && !type_ref.is_nullable() {
                    Err(vec![CoercionError::new(
                        format!(
                            "variable `${}` is null, but `{type_ref}` is \
                             non-nullable",
                            variable.name,
                        ),
                        path,
                    )])
                } else {
                    Ok(Some(value.clone()))
                }
            }
            None => {
                if type_ref.is_nullable() {
                    Ok(None)
                } else {
                    Err(vec![CoercionError::new(
                        format!(
                            "variable `${}` for non-nullable type `{type_ref}` \
                             is not set",
                            variable.name,
                        ),
                        path,
                    )])
                }
            }
        };
    }

    if let ast::Value::Null(_) = literal {
        if type_ref.is_nullable() {
            return Ok(Some(Value::Null));
        }
        return Err(vec![CoercionError::new(
            format!("null literal for non-nullable type `{type_ref}`"),
            path,
        )]);
    }

    match type_ref {
        TypeRef::List { inner, .. } => match literal {
            ast::Value::List(list) => {
                let mut items = Vec::with_capacity(list.values.len());
                let mut errors: Errors = vec![];
                for (index, item) in list.values.iter().enumerate() {
                    let mut item_path = path.to_vec();
                    item_path.push(PathSegment::Index(index));
                    match coerce_literal(schema, inner, item, variables, &item_path) {
                        Ok(Some(value)) => items.push(value),
                        Ok(None) => items.push(Value::Null),
                        Err(errs) => errors.extend(errs),
                    }
                }
                if errors.is_empty() {
                    Ok(Some(Value::List(items)))
                } else {
                    Err(errors)
                }
            }
            _ => Ok(coerce_literal(schema, inner, literal, variables, path)?
                .map(|value| Value::List(vec![value]))),
        },

        TypeRef::Named { type_ref: named, .. } => {
            let Ok(target) = named.deref(schema) else {
                return Err(vec![CoercionError::new(
                    format!("unknown type `{}`", named.name()),
                    path,
                )]);
            };
            coerce_named_literal(schema, target, literal, variables, path).map(Some)
        }
    }
}

fn coerce_named_literal(
    schema: &Schema,
    target: &GraphQLType,
    literal: &ast::Value,
    variables: &IndexMap<String, Value>,
    path: &[PathSegment],
) -> Result<Value, Errors> {
    match target {
        GraphQLType::Scalar(scalar) => scalar
            .implementation
            .parse_literal(literal)
            .map_err(|message| vec![CoercionError::new(message, path)]),

        GraphQLType::Enum(enum_type) => match literal {
            ast::Value::Enum(enum_literal) => {
                if enum_type.value(&enum_literal.value).is_some() {
                    Ok(Value::Enum(enum_literal.value.clone()))
                } else {
                    Err(vec![CoercionError::new(
                        format!(
                            "`{}` is not a value of enum `{}`",
                            enum_literal.value, enum_type.name,
                        ),
                        path,
                    )])
                }
            }
            other => Err(vec![CoercionError::new(
                format!(
                    "enum `{}` cannot represent a {} literal",
                    enum_type.name,
                    other.kind_name(),
                ),
                path,
            )]),
        },

        GraphQLType::InputObject(input_object) => {
            let ast::Value::Object(object_literal) = literal else {
                return Err(vec![CoercionError::new(
                    format!(
                        "input object `{}` cannot represent a {} literal",
                        input_object.name,
                        literal.kind_name(),
                    ),
                    path,
                )]);
            };

            let mut coerced = IndexMap::new();
            let mut errors: Errors = vec![];

            for object_field in &object_literal.fields {
                if !input_object
                    .fields
                    .contains_key(object_field.name.as_str())
                {
                    errors.push(CoercionError::new(
                        format!(
                            "unknown field `{}` for input object `{}`",
                            object_field.name.as_str(),
                            input_object.name,
                        ),
                        path,
                    ));
                }
            }

            for (field_name, field_def) in &input_object.fields {
                let mut field_path = path.to_vec();
                field_path.push(PathSegment::Key(field_name.clone()));
                let provided = object_literal
                    .fields
                    .iter()
                    .find(|f| f.name.as_str() == field_name);

                match provided {
                    Some(object_field) => {
                        match coerce_literal(
                            schema,
                            &field_def.type_ref,
                            &object_field.value,
                            variables,
                            &field_path,
                        ) {
                            Ok(Some(value)) => {
                                coerced.insert(field_def.resolver_key().to_string(), value);
                            }
                            Ok(None) => {
                                apply_field_default(field_def, field_name, input_object.name.as_str(), &field_path, &mut coerced, &mut errors);
                            }
                            Err(errs) => errors.extend(errs),
                        }
                    }
                    None => {
                        apply_field_default(field_def, field_name, input_object.name.as_str(), &field_path, &mut coerced, &mut errors);
                    }
                }
            }

            if errors.is_empty() {
                Ok(Value::Object(coerced))
            } else {
                Err(errors)
            }
        }

        other => Err(vec![CoercionError::new(
            format!(
                "type `{}` ({}) cannot be used as an input type",
                other.name(),
                other.kind_name(),
            ),
            path,
        )]),
    }
}

fn apply_field_default(
    field_def: &crate::types::InputValue,
    field_name: &str,
    input_object_name: &str,
    field_path: &[PathSegment],
    coerced: &mut IndexMap<String, Value>,
    errors: &mut Errors,
) {
    if let Some(default) = &field_def.default_value {
        coerced.insert(field_def.resolver_key().to_string(), default.clone());
    } else if field_def.is_required() {
        errors.push(CoercionError::new(
            format!(
                "required field `{field_name}` of input object \
                 `{input_object_name}` was not provided"
            ),
            field_path,
        ));
    }
}
