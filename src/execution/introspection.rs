//! Introspection execution.
//!
//! Introspection fields resolve lazily: `__schema` and `__type` produce
//! compact *representation* values (an object tagged with what it points
//! at), and the resolvers registered here for the `__Schema`/`__Type`/…
//! field types expand those representations one field at a time against
//! the live [`Schema`]. Laziness is what makes cyclic type graphs (and
//! `ofType` chains) terminate: nothing is expanded unless the query asks
//! for it.

use crate::execution::FieldError;
use crate::execution::Resolved;
use crate::execution::Resolver;
use crate::execution::ResolverContext;
use crate::schema::Schema;
use crate::types::DeprecationState;
use crate::types::GraphQLType;
use crate::types::InputValue;
use crate::types::TypeRef;
use crate::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::OnceLock;

// =============================================================================
// Representation values
// =============================================================================

/// The value `__schema` resolves to.
pub(crate) fn schema_repr() -> Value {
    Value::object([("__meta".to_string(), Value::String("schema".to_string()))])
}

/// `__type(name:)`: a named-type representation, or null for unknown
/// names.
pub(crate) fn named_type_repr_checked(schema: &Schema, name_arg: Option<&Value>) -> Value {
    let Some(Value::String(name)) = name_arg else {
        return Value::Null;
    };
    if schema.type_by_name(name).is_some() {
        named_type_repr(name)
    } else {
        Value::Null
    }
}

fn named_type_repr(name: &str) -> Value {
    Value::object([
        ("__meta".to_string(), Value::String("type".to_string())),
        ("form".to_string(), Value::String("named".to_string())),
        ("name".to_string(), Value::String(name.to_string())),
    ])
}

fn wrapper_repr(form: &str, of_type: Value) -> Value {
    Value::object([
        ("__meta".to_string(), Value::String("type".to_string())),
        ("form".to_string(), Value::String(form.to_string())),
        ("ofType".to_string(), of_type),
    ])
}

/// Expands a [`TypeRef`] into its introspection wrapping chain:
/// `[String!]!` becomes NON_NULL → LIST → NON_NULL → String.
fn type_ref_repr(type_ref: &TypeRef) -> Value {
    match type_ref {
        TypeRef::Named { nullable, type_ref } => {
            let named = named_type_repr(type_ref.name());
            if *nullable {
                named
            } else {
                wrapper_repr("nonnull", named)
            }
        }
        TypeRef::List { inner, nullable } => {
            let list = wrapper_repr("list", type_ref_repr(inner));
            if *nullable {
                list
            } else {
                wrapper_repr("nonnull", list)
            }
        }
    }
}

fn field_repr(type_name: &str, field_name: &str) -> Value {
    Value::object([
        ("onType".to_string(), Value::String(type_name.to_string())),
        ("name".to_string(), Value::String(field_name.to_string())),
    ])
}

fn argument_repr(type_name: &str, field_name: &str, argument_name: &str) -> Value {
    Value::object([
        ("onType".to_string(), Value::String(type_name.to_string())),
        ("onField".to_string(), Value::String(field_name.to_string())),
        ("name".to_string(), Value::String(argument_name.to_string())),
    ])
}

fn input_field_repr(type_name: &str, field_name: &str) -> Value {
    Value::object([
        ("onType".to_string(), Value::String(type_name.to_string())),
        ("name".to_string(), Value::String(field_name.to_string())),
    ])
}

fn directive_argument_repr(directive_name: &str, argument_name: &str) -> Value {
    Value::object([
        (
            "onDirective".to_string(),
            Value::String(directive_name.to_string()),
        ),
        ("name".to_string(), Value::String(argument_name.to_string())),
    ])
}

fn enum_value_repr(enum_name: &str, value_name: &str) -> Value {
    Value::object([
        ("onType".to_string(), Value::String(enum_name.to_string())),
        ("name".to_string(), Value::String(value_name.to_string())),
    ])
}

fn directive_repr(name: &str) -> Value {
    Value::object([("name".to_string(), Value::String(name.to_string()))])
}

// =============================================================================
// Representation readers
// =============================================================================

fn repr_str<'v>(root: &'v Value, key: &str) -> Result<&'v str, FieldError> {
    match root.get(key) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(FieldError::new(format!(
            "malformed introspection value: missing `{key}`"
        ))),
    }
}

fn looked_up_type<'s>(schema: &'s Schema, name: &str) -> Result<&'s GraphQLType, FieldError> {
    schema
        .type_by_name(name)
        .ok_or_else(|| FieldError::new(format!("introspected type `{name}` disappeared")))
}

fn looked_up_field<'s>(
    schema: &'s Schema,
    type_name: &str,
    field_name: &str,
) -> Result<&'s crate::types::Field, FieldError> {
    looked_up_type(schema, type_name)?
        .field(field_name)
        .ok_or_else(|| {
            FieldError::new(format!(
                "introspected field `{type_name}.{field_name}` disappeared"
            ))
        })
}

fn optional_string(value: Option<&str>) -> Value {
    match value {
        Some(s) => Value::String(s.to_string()),
        None => Value::Null,
    }
}

fn deprecation_flag(state: &DeprecationState) -> Value {
    Value::Bool(state.is_deprecated())
}

fn deprecation_reason(state: &DeprecationState) -> Value {
    optional_string(state.reason())
}

fn input_value_reprs<'a>(
    values: impl Iterator<Item = &'a InputValue>,
    make: impl Fn(&str) -> Value,
) -> Value {
    Value::List(values.map(|value| make(&value.name)).collect())
}

// =============================================================================
// Resolver registry
// =============================================================================

type Registry = HashMap<(String, String), Arc<dyn Resolver>>;

/// The resolver for an introspection field, if `type_name.field_name` is
/// one.
pub(crate) fn builtin_resolver(
    type_name: &str,
    field_name: &str,
) -> Option<&'static Arc<dyn Resolver>> {
    if !type_name.starts_with("__") {
        return None;
    }
    registry().get(&(type_name.to_string(), field_name.to_string()))
}

fn register<F>(registry: &mut Registry, type_name: &str, field_name: &str, f: F)
where
    F: Fn(ResolverContext<'_>) -> Result<Resolved, FieldError> + Send + Sync + 'static,
{
    registry.insert((type_name.to_string(), field_name.to_string()), Arc::new(f));
}

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut r = Registry::new();
        register_schema_fields(&mut r);
        register_type_fields(&mut r);
        register_field_fields(&mut r);
        register_input_value_fields(&mut r);
        register_enum_value_fields(&mut r);
        register_directive_fields(&mut r);
        r
    })
}

fn register_schema_fields(r: &mut Registry) {
    register(r, "__Schema", "description", |ctx| {
        Ok(Resolved::Value(optional_string(ctx.info.schema.description())))
    });
    register(r, "__Schema", "types", |ctx| {
        let types = ctx
            .info
            .schema
            .types()
            .map(|t| named_type_repr(t.name()))
            .collect();
        Ok(Resolved::Value(Value::List(types)))
    });
    register(r, "__Schema", "queryType", |ctx| {
        Ok(Resolved::Value(named_type_repr(
            &ctx.info.schema.query_type().name,
        )))
    });
    register(r, "__Schema", "mutationType", |ctx| {
        Ok(Resolved::Value(match ctx.info.schema.mutation_type() {
            Some(mutation) => named_type_repr(&mutation.name),
            None => Value::Null,
        }))
    });
    register(r, "__Schema", "subscriptionType", |ctx| {
        Ok(Resolved::Value(match ctx.info.schema.subscription_type() {
            Some(subscription) => named_type_repr(&subscription.name),
            None => Value::Null,
        }))
    });
    register(r, "__Schema", "directives", |ctx| {
        let mut names: Vec<&str> = ctx
            .info
            .schema
            .directives()
            .map(|d| d.name.as_str())
            .collect();
        names.sort_unstable();
        Ok(Resolved::Value(Value::List(
            names.into_iter().map(directive_repr).collect(),
        )))
    });
}

fn register_type_fields(r: &mut Registry) {
    register(r, "__Type", "kind", |ctx| {
        let kind = match repr_str(ctx.root, "form")? {
            "list" => "LIST".to_string(),
            "nonnull" => "NON_NULL".to_string(),
            _ => {
                let type_ = looked_up_type(ctx.info.schema, repr_str(ctx.root, "name")?)?;
                match type_ {
                    GraphQLType::Scalar(_) => "SCALAR",
                    GraphQLType::Object(_) => "OBJECT",
                    GraphQLType::Interface(_) => "INTERFACE",
                    GraphQLType::Union(_) => "UNION",
                    GraphQLType::Enum(_) => "ENUM",
                    GraphQLType::InputObject(_) => "INPUT_OBJECT",
                }
                .to_string()
            }
        };
        Ok(Resolved::Value(Value::Enum(kind)))
    });

    register(r, "__Type", "name", |ctx| {
        Ok(Resolved::Value(match ctx.root.get("name") {
            Some(Value::String(name)) => Value::String(name.clone()),
            _ => Value::Null,
        }))
    });

    register(r, "__Type", "description", |ctx| {
        let value = match ctx.root.get("name") {
            Some(Value::String(name)) => {
                let type_ = looked_up_type(ctx.info.schema, name)?;
                optional_string(type_.description())
            }
            _ => Value::Null,
        };
        Ok(Resolved::Value(value))
    });

    register(r, "__Type", "fields", |ctx| {
        let Some(Value::String(name)) = ctx.root.get("name") else {
            return Ok(Resolved::Value(Value::Null));
        };
        let type_ = looked_up_type(ctx.info.schema, name)?;
        let Some(fields) = type_.fields() else {
            return Ok(Resolved::Value(Value::Null));
        };
        let include_deprecated =
            matches!(ctx.args.get("includeDeprecated"), Some(Value::Bool(true)));
        let reprs = fields
            .values()
            .filter(|field| !field.name.starts_with("__"))
            .filter(|field| include_deprecated || !field.deprecation.is_deprecated())
            .map(|field| field_repr(name, &field.name))
            .collect();
        Ok(Resolved::Value(Value::List(reprs)))
    });

    register(r, "__Type", "interfaces", |ctx| {
        let Some(Value::String(name)) = ctx.root.get("name") else {
            return Ok(Resolved::Value(Value::Null));
        };
        let interfaces = match looked_up_type(ctx.info.schema, name)? {
            GraphQLType::Object(object) => &object.interfaces,
            GraphQLType::Interface(interface) => &interface.interfaces,
            _ => return Ok(Resolved::Value(Value::Null)),
        };
        Ok(Resolved::Value(Value::List(
            interfaces.iter().map(|i| named_type_repr(i)).collect(),
        )))
    });

    register(r, "__Type", "possibleTypes", |ctx| {
        let Some(Value::String(name)) = ctx.root.get("name") else {
            return Ok(Resolved::Value(Value::Null));
        };
        let type_ = looked_up_type(ctx.info.schema, name)?;
        if !type_.is_abstract() {
            return Ok(Resolved::Value(Value::Null));
        }
        let possible = ctx
            .info
            .schema
            .possible_types(type_)
            .into_iter()
            .map(|object| named_type_repr(&object.name))
            .collect();
        Ok(Resolved::Value(Value::List(possible)))
    });

    register(r, "__Type", "enumValues", |ctx| {
        let Some(Value::String(name)) = ctx.root.get("name") else {
            return Ok(Resolved::Value(Value::Null));
        };
        let GraphQLType::Enum(enum_type) = looked_up_type(ctx.info.schema, name)? else {
            return Ok(Resolved::Value(Value::Null));
        };
        let include_deprecated =
            matches!(ctx.args.get("includeDeprecated"), Some(Value::Bool(true)));
        let reprs = enum_type
            .values
            .values()
            .filter(|value| include_deprecated || !value.deprecation.is_deprecated())
            .map(|value| enum_value_repr(name, &value.name))
            .collect();
        Ok(Resolved::Value(Value::List(reprs)))
    });

    register(r, "__Type", "inputFields", |ctx| {
        let Some(Value::String(name)) = ctx.root.get("name") else {
            return Ok(Resolved::Value(Value::Null));
        };
        let GraphQLType::InputObject(input_object) = looked_up_type(ctx.info.schema, name)?
        else {
            return Ok(Resolved::Value(Value::Null));
        };
        Ok(Resolved::Value(input_value_reprs(
            input_object.fields.values(),
            |field_name| input_field_repr(name, field_name),
        )))
    });

    register(r, "__Type", "ofType", |ctx| {
        Ok(Resolved::Value(
            ctx.root.get("ofType").cloned().unwrap_or(Value::Null),
        ))
    });
}

fn register_field_fields(r: &mut Registry) {
    register(r, "__Field", "name", |ctx| {
        Ok(Resolved::Value(Value::String(
            repr_str(ctx.root, "name")?.to_string(),
        )))
    });
    register(r, "__Field", "description", |ctx| {
        let field = looked_up_field(
            ctx.info.schema,
            repr_str(ctx.root, "onType")?,
            repr_str(ctx.root, "name")?,
        )?;
        Ok(Resolved::Value(optional_string(field.description.as_deref())))
    });
    register(r, "__Field", "args", |ctx| {
        let type_name = repr_str(ctx.root, "onType")?;
        let field_name = repr_str(ctx.root, "name")?;
        let field = looked_up_field(ctx.info.schema, type_name, field_name)?;
        Ok(Resolved::Value(input_value_reprs(
            field.arguments.values(),
            |argument_name| argument_repr(type_name, field_name, argument_name),
        )))
    });
    register(r, "__Field", "type", |ctx| {
        let field = looked_up_field(
            ctx.info.schema,
            repr_str(ctx.root, "onType")?,
            repr_str(ctx.root, "name")?,
        )?;
        Ok(Resolved::Value(type_ref_repr(&field.type_ref)))
    });
    register(r, "__Field", "isDeprecated", |ctx| {
        let field = looked_up_field(
            ctx.info.schema,
            repr_str(ctx.root, "onType")?,
            repr_str(ctx.root, "name")?,
        )?;
        Ok(Resolved::Value(deprecation_flag(&field.deprecation)))
    });
    register(r, "__Field", "deprecationReason", |ctx| {
        let field = looked_up_field(
            ctx.info.schema,
            repr_str(ctx.root, "onType")?,
            repr_str(ctx.root, "name")?,
        )?;
        Ok(Resolved::Value(deprecation_reason(&field.deprecation)))
    });
}

fn looked_up_input_value<'s>(
    schema: &'s Schema,
    root: &Value,
) -> Result<&'s InputValue, FieldError> {
    let name = repr_str(root, "name")?;

    if let Some(Value::String(directive_name)) = root.get("onDirective") {
        return schema
            .directive_by_name(directive_name)
            .and_then(|directive| directive.arguments.get(name))
            .ok_or_else(|| {
                FieldError::new(format!(
                    "introspected argument `@{directive_name}({name}:)` disappeared"
                ))
            });
    }

    let type_name = repr_str(root, "onType")?;
    if let Some(Value::String(field_name)) = root.get("onField") {
        let field = looked_up_field(schema, type_name, field_name)?;
        return field.arguments.get(name).ok_or_else(|| {
            FieldError::new(format!(
                "introspected argument `{type_name}.{field_name}({name}:)` disappeared"
            ))
        });
    }

    match looked_up_type(schema, type_name)? {
        GraphQLType::InputObject(input_object) => {
            input_object.fields.get(name).ok_or_else(|| {
                FieldError::new(format!(
                    "introspected input field `{type_name}.{name}` disappeared"
                ))
            })
        }
        _ => Err(FieldError::new(format!(
            "introspected input field `{type_name}.{name}` disappeared"
        ))),
    }
}

fn register_input_value_fields(r: &mut Registry) {
    register(r, "__InputValue", "name", |ctx| {
        Ok(Resolved::Value(Value::String(
            repr_str(ctx.root, "name")?.to_string(),
        )))
    });
    register(r, "__InputValue", "description", |ctx| {
        let input_value = looked_up_input_value(ctx.info.schema, ctx.root)?;
        Ok(Resolved::Value(optional_string(
            input_value.description.as_deref(),
        )))
    });
    register(r, "__InputValue", "type", |ctx| {
        let input_value = looked_up_input_value(ctx.info.schema, ctx.root)?;
        Ok(Resolved::Value(type_ref_repr(&input_value.type_ref)))
    });
    register(r, "__InputValue", "defaultValue", |ctx| {
        let input_value = looked_up_input_value(ctx.info.schema, ctx.root)?;
        Ok(Resolved::Value(match &input_value.default_value {
            Some(default) => Value::String(default.to_literal()),
            None => Value::Null,
        }))
    });
}

fn register_enum_value_fields(r: &mut Registry) {
    let looked_up =
        |schema: &Schema, root: &Value| -> Result<crate::types::EnumValue, FieldError> {
            let enum_name = repr_str(root, "onType")?;
            let value_name = repr_str(root, "name")?;
            match schema.type_by_name(enum_name) {
                Some(GraphQLType::Enum(enum_type)) => enum_type
                    .value(value_name)
                    .cloned()
                    .ok_or_else(|| {
                        FieldError::new(format!(
                            "introspected enum value `{enum_name}.{value_name}` disappeared"
                        ))
                    }),
                _ => Err(FieldError::new(format!(
                    "introspected enum `{enum_name}` disappeared"
                ))),
            }
        };

    register(r, "__EnumValue", "name", |ctx| {
        Ok(Resolved::Value(Value::String(
            repr_str(ctx.root, "name")?.to_string(),
        )))
    });
    register(r, "__EnumValue", "description", move |ctx| {
        let value = looked_up(ctx.info.schema, ctx.root)?;
        Ok(Resolved::Value(optional_string(value.description.as_deref())))
    });
    register(r, "__EnumValue", "isDeprecated", move |ctx| {
        let value = looked_up(ctx.info.schema, ctx.root)?;
        Ok(Resolved::Value(deprecation_flag(&value.deprecation)))
    });
    register(r, "__EnumValue", "deprecationReason", move |ctx| {
        let value = looked_up(ctx.info.schema, ctx.root)?;
        Ok(Resolved::Value(deprecation_reason(&value.deprecation)))
    });
}

fn looked_up_directive<'s>(
    schema: &'s Schema,
    root: &Value,
) -> Result<&'s crate::types::Directive, FieldError> {
    let name = repr_str(root, "name")?;
    schema
        .directive_by_name(name)
        .ok_or_else(|| FieldError::new(format!("introspected directive `@{name}` disappeared")))
}

fn register_directive_fields(r: &mut Registry) {
    register(r, "__Directive", "name", |ctx| {
        Ok(Resolved::Value(Value::String(
            repr_str(ctx.root, "name")?.to_string(),
        )))
    });
    register(r, "__Directive", "description", |ctx| {
        let directive = looked_up_directive(ctx.info.schema, ctx.root)?;
        Ok(Resolved::Value(optional_string(
            directive.description.as_deref(),
        )))
    });
    register(r, "__Directive", "locations", |ctx| {
        let directive = looked_up_directive(ctx.info.schema, ctx.root)?;
        Ok(Resolved::Value(Value::List(
            directive
                .locations
                .iter()
                .map(|location| Value::Enum(location.as_str().to_string()))
                .collect(),
        )))
    });
    register(r, "__Directive", "args", |ctx| {
        let directive = looked_up_directive(ctx.info.schema, ctx.root)?;
        let directive_name = directive.name.clone();
        Ok(Resolved::Value(input_value_reprs(
            directive.arguments.values(),
            |argument_name| directive_argument_repr(&directive_name, argument_name),
        )))
    });
    register(r, "__Directive", "isRepeatable", |ctx| {
        let directive = looked_up_directive(ctx.info.schema, ctx.root)?;
        Ok(Resolved::Value(Value::Bool(directive.repeatable)))
    });
}
