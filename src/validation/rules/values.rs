use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::TypeRef;
use crate::validation::rules::Rule;
use crate::validation::ValidationContext;
use libgql_parser::ast;
use std::collections::HashSet;

/// Literal values must be coercible to the input type of the position they
/// appear at, recursively through lists and input objects.
pub(crate) struct ValuesOfCorrectType;

impl<'a> Rule<'a> for ValuesOfCorrectType {
    fn enter_argument(&mut self, ctx: &mut ValidationContext<'a>, argument: &'a ast::Argument) {
        let Some(expected) = ctx.current_input_type().cloned() else {
            return;
        };
        let mut errors = vec![];
        check_literal(ctx.schema, &expected, &argument.value, &mut errors);
        for (message, span) in errors {
            ctx.report(message, &[span]);
        }
    }

    fn enter_variable_definition(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        var_def: &'a ast::VariableDefinition,
    ) {
        let Some(default) = &var_def.default_value else {
            return;
        };
        let expected = TypeRef::from_ast(&var_def.var_type);
        let mut errors = vec![];
        check_literal(ctx.schema, &expected, default, &mut errors);
        for (message, span) in errors {
            ctx.report(message, &[span]);
        }
    }
}

type LiteralErrors<'a> = Vec<(String, &'a libgql_parser::SourceSpan)>;

fn check_literal<'a>(
    schema: &Schema,
    expected: &TypeRef,
    value: &'a ast::Value,
    errors: &mut LiteralErrors<'a>,
) {
    // Variable references are checked by the variables-in-allowed-position
    // rule, which knows the variable's declared type.
    if matches!(value, ast::Value::Variable(_)) {
        return;
    }

    if matches!(value, ast::Value::Null(_)) {
        if !expected.is_nullable() {
            errors.push((
                format!("expected a value of type `{expected}`, found null"),
                value.span(),
            ));
        }
        return;
    }

    match expected {
        TypeRef::List { inner, .. } => match value {
            ast::Value::List(list) => {
                for item in &list.values {
                    check_literal(schema, inner, item, errors);
                }
            }
            // Single values auto-wrap to one-element lists.
            other => check_literal(schema, inner, other, errors),
        },

        TypeRef::Named { type_ref: named, .. } => {
            let Ok(target) = named.deref(schema) else {
                return;
            };
            check_named_literal(schema, target, value, errors);
        }
    }
}

fn check_named_literal<'a>(
    schema: &Schema,
    target: &GraphQLType,
    value: &'a ast::Value,
    errors: &mut LiteralErrors<'a>,
) {
    match target {
        GraphQLType::Scalar(scalar) => {
            if let Err(message) = scalar.implementation.parse_literal(value) {
                errors.push((
                    format!("invalid value for scalar `{}`: {message}", scalar.name),
                    value.span(),
                ));
            }
        }

        GraphQLType::Enum(enum_type) => match value {
            ast::Value::Enum(enum_literal) => {
                if enum_type.value(&enum_literal.value).is_none() {
                    errors.push((
                        format!(
                            "`{}` is not a value of enum `{}`",
                            enum_literal.value, enum_type.name,
                        ),
                        &enum_literal.span,
                    ));
                }
            }
            other => {
                errors.push((
                    format!(
                        "enum `{}` cannot represent a {} literal",
                        enum_type.name,
                        other.kind_name(),
                    ),
                    other.span(),
                ));
            }
        },

        GraphQLType::InputObject(input_object) => {
            let ast::Value::Object(object_literal) = value else {
                errors.push((
                    format!(
                        "input object `{}` cannot represent a {} literal",
                        input_object.name,
                        value.kind_name(),
                    ),
                    value.span(),
                ));
                return;
            };

            let mut seen: HashSet<&str> = HashSet::new();
            for object_field in &object_literal.fields {
                let field_name = object_field.name.as_str();
                if !seen.insert(field_name) {
                    errors.push((
                        format!(
                            "duplicate field `{field_name}` in input object \
                             `{}`",
                            input_object.name,
                        ),
                        &object_field.name.span,
                    ));
                    continue;
                }
                match input_object.fields.get(field_name) {
                    Some(field_def) => {
                        check_literal(schema, &field_def.type_ref, &object_field.value, errors);
                    }
                    None => {
                        errors.push((
                            format!(
                                "unknown field `{field_name}` for input \
                                 object `{}`",
                                input_object.name,
                            ),
                            &object_field.name.span,
                        ));
                    }
                }
            }

            for (field_name, field_def) in &input_object.fields {
                if field_def.is_required() && !seen.contains(field_name.as_str()) {
                    errors.push((
                        format!(
                            "required field `{field_name}` of input object \
                             `{}` is missing",
                            input_object.name,
                        ),
                        value.span(),
                    ));
                }
            }
        }

        other => {
            errors.push((
                format!(
                    "type `{}` ({}) cannot be used as an input type",
                    other.name(),
                    other.kind_name(),
                ),
                value.span(),
            ));
        }
    }
}
