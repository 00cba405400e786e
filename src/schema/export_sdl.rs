//! SDL export: renders a built [`Schema`] back to schema definition
//! language.

use crate::schema::Schema;
use crate::types::DirectiveAnnotation;
use crate::types::Field;
use crate::types::GraphQLType;
use crate::types::InputValue;

/// Prints `schema` as SDL.
///
/// Output is in declaration order and round-trippable: rebuilding from the
/// printed SDL (with the same scalar implementations and resolvers)
/// produces an equivalent schema. Built-in scalars, built-in directives,
/// and the introspection types are omitted.
pub fn print_schema(schema: &Schema) -> String {
    let mut out = String::new();

    if schema.description.is_some() || has_non_default_roots(schema) {
        if let Some(description) = &schema.description {
            out.push_str(&format!("\"\"\"{description}\"\"\"\n"));
        }
        out.push_str("schema {\n");
        out.push_str(&format!("  query: {}\n", schema.query_type.name()));
        if let Some(mutation) = &schema.mutation_type {
            out.push_str(&format!("  mutation: {}\n", mutation.name()));
        }
        if let Some(subscription) = &schema.subscription_type {
            out.push_str(&format!("  subscription: {}\n", subscription.name()));
        }
        out.push_str("}\n\n");
    }

    let mut directives: Vec<_> = schema.schema_directives().collect();
    directives.sort_by(|a, b| a.name.cmp(&b.name));
    for directive in directives {
        write_description(&mut out, directive.description.as_deref(), "");
        out.push_str(&format!("directive @{}", directive.name));
        write_arguments_inline(&mut out, directive.arguments.values());
        if directive.repeatable {
            out.push_str(" repeatable");
        }
        let locations: Vec<&str> = directive.locations.iter().map(|l| l.as_str()).collect();
        out.push_str(&format!(" on {}\n\n", locations.join(" | ")));
    }

    for type_ in schema.schema_types() {
        if type_.name().starts_with("__") {
            continue;
        }
        write_type(&mut out, type_);
        out.push('\n');
    }

    // Drop the trailing blank line.
    while out.ends_with("\n\n") {
        out.pop();
    }
    out
}

fn has_non_default_roots(schema: &Schema) -> bool {
    schema.query_type.name() != "Query"
        || schema
            .mutation_type
            .as_ref()
            .is_some_and(|m| m.name() != "Mutation")
        || schema
            .subscription_type
            .as_ref()
            .is_some_and(|s| s.name() != "Subscription")
}

fn write_description(out: &mut String, description: Option<&str>, indent: &str) {
    if let Some(description) = description {
        if description.contains('\n') {
            out.push_str(&format!("{indent}\"\"\"\n"));
            for line in description.split('\n') {
                out.push_str(&format!("{indent}{line}\n"));
            }
            out.push_str(&format!("{indent}\"\"\"\n"));
        } else {
            out.push_str(&format!("{indent}\"\"\"{description}\"\"\"\n"));
        }
    }
}

fn write_annotations(out: &mut String, annotations: &[DirectiveAnnotation]) {
    for annotation in annotations {
        out.push_str(&format!(" @{}", annotation.directive_name()));
        if !annotation.args().is_empty() {
            let args: Vec<String> = annotation
                .args()
                .iter()
                .map(|(name, value)| format!("{name}: {}", value.to_literal()))
                .collect();
            out.push_str(&format!("({})", args.join(", ")));
        }
    }
}

fn write_type(out: &mut String, type_: &GraphQLType) {
    match type_ {
        GraphQLType::Scalar(scalar) => {
            write_description(out, scalar.description.as_deref(), "");
            out.push_str(&format!("scalar {}", scalar.name));
            write_annotations(out, &scalar.directives);
            out.push('\n');
        }

        GraphQLType::Object(object) => {
            write_description(out, object.description.as_deref(), "");
            out.push_str(&format!("type {}", object.name));
            write_implements(out, &object.interfaces);
            write_annotations(out, &object.directives);
            write_fields_block(out, object.fields.values());
        }

        GraphQLType::Interface(interface) => {
            write_description(out, interface.description.as_deref(), "");
            out.push_str(&format!("interface {}", interface.name));
            write_implements(out, &interface.interfaces);
            write_annotations(out, &interface.directives);
            write_fields_block(out, interface.fields.values());
        }

        GraphQLType::Union(union_type) => {
            write_description(out, union_type.description.as_deref(), "");
            out.push_str(&format!("union {}", union_type.name));
            write_annotations(out, &union_type.directives);
            out.push_str(&format!(" = {}\n", union_type.members.join(" | ")));
        }

        GraphQLType::Enum(enum_type) => {
            write_description(out, enum_type.description.as_deref(), "");
            out.push_str(&format!("enum {}", enum_type.name));
            write_annotations(out, &enum_type.directives);
            out.push_str(" {\n");
            for value in enum_type.values.values() {
                write_description(out, value.description.as_deref(), "  ");
                out.push_str(&format!("  {}", value.name));
                write_annotations(out, &value.directives);
                out.push('\n');
            }
            out.push_str("}\n");
        }

        GraphQLType::InputObject(input_object) => {
            write_description(out, input_object.description.as_deref(), "");
            out.push_str(&format!("input {}", input_object.name));
            write_annotations(out, &input_object.directives);
            out.push_str(" {\n");
            for field in input_object.fields.values() {
                write_description(out, field.description.as_deref(), "  ");
                out.push_str("  ");
                write_input_value(out, field);
                out.push('\n');
            }
            out.push_str("}\n");
        }
    }
}

fn write_implements(out: &mut String, interfaces: &[String]) {
    if !interfaces.is_empty() {
        out.push_str(&format!(" implements {}", interfaces.join(" & ")));
    }
}

fn write_fields_block<'a>(out: &mut String, fields: impl Iterator<Item = &'a Field>) {
    out.push_str(" {\n");
    for field in fields {
        if field.name.starts_with("__") {
            continue;
        }
        write_description(out, field.description.as_deref(), "  ");
        out.push_str(&format!("  {}", field.name));
        write_arguments_inline(out, field.arguments.values());
        out.push_str(&format!(": {}", field.type_ref));
        write_annotations(out, &field.directives);
        out.push('\n');
    }
    out.push_str("}\n");
}

fn write_arguments_inline<'a>(
    out: &mut String,
    mut arguments: impl Iterator<Item = &'a InputValue>,
) {
    let Some(first) = arguments.next() else {
        return;
    };
    out.push('(');
    write_input_value(out, first);
    for argument in arguments {
        out.push_str(", ");
        write_input_value(out, argument);
    }
    out.push(')');
}

fn write_input_value(out: &mut String, value: &InputValue) {
    out.push_str(&format!("{}: {}", value.name, value.type_ref));
    if let Some(default) = &value.default_value {
        out.push_str(&format!(" = {}", default.to_literal()));
    }
    write_annotations(out, &value.directives);
}
