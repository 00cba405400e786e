//! The variable rules, implemented as one visitor because they share the
//! same usage-collection machinery: variables must be defined, used, of an
//! input type, and compatible with every position they appear in,
//! including positions reached through fragment spreads.

use crate::types::GraphQLType;
use crate::types::TypeRef;
use crate::validation::rules::Rule;
use crate::validation::ValidationContext;
use libgql_parser::ast;
use libgql_parser::SourceSpan;
use std::collections::HashMap;
use std::collections::HashSet;

/// One variable reference, with the input type expected at its position.
#[derive(Clone)]
struct Usage<'a> {
    name: &'a str,
    span: &'a SourceSpan,
    expected: Option<TypeRef>,
    /// Whether the position declares a default value (which relaxes the
    /// non-null requirement).
    position_has_default: bool,
}

struct OperationRecord<'a> {
    operation: &'a ast::OperationDefinition,
    usages: Vec<Usage<'a>>,
    spreads: Vec<&'a str>,
}

#[derive(Default)]
pub(crate) struct Variables<'a> {
    operations: Vec<OperationRecord<'a>>,
    fragment_usages: HashMap<&'a str, Vec<Usage<'a>>>,
    fragment_spreads: HashMap<&'a str, Vec<&'a str>>,

    current_usages: Vec<Usage<'a>>,
    current_spreads: Vec<&'a str>,
}

impl<'a> Rule<'a> for Variables<'a> {
    fn enter_operation(
        &mut self,
        ctx: &mut ValidationContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        self.current_usages.clear();
        self.current_spreads.clear();

        // Variables must declare input types.
        for var_def in &operation.variable_definitions {
            let inner_name = var_def.var_type.innermost_name();
            if let Some(inner) = ctx.schema.type_by_name(inner_name.as_str()) {
                if !inner.is_input_type() {
                    ctx.report(
                        format!(
                            "variable `${}` cannot have {} type `{}`; \
                             variables must have input types",
                            var_def.name,
                            inner.kind_name(),
                            inner.name(),
                        ),
                        &[var_def.var_type.span()],
                    );
                }
            }
        }
    }

    fn leave_operation(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        operation: &'a ast::OperationDefinition,
    ) {
        self.operations.push(OperationRecord {
            operation,
            usages: std::mem::take(&mut self.current_usages),
            spreads: std::mem::take(&mut self.current_spreads),
        });
    }

    fn enter_fragment_definition(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        _fragment: &'a ast::FragmentDefinition,
    ) {
        self.current_usages.clear();
        self.current_spreads.clear();
    }

    fn leave_fragment_definition(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        fragment: &'a ast::FragmentDefinition,
    ) {
        self.fragment_usages.insert(
            fragment.name.as_str(),
            std::mem::take(&mut self.current_usages),
        );
        self.fragment_spreads.insert(
            fragment.name.as_str(),
            std::mem::take(&mut self.current_spreads),
        );
    }

    fn enter_fragment_spread(
        &mut self,
        _ctx: &mut ValidationContext<'a>,
        spread: &'a ast::FragmentSpread,
    ) {
        self.current_spreads.push(spread.name.as_str());
    }

    fn enter_argument(&mut self, ctx: &mut ValidationContext<'a>, argument: &'a ast::Argument) {
        // Resolve the argument definition for its type and default.
        let arg_def = if let Some((_, directive_def)) = ctx.directive_context() {
            directive_def.and_then(|def| def.arguments.get(argument.name.as_str()))
        } else {
            ctx.field_def()
                .and_then(|field_def| field_def.argument(argument.name.as_str()))
        };

        collect_value_usages(
            ctx.schema,
            &argument.value,
            arg_def.map(|def| &def.type_ref),
            arg_def.is_some_and(|def| def.default_value.is_some()),
            &mut self.current_usages,
        );
    }

    fn leave_document(&mut self, ctx: &mut ValidationContext<'a>, _document: &'a ast::Document) {
        for record in &self.operations {
            let defs: HashMap<&str, &ast::VariableDefinition> = record
                .operation
                .variable_definitions
                .iter()
                .map(|var_def| (var_def.name.as_str(), var_def))
                .collect();

            let usages = self.transitive_usages(record);
            let operation_label = record
                .operation
                .name
                .as_ref()
                .map(|name| format!("operation `{name}`"))
                .unwrap_or_else(|| "the anonymous operation".to_string());

            let mut used: HashSet<&str> = HashSet::new();
            for usage in &usages {
                used.insert(usage.name);

                let Some(var_def) = defs.get(usage.name) else {
                    ctx.report(
                        format!(
                            "variable `${}` is not defined by {operation_label}",
                            usage.name,
                        ),
                        &[usage.span],
                    );
                    continue;
                };

                if let Some(expected) = &usage.expected {
                    let var_type = TypeRef::from_ast(&var_def.var_type);
                    if !position_allows_variable(
                        &var_type,
                        var_def.default_value.is_some(),
                        expected,
                        usage.position_has_default,
                    ) {
                        ctx.report(
                            format!(
                                "variable `${}` of type `{var_type}` cannot \
                                 be used where `{expected}` is expected",
                                usage.name,
                            ),
                            &[usage.span],
                        );
                    }
                }
            }

            for var_def in &record.operation.variable_definitions {
                if !used.contains(var_def.name.as_str()) {
                    ctx.report(
                        format!(
                            "variable `${}` is never used in {operation_label}",
                            var_def.name,
                        ),
                        &[&var_def.span],
                    );
                }
            }
        }
    }
}

impl<'a> Variables<'a> {
    /// An operation's usages plus those of every fragment it reaches.
    fn transitive_usages(&self, record: &OperationRecord<'a>) -> Vec<Usage<'a>> {
        let mut usages = record.usages.clone();
        let mut queue: Vec<&str> = record.spreads.clone();
        let mut visited: HashSet<&str> = HashSet::new();
        while let Some(fragment_name) = queue.pop() {
            if !visited.insert(fragment_name) {
                continue;
            }
            if let Some(fragment_usages) = self.fragment_usages.get(fragment_name) {
                usages.extend(fragment_usages.iter().cloned());
            }
            if let Some(spreads) = self.fragment_spreads.get(fragment_name) {
                queue.extend(spreads.iter().copied());
            }
        }
        usages
    }
}

/// Walks a value literal collecting variable references and the input type
/// each sits at.
fn collect_value_usages<'a>(
    schema: &crate::schema::Schema,
    value: &'a ast::Value,
    expected: Option<&TypeRef>,
    position_has_default: bool,
    out: &mut Vec<Usage<'a>>,
) {
    match value {
        ast::Value::Variable(variable) => {
            out.push(Usage {
                name: variable.name.as_str(),
                span: &variable.span,
                expected: expected.cloned(),
                position_has_default,
            });
        }

        ast::Value::List(list) => {
            let item_type = match expected {
                Some(TypeRef::List { inner, .. }) => Some(inner.as_ref()),
                other => other,
            };
            for item in &list.values {
                collect_value_usages(schema, item, item_type, false, out);
            }
        }

        ast::Value::Object(object) => {
            let input_object = expected
                .and_then(|type_ref| schema.type_by_name(type_ref.innermost_name()))
                .and_then(|type_| match type_ {
                    GraphQLType::InputObject(input_object) => Some(input_object),
                    _ => None,
                });
            for field in &object.fields {
                let field_def =
                    input_object.and_then(|io| io.fields.get(field.name.as_str()));
                collect_value_usages(
                    schema,
                    &field.value,
                    field_def.map(|def| &def.type_ref),
                    field_def.is_some_and(|def| def.default_value.is_some()),
                    out,
                );
            }
        }

        _ => {}
    }
}

/// The variables-in-allowed-position compatibility rule: the variable's
/// type must be at least as strict as the position's, with defaults on
/// either side relaxing an outer non-null.
fn position_allows_variable(
    var_type: &TypeRef,
    var_has_default: bool,
    position_type: &TypeRef,
    position_has_default: bool,
) -> bool {
    if !position_type.is_nullable() && var_type.is_nullable() {
        if !(var_has_default || position_has_default) {
            return false;
        }
        return var_type.is_sub_type_of(&position_type.with_nullable());
    }
    var_type.is_sub_type_of(position_type)
}
