//! Whole-schema invariant validation, run at the end of every build.

use crate::schema::Schema;
use crate::types::GraphQLType;
use crate::types::InputValue;
use crate::types::TypeRef;
use std::collections::HashSet;

/// A violated schema invariant. Any of these aborts the build.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum SchemaValidationError {
    #[error("`{referencer}` references the type `{type_name}`, which is not defined")]
    UnresolvedTypeReference {
        referencer: String,
        type_name: String,
    },

    #[error("the {operation} root type `{type_name}` is not an object type")]
    RootTypeNotObject {
        operation: &'static str,
        type_name: String,
    },

    #[error(
        "`{referencer}` must have an input type, but `{type_name}` is \
         {kind_name} type"
    )]
    NonInputTypeInInputPosition {
        referencer: String,
        type_name: String,
        kind_name: &'static str,
    },

    #[error(
        "`{referencer}` must have an output type, but `{type_name}` is \
         {kind_name} type"
    )]
    NonOutputTypeInOutputPosition {
        referencer: String,
        type_name: String,
        kind_name: &'static str,
    },

    #[error("`{type_name}` implements `{interface_name}`, which is not an interface type")]
    ImplementsNonInterface {
        type_name: String,
        interface_name: String,
    },

    #[error(
        "`{type_name}` implements `{interface_name}` but does not define \
         the field `{field_name}`"
    )]
    MissingInterfaceField {
        type_name: String,
        interface_name: String,
        field_name: String,
    },

    #[error(
        "`{type_name}.{field_name}` has type `{actual}`, which is not \
         assignable to `{expected}` declared by interface `{interface_name}`"
    )]
    IncompatibleInterfaceFieldType {
        type_name: String,
        interface_name: String,
        field_name: String,
        expected: String,
        actual: String,
    },

    #[error(
        "`{type_name}.{field_name}` is missing the argument \
         `{argument_name}` declared by interface `{interface_name}`"
    )]
    MissingInterfaceFieldArgument {
        type_name: String,
        interface_name: String,
        field_name: String,
        argument_name: String,
    },

    #[error(
        "`{type_name}.{field_name}({argument_name}:)` has type `{actual}`, \
         but interface `{interface_name}` declares it as `{expected}`"
    )]
    IncompatibleInterfaceFieldArgumentType {
        type_name: String,
        interface_name: String,
        field_name: String,
        argument_name: String,
        expected: String,
        actual: String,
    },

    #[error(
        "`{type_name}.{field_name}` adds the required argument \
         `{argument_name}` not declared by interface `{interface_name}`; \
         added arguments must be optional"
    )]
    RequiredArgumentAddedByImplementation {
        type_name: String,
        interface_name: String,
        field_name: String,
        argument_name: String,
    },

    #[error("the union `{type_name}` lists `{member_name}`, which is not an object type")]
    UnionMemberNotObject {
        type_name: String,
        member_name: String,
    },

    #[error("the {kind_name} type `{type_name}` must define at least one {element}")]
    EmptyType {
        type_name: String,
        kind_name: &'static str,
        element: &'static str,
    },

    #[error(
        "the input object `{type_name}` forms an unbreakable non-null cycle \
         through `{cycle}`"
    )]
    InputObjectNonNullCycle { type_name: String, cycle: String },
}

impl Schema {
    /// Checks every schema invariant; an empty result means the schema is
    /// sound. The builder calls this automatically and aborts on errors.
    pub fn validate(&self) -> Vec<SchemaValidationError> {
        let mut errors = vec![];
        self.validate_root_types(&mut errors);
        for type_ in self.types() {
            match type_ {
                GraphQLType::Object(object) => {
                    self.validate_fields(
                        &object.name,
                        &object.fields,
                        &mut errors,
                    );
                    self.validate_implements(
                        &object.name,
                        &object.interfaces,
                        &object.fields,
                        &mut errors,
                    );
                    if object.fields.keys().all(|name| name.starts_with("__")) {
                        errors.push(SchemaValidationError::EmptyType {
                            type_name: object.name.clone(),
                            kind_name: "object",
                            element: "field",
                        });
                    }
                }
                GraphQLType::Interface(interface) => {
                    self.validate_fields(
                        &interface.name,
                        &interface.fields,
                        &mut errors,
                    );
                    self.validate_implements(
                        &interface.name,
                        &interface.interfaces,
                        &interface.fields,
                        &mut errors,
                    );
                }
                GraphQLType::Union(union_type) => {
                    if union_type.members.is_empty() {
                        errors.push(SchemaValidationError::EmptyType {
                            type_name: union_type.name.clone(),
                            kind_name: "union",
                            element: "member",
                        });
                    }
                    for member in &union_type.members {
                        match self.type_by_name(member) {
                            None => errors.push(
                                SchemaValidationError::UnresolvedTypeReference {
                                    referencer: union_type.name.clone(),
                                    type_name: member.clone(),
                                },
                            ),
                            Some(GraphQLType::Object(_)) => {}
                            Some(_) => errors.push(
                                SchemaValidationError::UnionMemberNotObject {
                                    type_name: union_type.name.clone(),
                                    member_name: member.clone(),
                                },
                            ),
                        }
                    }
                }
                GraphQLType::Enum(enum_type) => {
                    if enum_type.values.is_empty() {
                        errors.push(SchemaValidationError::EmptyType {
                            type_name: enum_type.name.clone(),
                            kind_name: "enum",
                            element: "value",
                        });
                    }
                }
                GraphQLType::InputObject(input_object) => {
                    if input_object.fields.is_empty() {
                        errors.push(SchemaValidationError::EmptyType {
                            type_name: input_object.name.clone(),
                            kind_name: "input object",
                            element: "field",
                        });
                    }
                    for (field_name, field) in &input_object.fields {
                        self.validate_input_position(
                            &format!("{}.{}", input_object.name, field_name),
                            &field.type_ref,
                            &mut errors,
                        );
                    }
                    self.validate_input_object_cycles(&input_object.name, &mut errors);
                }
                GraphQLType::Scalar(_) => {}
            }
        }

        for directive in self.directives() {
            for (argument_name, argument) in &directive.arguments {
                self.validate_input_position(
                    &format!("@{}({argument_name}:)", directive.name),
                    &argument.type_ref,
                    &mut errors,
                );
            }
        }

        errors
    }

    fn validate_root_types(&self, errors: &mut Vec<SchemaValidationError>) {
        let roots = [
            (Some(&self.query_type), "query"),
            (self.mutation_type.as_ref(), "mutation"),
            (self.subscription_type.as_ref(), "subscription"),
        ];
        for (root, operation) in roots {
            let Some(root) = root else { continue };
            match self.type_by_name(root.name()) {
                None => errors.push(SchemaValidationError::UnresolvedTypeReference {
                    referencer: format!("the {operation} root"),
                    type_name: root.name().to_string(),
                }),
                Some(GraphQLType::Object(_)) => {}
                Some(_) => errors.push(SchemaValidationError::RootTypeNotObject {
                    operation,
                    type_name: root.name().to_string(),
                }),
            }
        }
    }

    fn validate_fields(
        &self,
        type_name: &str,
        fields: &indexmap::IndexMap<String, crate::types::Field>,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        for (field_name, field) in fields {
            let referencer = format!("{type_name}.{field_name}");
            self.validate_output_position(&referencer, &field.type_ref, errors);
            for (argument_name, argument) in &field.arguments {
                self.validate_input_position(
                    &format!("{referencer}({argument_name}:)"),
                    &argument.type_ref,
                    errors,
                );
            }
        }
    }

    fn validate_output_position(
        &self,
        referencer: &str,
        type_ref: &TypeRef,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        match self.type_by_name(type_ref.innermost_name()) {
            None => errors.push(SchemaValidationError::UnresolvedTypeReference {
                referencer: referencer.to_string(),
                type_name: type_ref.innermost_name().to_string(),
            }),
            Some(inner) if !inner.is_output_type() => {
                errors.push(SchemaValidationError::NonOutputTypeInOutputPosition {
                    referencer: referencer.to_string(),
                    type_name: inner.name().to_string(),
                    kind_name: inner.kind_name(),
                });
            }
            Some(_) => {}
        }
    }

    fn validate_input_position(
        &self,
        referencer: &str,
        type_ref: &TypeRef,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        match self.type_by_name(type_ref.innermost_name()) {
            None => errors.push(SchemaValidationError::UnresolvedTypeReference {
                referencer: referencer.to_string(),
                type_name: type_ref.innermost_name().to_string(),
            }),
            Some(inner) if !inner.is_input_type() => {
                errors.push(SchemaValidationError::NonInputTypeInInputPosition {
                    referencer: referencer.to_string(),
                    type_name: inner.name().to_string(),
                    kind_name: inner.kind_name(),
                });
            }
            Some(_) => {}
        }
    }

    /// Checks the covariance rules for `implements` declarations.
    ///
    /// https://spec.graphql.org/June2018/#sec-Objects (type validation)
    fn validate_implements(
        &self,
        type_name: &str,
        interfaces: &[String],
        fields: &indexmap::IndexMap<String, crate::types::Field>,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        for interface_name in interfaces {
            let interface = match self.type_by_name(interface_name) {
                None => {
                    errors.push(SchemaValidationError::UnresolvedTypeReference {
                        referencer: type_name.to_string(),
                        type_name: interface_name.clone(),
                    });
                    continue;
                }
                Some(GraphQLType::Interface(interface)) => interface,
                Some(_) => {
                    errors.push(SchemaValidationError::ImplementsNonInterface {
                        type_name: type_name.to_string(),
                        interface_name: interface_name.clone(),
                    });
                    continue;
                }
            };

            for (field_name, interface_field) in &interface.fields {
                if field_name.starts_with("__") {
                    continue;
                }
                let Some(impl_field) = fields.get(field_name) else {
                    errors.push(SchemaValidationError::MissingInterfaceField {
                        type_name: type_name.to_string(),
                        interface_name: interface_name.clone(),
                        field_name: field_name.clone(),
                    });
                    continue;
                };

                if !self.is_valid_implementation_type(
                    &impl_field.type_ref,
                    &interface_field.type_ref,
                ) {
                    errors.push(SchemaValidationError::IncompatibleInterfaceFieldType {
                        type_name: type_name.to_string(),
                        interface_name: interface_name.clone(),
                        field_name: field_name.clone(),
                        expected: interface_field.type_ref.to_string(),
                        actual: impl_field.type_ref.to_string(),
                    });
                }

                self.validate_implements_arguments(
                    type_name,
                    interface_name,
                    field_name,
                    interface_field,
                    impl_field,
                    errors,
                );
            }
        }
    }

    fn validate_implements_arguments(
        &self,
        type_name: &str,
        interface_name: &str,
        field_name: &str,
        interface_field: &crate::types::Field,
        impl_field: &crate::types::Field,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        for (argument_name, interface_argument) in &interface_field.arguments {
            match impl_field.arguments.get(argument_name) {
                None => errors.push(SchemaValidationError::MissingInterfaceFieldArgument {
                    type_name: type_name.to_string(),
                    interface_name: interface_name.to_string(),
                    field_name: field_name.to_string(),
                    argument_name: argument_name.clone(),
                }),
                // Argument types are invariant.
                Some(impl_argument)
                    if impl_argument.type_ref.to_string()
                        != interface_argument.type_ref.to_string() =>
                {
                    errors.push(
                        SchemaValidationError::IncompatibleInterfaceFieldArgumentType {
                            type_name: type_name.to_string(),
                            interface_name: interface_name.to_string(),
                            field_name: field_name.to_string(),
                            argument_name: argument_name.clone(),
                            expected: interface_argument.type_ref.to_string(),
                            actual: impl_argument.type_ref.to_string(),
                        },
                    );
                }
                Some(_) => {}
            }
        }

        for (argument_name, impl_argument) in &impl_field.arguments {
            if !interface_field.arguments.contains_key(argument_name)
                && impl_argument.is_required()
            {
                errors.push(SchemaValidationError::RequiredArgumentAddedByImplementation {
                    type_name: type_name.to_string(),
                    interface_name: interface_name.to_string(),
                    field_name: field_name.to_string(),
                    argument_name: argument_name.clone(),
                });
            }
        }
    }

    /// Field-type covariance: the implementing type may narrow nullability
    /// and may substitute a possible type of an abstract interface field
    /// type.
    fn is_valid_implementation_type(&self, impl_ref: &TypeRef, iface_ref: &TypeRef) -> bool {
        if !iface_ref.is_nullable() && impl_ref.is_nullable() {
            return false;
        }
        match (impl_ref, iface_ref) {
            (TypeRef::List { inner: a, .. }, TypeRef::List { inner: b, .. }) => {
                self.is_valid_implementation_type(a, b)
            }
            (TypeRef::Named { type_ref: a, .. }, TypeRef::Named { type_ref: b, .. }) => {
                if a.name() == b.name() {
                    return true;
                }
                match (self.type_by_name(a.name()), self.type_by_name(b.name())) {
                    (Some(GraphQLType::Object(_)), Some(abstract_type))
                        if abstract_type.is_abstract() =>
                    {
                        self.is_possible_type(abstract_type, a.name())
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Detects unbreakable cycles through non-nullable, non-list input
    /// object fields. Each cycle is reported once, from its first type in
    /// declaration order.
    fn validate_input_object_cycles(
        &self,
        start: &str,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        let mut path: Vec<String> = vec![];
        let mut visiting: HashSet<String> = HashSet::new();
        self.input_cycle_dfs(start, start, &mut path, &mut visiting, errors);
    }

    fn input_cycle_dfs(
        &self,
        start: &str,
        current: &str,
        path: &mut Vec<String>,
        visiting: &mut HashSet<String>,
        errors: &mut Vec<SchemaValidationError>,
    ) {
        if !visiting.insert(current.to_string()) {
            return;
        }
        let Some(GraphQLType::InputObject(input_object)) = self.type_by_name(current) else {
            visiting.remove(current);
            return;
        };

        for field in input_object.fields.values() {
            if !is_unbreakable_edge(&field.type_ref) {
                continue;
            }
            let target = field.type_ref.innermost_name();
            if target == start {
                // Only report the cycle from its smallest member so each
                // cycle surfaces once.
                let canonical_entry = path
                    .iter()
                    .map(String::as_str)
                    .chain([current])
                    .all(|member| member >= start);
                if canonical_entry {
                    let mut cycle = path.clone();
                    cycle.push(current.to_string());
                    cycle.push(field.name.clone());
                    errors.push(SchemaValidationError::InputObjectNonNullCycle {
                        type_name: start.to_string(),
                        cycle: cycle.join(" -> "),
                    });
                }
            } else if matches!(
                self.type_by_name(target),
                Some(GraphQLType::InputObject(_)),
            ) {
                path.push(current.to_string());
                self.input_cycle_dfs(start, target, path, visiting, errors);
                path.pop();
            }
        }
        visiting.remove(current);
    }
}

/// A non-nullable, non-list field edge: the only kind that makes an input
/// object cycle unconstructible.
fn is_unbreakable_edge(type_ref: &TypeRef) -> bool {
    matches!(type_ref, TypeRef::Named { nullable: false, .. })
}
