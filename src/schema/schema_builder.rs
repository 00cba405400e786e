use crate::execution::Resolver;
use crate::execution::SubscriptionResolver;
use crate::loc::DefLocation;
use crate::scalars::ScalarImpl;
use crate::schema::inject_introspection_types;
use crate::schema::schema_directives;
use crate::schema::type_builders;
use crate::schema::type_builders::NamePolicy;
use crate::schema::Schema;
use crate::schema::SchemaDirective;
use crate::schema::SchemaValidationError;
use crate::schema::TypesMapBuilder;
use crate::types::Directive;
use crate::types::DirectiveAnnotation;
use crate::types::GraphQLType;
use crate::types::InputValue;
use crate::types::NamedGraphQLTypeRef;
use crate::types::TypeRef;
use crate::types::TypeResolver;
use crate::Value;
use indexmap::IndexMap;
use libgql_parser::ast;
use libgql_parser::ast::DirectiveLocation;
use libgql_parser::ast::OperationKind;
use libgql_parser::parse_schema_document;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::OnceLock;

type Result<T> = std::result::Result<T, SchemaBuildError>;

fn builtin_directive_names() -> &'static HashSet<&'static str> {
    static NAMES: OnceLock<HashSet<&'static str>> = OnceLock::new();
    NAMES.get_or_init(|| HashSet::from(["skip", "include", "deprecated"]))
}

/// The three built-in directives, always present in every schema.
fn builtin_directives() -> Vec<Directive> {
    let conditional_arg = |name: &str| {
        (
            name.to_string(),
            InputValue {
                name: name.to_string(),
                description: None,
                def_location: DefLocation::Builtin,
                type_ref: TypeRef::named("Boolean", false, DefLocation::Builtin),
                default_value: None,
                directives: vec![],
                deprecation: Default::default(),
                resolver_name: None,
            },
        )
    };

    vec![
        Directive {
            name: "skip".to_string(),
            description: Some(
                "Directs the executor to skip this field or fragment when the \
                 `if` argument is true."
                    .to_string(),
            ),
            def_location: DefLocation::Builtin,
            locations: vec![
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            arguments: IndexMap::from([conditional_arg("if")]),
            repeatable: false,
        },
        Directive {
            name: "include".to_string(),
            description: Some(
                "Directs the executor to include this field or fragment only \
                 when the `if` argument is true."
                    .to_string(),
            ),
            def_location: DefLocation::Builtin,
            locations: vec![
                DirectiveLocation::Field,
                DirectiveLocation::FragmentSpread,
                DirectiveLocation::InlineFragment,
            ],
            arguments: IndexMap::from([conditional_arg("if")]),
            repeatable: false,
        },
        Directive {
            name: "deprecated".to_string(),
            description: Some("Marks an element of the API as no longer supported.".to_string()),
            def_location: DefLocation::Builtin,
            locations: vec![
                DirectiveLocation::FieldDefinition,
                DirectiveLocation::EnumValue,
            ],
            arguments: IndexMap::from([(
                "reason".to_string(),
                InputValue {
                    name: "reason".to_string(),
                    description: None,
                    def_location: DefLocation::Builtin,
                    type_ref: TypeRef::named("String", true, DefLocation::Builtin),
                    default_value: Some(Value::String("No longer supported".to_string())),
                    directives: vec![],
                    deprecation: Default::default(),
                    resolver_name: None,
                },
            )]),
            repeatable: false,
        },
    ]
}

/// Builds a [`Schema`] from SDL alone: no resolvers, no custom scalars.
///
/// The fluent [`Schema::builder()`] API is the full-featured path.
pub fn build_schema(sdl: &str) -> Result<Schema> {
    Schema::builder().load_sdl(sdl)?.build()
}

#[derive(Clone, Debug, PartialEq)]
struct NamedTypeDefLocation {
    type_name: String,
    def_location: DefLocation,
}

/// Utility for building a [`Schema`].
///
/// Load SDL (text or pre-parsed AST), register resolvers, custom scalars,
/// type resolvers, and schema-directive implementations, then call
/// [`build()`](SchemaBuilder::build).
pub struct SchemaBuilder {
    description: Option<String>,
    query_type: Option<NamedTypeDefLocation>,
    mutation_type: Option<NamedTypeDefLocation>,
    subscription_type: Option<NamedTypeDefLocation>,
    schema_annotations: Vec<DirectiveAnnotation>,
    directive_defs: HashMap<String, Directive>,
    type_defs: IndexMap<String, ast::TypeDefinition>,
    type_extensions: Vec<ast::TypeExtension>,
    scalar_impls: HashMap<String, ScalarImpl>,
    resolvers: Vec<(String, String, Arc<dyn Resolver>)>,
    subscription_resolvers: Vec<(String, String, Arc<dyn SubscriptionResolver>)>,
    type_resolvers: Vec<(String, Arc<dyn TypeResolver>)>,
    schema_directive_impls: HashMap<String, Arc<dyn SchemaDirective>>,
    field_resolver_names: Vec<(String, String, String)>,
    argument_resolver_names: Vec<(String, String, String, String)>,
    input_field_resolver_names: Vec<(String, String, String)>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        let mut directive_defs = HashMap::new();
        for directive in builtin_directives() {
            directive_defs.insert(directive.name.clone(), directive);
        }
        Self {
            description: None,
            query_type: None,
            mutation_type: None,
            subscription_type: None,
            schema_annotations: vec![],
            directive_defs,
            type_defs: IndexMap::new(),
            type_extensions: vec![],
            scalar_impls: HashMap::new(),
            resolvers: vec![],
            subscription_resolvers: vec![],
            type_resolvers: vec![],
            schema_directive_impls: HashMap::new(),
            field_resolver_names: vec![],
            argument_resolver_names: vec![],
            input_field_resolver_names: vec![],
        }
    }

    /// Parses `content` as an SDL document and loads its definitions.
    pub fn load_sdl(self, content: &str) -> Result<Self> {
        let doc = parse_schema_document(content)
            .map_err(|err| SchemaBuildError::ParseError {
                message: err.to_string(),
            })?;
        self.load_sdl_ast(&doc)
    }

    /// Loads definitions from a pre-parsed SDL document.
    pub fn load_sdl_ast(mut self, doc: &ast::Document) -> Result<Self> {
        for def in &doc.definitions {
            match def {
                ast::Definition::Schema(schema_def) => {
                    self.visit_schema_def(schema_def)?;
                }
                ast::Definition::SchemaExtension(ext) => {
                    self.visit_schema_extension(ext)?;
                }
                ast::Definition::Type(type_def) => {
                    self.visit_type_def(type_def)?;
                }
                ast::Definition::TypeExtension(ext) => {
                    self.type_extensions.push(ext.clone());
                }
                ast::Definition::Directive(directive_def) => {
                    self.visit_directive_def(directive_def)?;
                }
                ast::Definition::Operation(_) | ast::Definition::Fragment(_) => {
                    // parse_schema_document rejects these already; a
                    // hand-built AST might not.
                    return Err(SchemaBuildError::ParseError {
                        message: "executable definitions are not allowed in SDL".to_string(),
                    });
                }
            }
        }
        Ok(self)
    }

    /// Registers a resolver for `type_name.field_name`.
    pub fn with_resolver(
        mut self,
        type_name: &str,
        field_name: &str,
        resolver: impl Resolver + 'static,
    ) -> Self {
        self.resolvers.push((
            type_name.to_string(),
            field_name.to_string(),
            Arc::new(resolver),
        ));
        self
    }

    /// Registers a subscription resolver for `type_name.field_name`,
    /// supplying the event source when a subscription operation selects
    /// that field.
    pub fn with_subscription_resolver(
        mut self,
        type_name: &str,
        field_name: &str,
        resolver: impl SubscriptionResolver + 'static,
    ) -> Self {
        self.subscription_resolvers.push((
            type_name.to_string(),
            field_name.to_string(),
            Arc::new(resolver),
        ));
        self
    }

    /// Registers a custom scalar implementation by name. SDL-declared
    /// scalars without a registered implementation fail the build.
    pub fn with_scalar(mut self, name: &str, implementation: ScalarImpl) -> Self {
        self.scalar_impls.insert(name.to_string(), implementation);
        self
    }

    /// Registers a `resolve_type` callback for an interface or union.
    pub fn with_type_resolver(
        mut self,
        type_name: &str,
        resolver: impl TypeResolver + 'static,
    ) -> Self {
        self.type_resolvers
            .push((type_name.to_string(), Arc::new(resolver)));
        self
    }

    /// Registers a schema-directive implementation invoked during build
    /// for every application of `@directive_name` in the SDL.
    pub fn with_schema_directive(
        mut self,
        directive_name: &str,
        implementation: impl SchemaDirective + 'static,
    ) -> Self {
        self.schema_directive_impls
            .insert(directive_name.to_string(), Arc::new(implementation));
        self
    }

    /// Maps a field's exposed name to the host-side key resolvers see.
    pub fn with_resolver_name(
        mut self,
        type_name: &str,
        field_name: &str,
        host_key: &str,
    ) -> Self {
        self.field_resolver_names.push((
            type_name.to_string(),
            field_name.to_string(),
            host_key.to_string(),
        ));
        self
    }

    /// Maps an argument's exposed name to the key it is delivered under in
    /// the resolver's argument map.
    pub fn with_argument_resolver_name(
        mut self,
        type_name: &str,
        field_name: &str,
        argument_name: &str,
        host_key: &str,
    ) -> Self {
        self.argument_resolver_names.push((
            type_name.to_string(),
            field_name.to_string(),
            argument_name.to_string(),
            host_key.to_string(),
        ));
        self
    }

    /// Maps an input-object field's exposed name to the key it coerces to.
    pub fn with_input_field_resolver_name(
        mut self,
        type_name: &str,
        input_field_name: &str,
        host_key: &str,
    ) -> Self {
        self.input_field_resolver_names.push((
            type_name.to_string(),
            input_field_name.to_string(),
            host_key.to_string(),
        ));
        self
    }

    // =========================================================================
    // SDL visitors
    // =========================================================================

    fn visit_schema_def(&mut self, schema_def: &ast::SchemaDefinition) -> Result<()> {
        if let Some(description) = &schema_def.description {
            self.description = Some(description.value.clone());
        }
        self.schema_annotations
            .extend(DirectiveAnnotation::from_ast(&schema_def.directives));
        self.visit_root_operation_types(&schema_def.operation_types)
    }

    fn visit_schema_extension(&mut self, ext: &ast::SchemaExtension) -> Result<()> {
        self.schema_annotations
            .extend(DirectiveAnnotation::from_ast(&ext.directives));
        self.visit_root_operation_types(&ext.operation_types)
    }

    fn visit_root_operation_types(
        &mut self,
        operation_types: &[ast::RootOperationTypeDefinition],
    ) -> Result<()> {
        for op_type in operation_types {
            let typedef_loc = NamedTypeDefLocation {
                type_name: op_type.named_type.as_str().to_string(),
                def_location: DefLocation::from(&op_type.span),
            };
            let slot = match op_type.operation {
                OperationKind::Query => &mut self.query_type,
                OperationKind::Mutation => &mut self.mutation_type,
                OperationKind::Subscription => &mut self.subscription_type,
            };
            if let Some(existing) = slot {
                return Err(SchemaBuildError::DuplicateOperationDefinition {
                    operation: op_type.operation,
                    location1: existing.def_location.clone(),
                    location2: typedef_loc.def_location,
                });
            }
            *slot = Some(typedef_loc);
        }
        Ok(())
    }

    fn visit_type_def(&mut self, type_def: &ast::TypeDefinition) -> Result<()> {
        let name = type_def.name().as_str();
        if let Some(existing) = self.type_defs.get(name) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name: name.to_string(),
                def1: DefLocation::from(&existing.name().span),
                def2: DefLocation::from(&type_def.name().span),
            });
        }
        self.type_defs.insert(name.to_string(), type_def.clone());
        Ok(())
    }

    fn visit_directive_def(&mut self, def: &ast::DirectiveDefinition) -> Result<()> {
        let def_location = DefLocation::from(&def.name.span);

        if builtin_directive_names().contains(def.name.as_str()) {
            return Err(SchemaBuildError::RedefinitionOfBuiltinDirective {
                directive_name: def.name.as_str().to_string(),
                def_location,
            });
        }
        if def.name.as_str().starts_with("__") {
            return Err(SchemaBuildError::InvalidDunderPrefixedDirectiveName {
                directive_name: def.name.as_str().to_string(),
                def_location,
            });
        }
        if let Some(existing) = self.directive_defs.get(def.name.as_str()) {
            return Err(SchemaBuildError::DuplicateDirectiveDefinition {
                directive_name: def.name.as_str().to_string(),
                location1: existing.def_location.clone(),
                location2: def_location,
            });
        }

        let mut arguments = IndexMap::new();
        for arg_def in &def.arguments {
            arguments.insert(
                arg_def.name.as_str().to_string(),
                type_builders::build_input_value(arg_def)?,
            );
        }

        self.directive_defs.insert(
            def.name.as_str().to_string(),
            Directive {
                name: def.name.as_str().to_string(),
                description: def.description.as_ref().map(|d| d.value.clone()),
                def_location,
                locations: def.locations.clone(),
                arguments,
                repeatable: def.repeatable,
            },
        );
        Ok(())
    }

    // =========================================================================
    // Build
    // =========================================================================

    pub fn build(mut self) -> Result<Schema> {
        log::debug!(
            "building schema: {} type definitions, {} extensions",
            self.type_defs.len(),
            self.type_extensions.len(),
        );

        self.merge_type_extensions()?;

        let mut types_map_builder = TypesMapBuilder::new();
        for type_def in self.type_defs.values() {
            let built = match type_def {
                ast::TypeDefinition::Scalar(def) => {
                    let implementation = self
                        .scalar_impls
                        .get(def.name.as_str())
                        .cloned()
                        .ok_or_else(|| SchemaBuildError::UnknownScalar {
                            type_name: def.name.as_str().to_string(),
                            def_location: DefLocation::from(&def.name.span),
                        })?;
                    GraphQLType::Scalar(type_builders::build_scalar_type(
                        def,
                        implementation,
                        NamePolicy::RejectDunder,
                    )?)
                }
                ast::TypeDefinition::Object(def) => GraphQLType::Object(
                    type_builders::build_object_type(def, NamePolicy::RejectDunder)?,
                ),
                ast::TypeDefinition::Interface(def) => GraphQLType::Interface(
                    type_builders::build_interface_type(def, NamePolicy::RejectDunder)?,
                ),
                ast::TypeDefinition::Union(def) => GraphQLType::Union(
                    type_builders::build_union_type(def, NamePolicy::RejectDunder)?,
                ),
                ast::TypeDefinition::Enum(def) => GraphQLType::Enum(
                    type_builders::build_enum_type(def, NamePolicy::RejectDunder)?,
                ),
                ast::TypeDefinition::InputObject(def) => GraphQLType::InputObject(
                    type_builders::build_input_object_type(def, NamePolicy::RejectDunder)?,
                ),
            };
            let def_location = DefLocation::from(&type_def.name().span);
            types_map_builder.add_new_type(def_location, built)?;
        }

        self.attach_resolver_names(&mut types_map_builder)?;
        self.attach_resolvers(&mut types_map_builder)?;
        self.attach_type_resolvers(&mut types_map_builder)?;

        let (mut types, mut type_order) = types_map_builder.into_parts();

        schema_directives::apply_schema_directives(
            &mut types,
            &mut type_order,
            &self.schema_directive_impls,
            &self.schema_annotations,
        )?;

        let query_typedef = self.resolve_root_type(&types, OperationKind::Query)?;
        let mutation_typedef = self.resolve_optional_root_type(&types, OperationKind::Mutation);
        let subscription_typedef =
            self.resolve_optional_root_type(&types, OperationKind::Subscription);
        self.check_unique_root_types(&query_typedef, &mutation_typedef, &subscription_typedef)?;

        inject_introspection_types(&mut types, &mut type_order, &query_typedef.type_name);

        let schema = Schema {
            description: self.description,
            directive_defs: self.directive_defs,
            query_type: NamedGraphQLTypeRef::new(
                query_typedef.type_name,
                query_typedef.def_location,
            ),
            mutation_type: mutation_typedef.map(|t| {
                NamedGraphQLTypeRef::new(t.type_name, t.def_location)
            }),
            subscription_type: subscription_typedef.map(|t| {
                NamedGraphQLTypeRef::new(t.type_name, t.def_location)
            }),
            types,
            type_order,
        };

        let errors = schema.validate();
        if !errors.is_empty() {
            return Err(SchemaBuildError::TypeValidationErrors { errors });
        }

        log::debug!(
            "schema built: {} named types, query root `{}`",
            schema.type_order.len(),
            schema.query_type.name(),
        );
        Ok(schema)
    }

    /// Folds `extend …` definitions into their base definitions.
    fn merge_type_extensions(&mut self) -> Result<()> {
        let extensions = std::mem::take(&mut self.type_extensions);
        for ext in extensions {
            let name = ext.name().as_str();
            let Some(base) = self.type_defs.get_mut(name) else {
                return Err(SchemaBuildError::ExtensionOfUndefinedType {
                    type_name: name.to_string(),
                    def_location: DefLocation::from(&ext.name().span),
                });
            };

            match (base, &ext) {
                (ast::TypeDefinition::Scalar(base), ast::TypeExtension::Scalar(ext)) => {
                    base.directives.extend(ext.directives.iter().cloned());
                }
                (ast::TypeDefinition::Object(base), ast::TypeExtension::Object(ext)) => {
                    base.interfaces.extend(ext.interfaces.iter().cloned());
                    base.directives.extend(ext.directives.iter().cloned());
                    base.fields.extend(ext.fields.iter().cloned());
                }
                (
                    ast::TypeDefinition::Interface(base),
                    ast::TypeExtension::Interface(ext),
                ) => {
                    base.interfaces.extend(ext.interfaces.iter().cloned());
                    base.directives.extend(ext.directives.iter().cloned());
                    base.fields.extend(ext.fields.iter().cloned());
                }
                (ast::TypeDefinition::Union(base), ast::TypeExtension::Union(ext)) => {
                    base.directives.extend(ext.directives.iter().cloned());
                    base.members.extend(ext.members.iter().cloned());
                }
                (ast::TypeDefinition::Enum(base), ast::TypeExtension::Enum(ext)) => {
                    base.directives.extend(ext.directives.iter().cloned());
                    base.values.extend(ext.values.iter().cloned());
                }
                (
                    ast::TypeDefinition::InputObject(base),
                    ast::TypeExtension::InputObject(ext),
                ) => {
                    base.directives.extend(ext.directives.iter().cloned());
                    base.fields.extend(ext.fields.iter().cloned());
                }
                (base, _) => {
                    return Err(SchemaBuildError::InvalidExtensionType {
                        type_name: name.to_string(),
                        base_kind: base.keyword(),
                        def_location: DefLocation::from(&ext.name().span),
                    });
                }
            }
        }
        Ok(())
    }

    fn attach_resolver_names(&mut self, builder: &mut TypesMapBuilder) -> Result<()> {
        for (type_name, field_name, host_key) in std::mem::take(&mut self.field_resolver_names) {
            let field = Self::field_mut(builder, &type_name, &field_name)?;
            field.resolver_name = Some(host_key);
        }
        for (type_name, field_name, argument_name, host_key) in
            std::mem::take(&mut self.argument_resolver_names)
        {
            let field = Self::field_mut(builder, &type_name, &field_name)?;
            let Some(argument) = field.arguments.get_mut(&argument_name) else {
                return Err(SchemaBuildError::UnknownResolverTarget {
                    type_name,
                    field_name: format!("{field_name}({argument_name}:)"),
                });
            };
            argument.resolver_name = Some(host_key);
        }
        for (type_name, input_field_name, host_key) in
            std::mem::take(&mut self.input_field_resolver_names)
        {
            let Some(GraphQLType::InputObject(input_object)) =
                builder.get_type_mut(&type_name)
            else {
                return Err(SchemaBuildError::UnknownResolverTarget {
                    type_name,
                    field_name: input_field_name,
                });
            };
            let Some(input_field) = input_object.fields.get_mut(&input_field_name) else {
                return Err(SchemaBuildError::UnknownResolverTarget {
                    type_name,
                    field_name: input_field_name,
                });
            };
            input_field.resolver_name = Some(host_key);
        }
        Ok(())
    }

    fn attach_resolvers(&mut self, builder: &mut TypesMapBuilder) -> Result<()> {
        for (type_name, field_name, resolver) in std::mem::take(&mut self.resolvers) {
            let field = Self::field_mut(builder, &type_name, &field_name)?;
            field.resolver = Some(resolver);
        }
        for (type_name, field_name, resolver) in
            std::mem::take(&mut self.subscription_resolvers)
        {
            let field = Self::field_mut(builder, &type_name, &field_name)?;
            field.subscription_resolver = Some(resolver);
        }
        Ok(())
    }

    fn field_mut<'b>(
        builder: &'b mut TypesMapBuilder,
        type_name: &str,
        field_name: &str,
    ) -> Result<&'b mut crate::types::Field> {
        let unknown = || SchemaBuildError::UnknownResolverTarget {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
        };
        let fields = match builder.get_type_mut(type_name) {
            Some(GraphQLType::Object(object)) => &mut object.fields,
            Some(GraphQLType::Interface(interface)) => &mut interface.fields,
            _ => return Err(unknown()),
        };
        fields.get_mut(field_name).ok_or_else(unknown)
    }

    fn attach_type_resolvers(&mut self, builder: &mut TypesMapBuilder) -> Result<()> {
        for (type_name, resolver) in std::mem::take(&mut self.type_resolvers) {
            match builder.get_type_mut(&type_name) {
                Some(GraphQLType::Interface(interface)) => {
                    interface.resolve_type = Some(resolver);
                }
                Some(GraphQLType::Union(union_type)) => {
                    union_type.resolve_type = Some(resolver);
                }
                _ => {
                    return Err(SchemaBuildError::UnknownTypeResolverTarget { type_name });
                }
            }
        }
        Ok(())
    }

    /// Resolves the required query root: an explicit `schema { query: … }`
    /// entry, or a type named `Query` by default.
    fn resolve_root_type(
        &mut self,
        types: &HashMap<String, GraphQLType>,
        kind: OperationKind,
    ) -> Result<NamedTypeDefLocation> {
        debug_assert_eq!(kind, OperationKind::Query);
        if let Some(explicit) = self.query_type.take() {
            return Ok(explicit);
        }
        match types.get("Query") {
            Some(GraphQLType::Object(object)) => Ok(NamedTypeDefLocation {
                type_name: "Query".to_string(),
                def_location: object.def_location.clone(),
            }),
            _ => Err(SchemaBuildError::NoQueryOperationTypeDefined),
        }
    }

    fn resolve_optional_root_type(
        &mut self,
        types: &HashMap<String, GraphQLType>,
        kind: OperationKind,
    ) -> Option<NamedTypeDefLocation> {
        let (slot, default_name) = match kind {
            OperationKind::Mutation => (&mut self.mutation_type, "Mutation"),
            OperationKind::Subscription => (&mut self.subscription_type, "Subscription"),
            OperationKind::Query => unreachable!("query root is required"),
        };
        if let Some(explicit) = slot.take() {
            return Some(explicit);
        }
        match types.get(default_name) {
            Some(GraphQLType::Object(object)) => Some(NamedTypeDefLocation {
                type_name: default_name.to_string(),
                def_location: object.def_location.clone(),
            }),
            _ => None,
        }
    }

    /// The query, mutation, and subscription root types must all be
    /// different types if provided.
    ///
    /// https://spec.graphql.org/June2018/#sec-Schema
    fn check_unique_root_types(
        &self,
        query: &NamedTypeDefLocation,
        mutation: &Option<NamedTypeDefLocation>,
        subscription: &Option<NamedTypeDefLocation>,
    ) -> Result<()> {
        let pairs = [
            (Some(query), mutation.as_ref(), OperationKind::Query, OperationKind::Mutation),
            (
                Some(query),
                subscription.as_ref(),
                OperationKind::Query,
                OperationKind::Subscription,
            ),
            (
                mutation.as_ref(),
                subscription.as_ref(),
                OperationKind::Mutation,
                OperationKind::Subscription,
            ),
        ];
        for (a, b, kind_a, kind_b) in pairs {
            if let (Some(a), Some(b)) = (a, b) {
                if a.type_name == b.type_name {
                    return Err(SchemaBuildError::NonUniqueOperationTypes {
                        reused_type_name: a.type_name.clone(),
                        operation1: kind_a,
                        operation2: kind_b,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaBuildError {
    #[error("multiple directives were defined with the name `{directive_name}`")]
    DuplicateDirectiveDefinition {
        directive_name: String,
        location1: DefLocation,
        location2: DefLocation,
    },

    #[error("the enum `{enum_name}` defines the value `{value_name}` more than once")]
    DuplicateEnumValueDefinition {
        enum_name: String,
        value_name: String,
        value_def1: DefLocation,
        value_def2: DefLocation,
    },

    #[error("the type `{type_name}` defines the field `{field_name}` more than once")]
    DuplicateFieldNameDefinition {
        type_name: String,
        field_name: String,
        field_def1: DefLocation,
        field_def2: DefLocation,
    },

    #[error(
        "the field `{type_name}.{field_name}` defines the argument \
         `{argument_name}` more than once"
    )]
    DuplicateArgumentDefinition {
        def_location: DefLocation,
        type_name: String,
        field_name: String,
        argument_name: String,
    },

    #[error(
        "the type `{type_name}` declares that it implements the \
         `{interface_name}` interface more than once"
    )]
    DuplicateInterfaceImplementsDeclaration {
        def_location: DefLocation,
        interface_name: String,
        type_name: String,
    },

    #[error("the {operation} root operation type was defined more than once")]
    DuplicateOperationDefinition {
        operation: OperationKind,
        location1: DefLocation,
        location2: DefLocation,
    },

    #[error("multiple types were defined with the name `{type_name}`")]
    DuplicateTypeDefinition {
        type_name: String,
        def1: DefLocation,
        def2: DefLocation,
    },

    #[error("the union `{type_name}` lists `{member_name}` as a member more than once")]
    DuplicateUnionMember {
        type_name: String,
        member_name: String,
        def_location: DefLocation,
    },

    #[error("attempted to extend the type `{type_name}`, which is not defined")]
    ExtensionOfUndefinedType {
        type_name: String,
        def_location: DefLocation,
    },

    #[error(
        "attempted to extend the `{base_kind}` type `{type_name}` with a \
         different kind of extension"
    )]
    InvalidExtensionType {
        type_name: String,
        base_kind: &'static str,
        def_location: DefLocation,
    },

    #[error("custom directive names must not start with `__`: `{directive_name}`")]
    InvalidDunderPrefixedDirectiveName {
        directive_name: String,
        def_location: DefLocation,
    },

    #[error("field names must not start with `__`: `{type_name}.{field_name}`")]
    InvalidDunderPrefixedFieldName {
        def_location: DefLocation,
        field_name: String,
        type_name: String,
    },

    #[error(
        "argument names must not start with `__`: \
         `{type_name}.{field_name}({argument_name}:)`"
    )]
    InvalidDunderPrefixedArgumentName {
        def_location: DefLocation,
        field_name: String,
        argument_name: String,
        type_name: String,
    },

    #[error("type names must not start with `__`: `{type_name}`")]
    InvalidDunderPrefixedTypeName {
        def_location: DefLocation,
        type_name: String,
    },

    #[error(
        "the interface `{interface_name}` declares that it implements itself"
    )]
    SelfImplementingInterface {
        def_location: DefLocation,
        interface_name: String,
    },

    #[error("the schema has no query root operation type")]
    NoQueryOperationTypeDefined,

    #[error(
        "the {operation1} and {operation2} root operations both use the type \
         `{reused_type_name}`; root operation types must be distinct"
    )]
    NonUniqueOperationTypes {
        reused_type_name: String,
        operation1: OperationKind,
        operation2: OperationKind,
    },

    #[error("failed to parse SDL: {message}")]
    ParseError { message: String },

    #[error("attempted to redefine the built-in directive `@{directive_name}`")]
    RedefinitionOfBuiltinDirective {
        directive_name: String,
        def_location: DefLocation,
    },

    #[error(
        "the scalar `{type_name}` has no registered implementation; pass one \
         via `SchemaBuilder::with_scalar`"
    )]
    UnknownScalar {
        type_name: String,
        def_location: DefLocation,
    },

    #[error("no field `{type_name}.{field_name}` to attach a resolver to")]
    UnknownResolverTarget {
        type_name: String,
        field_name: String,
    },

    #[error("no interface or union named `{type_name}` to attach a type resolver to")]
    UnknownTypeResolverTarget { type_name: String },

    #[error(
        "schema validation failed:\n{}",
        errors.iter()
            .map(|e| format!("  * {e}"))
            .collect::<Vec<_>>()
            .join("\n"),
    )]
    TypeValidationErrors { errors: Vec<SchemaValidationError> },
}
