mod export_sdl;
mod introspection;
mod schema;
mod schema_builder;
mod schema_directives;
mod type_builders;
mod types_map_builder;
mod validate;

pub use export_sdl::print_schema;
pub use schema::Schema;
pub use schema_builder::build_schema;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use schema_directives::DirectiveOutcome;
pub use schema_directives::SchemaDirective;
pub use validate::SchemaValidationError;

pub(crate) use introspection::inject_introspection_types;
pub(crate) use types_map_builder::TypesMapBuilder;

#[cfg(test)]
mod tests;
