//! A GraphQL server-side runtime.
//!
//! `libgql` takes a textual GraphQL query plus a schema definition and
//! produces a structured response, end to end:
//!
//! 1. [`parse`]: lexing and parsing for the query language and the SDL
//!    (re-exported from the `libgql-parser` crate).
//! 2. [`Schema::builder()`] / [`build_schema`]: materializes an
//!    executable type system from SDL, attaching resolvers, custom
//!    scalars, and schema directives.
//! 3. [`validate`]: enforces every specification-defined query validity
//!    rule against a schema.
//! 4. [`execute`] / [`subscribe`]: coerces inputs, walks selection sets,
//!    dispatches resolvers through a pluggable [`runtime`], completes
//!    values, and aggregates errors with non-null propagation.
//!
//! The [`graphql`] convenience entry runs the whole pipeline.
//!
//! ```
//! use libgql::execution::Resolved;
//!
//! let schema = libgql::Schema::builder()
//!     .load_sdl("type Query { hello: String! }")
//!     .unwrap()
//!     .with_resolver("Query", "hello", |_ctx: libgql::execution::ResolverContext<'_>| {
//!         Ok(Resolved::value("Hello world!"))
//!     })
//!     .build()
//!     .unwrap();
//!
//! let response = libgql::graphql(&schema, "{ hello }", Default::default());
//! assert!(response.is_ok());
//! ```

pub mod coercion;
pub mod execution;
pub mod loc;
mod named_ref;
pub mod runtime;
pub mod scalars;
pub mod schema;
pub mod types;
pub mod validation;
mod value;

pub use execution::execute;
pub use execution::subscribe;
pub use execution::ExecuteOptions;
pub use execution::Response;
pub use named_ref::DerefByName;
pub use named_ref::DerefByNameError;
pub use named_ref::NamedRef;
pub use schema::build_schema;
pub use schema::print_schema;
pub use schema::Schema;
pub use schema::SchemaBuilder;
pub use validation::validate;
pub use value::Value;

// The parser's public surface, re-exported so embedders need one
// dependency.
pub use libgql_parser::ast;
pub use libgql_parser::parse_document as parse;
pub use libgql_parser::parse_executable_document;
pub use libgql_parser::parse_schema_document;
pub use libgql_parser::print_ast;
pub use libgql_parser::ParseError;
pub use libgql_parser::ParseOptions;

/// Runs the full request pipeline (parse, validate, execute) and folds
/// every failure mode into a [`Response`].
///
/// Parse and validation errors are fatal: execution never starts and the
/// response carries no `data`.
pub fn graphql(schema: &Schema, source: &str, options: ExecuteOptions<'_>) -> Response {
    let document = match parse_executable_document(source) {
        Ok(document) => document,
        Err(error) => return Response::request_error(error.format_oneline()),
    };

    let validation_errors = validate(schema, &document);
    if !validation_errors.is_empty() {
        return Response::from_validation_errors(validation_errors);
    }

    execute(schema, &document, options)
}
