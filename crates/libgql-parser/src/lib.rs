//! Lexing and parsing for GraphQL documents.
//!
//! This crate provides the textual front-end of the GraphQL pipeline:
//!
//! - A hand-written pull [`Lexer`] that turns UTF-8 source text into
//!   [`Token`](token::Token)s with precise source positions.
//! - A recursive-descent [`Parser`] covering both the query language and the
//!   schema definition language (SDL), producing the typed [`ast`].
//! - An AST [visitor framework](ast::visit) and a canonical source
//!   [printer](printer).
//!
//! The AST is fully owned: nodes hold `String`s rather than borrowing from
//! the source text, so parsed documents can outlive the input they came
//! from.

pub mod ast;
mod lexer;
mod parse_error;
mod parser;
pub mod printer;
mod source_position;
mod source_span;
pub mod token;
mod token_stream;

pub use lexer::Lexer;
pub use parse_error::ParseError;
pub use parse_error::ParseErrorKind;
pub use parser::parse_document;
pub use parser::parse_executable_document;
pub use parser::parse_schema_document;
pub use parser::ParseOptions;
pub use parser::Parser;
pub use printer::print_ast;
pub use source_position::SourcePosition;
pub use source_span::SourceSpan;

#[cfg(test)]
mod tests;
