//! Scalar implementations: the five built-in scalars plus opt-in extras.
//!
//! A [`ScalarImpl`] bundles the three operations a scalar type needs:
//! `serialize` (internal value → response value), `parse_value` (variable
//! input → internal value), and `parse_literal` (AST literal → internal
//! value). The extras ([`uuid_scalar`], [`datetime_scalar`], …) are never
//! registered automatically; pass them to
//! [`SchemaBuilder::with_scalar`](crate::schema::SchemaBuilder::with_scalar)
//! under whatever name the SDL declares.

mod builtins;
mod extras;

pub use builtins::boolean_scalar;
pub use builtins::float_scalar;
pub use builtins::id_scalar;
pub use builtins::int_scalar;
pub use builtins::string_scalar;
pub use extras::base64_scalar;
pub use extras::date_scalar;
pub use extras::datetime_scalar;
pub use extras::json_string_scalar;
pub use extras::regex_scalar;
pub use extras::time_scalar;
pub use extras::uuid_scalar;

use crate::Value;
use libgql_parser::ast;
use std::sync::Arc;

type ScalarFn = Arc<dyn Fn(&Value) -> Result<Value, String> + Send + Sync>;
type ScalarLiteralFn = Arc<dyn Fn(&ast::Value) -> Result<Value, String> + Send + Sync>;

/// The implementation of a scalar type.
#[derive(Clone)]
pub struct ScalarImpl {
    serialize: ScalarFn,
    parse_value: ScalarFn,
    parse_literal: ScalarLiteralFn,
}

impl ScalarImpl {
    pub fn new(
        serialize: impl Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
        parse_value: impl Fn(&Value) -> Result<Value, String> + Send + Sync + 'static,
        parse_literal: impl Fn(&ast::Value) -> Result<Value, String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            serialize: Arc::new(serialize),
            parse_value: Arc::new(parse_value),
            parse_literal: Arc::new(parse_literal),
        }
    }

    /// Builds a scalar whose literal form is handled by first converting
    /// the AST literal to a runtime value and reusing `parse_value`. Most
    /// string-shaped scalars want exactly this.
    pub fn from_parse_value(
        serialize: impl Fn(&Value) -> Result<Value, String> + Send + Sync + Clone + 'static,
        parse_value: impl Fn(&Value) -> Result<Value, String> + Send + Sync + Clone + 'static,
    ) -> Self {
        let parse_for_literal = parse_value.clone();
        Self::new(serialize, parse_value, move |literal| {
            let value = Value::from_const_ast(literal)
                .ok_or_else(|| "unexpected variable in literal".to_string())?;
            parse_for_literal(&value)
        })
    }

    /// Converts an internal value to its response form.
    pub fn serialize(&self, value: &Value) -> Result<Value, String> {
        (self.serialize)(value)
    }

    /// Coerces an externally supplied (variable) value.
    pub fn parse_value(&self, value: &Value) -> Result<Value, String> {
        (self.parse_value)(value)
    }

    /// Coerces an AST literal.
    pub fn parse_literal(&self, literal: &ast::Value) -> Result<Value, String> {
        (self.parse_literal)(literal)
    }
}
