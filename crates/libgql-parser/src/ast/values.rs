use crate::ast::Name;
use crate::SourceSpan;

/// A value literal in a GraphQL document.
///
/// `Variable` appears wherever a `$name` reference is legal; const-only
/// positions (default values, SDL directive arguments) are enforced by the
/// parser, not the type.
///
/// See
/// [Input Values](https://spec.graphql.org/June2018/#sec-Input-Values)
/// in the spec.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Variable(VariableValue),
    Int(IntValue),
    Float(FloatValue),
    String(StringValue),
    Boolean(BooleanValue),
    Null(NullValue),
    Enum(EnumValue),
    List(ListValue),
    Object(ObjectValue),
}

impl Value {
    pub fn span(&self) -> &SourceSpan {
        match self {
            Value::Variable(v) => &v.span,
            Value::Int(v) => &v.span,
            Value::Float(v) => &v.span,
            Value::String(v) => &v.span,
            Value::Boolean(v) => &v.span,
            Value::Null(v) => &v.span,
            Value::Enum(v) => &v.span,
            Value::List(v) => &v.span,
            Value::Object(v) => &v.span,
        }
    }

    /// A short description of this value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Variable(_) => "variable",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Null(_) => "null",
            Value::Enum(_) => "enum value",
            Value::List(_) => "list",
            Value::Object(_) => "input object",
        }
    }
}

/// A variable reference: `$name`. `name` excludes the `$`.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableValue {
    pub name: String,
    pub span: SourceSpan,
}

/// An integer literal.
///
/// The raw source text is preserved; whether it fits a 32-bit `Int` (or
/// some custom scalar's range) is an input-coercion question, not a parsing
/// one.
#[derive(Clone, Debug, PartialEq)]
pub struct IntValue {
    pub raw: String,
    pub span: SourceSpan,
}

impl IntValue {
    pub fn as_i64(&self) -> Option<i64> {
        self.raw.parse().ok()
    }
}

/// A float literal, raw text preserved.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatValue {
    pub raw: String,
    pub span: SourceSpan,
}

impl FloatValue {
    pub fn as_f64(&self) -> Option<f64> {
        self.raw.parse().ok()
    }
}

/// A string literal, escape sequences already decoded. `block` records
/// whether the source used `"""` delimiters (which matters when printing).
#[derive(Clone, Debug, PartialEq)]
pub struct StringValue {
    pub value: String,
    pub block: bool,
    pub span: SourceSpan,
}

/// A `true` or `false` literal.
#[derive(Clone, Debug, PartialEq)]
pub struct BooleanValue {
    pub value: bool,
    pub span: SourceSpan,
}

/// A `null` literal.
#[derive(Clone, Debug, PartialEq)]
pub struct NullValue {
    pub span: SourceSpan,
}

/// An enum value literal: a bare name that isn't `true`/`false`/`null`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumValue {
    pub value: String,
    pub span: SourceSpan,
}

/// A list literal: `[v1, v2, …]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ListValue {
    pub values: Vec<Value>,
    pub span: SourceSpan,
}

/// An input-object literal: `{ field: value, … }`.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectValue {
    pub fields: Vec<ObjectField>,
    pub span: SourceSpan,
}

/// One `name: value` entry of an [`ObjectValue`].
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectField {
    pub name: Name,
    pub value: Value,
    pub span: SourceSpan,
}
