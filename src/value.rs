use indexmap::IndexMap;
use libgql_parser::ast;
use serde::ser::SerializeMap;
use serde::ser::SerializeSeq;
use serde::Serialize;
use serde::Serializer;

/// A runtime GraphQL value: variable values, coerced arguments, resolver
/// results, and response data are all [`Value`]s.
///
/// Unlike [`ast::Value`], this type has no variable references and no
/// source spans; object entries preserve insertion order, which is what
/// makes response maps come out in field order.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    /// An enum value by name. Serializes as a plain string.
    Enum(String),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn object(entries: impl IntoIterator<Item = (String, Value)>) -> Value {
        Value::Object(entries.into_iter().collect())
    }

    /// A short description of this value's kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Enum(_) => "enum value",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    /// Looks up `key` if this value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(entries) => entries.get(key),
            _ => None,
        }
    }

    /// Converts a *constant* AST value (no variable references). Used for
    /// SDL positions, which the parser already guarantees are const.
    ///
    /// Returns `None` if a variable reference is encountered.
    pub fn from_const_ast(ast_value: &ast::Value) -> Option<Value> {
        Some(match ast_value {
            ast::Value::Variable(_) => return None,
            ast::Value::Int(v) => Value::Int(v.as_i64()?),
            ast::Value::Float(v) => Value::Float(v.as_f64()?),
            ast::Value::String(v) => Value::String(v.value.clone()),
            ast::Value::Boolean(v) => Value::Bool(v.value),
            ast::Value::Null(_) => Value::Null,
            ast::Value::Enum(v) => Value::Enum(v.value.clone()),
            ast::Value::List(v) => Value::List(
                v.values
                    .iter()
                    .map(Value::from_const_ast)
                    .collect::<Option<Vec<_>>>()?,
            ),
            ast::Value::Object(v) => Value::Object(
                v.fields
                    .iter()
                    .map(|field| {
                        Value::from_const_ast(&field.value)
                            .map(|value| (field.name.value.clone(), value))
                    })
                    .collect::<Option<IndexMap<_, _>>>()?,
            ),
        })
    }

    /// Prints this value as a GraphQL literal (used in error messages and
    /// introspection's `defaultValue`).
    pub fn to_literal(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::String(v) => format!("{v:?}"),
            Value::Bool(v) => v.to_string(),
            Value::Enum(v) => v.clone(),
            Value::List(items) => {
                let inner: Vec<String> =
                    items.iter().map(Value::to_literal).collect();
                format!("[{}]", inner.join(", "))
            }
            Value::Object(entries) => {
                let inner: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{key}: {}", value.to_literal()))
                    .collect();
                format!("{{{}}}", inner.join(", "))
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::String(v) | Value::Enum(v) => serializer.serialize_str(v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(v) => Value::Bool(v),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(v) => Value::String(v),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Value {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Value {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
