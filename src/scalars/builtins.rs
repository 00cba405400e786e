use crate::scalars::ScalarImpl;
use crate::Value;
use libgql_parser::ast;

/// `Int`: a signed 32-bit integer.
///
/// Inputs outside the 32-bit range are rejected, as are non-integer
/// inputs (`"3"` does not coerce to `3`).
pub fn int_scalar() -> ScalarImpl {
    ScalarImpl::new(
        |value| match value {
            Value::Int(i) if in_int_range(*i) => Ok(Value::Int(*i)),
            Value::Int(i) => Err(format!("Int cannot represent {i}: out of 32-bit range")),
            other => Err(format!("Int cannot represent {}", other.kind_name())),
        },
        |value| match value {
            Value::Int(i) if in_int_range(*i) => Ok(Value::Int(*i)),
            Value::Int(i) => Err(format!("Int cannot represent {i}: out of 32-bit range")),
            other => Err(format!("expected an Int, found {}", other.kind_name())),
        },
        |literal| match literal {
            ast::Value::Int(v) => match v.as_i64() {
                Some(i) if in_int_range(i) => Ok(Value::Int(i)),
                _ => Err(format!("Int cannot represent `{}`: out of 32-bit range", v.raw)),
            },
            other => Err(format!("expected an Int literal, found {}", other.kind_name())),
        },
    )
}

fn in_int_range(i: i64) -> bool {
    i >= i64::from(i32::MIN) && i <= i64::from(i32::MAX)
}

/// `Float`: an IEEE 754 double. Integer inputs widen losslessly.
pub fn float_scalar() -> ScalarImpl {
    ScalarImpl::new(
        |value| coerce_float(value),
        |value| coerce_float(value),
        |literal| match literal {
            ast::Value::Float(v) => v
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| format!("Float cannot represent `{}`", v.raw)),
            ast::Value::Int(v) => v
                .as_i64()
                .map(|i| Value::Float(i as f64))
                .ok_or_else(|| format!("Float cannot represent `{}`", v.raw)),
            other => Err(format!("expected a Float literal, found {}", other.kind_name())),
        },
    )
}

fn coerce_float(value: &Value) -> Result<Value, String> {
    match value {
        Value::Float(f) => Ok(Value::Float(*f)),
        Value::Int(i) => Ok(Value::Float(*i as f64)),
        other => Err(format!("expected a Float, found {}", other.kind_name())),
    }
}

/// `String`: a UTF-8 string.
pub fn string_scalar() -> ScalarImpl {
    ScalarImpl::new(
        |value| match value {
            Value::String(s) => Ok(Value::String(s.clone())),
            other => Err(format!("String cannot represent {}", other.kind_name())),
        },
        |value| match value {
            Value::String(s) => Ok(Value::String(s.clone())),
            other => Err(format!("expected a String, found {}", other.kind_name())),
        },
        |literal| match literal {
            ast::Value::String(v) => Ok(Value::String(v.value.clone())),
            other => Err(format!(
                "expected a String literal, found {}",
                other.kind_name(),
            )),
        },
    )
}

/// `Boolean`: `true` or `false`.
pub fn boolean_scalar() -> ScalarImpl {
    ScalarImpl::new(
        |value| match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            other => Err(format!("Boolean cannot represent {}", other.kind_name())),
        },
        |value| match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            other => Err(format!("expected a Boolean, found {}", other.kind_name())),
        },
        |literal| match literal {
            ast::Value::Boolean(v) => Ok(Value::Bool(v.value)),
            other => Err(format!(
                "expected a Boolean literal, found {}",
                other.kind_name(),
            )),
        },
    )
}

/// `ID`: accepts string and integer inputs, always serializes as a string.
pub fn id_scalar() -> ScalarImpl {
    ScalarImpl::new(
        |value| coerce_id(value),
        |value| coerce_id(value),
        |literal| match literal {
            ast::Value::String(v) => Ok(Value::String(v.value.clone())),
            ast::Value::Int(v) => Ok(Value::String(v.raw.clone())),
            other => Err(format!("expected an ID literal, found {}", other.kind_name())),
        },
    )
}

fn coerce_id(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(s) => Ok(Value::String(s.clone())),
        Value::Int(i) => Ok(Value::String(i.to_string())),
        other => Err(format!("expected an ID, found {}", other.kind_name())),
    }
}
