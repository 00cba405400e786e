use crate::coercion::CoercionError;
use crate::execution::ExecutionError;
use crate::validation::ValidationError;
use crate::Value;
use serde::Serialize;

/// The result of executing (or failing to execute) an operation.
///
/// The serialized shape is wire-stable:
/// `{ "data": …|null, "errors": [ … ] }`. `errors` is omitted when empty,
/// and `data` is omitted only when execution was never reached (parse,
/// validation, or coercion failure).
#[derive(Debug, PartialEq, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ExecutionError>,
}

impl Response {
    pub fn new(data: Value, errors: Vec<ExecutionError>) -> Self {
        Self {
            data: Some(data),
            errors,
        }
    }

    /// A request-level failure: execution never started, `data` omitted.
    pub fn request_error(message: impl Into<String>) -> Self {
        Self {
            data: None,
            errors: vec![ExecutionError::new(message)],
        }
    }

    pub fn from_validation_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            data: None,
            errors: errors
                .into_iter()
                .map(|error| ExecutionError {
                    message: error.message,
                    path: vec![],
                    locations: error.locations,
                    extensions: None,
                })
                .collect(),
        }
    }

    pub fn from_coercion_errors(errors: Vec<CoercionError>) -> Self {
        Self {
            data: None,
            errors: errors
                .into_iter()
                .map(|error| ExecutionError {
                    message: error.message,
                    path: error.path,
                    locations: vec![],
                    extensions: None,
                })
                .collect(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}
