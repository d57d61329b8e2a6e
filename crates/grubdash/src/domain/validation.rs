//! Request validation as an ordered chain of checks.
//!
//! Every check looks at the raw JSON of the request so that missing, empty and
//! mistyped fields can be told apart. A chain runs its checks in order and the
//! first failing check decides the error reported to the client; later checks
//! don't run.

use {
    super::Id,
    serde_json::{Map, Number, Value},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
}

pub fn bad_request(message: impl Into<String>) -> Error {
    Error::BadRequest(message.into())
}

pub fn not_found(message: impl Into<String>) -> Error {
    Error::NotFound(message.into())
}

/// The `data` member of a request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Extracts the payload from a full request body. A body without an object
    /// under `data` yields an empty payload so that the checks report the first
    /// missing field.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut body) => match body.remove("data") {
                Some(Value::Object(data)) => Self(data),
                _ => Self::default(),
            },
            _ => Self::default(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the field if it holds a truthy value.
    pub fn require(&self, field: &str, message: &str) -> Result<&Value, Error> {
        self.get(field)
            .filter(|value| is_truthy(value))
            .ok_or_else(|| bad_request(message))
    }

    /// Returns the field if it holds a non-empty string.
    pub fn require_text(&self, field: &str, message: &str) -> Result<&str, Error> {
        self.get(field)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| bad_request(message))
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

/// What a check gets to look at.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    /// The id taken from the route, for requests addressing a single item.
    pub route: Option<&'a Id>,
    pub payload: &'a Payload,
}

impl<'a> Request<'a> {
    pub fn new(payload: &'a Payload) -> Self {
        Self {
            route: None,
            payload,
        }
    }

    pub fn with_route(route: &'a Id, payload: &'a Payload) -> Self {
        Self {
            route: Some(route),
            payload,
        }
    }
}

/// A single step of a validation chain.
pub type Check = fn(&Request<'_>) -> Result<(), Error>;

/// Runs the checks in order and stops at the first failure.
pub fn run(request: &Request<'_>, checks: &[Check]) -> Result<(), Error> {
    checks.iter().try_for_each(|check| check(request))
}

/// Whether a JSON value counts as "provided". `null`, `false`, `0` and the
/// empty string don't.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Whether the value is a number without a fractional part.
pub fn is_integer(value: &Value) -> bool {
    let Value::Number(number) = value else {
        return false;
    };
    number.is_i64() || number.is_u64() || number.as_f64().is_some_and(|n| n.fract() == 0.0)
}

/// The value as a number greater than zero, kept as submitted.
pub fn positive_number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(number) if number.as_f64().is_some_and(|n| n > 0.0) => Some(number.clone()),
        _ => None,
    }
}

/// The body `id`, if the client sent one. Falsy ids count as absent.
fn body_id(payload: &Payload) -> Option<&Value> {
    payload.get("id").filter(|id| is_truthy(id))
}

/// The body `id` as text if it doesn't match the route id. Only a string
/// equal to the route id matches.
pub fn id_mismatch(request: &Request<'_>) -> Option<String> {
    let route = request.route?;
    match body_id(request.payload)? {
        Value::String(id) if id == route.as_str() => None,
        Value::String(id) => Some(id.clone()),
        other => Some(other.to_string()),
    }
}
