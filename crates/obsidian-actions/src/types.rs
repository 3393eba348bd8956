use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::{ActionError, Result};

// ─── Scalar ───────────────────────────────────────────────────────────────

/// A single parameter value. Everything ends up as a URI query component,
/// so only primitive scalars are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Scalar::Str(s.clone())
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::Int(i64::from(i))
    }
}

impl From<u32> for Scalar {
    fn from(i: u32) -> Self {
        Scalar::Int(i64::from(i))
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

/// Action parameters. Sorted so the rendered URI is deterministic.
pub type Params = BTreeMap<String, Scalar>;

// ─── Payload ──────────────────────────────────────────────────────────────

/// Raw reply handed back by a [`Transport`](crate::Transport), before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// `x-success` output (xcall stdout, HTTP 2xx body).
    Success(String),
    /// `x-error` output (xcall stderr, HTTP non-2xx body).
    Failure(String),
}

// ─── Response ─────────────────────────────────────────────────────────────

/// Decoded result of one action call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// Keys that describe the call outcome rather than its result.
const STATUS_KEYS: &[&str] = &["success", "error", "errorMessage", "errorCode"];

impl Response {
    /// A successful response carrying `value`.
    pub fn ok(value: Option<Value>) -> Self {
        Response {
            success: true,
            value,
            error: None,
            error_code: None,
        }
    }

    /// Decode a success payload.
    ///
    /// The payload must be a JSON object. A missing `success` key counts as
    /// `true`; the result value is the `value` key when present, otherwise
    /// whatever non-status keys remain (a single key is unwrapped).
    pub fn from_payload(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ActionError::malformed(text, "empty payload"));
        }
        let parsed: Value = serde_json::from_str(trimmed)
            .map_err(|e| ActionError::malformed(trimmed, format!("invalid JSON: {e}")))?;
        let Value::Object(mut obj) = parsed else {
            return Err(ActionError::malformed(trimmed, "expected a JSON object"));
        };

        let success = match obj.get("success") {
            None => true,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                return Err(ActionError::malformed(
                    trimmed,
                    format!("'success' must be a boolean, got {other}"),
                ))
            }
        };

        let error = error_message(&obj);
        let error_code = obj.get("errorCode").and_then(scalar_text);

        let value = match obj.remove("value") {
            Some(v) => Some(v),
            None => {
                obj.retain(|k, _| !STATUS_KEYS.contains(&k.as_str()));
                unwrap_single(obj)
            }
        };

        Ok(Response {
            success,
            value,
            error,
            error_code,
        })
    }

    /// Convert a response that reports failure into [`ActionError::Remote`].
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            return Ok(self);
        }
        Err(ActionError::Remote {
            message: self
                .error
                .unwrap_or_else(|| "remote reported failure".to_string()),
            code: self.error_code,
        })
    }
}

/// Turn an `x-error` reply into [`ActionError::Remote`].
///
/// JSON objects contribute their `errorMessage`/`error` and `errorCode`;
/// anything else is used verbatim as the message.
pub(crate) fn failure_to_error(text: &str) -> ActionError {
    let trimmed = text.trim();
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(trimmed) {
        if let Some(message) = error_message(&obj) {
            return ActionError::Remote {
                message,
                code: obj.get("errorCode").and_then(scalar_text),
            };
        }
    }
    let message = if trimmed.is_empty() {
        "remote reported failure".to_string()
    } else {
        trimmed.to_string()
    };
    ActionError::Remote {
        message,
        code: None,
    }
}

fn error_message(obj: &Map<String, Value>) -> Option<String> {
    obj.get("errorMessage")
        .or_else(|| obj.get("error"))
        .and_then(scalar_text)
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn unwrap_single(obj: Map<String, Value>) -> Option<Value> {
    match obj.len() {
        0 => None,
        1 => obj.into_iter().next().map(|(_, v)| v),
        _ => Some(Value::Object(obj)),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
