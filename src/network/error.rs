//! Request failure taxonomy and its rendering into alert text.

use serde_json::Value;
use thiserror::Error;

use crate::constants::{ERR_SAME_NAME_FILES, INTERNAL_SERVER_ERROR, NO_RESPONSE_SUFFIX};
use crate::models::SameNameFiles;

/// Body of a non-2xx response.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Text(String),
    Json(Value),
}

impl ErrorBody {
    /// JSON when the text parses as a JSON object/array, plain text otherwise.
    pub fn from_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(v) if v.is_object() || v.is_array() => ErrorBody::Json(v),
            Ok(Value::String(s)) => ErrorBody::Text(s),
            _ => ErrorBody::Text(text.to_string()),
        }
    }
}

/// Converts an error body into human readable text.
pub type DataToString = fn(&ErrorBody) -> String;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RequestError {
    /// The request could not even be built or dispatched.
    #[error("{0}")]
    Setup(String),

    /// Sent, but nothing came back (offline, CORS, connection reset).
    #[error("{status} {}", NO_RESPONSE_SUFFIX)]
    NoResponse { status: u16 },

    /// The server answered with a non-2xx status.
    #[error("[{status}] {body:?}")]
    Status { status: u16, body: ErrorBody },

    /// 2xx, but the body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl RequestError {
    /// Text shown in the danger alert. `500` is reported without its body.
    pub fn to_alert_text(&self, data_to_string: DataToString) -> String {
        match self {
            RequestError::Status { status: 500, .. } => INTERNAL_SERVER_ERROR.to_string(),
            RequestError::Status { status, body } => format!("[{}] {}", status, data_to_string(body)),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } | RequestError::NoResponse { status } => Some(*status),
            _ => None,
        }
    }

    /// The same-name conflict payload, if this is one.
    pub fn same_name_conflict(&self) -> Option<SameNameFiles> {
        match self {
            RequestError::Status { body: ErrorBody::Json(v), .. }
                if v.get("errType").and_then(Value::as_str) == Some(ERR_SAME_NAME_FILES) =>
            {
                serde_json::from_value(v.clone()).ok()
            }
            _ => None,
        }
    }
}

/// Always the compact JSON (or the raw text).
pub fn error_data_to_string(body: &ErrorBody) -> String {
    match body {
        ErrorBody::Text(s) => s.clone(),
        ErrorBody::Json(v) => v.to_string(),
    }
}

/// Understands the validation error shape `{detail: string}` /
/// `{detail: [{loc, msg}]}`; anything else falls back to JSON.
pub fn validation_error_to_string(body: &ErrorBody) -> String {
    let value = match body {
        ErrorBody::Text(s) => return s.clone(),
        ErrorBody::Json(v) => v,
    };
    match value.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(items)) if !items.is_empty() => {
            let first = &items[0];
            let loc = first.get("loc").cloned().unwrap_or(Value::Null);
            let msg = first.get("msg").and_then(Value::as_str).unwrap_or_default();
            format!("錯誤位置: {}; 錯誤原因: {}", loc, msg)
        }
        _ => value.to_string(),
    }
}

/// The formatter used when a request does not pick one.
pub const DEFAULT_DATA_TO_STRING: DataToString = validation_error_to_string;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
