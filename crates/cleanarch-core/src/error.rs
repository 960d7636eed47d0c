//! # Bad Request Content Error
//!
//! The single structured error kind of the workspace. It carries a message
//! and a free-form error payload, and formats itself into a stable body
//! suitable for direct emission by a transport layer:
//!
//! ```json
//! {"status": "error", "error_code": 400, "message": "...", "details": {...}}
//! ```
//!
//! ## Invariant
//!
//! The key `"message"` never appears in the error payload. Every
//! constructor lifts it out into the message field.

use serde_json::{json, Value};
use thiserror::Error;

use crate::payload::Payload;
use crate::status::{Status, StatusCode};

/// Key under which structured diagnostics are stored in the error payload.
pub const DETAILS_KEY: &str = "details";

const MESSAGE_KEY: &str = "message";

/// Request content rejected at construction time, or explicitly raised by a
/// usecase.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("bad request content: {message}")]
pub struct BadRequestContentError {
    message: String,
    errors: Payload,
}

impl BadRequestContentError {
    /// Status code reported by [`format`](Self::format).
    pub const STATUS_CODE: StatusCode = StatusCode::BadRequest;

    /// Create an error with a message and an empty error payload.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Payload::new(),
        }
    }

    /// Build an error from a raw error payload.
    ///
    /// A `"message"` entry becomes the error message (empty when absent);
    /// every other entry is kept as-is.
    pub fn from_payload(mut errors: Payload) -> Self {
        let message = errors
            .shift_remove(MESSAGE_KEY)
            .map(message_text)
            .unwrap_or_default();
        Self { message, errors }
    }

    /// Attach a `details` entry.
    pub fn with_details(self, details: impl Into<Value>) -> Self {
        self.with_entry(DETAILS_KEY, details)
    }

    /// Attach an arbitrary entry to the error payload.
    ///
    /// The `"message"` key replaces the message instead of being stored.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == MESSAGE_KEY {
            self.message = message_text(value);
        } else {
            self.errors.insert(key, value);
        }
        self
    }

    /// The error message, e.g. `missing.required.fields`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The status code of this error kind.
    pub fn status_code(&self) -> StatusCode {
        Self::STATUS_CODE
    }

    /// The error payload, excluding the message.
    pub fn errors(&self) -> &Payload {
        &self.errors
    }

    /// The `details` entry, or an empty mapping when none was attached.
    pub fn details(&self) -> Value {
        self.errors
            .get(DETAILS_KEY)
            .cloned()
            .unwrap_or_else(|| Value::Object(Payload::new()))
    }

    /// The `details.error` entry when it is a string, otherwise `""`.
    pub fn details_message(&self) -> &str {
        self.errors
            .get(DETAILS_KEY)
            .and_then(|details| details.get("error"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Format the error as a serializable body.
    ///
    /// Error payload entries follow the fixed `status`, `error_code` and
    /// `message` keys and take precedence on collision.
    pub fn format(&self) -> Value {
        let mut body = match json!({
            "status": Status::Error,
            "error_code": self.status_code(),
            "message": self.message,
        }) {
            Value::Object(map) => map,
            _ => Payload::new(),
        };
        body.extend(self.errors.clone());
        Value::Object(body)
    }
}

impl From<BadRequestContentError> for Value {
    fn from(err: BadRequestContentError) -> Self {
        err.format()
    }
}

fn message_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
