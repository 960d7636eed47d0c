//! # Application Response
//!
//! The value a usecase hands to its presenter. A response is either a
//! success or a failure, carries a [`StatusCode`], an optional message, and
//! arbitrary data.
//!
//! [`Response::output`] renders the transport-ready body:
//!
//! ```json
//! {"status": "success", "code": 200, "message": null, "data": {...}}
//! ```
//!
//! Failures carry their data under `details` instead of `data`.

use serde::Serialize;
use serde_json::Value;

use cleanarch_core::{lookup, Payload, Status, StatusCode};

/// Result of a usecase execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    success: bool,
    status_code: StatusCode,
    message: Option<String>,
    data: Value,
}

impl Response {
    /// Create a response with every attribute explicit.
    pub fn create(
        success: bool,
        status_code: StatusCode,
        message: impl Into<String>,
        data: impl Into<Value>,
    ) -> Self {
        Self {
            success,
            status_code,
            message: Some(message.into()),
            data: data.into(),
        }
    }

    /// A successful response without a message.
    pub fn success(status_code: StatusCode, data: impl Into<Value>) -> Self {
        Self {
            success: true,
            status_code,
            message: None,
            data: data.into(),
        }
    }

    /// A failed response without a message.
    pub fn failure(status_code: StatusCode, details: impl Into<Value>) -> Self {
        Self {
            success: false,
            ..Self::success(status_code, details)
        }
    }

    /// Attach or replace the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Read a data field by dotted path, e.g. `user.account.balance`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.data, path)
    }

    /// Render the transport body.
    pub fn output(&self) -> ResponseOutput {
        let body = if self.success {
            OutputBody::Data(self.data.clone())
        } else {
            OutputBody::Details(self.data.clone())
        };
        ResponseOutput {
            status: if self.success { Status::Success } else { Status::Error },
            code: self.status_code,
            message: self.message.clone(),
            body,
        }
    }
}

/// Transport body of a [`Response`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseOutput {
    pub status: Status,
    pub code: StatusCode,
    pub message: Option<String>,
    #[serde(flatten)]
    pub body: OutputBody,
}

/// Payload slot of a [`ResponseOutput`]; the variant names the JSON key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputBody {
    Data(Value),
    Details(Value),
}

impl ResponseOutput {
    /// Convert into a JSON object.
    pub fn into_value(self) -> Value {
        let mut map = Payload::new();
        map.insert("status".into(), Value::String(self.status.as_str().into()));
        map.insert("code".into(), Value::from(self.code.as_u16()));
        map.insert(
            "message".into(),
            self.message.map_or(Value::Null, Value::String),
        );
        match self.body {
            OutputBody::Data(data) => map.insert("data".into(), data),
            OutputBody::Details(details) => map.insert("details".into(), details),
        };
        Value::Object(map)
    }
}

impl From<ResponseOutput> for Value {
    fn from(output: ResponseOutput) -> Self {
        output.into_value()
    }
}
