//! # Field Constraints
//!
//! A field constraint is a caller-supplied check that runs after a payload
//! has passed both structural checks. It carries business rules the shape
//! validator cannot express (value types, ranges, cross-field rules).
//!
//! A failing constraint reports a [`ConstraintError`]:
//!
//! - `Rejected` carries a fully formed [`BadRequestContentError`] and is
//!   surfaced unchanged, so the constraint keeps control of its message and
//!   details;
//! - `Message`, `Errors` and `Raw` are wrapped into an
//!   `invalid.request.fields` error whose `details.error` holds the string,
//!   the mapping, or the raw value.

use serde_json::Value;
use thiserror::Error;

use cleanarch_core::{BadRequestContentError, Payload};

/// Message of the error produced for a wrapped constraint failure.
pub const INVALID_REQUEST_FIELDS: &str = "invalid.request.fields";

/// Failure reported by a [`FieldConstraint`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstraintError {
    /// A human-readable reason.
    #[error("{0}")]
    Message(String),

    /// Structured per-field violations.
    #[error("constraint violations on {} field(s)", .0.len())]
    Errors(Payload),

    /// Any other value describing the failure.
    #[error("constraint rejected the request: {0}")]
    Raw(Value),

    /// A ready-made request error, surfaced as-is.
    #[error(transparent)]
    Rejected(#[from] BadRequestContentError),
}

impl ConstraintError {
    /// Shorthand for [`ConstraintError::Message`].
    pub fn message(reason: impl Into<String>) -> Self {
        Self::Message(reason.into())
    }

    /// Convert into the error returned to the request's caller.
    pub fn into_request_error(self) -> BadRequestContentError {
        let detail = match self {
            Self::Rejected(err) => return err,
            Self::Message(reason) => Value::String(reason),
            Self::Errors(errors) => Value::Object(errors),
            Self::Raw(value) => value,
        };
        let mut details = Payload::new();
        details.insert("error".to_string(), detail);
        BadRequestContentError::new(INVALID_REQUEST_FIELDS).with_details(details)
    }
}

/// A semantic check applied to a structurally valid payload.
///
/// Any `Fn(&Payload) -> Result<(), ConstraintError>` closure is a
/// constraint.
pub trait FieldConstraint: Send + Sync {
    /// Inspect the payload; return an error to reject the request.
    fn check(&self, payload: &Payload) -> Result<(), ConstraintError>;
}

impl<F> FieldConstraint for F
where
    F: Fn(&Payload) -> Result<(), ConstraintError> + Send + Sync,
{
    fn check(&self, payload: &Payload) -> Result<(), ConstraintError> {
        self(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_is_wrapped() {
        let err = ConstraintError::message("error_message").into_request_error();
        assert_eq!(err.message(), INVALID_REQUEST_FIELDS);
        assert_eq!(err.details(), json!({"error": "error_message"}));
        assert_eq!(err.details_message(), "error_message");
    }

    #[test]
    fn test_errors_are_wrapped() {
        let mut errors = Payload::new();
        errors.insert("_errors".into(), json!(["[field_2] must be a string."]));
        let err = ConstraintError::Errors(errors).into_request_error();
        assert_eq!(
            err.details(),
            json!({"error": {"_errors": ["[field_2] must be a string."]}})
        );
    }

    #[test]
    fn test_raw_value_is_wrapped() {
        let err = ConstraintError::Raw(json!(42)).into_request_error();
        assert_eq!(err.details(), json!({"error": 42}));
    }

    #[test]
    fn test_rejected_error_passes_through() {
        let original = BadRequestContentError::new("validation.constraints")
            .with_entry("errors", json!({"field_2": "must be a string"}));
        let err = ConstraintError::from(original.clone()).into_request_error();
        assert_eq!(err, original);
        assert_eq!(err.format()["message"], json!("validation.constraints"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ConstraintError::message("nope").to_string(), "nope");
        let rejected = ConstraintError::from(BadRequestContentError::new("x"));
        assert_eq!(rejected.to_string(), "bad request content: x");
    }

    #[test]
    fn test_closure_is_a_constraint() {
        let constraint = |payload: &Payload| {
            if payload.get("field_2").is_some_and(Value::is_string) {
                Ok(())
            } else {
                Err(ConstraintError::message("[field_2] must be a string."))
            }
        };
        let mut payload = Payload::new();
        payload.insert("field_2".into(), json!(3));
        assert!(constraint.check(&payload).is_err());
        payload.insert("field_2".into(), json!("three"));
        assert!(constraint.check(&payload).is_ok());
    }
}
