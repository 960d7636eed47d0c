//! # Request Construction
//!
//! [`RequestBuilder`] turns a raw payload into an immutable [`Request`].
//! Construction runs three checks in a fixed order and stops at the first
//! failure:
//!
//! 1. missing required fields → `missing.required.fields`,
//!    details `{missing_fields: {path: reason, ...}}`;
//! 2. unauthorized fields → `illegal.fields`,
//!    details `{unrequired_fields: [path, ...]}`;
//! 3. the optional [`FieldConstraint`], see [`ConstraintError`] for how its
//!    failures are reported.
//!
//! A `Request` therefore only exists for payloads that passed every check.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use cleanarch_core::{lookup_in, BadRequestContentError, Payload, RequestId};

use crate::constraint::{ConstraintError, FieldConstraint};
use crate::id::{IdGenerator, UuidV4Generator};
use crate::shape::{self, ShapeReport};
use crate::spec::FieldSpec;

/// Message of the error raised when required fields are missing.
pub const MISSING_REQUIRED_FIELDS: &str = "missing.required.fields";

/// Message of the error raised when undeclared fields are present.
pub const ILLEGAL_FIELDS: &str = "illegal.fields";

/// A validated, immutable application request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    id: RequestId,
    data: Payload,
}

impl Request {
    /// The identifier assigned when the request was accepted.
    pub fn request_id(&self) -> &RequestId {
        &self.id
    }

    /// Read a field by dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup_in(&self.data, path)
    }

    /// Read a field by dotted path, falling back to `default`.
    pub fn get_or<'a>(&'a self, path: &str, default: &'a Value) -> &'a Value {
        self.get(path).unwrap_or(default)
    }

    /// Read a field by dotted path as `T`.
    ///
    /// `None` when the field is absent or does not deserialize as `T`.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        self.get(path)
            .and_then(|value| T::deserialize(value).ok())
    }

    /// The full stored payload.
    pub fn to_payload(&self) -> &Payload {
        &self.data
    }

    /// Consume the request, returning its payload.
    pub fn into_payload(self) -> Payload {
        self.data
    }
}

/// Validates payloads against a [`FieldSpec`] and materializes requests.
pub struct RequestBuilder {
    spec: FieldSpec,
    constraint: Option<Box<dyn FieldConstraint>>,
    ids: Box<dyn IdGenerator>,
}

impl RequestBuilder {
    /// A builder with no field constraint and random request ids.
    pub fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            constraint: None,
            ids: Box::new(UuidV4Generator),
        }
    }

    /// Run `constraint` after the structural checks pass.
    pub fn with_constraint(mut self, constraint: impl FieldConstraint + 'static) -> Self {
        self.constraint = Some(Box::new(constraint));
        self
    }

    /// Draw request ids from `ids`.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// The specification payloads are validated against.
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Run the structural checks only.
    pub fn inspect(&self, payload: &Payload) -> ShapeReport {
        shape::validate(payload, &self.spec)
    }

    /// Validate `payload` and build a request holding a copy of it.
    pub fn create_from_payload(&self, payload: &Payload) -> Result<Request, BadRequestContentError> {
        let report = self.inspect(payload);

        if !report.missing.is_empty() {
            tracing::debug!(
                missing = report.missing.len(),
                "request rejected: missing required fields"
            );
            return Err(BadRequestContentError::new(MISSING_REQUIRED_FIELDS)
                .with_details(single("missing_fields", Value::Object(report.missing_map()))));
        }

        if !report.unauthorized.is_empty() {
            tracing::debug!(
                unauthorized = report.unauthorized.len(),
                "request rejected: illegal fields"
            );
            return Err(BadRequestContentError::new(ILLEGAL_FIELDS)
                .with_details(single("unrequired_fields", report.unauthorized_list())));
        }

        if let Some(constraint) = &self.constraint {
            constraint.check(payload).map_err(|err| {
                tracing::debug!(error = %err, "request rejected by field constraint");
                ConstraintError::into_request_error(err)
            })?;
        }

        let id = self.ids.next_id();
        tracing::trace!(request_id = %id, "request accepted");
        Ok(Request {
            id,
            data: payload.clone(),
        })
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("spec", &self.spec)
            .field("has_constraint", &self.constraint.is_some())
            .finish_non_exhaustive()
    }
}

fn single(key: &str, value: Value) -> Payload {
    let mut map = Payload::new();
    map.insert(key.to_string(), value);
    map
}
