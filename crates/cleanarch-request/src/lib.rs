//! # cleanarch-request: Validated Application Requests
//!
//! Builds immutable [`Request`] values from raw payloads. Every payload is
//! checked against a declared [`FieldSpec`] before a request exists:
//!
//! - [`shape`]: recursive detection of missing and unauthorized fields,
//!   with dotted-path diagnostics;
//! - [`constraint`]: the caller-supplied semantic check that runs once the
//!   shape is valid;
//! - [`request`]: the builder that orchestrates both and materializes the
//!   request with a fresh [`RequestId`](cleanarch_core::RequestId).
//!
//! ## Crate Policy
//!
//! - Depends only on `cleanarch-core` internally.
//! - Validation never panics; rejected payloads yield a
//!   [`BadRequestContentError`](cleanarch_core::BadRequestContentError).

pub mod constraint;
pub mod id;
pub mod request;
pub mod shape;
pub mod spec;

pub use constraint::{ConstraintError, FieldConstraint, INVALID_REQUEST_FIELDS};
pub use id::{IdGenerator, SequentialIdGenerator, UuidV4Generator};
pub use request::{Request, RequestBuilder, ILLEGAL_FIELDS, MISSING_REQUIRED_FIELDS};
pub use shape::{
    find_missing_fields, find_unauthorized_fields, validate, MissingField, MissingReason,
    ShapeReport,
};
pub use spec::{FieldRule, FieldSpec, FieldSpecError};
