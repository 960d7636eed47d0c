//! # Payload Shape Validation
//!
//! Structurally compares a request payload against a [`FieldSpec`] and
//! reports two diagnostics:
//!
//! - **unauthorized fields**: keys received in the payload that the
//!   specification does not declare at that nesting level;
//! - **missing fields**: keys the specification requires that are absent,
//!   or present with a value that cannot hold the required nested shape.
//!
//! The two passes are asymmetric. The unauthorized pass walks the payload
//! (every unexpected key actually received is reported, in payload order);
//! the missing pass walks the specification (every required key is checked,
//! in declaration order).
//!
//! Paths are dotted: `parent.child.grandchild`. A sequence is never compared
//! key-by-key against a nested specification; it is reported as a shape
//! mismatch.
//!
//! Validation is pure and never fails.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use cleanarch_core::Payload;

use crate::spec::{FieldRule, FieldSpec};

/// Why a required field was reported missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissingReason {
    /// A required leaf key is absent.
    Required,
    /// A key declaring a nested shape is absent.
    NestedAbsent,
    /// A key declaring a nested shape holds a scalar, `null` or a sequence.
    ShapeMismatch,
}

impl MissingReason {
    /// The diagnostic string reported to clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::NestedAbsent => "required field type not matching object",
            Self::ShapeMismatch => "required field type not matching array",
        }
    }
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MissingReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single missing-field diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingField {
    /// Dotted path of the field.
    pub path: String,
    /// Why it was reported.
    pub reason: MissingReason,
}

/// Result of validating a payload against a specification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShapeReport {
    /// Dotted paths of undeclared keys, in payload order.
    pub unauthorized: Vec<String>,
    /// Missing required fields, in declaration order.
    pub missing: Vec<MissingField>,
}

impl ShapeReport {
    /// True when the payload passed both structural checks.
    pub fn is_clean(&self) -> bool {
        self.unauthorized.is_empty() && self.missing.is_empty()
    }

    /// Missing fields as a `path -> reason` mapping.
    pub fn missing_map(&self) -> Payload {
        self.missing
            .iter()
            .map(|m| (m.path.clone(), Value::String(m.reason.as_str().to_string())))
            .collect()
    }

    /// Unauthorized fields as a JSON sequence of paths.
    pub fn unauthorized_list(&self) -> Value {
        Value::Array(
            self.unauthorized
                .iter()
                .map(|path| Value::String(path.clone()))
                .collect(),
        )
    }
}

/// Run both passes.
pub fn validate(payload: &Payload, spec: &FieldSpec) -> ShapeReport {
    ShapeReport {
        unauthorized: find_unauthorized_fields(payload, spec),
        missing: find_missing_fields(spec, payload),
    }
}

/// Collect payload keys that the specification does not declare.
pub fn find_unauthorized_fields(payload: &Payload, spec: &FieldSpec) -> Vec<String> {
    let mut found = Vec::new();
    collect_unauthorized(payload, spec, "", &mut found);
    found
}

/// Collect required fields the payload does not satisfy.
pub fn find_missing_fields(spec: &FieldSpec, payload: &Payload) -> Vec<MissingField> {
    let mut found = Vec::new();
    collect_missing(spec, payload, "", &mut found);
    found
}

fn collect_unauthorized(payload: &Payload, spec: &FieldSpec, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in payload {
        match (spec.get(key), value) {
            (None, _) => out.push(format!("{prefix}{key}")),
            (Some(FieldRule::Nested(inner)), Value::Object(nested)) => {
                collect_unauthorized(nested, inner, &format!("{prefix}{key}."), out);
            }
            (Some(_), _) => {}
        }
    }
}

fn collect_missing(spec: &FieldSpec, payload: &Payload, prefix: &str, out: &mut Vec<MissingField>) {
    for (key, rule) in spec.iter() {
        let reason = match (rule, payload.get(key)) {
            (FieldRule::Required, None) => MissingReason::Required,
            (FieldRule::Nested(_), None) => MissingReason::NestedAbsent,
            (FieldRule::Nested(inner), Some(Value::Object(nested))) => {
                collect_missing(inner, nested, &format!("{prefix}{key}."), out);
                continue;
            }
            (FieldRule::Nested(_), Some(_)) => MissingReason::ShapeMismatch,
            (FieldRule::Required, Some(_)) | (FieldRule::Optional, _) => continue,
        };
        out.push(MissingField {
            path: format!("{prefix}{key}"),
            reason,
        });
    }
}
