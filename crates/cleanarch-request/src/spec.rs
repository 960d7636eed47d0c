//! # Field Specification
//!
//! Declares which keys a request payload may carry, which of them are
//! required, and which must hold a nested mapping of their own.
//!
//! A specification can be assembled in code:
//!
//! ```
//! use cleanarch_request::FieldSpec;
//!
//! let spec = FieldSpec::new()
//!     .required("field_1")
//!     .optional("field_2")
//!     .nested("field_4", FieldSpec::new().required("field_5"));
//! assert!(spec.contains_key("field_4"));
//! ```
//!
//! or loaded from a JSON / YAML document whose leaves are markers:
//! `true`, non-zero numbers and non-empty strings mark a required key;
//! `false`, `null`, `0` and `""` mark an optional key; a mapping declares
//! a nested shape, which is always required.

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use cleanarch_core::Shape;

/// Error loading a field specification document.
#[derive(Error, Debug)]
pub enum FieldSpecError {
    /// The document root (or a nested declaration) is not a mapping.
    #[error("field specification must be a mapping, found {found}")]
    NotAMapping {
        /// Shape of the offending value.
        found: String,
    },

    /// A marker is a sequence, which has no meaning as a field rule.
    #[error("unsupported marker at '{path}': sequences cannot declare fields")]
    UnsupportedMarker {
        /// Dotted path of the offending declaration.
        path: String,
    },

    /// The JSON document could not be parsed.
    #[error("invalid JSON field specification: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML document could not be parsed.
    #[error("invalid YAML field specification: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Rule attached to a single declared key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// The key must be present; any value is accepted.
    Required,
    /// The key may be absent; any value is accepted.
    Optional,
    /// The key must be present and hold a mapping matching the inner spec.
    Nested(FieldSpec),
}

impl FieldRule {
    /// True for `Required` and `Nested`.
    pub fn is_required(&self) -> bool {
        !matches!(self, Self::Optional)
    }

    /// The inner specification of a `Nested` rule.
    pub fn as_nested(&self) -> Option<&FieldSpec> {
        match self {
            Self::Nested(spec) => Some(spec),
            _ => None,
        }
    }
}

/// Ordered set of declared keys and their rules.
///
/// Declaration order is preserved; missing-field diagnostics follow it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSpec {
    fields: Vec<(String, FieldRule)>,
}

impl FieldSpec {
    /// An empty specification: every payload key is unauthorized.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required key.
    pub fn required(self, key: impl Into<String>) -> Self {
        self.with_rule(key, FieldRule::Required)
    }

    /// Declare an optional key.
    pub fn optional(self, key: impl Into<String>) -> Self {
        self.with_rule(key, FieldRule::Optional)
    }

    /// Declare a required key holding a nested mapping.
    pub fn nested(self, key: impl Into<String>, inner: FieldSpec) -> Self {
        self.with_rule(key, FieldRule::Nested(inner))
    }

    /// Declare a key with an explicit rule.
    pub fn with_rule(mut self, key: impl Into<String>, rule: FieldRule) -> Self {
        self.insert(key, rule);
        self
    }

    /// Declare a key, replacing any earlier rule for it in place.
    pub fn insert(&mut self, key: impl Into<String>, rule: FieldRule) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = rule,
            None => self.fields.push((key, rule)),
        }
    }

    /// Look up the rule for a key.
    pub fn get(&self, key: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, rule)| rule)
    }

    /// True when the key is declared.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate declarations in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule)> {
        self.fields.iter().map(|(k, rule)| (k.as_str(), rule))
    }

    /// Number of keys declared at this level.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when nothing is declared at this level.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build a specification from a marker document.
    pub fn from_value(value: &Value) -> Result<Self, FieldSpecError> {
        Self::from_value_at(value, "")
    }

    /// Parse a JSON marker document.
    pub fn from_json_str(s: &str) -> Result<Self, FieldSpecError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(&value)
    }

    /// Parse a YAML marker document.
    pub fn from_yaml_str(s: &str) -> Result<Self, FieldSpecError> {
        let value: Value = serde_yaml::from_str(s)?;
        Self::from_value(&value)
    }

    /// Render the specification back to a marker document.
    pub fn to_value(&self) -> Value {
        let map = self
            .iter()
            .map(|(key, rule)| {
                let marker = match rule {
                    FieldRule::Required => Value::Bool(true),
                    FieldRule::Optional => Value::Bool(false),
                    FieldRule::Nested(inner) => inner.to_value(),
                };
                (key.to_string(), marker)
            })
            .collect();
        Value::Object(map)
    }

    fn from_value_at(value: &Value, prefix: &str) -> Result<Self, FieldSpecError> {
        let Value::Object(map) = value else {
            return Err(FieldSpecError::NotAMapping {
                found: shape_name(value).to_string(),
            });
        };

        let mut spec = FieldSpec::new();
        for (key, marker) in map {
            let path = format!("{prefix}{key}");
            let rule = match marker {
                Value::Object(_) => {
                    FieldRule::Nested(Self::from_value_at(marker, &format!("{path}."))?)
                }
                Value::Array(_) => return Err(FieldSpecError::UnsupportedMarker { path }),
                scalar if is_truthy(scalar) => FieldRule::Required,
                _ => FieldRule::Optional,
            };
            spec.insert(key.clone(), rule);
        }
        Ok(spec)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn shape_name(value: &Value) -> &'static str {
    match Shape::of(value) {
        Shape::Scalar => "a scalar",
        Shape::Sequence => "a sequence",
        Shape::Mapping => "a mapping",
    }
}

impl Serialize for FieldSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, rule) in self.iter() {
            match rule {
                FieldRule::Required => map.serialize_entry(key, &true)?,
                FieldRule::Optional => map.serialize_entry(key, &false)?,
                FieldRule::Nested(inner) => map.serialize_entry(key, inner)?,
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        FieldSpec::from_value(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_preserves_declaration_order() {
        let spec = FieldSpec::new().required("b").optional("a").required("c");
        let keys: Vec<&str> = spec.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let spec = FieldSpec::new()
            .required("a")
            .required("b")
            .optional("a");
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.get("a"), Some(&FieldRule::Optional));
        assert_eq!(spec.iter().next().map(|(k, _)| k), Some("a"));
    }

    #[test]
    fn test_rule_requiredness() {
        assert!(FieldRule::Required.is_required());
        assert!(!FieldRule::Optional.is_required());
        assert!(FieldRule::Nested(FieldSpec::new()).is_required());
    }

    #[test]
    fn test_from_value_markers() {
        let spec = FieldSpec::from_value(&json!({
            "t": true,
            "f": false,
            "n": null,
            "one": 1,
            "zero": 0,
            "s": "yes",
            "empty": "",
            "nested": {"inner": true}
        }))
        .unwrap();

        assert_eq!(spec.get("t"), Some(&FieldRule::Required));
        assert_eq!(spec.get("f"), Some(&FieldRule::Optional));
        assert_eq!(spec.get("n"), Some(&FieldRule::Optional));
        assert_eq!(spec.get("one"), Some(&FieldRule::Required));
        assert_eq!(spec.get("zero"), Some(&FieldRule::Optional));
        assert_eq!(spec.get("s"), Some(&FieldRule::Required));
        assert_eq!(spec.get("empty"), Some(&FieldRule::Optional));
        assert_eq!(
            spec.get("nested"),
            Some(&FieldRule::Nested(FieldSpec::new().required("inner")))
        );
    }

    #[test]
    fn test_from_value_rejects_non_mapping_root() {
        let err = FieldSpec::from_value(&json!([true])).unwrap_err();
        assert!(matches!(err, FieldSpecError::NotAMapping { ref found } if found == "a sequence"));
    }

    #[test]
    fn test_from_value_rejects_sequence_marker_with_path() {
        let err = FieldSpec::from_value(&json!({"a": {"b": [1]}})).unwrap_err();
        match err {
            FieldSpecError::UnsupportedMarker { path } => assert_eq!(path, "a.b"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_json_str() {
        let spec = FieldSpec::from_json_str(r#"{"field_1": true, "field_2": {"field_3": true}}"#)
            .unwrap();
        assert_eq!(
            spec,
            FieldSpec::new()
                .required("field_1")
                .nested("field_2", FieldSpec::new().required("field_3"))
        );
        assert!(matches!(
            FieldSpec::from_json_str("{not json"),
            Err(FieldSpecError::Json(_))
        ));
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = "\
field_1: true
field_2: false
field_4:
  field_5: true
";
        let spec = FieldSpec::from_yaml_str(yaml).unwrap();
        assert_eq!(
            spec,
            FieldSpec::new()
                .required("field_1")
                .optional("field_2")
                .nested("field_4", FieldSpec::new().required("field_5"))
        );
        assert!(matches!(
            FieldSpec::from_yaml_str("- a\n- b\n"),
            Err(FieldSpecError::NotAMapping { .. })
        ));
    }

    #[test]
    fn test_serialize_matches_to_value() {
        let spec = FieldSpec::new()
            .required("a")
            .optional("b")
            .nested("c", FieldSpec::new().required("d"));
        let expected = json!({"a": true, "b": false, "c": {"d": true}});
        assert_eq!(spec.to_value(), expected);
        assert_eq!(serde_json::to_value(&spec).unwrap(), expected);
    }

    #[test]
    fn test_deserialize_from_document() {
        let spec: FieldSpec = serde_json::from_value(json!({"a": 1, "b": {"c": 0}})).unwrap();
        assert_eq!(
            spec,
            FieldSpec::new()
                .required("a")
                .nested("b", FieldSpec::new().optional("c"))
        );
        assert!(serde_json::from_value::<FieldSpec>(json!("nope")).is_err());
    }
}
