//! # Payload Value Model
//!
//! A payload is a string-keyed JSON mapping whose values are scalars,
//! nested mappings, or sequences. Insertion order is preserved so that
//! diagnostics follow the order in which keys were received.
//!
//! [`Shape`] makes the "is this object-shaped?" question an explicit
//! pattern match: `null` is a scalar, and sequences are distinct from
//! mappings.

use serde_json::{Map, Value};

/// A request or response body: an ordered string-keyed mapping.
pub type Payload = Map<String, Value>;

/// Structural classification of a payload value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `null`, booleans, numbers and strings.
    Scalar,
    /// An ordered list of values.
    Sequence,
    /// A string-keyed mapping.
    Mapping,
}

impl Shape {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Self::Scalar,
        }
    }

    /// Mappings and sequences are object-shaped; scalars are not.
    pub fn is_object_shaped(&self) -> bool {
        !matches!(self, Self::Scalar)
    }
}

/// Resolve a dotted path against a value.
///
/// Each segment descends into a mapping by key or into a sequence by
/// decimal index. Returns `None` as soon as a segment is missing or the
/// current value is a scalar. The empty path addresses the root key `""`,
/// not the root itself.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(root, step)
}

/// Resolve a dotted path against a payload mapping.
pub fn lookup_in<'a>(payload: &'a Payload, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let head = payload.get(first)?;
    segments.try_fold(head, step)
}

fn step<'a>(current: &'a Value, segment: &str) -> Option<&'a Value> {
    match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn nested_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
        ];
        leaf.prop_recursive(4, 32, 5, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,5}", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn paths(value: &Value, prefix: &str, out: &mut Vec<(String, Value)>) {
        let children: Vec<(String, &Value)> = match value {
            Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Value::Array(items) => items.iter().enumerate().map(|(i, v)| (i.to_string(), v)).collect(),
            _ => return,
        };
        for (segment, child) in children {
            let path = format!("{prefix}{segment}");
            out.push((path.clone(), child.clone()));
            paths(child, &format!("{path}."), out);
        }
    }

    proptest! {
        /// Every dotted path built from the tree resolves to the node it names.
        #[test]
        fn lookup_resolves_every_path(value in nested_value()) {
            let mut all = Vec::new();
            paths(&value, "", &mut all);
            for (path, expected) in all {
                prop_assert_eq!(lookup(&value, &path), Some(&expected), "path {}", path);
            }
        }

        /// Lookup never descends through a scalar.
        #[test]
        fn lookup_through_scalar_is_none(value in nested_value(), segment in "[a-z0-9]{1,4}") {
            let mut all = Vec::new();
            paths(&value, "", &mut all);
            for (path, node) in all {
                if Shape::of(&node) == Shape::Scalar {
                    let deeper = format!("{path}.{segment}");
                    prop_assert_eq!(lookup(&value, &deeper), None);
                }
            }
        }
    }
}
