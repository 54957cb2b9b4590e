//! Patch engine for Docket.
//!
//! Structural diff and apply over `serde_json::Value`, RFC 6902 semantics.
//! Both halves are backed by the `json-patch` crate so a patch computed
//! from a byte-identical baseline replays deterministically on the server.
//!
//! # Key Functions
//!
//! - [`diff`] -- deterministic structural diff between two values
//! - [`apply`] -- replay a patch against a baseline, all-or-nothing
//! - [`parse`] -- decode a client-supplied JSON array into a [`Patch`]

pub mod error;

pub use error::{PatchError, PatchResult};
pub use json_patch::{Patch, PatchOperation};

use serde_json::Value;

/// Compute the structural diff transforming `before` into `after`.
///
/// For all values `a` and `b`, `apply(a, &diff(a, b))` is deeply equal
/// to `b`. The operation order is stable for identical inputs.
pub fn diff(before: &Value, after: &Value) -> Patch {
    json_patch::diff(before, after)
}

/// Replay `patch` against `before`, producing the patched value.
///
/// The baseline is never modified: the patch runs against a clone, so a
/// failing operation leaves the caller's value untouched and returns
/// [`PatchError::Apply`].
pub fn apply(before: &Value, patch: &Patch) -> PatchResult<Value> {
    let mut doc = before.clone();
    json_patch::patch(&mut doc, patch)?;
    Ok(doc)
}

/// Decode a raw JSON value (as received from a client) into a [`Patch`].
pub fn parse(raw: &Value) -> PatchResult<Patch> {
    Ok(serde_json::from_value(raw.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn diff_identical_values_is_empty() {
        let v = json!({"a": 1, "b": [true, null]});
        assert!(diff(&v, &v).0.is_empty());
    }

    #[test]
    fn diff_produces_replace() {
        let patch = diff(&json!({"a": 1}), &json!({"a": 2}));
        let encoded = serde_json::to_value(&patch).unwrap();
        assert_eq!(encoded, json!([{"op": "replace", "path": "/a", "value": 2}]));
    }

    #[test]
    fn diff_is_deterministic() {
        let a = json!({"x": 1, "y": [1, 2, 3], "z": {"k": "v"}});
        let b = json!({"x": 2, "y": [1, 3], "w": null});
        assert_eq!(
            serde_json::to_value(diff(&a, &b)).unwrap(),
            serde_json::to_value(diff(&a, &b)).unwrap()
        );
    }

    #[test]
    fn apply_replays_diff() {
        let a = json!({"a": 1, "nested": {"list": [1, 2]}});
        let b = json!({"a": 2, "nested": {"list": [1, 2, 3]}, "new": "field"});
        let patched = apply(&a, &diff(&a, &b)).unwrap();
        assert_eq!(patched, b);
    }

    #[test]
    fn apply_does_not_mutate_baseline() {
        let a = json!({"a": 1});
        let patch = parse(&json!([{"op": "replace", "path": "/a", "value": 2}])).unwrap();
        let _ = apply(&a, &patch).unwrap();
        assert_eq!(a, json!({"a": 1}));
    }

    #[test]
    fn remove_at_missing_path_fails() {
        let patch = parse(&json!([{"op": "remove", "path": "/missing"}])).unwrap();
        let err = apply(&json!({"a": 1}), &patch).unwrap_err();
        assert!(matches!(err, PatchError::Apply(_)));
    }

    #[test]
    fn test_op_mismatch_fails() {
        let patch = parse(&json!([
            {"op": "test", "path": "/a", "value": 999},
            {"op": "replace", "path": "/a", "value": 2}
        ]))
        .unwrap();
        let err = apply(&json!({"a": 1}), &patch).unwrap_err();
        assert!(matches!(err, PatchError::Apply(_)));
    }

    #[test]
    fn empty_patch_is_identity() {
        let patch = parse(&json!([])).unwrap();
        let v = json!({"a": 1});
        assert_eq!(apply(&v, &patch).unwrap(), v);
    }

    #[test]
    fn parse_rejects_non_array() {
        assert!(parse(&json!({"op": "remove", "path": "/a"})).is_err());
        assert!(parse(&json!("nonsense")).is_err());
    }

    #[test]
    fn parse_rejects_unknown_op() {
        assert!(parse(&json!([{"op": "transmogrify", "path": "/a"}])).is_err());
    }

    #[test]
    fn scalar_documents_diff_and_apply() {
        let a = json!(1);
        let b = json!(["now", "an", "array"]);
        assert_eq!(apply(&a, &diff(&a, &b)).unwrap(), b);
    }

    fn arb_json() -> impl Strategy<Value = serde_json::Value> {
        let leaf = prop_oneof![
            Just(serde_json::Value::Null),
            any::<bool>().prop_map(serde_json::Value::from),
            any::<i64>().prop_map(serde_json::Value::from),
            "[a-z0-9]{0,8}".prop_map(serde_json::Value::from),
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(serde_json::Value::Array),
                prop::collection::btree_map("[a-z]{1,5}", inner, 0..6).prop_map(|map| {
                    serde_json::Value::Object(map.into_iter().collect())
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn diff_then_apply_round_trips(a in arb_json(), b in arb_json()) {
            let patch = diff(&a, &b);
            let rebuilt = apply(&a, &patch).unwrap();
            prop_assert_eq!(rebuilt, b);
        }

        #[test]
        fn diff_of_equal_values_is_empty(a in arb_json()) {
            prop_assert!(diff(&a, &a.clone()).0.is_empty());
        }
    }
}
