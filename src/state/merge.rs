// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! One-level merge used when a [`State`](super::State) is updated.
//!
//! The merge is deliberately shallow. When both sides hold a mapping, the result
//! starts from a copy of the base mapping and every key of the update mapping is
//! written over it. Values below that first level are never merged: a nested
//! mapping in the update replaces the nested mapping in the base wholesale.
//!
//! ```text
//! base   {"a": 1, "x": {"nested": 1}}
//! update {"b": 2, "x": {"other": 2}}
//! result {"a": 1, "b": 2, "x": {"other": 2}}
//! ```
//!
//! Everything returned is an owned copy, so the merged value never aliases
//! either input.

use serde_json::Value;

use super::Fields;

/// Merges `update` into `base` for a single field.
///
/// * both mappings: copy of `base` with every key of `update` written over it
/// * anything else: `update` wins outright
pub fn merge_one_level(base: &Value, update: &Value) -> Value {
    match (base, update) {
        (Value::Object(base), Value::Object(update)) => Value::Object(merge_fields(base, update)),
        (_, update) => update.clone(),
    }
}

/// Mapping form of [`merge_one_level`].
pub fn merge_fields(base: &Fields, update: &Fields) -> Fields {
    let mut merged = base.clone();
    for (key, value) in update {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn adds_and_overwrites_top_level_keys() {
        let merged = merge_one_level(&json!({"a": 1, "b": 2}), &json!({"b": 3, "c": 4}));
        assert_eq!(merged, json!({"a": 1, "b": 3, "c": 4}));
    }

    #[test]
    fn nested_mappings_are_replaced_not_merged() {
        let merged = merge_one_level(
            &json!({"x": {"nested": 1}, "y": 0}),
            &json!({"x": {"other": 2}}),
        );
        assert_eq!(merged, json!({"x": {"other": 2}, "y": 0}));
    }

    #[test]
    fn non_mapping_update_replaces() {
        assert_eq!(merge_one_level(&json!({"a": 1}), &json!([1, 2])), json!([1, 2]));
        assert_eq!(merge_one_level(&json!(5), &json!("five")), json!("five"));
    }

    #[test]
    fn mapping_update_over_scalar_base_replaces() {
        assert_eq!(merge_one_level(&json!(null), &json!({"a": 1})), json!({"a": 1}));
    }

    #[test]
    fn empty_update_keeps_base() {
        let base = json!({"a": {"deep": [1, 2, 3]}});
        assert_eq!(merge_one_level(&base, &json!({})), base);
    }
}
