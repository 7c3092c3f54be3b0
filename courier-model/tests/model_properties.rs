//! Property-based tests for structured objects.
//!
//! - Equality and hash do not depend on the order fields were supplied in
//! - Cleaning is idempotent
//! - Mapping -> object -> primitive is the identity for null-free payloads

use std::sync::{Arc, LazyLock};

use courier_model::{Conf, FieldDescriptor, Schema, StructuredObject, Value};
use proptest::prelude::*;
use serde_json::{Map, Value as JsonValue, json};

static INNER: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("PropertiesInner")
        .field(FieldDescriptor::new("id"))
        .field(FieldDescriptor::new("name"))
        .build()
});

static OUTER: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("PropertiesOuter")
        .field(FieldDescriptor::new("kind"))
        .field(FieldDescriptor::new("count"))
        .field(FieldDescriptor::new("flag"))
        .field(FieldDescriptor::new("inner").with_nested(inner_schema))
        .field(FieldDescriptor::new("items").with_nested(inner_schema))
        .build()
});

fn inner_schema() -> Arc<Schema> {
    Arc::clone(&INNER)
}

fn outer_schema() -> Arc<Schema> {
    Arc::clone(&OUTER)
}

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9_]{0,12}").unwrap()
}

fn inner_strategy() -> impl Strategy<Value = JsonValue> {
    (any::<i64>(), text_strategy()).prop_map(|(id, name)| json!({"id": id, "name": name}))
}

/// A null-free payload with every field optional.
fn payload_strategy() -> impl Strategy<Value = Map<String, JsonValue>> {
    (
        prop::option::of(text_strategy()),
        prop::option::of(any::<u64>()),
        prop::option::of(any::<bool>()),
        prop::option::of(inner_strategy()),
        prop::option::of(prop::collection::vec(inner_strategy(), 0..4)),
    )
        .prop_map(|(kind, count, flag, inner, items)| {
            let mut map = Map::new();
            if let Some(kind) = kind {
                map.insert("kind".into(), json!(kind));
            }
            if let Some(count) = count {
                map.insert("count".into(), json!(count));
            }
            if let Some(flag) = flag {
                map.insert("flag".into(), json!(flag));
            }
            if let Some(inner) = inner {
                map.insert("inner".into(), inner);
            }
            if let Some(items) = items {
                map.insert("items".into(), JsonValue::Array(items));
            }
            map
        })
}

proptest! {
    /// Supplying the same fields in reverse order yields an equal object.
    #[test]
    fn equality_ignores_supply_order(payload in payload_strategy()) {
        let forward = StructuredObject::from_mapping(outer_schema(), payload.clone()).unwrap();
        let reversed: Vec<(String, Value)> = payload
            .into_iter()
            .rev()
            .map(|(k, v)| (k, Value::from(v)))
            .collect();
        let backward = StructuredObject::new(outer_schema(), Conf::default(), reversed).unwrap();

        prop_assert_eq!(forward.structural_hash(), backward.structural_hash());
        prop_assert!(forward == backward);
    }

    /// clean() twice leaves the same value map as clean() once.
    #[test]
    fn clean_is_idempotent(payload in payload_strategy(), nulls in prop::collection::vec(text_strategy(), 0..4)) {
        let mut payload = payload;
        for key in nulls {
            payload.insert(key, JsonValue::Null);
        }
        let mut obj = StructuredObject::from_mapping(outer_schema(), payload).unwrap();
        obj.clean();
        let once = obj.values().clone();
        obj.clean();
        prop_assert_eq!(obj.values(), &once);
        prop_assert!(once.values().all(|v| !v.is_absent()));
    }

    /// Without defaults or unknown keys, export reproduces the input mapping.
    #[test]
    fn mapping_round_trips(payload in payload_strategy()) {
        let mut obj = StructuredObject::from_mapping(outer_schema(), payload.clone()).unwrap();
        prop_assert_eq!(obj.to_primitive(), payload);
    }
}
