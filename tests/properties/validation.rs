//! Property tests for document validation.

use proptest::prelude::*;
use serde_json::{json, Value};

use stackctl::domain::services::{validate_config, validate_status};

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::from),
    ]
}

fn arbitrary_json() -> impl Strategy<Value = Value> {
    json_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::from),
            proptest::collection::btree_map(
                prop_oneof![
                    Just("name".to_string()),
                    Just("resources".to_string()),
                    Just("deployed".to_string()),
                    Just("id".to_string()),
                    Just("service".to_string()),
                    Just("properties".to_string()),
                    "[a-z]{1,6}",
                ],
                inner,
                0..5,
            )
            .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    /// PROPERTY: validation never panics on arbitrary documents.
    #[test]
    fn property_validation_never_panics(doc in arbitrary_json()) {
        let _ = validate_config(&doc);
        let _ = validate_status(&doc);
    }

    /// PROPERTY: a repeated (id, service) pair is always rejected, and
    /// all other well-formed configs are accepted.
    #[test]
    fn property_duplicates_are_rejected(
        ids in proptest::collection::vec("[a-c]", 1..6),
    ) {
        let resources: Vec<Value> = ids
            .iter()
            .map(|id| json!({ "id": id, "service": "jobs", "properties": {} }))
            .collect();
        let doc = json!({ "name": "dups", "resources": resources });

        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        let has_duplicates = unique.len() != ids.len();

        prop_assert_eq!(validate_config(&doc).is_err(), has_duplicates);
    }
}
