//! Property tests for status assembly and prior-status lookup.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use serde_json::json;

use stackctl::domain::entities::StatusIndex;
use stackctl::{PhysicalId, ResourceConfig, ResourceStatus, StackConfig, StackStatus};

fn config(ids: &[String]) -> StackConfig {
    StackConfig {
        name: "prop".to_string(),
        resources: ids
            .iter()
            .map(|id| ResourceConfig::new(id.clone(), "jobs", json!({ "name": id })))
            .collect(),
    }
}

fn statuses(config: &StackConfig, first_job: i64) -> Vec<ResourceStatus> {
    config
        .resources
        .iter()
        .enumerate()
        .map(|(i, resource)| {
            ResourceStatus::succeeded(
                resource,
                PhysicalId::job(first_job + i as i64),
                json!({}),
                DateTime::<Utc>::UNIX_EPOCH,
            )
        })
        .collect()
}

fn unique_ids(max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set("[a-z]{1,6}", 0..=max)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    /// PROPERTY: current entries come first, in config order, and every
    /// prior entry that is no longer configured is retained after them.
    #[test]
    fn property_assemble_keeps_order_and_stale_entries(
        prior_ids in unique_ids(8),
        current_ids in unique_ids(8),
    ) {
        let prior_config = config(&prior_ids);
        let prior = StackStatus::assemble(&prior_config, statuses(&prior_config, 1), None, "test");

        let current_config = config(&current_ids);
        let assembled = StackStatus::assemble(
            &current_config,
            statuses(&current_config, 100),
            Some(&prior),
            "test",
        );

        let order: Vec<&str> = assembled.deployed.iter().map(|d| d.id.as_str()).collect();
        let expected: Vec<&str> = current_ids
            .iter()
            .map(String::as_str)
            .chain(
                prior_ids
                    .iter()
                    .map(String::as_str)
                    .filter(|id| !current_ids.iter().any(|c| c == id)),
            )
            .collect();
        prop_assert_eq!(order, expected);
        prop_assert!(assembled.validate().is_ok());
    }

    /// PROPERTY: every recorded entry is found again by its key.
    #[test]
    fn property_index_finds_every_entry(ids in unique_ids(10)) {
        let config = config(&ids);
        let status = StackStatus::assemble(&config, statuses(&config, 1), None, "test");
        let index = StatusIndex::build(Some(&status));

        prop_assert_eq!(index.len(), ids.len());
        for (i, resource) in config.resources.iter().enumerate() {
            let found = index.physical_id(&resource.key()).and_then(PhysicalId::job_id);
            prop_assert_eq!(found, Some(1 + i as i64));
        }
    }
}
