//! End-to-end integration test for the vertical slice
//!
//! Exercises the complete flow: config document -> desired types -> reconciliation
//! against an in-memory project.

use ctsync_core::{KeyFilter, Operation, Outcome, Reconciler};
use ctsync_meta::SyncConfig;
use ctsync_test_utils::fixtures::{ConfigDir, SAMPLE_CONFIG_YAML, persisted_type};
use ctsync_test_utils::store::{MemoryStore, Request};
use pretty_assertions::assert_eq;

fn load_sample() -> SyncConfig {
    let dir = ConfigDir::new();
    SyncConfig::load(&dir.write("ctsync.yaml", SAMPLE_CONFIG_YAML)).unwrap()
}

#[tokio::test]
async fn test_config_to_project() {
    let config = load_sample();
    let filter = KeyFilter::literals(config.whitelist.iter().map(String::as_str));
    let store = MemoryStore::with_types(vec![
        persisted_type("order-legacy", &["note"], 4),
        persisted_type("payment-legacy", &[], 2),
    ]);

    let reconciler = Reconciler::new(store, config.desired_types().unwrap()).with_filter(filter);
    let report = reconciler.run().await.unwrap();

    assert_eq!(report.exit_code(), 0);
    let operations: Vec<(&str, Operation)> =
        report.iter().map(|(key, r)| (key, r.operation)).collect();
    assert_eq!(
        operations,
        vec![
            ("order-legacy", Operation::Deleted),
            ("payment-legacy", Operation::Untouched),
            ("order-note", Operation::Created),
            ("customer-flags", Operation::Created),
        ]
    );

    let store = reconciler.store();
    assert_eq!(
        store.keys(),
        vec!["payment-legacy", "order-note", "customer-flags"]
    );
    assert_eq!(
        store.writes(),
        vec![
            Request::Delete {
                key: "order-legacy".into(),
                version: 4
            },
            Request::Create {
                key: "order-note".into()
            },
            Request::Create {
                key: "customer-flags".into()
            },
        ]
    );
}

#[tokio::test]
async fn test_applied_config_plans_nothing() {
    let config = load_sample();
    let store = MemoryStore::new();
    let reconciler = Reconciler::new(&store, config.desired_types().unwrap());

    reconciler.run().await.unwrap();
    let plan = reconciler.plan().await.unwrap();

    assert!(plan.is_noop(), "got: {:?}", plan);
    let report = reconciler.execute(&plan).await.unwrap();
    assert!(report.iter().all(|(_, r)| r.operation == Operation::Unchanged
        && r.outcome == Outcome::Success));
    // Empty batches are still issued, and leave versions alone
    assert_eq!(store.get("order-note").unwrap().version, 1);
}
