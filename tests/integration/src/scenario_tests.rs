//! Scenario Tests
//!
//! Each module walks one project through the runs an operator would perform.

use ctsync_core::{
    ChangeAction, Error, KeyFilter, Operation, Outcome, PlannedChange, Reconciler, RemoteError,
    StoreError,
};
use ctsync_meta::{ConfigFormat, SyncConfig};
use ctsync_test_utils::fixtures::{SAMPLE_CONFIG_YAML, persisted_type};
use ctsync_test_utils::store::{MemoryStore, Request};
use pretty_assertions::assert_eq;

fn sample() -> SyncConfig {
    SyncConfig::parse(SAMPLE_CONFIG_YAML, ConfigFormat::Yaml).unwrap()
}

fn field_names(store: &MemoryStore, key: &str) -> Vec<String> {
    store
        .get(key)
        .unwrap()
        .field_definitions
        .iter()
        .map(|f| f.name.clone())
        .collect()
}

mod s1_evolving_config {
    use super::*;
    use pretty_assertions::assert_eq;

    const EVOLVED: &str = r#"
types:
  order-note:
    name: { en: Order note, de: Bestellnotiz }
    description: { en: Notes the customer left at checkout }
    resourceTypeIds: [order]
    fieldDefinitions:
      priority:
        type: { name: Enum, values: { low: Low, high: High } }
        required: true
        label: { en: Priority }
      comment:
        type: { name: String }
        inputHint: MultiLine
        label: { en: Customer comment, de: Kommentar }
  customer-flags:
    name: { en: Customer flags }
    description: { en: Flags on customers }
    resourceTypeIds: [customer, order]
    fieldDefinitions:
      vip:
        type: { name: Boolean }
        label: { en: VIP }
      tags:
        type: { name: Set, elementType: { name: String } }
        label: { en: Tags }
"#;

    #[tokio::test]
    async fn s1_1_edits_become_update_batches() {
        let store = MemoryStore::new();
        Reconciler::new(&store, sample().desired_types().unwrap())
            .run()
            .await
            .unwrap();

        let evolved = SyncConfig::parse(EVOLVED, ConfigFormat::Yaml).unwrap();
        let reconciler = Reconciler::new(&store, evolved.desired_types().unwrap());
        let plan = reconciler.plan().await.unwrap();

        let Some(PlannedChange::Update { actions, .. }) = plan.change("order-note") else {
            panic!("expected an update for order-note, got {:?}", plan);
        };
        assert!(actions.iter().any(|a| matches!(
            a,
            ChangeAction::ChangeFieldLabel { field_name, .. } if field_name == "comment"
        )));
        assert!(actions.contains(&ChangeAction::ChangeFieldOrder {
            field_names: vec!["priority".into(), "comment".into()],
        }));
        assert!(actions.iter().any(|a| matches!(a, ChangeAction::SetDescription { .. })));

        let report = reconciler.execute(&plan).await.unwrap();

        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.get("order-note").unwrap().operation, Operation::Updated);
        assert_eq!(field_names(&store, "order-note"), vec!["priority", "comment"]);
        assert_eq!(field_names(&store, "customer-flags"), vec!["vip", "tags"]);
        assert!(reconciler.plan().await.unwrap().is_noop());
    }

    #[tokio::test]
    async fn s1_2_versions_advance_once_per_batch() {
        let store = MemoryStore::new();
        Reconciler::new(&store, sample().desired_types().unwrap())
            .run()
            .await
            .unwrap();

        let evolved = SyncConfig::parse(EVOLVED, ConfigFormat::Yaml).unwrap();
        Reconciler::new(&store, evolved.desired_types().unwrap())
            .run()
            .await
            .unwrap();

        assert_eq!(store.get("order-note").unwrap().version, 2);
        assert_eq!(store.get("customer-flags").unwrap().version, 2);
    }
}

mod s2_whitelist {
    use super::*;
    use pretty_assertions::assert_eq;

    fn legacy_project() -> MemoryStore {
        MemoryStore::with_types(vec![
            persisted_type("order-legacy", &[], 2),
            persisted_type("customer-legacy", &[], 6),
            persisted_type("order-note", &["comment", "priority"], 1),
        ])
    }

    #[tokio::test]
    async fn s2_1_config_whitelist_protects_other_teams_types() {
        let store = legacy_project();
        let config = sample();
        let filter = KeyFilter::literals(config.whitelist.iter().map(String::as_str));

        let report = Reconciler::new(&store, config.desired_types().unwrap())
            .with_filter(filter)
            .run()
            .await
            .unwrap();

        assert_eq!(report.get("order-legacy").unwrap().operation, Operation::Deleted);
        assert_eq!(
            report.get("customer-legacy").unwrap().operation,
            Operation::Untouched
        );
        assert!(store.get("customer-legacy").is_some());
        assert!(store.get("order-legacy").is_none());
    }

    #[tokio::test]
    async fn s2_2_open_whitelist_deletes_every_undesired_type() {
        let store = legacy_project();

        Reconciler::new(&store, sample().desired_types().unwrap())
            .run()
            .await
            .unwrap();

        assert_eq!(store.keys(), vec!["order-note", "customer-flags"]);
    }

    #[tokio::test]
    async fn s2_3_regex_whitelist() {
        let store = legacy_project();

        Reconciler::new(&store, sample().desired_types().unwrap())
            .with_filter(KeyFilter::pattern("^customer-").unwrap())
            .run()
            .await
            .unwrap();

        assert!(store.get("order-legacy").is_some());
        assert!(store.get("customer-legacy").is_none());
    }
}

mod s3_failures {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn s3_1_rejected_type_does_not_stop_the_run() {
        let store = MemoryStore::new().fail_key(
            "order-note",
            StoreError::Remote(RemoteError::new("Invalid field definition", "corr-7")),
        );

        let report = Reconciler::new(&store, sample().desired_types().unwrap())
            .run()
            .await
            .unwrap();

        assert_eq!(report.exit_code(), 1);
        assert_eq!(
            report.get("order-note").unwrap().outcome,
            Outcome::RemoteError("Invalid field definition (corr-7)".into())
        );
        assert_eq!(report.get("customer-flags").unwrap().outcome, Outcome::Success);
        assert_eq!(store.keys(), vec!["customer-flags"]);
    }

    #[tokio::test]
    async fn s3_2_outage_aborts_before_later_types() {
        let store = MemoryStore::new()
            .fail_key("order-note", StoreError::transport("connection reset"));

        let err = Reconciler::new(&store, sample().desired_types().unwrap())
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport { ref key, .. } if key == "order-note"));
        assert!(!store
            .writes()
            .iter()
            .any(|r| r.key() == Some("customer-flags")));
    }

    #[test]
    fn s3_3_invalid_config_fails_before_any_request() {
        let config = SyncConfig::parse(
            "types:\n  t:\n    name: {}\n    description: { en: T }\n    resourceTypeIds: [order]\n",
            ConfigFormat::Yaml,
        )
        .unwrap();

        assert!(config.desired_types().is_err());
    }

    #[tokio::test]
    async fn s3_4_rerun_after_failure_converges() {
        let store = MemoryStore::new().fail_key(
            "order-note",
            StoreError::unexpected("HTTP 503"),
        );
        let first = Reconciler::new(&store, sample().desired_types().unwrap())
            .run()
            .await
            .unwrap();
        assert_eq!(first.get("order-note").unwrap().outcome, Outcome::Unknown);

        // Once the platform recovers the next run creates the missing type
        let recovered = MemoryStore::with_types(store.get("customer-flags").into_iter().collect());
        let second = Reconciler::new(&recovered, sample().desired_types().unwrap())
            .run()
            .await
            .unwrap();

        assert_eq!(second.exit_code(), 0);
        assert_eq!(second.get("order-note").unwrap().operation, Operation::Created);
        assert_eq!(
            second.get("customer-flags").unwrap().operation,
            Operation::Unchanged
        );
        assert_eq!(
            recovered.writes(),
            vec![
                Request::Create {
                    key: "order-note".into()
                },
                Request::Update {
                    key: "customer-flags".into(),
                    version: 1,
                    actions: vec![]
                },
            ]
        );
    }
}
