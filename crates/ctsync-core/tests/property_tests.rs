//! Property tests for the comparator and synthesizer

use ctsync_core::diff::{self, FieldDiff};
use ctsync_core::{synthesize, ActionKind, ChangeAction, FieldDefinitions, LocalizedString};
use ctsync_test_utils::fixtures::{desired_type, persisted_from, string_field};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn field_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[a-z]{1,8}", 0..8).prop_map(|set| set.into_iter().collect())
}

fn label_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[a-z]{2}", "[A-Za-z ]{0,12}", 1..5)
        .prop_map(|map| map.into_iter().collect())
}

fn refs(names: &[String]) -> Vec<&str> {
    names.iter().map(String::as_str).collect()
}

proptest! {
    #[test]
    fn prop_identical_lists_have_no_diff(names in field_names()) {
        let desired = desired_type("t", &refs(&names));
        let persisted = persisted_from(&desired, 1);

        prop_assert!(FieldDiff::compare(&desired.field_definitions, &persisted.field_definitions).is_empty());
        prop_assert!(synthesize(&desired, &persisted).is_empty());
    }

    #[test]
    fn prop_one_add_or_remove_per_affected_field(
        desired_names in field_names(),
        persisted_names in field_names(),
    ) {
        let desired = desired_type("t", &refs(&desired_names));
        let persisted = persisted_from(&desired_type("t", &refs(&persisted_names)), 1);
        let actions = synthesize(&desired, &persisted);

        let added: BTreeSet<&str> = actions.iter().filter_map(|a| match a {
            ChangeAction::AddField { field_definition } => Some(field_definition.name.as_str()),
            _ => None,
        }).collect();
        let removed: BTreeSet<&str> = actions.iter().filter_map(|a| match a {
            ChangeAction::RemoveField { field_name } => Some(field_name.as_str()),
            _ => None,
        }).collect();

        let desired_set: BTreeSet<&str> = desired_names.iter().map(String::as_str).collect();
        let persisted_set: BTreeSet<&str> = persisted_names.iter().map(String::as_str).collect();
        let expected_added: BTreeSet<&str> = desired_set.difference(&persisted_set).copied().collect();
        let expected_removed: BTreeSet<&str> = persisted_set.difference(&desired_set).copied().collect();
        prop_assert_eq!(&added, &expected_added);
        prop_assert_eq!(&removed, &expected_removed);

        let adds = actions.iter().filter(|a| a.kind() == ActionKind::AddField).count();
        let removes = actions.iter().filter(|a| a.kind() == ActionKind::RemoveField).count();
        prop_assert_eq!(adds, added.len());
        prop_assert_eq!(removes, removed.len());
    }

    #[test]
    fn prop_single_desired_field_never_reorders(
        name in "[a-z]{1,8}",
        persisted_names in field_names(),
    ) {
        let desired = vec![string_field(&name)];
        let persisted = FieldDefinitions::new(persisted_names.iter().map(|n| string_field(n)).collect());

        prop_assert!(!diff::has_changed_order(&desired, &persisted));
    }

    #[test]
    fn prop_label_verdict_ignores_language_order(
        pairs in label_pairs(),
        other in label_pairs(),
    ) {
        let reversed: Vec<(String, String)> = pairs.iter().rev().cloned().collect();
        let a = LocalizedString::from_pairs(pairs.iter().cloned());
        let a_reversed = LocalizedString::from_pairs(reversed);
        let b = LocalizedString::from_pairs(other.iter().cloned());

        prop_assert!(!diff::localized_changed(&a, &a_reversed));
        prop_assert_eq!(diff::localized_changed(&a, &b), diff::localized_changed(&a_reversed, &b));
    }

    #[test]
    fn prop_rule_kinds_never_go_backwards(
        desired_names in field_names(),
        persisted_names in field_names(),
    ) {
        let desired = desired_type("t", &refs(&desired_names));
        let persisted = persisted_from(&desired_type("u", &refs(&persisted_names)), 1);
        let actions = synthesize(&desired, &persisted);

        let rank = |kind: ActionKind| [
            ActionKind::ChangeFieldLabel,
            ActionKind::AddField,
            ActionKind::RemoveField,
            ActionKind::ChangeFieldOrder,
            ActionKind::SetDescription,
            ActionKind::ChangeName,
        ].iter().position(|k| *k == kind).unwrap_or(usize::MAX);
        let ranks: Vec<usize> = actions.iter().map(|a| rank(a.kind())).collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "kinds out of order: {:?}", actions);
    }
}
