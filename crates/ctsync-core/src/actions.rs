//! Change-action synthesis
//!
//! A static, ordered table of rules turns the differences between a desired
//! and a persisted type into update actions. The table order is the
//! precedence the remote store sees within one atomic batch: content fixes
//! (labels), then structure (add, remove, reorder), then metadata
//! (description, name).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diff;
use crate::model::{DesiredType, FieldDefinition, LocalizedString, PersistedType};

/// One update operation, in the remote API's update-action wire format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ChangeAction {
    #[serde(rename = "changeLabel", rename_all = "camelCase")]
    ChangeFieldLabel {
        field_name: String,
        label: LocalizedString,
    },

    #[serde(rename = "addFieldDefinition", rename_all = "camelCase")]
    AddField { field_definition: FieldDefinition },

    #[serde(rename = "removeFieldDefinition", rename_all = "camelCase")]
    RemoveField { field_name: String },

    #[serde(rename = "changeFieldDefinitionOrder", rename_all = "camelCase")]
    ChangeFieldOrder { field_names: Vec<String> },

    #[serde(rename = "setDescription")]
    SetDescription { description: LocalizedString },

    #[serde(rename = "changeName")]
    ChangeName { name: LocalizedString },
}

impl ChangeAction {
    /// The kind of this action, without its payload
    pub fn kind(&self) -> ActionKind {
        match self {
            ChangeAction::ChangeFieldLabel { .. } => ActionKind::ChangeFieldLabel,
            ChangeAction::AddField { .. } => ActionKind::AddField,
            ChangeAction::RemoveField { .. } => ActionKind::RemoveField,
            ChangeAction::ChangeFieldOrder { .. } => ActionKind::ChangeFieldOrder,
            ChangeAction::SetDescription { .. } => ActionKind::SetDescription,
            ChangeAction::ChangeName { .. } => ActionKind::ChangeName,
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeAction::ChangeFieldLabel { field_name, label } => {
                write!(f, "change label of field `{}` to {}", field_name, label)
            }
            ChangeAction::AddField { field_definition } => write!(
                f,
                "add field `{}` ({})",
                field_definition.name,
                field_definition.field_type.name()
            ),
            ChangeAction::RemoveField { field_name } => {
                write!(f, "remove field `{}`", field_name)
            }
            ChangeAction::ChangeFieldOrder { field_names } => {
                write!(f, "reorder fields to [{}]", field_names.join(", "))
            }
            ChangeAction::SetDescription { description } => {
                write!(f, "set description to {}", description)
            }
            ChangeAction::ChangeName { name } => write!(f, "change name to {}", name),
        }
    }
}

/// Payload-free discriminant of [`ChangeAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    ChangeFieldLabel,
    AddField,
    RemoveField,
    ChangeFieldOrder,
    SetDescription,
    ChangeName,
}

/// A change-detection predicate paired with the builder for its actions
pub struct Rule {
    /// The kind of action this rule emits
    pub kind: ActionKind,
    detect: fn(&DesiredType, &PersistedType) -> bool,
    build: fn(&DesiredType, &PersistedType) -> Vec<ChangeAction>,
}

impl Rule {
    /// Run the predicate and, if it fires, the builder
    pub fn apply(&self, desired: &DesiredType, persisted: &PersistedType) -> Vec<ChangeAction> {
        if (self.detect)(desired, persisted) {
            (self.build)(desired, persisted)
        } else {
            Vec::new()
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("kind", &self.kind).finish()
    }
}

/// The rule table, in evaluation order
pub static RULES: [Rule; 6] = [
    Rule {
        kind: ActionKind::ChangeFieldLabel,
        detect: detect_label_change,
        build: build_label_changes,
    },
    Rule {
        kind: ActionKind::AddField,
        detect: detect_new_field,
        build: build_add_fields,
    },
    Rule {
        kind: ActionKind::RemoveField,
        detect: detect_removed_field,
        build: build_remove_fields,
    },
    // Computed from the same snapshot as the add/remove rules above, not from
    // the membership those actions produce.
    Rule {
        kind: ActionKind::ChangeFieldOrder,
        detect: detect_order_change,
        build: build_order_change,
    },
    Rule {
        kind: ActionKind::SetDescription,
        detect: detect_description_change,
        build: build_description_change,
    },
    Rule {
        kind: ActionKind::ChangeName,
        detect: detect_name_change,
        build: build_name_change,
    },
];

/// Build the ordered action batch that moves `persisted` to `desired`
///
/// An empty batch means the persisted type already matches.
pub fn synthesize(desired: &DesiredType, persisted: &PersistedType) -> Vec<ChangeAction> {
    let mut actions = Vec::new();

    for rule in RULES.iter() {
        let built = rule.apply(desired, persisted);
        if !built.is_empty() {
            tracing::debug!(
                key = %desired.key,
                rule = ?rule.kind,
                count = built.len(),
                "Rule fired"
            );
        }
        actions.extend(built);
    }

    actions
}

fn detect_label_change(desired: &DesiredType, persisted: &PersistedType) -> bool {
    diff::has_changed_label(&desired.field_definitions, &persisted.field_definitions)
}

fn build_label_changes(desired: &DesiredType, persisted: &PersistedType) -> Vec<ChangeAction> {
    diff::changed_labels(&desired.field_definitions, &persisted.field_definitions)
        .into_iter()
        .map(|field| ChangeAction::ChangeFieldLabel {
            field_name: field.name.clone(),
            label: field.label.clone(),
        })
        .collect()
}

fn detect_new_field(desired: &DesiredType, persisted: &PersistedType) -> bool {
    diff::has_new_field(&desired.field_definitions, &persisted.field_definitions)
}

fn build_add_fields(desired: &DesiredType, persisted: &PersistedType) -> Vec<ChangeAction> {
    diff::new_fields(&desired.field_definitions, &persisted.field_definitions)
        .into_iter()
        .map(|field| ChangeAction::AddField {
            field_definition: field.clone(),
        })
        .collect()
}

fn detect_removed_field(desired: &DesiredType, persisted: &PersistedType) -> bool {
    diff::has_removed_field(&desired.field_definitions, &persisted.field_definitions)
}

fn build_remove_fields(desired: &DesiredType, persisted: &PersistedType) -> Vec<ChangeAction> {
    diff::removed_fields(&desired.field_definitions, &persisted.field_definitions)
        .into_iter()
        .map(|field| ChangeAction::RemoveField {
            field_name: field.name.clone(),
        })
        .collect()
}

fn detect_order_change(desired: &DesiredType, persisted: &PersistedType) -> bool {
    diff::has_changed_order(&desired.field_definitions, &persisted.field_definitions)
}

fn build_order_change(desired: &DesiredType, _persisted: &PersistedType) -> Vec<ChangeAction> {
    vec![ChangeAction::ChangeFieldOrder {
        field_names: desired
            .field_definitions
            .iter()
            .map(|f| f.name.clone())
            .collect(),
    }]
}

fn detect_description_change(desired: &DesiredType, persisted: &PersistedType) -> bool {
    diff::localized_changed(&desired.description, &persisted.description)
}

fn build_description_change(desired: &DesiredType, _persisted: &PersistedType) -> Vec<ChangeAction> {
    vec![ChangeAction::SetDescription {
        description: desired.description.clone(),
    }]
}

fn detect_name_change(desired: &DesiredType, persisted: &PersistedType) -> bool {
    diff::localized_changed(&desired.name, &persisted.name)
}

fn build_name_change(desired: &DesiredType, _persisted: &PersistedType) -> Vec<ChangeAction> {
    vec![ChangeAction::ChangeName {
        name: desired.name.clone(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldDefinitions, FieldType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn en(text: &str) -> LocalizedString {
        LocalizedString::from_pairs([("en", text)])
    }

    fn field(name: &str) -> FieldDefinition {
        FieldDefinition::new(name, FieldType::String).with_label(en(name))
    }

    fn desired(fields: &[&str]) -> DesiredType {
        DesiredType {
            key: "order-note".into(),
            name: en("Order note"),
            description: en("Notes on orders"),
            resource_type_ids: vec!["order".into()],
            field_definitions: fields.iter().map(|n| field(n)).collect(),
        }
    }

    fn persisted_from(desired: &DesiredType) -> PersistedType {
        PersistedType {
            id: "id-1".into(),
            version: 3,
            key: desired.key.clone(),
            name: desired.name.clone(),
            description: desired.description.clone(),
            resource_type_ids: desired.resource_type_ids.clone(),
            field_definitions: FieldDefinitions::new(desired.field_definitions.clone()),
        }
    }

    #[test]
    fn test_matching_types_produce_empty_batch() {
        let desired = desired(&["a", "b"]);
        let persisted = persisted_from(&desired);
        assert!(synthesize(&desired, &persisted).is_empty());
    }

    #[test]
    fn test_rule_table_order_is_fixed() {
        let kinds: Vec<ActionKind> = RULES.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ActionKind::ChangeFieldLabel,
                ActionKind::AddField,
                ActionKind::RemoveField,
                ActionKind::ChangeFieldOrder,
                ActionKind::SetDescription,
                ActionKind::ChangeName,
            ]
        );
    }

    #[test]
    fn test_order_change_carries_full_desired_order() {
        let desired = desired(&["b", "a"]);
        let persisted = persisted_from(&self::desired(&["a", "b"]));

        assert_eq!(
            synthesize(&desired, &persisted),
            vec![ChangeAction::ChangeFieldOrder {
                field_names: vec!["b".into(), "a".into()],
            }]
        );
    }

    #[test]
    fn test_name_and_description_emit_single_actions() {
        let desired = desired(&["a"]);
        let mut persisted = persisted_from(&desired);
        persisted.name = en("Old name");
        persisted.description = en("Old description");

        assert_eq!(
            synthesize(&desired, &persisted),
            vec![
                ChangeAction::SetDescription {
                    description: en("Notes on orders"),
                },
                ChangeAction::ChangeName {
                    name: en("Order note"),
                },
            ]
        );
    }

    #[test]
    fn test_actions_serialize_to_wire_format() {
        let actions = vec![
            ChangeAction::ChangeFieldLabel {
                field_name: "comment".into(),
                label: en("Comment"),
            },
            ChangeAction::RemoveField {
                field_name: "legacy".into(),
            },
            ChangeAction::ChangeFieldOrder {
                field_names: vec!["a".into(), "b".into()],
            },
            ChangeAction::SetDescription {
                description: en("Notes"),
            },
            ChangeAction::ChangeName { name: en("Note") },
        ];

        assert_eq!(
            serde_json::to_value(&actions).unwrap(),
            json!([
                {"action": "changeLabel", "fieldName": "comment", "label": {"en": "Comment"}},
                {"action": "removeFieldDefinition", "fieldName": "legacy"},
                {"action": "changeFieldDefinitionOrder", "fieldNames": ["a", "b"]},
                {"action": "setDescription", "description": {"en": "Notes"}},
                {"action": "changeName", "name": {"en": "Note"}}
            ])
        );
    }

    #[test]
    fn test_add_field_serializes_full_definition() {
        let action = ChangeAction::AddField {
            field_definition: field("comment"),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["action"], "addFieldDefinition");
        assert_eq!(value["fieldDefinition"]["name"], "comment");
        assert_eq!(value["fieldDefinition"]["type"]["name"], "String");
    }

    #[test]
    fn test_display_is_human_readable() {
        let action = ChangeAction::AddField {
            field_definition: field("comment"),
        };
        assert_eq!(action.to_string(), "add field `comment` (String)");
        assert_eq!(
            ChangeAction::RemoveField {
                field_name: "legacy".into()
            }
            .to_string(),
            "remove field `legacy`"
        );
    }
}
