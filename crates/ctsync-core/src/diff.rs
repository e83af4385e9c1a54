//! Field definition comparator
//!
//! Each predicate is computed independently from a desired field list and a
//! persisted field collection. Fields are matched by name.

use serde::Serialize;

use crate::model::{FieldDefinition, FieldDefinitions, LocalizedString};

/// Summary of the differences between two field lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldDiff {
    /// Matched fields whose label differs, in desired order
    pub changed_labels: Vec<String>,
    /// Desired fields absent from the persisted collection
    pub new_fields: Vec<String>,
    /// Persisted fields absent from the desired list
    pub removed_fields: Vec<String>,
    /// Whether a matched field sits at a different position
    pub order_changed: bool,
}

impl FieldDiff {
    /// Compare a desired field list against the persisted collection
    pub fn compare(desired: &[FieldDefinition], persisted: &FieldDefinitions) -> Self {
        Self {
            changed_labels: names(changed_labels(desired, persisted)),
            new_fields: names(new_fields(desired, persisted)),
            removed_fields: names(removed_fields(desired, persisted)),
            order_changed: has_changed_order(desired, persisted),
        }
    }

    /// True if no predicate fired
    pub fn is_empty(&self) -> bool {
        self.changed_labels.is_empty()
            && self.new_fields.is_empty()
            && self.removed_fields.is_empty()
            && !self.order_changed
    }
}

fn names(fields: Vec<&FieldDefinition>) -> Vec<String> {
    fields.into_iter().map(|f| f.name.clone()).collect()
}

/// True if two localized strings differ in any `(language, text)` pair
pub fn localized_changed(new: &LocalizedString, old: &LocalizedString) -> bool {
    new != old
}

/// Desired fields present in persisted whose label differs
pub fn changed_labels<'a>(
    desired: &'a [FieldDefinition],
    persisted: &FieldDefinitions,
) -> Vec<&'a FieldDefinition> {
    desired
        .iter()
        .filter(|field| {
            persisted
                .get_by_name(&field.name)
                .is_some_and(|saved| localized_changed(&field.label, &saved.label))
        })
        .collect()
}

pub fn has_changed_label(desired: &[FieldDefinition], persisted: &FieldDefinitions) -> bool {
    desired.iter().any(|field| {
        persisted
            .get_by_name(&field.name)
            .is_some_and(|saved| localized_changed(&field.label, &saved.label))
    })
}

/// Desired fields absent from persisted
pub fn new_fields<'a>(
    desired: &'a [FieldDefinition],
    persisted: &FieldDefinitions,
) -> Vec<&'a FieldDefinition> {
    desired
        .iter()
        .filter(|field| !persisted.contains(&field.name))
        .collect()
}

pub fn has_new_field(desired: &[FieldDefinition], persisted: &FieldDefinitions) -> bool {
    desired.iter().any(|field| !persisted.contains(&field.name))
}

/// Persisted fields absent from desired, in persisted order
pub fn removed_fields<'a>(
    desired: &[FieldDefinition],
    persisted: &'a FieldDefinitions,
) -> Vec<&'a FieldDefinition> {
    persisted
        .iter()
        .filter(|saved| !desired.iter().any(|field| field.name == saved.name))
        .collect()
}

pub fn has_removed_field(desired: &[FieldDefinition], persisted: &FieldDefinitions) -> bool {
    persisted
        .iter()
        .any(|saved| !desired.iter().any(|field| field.name == saved.name))
}

/// True if a desired field found in persisted is not at the same index there
///
/// Only meaningful for more than one desired field. Desired fields that are
/// not persisted yet are skipped, so pending additions alone never count as
/// a reorder.
pub fn has_changed_order(desired: &[FieldDefinition], persisted: &FieldDefinitions) -> bool {
    if desired.len() <= 1 {
        return false;
    }

    desired.iter().enumerate().any(|(index, field)| {
        if !persisted.contains(&field.name) {
            return false;
        }
        match persisted.get_at(index) {
            Some(at_index) => at_index.name != field.name,
            None => true,
        }
    })
}
