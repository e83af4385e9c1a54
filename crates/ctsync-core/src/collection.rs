//! Custom types grouped by resource category
//!
//! Maps a resource type id (`order`, `customer`, ...) to the keys of the
//! types that attach fields to it.

use std::collections::BTreeMap;

use crate::model::DesiredType;

/// Resource type id to an ordered, duplicate-free list of type keys
///
/// Resource type ids are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomTypeCollection {
    resources: BTreeMap<String, Vec<String>>,
}

impl CustomTypeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the collection from every resource type id of every type
    pub fn from_types<'a>(types: impl IntoIterator<Item = &'a DesiredType>) -> Self {
        let mut collection = Self::new();
        for custom_type in types {
            for resource_type_id in &custom_type.resource_type_ids {
                collection.add(resource_type_id, &custom_type.key);
            }
        }
        collection
    }

    /// Register `key` under `resource_type_id`
    pub fn add(&mut self, resource_type_id: &str, key: &str) -> &mut Self {
        let keys = self
            .resources
            .entry(resource_type_id.to_lowercase())
            .or_default();
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
        self
    }

    /// Keys registered under `resource_type_id`
    pub fn get(&self, resource_type_id: &str) -> Option<&[String]> {
        self.resources
            .get(&resource_type_id.to_lowercase())
            .map(Vec::as_slice)
    }

    /// The first key registered under `resource_type_id`
    pub fn find_one(&self, resource_type_id: &str) -> Option<&str> {
        self.get(resource_type_id)
            .and_then(|keys| keys.first())
            .map(String::as_str)
    }

    pub fn has(&self, resource_type_id: &str) -> bool {
        self.resources
            .contains_key(&resource_type_id.to_lowercase())
    }

    /// Drop `resource_type_id` and its keys
    pub fn remove(&mut self, resource_type_id: &str) -> Option<Vec<String>> {
        self.resources.remove(&resource_type_id.to_lowercase())
    }

    pub fn clear(&mut self) {
        self.resources.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterate `(resource_type_id, keys)` sorted by resource type id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.resources
            .iter()
            .map(|(id, keys)| (id.as_str(), keys.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LocalizedString;

    fn custom_type(key: &str, resources: &[&str]) -> DesiredType {
        DesiredType {
            key: key.into(),
            name: LocalizedString::from_pairs([("en", key)]),
            description: LocalizedString::from_pairs([("en", key)]),
            resource_type_ids: resources.iter().map(|r| r.to_string()).collect(),
            field_definitions: Vec::new(),
        }
    }

    #[test]
    fn test_add_keeps_insertion_order_without_duplicates() {
        let mut collection = CustomTypeCollection::new();
        collection
            .add("order", "order-note")
            .add("order", "order-flags")
            .add("order", "order-note");

        assert_eq!(
            collection.get("order"),
            Some(&["order-note".to_string(), "order-flags".to_string()][..])
        );
        assert_eq!(collection.find_one("order"), Some("order-note"));
    }

    #[test]
    fn test_resource_ids_are_case_insensitive() {
        let mut collection = CustomTypeCollection::new();
        collection.add("Order", "order-note");

        assert!(collection.has("order"));
        assert!(collection.has("ORDER"));
        assert_eq!(collection.remove("oRdEr"), Some(vec!["order-note".to_string()]));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_from_types_groups_by_resource() {
        let types = vec![
            custom_type("order-note", &["order", "line-item"]),
            custom_type("customer-flags", &["customer"]),
            custom_type("line-extra", &["line-item"]),
        ];
        let collection = CustomTypeCollection::from_types(&types);

        assert_eq!(collection.get("line-item").map(|k| k.len()), Some(2));
        assert_eq!(collection.find_one("customer"), Some("customer-flags"));
        assert!(collection.get("payment").is_none());

        let ids: Vec<&str> = collection.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["customer", "line-item", "order"]);
    }

    #[test]
    fn test_clear_empties_collection() {
        let mut collection = CustomTypeCollection::new();
        collection.add("order", "order-note");
        collection.clear();
        assert!(collection.is_empty());
        assert!(!collection.has("order"));
    }
}
