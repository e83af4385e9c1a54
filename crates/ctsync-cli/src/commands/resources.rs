//! Resources command implementation

use std::collections::BTreeMap;
use std::path::Path;

use colored::Colorize;
use ctsync_core::CustomTypeCollection;
use ctsync_meta::SyncConfig;

use crate::error::Result;

/// Run the resources command
pub fn run_resources(config_path: &Path, json: bool) -> Result<i32> {
    let collection = SyncConfig::load(config_path)?.collection()?;

    if json {
        let map: BTreeMap<&str, &[String]> = collection.iter().collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        print!("{}", render_collection(&collection));
    }

    Ok(0)
}

fn render_collection(collection: &CustomTypeCollection) -> String {
    if collection.is_empty() {
        return "No resources have custom types.\n".to_string();
    }

    let mut out = String::new();
    for (resource_type_id, keys) in collection.iter() {
        out.push_str(&format!("{}: {}\n", resource_type_id.bold(), keys.join(", ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_groups_by_resource() {
        colored::control::set_override(false);
        let mut collection = CustomTypeCollection::new();
        collection.add("order", "order-note").add("order", "order-flags");
        collection.add("customer", "customer-flags");

        assert_eq!(
            render_collection(&collection),
            "customer: customer-flags\norder: order-note, order-flags\n"
        );
    }
}
