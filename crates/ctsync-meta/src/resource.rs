//! Customizable resource categories

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A platform resource a custom type can attach fields to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceTypeId {
    Asset,
    Category,
    Channel,
    Customer,
    Order,
    LineItem,
    CustomLineItem,
    ProductPrice,
    Payment,
    PaymentInterfaceInteraction,
    ShoppingList,
    ShoppingListTextLineItem,
    Review,
}

impl ResourceTypeId {
    pub const ALL: [ResourceTypeId; 13] = [
        ResourceTypeId::Asset,
        ResourceTypeId::Category,
        ResourceTypeId::Channel,
        ResourceTypeId::Customer,
        ResourceTypeId::Order,
        ResourceTypeId::LineItem,
        ResourceTypeId::CustomLineItem,
        ResourceTypeId::ProductPrice,
        ResourceTypeId::Payment,
        ResourceTypeId::PaymentInterfaceInteraction,
        ResourceTypeId::ShoppingList,
        ResourceTypeId::ShoppingListTextLineItem,
        ResourceTypeId::Review,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceTypeId::Asset => "asset",
            ResourceTypeId::Category => "category",
            ResourceTypeId::Channel => "channel",
            ResourceTypeId::Customer => "customer",
            ResourceTypeId::Order => "order",
            ResourceTypeId::LineItem => "line-item",
            ResourceTypeId::CustomLineItem => "custom-line-item",
            ResourceTypeId::ProductPrice => "product-price",
            ResourceTypeId::Payment => "payment",
            ResourceTypeId::PaymentInterfaceInteraction => "payment-interface-interaction",
            ResourceTypeId::ShoppingList => "shopping-list",
            ResourceTypeId::ShoppingListTextLineItem => "shopping-list-text-line-item",
            ResourceTypeId::Review => "review",
        }
    }

    /// Whether `id` names a known resource, ignoring case
    pub fn is_known(id: &str) -> bool {
        id.parse::<ResourceTypeId>().is_ok()
    }
}

impl fmt::Display for ResourceTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceTypeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == lowered)
            .ok_or_else(|| format!("unknown resource type id `{}`", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_str() {
        for id in ResourceTypeId::ALL {
            assert_eq!(id.as_str().parse::<ResourceTypeId>().unwrap(), id);
        }
    }

    #[test]
    fn test_parse_ignores_case() {
        assert_eq!("Line-Item".parse::<ResourceTypeId>().unwrap(), ResourceTypeId::LineItem);
        assert!(!ResourceTypeId::is_known("product"));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&ResourceTypeId::PaymentInterfaceInteraction).unwrap();
        assert_eq!(json, "\"payment-interface-interaction\"");
    }
}
