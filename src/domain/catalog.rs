use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// A purchasable item as listed by the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub price: BigDecimal,
    #[serde(rename = "avatar")]
    pub image_ref: String,
}

/// A shop from the remote shop list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    #[serde(rename = "avatar")]
    pub image_ref: String,
    #[serde(rename = "acceptingOrders", default)]
    pub accepting_orders: bool,
}

/// Case-insensitive substring match on the item name. An empty query keeps
/// everything; whitespace is matched as typed.
pub fn search<'a>(items: &'a [CatalogItem], query: &str) -> Vec<&'a CatalogItem> {
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
        .collect()
}
