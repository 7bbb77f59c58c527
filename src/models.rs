use serde::{Deserialize, Serialize};

/// A catalog record, persisted as one element of the backing JSON array.
///
/// `id` is assigned by the store at creation time; `category` and `price`
/// are optional and omitted from the wire form when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Create payload. `name` stays optional at the type level so a missing
/// field becomes a 400 with the catalog's error body instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Aggregate view over the whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    #[serde(rename = "averagePrice")]
    pub average_price: f64,
}

/// One page of query results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<Item>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    #[serde(rename = "totalPages")]
    pub total_pages: usize,
}

/// Raw query string of `GET /api/items`. `page` and `limit` arrive as
/// strings so malformed values can be coerced instead of rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListItemsQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}
