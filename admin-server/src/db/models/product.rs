//! Product Model

use serde::{Deserialize, Serialize};
use shared::{Category, Size};
use surrealdb::RecordId;

use super::serde_helpers;

/// Catalog product record
///
/// Never mutated in place: created once through the ingestion pipeline,
/// deleted individually or in bulk. `created_at` is the display sort key
/// (descending).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Regular price, > 0
    pub base_price: f64,
    /// Sale price, >= 0 (semantically <= base_price, not enforced)
    #[serde(default)]
    pub sale_price: f64,
    /// Units on hand, >= 0
    #[serde(default)]
    pub quantity: i64,
    pub category: Category,
    /// Non-empty on create
    #[serde(default)]
    pub sizes: Vec<Size>,
    /// Remote image URLs in staged order, non-empty on create
    #[serde(default)]
    pub images: Vec<String>,
    /// Unix millis, set once by the repository
    #[serde(default)]
    pub created_at: i64,
}

/// Create product payload (id and created_at assigned by the repository)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub base_price: f64,
    pub sale_price: f64,
    pub quantity: i64,
    pub category: Category,
    pub sizes: Vec<Size>,
    pub images: Vec<String>,
}

impl Product {
    /// String form of the record id, empty before persistence
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }

    /// Case-insensitive substring match over name and description
    pub fn matches_query(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
