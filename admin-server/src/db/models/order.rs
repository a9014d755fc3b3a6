//! Order Model
//!
//! Orders are created exclusively by the external storefront; this system
//! reads and deletes them. The wire timestamp arrives in several shapes
//! (see [`shared::OrderTimestamp`]) and is normalized to Unix millis at the
//! repository boundary — [`OrderRaw`] is the wire shape, [`Order`] the
//! normalized one.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use shared::{order_total, OrderTimestamp};
use surrealdb::RecordId;

use super::serde_helpers;

/// Customer details attached to an order; nothing here is validated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderClient {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// One purchased line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    #[serde(default)]
    pub image_url: String,
    pub size: Option<String>,
}

/// Order as stored by the storefront (wire shape)
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRaw {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub client: OrderClient,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub timestamp: OrderTimestamp,
}

/// Order with its timestamp resolved to Unix millis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub client: OrderClient,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Unix millis
    pub placed_at: i64,
}

impl From<OrderRaw> for Order {
    fn from(raw: OrderRaw) -> Self {
        Self {
            id: raw.id,
            client: raw.client,
            items: raw.items,
            placed_at: raw.timestamp.to_millis(),
        }
    }
}

impl Order {
    pub fn id_string(&self) -> String {
        self.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
    }

    /// Σ quantity × unit price, computed at display time, never stored
    pub fn total(&self) -> f64 {
        order_total(self.items.iter().map(|i| (i.quantity, i.unit_price)))
            .to_f64()
            .unwrap_or(0.0)
    }
}

/// Order as served to the admin UI, with the derived total attached
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub total: f64,
}

impl From<Order> for OrderView {
    fn from(order: Order) -> Self {
        let total = order.total();
        Self { order, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_lines() {
        let order = Order {
            id: None,
            client: OrderClient::default(),
            items: vec![
                OrderItem {
                    name: "Shirt".into(),
                    quantity: 2,
                    unit_price: 9.99,
                    image_url: String::new(),
                    size: Some("M".into()),
                },
                OrderItem {
                    name: "Cap".into(),
                    quantity: 1,
                    unit_price: 5.00,
                    image_url: String::new(),
                    size: None,
                },
            ],
            placed_at: 0,
        };
        assert_eq!(order.total(), 24.98);
    }

    #[test]
    fn raw_order_normalizes_seconds_timestamp() {
        let json = r#"{
            "items": [],
            "timestamp": {"seconds": 1700000000, "nanoseconds": 0}
        }"#;
        let raw: OrderRaw = serde_json::from_str(json).unwrap();
        let order = Order::from(raw);
        assert_eq!(order.placed_at, 1_700_000_000_000);
    }

    #[test]
    fn missing_client_defaults_to_empty() {
        let raw: OrderRaw = serde_json::from_str(r#"{"items": [], "timestamp": 0}"#).unwrap();
        assert!(raw.client.name.is_none());
    }
}
