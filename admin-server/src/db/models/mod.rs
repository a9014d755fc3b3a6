//! Database record models
//!
//! Records as stored in the three collections: `products`, `heroes`,
//! `orders`. Ids are repository-assigned and serialized as "table:id"
//! strings. Timestamps are Unix millis.

pub mod hero;
pub mod order;
pub mod product;
pub mod serde_helpers;

pub use hero::{Hero, HeroCreate};
pub use order::{Order, OrderClient, OrderItem, OrderRaw, OrderView};
pub use product::{Product, ProductCreate};

/// Current time as Unix millis, the storage format for `created_at`
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
