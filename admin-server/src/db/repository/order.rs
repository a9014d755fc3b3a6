//! Order Repository
//!
//! Read/delete only — orders are written by the external storefront.
//! Timestamp normalization happens here, never in display code.

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoResult, record_id_for};
use crate::db::live::{CollectionFeed, ResourceVersions};
use crate::db::models::{Order, OrderRaw};

const ORDER_TABLE: &str = "orders";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
    feed: Arc<CollectionFeed<Order>>,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>, versions: Arc<ResourceVersions>) -> Self {
        Self {
            base: BaseRepository::new(db),
            feed: Arc::new(CollectionFeed::new(ORDER_TABLE, versions)),
        }
    }

    pub fn feed(&self) -> Arc<CollectionFeed<Order>> {
        Arc::clone(&self.feed)
    }

    /// All orders, normalized and sorted newest first
    ///
    /// Ordering happens after normalization: the raw timestamp shapes are
    /// not mutually comparable inside the store.
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let raw: Vec<OrderRaw> = self
            .base
            .db()
            .query("SELECT * FROM orders")
            .await?
            .take(0)?;

        let mut orders: Vec<Order> = raw.into_iter().map(Order::from).collect();
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        Ok(orders)
    }

    pub async fn republish(&self) -> RepoResult<u64> {
        let orders = self.find_all().await?;
        Ok(self.feed.publish(orders))
    }

    /// Delete one order; unknown ids are treated as already deleted
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let rid = record_id_for(ORDER_TABLE, id)?;
        let deleted: Option<OrderRaw> = self
            .base
            .db()
            .query("DELETE $id RETURN BEFORE")
            .bind(("id", rid))
            .await?
            .take(0)?;
        if deleted.is_none() {
            tracing::debug!(id, "Delete of missing order treated as success");
        }
        self.republish().await?;
        Ok(())
    }
}
