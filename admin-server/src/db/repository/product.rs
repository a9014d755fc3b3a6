//! Product Repository

use std::sync::Arc;

use async_trait::async_trait;

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RecordStore, RepoError, RepoResult, record_id_for};
use crate::db::live::{CollectionFeed, ResourceVersions};
use crate::db::models::{Product, ProductCreate, now_millis};

const PRODUCT_TABLE: &str = "products";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
    feed: Arc<CollectionFeed<Product>>,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>, versions: Arc<ResourceVersions>) -> Self {
        Self {
            base: BaseRepository::new(db),
            feed: Arc::new(CollectionFeed::new(PRODUCT_TABLE, versions)),
        }
    }

    /// Live feed of full collection snapshots, newest first
    pub fn feed(&self) -> Arc<CollectionFeed<Product>> {
        Arc::clone(&self.feed)
    }

    /// All products, ordered by creation time descending
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM products ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Re-query and push the current snapshot to feed subscribers
    pub async fn republish(&self) -> RepoResult<u64> {
        let products = self.find_all().await?;
        Ok(self.feed.publish(products))
    }

    /// Create a product; assigns id and `created_at`
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let record = Product {
            id: None,
            name: data.name,
            description: data.description,
            base_price: data.base_price,
            sale_price: data.sale_price,
            quantity: data.quantity,
            category: data.category,
            sizes: data.sizes,
            images: data.images,
            created_at: now_millis(),
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(record)
            .await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))?;

        self.republish().await?;
        Ok(created)
    }

    /// Delete one product; unknown ids are treated as already deleted
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let rid = record_id_for(PRODUCT_TABLE, id)?;
        let deleted: Option<Product> = self.base.db().delete(rid).await?;
        if deleted.is_none() {
            tracing::debug!(id, "Delete of missing product treated as success");
        }
        self.republish().await?;
        Ok(())
    }

    /// Delete a batch of products in one transaction, all-or-nothing
    pub async fn delete_batch(&self, ids: &[String]) -> RepoResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let rids: Vec<RecordId> = ids
            .iter()
            .map(|id| record_id_for(PRODUCT_TABLE, id))
            .collect::<RepoResult<_>>()?;

        self.base
            .db()
            .query("BEGIN TRANSACTION; DELETE $ids; COMMIT TRANSACTION;")
            .bind(("ids", rids))
            .await?
            .check()?;

        self.republish().await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore<ProductCreate> for ProductRepository {
    async fn create(&self, record: ProductCreate) -> RepoResult<String> {
        let created = ProductRepository::create(self, record).await?;
        Ok(created.id_string())
    }

    async fn delete(&self, id: &str) -> RepoResult<()> {
        ProductRepository::delete(self, id).await
    }

    async fn delete_batch(&self, ids: &[String]) -> RepoResult<()> {
        ProductRepository::delete_batch(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::{Category, Size};

    fn create_payload(name: &str) -> ProductCreate {
        ProductCreate {
            name: name.into(),
            description: "test".into(),
            base_price: 10.0,
            sale_price: 8.0,
            quantity: 3,
            category: Category::Men,
            sizes: vec![Size::M],
            images: vec!["https://img.example/a.jpg".into()],
        }
    }

    async fn repo() -> ProductRepository {
        let db = DbService::memory().await.unwrap();
        ProductRepository::new(db.db, Arc::new(ResourceVersions::new()))
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamp() {
        let repo = repo().await;
        let created = repo.create(create_payload("Shirt")).await.unwrap();
        assert!(created.id.is_some());
        assert!(created.created_at > 0);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_publishes_snapshot() {
        let repo = repo().await;
        let (initial, mut sub) = repo.feed().subscribe();
        assert_eq!(initial.version, 0);

        repo.create(create_payload("Shirt")).await.unwrap();
        let snapshot = sub.recv().await.unwrap();
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].name, "Shirt");
    }

    #[tokio::test]
    async fn delete_missing_id_is_success() {
        let repo = repo().await;
        repo.delete("doesnotexist123").await.unwrap();
    }

    #[tokio::test]
    async fn delete_batch_removes_all() {
        let repo = repo().await;
        let a = repo.create(create_payload("A")).await.unwrap();
        let b = repo.create(create_payload("B")).await.unwrap();

        repo.delete_batch(&[a.id_string(), b.id_string()])
            .await
            .unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_batch_empty_is_noop() {
        let repo = repo().await;
        let before = repo.feed().latest().version;
        repo.delete_batch(&[]).await.unwrap();
        assert_eq!(repo.feed().latest().version, before);
    }

    #[tokio::test]
    async fn find_all_orders_newest_first() {
        let repo = repo().await;
        repo.create(create_payload("First")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        repo.create(create_payload("Second")).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all[0].name, "Second");
        assert_eq!(all[1].name, "First");
    }
}
