//! Hero Banner Repository

use std::sync::Arc;

use async_trait::async_trait;

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RecordStore, RepoError, RepoResult, record_id_for};
use crate::db::live::{CollectionFeed, ResourceVersions};
use crate::db::models::{Hero, HeroCreate, now_millis};

const HERO_TABLE: &str = "heroes";

#[derive(Clone)]
pub struct HeroRepository {
    base: BaseRepository,
    feed: Arc<CollectionFeed<Hero>>,
}

impl HeroRepository {
    pub fn new(db: Surreal<Db>, versions: Arc<ResourceVersions>) -> Self {
        Self {
            base: BaseRepository::new(db),
            feed: Arc::new(CollectionFeed::new(HERO_TABLE, versions)),
        }
    }

    pub fn feed(&self) -> Arc<CollectionFeed<Hero>> {
        Arc::clone(&self.feed)
    }

    /// All heroes, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Hero>> {
        let heroes: Vec<Hero> = self
            .base
            .db()
            .query("SELECT * FROM heroes ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(heroes)
    }

    pub async fn republish(&self) -> RepoResult<u64> {
        let heroes = self.find_all().await?;
        Ok(self.feed.publish(heroes))
    }

    pub async fn create(&self, data: HeroCreate) -> RepoResult<Hero> {
        let record = Hero {
            id: None,
            title: data.title,
            button_text: data.button_text,
            description: data.description,
            image: data.image,
            created_at: now_millis(),
        };

        let created: Option<Hero> = self.base.db().create(HERO_TABLE).content(record).await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create hero".to_string()))?;

        self.republish().await?;
        Ok(created)
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let rid = record_id_for(HERO_TABLE, id)?;
        let deleted: Option<Hero> = self.base.db().delete(rid).await?;
        if deleted.is_none() {
            tracing::debug!(id, "Delete of missing hero treated as success");
        }
        self.republish().await?;
        Ok(())
    }

    pub async fn delete_batch(&self, ids: &[String]) -> RepoResult<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let rids: Vec<RecordId> = ids
            .iter()
            .map(|id| record_id_for(HERO_TABLE, id))
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
impl RecordStore<HeroCreate> for HeroRepository {
    async fn create(&self, record: HeroCreate) -> RepoResult<String> {
        let created = HeroRepository::create(self, record).await?;
        Ok(created.id_string())
    }

    async fn delete(&self, id: &str) -> RepoResult<()> {
        HeroRepository::delete(self, id).await
    }

    async fn delete_batch(&self, ids: &[String]) -> RepoResult<()> {
        HeroRepository::delete_batch(self, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn repo() -> HeroRepository {
        let db = DbService::memory().await.unwrap();
        HeroRepository::new(db.db, Arc::new(ResourceVersions::new()))
    }

    fn payload() -> HeroCreate {
        HeroCreate {
            title: "Summer Sale".into(),
            button_text: "Shop now".into(),
            description: "Up to 50% off".into(),
            image: "https://img.example/hero.jpg".into(),
        }
    }

    #[tokio::test]
    async fn create_and_delete_roundtrip() {
        let repo = repo().await;
        let hero = repo.create(payload()).await.unwrap();
        assert!(hero.id.is_some());

        repo.delete(&hero.id_string()).await.unwrap();
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
