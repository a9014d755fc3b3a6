//! Repository Module
//!
//! CRUD over the document collections, one repository per collection.
//! Every successful mutation republishes the collection's full ordered
//! snapshot on its live feed.

pub mod hero;
pub mod order;
pub mod product;

pub use hero::HeroRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;

use async_trait::async_trait;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Store seam the ingestion controller works against
///
/// `C` is the create payload for the collection. Implemented by the real
/// repositories and by test fakes.
#[async_trait]
pub trait RecordStore<C>: Send + Sync {
    /// Persist a record; the store assigns id and creation timestamp.
    /// Returns the assigned id.
    async fn create(&self, record: C) -> RepoResult<String>;

    /// Delete one record. Deleting an id that no longer exists is success.
    async fn delete(&self, id: &str) -> RepoResult<()>;

    /// Delete a batch in a single transaction, all-or-nothing.
    /// An empty batch is a no-op.
    async fn delete_batch(&self, ids: &[String]) -> RepoResult<()>;
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Resolve an id from the API ("table:key" or bare key) into a RecordId
pub(crate) fn record_id_for(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.contains(':') {
        id.parse::<RecordId>()
            .map_err(|_| RepoError::Validation(format!("invalid record id: {id}")))
    } else {
        Ok(RecordId::from_table_key(table, id))
    }
}
