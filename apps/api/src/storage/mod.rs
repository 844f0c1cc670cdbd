//! Key-value persistence for resumes, job descriptions and matches.
//!
//! `KeyValueStore` is the swappable backend (memory, Redis, PostgreSQL);
//! `Repository` layers typed collections on top of it. Both are constructed
//! in `main` and handed to handlers through `AppState`.

pub mod memory;
pub mod objects;
pub mod postgres;
pub mod redis_store;
pub mod repository;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryStore;
pub use objects::{ObjectStore, S3ObjectStore};
pub use postgres::PostgresStore;
pub use redis_store::RedisStore;
pub use repository::Repository;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Object storage error: {0}")]
    Object(String),
}

/// String-keyed JSON blob storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn save(&self, key: &str, value: Value) -> Result<(), StorageError>;
    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError>;
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}
