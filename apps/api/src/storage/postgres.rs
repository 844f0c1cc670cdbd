use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;

use super::{KeyValueStore, StorageError};

/// One JSONB row per key in `kv_store`.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the backing table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS kv_store (
                key        TEXT PRIMARY KEY,
                value      JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        info!("kv_store table ready");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for PostgresStore {
    async fn save(&self, key: &str, value: Value) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(key)
        .bind(&value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(
            sqlx::query_scalar::<_, Value>("SELECT value FROM kv_store WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM kv_store WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
