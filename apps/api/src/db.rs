use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::storage::PostgresStore;

/// Connects to PostgreSQL and returns a store whose `kv_store` table exists.
pub async fn connect_postgres_store(database_url: &str) -> Result<PostgresStore> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    let store = PostgresStore::new(pool);
    store
        .ensure_schema()
        .await
        .context("Failed to prepare kv_store table")?;

    info!("PostgreSQL key-value store ready");
    Ok(store)
}
