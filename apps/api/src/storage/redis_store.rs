use async_trait::async_trait;
use redis::AsyncCommands;
use serde_json::Value;
use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Stores each value as a JSON string under `<prefix><key>`.
pub struct RedisStore {
    client: redis::Client,
    prefix: String,
}

impl RedisStore {
    pub fn new(client: redis::Client, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StorageError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn save(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&value)?;
        let mut con = self.connection().await?;
        con.set::<_, _, ()>(self.namespaced(key), payload).await?;
        debug!("Saved redis key {}", self.namespaced(key));
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let mut con = self.connection().await?;
        let raw: Option<String> = con.get(self.namespaced(key)).await?;
        raw.map(|s| serde_json::from_str(&s))
            .transpose()
            .map_err(StorageError::from)
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut con = self.connection().await?;
        con.del::<_, ()>(self.namespaced(key)).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
