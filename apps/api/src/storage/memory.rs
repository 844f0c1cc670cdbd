use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn save(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn load(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
