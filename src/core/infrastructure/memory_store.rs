use crate::interface::store::KeyValueStore;
use crate::model::error::Error;
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

/// Process-local key-value store. Useful for tests and for hosts that handle
/// persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), Error> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}
