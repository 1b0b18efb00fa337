use crate::model::error::Error;
use async_trait::async_trait;
use serde_json::Value;

/// The injected persistent key-value store. One blob per key; individual
/// get/set calls are assumed atomic by the backing implementation.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, Error>;
    async fn set(&self, key: &str, value: Value) -> Result<(), Error>;
}
