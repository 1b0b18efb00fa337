use crate::interface::store::KeyValueStore;
use crate::model::error::Error;
use crate::model::error::store::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tokio::fs::File;
use tracing::debug;

/// SQLite-backed key-value store. One row per blob, JSON-encoded values.
#[derive(Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the store at `path`, creating the database file and the backing
    /// table on first use.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            File::create(path)
                .await
                .map_err(StoreError::CreateDatabaseFailed)?;
        }
        Self::connect(&format!("sqlite://{}", path.display())).await
    }

    pub async fn connect(url: &str) -> Result<Self, Error> {
        let pool = SqlitePool::connect(url)
            .await
            .map_err(StoreError::ConnectFailed)?;
        let store = SqliteStore { pool };
        if !store.exist_table("StoreEntries").await {
            store.create_store_table().await?;
        }
        debug!("Connected to store at {url}");
        Ok(store)
    }

    fn get_pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    async fn exist_table(&self, table_name: &str) -> bool {
        let pool = self.get_pool();
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type='table' AND name = ?)",
        )
        .bind(table_name)
        .fetch_one(&pool)
        .await
        .unwrap_or(false)
    }

    async fn create_store_table(&self) -> Result<(), Error> {
        let pool = self.get_pool();
        sqlx::query(
            r#"
            CREATE TABLE StoreEntries (
                "key" TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(StoreError::StatementExecutionFailed)?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, Error> {
        let pool = self.get_pool();
        let row = sqlx::query(r#"SELECT value FROM StoreEntries WHERE "key" = ?"#)
            .bind(key)
            .fetch_optional(&pool)
            .await
            .map_err(StoreError::StatementExecutionFailed)?;

        if let Some(row) = row {
            let raw: String = row.get("value");
            let value = serde_json::from_str(&raw).map_err(StoreError::DecodeFailed)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), Error> {
        let pool = self.get_pool();
        let encoded = serde_json::to_string(&value).map_err(StoreError::EncodeFailed)?;
        sqlx::query(
            r#"
            INSERT INTO StoreEntries ("key", value)
            VALUES (?, ?)
            ON CONFLICT("key") DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(encoded)
        .execute(&pool)
        .await
        .map_err(StoreError::StatementExecutionFailed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn round_trips_values_through_sqlite() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let store = SqliteStore::open(file.path()).await.unwrap();

        assert_eq!(store.get("absent").await.unwrap(), None);

        store.set("options", json!({ "a": 1 })).await.unwrap();
        assert_eq!(store.get("options").await.unwrap(), Some(json!({ "a": 1 })));

        store.set("options", json!({ "a": 2 })).await.unwrap();
        assert_eq!(store.get("options").await.unwrap(), Some(json!({ "a": 2 })));
    }

    #[tokio::test]
    async fn survives_reconnect() {
        let file = tempfile::NamedTempFile::new().unwrap();
        {
            let store = SqliteStore::open(file.path()).await.unwrap();
            store.set("history", json!([1, 2, 3])).await.unwrap();
        }
        let store = SqliteStore::open(file.path()).await.unwrap();
        assert_eq!(store.get("history").await.unwrap(), Some(json!([1, 2, 3])));
    }
}
