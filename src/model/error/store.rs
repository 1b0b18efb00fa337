use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create store database")]
    CreateDatabaseFailed(#[source] std::io::Error),

    #[error("Failed to connect to store database")]
    ConnectFailed(#[source] sqlx::Error),

    #[error("Failed to execute SQL statement")]
    StatementExecutionFailed(#[source] sqlx::Error),

    #[error("Failed to encode stored value")]
    EncodeFailed(#[source] serde_json::Error),

    #[error("Failed to decode stored value")]
    DecodeFailed(#[source] serde_json::Error),
}
