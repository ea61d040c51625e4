use thiserror::Error;

use super::CategoryId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("category not found: {0}")]
    NotFound(CategoryId),
    #[error("credentials rejected: {0}")]
    Rejected(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("operation aborted: {0}")]
    Aborted(String),
}

impl From<anyhow::Error> for StoreError {
    fn from(value: anyhow::Error) -> Self {
        StoreError::Storage(format!("{value:#}"))
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(value: tokio::task::JoinError) -> Self {
        StoreError::Aborted(value.to_string())
    }
}
