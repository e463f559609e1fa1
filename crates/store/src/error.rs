use common::Fault;
use thiserror::Error;

/// Errors that can occur when interacting with the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing engine failed.
    #[error("Store backend error: {0}")]
    Backend(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<StoreError> for Fault {
    fn from(err: StoreError) -> Self {
        Fault::Internal(err.to_string())
    }
}

/// Result type for document store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
