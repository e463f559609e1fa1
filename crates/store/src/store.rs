use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::Result;

/// Core trait for document store implementations.
///
/// A document store persists JSON documents keyed by collection name and
/// document id. All implementations must be thread-safe (Send + Sync);
/// the store is the only point of serialization shared across requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts or replaces the document with the given id.
    async fn put(&self, collection: &str, id: Uuid, body: Value) -> Result<()>;

    /// Retrieves a document by id.
    ///
    /// Returns None if the document doesn't exist.
    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Value>>;

    /// Deletes a document by id.
    ///
    /// Returns true if a document was removed, false if none existed.
    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool>;

    /// Lists all documents in a collection, in insertion order.
    async fn list(&self, collection: &str) -> Result<Vec<Value>>;
}
