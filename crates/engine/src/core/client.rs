//! Document-store client abstraction.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientResult;
use crate::types::{Document, SearchParameters, SearchResponse};

/// A client for the backing document store.
///
/// Implementations own the wire protocol entirely; the engine only requires
/// the operations below, with errors typed into "not found" versus everything
/// else (see [`ClientError::is_not_found`](crate::error::ClientError::is_not_found)).
/// Retry and timeout policy belong to the implementation, never to the engine.
///
/// The handle must be safe for concurrent independent calls; the engine
/// performs no synchronization of its own.
#[async_trait]
pub trait DocumentClient: Send + Sync {
    /// Upserts the given documents in one batched call, each targeting its
    /// own index.
    async fn index(&self, documents: Vec<Document>) -> ClientResult<()>;

    /// Deletes the documents with the given identifiers from an index in one
    /// batched call.
    async fn delete(&self, index: &str, ids: Vec<String>) -> ClientResult<()>;

    /// Deletes every document matching the given query clause from an index.
    async fn delete_by_query(&self, index: &str, query: Value) -> ClientResult<()>;

    /// Executes a search and returns the parsed response.
    async fn search(&self, parameters: &SearchParameters) -> ClientResult<SearchResponse>;

    /// Returns whether an index with the given name exists.
    async fn index_exists(&self, name: &str) -> ClientResult<bool>;

    /// Creates an index.
    ///
    /// `body` may carry settings and mappings; an empty object requests the
    /// implementation's defaults.
    async fn create_index(&self, name: &str, body: Value) -> ClientResult<()>;

    /// Deletes an index. Deleting a nonexistent index is a not-found error.
    async fn delete_index(&self, name: &str) -> ClientResult<()>;
}
