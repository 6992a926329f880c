//! Record-store abstraction used for hydration.

use async_trait::async_trait;
use remora_searchable::{Searchable, SoftDeleteVisibility};

use crate::error::StoreResult;

/// Batched access to the persistence layer that owns the domain records.
///
/// The driver never touches the record store one key at a time: hydration
/// issues batched lookups and re-imposes ordering itself, so implementations
/// are free to return records in whatever order is natural for them.
#[async_trait]
pub trait RecordStore<R: Searchable>: Send + Sync {
    /// Fetches the records for the given keys in one batched lookup.
    ///
    /// Ordering of the returned records is unspecified. Keys with no backing
    /// record are omitted, never an error. When `visibility` admits trashed
    /// records the store must return them as well; the search-time filter
    /// already governs what the caller sees.
    async fn fetch_by_keys(
        &self,
        keys: &[String],
        visibility: SoftDeleteVisibility,
    ) -> StoreResult<Vec<R>>;
}
