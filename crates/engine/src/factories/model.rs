//! Conversion of search responses back into ordered record collections.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use remora_searchable::{Searchable, SearchQuery, SoftDeleteVisibility};

use crate::core::RecordStore;
use crate::error::StoreResult;
use crate::types::SearchResponse;

/// Hydrates domain records from search responses.
///
/// Result order always matches hit order exactly, never the record store's
/// natural order. Identifiers the store can no longer produce (deleted
/// externally, racing with indexing) are dropped without aborting the whole
/// conversion.
#[derive(Debug, Clone)]
pub struct ModelFactory {
    hydration_chunk_size: usize,
}

impl Default for ModelFactory {
    fn default() -> Self {
        Self {
            hydration_chunk_size: 500,
        }
    }
}

impl ModelFactory {
    /// Creates a factory with the default lazy-hydration chunk size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of records fetched per chunk on the lazy path.
    pub fn with_hydration_chunk_size(mut self, chunk_size: usize) -> Self {
        self.hydration_chunk_size = chunk_size.max(1);
        self
    }

    /// Eagerly hydrates every hit with one batched fetch.
    ///
    /// An empty hit list yields an empty collection and performs no fetch.
    pub async fn make_from_response<R: Searchable>(
        &self,
        response: &SearchResponse,
        query: &SearchQuery,
        store: &dyn RecordStore<R>,
    ) -> StoreResult<Vec<R>> {
        let ids = response.hit_ids();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let fetched = store.fetch_by_keys(&ids, query.visibility).await?;
        Ok(reorder(&ids, fetched))
    }

    /// Defers hydration into a pull-based, single-pass sequence.
    ///
    /// Semantically identical to the eager variant in ordering and content,
    /// but fetches records in increments for memory-bounded iteration over
    /// large result sets.
    pub fn make_lazy_from_response<R: Searchable + 'static>(
        &self,
        response: &SearchResponse,
        query: &SearchQuery,
        store: Arc<dyn RecordStore<R>>,
    ) -> LazyRecords<R> {
        LazyRecords {
            ids: response.hit_ids(),
            visibility: query.visibility,
            store,
            chunk_size: self.hydration_chunk_size,
            position: 0,
            buffer: VecDeque::new(),
        }
    }
}

/// Re-orders fetched records to match hit order, omitting missing keys.
fn reorder<R: Searchable>(ids: &[String], fetched: Vec<R>) -> Vec<R> {
    let mut by_key: HashMap<String, R> = fetched
        .into_iter()
        .map(|record| (record.search_key(), record))
        .collect();

    ids.iter().filter_map(|id| by_key.remove(id)).collect()
}

/// A finite, forward-only sequence of hydrated records.
///
/// Pulls records in hit order, refilling its buffer with incremental batched
/// fetches against the record store. The continuation is a position over the
/// ordered hit keys held by the iterator itself; single pass, no restart
/// guarantee, no shared state across calls.
pub struct LazyRecords<R: Searchable + 'static> {
    ids: Vec<String>,
    visibility: SoftDeleteVisibility,
    store: Arc<dyn RecordStore<R>>,
    chunk_size: usize,
    position: usize,
    buffer: VecDeque<R>,
}

impl<R: Searchable + 'static> LazyRecords<R> {
    /// Yields the next record, or `None` once the sequence is exhausted.
    pub async fn next(&mut self) -> StoreResult<Option<R>> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                return Ok(Some(record));
            }
            if self.position >= self.ids.len() {
                return Ok(None);
            }

            let end = (self.position + self.chunk_size).min(self.ids.len());
            let chunk = &self.ids[self.position..end];
            let fetched = self.store.fetch_by_keys(chunk, self.visibility).await?;
            self.buffer.extend(reorder(chunk, fetched));
            self.position = end;
        }
    }

    /// Drains the remaining records into a vector.
    pub async fn try_collect(mut self) -> StoreResult<Vec<R>> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await? {
            records.push(record);
        }
        Ok(records)
    }
}
