//! The orchestrator tying the factories and the injected collaborators together.

use std::sync::Arc;

use remora_searchable::{Searchable, SearchQuery};
use serde_json::{Value, json};
use tracing::debug;

use crate::core::{DocumentClient, RecordStore};
use crate::error::{EngineError, EngineResult};
use crate::factories::{
    DocumentFactory, LazyRecords, ModelFactory, SearchOptions, SearchParametersFactory,
};
use crate::types::{Page, SearchResponse};

/// Options accepted by [`Engine::create_index`].
#[derive(Debug, Clone, Default)]
pub struct CreateIndexOptions {
    /// Requested primary-key field. Must match the record type's own key
    /// name; the engine enforces a single canonical identifier per index.
    pub primary_key: Option<String>,

    /// Settings and mappings body; `None` requests the client's defaults.
    pub body: Option<Value>,
}

impl CreateIndexOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests an explicit primary-key field.
    pub fn with_primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.primary_key = Some(primary_key.into());
        self
    }

    /// Supplies an explicit settings/mappings body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// The search driver's entry point for one record type.
///
/// Stateless: every call is an independent transaction against the document
/// store, issuing at most one batched write or one search plus one batched
/// hydration fetch. The injected client and record store are the only shared
/// handles, and both must be safe for concurrent independent calls.
///
/// The engine adds no resilience policy of its own: client errors other than
/// the documented not-found conditions propagate unmodified.
pub struct Engine<R: Searchable + 'static> {
    client: Arc<dyn DocumentClient>,
    store: Arc<dyn RecordStore<R>>,
    documents: DocumentFactory,
    parameters: SearchParametersFactory,
    models: ModelFactory,
}

impl<R: Searchable + 'static> Engine<R> {
    /// Creates an engine from its collaborators.
    ///
    /// Construction happens once at process wiring time; there is no runtime
    /// service lookup.
    pub fn new(
        client: Arc<dyn DocumentClient>,
        store: Arc<dyn RecordStore<R>>,
        documents: DocumentFactory,
        parameters: SearchParametersFactory,
        models: ModelFactory,
    ) -> Self {
        Self {
            client,
            store,
            documents,
            parameters,
            models,
        }
    }

    /// Upserts the given records into their index as one batched call.
    ///
    /// An empty collection is a no-op: the document store is not called.
    pub async fn update(&self, records: &[R]) -> EngineResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let documents = self.documents.make_from_records(records);
        debug!(count = documents.len(), "indexing documents");
        self.client.index(documents).await?;
        Ok(())
    }

    /// Removes the given records from their index as one batched call.
    ///
    /// Shares the emptiness short-circuit with [`update`](Self::update).
    /// Identifiers already absent from the index are not a failure; only
    /// unexpected client errors propagate.
    pub async fn delete(&self, records: &[R]) -> EngineResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let index = R::search_index();
        let ids: Vec<String> = records.iter().map(Searchable::search_key).collect();
        debug!(count = ids.len(), index = %index, "deleting documents");

        match self.client.delete(&index, ids).await {
            Err(err) if err.is_not_found() => Ok(()),
            other => Ok(other?),
        }
    }

    /// Removes every document of this record type from its index.
    ///
    /// Uses a delete-by-query over the whole index; no individual
    /// identifiers are required.
    pub async fn flush(&self) -> EngineResult<()> {
        let index = R::search_index();
        debug!(index = %index, "flushing index");
        self.client
            .delete_by_query(&index, json!({ "match_all": {} }))
            .await?;
        Ok(())
    }

    /// Runs the query and returns the hydrated records in hit order.
    pub async fn search(&self, query: &SearchQuery) -> EngineResult<Vec<R>> {
        let response = self.execute(query, &SearchOptions::new()).await?;
        let records = self
            .models
            .make_from_response(&response, query, self.store.as_ref())
            .await?;
        Ok(records)
    }

    /// Runs the query and returns a lazily hydrated sequence in hit order.
    pub async fn search_lazy(&self, query: &SearchQuery) -> EngineResult<LazyRecords<R>> {
        let response = self.execute(query, &SearchOptions::new()).await?;
        Ok(self
            .models
            .make_lazy_from_response(&response, query, Arc::clone(&self.store)))
    }

    /// Runs the query and returns the backend response without hydration.
    pub async fn search_raw(&self, query: &SearchQuery) -> EngineResult<SearchResponse> {
        self.execute(query, &SearchOptions::new()).await
    }

    /// Returns only the identifiers of the matching documents, in hit order.
    pub async fn keys(&self, query: &SearchQuery) -> EngineResult<Vec<String>> {
        // Only `_id` is needed; suppress the source payload.
        let options = SearchOptions::new().with_fields(Vec::<String>::new());
        let response = self.execute(query, &options).await?;
        Ok(response.hit_ids())
    }

    /// Runs the query against one page window and wraps the result with the
    /// total reported by the backend.
    ///
    /// `page` is 1-based: page 1 maps to offset 0. The returned page content
    /// preserves hit order.
    pub async fn paginate(
        &self,
        query: &SearchQuery,
        per_page: u32,
        page: u32,
    ) -> EngineResult<Page<R>> {
        if per_page == 0 {
            return Err(EngineError::InvalidArgument(
                "per_page must be at least 1".to_string(),
            ));
        }
        if page == 0 {
            return Err(EngineError::InvalidArgument(
                "page numbers start at 1".to_string(),
            ));
        }

        let mut window = query.clone();
        window.offset = Some((page - 1) * per_page);
        window.limit = Some(per_page);

        let response = self.execute(&window, &SearchOptions::new()).await?;
        let items = self
            .models
            .make_from_response(&response, &window, self.store.as_ref())
            .await?;

        Ok(Page::new(items, response.total(), page, per_page))
    }

    /// Creates an index.
    ///
    /// Fails with an invalid-argument error, before any client call, when the
    /// options request a primary key other than the record type's own: an
    /// index has a single canonical identifier field.
    pub async fn create_index(&self, name: &str, options: CreateIndexOptions) -> EngineResult<()> {
        if let Some(ref primary_key) = options.primary_key {
            let declared = R::key_name();
            if *primary_key != declared {
                return Err(EngineError::InvalidArgument(format!(
                    "primary key {primary_key:?} conflicts with the declared key {declared:?}"
                )));
            }
        }

        debug!(index = %name, "creating index");
        self.client
            .create_index(name, options.body.unwrap_or_else(|| json!({})))
            .await?;
        Ok(())
    }

    /// Deletes an index. The client's not-found error propagates unchanged.
    pub async fn delete_index(&self, name: &str) -> EngineResult<()> {
        debug!(index = %name, "deleting index");
        self.client.delete_index(name).await?;
        Ok(())
    }

    /// Returns whether the given index exists.
    pub async fn index_exists(&self, name: &str) -> EngineResult<bool> {
        Ok(self.client.index_exists(name).await?)
    }

    async fn execute(
        &self,
        query: &SearchQuery,
        options: &SearchOptions,
    ) -> EngineResult<SearchResponse> {
        let parameters = self.parameters.make_from_query::<R>(query, options);
        debug!(index = %parameters.index, "executing search");
        Ok(self.client.search(&parameters).await?)
    }
}
