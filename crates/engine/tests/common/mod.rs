//! Shared test fixtures: a domain record type, an in-memory record store,
//! and an in-memory document-store fake that interprets exactly the query
//! DSL subset the driver emits (match_all, bool with must/filter/must_not,
//! term, terms, query_string, sort, from/size, _source).

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use async_trait::async_trait;
use remora_engine::{
    ClientError, Document, DocumentClient, RecordStore, SearchParameters, SearchResponse,
    Searchable, SoftDeleteVisibility, StoreError,
};
use serde_json::{Map, Value, json};

// ============================================================================
// Domain record fixture
// ============================================================================

/// A client record, the domain type used throughout the contract tests.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    uses_soft_deletes: bool,
    trashed: bool,
}

impl ClientRecord {
    pub fn new(id: &str, name: &str, email: &str, phone_number: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone_number: phone_number.to_string(),
            uses_soft_deletes: false,
            trashed: false,
        }
    }

    /// Enables soft-delete tracking for this record (live state).
    pub fn with_soft_deletes(mut self) -> Self {
        self.uses_soft_deletes = true;
        self
    }

    /// Marks the record as trashed (implies soft-delete tracking).
    pub fn trashed(mut self) -> Self {
        self.uses_soft_deletes = true;
        self.trashed = true;
        self
    }
}

impl Searchable for ClientRecord {
    fn search_index() -> String {
        "clients".to_string()
    }

    fn search_key(&self) -> String {
        self.id.clone()
    }

    fn searchable_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!(self.name));
        fields.insert("email".to_string(), json!(self.email));
        fields.insert("phone_number".to_string(), json!(self.phone_number));
        fields
    }

    fn soft_deleted(&self) -> Option<bool> {
        self.uses_soft_deletes.then_some(self.trashed)
    }
}

// ============================================================================
// In-memory record store
// ============================================================================

/// Record persistence fake keyed by identifier.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: Mutex<HashMap<String, ClientRecord>>,
    fetch_calls: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: ClientRecord) {
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record);
    }

    pub fn insert_all(&self, records: &[ClientRecord]) {
        for record in records {
            self.insert(record.clone());
        }
    }

    pub fn remove(&self, id: &str) {
        self.records.lock().unwrap().remove(id);
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl RecordStore<ClientRecord> for InMemoryRecordStore {
    async fn fetch_by_keys(
        &self,
        keys: &[String],
        visibility: SoftDeleteVisibility,
    ) -> Result<Vec<ClientRecord>, StoreError> {
        self.fetch_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let records = self.records.lock().unwrap();

        Ok(keys
            .iter()
            .filter_map(|key| records.get(key))
            .filter(|record| match visibility {
                SoftDeleteVisibility::ExcludeTrashed => record.soft_deleted() != Some(true),
                SoftDeleteVisibility::WithTrashed => true,
                SoftDeleteVisibility::OnlyTrashed => record.soft_deleted() == Some(true),
            })
            .cloned()
            .collect())
    }
}

// ============================================================================
// In-memory document store
// ============================================================================

#[derive(Debug, Clone)]
struct StoredDoc {
    id: String,
    fields: Map<String, Value>,
}

/// Document-store fake with per-operation call counters.
///
/// Searches interpret the DSL subset the parameters factory produces; the
/// reported total is the match count before the from/size window, mirroring
/// `track_total_hits`.
#[derive(Default)]
pub struct FakeSearchClient {
    indices: Mutex<HashMap<String, Vec<StoredDoc>>>,
    index_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    delete_by_query_calls: AtomicUsize,
    search_calls: AtomicUsize,
    create_index_calls: AtomicUsize,
}

impl FakeSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index_calls(&self) -> usize {
        self.index_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn delete_by_query_calls(&self) -> usize {
        self.delete_by_query_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn create_index_calls(&self) -> usize {
        self.create_index_calls.load(AtomicOrdering::SeqCst)
    }
}

fn eval_leaf(clause: &Value, doc: &StoredDoc) -> bool {
    if clause.get("match_all").is_some() {
        return true;
    }

    if let Some(term) = clause.get("term").and_then(Value::as_object) {
        return term
            .iter()
            .all(|(field, value)| doc.fields.get(field) == Some(value));
    }

    if let Some(terms) = clause.get("terms").and_then(Value::as_object) {
        return terms.iter().all(|(field, values)| {
            values.as_array().is_some_and(|accepted| {
                doc.fields
                    .get(field)
                    .is_some_and(|value| accepted.contains(value))
            })
        });
    }

    if let Some(query_string) = clause.get("query_string") {
        let needle = query_string
            .get("query")
            .and_then(Value::as_str)
            .unwrap_or("");
        return doc
            .fields
            .values()
            .any(|value| value.as_str().is_some_and(|s| s.contains(needle)));
    }

    false
}

fn matches(query: &Value, doc: &StoredDoc) -> bool {
    if query.get("match_all").is_some() {
        return true;
    }

    let Some(bool_clause) = query.get("bool") else {
        return false;
    };

    let all = |key: &str| {
        bool_clause
            .get(key)
            .and_then(Value::as_array)
            .map(|clauses| clauses.iter().all(|clause| eval_leaf(clause, doc)))
            .unwrap_or(true)
    };
    let none = bool_clause
        .get("must_not")
        .and_then(Value::as_array)
        .map(|clauses| !clauses.iter().any(|clause| eval_leaf(clause, doc)))
        .unwrap_or(true);

    all("must") && all("filter") && none
}

fn cmp_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .unwrap_or(0.0)
            .partial_cmp(&y.as_f64().unwrap_or(0.0))
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn sort_specs(body: &Value) -> Vec<(String, bool)> {
    body.get("sort")
        .and_then(Value::as_array)
        .map(|clauses| {
            clauses
                .iter()
                .filter_map(|clause| {
                    let (field, spec) = clause.as_object()?.iter().next()?;
                    let ascending =
                        spec.get("order").and_then(Value::as_str).unwrap_or("asc") == "asc";
                    Some((field.clone(), ascending))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl DocumentClient for FakeSearchClient {
    async fn index(&self, documents: Vec<Document>) -> Result<(), ClientError> {
        self.index_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let mut indices = self.indices.lock().unwrap();

        for document in documents {
            let docs = indices.entry(document.index).or_default();
            let stored = StoredDoc {
                id: document.id,
                fields: document.fields,
            };
            match docs.iter_mut().find(|existing| existing.id == stored.id) {
                Some(existing) => *existing = stored,
                None => docs.push(stored),
            }
        }

        Ok(())
    }

    async fn delete(&self, index: &str, ids: Vec<String>) -> Result<(), ClientError> {
        self.delete_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let mut indices = self.indices.lock().unwrap();

        let Some(docs) = indices.get_mut(index) else {
            return Err(ClientError::IndexNotFound {
                index: index.to_string(),
            });
        };

        let mut missing = None;
        for id in ids {
            let before = docs.len();
            docs.retain(|doc| doc.id != id);
            if docs.len() == before {
                missing.get_or_insert(id);
            }
        }

        match missing {
            Some(id) => Err(ClientError::DocumentNotFound {
                index: index.to_string(),
                id,
            }),
            None => Ok(()),
        }
    }

    async fn delete_by_query(&self, index: &str, query: Value) -> Result<(), ClientError> {
        self.delete_by_query_calls
            .fetch_add(1, AtomicOrdering::SeqCst);
        let mut indices = self.indices.lock().unwrap();

        let Some(docs) = indices.get_mut(index) else {
            return Err(ClientError::IndexNotFound {
                index: index.to_string(),
            });
        };

        if query.get("match_all").is_none() {
            return Err(ClientError::Response {
                status: 400,
                reason: "only match_all is supported by the fake".to_string(),
            });
        }

        docs.clear();
        Ok(())
    }

    async fn search(&self, parameters: &SearchParameters) -> Result<SearchResponse, ClientError> {
        self.search_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let indices = self.indices.lock().unwrap();

        let Some(docs) = indices.get(&parameters.index) else {
            return Err(ClientError::IndexNotFound {
                index: parameters.index.clone(),
            });
        };

        let body = &parameters.body;
        let query = body.get("query").cloned().unwrap_or(json!({"match_all": {}}));

        let mut matched: Vec<&StoredDoc> =
            docs.iter().filter(|doc| matches(&query, doc)).collect();

        for (field, ascending) in sort_specs(body).into_iter().rev() {
            matched.sort_by(|a, b| {
                let ordering = cmp_field(a.fields.get(&field), b.fields.get(&field));
                if ascending { ordering } else { ordering.reverse() }
            });
        }

        let total = matched.len();
        let from = body.get("from").and_then(Value::as_u64).unwrap_or(0) as usize;
        let size = body.get("size").and_then(Value::as_u64).unwrap_or(10) as usize;
        let source_filter = body.get("_source").and_then(Value::as_array);

        let hits: Vec<Value> = matched
            .into_iter()
            .skip(from)
            .take(size)
            .map(|doc| {
                let mut hit = Map::new();
                hit.insert("_id".to_string(), json!(doc.id));
                match source_filter {
                    Some(fields) if fields.is_empty() => {}
                    Some(fields) => {
                        let subset: Map<String, Value> = doc
                            .fields
                            .iter()
                            .filter(|(name, _)| fields.contains(&json!(name)))
                            .map(|(name, value)| (name.clone(), value.clone()))
                            .collect();
                        hit.insert("_source".to_string(), Value::Object(subset));
                    }
                    None => {
                        hit.insert("_source".to_string(), Value::Object(doc.fields.clone()));
                    }
                }
                Value::Object(hit)
            })
            .collect();

        SearchResponse::from_raw(json!({
            "hits": {
                "total": { "value": total, "relation": "eq" },
                "hits": hits,
            }
        }))
    }

    async fn index_exists(&self, name: &str) -> Result<bool, ClientError> {
        Ok(self.indices.lock().unwrap().contains_key(name))
    }

    async fn create_index(&self, name: &str, _body: Value) -> Result<(), ClientError> {
        self.create_index_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let mut indices = self.indices.lock().unwrap();

        if indices.contains_key(name) {
            return Err(ClientError::Response {
                status: 400,
                reason: format!("index already exists: {name}"),
            });
        }

        indices.insert(name.to_string(), Vec::new());
        Ok(())
    }

    async fn delete_index(&self, name: &str) -> Result<(), ClientError> {
        let mut indices = self.indices.lock().unwrap();
        match indices.remove(name) {
            Some(_) => Ok(()),
            None => Err(ClientError::IndexNotFound {
                index: name.to_string(),
            }),
        }
    }
}
