//! Read-only view over the backend search response.

use serde_json::Value;

use crate::error::ClientError;

/// One hit of a search response.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// The matched document's identifier.
    pub id: String,

    /// The returned source fields, when the request did not suppress them.
    pub source: Option<Value>,
}

/// A search response: total match count plus the ordered hits.
///
/// Owned by the engine for the duration of one search call, then either
/// discarded after hydration or handed to the caller as-is by the raw search
/// surface.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    total: u64,
    hits: Vec<SearchHit>,
    raw: Value,
}

impl SearchResponse {
    /// Parses a raw backend response body.
    ///
    /// Expects `hits.total.value` and a `hits.hits` array whose entries carry
    /// `_id` and (optionally) `_source` as sibling fields.
    pub fn from_raw(raw: Value) -> Result<Self, ClientError> {
        let hits_wrapper = raw.get("hits").ok_or_else(|| ClientError::Malformed {
            message: "response body has no hits object".to_string(),
        })?;

        let total = hits_wrapper
            .get("total")
            .and_then(|t| t.get("value"))
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let mut hits = Vec::new();
        if let Some(entries) = hits_wrapper.get("hits").and_then(Value::as_array) {
            for entry in entries {
                let id = entry
                    .get("_id")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ClientError::Malformed {
                        message: "hit without an _id field".to_string(),
                    })?;

                hits.push(SearchHit {
                    id: id.to_string(),
                    source: entry.get("_source").cloned(),
                });
            }
        }

        Ok(Self { total, hits, raw })
    }

    /// Total number of matching documents reported by the backend.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The hits in backend order.
    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    /// Identifiers of the hits, preserving hit order.
    pub fn hit_ids(&self) -> Vec<String> {
        self.hits.iter().map(|hit| hit.id.clone()).collect()
    }

    /// True when the response carries no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// The unparsed response body.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}
