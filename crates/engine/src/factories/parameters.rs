//! Conversion of query descriptions into backend-native search parameters.

use remora_searchable::{FilterClause, Searchable, SearchQuery, SoftDeleteVisibility, SortClause};
use serde_json::{Map, Value, json};

use crate::types::{SOFT_DELETE_FIELD, SearchParameters};

/// Per-call-site overrides for the produced search parameters.
///
/// A later explicit option always wins over a query-derived default: the
/// index override replaces whatever the query or the record type would have
/// chosen, extra filters are ANDed after the query's own, and field limiting
/// restricts the source payload returned with each hit.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Replaces the target index outright.
    pub index: Option<String>,

    /// Additional filter clauses ANDed with the query's own.
    pub filters: Vec<FilterClause>,

    /// Restricts the source fields returned with each hit. An empty list
    /// suppresses the source payload entirely.
    pub fields: Option<Vec<String>>,
}

impl SearchOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the target index.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Adds a filter clause.
    pub fn with_filter(mut self, clause: FilterClause) -> Self {
        self.filters.push(clause);
        self
    }

    /// Restricts the returned source fields.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }
}

/// Translates an abstract [`SearchQuery`] into [`SearchParameters`].
///
/// A pure translation with no I/O; it cannot fail for any well-typed input.
/// The free-text term is passed through verbatim as the backend's native
/// mini-language query string, never parsed or validated here.
#[derive(Debug, Clone, Default)]
pub struct SearchParametersFactory;

impl SearchParametersFactory {
    /// Creates a new factory.
    pub fn new() -> Self {
        Self
    }

    /// Builds the backend request for a query over records of type `R`.
    pub fn make_from_query<R: Searchable>(
        &self,
        query: &SearchQuery,
        options: &SearchOptions,
    ) -> SearchParameters {
        let index = options
            .index
            .clone()
            .or_else(|| query.index.clone())
            .unwrap_or_else(R::search_index);

        let mut must: Vec<Value> = Vec::new();
        let mut filter: Vec<Value> = Vec::new();
        let mut must_not: Vec<Value> = Vec::new();

        if let Some(ref text) = query.query_string {
            must.push(json!({ "query_string": { "query": text } }));
        }

        for clause in query.filters.iter().chain(options.filters.iter()) {
            filter.push(filter_clause(clause));
        }

        match query.visibility {
            SoftDeleteVisibility::ExcludeTrashed => {
                // An absent marker counts as live, so records indexed before
                // soft deletes were enabled stay visible.
                must_not.push(term(SOFT_DELETE_FIELD, &json!(1)));
            }
            SoftDeleteVisibility::OnlyTrashed => {
                filter.push(term(SOFT_DELETE_FIELD, &json!(1)));
            }
            SoftDeleteVisibility::WithTrashed => {}
        }

        let query_clause = if must.is_empty() && filter.is_empty() && must_not.is_empty() {
            json!({ "match_all": {} })
        } else {
            let mut bool_clause = Map::new();
            if !must.is_empty() {
                bool_clause.insert("must".to_string(), Value::Array(must));
            }
            if !filter.is_empty() {
                bool_clause.insert("filter".to_string(), Value::Array(filter));
            }
            if !must_not.is_empty() {
                bool_clause.insert("must_not".to_string(), Value::Array(must_not));
            }
            json!({ "bool": bool_clause })
        };

        let mut body = json!({
            "query": query_clause,
            "track_total_hits": true,
        });

        if !query.sort.is_empty() {
            body["sort"] = Value::Array(query.sort.iter().map(sort_clause).collect());
        }
        if let Some(offset) = query.offset {
            body["from"] = json!(offset);
        }
        if let Some(limit) = query.limit {
            body["size"] = json!(limit);
        }
        if let Some(ref fields) = options.fields {
            body["_source"] = json!(fields);
        }

        SearchParameters::new(index, body)
    }
}

fn term(field: &str, value: &Value) -> Value {
    let mut clause = Map::new();
    clause.insert(field.to_string(), value.clone());
    json!({ "term": clause })
}

fn filter_clause(clause: &FilterClause) -> Value {
    match clause {
        FilterClause::Equals { field, value } => term(field, value),
        FilterClause::OneOf { field, values } => {
            let mut terms = Map::new();
            terms.insert(field.clone(), Value::Array(values.clone()));
            json!({ "terms": terms })
        }
    }
}

fn sort_clause(clause: &SortClause) -> Value {
    let mut entry = Map::new();
    entry.insert(
        clause.field.clone(),
        json!({ "order": clause.direction.as_str() }),
    );
    Value::Object(entry)
}
