//! The abstract query description and its builder.
//!
//! A [`SearchQuery`] is an immutable record of a caller's search intent:
//! free-text query string, filter clauses, sort clauses, a pagination window,
//! an optional target-index override, and the soft-delete visibility mode.
//! It is assembled incrementally with [`SearchQueryBuilder`] and read-only
//! once built; the engine never mutates it.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort direction for a sort clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

impl SortDirection {
    /// The backend-native order keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sort clause: field plus direction.
///
/// Clauses are applied in declared order; the backend tie-breaks by the first
/// differing clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortClause {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl SortClause {
    /// Creates a sort clause.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Parses a sort expression (e.g. `"-email"` for descending).
    pub fn parse(s: &str) -> Self {
        match s.strip_prefix('-') {
            Some(field) => Self::new(field, SortDirection::Descending),
            None => Self::new(s, SortDirection::Ascending),
        }
    }
}

/// A filter clause over an unanalyzed field.
///
/// Multiple clauses on a query are combined with logical AND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterClause {
    /// `field == value`, matched exactly.
    Equals {
        /// The field to match.
        field: String,
        /// The value the field must equal.
        value: Value,
    },
    /// `field` is any of `values`.
    OneOf {
        /// The field to match.
        field: String,
        /// The accepted values.
        values: Vec<Value>,
    },
}

impl FilterClause {
    /// Creates an equality clause.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        FilterClause::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an inclusion clause.
    pub fn one_of<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        FilterClause::OneOf {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The field this clause filters on.
    pub fn field(&self) -> &str {
        match self {
            FilterClause::Equals { field, .. } | FilterClause::OneOf { field, .. } => field,
        }
    }
}

/// Visibility of soft-deleted records in a search.
///
/// Threaded through the query description explicitly rather than read from
/// ambient configuration, so the three-mode semantics hold per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SoftDeleteVisibility {
    /// Hide trashed records (the default).
    #[default]
    ExcludeTrashed,
    /// Return live and trashed records alike.
    WithTrashed,
    /// Return only trashed records.
    OnlyTrashed,
}

/// An immutable description of a caller's search intent.
///
/// Built once via [`SearchQuery::builder`], then handed to the engine, which
/// only reads it. Clause vectors preserve declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query in the backend's native mini-language, passed through
    /// verbatim.
    pub query_string: Option<String>,

    /// Equality/inclusion filter clauses, ANDed together.
    pub filters: Vec<FilterClause>,

    /// Sort clauses in application order.
    pub sort: Vec<SortClause>,

    /// Maximum number of hits to return.
    pub limit: Option<u32>,

    /// Zero-based offset into the result window.
    pub offset: Option<u32>,

    /// Target-index override. Replaces the record type's canonical index
    /// outright; no merging.
    pub index: Option<String>,

    /// Soft-delete visibility mode.
    pub visibility: SoftDeleteVisibility,
}

impl SearchQuery {
    /// Starts building a query.
    pub fn builder() -> SearchQueryBuilder {
        SearchQueryBuilder::new()
    }
}

/// Explicit builder accumulating clauses in call order.
///
/// Finalize with [`build`](Self::build); the resulting [`SearchQuery`] is
/// immutable, so chained call sites share no hidden mutable state.
#[derive(Debug, Clone, Default)]
pub struct SearchQueryBuilder {
    query: SearchQuery,
}

impl SearchQueryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text query string.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query.query_string = Some(query.into());
        self
    }

    /// Adds a filter clause.
    pub fn filter(mut self, clause: FilterClause) -> Self {
        self.query.filters.push(clause);
        self
    }

    /// Adds an equality filter clause.
    pub fn where_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(FilterClause::eq(field, value))
    }

    /// Adds an inclusion filter clause.
    pub fn where_in<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filter(FilterClause::one_of(field, values))
    }

    /// Adds a sort clause.
    pub fn sort(mut self, clause: SortClause) -> Self {
        self.query.sort.push(clause);
        self
    }

    /// Sorts ascending by the given field.
    pub fn order_by(self, field: impl Into<String>) -> Self {
        self.sort(SortClause::new(field, SortDirection::Ascending))
    }

    /// Sorts descending by the given field.
    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.sort(SortClause::new(field, SortDirection::Descending))
    }

    /// Sets the result size bound.
    pub fn limit(mut self, limit: u32) -> Self {
        self.query.limit = Some(limit);
        self
    }

    /// Sets the zero-based result offset.
    pub fn offset(mut self, offset: u32) -> Self {
        self.query.offset = Some(offset);
        self
    }

    /// Targets an explicit index instead of the record type's canonical one.
    pub fn within(mut self, index: impl Into<String>) -> Self {
        self.query.index = Some(index.into());
        self
    }

    /// Sets the soft-delete visibility mode.
    pub fn visibility(mut self, visibility: SoftDeleteVisibility) -> Self {
        self.query.visibility = visibility;
        self
    }

    /// Includes trashed records in the results.
    pub fn with_trashed(self) -> Self {
        self.visibility(SoftDeleteVisibility::WithTrashed)
    }

    /// Restricts the results to trashed records.
    pub fn only_trashed(self) -> Self {
        self.visibility(SoftDeleteVisibility::OnlyTrashed)
    }

    /// Finalizes the immutable query description.
    pub fn build(self) -> SearchQuery {
        self.query
    }
}
