//! Searchable-record contract for the remora search driver.
//!
//! This crate defines the caller-facing half of the driver: the [`Searchable`]
//! capability trait implemented by domain record types, and the immutable
//! [`SearchQuery`] description assembled through [`SearchQueryBuilder`].
//! Nothing here performs I/O; the engine crate consumes both.
//!
//! # Quick Start
//!
//! ```
//! use remora_searchable::{SearchQuery, SortDirection};
//! use serde_json::json;
//!
//! let query = SearchQuery::builder()
//!     .query("name:(John OR Matthew)")
//!     .where_eq("status", json!("active"))
//!     .order_by("email")
//!     .limit(20)
//!     .build();
//!
//! assert_eq!(query.filters.len(), 1);
//! assert_eq!(query.sort[0].direction, SortDirection::Ascending);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod query;
pub mod searchable;

pub use query::{
    FilterClause, SearchQuery, SearchQueryBuilder, SoftDeleteVisibility, SortClause, SortDirection,
};
pub use searchable::Searchable;
