//! remora search engine driver.
//!
//! This crate bridges the [`remora_searchable`] query contract to a
//! document-search backend. It translates abstract query descriptions into
//! backend-native search parameters, executes batched index mutations, and
//! converts search hits back into ordered, paginated collections of domain
//! records, including soft-delete awareness.
//!
//! # Architecture
//!
//! - [`types`] - ephemeral value types exchanged with the document store
//! - [`error`] - the error taxonomy (not-found conditions are typed)
//! - [`core`] - seam traits for the document store and the record store
//! - [`factories`] - pure translations between the two worlds
//! - [`engine`] - the orchestrator composing factories and collaborators
//! - [`backends`] - client implementations (Elasticsearch)
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use remora_engine::backends::elasticsearch::{ElasticsearchClient, ElasticsearchConfig};
//! use remora_engine::{
//!     DocumentFactory, Engine, ModelFactory, SearchParametersFactory, SearchQuery,
//! };
//!
//! let client = Arc::new(ElasticsearchClient::new(ElasticsearchConfig::default())?);
//! let engine: Engine<Client> = Engine::new(
//!     client,
//!     record_store,
//!     DocumentFactory::new(),
//!     SearchParametersFactory::new(),
//!     ModelFactory::new(),
//! );
//!
//! engine.update(&clients).await?;
//!
//! let found = engine
//!     .search(&SearchQuery::builder().query("john").order_by("email").build())
//!     .await?;
//! ```
//!
//! # Error handling
//!
//! Expected absence conditions (a deleted record resurfacing in a delete
//! call, a hit whose record is gone from the store) are locally recovered.
//! Everything else - transport failures, malformed responses, backend-side
//! validation errors - propagates unchanged to the caller; retry policy
//! belongs to the transport layer, not here.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod engine;
pub mod error;
pub mod factories;
pub mod types;

// Re-export commonly used types at crate root
pub use crate::core::{DocumentClient, RecordStore};
pub use engine::{CreateIndexOptions, Engine};
pub use error::{ClientError, EngineError, EngineResult, StoreError};
pub use factories::{
    DocumentFactory, LazyRecords, ModelFactory, SearchOptions, SearchParametersFactory,
};
pub use types::{Document, Page, SOFT_DELETE_FIELD, SearchParameters, SearchResponse};

// Re-export the query contract so callers need only one crate.
pub use remora_searchable::{
    FilterClause, SearchQuery, SearchQueryBuilder, Searchable, SoftDeleteVisibility, SortClause,
    SortDirection,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
