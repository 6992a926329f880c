//! Elasticsearch-backed document-store client.
//!
//! This module implements [`DocumentClient`](crate::core::DocumentClient)
//! against an Elasticsearch cluster. Mutations go through the `_bulk` API so
//! every engine operation stays a single round trip, searches execute the
//! parameters factory's Query DSL body verbatim, and index lifecycle calls
//! map onto the indices API.
//!
//! # Example
//!
//! ```ignore
//! use remora_engine::backends::elasticsearch::{ElasticsearchClient, ElasticsearchConfig};
//!
//! let config = ElasticsearchConfig {
//!     nodes: vec!["http://localhost:9200".to_string()],
//!     ..Default::default()
//! };
//! let client = ElasticsearchClient::new(config)?;
//! ```

mod backend;

pub use backend::{ElasticsearchAuth, ElasticsearchClient, ElasticsearchConfig};
