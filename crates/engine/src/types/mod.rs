//! Value types exchanged with the document store.
//!
//! All of these are ephemeral per-call values: documents and search
//! parameters are produced fresh for each operation, responses live for the
//! duration of one search call, and pages are handed to the caller who owns
//! them thereafter.

mod document;
mod page;
mod parameters;
mod response;

pub use document::{Document, SOFT_DELETE_FIELD};
pub use page::Page;
pub use parameters::SearchParameters;
pub use response::{SearchHit, SearchResponse};
