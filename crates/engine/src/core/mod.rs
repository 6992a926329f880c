//! Seam traits for the driver's external collaborators.
//!
//! The engine performs no I/O of its own: everything it needs from the
//! document store and from the record persistence layer is expressed through
//! the two traits here, and the concrete handles are injected at construction
//! time.

mod client;
mod store;

pub use client::DocumentClient;
pub use store::RecordStore;
