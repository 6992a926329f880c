//! Pure translations between the query contract and the backend-native types.
//!
//! The factories carry no I/O handles of their own: the parameters and
//! document factories are total functions over their inputs, and the model
//! factory borrows the record store only for the duration of a hydration
//! call.

mod document;
mod model;
mod parameters;

pub use document::DocumentFactory;
pub use model::{LazyRecords, ModelFactory};
pub use parameters::{SearchOptions, SearchParametersFactory};
