//! Document-store client implementations.

pub mod elasticsearch;
