//! Backend-native search request representation.

use serde_json::Value;

/// A complete search request body bound to a target index.
///
/// Produced fresh per query by the parameters factory; nothing is shared
/// between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParameters {
    /// The index to search.
    pub index: String,

    /// The complete query body, ready to send.
    pub body: Value,
}

impl SearchParameters {
    /// Creates search parameters for the given index and body.
    pub fn new(index: impl Into<String>, body: Value) -> Self {
        Self {
            index: index.into(),
            body,
        }
    }
}
