//! Backend-native document representation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field recording the soft-delete marker inside an indexed document.
///
/// `1` marks a trashed record, `0` a live one. Records of types without soft
/// deletes omit the field entirely, and search-time filtering treats the
/// absent field as live.
pub const SOFT_DELETE_FIELD: &str = "__soft_deleted";

/// A flat field-map representation of one domain record, ready for indexing.
///
/// The identifier and target index are document metadata; they never appear
/// inside the field map itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The record's unique identifier.
    pub id: String,

    /// The index this document targets.
    pub index: String,

    /// The record's searchable attributes.
    pub fields: Map<String, Value>,
}

impl Document {
    /// Creates a document for the given identifier, index, and field map.
    pub fn new(id: impl Into<String>, index: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            index: index.into(),
            fields,
        }
    }
}
