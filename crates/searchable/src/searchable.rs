//! The capability contract implemented by searchable record types.

use serde_json::{Map, Value};

/// A domain record that can be indexed and retrieved through the search driver.
///
/// The driver's factories depend only on this interface: how a record stores
/// its data, which persistence layer owns it, and how its attributes are
/// computed are all the implementor's concern. Concrete types expose a flat
/// field map of whatever should be searchable, a stable identifier, and the
/// index the type lives in.
pub trait Searchable: Send + Sync {
    /// Canonical index name for this record type.
    fn search_index() -> String
    where
        Self: Sized;

    /// Name of the canonical identifier field for this record type.
    ///
    /// The document store keys every index by a single identifier field; the
    /// engine rejects index creation that requests any other primary key.
    fn key_name() -> String
    where
        Self: Sized,
    {
        "id".to_string()
    }

    /// The record's unique identifier, used as the document identifier.
    fn search_key(&self) -> String;

    /// Flat map of the record's declared searchable attributes.
    fn searchable_fields(&self) -> Map<String, Value>;

    /// Soft-delete marker for this record.
    ///
    /// `None` means the record type does not use soft deletes. `Some(true)`
    /// marks a trashed record; the marker is indexed alongside the searchable
    /// fields so search-time visibility filtering can act on it.
    fn soft_deleted(&self) -> Option<bool> {
        None
    }
}
