//! Conversion of domain records into indexable documents.

use remora_searchable::Searchable;
use serde_json::Value;

use crate::types::{Document, SOFT_DELETE_FIELD};

/// Builds backend documents from domain records.
///
/// A pure translation: exactly one document per record, identifier and target
/// index attached as metadata, no I/O. Empty input yields empty output; the
/// orchestrator guarantees no backend call is made for it.
#[derive(Debug, Clone, Default)]
pub struct DocumentFactory;

impl DocumentFactory {
    /// Creates a new factory.
    pub fn new() -> Self {
        Self
    }

    /// Converts each record into one document.
    pub fn make_from_records<R: Searchable>(&self, records: &[R]) -> Vec<Document> {
        records
            .iter()
            .map(|record| self.make_from_record(record))
            .collect()
    }

    fn make_from_record<R: Searchable>(&self, record: &R) -> Document {
        let mut fields = record.searchable_fields();
        if let Some(trashed) = record.soft_deleted() {
            fields.insert(
                SOFT_DELETE_FIELD.to_string(),
                Value::from(u8::from(trashed)),
            );
        }
        Document::new(record.search_key(), R::search_index(), fields)
    }
}
