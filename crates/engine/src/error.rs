//! Error types for the search driver.
//!
//! Errors are split by origin: [`ClientError`] for the document-store client,
//! [`StoreError`] for the backing record store, and [`EngineError`] as the
//! single surface the orchestrator exposes. Expected absence conditions are
//! modelled as typed not-found variants so callers (and the engine itself)
//! can tell them apart from transport failures.

use thiserror::Error;

/// The primary error type for engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A caller-contract violation, detected before any backend call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Document-store client failure.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Record-store failure during hydration.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by the document-store client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The target index does not exist.
    #[error("index not found: {index}")]
    IndexNotFound {
        /// The missing index.
        index: String,
    },

    /// A document addressed by the request does not exist.
    #[error("document not found: {index}/{id}")]
    DocumentNotFound {
        /// The index the document was expected in.
        index: String,
        /// The missing document's identifier.
        id: String,
    },

    /// The request could not be delivered to the backend.
    #[error("request failed: {message}")]
    Transport {
        /// What went wrong.
        message: String,
        /// The underlying transport error, when available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a non-success status.
    #[error("unexpected response (status {status}): {reason}")]
    Response {
        /// The HTTP status code.
        status: u16,
        /// The reason reported by the backend.
        reason: String,
    },

    /// The backend answered with a body this driver cannot interpret.
    #[error("malformed response: {message}")]
    Malformed {
        /// What could not be interpreted.
        message: String,
    },
}

impl ClientError {
    /// Returns true for the expected absence conditions.
    ///
    /// The engine locally recovers from these where the contract allows it
    /// (deletes of already-absent documents); everything else propagates.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::IndexNotFound { .. } | ClientError::DocumentNotFound { .. }
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Malformed {
            message: err.to_string(),
        }
    }
}

/// Errors raised by the backing record store during hydration.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The batched lookup failed.
    #[error("record store lookup failed: {message}")]
    Lookup {
        /// What went wrong.
        message: String,
        /// The underlying persistence error, when available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl StoreError {
    /// Creates a lookup error from a message alone.
    pub fn lookup(message: impl Into<String>) -> Self {
        StoreError::Lookup {
            message: message.into(),
            source: None,
        }
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Result alias for document-store client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result alias for record-store operations.
pub type StoreResult<T> = Result<T, StoreError>;
