//! Error types for JotDB core.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A mutating operation was called with an empty collection or resource name.
    ///
    /// This is checked before any filesystem access, so a rejected call
    /// leaves no directories or files behind.
    #[error("missing collection or resource")]
    MissingIdentifier,

    /// The requested record file does not exist.
    #[error("record not found: {resource} in collection {collection}")]
    RecordNotFound {
        /// The collection that was searched.
        collection: String,
        /// The resource name that was not found.
        resource: String,
    },

    /// The requested collection directory does not exist.
    #[error("collection not found: {name}")]
    CollectionNotFound {
        /// Name of the collection.
        name: String,
    },

    /// The value could not be encoded as JSON.
    #[error("serialization failed: {message}")]
    Serialization {
        /// Description of the encoding failure.
        message: String,
    },

    /// The stored bytes could not be decoded into the requested type.
    #[error("deserialization failed: {message}")]
    Deserialization {
        /// Description of the decoding failure.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Creates a record not found error.
    pub fn record_not_found(collection: impl Into<String>, resource: impl Into<String>) -> Self {
        Self::RecordNotFound {
            collection: collection.into(),
            resource: resource.into(),
        }
    }

    /// Creates a collection not found error.
    pub fn collection_not_found(name: impl Into<String>) -> Self {
        Self::CollectionNotFound { name: name.into() }
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization {
            message: message.into(),
        }
    }
}
