//! Document-store seam used by the repositories.
//!
//! Repositories talk to a [`DocumentCollection`] rather than to the MongoDB
//! driver, so they can be exercised against mocks or the in-memory store.
//! Every method is a single store round trip.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::Document;
use mongodb::bson::oid::ObjectId;

use super::connection::ConnectionError;

/// Name of the course collection.
pub const COURSES_COLLECTION: &str = "courses";
/// Name of the note collection.
pub const NOTES_COLLECTION: &str = "notes";

/// Errors raised by document-store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("document store unavailable: {message}")]
    Connection { message: String },

    /// The store rejected or failed the operation.
    #[error("document store operation failed: {message}")]
    Operation { message: String },
}

impl StoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an operation error with the given message.
    pub fn operation(message: impl Into<String>) -> Self {
        Self::Operation {
            message: message.into(),
        }
    }
}

impl From<ConnectionError> for StoreError {
    fn from(value: ConnectionError) -> Self {
        Self::connection(value.to_string())
    }
}

/// One named collection of documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentCollection: Send + Sync {
    /// Return every document matching `filter`, ordered by `sort` when given.
    async fn find(
        &self,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Return the first document matching `filter`.
    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError>;

    /// Insert a document and return the generated `_id`, when the store
    /// reports one.
    async fn insert_one(&self, document: Document) -> Result<Option<ObjectId>, StoreError>;

    /// Apply `update` to the first match and return the updated document.
    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Delete the first match; returns the number of removed documents.
    async fn delete_one(&self, filter: Document) -> Result<u64, StoreError>;

    /// Delete every match; returns the number of removed documents.
    async fn delete_many(&self, filter: Document) -> Result<u64, StoreError>;
}

/// Source of named collections.
pub trait DocumentStore: Send + Sync {
    /// Return a handle to the named collection.
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection>;
}
