//! MongoDB-backed [`DocumentStore`].

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::Document;
use mongodb::bson::oid::ObjectId;
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tracing::debug;

use super::connection::MongoConnection;
use super::store::{DocumentCollection, DocumentStore, StoreError};

/// Collections served from a shared [`MongoConnection`].
#[derive(Debug, Clone)]
pub struct MongoDocumentStore {
    connection: Arc<MongoConnection>,
}

impl MongoDocumentStore {
    /// Create a store over the given connection.
    pub fn new(connection: Arc<MongoConnection>) -> Self {
        Self { connection }
    }

    /// Underlying connection.
    pub fn connection(&self) -> &Arc<MongoConnection> {
        &self.connection
    }
}

impl DocumentStore for MongoDocumentStore {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(MongoCollection {
            connection: Arc::clone(&self.connection),
            name: name.to_owned(),
        })
    }
}

/// One collection; the database handle is resolved per call so a failed
/// first connection can be retried.
struct MongoCollection {
    connection: Arc<MongoConnection>,
    name: String,
}

impl MongoCollection {
    async fn handle(&self) -> Result<Collection<Document>, StoreError> {
        let database: Database = self.connection.database().await?;
        Ok(database.collection::<Document>(&self.name))
    }
}

fn map_mongo_error(error: MongoError) -> StoreError {
    debug!(error = %error, "MongoDB operation failed");
    match *error.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::Io(_)
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => StoreError::connection(error.to_string()),
        _ => StoreError::operation(error.to_string()),
    }
}

#[async_trait]
impl DocumentCollection for MongoCollection {
    async fn find(
        &self,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError> {
        let collection = self.handle().await?;
        let cursor = match sort {
            Some(sort) => collection.find(filter).sort(sort).await,
            None => collection.find(filter).await,
        }
        .map_err(map_mongo_error)?;
        cursor.try_collect().await.map_err(map_mongo_error)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError> {
        let collection = self.handle().await?;
        collection.find_one(filter).await.map_err(map_mongo_error)
    }

    async fn insert_one(&self, document: Document) -> Result<Option<ObjectId>, StoreError> {
        let collection = self.handle().await?;
        let result = collection
            .insert_one(document)
            .await
            .map_err(map_mongo_error)?;
        Ok(result.inserted_id.as_object_id())
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, StoreError> {
        let collection = self.handle().await?;
        collection
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(map_mongo_error)
    }

    async fn delete_one(&self, filter: Document) -> Result<u64, StoreError> {
        let collection = self.handle().await?;
        let result = collection
            .delete_one(filter)
            .await
            .map_err(map_mongo_error)?;
        Ok(result.deleted_count)
    }

    async fn delete_many(&self, filter: Document) -> Result<u64, StoreError> {
        let collection = self.handle().await?;
        let result = collection
            .delete_many(filter)
            .await
            .map_err(map_mongo_error)?;
        Ok(result.deleted_count)
    }
}
