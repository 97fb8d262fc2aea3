//! MongoDB-backed `CourseRepository` implementation.
//!
//! Every operation checks the identifier first. Malformed identifiers are
//! answered as "not found" without touching the store.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use tracing::error;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseChanges, CourseDraft};

use super::documents::{
    MappingError, course_insert_document, course_set_document, id_filter, to_course,
};
use super::id_guard::parse_object_id;
use super::store::{COURSES_COLLECTION, DocumentCollection, DocumentStore, StoreError};
use super::store_error_mapping::{FailureContext, map_mapping_error, map_store_error};

const READ_BACK_FAILED: &str = "inserted course could not be read back";

/// Course repository over the `courses` collection.
#[derive(Clone)]
pub struct MongoCourseRepository {
    collection: Arc<dyn DocumentCollection>,
}

impl MongoCourseRepository {
    /// Create a repository over the given collection.
    pub fn new(collection: Arc<dyn DocumentCollection>) -> Self {
        Self { collection }
    }

    /// Create a repository over the `courses` collection of `store`.
    pub fn from_store(store: &dyn DocumentStore) -> Self {
        Self::new(store.collection(COURSES_COLLECTION))
    }

    async fn fetch(
        &self,
        id: ObjectId,
        context: FailureContext<'_>,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let document = self
            .collection
            .find_one(id_filter(id))
            .await
            .map_err(|err| store_failure(err, context))?;
        to_course(document).map_err(|err| mapping_failure(err, context))
    }
}

fn store_failure(error: StoreError, context: FailureContext<'_>) -> CourseRepositoryError {
    map_store_error(
        error,
        context,
        CourseRepositoryError::connection,
        CourseRepositoryError::query,
    )
}

fn mapping_failure(error: MappingError, context: FailureContext<'_>) -> CourseRepositoryError {
    map_mapping_error(error, context, CourseRepositoryError::query)
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        let context = FailureContext::new("fetch courses");
        let documents = self
            .collection
            .find(doc! {}, None)
            .await
            .map_err(|err| store_failure(err, context))?;
        documents
            .into_iter()
            .filter_map(|document| to_course(Some(document)).transpose())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| mapping_failure(err, context))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Course>, CourseRepositoryError> {
        let Some(object_id) = parse_object_id(id, "find course") else {
            return Ok(None);
        };
        self.fetch(object_id, FailureContext::for_id("fetch course", id))
            .await
    }

    async fn add(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        let context = FailureContext::new("add course");
        let inserted = self
            .collection
            .insert_one(course_insert_document(draft))
            .await
            .map_err(|err| store_failure(err, context))?;
        let Some(object_id) = inserted else {
            error!("course insert returned no generated id");
            return Err(CourseRepositoryError::query(READ_BACK_FAILED));
        };

        let hex = object_id.to_hex();
        self.fetch(object_id, FailureContext::for_id("add course", &hex))
            .await?
            .ok_or_else(|| {
                error!(course_id = %hex, "inserted course missing on read back");
                CourseRepositoryError::query(READ_BACK_FAILED)
            })
    }

    async fn update(
        &self,
        id: &str,
        changes: &CourseChanges,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let Some(object_id) = parse_object_id(id, "update course") else {
            return Ok(None);
        };
        let context = FailureContext::for_id("update course", id);
        let Some(update) = course_set_document(changes) else {
            return self.fetch(object_id, context).await;
        };

        let document = self
            .collection
            .find_one_and_update(id_filter(object_id), update)
            .await
            .map_err(|err| store_failure(err, context))?;
        to_course(document).map_err(|err| mapping_failure(err, context))
    }

    async fn delete(&self, id: &str) -> Result<bool, CourseRepositoryError> {
        let Some(object_id) = parse_object_id(id, "delete course") else {
            return Ok(false);
        };
        let deleted = self
            .collection
            .delete_one(id_filter(object_id))
            .await
            .map_err(|err| store_failure(err, FailureContext::for_id("delete course", id)))?;
        Ok(deleted == 1)
    }
}
