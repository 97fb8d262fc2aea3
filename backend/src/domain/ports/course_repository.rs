//! Port for course persistence.
//!
//! Identifiers are accepted as raw strings. Adapters check well-formedness
//! first and report a malformed identifier exactly like a missing course, so
//! callers only ever see "found" or "not found".

use async_trait::async_trait;

use crate::domain::{Course, CourseChanges, CourseDraft};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "course repository query failed: {message}",
    }
}

/// Port for course storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Return every stored course.
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError>;

    /// Fetch one course; `None` when the id is malformed or unknown.
    async fn find_by_id(&self, id: &str) -> Result<Option<Course>, CourseRepositoryError>;

    /// Insert a course and return its canonical stored form.
    async fn add(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError>;

    /// Apply the supplied fields; `None` when no course matched.
    async fn update(
        &self,
        id: &str,
        changes: &CourseChanges,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// Delete at most one course. Notes are left untouched.
    ///
    /// Returns whether exactly one course was removed.
    async fn delete(&self, id: &str) -> Result<bool, CourseRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Reads find nothing, writes echo their input with a fixed identifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseRepository;

/// Identifier assigned by the fixture repositories.
pub const FIXTURE_ENTITY_ID: &str = "000000000000000000000000";

#[async_trait]
impl CourseRepository for FixtureCourseRepository {
    async fn list(&self) -> Result<Vec<Course>, CourseRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }

    async fn add(&self, draft: &CourseDraft) -> Result<Course, CourseRepositoryError> {
        Ok(Course {
            id: FIXTURE_ENTITY_ID.to_owned(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            start_date: draft.start_date,
            end_date: draft.end_date,
        })
    }

    async fn update(
        &self,
        _id: &str,
        _changes: &CourseChanges,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &str) -> Result<bool, CourseRepositoryError> {
        Ok(false)
    }
}
