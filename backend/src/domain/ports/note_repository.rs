//! Port for note persistence.
//!
//! Listings are ordered by creation time, newest first. Display order relies
//! on it, so adapters must sort rather than return store order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Note, NoteChanges, NoteDraft};

use super::FIXTURE_ENTITY_ID;
use super::define_port_error;

define_port_error! {
    /// Errors raised by note repository adapters.
    pub enum NoteRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "note repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "note repository query failed: {message}",
    }
}

/// Port for note storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Return every note, newest first.
    async fn list(&self) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Return the notes of one course, newest first.
    ///
    /// Matches `course_id` exactly; the identifier is not validated.
    async fn list_by_course(&self, course_id: &str) -> Result<Vec<Note>, NoteRepositoryError>;

    /// Fetch one note; `None` when the id is malformed or unknown.
    async fn find_by_id(&self, id: &str) -> Result<Option<Note>, NoteRepositoryError>;

    /// Insert a note stamped with the current time and return its stored form.
    async fn add(&self, draft: &NoteDraft) -> Result<Note, NoteRepositoryError>;

    /// Apply the supplied mutable fields; `None` when no note matched.
    ///
    /// `course_id` and `created_at` in `changes` are ignored.
    async fn update(
        &self,
        id: &str,
        changes: &NoteChanges,
    ) -> Result<Option<Note>, NoteRepositoryError>;

    /// Delete at most one note; returns whether exactly one was removed.
    async fn delete(&self, id: &str) -> Result<bool, NoteRepositoryError>;

    /// Delete every note of a course; returns whether any was removed.
    async fn delete_by_course(&self, course_id: &str) -> Result<bool, NoteRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNoteRepository;

#[async_trait]
impl NoteRepository for FixtureNoteRepository {
    async fn list(&self) -> Result<Vec<Note>, NoteRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_by_course(&self, _course_id: &str) -> Result<Vec<Note>, NoteRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Note>, NoteRepositoryError> {
        Ok(None)
    }

    async fn add(&self, draft: &NoteDraft) -> Result<Note, NoteRepositoryError> {
        Ok(Note {
            id: FIXTURE_ENTITY_ID.to_owned(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            course_id: draft.course_id.clone(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        })
    }

    async fn update(
        &self,
        _id: &str,
        _changes: &NoteChanges,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &str) -> Result<bool, NoteRepositoryError> {
        Ok(false)
    }

    async fn delete_by_course(&self, _course_id: &str) -> Result<bool, NoteRepositoryError> {
        Ok(false)
    }
}
