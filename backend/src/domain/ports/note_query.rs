//! Driving port for reading notes.

use async_trait::async_trait;

use crate::domain::{Error, Note};

/// Domain use-case port for note reads. Listings are newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteQuery: Send + Sync {
    /// List every note.
    async fn list_notes(&self) -> Result<Vec<Note>, Error>;

    /// List the notes attached to one course.
    async fn list_notes_for_course(&self, course_id: &str) -> Result<Vec<Note>, Error>;

    /// Fetch one note, failing with `not_found` when it does not exist.
    async fn fetch_note(&self, note_id: &str) -> Result<Note, Error>;
}

/// Fixture query with no notes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNoteQuery;

#[async_trait]
impl NoteQuery for FixtureNoteQuery {
    async fn list_notes(&self) -> Result<Vec<Note>, Error> {
        Ok(Vec::new())
    }

    async fn list_notes_for_course(&self, _course_id: &str) -> Result<Vec<Note>, Error> {
        Ok(Vec::new())
    }

    async fn fetch_note(&self, _note_id: &str) -> Result<Note, Error> {
        Err(Error::not_found("note not found"))
    }
}
