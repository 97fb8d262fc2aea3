//! Driving port for note mutations.

use async_trait::async_trait;

use crate::domain::{Error, Note, NoteChanges, NoteDraft};

/// Domain use-case port for creating, editing, and deleting notes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NoteCommand: Send + Sync {
    /// Validate and store a new note.
    async fn create_note(&self, draft: NoteDraft) -> Result<Note, Error>;

    /// Validate and apply a partial update. The course and creation time of
    /// a note never change.
    async fn update_note(&self, note_id: &str, changes: NoteChanges) -> Result<Note, Error>;

    /// Delete one note.
    async fn delete_note(&self, note_id: &str) -> Result<(), Error>;
}

/// Fixture command that reports every note as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureNoteCommand;

#[async_trait]
impl NoteCommand for FixtureNoteCommand {
    async fn create_note(&self, draft: NoteDraft) -> Result<Note, Error> {
        draft.validate()?;
        Err(Error::service_unavailable("note storage is not configured"))
    }

    async fn update_note(&self, _note_id: &str, _changes: NoteChanges) -> Result<Note, Error> {
        Err(Error::not_found("note not found"))
    }

    async fn delete_note(&self, _note_id: &str) -> Result<(), Error> {
        Err(Error::not_found("note not found"))
    }
}
