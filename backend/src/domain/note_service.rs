//! Note domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::course_service::map_note_error;
use crate::domain::ports::{NoteCommand, NoteQuery, NoteRepository};
use crate::domain::{Error, Note, NoteChanges, NoteDraft};

/// Note service implementing [`NoteQuery`] and [`NoteCommand`].
#[derive(Clone)]
pub struct NoteService<N> {
    notes: Arc<N>,
}

impl<N> NoteService<N> {
    /// Create a new service with the given repository.
    pub fn new(notes: Arc<N>) -> Self {
        Self { notes }
    }
}

fn note_not_found(note_id: &str) -> Error {
    Error::not_found(format!("note {note_id} not found"))
}

#[async_trait]
impl<N> NoteQuery for NoteService<N>
where
    N: NoteRepository,
{
    async fn list_notes(&self) -> Result<Vec<Note>, Error> {
        self.notes.list().await.map_err(map_note_error)
    }

    async fn list_notes_for_course(&self, course_id: &str) -> Result<Vec<Note>, Error> {
        self.notes
            .list_by_course(course_id)
            .await
            .map_err(map_note_error)
    }

    async fn fetch_note(&self, note_id: &str) -> Result<Note, Error> {
        self.notes
            .find_by_id(note_id)
            .await
            .map_err(map_note_error)?
            .ok_or_else(|| note_not_found(note_id))
    }
}

#[async_trait]
impl<N> NoteCommand for NoteService<N>
where
    N: NoteRepository,
{
    async fn create_note(&self, draft: NoteDraft) -> Result<Note, Error> {
        draft.validate()?;
        let note = self.notes.add(&draft).await.map_err(map_note_error)?;
        info!(note_id = %note.id, course_id = %note.course_id, "note created");
        Ok(note)
    }

    async fn update_note(&self, note_id: &str, changes: NoteChanges) -> Result<Note, Error> {
        if changes.course_id.is_some() || changes.created_at.is_some() {
            debug!(note_id, "ignoring immutable note fields in update");
        }
        let changes = changes.without_immutable_fields();
        changes.validate()?;

        self.notes
            .update(note_id, &changes)
            .await
            .map_err(map_note_error)?
            .ok_or_else(|| note_not_found(note_id))
    }

    async fn delete_note(&self, note_id: &str) -> Result<(), Error> {
        if self.notes.delete(note_id).await.map_err(map_note_error)? {
            Ok(())
        } else {
            Err(note_not_found(note_id))
        }
    }
}
