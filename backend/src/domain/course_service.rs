//! Course catalogue domain service.
//!
//! Implements the course driving ports on top of the course and note
//! repositories. Deleting a course cascades to its notes; see
//! [`CourseCommand::delete_course`] for the ordering.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    CourseCommand, CourseQuery, CourseRepository, CourseRepositoryError, NoteRepository,
    NoteRepositoryError,
};
use crate::domain::{Course, CourseChanges, CourseDraft, Error};

/// Course service implementing [`CourseQuery`] and [`CourseCommand`].
#[derive(Clone)]
pub struct CourseCatalogueService<C, N> {
    courses: Arc<C>,
    notes: Arc<N>,
}

impl<C, N> CourseCatalogueService<C, N> {
    /// Create a new service with the given repositories.
    pub fn new(courses: Arc<C>, notes: Arc<N>) -> Self {
        Self { courses, notes }
    }
}

pub(crate) fn map_course_error(error: CourseRepositoryError) -> Error {
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
    }
}

pub(crate) fn map_note_error(error: NoteRepositoryError) -> Error {
    match error {
        NoteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("note repository unavailable: {message}"))
        }
        NoteRepositoryError::Query { message } => {
            Error::internal(format!("note repository error: {message}"))
        }
    }
}

fn course_not_found(course_id: &str) -> Error {
    Error::not_found(format!("course {course_id} not found"))
}

#[async_trait]
impl<C, N> CourseQuery for CourseCatalogueService<C, N>
where
    C: CourseRepository,
    N: NoteRepository,
{
    async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        self.courses.list().await.map_err(map_course_error)
    }

    async fn fetch_course(&self, course_id: &str) -> Result<Course, Error> {
        self.courses
            .find_by_id(course_id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| course_not_found(course_id))
    }
}

#[async_trait]
impl<C, N> CourseCommand for CourseCatalogueService<C, N>
where
    C: CourseRepository,
    N: NoteRepository,
{
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error> {
        draft.validate()?;
        let course = self.courses.add(&draft).await.map_err(map_course_error)?;
        info!(course_id = %course.id, "course created");
        Ok(course)
    }

    async fn update_course(
        &self,
        course_id: &str,
        changes: CourseChanges,
    ) -> Result<Course, Error> {
        let current = if changes.touches_dates() {
            Some(self.fetch_course(course_id).await?)
        } else {
            None
        };
        changes.validate(current.as_ref())?;

        self.courses
            .update(course_id, &changes)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| course_not_found(course_id))
    }

    /// Notes go first, then the course. A failure after the notes are gone
    /// leaves the course in place with no notes; nothing is rolled back.
    async fn delete_course(&self, course_id: &str) -> Result<(), Error> {
        let course = self.fetch_course(course_id).await?;

        let removed_notes = self
            .notes
            .delete_by_course(&course.id)
            .await
            .map_err(map_note_error)?;

        match self.courses.delete(&course.id).await {
            Ok(true) => {
                info!(course_id = %course.id, removed_notes, "course deleted");
                Ok(())
            }
            Ok(false) => Err(course_not_found(course_id)),
            Err(error) => {
                warn!(
                    course_id = %course.id,
                    removed_notes,
                    %error,
                    "course delete failed after its notes were removed"
                );
                Err(map_course_error(error))
            }
        }
    }
}

#[cfg(test)]
#[path = "course_service_tests.rs"]
mod tests;
