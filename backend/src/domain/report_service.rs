//! Report domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::course_service::{map_course_error, map_note_error};
use crate::domain::ports::{CourseRepository, NoteRepository, ReportQuery};
use crate::domain::{CourseNoteReport, Error};

/// Builds [`CourseNoteReport`] values from the full course and note listings.
#[derive(Clone)]
pub struct ReportService<C, N> {
    courses: Arc<C>,
    notes: Arc<N>,
}

impl<C, N> ReportService<C, N> {
    /// Create a new service with the given repositories.
    pub fn new(courses: Arc<C>, notes: Arc<N>) -> Self {
        Self { courses, notes }
    }
}

#[async_trait]
impl<C, N> ReportQuery for ReportService<C, N>
where
    C: CourseRepository,
    N: NoteRepository,
{
    async fn course_report(&self) -> Result<CourseNoteReport, Error> {
        let courses = self.courses.list().await.map_err(map_course_error)?;
        let notes = self.notes.list().await.map_err(map_note_error)?;
        Ok(CourseNoteReport::from_listings(&courses, &notes))
    }
}
