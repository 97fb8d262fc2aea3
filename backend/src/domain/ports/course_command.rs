//! Driving port for course mutations.
//!
//! Deleting a course also deletes its notes. The two deletions are separate
//! store operations, so a failure between them can leave orphaned notes.

use async_trait::async_trait;

use crate::domain::{Course, CourseChanges, CourseDraft, Error};

/// Domain use-case port for creating, editing, and deleting courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    /// Validate and store a new course.
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error>;

    /// Validate and apply a partial update.
    async fn update_course(&self, course_id: &str, changes: CourseChanges)
    -> Result<Course, Error>;

    /// Delete a course together with its notes.
    async fn delete_course(&self, course_id: &str) -> Result<(), Error>;
}

/// Fixture command that validates input without storing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseCommand;

#[async_trait]
impl CourseCommand for FixtureCourseCommand {
    async fn create_course(&self, draft: CourseDraft) -> Result<Course, Error> {
        draft.validate()?;
        Ok(Course {
            id: super::FIXTURE_ENTITY_ID.to_owned(),
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
        })
    }

    async fn update_course(
        &self,
        _course_id: &str,
        _changes: CourseChanges,
    ) -> Result<Course, Error> {
        Err(Error::not_found("course not found"))
    }

    async fn delete_course(&self, _course_id: &str) -> Result<(), Error> {
        Err(Error::not_found("course not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[tokio::test]
    async fn fixture_command_validates_drafts() {
        let command = FixtureCourseCommand;

        let error = command
            .create_course(CourseDraft::new("A", "CS core"))
            .await
            .expect_err("short title");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn fixture_command_creates_valid_drafts() {
        let command = FixtureCourseCommand;

        let course = command
            .create_course(CourseDraft::new("Algorithms", "CS core"))
            .await
            .expect("created");

        assert_eq!(course.title, "Algorithms");
    }
}
