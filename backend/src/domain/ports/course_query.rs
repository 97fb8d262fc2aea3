//! Driving port for reading courses.

use async_trait::async_trait;

use crate::domain::{Course, Error};

/// Domain use-case port for course reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// List every course.
    async fn list_courses(&self) -> Result<Vec<Course>, Error>;

    /// Fetch one course, failing with `not_found` when it does not exist.
    async fn fetch_course(&self, course_id: &str) -> Result<Course, Error>;
}

/// Fixture query backed by an empty catalogue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureCourseQuery;

#[async_trait]
impl CourseQuery for FixtureCourseQuery {
    async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        Ok(Vec::new())
    }

    async fn fetch_course(&self, _course_id: &str) -> Result<Course, Error> {
        Err(Error::not_found("course not found"))
    }
}
