//! Driving port for aggregate reports.

use async_trait::async_trait;

use crate::domain::{CourseNoteReport, Error};

/// Domain use-case port for the course and note report.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportQuery: Send + Sync {
    /// Build the course and note report from current data.
    async fn course_report(&self) -> Result<CourseNoteReport, Error>;
}

/// Fixture query returning an empty report.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReportQuery;

#[async_trait]
impl ReportQuery for FixtureReportQuery {
    async fn course_report(&self) -> Result<CourseNoteReport, Error> {
        Ok(CourseNoteReport::from_listings(&[], &[]))
    }
}
