//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CourseCommand, CourseQuery, FixtureCourseCommand, FixtureCourseQuery, FixtureNoteCommand,
    FixtureNoteQuery, FixtureReportQuery, NoteCommand, NoteQuery, ReportQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub courses: Arc<dyn CourseCommand>,
    pub courses_query: Arc<dyn CourseQuery>,
    pub notes: Arc<dyn NoteCommand>,
    pub notes_query: Arc<dyn NoteQuery>,
    pub reports: Arc<dyn ReportQuery>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use coursenote::domain::ports::{
    ///     FixtureCourseCommand, FixtureCourseQuery, FixtureNoteCommand, FixtureNoteQuery,
    ///     FixtureReportQuery,
    /// };
    /// use coursenote::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureCourseCommand),
    ///     Arc::new(FixtureCourseQuery),
    ///     Arc::new(FixtureNoteCommand),
    ///     Arc::new(FixtureNoteQuery),
    ///     Arc::new(FixtureReportQuery),
    /// );
    /// let _reports = state.reports.clone();
    /// ```
    pub fn new(
        courses: Arc<dyn CourseCommand>,
        courses_query: Arc<dyn CourseQuery>,
        notes: Arc<dyn NoteCommand>,
        notes_query: Arc<dyn NoteQuery>,
        reports: Arc<dyn ReportQuery>,
    ) -> Self {
        Self {
            courses,
            courses_query,
            notes,
            notes_query,
            reports,
        }
    }

    /// State backed entirely by fixture ports.
    pub fn fixture() -> Self {
        Self::new(
            Arc::new(FixtureCourseCommand),
            Arc::new(FixtureCourseQuery),
            Arc::new(FixtureNoteCommand),
            Arc::new(FixtureNoteQuery),
            Arc::new(FixtureReportQuery),
        )
    }
}
