//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by persistence adapters.
//! Driving ports (`*Command`, `*Query`) are implemented by domain services and
//! consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod course_command;
mod course_query;
mod course_repository;
mod note_command;
mod note_query;
mod note_repository;
mod report_query;

#[cfg(test)]
pub use course_command::MockCourseCommand;
pub use course_command::{CourseCommand, FixtureCourseCommand};
#[cfg(test)]
pub use course_query::MockCourseQuery;
pub use course_query::{CourseQuery, FixtureCourseQuery};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{
    CourseRepository, CourseRepositoryError, FIXTURE_ENTITY_ID, FixtureCourseRepository,
};
#[cfg(test)]
pub use note_command::MockNoteCommand;
pub use note_command::{FixtureNoteCommand, NoteCommand};
#[cfg(test)]
pub use note_query::MockNoteQuery;
pub use note_query::{FixtureNoteQuery, NoteQuery};
#[cfg(test)]
pub use note_repository::MockNoteRepository;
pub use note_repository::{FixtureNoteRepository, NoteRepository, NoteRepositoryError};
#[cfg(test)]
pub use report_query::MockReportQuery;
pub use report_query::{FixtureReportQuery, ReportQuery};
