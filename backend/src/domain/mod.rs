//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the course and note entities, their input rules, and the
//! services implementing the driving ports. Types here are free of HTTP and
//! MongoDB concerns; adapters translate at the boundary.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - TraceId — request correlation identifier.
//! - Course / CourseDraft / CourseChanges — course entity and inputs.
//! - Note / NoteDraft / NoteChanges — note entity and inputs.
//! - CourseNoteReport — aggregate counts.
//! - CourseCatalogueService / NoteService / ReportService — use-cases.

pub mod course;
mod course_service;
pub mod error;
pub mod note;
mod note_service;
pub mod ports;
pub mod report;
mod report_service;
pub mod trace_id;

pub use self::course::{Course, CourseChanges, CourseDraft, CourseValidationError};
pub use self::course_service::CourseCatalogueService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::note::{Note, NoteChanges, NoteDraft, NoteValidationError};
pub use self::note_service::NoteService;
pub use self::report::{CourseNoteCount, CourseNoteReport};
pub use self::report_service::ReportService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
