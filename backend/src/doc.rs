//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every course, note, report, and health endpoint of
//! the inbound layer together with their request and response schemas. The
//! document backs Swagger UI (debug builds) and is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::courses::{CourseRequest, CourseResponse, CourseUpdateRequest};
use crate::inbound::http::notes::{NoteRequest, NoteResponse, NoteUpdateRequest};
use crate::inbound::http::reports::{CourseNoteCountResponse, CourseNoteReportResponse};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CourseNote API",
        version = "1.0.0",
        description = "Manage courses and the notes attached to them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::courses::update_course,
        crate::inbound::http::courses::delete_course,
        crate::inbound::http::notes::list_course_notes,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::create_note,
        crate::inbound::http::notes::get_note,
        crate::inbound::http::notes::update_note,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::reports::course_note_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CourseResponse,
        CourseRequest,
        CourseUpdateRequest,
        NoteResponse,
        NoteRequest,
        NoteUpdateRequest,
        CourseNoteReportResponse,
        CourseNoteCountResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "Courses", description = "Course catalogue"),
        (name = "Notes", description = "Notes attached to courses"),
        (name = "Reports", description = "Aggregate counts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
