//! Note HTTP handlers.
//!
//! ```text
//! GET    /api/v1/notes
//! POST   /api/v1/notes
//! GET    /api/v1/notes/{noteId}
//! PUT    /api/v1/notes/{noteId}
//! DELETE /api/v1/notes/{noteId}
//! GET    /api/v1/courses/{courseId}/notes
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Note, NoteChanges, NoteDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require};

const TITLE: FieldName = FieldName::new("title");
const CONTENT: FieldName = FieldName::new("content");
const COURSE_ID: FieldName = FieldName::new("courseId");

/// Request payload for creating a note.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = NoteInput)]
pub struct NoteRequest {
    #[schema(example = "Dijkstra")]
    pub title: Option<String>,
    #[schema(example = "Shortest paths with non-negative weights")]
    pub content: Option<String>,
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub course_id: Option<String>,
}

/// Request payload for a partial note update.
///
/// `courseId` and `createdAt` are accepted so clients can send a whole note
/// back, but they never change the stored note.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = NoteUpdate)]
pub struct NoteUpdateRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub course_id: Option<String>,
    #[schema(format = DateTime)]
    pub created_at: Option<String>,
}

/// Note as returned by the API.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Note)]
pub struct NoteResponse {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f7")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub course_id: String,
    /// RFC 3339 timestamp with millisecond precision.
    #[schema(format = DateTime, example = "2024-09-02T10:15:00.000Z")]
    pub created_at: String,
}

impl From<Note> for NoteResponse {
    fn from(value: Note) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
            course_id: value.course_id,
            created_at: value.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

fn parse_note_request(payload: NoteRequest) -> Result<NoteDraft, Error> {
    Ok(NoteDraft::new(
        require(payload.title, TITLE)?,
        require(payload.content, CONTENT)?,
        require(payload.course_id, COURSE_ID)?,
    ))
}

fn parse_note_update(payload: NoteUpdateRequest) -> NoteChanges {
    NoteChanges {
        title: payload.title,
        content: payload.content,
        course_id: payload.course_id,
        created_at: payload
            .created_at
            .and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
            .map(|timestamp| timestamp.with_timezone(&Utc)),
    }
}

fn to_responses(notes: Vec<Note>) -> Vec<NoteResponse> {
    notes.into_iter().map(NoteResponse::from).collect()
}

/// List every note, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/notes",
    responses(
        (status = 200, description = "All notes, newest first", body = [NoteResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["Notes"],
    operation_id = "listNotes"
)]
#[get("/notes")]
pub async fn list_notes(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<NoteResponse>>> {
    let notes = state.notes_query.list_notes().await?;
    Ok(web::Json(to_responses(notes)))
}

/// List the notes of one course, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{courseId}/notes",
    params(("courseId" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Notes of the course, newest first", body = [NoteResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["Notes"],
    operation_id = "listCourseNotes"
)]
#[get("/courses/{courseId}/notes")]
pub async fn list_course_notes(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<NoteResponse>>> {
    let notes = state
        .notes_query
        .list_notes_for_course(&path.into_inner())
        .await?;
    Ok(web::Json(to_responses(notes)))
}

/// Create a note.
#[utoipa::path(
    post,
    path = "/api/v1/notes",
    request_body = NoteRequest,
    responses(
        (status = 201, description = "Note created", body = NoteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["Notes"],
    operation_id = "createNote"
)]
#[post("/notes")]
pub async fn create_note(
    state: web::Data<HttpState>,
    payload: web::Json<NoteRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_note_request(payload.into_inner())?;
    let note = state.notes.create_note(draft).await?;
    Ok(HttpResponse::Created().json(NoteResponse::from(note)))
}

/// Fetch one note.
#[utoipa::path(
    get,
    path = "/api/v1/notes/{noteId}",
    params(("noteId" = String, Path, description = "Note identifier")),
    responses(
        (status = 200, description = "Note", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorSchema)
    ),
    tags = ["Notes"],
    operation_id = "getNote"
)]
#[get("/notes/{noteId}")]
pub async fn get_note(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<NoteResponse>> {
    let note = state.notes_query.fetch_note(&path.into_inner()).await?;
    Ok(web::Json(NoteResponse::from(note)))
}

/// Update the title or content of a note.
#[utoipa::path(
    put,
    path = "/api/v1/notes/{noteId}",
    params(("noteId" = String, Path, description = "Note identifier")),
    request_body = NoteUpdateRequest,
    responses(
        (status = 200, description = "Updated note", body = NoteResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Note not found", body = ErrorSchema)
    ),
    tags = ["Notes"],
    operation_id = "updateNote"
)]
#[put("/notes/{noteId}")]
pub async fn update_note(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<NoteUpdateRequest>,
) -> ApiResult<web::Json<NoteResponse>> {
    let changes = parse_note_update(payload.into_inner());
    let note = state
        .notes
        .update_note(&path.into_inner(), changes)
        .await?;
    Ok(web::Json(NoteResponse::from(note)))
}

/// Delete one note.
#[utoipa::path(
    delete,
    path = "/api/v1/notes/{noteId}",
    params(("noteId" = String, Path, description = "Note identifier")),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 404, description = "Note not found", body = ErrorSchema)
    ),
    tags = ["Notes"],
    operation_id = "deleteNote"
)]
#[delete("/notes/{noteId}")]
pub async fn delete_note(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.notes.delete_note(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;
