//! Report HTTP handler.
//!
//! ```text
//! GET /api/v1/reports/course-notes
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CourseNoteCount, CourseNoteReport};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Note count for one course.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = CourseNoteCount)]
pub struct CourseNoteCountResponse {
    pub course_id: String,
    pub course_title: String,
    pub note_count: usize,
}

/// Aggregate course and note counts.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = CourseNoteReport)]
pub struct CourseNoteReportResponse {
    pub total_courses: usize,
    pub total_notes: usize,
    pub notes_per_course: Vec<CourseNoteCountResponse>,
}

impl From<CourseNoteCount> for CourseNoteCountResponse {
    fn from(value: CourseNoteCount) -> Self {
        Self {
            course_id: value.course_id,
            course_title: value.course_title,
            note_count: value.note_count,
        }
    }
}

impl From<CourseNoteReport> for CourseNoteReportResponse {
    fn from(value: CourseNoteReport) -> Self {
        Self {
            total_courses: value.total_courses,
            total_notes: value.total_notes,
            notes_per_course: value
                .notes_per_course
                .into_iter()
                .map(CourseNoteCountResponse::from)
                .collect(),
        }
    }
}

/// Count courses and notes, with a per-course breakdown.
#[utoipa::path(
    get,
    path = "/api/v1/reports/course-notes",
    responses(
        (status = 200, description = "Course and note counts", body = CourseNoteReportResponse),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["Reports"],
    operation_id = "courseNoteReport"
)]
#[get("/reports/course-notes")]
pub async fn course_note_report(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<CourseNoteReportResponse>> {
    let report = state.reports.course_report().await?;
    Ok(web::Json(report.into()))
}
