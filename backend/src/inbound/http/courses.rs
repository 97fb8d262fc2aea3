//! Course HTTP handlers.
//!
//! ```text
//! GET    /api/v1/courses
//! POST   /api/v1/courses
//! GET    /api/v1/courses/{courseId}
//! PUT    /api/v1/courses/{courseId}
//! DELETE /api/v1/courses/{courseId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Course, CourseChanges, CourseDraft, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_date, require};

const TITLE: FieldName = FieldName::new("title");
const DESCRIPTION: FieldName = FieldName::new("description");
const START_DATE: FieldName = FieldName::new("startDate");
const END_DATE: FieldName = FieldName::new("endDate");

/// Request payload for creating a course.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = CourseInput)]
pub struct CourseRequest {
    #[schema(example = "Algorithms")]
    pub title: Option<String>,
    #[schema(example = "Core computer science course")]
    pub description: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[schema(example = "2024-09-01")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[schema(example = "2024-12-20")]
    pub end_date: Option<String>,
}

/// Request payload for a partial course update. Omitted fields are kept.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = CourseUpdate)]
pub struct CourseUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Course as returned by the API.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Course)]
pub struct CourseResponse {
    #[schema(example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: String,
    pub title: String,
    pub description: String,
    #[schema(value_type = Option<String>, format = Date, example = "2024-09-01")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date, example = "2024-12-20")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl From<Course> for CourseResponse {
    fn from(value: Course) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            start_date: value.start_date,
            end_date: value.end_date,
        }
    }
}

fn parse_course_request(payload: CourseRequest) -> Result<CourseDraft, Error> {
    let title = require(payload.title, TITLE)?;
    let description = require(payload.description, DESCRIPTION)?;
    Ok(CourseDraft::new(title, description).with_dates(
        parse_optional_date(payload.start_date, START_DATE)?,
        parse_optional_date(payload.end_date, END_DATE)?,
    ))
}

fn parse_course_update(payload: CourseUpdateRequest) -> Result<CourseChanges, Error> {
    Ok(CourseChanges {
        title: payload.title,
        description: payload.description,
        start_date: parse_optional_date(payload.start_date, START_DATE)?,
        end_date: parse_optional_date(payload.end_date, END_DATE)?,
    })
}

/// List every course.
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (status = 200, description = "All courses", body = [CourseResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["Courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let courses = state.courses_query.list_courses().await?;
    Ok(web::Json(
        courses.into_iter().map(CourseResponse::from).collect(),
    ))
}

/// Create a course.
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["Courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_course_request(payload.into_inner())?;
    let course = state.courses.create_course(draft).await?;
    Ok(HttpResponse::Created().json(CourseResponse::from(course)))
}

/// Fetch one course.
#[utoipa::path(
    get,
    path = "/api/v1/courses/{courseId}",
    params(("courseId" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["Courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{courseId}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<CourseResponse>> {
    let course = state.courses_query.fetch_course(&path.into_inner()).await?;
    Ok(web::Json(CourseResponse::from(course)))
}

/// Update the supplied fields of a course.
#[utoipa::path(
    put,
    path = "/api/v1/courses/{courseId}",
    params(("courseId" = String, Path, description = "Course identifier")),
    request_body = CourseUpdateRequest,
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["Courses"],
    operation_id = "updateCourse"
)]
#[put("/courses/{courseId}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CourseUpdateRequest>,
) -> ApiResult<web::Json<CourseResponse>> {
    let changes = parse_course_update(payload.into_inner())?;
    let course = state
        .courses
        .update_course(&path.into_inner(), changes)
        .await?;
    Ok(web::Json(CourseResponse::from(course)))
}

/// Delete a course together with its notes.
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{courseId}",
    params(("courseId" = String, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Course and its notes deleted"),
        (status = 404, description = "Course not found", body = ErrorSchema)
    ),
    tags = ["Courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{courseId}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.courses.delete_course(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
