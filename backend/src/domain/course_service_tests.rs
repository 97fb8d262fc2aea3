//! Tests for the course catalogue service.

use std::sync::Arc;

use chrono::NaiveDate;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockCourseRepository, MockNoteRepository};

const COURSE_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

fn make_service(
    courses: MockCourseRepository,
    notes: MockNoteRepository,
) -> CourseCatalogueService<MockCourseRepository, MockNoteRepository> {
    CourseCatalogueService::new(Arc::new(courses), Arc::new(notes))
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn stored_course() -> Course {
    Course {
        id: COURSE_ID.to_owned(),
        title: "Algorithms".to_owned(),
        description: "CS core".to_owned(),
        start_date: Some(date(2024, 9, 1)),
        end_date: Some(date(2024, 12, 20)),
    }
}

#[tokio::test]
async fn fetch_maps_missing_course_to_not_found() {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .withf(|id: &str| id == COURSE_ID)
        .times(1)
        .return_once(|_| Ok(None));

    let service = make_service(courses, MockNoteRepository::new());
    let error = service.fetch_course(COURSE_ID).await.expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(CourseRepositoryError::connection("ping failed"), ErrorCode::ServiceUnavailable)]
#[case(CourseRepositoryError::query("failed to fetch courses"), ErrorCode::InternalError)]
#[tokio::test]
async fn list_maps_repository_failures(
    #[case] failure: CourseRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut courses = MockCourseRepository::new();
    courses.expect_list().times(1).return_once(move || Err(failure));

    let service = make_service(courses, MockNoteRepository::new());
    let error = service.list_courses().await.expect_err("failure");

    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn create_rejects_invalid_draft_without_touching_store() {
    let mut courses = MockCourseRepository::new();
    courses.expect_add().times(0);

    let service = make_service(courses, MockNoteRepository::new());
    let error = service
        .create_course(CourseDraft::new("Algorithms", "tiny"))
        .await
        .expect_err("invalid");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn create_stores_valid_draft() {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_add()
        .withf(|draft: &CourseDraft| draft.title == "Algorithms")
        .times(1)
        .return_once(|_| Ok(stored_course()));

    let service = make_service(courses, MockNoteRepository::new());
    let course = service
        .create_course(CourseDraft::new("Algorithms", "CS core"))
        .await
        .expect("created");

    assert_eq!(course.id, COURSE_ID);
}

#[tokio::test]
async fn update_checks_single_date_against_stored_range() {
    let mut courses = MockCourseRepository::new();
    courses
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_course())));
    courses.expect_update().times(0);

    let service = make_service(courses, MockNoteRepository::new());
    let changes = CourseChanges {
        end_date: Some(date(2024, 8, 1)),
        ..CourseChanges::default()
    };
    let error = service
        .update_course(COURSE_ID, changes)
        .await
        .expect_err("range inverted");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn update_without_dates_skips_lookup() {
    let mut courses = MockCourseRepository::new();
    courses.expect_find_by_id().times(0);
    courses.expect_update().times(1).return_once(|_, changes| {
        let mut course = stored_course();
        course.title = changes.title.clone().unwrap_or_default();
        Ok(Some(course))
    });

    let service = make_service(courses, MockNoteRepository::new());
    let changes = CourseChanges {
        title: Some("Advanced Algorithms".to_owned()),
        ..CourseChanges::default()
    };
    let course = service
        .update_course(COURSE_ID, changes)
        .await
        .expect("updated");

    assert_eq!(course.title, "Advanced Algorithms");
}

#[tokio::test]
async fn update_maps_unmatched_course_to_not_found() {
    let mut courses = MockCourseRepository::new();
    courses.expect_update().times(1).return_once(|_, _| Ok(None));

    let service = make_service(courses, MockNoteRepository::new());
    let changes = CourseChanges {
        description: Some("Updated syllabus".to_owned()),
        ..CourseChanges::default()
    };
    let error = service
        .update_course(COURSE_ID, changes)
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_removes_notes_before_course() {
    let mut sequence = mockall::Sequence::new();
    let mut courses = MockCourseRepository::new();
    let mut notes = MockNoteRepository::new();
    courses
        .expect_find_by_id()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_| Ok(Some(stored_course())));
    notes
        .expect_delete_by_course()
        .withf(|id: &str| id == COURSE_ID)
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_| Ok(true));
    courses
        .expect_delete()
        .withf(|id: &str| id == COURSE_ID)
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(|_| Ok(true));

    let service = make_service(courses, notes);
    service.delete_course(COURSE_ID).await.expect("deleted");
}

#[tokio::test]
async fn delete_of_unknown_course_leaves_notes_alone() {
    let mut courses = MockCourseRepository::new();
    let mut notes = MockNoteRepository::new();
    courses
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));
    courses.expect_delete().times(0);
    notes.expect_delete_by_course().times(0);

    let service = make_service(courses, notes);
    let error = service
        .delete_course("bad-id")
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_reports_course_failure_after_notes_removed() {
    let mut courses = MockCourseRepository::new();
    let mut notes = MockNoteRepository::new();
    courses
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(Some(stored_course())));
    notes
        .expect_delete_by_course()
        .times(1)
        .return_once(|_| Ok(true));
    courses
        .expect_delete()
        .times(1)
        .return_once(|_| Err(CourseRepositoryError::connection("socket closed")));

    let service = make_service(courses, notes);
    let error = service
        .delete_course(COURSE_ID)
        .await
        .expect_err("course delete failed");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
