//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("course missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("store down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn read_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should be absent"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("error JSON deserialises")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted_but_keep_trace_id(expected_trace_id: String) {
    let error = Error::internal("mongo cursor exploded")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"collection": "notes"}));

    let payload = read_error_response(
        error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn unavailable_store_message_is_replaced_but_keeps_trace_id(expected_trace_id: String) {
    let error = Error::service_unavailable(
        "course repository unavailable: Server selection timeout, Address: 127.0.0.1:1",
    )
    .with_trace_id(expected_trace_id.clone())
    .with_details(json!({"host": "127.0.0.1"}));

    let payload = read_error_response(
        error,
        StatusCode::SERVICE_UNAVAILABLE,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(payload.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(payload.message(), "Service unavailable");
    assert_eq!(payload.trace_id(), Some(expected_trace_id.as_str()));
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_field_details(expected_trace_id: String) {
    let error = Error::invalid_request("title must be at least 2 characters")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "title", "code": "too_short"}));

    let payload = read_error_response(
        error,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        payload.details(),
        Some(&json!({"field": "title", "code": "too_short"}))
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_header() {
    let payload = read_error_response(
        Error::not_found("note 65a1f0c2e4b0a1b2c3d4e5f7 not found"),
        StatusCode::NOT_FOUND,
        None,
    )
    .await;

    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}
