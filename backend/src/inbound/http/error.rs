//! HTTP rendering of CourseNote domain errors.
//!
//! Validation and not-found failures on courses and notes reach the client
//! verbatim, field details included. Store outages (`503`) and internal faults
//! (`500`) are rendered with a fixed message and no details; the original
//! message is logged here and the client keeps only the `traceId` to quote.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_for_client(error: &Error) -> Error {
    let redacted = match error.code() {
        ErrorCode::InternalError => {
            error!(trace_id = ?error.trace_id(), message = error.message(), "internal error");
            Error::internal("Internal server error")
        }
        ErrorCode::ServiceUnavailable => {
            warn!(trace_id = ?error.trace_id(), message = error.message(), "store unavailable");
            Error::service_unavailable("Service unavailable")
        }
        ErrorCode::InvalidRequest | ErrorCode::NotFound => return error.clone(),
    };
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_for_client(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

#[cfg(test)]
mod tests;
