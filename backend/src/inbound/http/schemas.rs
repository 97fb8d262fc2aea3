//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the serialised shape of their domain counterparts and
//! exist only for documentation.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested course or note does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The document store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "title must be at least 2 characters")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "4bf92f35-77b3-4da6-a3ce-929d0e0e4736")]
    trace_id: Option<String>,
    /// Supplementary error details, such as the offending field.
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    fn schemas_use_public_names() {
        assert_eq!(ErrorCodeSchema::name(), "ErrorCode");
        assert_eq!(ErrorSchema::name(), "Error");
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("not_found")]
    #[case("service_unavailable")]
    #[case("internal_error")]
    fn error_code_schema_lists_variant(#[case] variant: &str) {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        assert!(schema_json.contains(variant), "missing {variant}");
    }

    #[rstest]
    fn error_schema_uses_camel_case_trace_id() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }
}
