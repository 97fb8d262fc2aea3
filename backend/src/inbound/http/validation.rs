//! Shared validation helpers for inbound HTTP adapters.

use chrono::{DateTime, NaiveDate};
use serde_json::json;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidDate,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidDate => "invalid_date",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_date_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!(
        "{field} must be a YYYY-MM-DD date or an RFC 3339 timestamp"
    ))
    .with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidDate.as_str(),
    }))
}

/// Require a field that the request schema marks optional.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose UTC calendar date is
/// taken. Blank values count as absent.
pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| Some(timestamp.naive_utc().date()))
        .map_err(|_| invalid_date_error(field, trimmed))
}
