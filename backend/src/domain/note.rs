//! Note data model and input validation.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::Error;

/// Minimum number of characters in a note title.
pub const NOTE_TITLE_MIN: usize = 2;
/// Minimum number of characters in note content.
pub const NOTE_CONTENT_MIN: usize = 5;

/// Validation errors raised for note input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    TitleTooShort { min: usize },
    ContentTooShort { min: usize },
    MissingCourseId,
}

impl NoteValidationError {
    /// Request field the failure refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::TitleTooShort { .. } => "title",
            Self::ContentTooShort { .. } => "content",
            Self::MissingCourseId => "courseId",
        }
    }

    /// Machine-readable reason code.
    pub fn code(self) -> &'static str {
        match self {
            Self::TitleTooShort { .. } | Self::ContentTooShort { .. } => "too_short",
            Self::MissingCourseId => "missing_field",
        }
    }
}

impl fmt::Display for NoteValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleTooShort { min } => write!(f, "note title must be at least {min} characters"),
            Self::ContentTooShort { min } => {
                write!(f, "note content must be at least {min} characters")
            }
            Self::MissingCourseId => write!(f, "a note must belong to a course"),
        }
    }
}

impl std::error::Error for NoteValidationError {}

impl From<NoteValidationError> for Error {
    fn from(value: NoteValidationError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// A stored note.
///
/// `course_id` references a course by its string identifier. The store does
/// not check that the course exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub course_id: String,
    /// Assigned by the repository on insert; never changes afterwards.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a note. The creation timestamp is not part of the
/// draft; the repository stamps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub course_id: String,
}

impl NoteDraft {
    /// Create a draft for the given course.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        course_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            course_id: course_id.into(),
        }
    }

    /// Check the draft against the note input rules.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        validate_title(&self.title)?;
        validate_content(&self.content)?;
        if self.course_id.trim().is_empty() {
            return Err(NoteValidationError::MissingCourseId);
        }
        Ok(())
    }
}

/// Partial update for a note.
///
/// `course_id` and `created_at` may arrive from callers but are immutable:
/// persistence adapters drop them before building the update.
///
/// # Examples
/// ```
/// use coursenote::domain::NoteChanges;
///
/// let changes = NoteChanges {
///     title: Some("Graph search".into()),
///     course_id: Some("65a1f0c2e4b0a1b2c3d4e5f6".into()),
///     ..NoteChanges::default()
/// };
/// let mutable = changes.without_immutable_fields();
/// assert!(mutable.course_id.is_none());
/// assert_eq!(mutable.title.as_deref(), Some("Graph search"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub course_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl NoteChanges {
    /// Drop the fields that cannot change after creation.
    pub fn without_immutable_fields(self) -> Self {
        Self {
            course_id: None,
            created_at: None,
            ..self
        }
    }

    /// True when no mutable field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Check supplied mutable fields against the note input rules.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), NoteValidationError> {
    if title.trim().chars().count() < NOTE_TITLE_MIN {
        return Err(NoteValidationError::TitleTooShort {
            min: NOTE_TITLE_MIN,
        });
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), NoteValidationError> {
    if content.trim().chars().count() < NOTE_CONTENT_MIN {
        return Err(NoteValidationError::ContentTooShort {
            min: NOTE_CONTENT_MIN,
        });
    }
    Ok(())
}
