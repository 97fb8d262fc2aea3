//! Course data model and input validation.
//!
//! A course is the organisational unit notes attach to. The persistent store
//! owns every course; these types only carry data between adapters.

use std::fmt;

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::Error;

/// Minimum number of characters in a course title.
pub const COURSE_TITLE_MIN: usize = 2;
/// Minimum number of characters in a course description.
pub const COURSE_DESCRIPTION_MIN: usize = 5;
/// Maximum number of characters in a course description.
pub const COURSE_DESCRIPTION_MAX: usize = 500;

/// Validation errors raised for course input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseValidationError {
    TitleTooShort { min: usize },
    DescriptionTooShort { min: usize },
    DescriptionTooLong { max: usize },
    EndsBeforeStart,
}

impl CourseValidationError {
    /// Request field the failure refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::TitleTooShort { .. } => "title",
            Self::DescriptionTooShort { .. } | Self::DescriptionTooLong { .. } => "description",
            Self::EndsBeforeStart => "endDate",
        }
    }

    /// Machine-readable reason code.
    pub fn code(self) -> &'static str {
        match self {
            Self::TitleTooShort { .. } | Self::DescriptionTooShort { .. } => "too_short",
            Self::DescriptionTooLong { .. } => "too_long",
            Self::EndsBeforeStart => "ends_before_start",
        }
    }
}

impl fmt::Display for CourseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleTooShort { min } => {
                write!(f, "course title must be at least {min} characters")
            }
            Self::DescriptionTooShort { min } => {
                write!(f, "course description must be at least {min} characters")
            }
            Self::DescriptionTooLong { max } => {
                write!(f, "course description must be at most {max} characters")
            }
            Self::EndsBeforeStart => write!(f, "end date cannot be before start date"),
        }
    }
}

impl std::error::Error for CourseValidationError {}

impl From<CourseValidationError> for Error {
    fn from(value: CourseValidationError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// A stored course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// String form of the store-generated identifier.
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Input for creating a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CourseDraft {
    /// Create a draft without dates.
    ///
    /// # Examples
    /// ```
    /// use coursenote::domain::CourseDraft;
    ///
    /// let draft = CourseDraft::new("Algorithms", "CS core");
    /// assert!(draft.validate().is_ok());
    /// assert!(draft.start_date.is_none());
    /// ```
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            start_date: None,
            end_date: None,
        }
    }

    /// Attach a date range to the draft.
    pub fn with_dates(mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    /// Check the draft against the course input rules.
    pub fn validate(&self) -> Result<(), CourseValidationError> {
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        validate_date_order(self.start_date, self.end_date)
    }
}

/// Partial update for a course; only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CourseChanges {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// True when either date is supplied.
    pub fn touches_dates(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Check supplied fields against the course input rules.
    ///
    /// `current` supplies the stored dates so a change to one end of the
    /// range is checked against the other.
    pub fn validate(&self, current: Option<&Course>) -> Result<(), CourseValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        let start_date = self
            .start_date
            .or_else(|| current.and_then(|course| course.start_date));
        let end_date = self
            .end_date
            .or_else(|| current.and_then(|course| course.end_date));
        validate_date_order(start_date, end_date)
    }
}

fn validate_title(title: &str) -> Result<(), CourseValidationError> {
    if title.trim().chars().count() < COURSE_TITLE_MIN {
        return Err(CourseValidationError::TitleTooShort {
            min: COURSE_TITLE_MIN,
        });
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), CourseValidationError> {
    let length = description.trim().chars().count();
    if length < COURSE_DESCRIPTION_MIN {
        return Err(CourseValidationError::DescriptionTooShort {
            min: COURSE_DESCRIPTION_MIN,
        });
    }
    if length > COURSE_DESCRIPTION_MAX {
        return Err(CourseValidationError::DescriptionTooLong {
            max: COURSE_DESCRIPTION_MAX,
        });
    }
    Ok(())
}

fn validate_date_order(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), CourseValidationError> {
    match (start_date, end_date) {
        (Some(start), Some(end)) if end < start => Err(CourseValidationError::EndsBeforeStart),
        _ => Ok(()),
    }
}
