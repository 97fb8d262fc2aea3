//! Translation between stored documents and domain entities.
//!
//! The stored shapes keep MongoDB's `_id` key and camelCase field names.
//! Calendar dates are stored as BSON datetimes at midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, DateTime as BsonDateTime, Document, doc};
use serde::Deserialize;

use crate::domain::{Course, CourseChanges, CourseDraft, Note, NoteChanges, NoteDraft};

/// Errors raised when a stored document does not fit the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// The document could not be decoded.
    #[error("malformed {collection} document: {message}")]
    Decode {
        collection: &'static str,
        message: String,
    },

    /// A stored datetime cannot be represented by `chrono`.
    #[error("stored {field} is outside the supported range")]
    OutOfRange { field: &'static str },
}

impl MappingError {
    fn decode(collection: &'static str, error: &bson::de::Error) -> Self {
        Self::Decode {
            collection,
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    start_date: Option<BsonDateTime>,
    #[serde(default)]
    end_date: Option<BsonDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    #[serde(default)]
    content: String,
    course_id: String,
    created_at: BsonDateTime,
}

fn date_to_bson(date: NaiveDate) -> BsonDateTime {
    BsonDateTime::from_millis(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

fn timestamp_to_bson(timestamp: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(timestamp.timestamp_millis())
}

fn bson_to_timestamp(
    value: BsonDateTime,
    field: &'static str,
) -> Result<DateTime<Utc>, MappingError> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
        .ok_or(MappingError::OutOfRange { field })
}

fn bson_to_date(
    value: Option<BsonDateTime>,
    field: &'static str,
) -> Result<Option<NaiveDate>, MappingError> {
    value
        .map(|stored| bson_to_timestamp(stored, field).map(|ts| ts.date_naive()))
        .transpose()
}

/// Project a stored course document into a [`Course`].
///
/// `None` in gives `None` out.
pub fn to_course(document: Option<Document>) -> Result<Option<Course>, MappingError> {
    let Some(document) = document else {
        return Ok(None);
    };
    let stored: CourseDocument =
        bson::from_document(document).map_err(|err| MappingError::decode("course", &err))?;
    Ok(Some(Course {
        id: stored.id.to_hex(),
        title: stored.title,
        description: stored.description,
        start_date: bson_to_date(stored.start_date, "startDate")?,
        end_date: bson_to_date(stored.end_date, "endDate")?,
    }))
}

/// Project a stored note document into a [`Note`].
///
/// `None` in gives `None` out.
pub fn to_note(document: Option<Document>) -> Result<Option<Note>, MappingError> {
    let Some(document) = document else {
        return Ok(None);
    };
    let stored: NoteDocument =
        bson::from_document(document).map_err(|err| MappingError::decode("note", &err))?;
    Ok(Some(Note {
        id: stored.id.to_hex(),
        title: stored.title,
        content: stored.content,
        course_id: stored.course_id,
        created_at: bson_to_timestamp(stored.created_at, "createdAt")?,
    }))
}

/// Document inserted for a new course. Absent dates are omitted.
pub fn course_insert_document(draft: &CourseDraft) -> Document {
    let mut document = doc! {
        "title": draft.title.as_str(),
        "description": draft.description.as_str(),
    };
    if let Some(start) = draft.start_date {
        document.insert("startDate", date_to_bson(start));
    }
    if let Some(end) = draft.end_date {
        document.insert("endDate", date_to_bson(end));
    }
    document
}

/// Document inserted for a new note stamped with `created_at`.
pub fn note_insert_document(draft: &NoteDraft, created_at: DateTime<Utc>) -> Document {
    doc! {
        "title": draft.title.as_str(),
        "content": draft.content.as_str(),
        "courseId": draft.course_id.as_str(),
        "createdAt": timestamp_to_bson(created_at),
    }
}

fn wrap_set(fields: Document) -> Option<Document> {
    if fields.is_empty() {
        None
    } else {
        Some(doc! { "$set": fields })
    }
}

/// `$set` update for the supplied course fields; `None` when nothing was
/// supplied.
pub fn course_set_document(changes: &CourseChanges) -> Option<Document> {
    let mut fields = Document::new();
    if let Some(title) = &changes.title {
        fields.insert("title", title.as_str());
    }
    if let Some(description) = &changes.description {
        fields.insert("description", description.as_str());
    }
    if let Some(start) = changes.start_date {
        fields.insert("startDate", date_to_bson(start));
    }
    if let Some(end) = changes.end_date {
        fields.insert("endDate", date_to_bson(end));
    }
    wrap_set(fields)
}

/// `$set` update for the supplied note fields.
///
/// `courseId` and `createdAt` are never emitted, whatever `changes` holds.
pub fn note_set_document(changes: &NoteChanges) -> Option<Document> {
    let mut fields = Document::new();
    if let Some(title) = &changes.title {
        fields.insert("title", title.as_str());
    }
    if let Some(content) = &changes.content {
        fields.insert("content", content.as_str());
    }
    wrap_set(fields)
}

/// Primary-key filter.
pub fn id_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Filter matching notes owned by `course_id`.
pub fn course_filter(course_id: &str) -> Document {
    doc! { "courseId": course_id }
}

/// Sort placing the newest note first.
pub fn newest_first() -> Document {
    doc! { "createdAt": -1 }
}
