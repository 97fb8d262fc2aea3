//! MongoDB-backed `NoteRepository` implementation.
//!
//! `createdAt` is stamped here from the injected clock, truncated to the
//! store's millisecond precision so the returned note matches later reads.
//! Listings are sorted newest first by the store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use mockable::Clock;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use tracing::error;

use crate::domain::ports::{NoteRepository, NoteRepositoryError};
use crate::domain::{Note, NoteChanges, NoteDraft};

use super::documents::{
    MappingError, course_filter, id_filter, newest_first, note_insert_document, note_set_document,
    to_note,
};
use super::id_guard::parse_object_id;
use super::store::{DocumentCollection, DocumentStore, NOTES_COLLECTION, StoreError};
use super::store_error_mapping::{FailureContext, map_mapping_error, map_store_error};

const READ_BACK_FAILED: &str = "inserted note could not be read back";

/// Note repository over the `notes` collection.
#[derive(Clone)]
pub struct MongoNoteRepository {
    collection: Arc<dyn DocumentCollection>,
    clock: Arc<dyn Clock>,
}

impl MongoNoteRepository {
    /// Create a repository over the given collection and clock.
    pub fn new(collection: Arc<dyn DocumentCollection>, clock: Arc<dyn Clock>) -> Self {
        Self { collection, clock }
    }

    /// Create a repository over the `notes` collection of `store`.
    pub fn from_store(store: &dyn DocumentStore, clock: Arc<dyn Clock>) -> Self {
        Self::new(store.collection(NOTES_COLLECTION), clock)
    }

    async fn fetch(
        &self,
        id: ObjectId,
        context: FailureContext<'_>,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        let document = self
            .collection
            .find_one(id_filter(id))
            .await
            .map_err(|err| store_failure(err, context))?;
        to_note(document).map_err(|err| mapping_failure(err, context))
    }

    async fn find_sorted(
        &self,
        filter: Document,
        context: FailureContext<'_>,
    ) -> Result<Vec<Note>, NoteRepositoryError> {
        let documents = self
            .collection
            .find(filter, Some(newest_first()))
            .await
            .map_err(|err| store_failure(err, context))?;
        documents
            .into_iter()
            .filter_map(|document| to_note(Some(document)).transpose())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| mapping_failure(err, context))
    }
}

fn store_failure(error: StoreError, context: FailureContext<'_>) -> NoteRepositoryError {
    map_store_error(
        error,
        context,
        NoteRepositoryError::connection,
        NoteRepositoryError::query,
    )
}

fn mapping_failure(error: MappingError, context: FailureContext<'_>) -> NoteRepositoryError {
    map_mapping_error(error, context, NoteRepositoryError::query)
}

#[async_trait]
impl NoteRepository for MongoNoteRepository {
    async fn list(&self) -> Result<Vec<Note>, NoteRepositoryError> {
        self.find_sorted(doc! {}, FailureContext::new("fetch notes"))
            .await
    }

    async fn list_by_course(&self, course_id: &str) -> Result<Vec<Note>, NoteRepositoryError> {
        self.find_sorted(
            course_filter(course_id),
            FailureContext::for_id("fetch notes for course", course_id),
        )
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Note>, NoteRepositoryError> {
        let Some(object_id) = parse_object_id(id, "find note") else {
            return Ok(None);
        };
        self.fetch(object_id, FailureContext::for_id("fetch note", id))
            .await
    }

    async fn add(&self, draft: &NoteDraft) -> Result<Note, NoteRepositoryError> {
        let context = FailureContext::new("add note");
        let created_at = self.clock.utc().trunc_subsecs(3);
        let inserted = self
            .collection
            .insert_one(note_insert_document(draft, created_at))
            .await
            .map_err(|err| store_failure(err, context))?;
        let Some(object_id) = inserted else {
            error!(course_id = %draft.course_id, "note insert returned no generated id");
            return Err(NoteRepositoryError::query(READ_BACK_FAILED));
        };

        let hex = object_id.to_hex();
        self.fetch(object_id, FailureContext::for_id("add note", &hex))
            .await?
            .ok_or_else(|| {
                error!(note_id = %hex, "inserted note missing on read back");
                NoteRepositoryError::query(READ_BACK_FAILED)
            })
    }

    async fn update(
        &self,
        id: &str,
        changes: &NoteChanges,
    ) -> Result<Option<Note>, NoteRepositoryError> {
        let Some(object_id) = parse_object_id(id, "update note") else {
            return Ok(None);
        };
        let context = FailureContext::for_id("update note", id);
        let Some(update) = note_set_document(changes) else {
            return self.fetch(object_id, context).await;
        };

        let document = self
            .collection
            .find_one_and_update(id_filter(object_id), update)
            .await
            .map_err(|err| store_failure(err, context))?;
        to_note(document).map_err(|err| mapping_failure(err, context))
    }

    async fn delete(&self, id: &str) -> Result<bool, NoteRepositoryError> {
        let Some(object_id) = parse_object_id(id, "delete note") else {
            return Ok(false);
        };
        let deleted = self
            .collection
            .delete_one(id_filter(object_id))
            .await
            .map_err(|err| store_failure(err, FailureContext::for_id("delete note", id)))?;
        Ok(deleted == 1)
    }

    async fn delete_by_course(&self, course_id: &str) -> Result<bool, NoteRepositoryError> {
        let deleted = self
            .collection
            .delete_many(course_filter(course_id))
            .await
            .map_err(|err| {
                store_failure(err, FailureContext::for_id("delete notes for course", course_id))
            })?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Store interaction coverage using a mocked collection and fixed clock.

    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::outbound::persistence::store::MockDocumentCollection;

    const NOTE_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f7";
    const COURSE_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_725_271_200, 123_456_789)
            .single()
            .expect("valid timestamp")
    }

    fn object_id() -> ObjectId {
        ObjectId::parse_str(NOTE_ID).expect("valid id")
    }

    fn stored_document(created_at: DateTime<Utc>) -> Document {
        let mut document =
            note_insert_document(&NoteDraft::new("Graphs", "Dijkstra relaxes", COURSE_ID), created_at);
        document.insert("_id", object_id());
        document
    }

    fn repository(collection: MockDocumentCollection, now: DateTime<Utc>) -> MongoNoteRepository {
        MongoNoteRepository::new(Arc::new(collection), Arc::new(FixedClock(now)))
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_identifiers_never_reach_the_store(now: DateTime<Utc>) {
        let mut collection = MockDocumentCollection::new();
        collection.expect_find_one().times(0);
        collection.expect_find_one_and_update().times(0);
        collection.expect_delete_one().times(0);
        let repo = repository(collection, now);

        let changes = NoteChanges {
            title: Some("Renamed".to_owned()),
            ..NoteChanges::default()
        };

        assert_eq!(repo.find_by_id("bad-id").await.expect("lookup"), None);
        assert_eq!(repo.update("bad-id", &changes).await.expect("update"), None);
        assert!(!repo.delete("bad-id").await.expect("delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn add_stamps_created_at_to_millisecond_precision(now: DateTime<Utc>) {
        let expected = now.trunc_subsecs(3);
        let mut collection = MockDocumentCollection::new();
        collection
            .expect_insert_one()
            .withf(move |document: &Document| {
                document
                    .get_datetime("createdAt")
                    .map(|stored| stored.timestamp_millis() == expected.timestamp_millis())
                    .unwrap_or(false)
            })
            .times(1)
            .return_once(|_| Ok(Some(object_id())));
        collection
            .expect_find_one()
            .times(1)
            .return_once(move |_| Ok(Some(stored_document(expected))));

        let note = repository(collection, now)
            .add(&NoteDraft::new("Graphs", "Dijkstra relaxes", COURSE_ID))
            .await
            .expect("added");

        assert_eq!(note.created_at, expected);
        assert_eq!(note.id, NOTE_ID);
    }

    #[rstest]
    #[tokio::test]
    async fn listings_request_newest_first(now: DateTime<Utc>) {
        let mut collection = MockDocumentCollection::new();
        collection
            .expect_find()
            .withf(|filter: &Document, sort: &Option<Document>| {
                filter.get_str("courseId").ok() == Some(COURSE_ID)
                    && sort.as_ref() == Some(&newest_first())
            })
            .times(1)
            .return_once(move |_, _| Ok(vec![stored_document(now.trunc_subsecs(3))]));

        let notes = repository(collection, now)
            .list_by_course(COURSE_ID)
            .await
            .expect("listed");

        assert_eq!(notes.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn update_with_only_immutable_fields_is_a_lookup(now: DateTime<Utc>) {
        let mut collection = MockDocumentCollection::new();
        collection.expect_find_one_and_update().times(0);
        collection
            .expect_find_one()
            .times(1)
            .return_once(move |_| Ok(Some(stored_document(now.trunc_subsecs(3)))));

        let changes = NoteChanges {
            course_id: Some("another-course".to_owned()),
            created_at: Some(Utc::now()),
            ..NoteChanges::default()
        };
        let note = repository(collection, now)
            .update(NOTE_ID, &changes)
            .await
            .expect("lookup")
            .expect("present");

        assert_eq!(note.course_id, COURSE_ID);
    }

    #[rstest]
    #[case(3, true)]
    #[case(0, false)]
    #[tokio::test]
    async fn delete_by_course_reports_any_removal(
        now: DateTime<Utc>,
        #[case] removed: u64,
        #[case] expected: bool,
    ) {
        let mut collection = MockDocumentCollection::new();
        collection
            .expect_delete_many()
            .withf(|filter: &Document| filter.get_str("courseId").ok() == Some(COURSE_ID))
            .times(1)
            .return_once(move |_| Ok(removed));

        let deleted = repository(collection, now)
            .delete_by_course(COURSE_ID)
            .await
            .expect("deleted");

        assert_eq!(deleted, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_failure_is_logged_and_wrapped(now: DateTime<Utc>) {
        let mut collection = MockDocumentCollection::new();
        collection
            .expect_insert_one()
            .times(1)
            .return_once(|_| Err(StoreError::operation("E11000 duplicate key")));

        let error = repository(collection, now)
            .add(&NoteDraft::new("Graphs", "Dijkstra relaxes", COURSE_ID))
            .await
            .expect_err("insert failed");

        assert_eq!(error, NoteRepositoryError::query("failed to add note"));
    }
}
