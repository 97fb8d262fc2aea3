//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and for the `test-support` feature only.

pub mod document_store;

pub use document_store::InMemoryDocumentStore;

pub mod http {
    //! Handler state wired to real services over any document store.

    use std::sync::Arc;

    use mockable::Clock;

    use crate::domain::{CourseCatalogueService, NoteService, ReportService};
    use crate::inbound::http::state::HttpState;
    use crate::outbound::persistence::{DocumentStore, MongoCourseRepository, MongoNoteRepository};

    /// Build the production service graph over `store`, stamping notes with
    /// `clock`.
    pub fn http_state(store: &dyn DocumentStore, clock: Arc<dyn Clock>) -> HttpState {
        let courses = Arc::new(MongoCourseRepository::from_store(store));
        let notes = Arc::new(MongoNoteRepository::from_store(store, clock));
        let catalogue = Arc::new(CourseCatalogueService::new(
            Arc::clone(&courses),
            Arc::clone(&notes),
        ));
        let note_service = Arc::new(NoteService::new(Arc::clone(&notes)));
        HttpState::new(
            catalogue.clone(),
            catalogue,
            note_service.clone(),
            note_service,
            Arc::new(ReportService::new(courses, notes)),
        )
    }
}

pub mod clock {
    //! Settable clock for note timestamp tests.

    use std::sync::{Mutex, MutexGuard};

    use chrono::{DateTime, Local, TimeDelta, Utc};
    use mockable::Clock;

    /// Clock that only moves when told to.
    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        /// Start the clock at `now`.
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        /// Move the clock forward by `seconds`.
        pub fn advance_seconds(&self, seconds: i64) {
            *self.lock_clock() += TimeDelta::seconds(seconds);
        }

        /// Jump to an absolute instant.
        pub fn set(&self, now: DateTime<Utc>) {
            *self.lock_clock() = now;
        }

        fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod openapi {
    //! Helpers for walking utoipa schemas in assertions.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::{Object, Schema};

    /// Return the `Object` behind `schema`, panicking with the schema name if
    /// it is a reference or a combinator.
    pub fn unwrap_object_schema<'a>(schema: &'a RefOr<Schema>, name: &str) -> &'a Object {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj,
            RefOr::Ref(reference) => panic!(
                "schema '{name}' is a $ref to '{}'",
                reference.ref_location
            ),
            _ => panic!("schema '{name}' is not an object"),
        }
    }

    /// Property `field` of `obj`; panics when absent.
    pub fn get_property<'a>(obj: &'a Object, field: &str) -> &'a RefOr<Schema> {
        match obj.properties.get(field) {
            Some(property) => property,
            None => panic!("property '{field}' not found"),
        }
    }
}
