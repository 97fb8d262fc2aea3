//! Wiring from the MongoDB connection to the HTTP handler state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use coursenote::domain::{CourseCatalogueService, NoteService, ReportService};
use coursenote::inbound::http::state::HttpState;
use coursenote::outbound::persistence::{
    MongoConnection, MongoCourseRepository, MongoDocumentStore, MongoNoteRepository,
};

/// Build repositories over one shared connection and wrap them in the domain
/// services the handlers call.
///
/// No I/O happens here; the connection is established by the first request
/// that touches the store.
pub(super) fn build_http_state(connection: Arc<MongoConnection>) -> web::Data<HttpState> {
    let store = MongoDocumentStore::new(connection);
    let courses = Arc::new(MongoCourseRepository::from_store(&store));
    let notes = Arc::new(MongoNoteRepository::from_store(
        &store,
        Arc::new(DefaultClock),
    ));

    let catalogue = Arc::new(CourseCatalogueService::new(
        Arc::clone(&courses),
        Arc::clone(&notes),
    ));
    let note_service = Arc::new(NoteService::new(Arc::clone(&notes)));
    let reports = Arc::new(ReportService::new(courses, notes));

    web::Data::new(HttpState::new(
        catalogue.clone(),
        catalogue,
        note_service.clone(),
        note_service,
        reports,
    ))
}
