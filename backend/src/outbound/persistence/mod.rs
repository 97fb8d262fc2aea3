//! MongoDB persistence adapters.
//!
//! Concrete implementations of the domain repository ports backed by a
//! MongoDB database.
//!
//! # Architecture
//!
//! - **Lazy connection**: [`MongoConnection`] connects on first use and caches
//!   the client; a failed attempt is retried by the next caller.
//! - **Store seam**: repositories depend on [`DocumentCollection`], not on the
//!   driver, so they can run against mocks or an in-memory store.
//! - **Thin adapters**: repositories guard identifiers, issue one store
//!   operation, and map documents to domain types. No business logic
//!   resides here.
//! - **Opaque errors**: store failures are logged and wrapped in the port
//!   error types.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use coursenote::outbound::persistence::{
//!     ConnectionConfig, MongoConnection, MongoCourseRepository, MongoDocumentStore,
//! };
//!
//! let connection = Arc::new(MongoConnection::new(ConnectionConfig::new(
//!     "mongodb://localhost:27017",
//! )));
//! let store = MongoDocumentStore::new(connection);
//! let courses = MongoCourseRepository::from_store(&store);
//! ```

mod connection;
mod documents;
mod id_guard;
mod mongo_course_repository;
mod mongo_note_repository;
mod mongo_store;
mod store;
mod store_error_mapping;

pub use connection::{ConnectionConfig, ConnectionError, DEFAULT_DB_NAME, MongoConnection};
pub use documents::MappingError;
pub use id_guard::parse_object_id;
pub use mongo_course_repository::MongoCourseRepository;
pub use mongo_note_repository::MongoNoteRepository;
pub use mongo_store::MongoDocumentStore;
pub use store::{
    COURSES_COLLECTION, DocumentCollection, DocumentStore, NOTES_COLLECTION, StoreError,
};
