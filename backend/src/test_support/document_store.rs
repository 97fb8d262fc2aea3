//! In-memory [`DocumentStore`] for integration tests.
//!
//! Supports the subset of MongoDB semantics the repositories rely on:
//! equality filters, a single-key sort, `$set` updates, and generated
//! ObjectIds. Every collection call is counted so tests can assert that a
//! code path never reached the store.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document};

use crate::outbound::persistence::{DocumentCollection, DocumentStore, StoreError};

#[derive(Default)]
struct StoreState {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    calls: AtomicUsize,
    unavailable: AtomicBool,
}

/// Shared in-memory document store; clones see the same data.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    state: Arc<StoreState>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collection operations issued so far, across collections.
    pub fn call_count(&self) -> usize {
        self.state.calls.load(AtomicOrdering::SeqCst)
    }

    /// Make every subsequent operation fail with a connection error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state
            .unavailable
            .store(unavailable, AtomicOrdering::SeqCst);
    }

    /// Snapshot of a collection's documents in insertion order.
    pub fn documents(&self, collection: &str) -> Vec<Document> {
        lock(&self.state)
            .map(|collections| collections.get(collection).cloned().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Store a document as-is, bypassing the repositories. Does not count as
    /// a call.
    pub fn insert_raw(&self, collection: &str, document: Document) {
        if let Ok(mut collections) = lock(&self.state) {
            collections
                .entry(collection.to_owned())
                .or_default()
                .push(document);
        }
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn collection(&self, name: &str) -> Arc<dyn DocumentCollection> {
        Arc::new(InMemoryCollection {
            state: Arc::clone(&self.state),
            name: name.to_owned(),
        })
    }
}

fn lock(state: &StoreState) -> Result<MutexGuard<'_, HashMap<String, Vec<Document>>>, StoreError> {
    state
        .collections
        .lock()
        .map_err(|_| StoreError::operation("in-memory store lock poisoned"))
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, expected)| document.get(key) == Some(expected))
}

fn compare_values(left: Option<&Bson>, right: Option<&Bson>) -> Ordering {
    match (left, right) {
        (Some(Bson::DateTime(a)), Some(Bson::DateTime(b))) => a.cmp(b),
        (Some(Bson::String(a)), Some(Bson::String(b))) => a.cmp(b),
        (Some(Bson::Int32(a)), Some(Bson::Int32(b))) => a.cmp(b),
        (Some(Bson::Int64(a)), Some(Bson::Int64(b))) => a.cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn sort_documents(documents: &mut [Document], sort: &Document) {
    let Some((key, direction)) = sort.iter().next() else {
        return;
    };
    let descending = match direction {
        Bson::Int32(value) => *value < 0,
        Bson::Int64(value) => *value < 0,
        _ => false,
    };
    documents.sort_by(|a, b| {
        let ordering = compare_values(a.get(key), b.get(key));
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

struct InMemoryCollection {
    state: Arc<StoreState>,
    name: String,
}

impl InMemoryCollection {
    fn with_documents<T>(
        &self,
        operation: impl FnOnce(&mut Vec<Document>) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        self.state.calls.fetch_add(1, AtomicOrdering::SeqCst);
        if self.state.unavailable.load(AtomicOrdering::SeqCst) {
            return Err(StoreError::connection("in-memory store unavailable"));
        }
        let mut collections = lock(&self.state)?;
        operation(collections.entry(self.name.clone()).or_default())
    }
}

#[async_trait]
impl DocumentCollection for InMemoryCollection {
    async fn find(
        &self,
        filter: Document,
        sort: Option<Document>,
    ) -> Result<Vec<Document>, StoreError> {
        self.with_documents(|documents| {
            let mut found: Vec<Document> = documents
                .iter()
                .filter(|document| matches(document, &filter))
                .cloned()
                .collect();
            if let Some(sort) = &sort {
                sort_documents(&mut found, sort);
            }
            Ok(found)
        })
    }

    async fn find_one(&self, filter: Document) -> Result<Option<Document>, StoreError> {
        self.with_documents(|documents| {
            Ok(documents
                .iter()
                .find(|document| matches(document, &filter))
                .cloned())
        })
    }

    async fn insert_one(&self, mut document: Document) -> Result<Option<ObjectId>, StoreError> {
        self.with_documents(|documents| {
            let id = match document.get_object_id("_id") {
                Ok(id) => id,
                Err(_) => {
                    let id = ObjectId::new();
                    document.insert("_id", id);
                    id
                }
            };
            documents.push(document);
            Ok(Some(id))
        })
    }

    async fn find_one_and_update(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>, StoreError> {
        self.with_documents(|documents| {
            let fields = update
                .get_document("$set")
                .map_err(|_| StoreError::operation("only $set updates are supported"))?;
            let Some(document) = documents
                .iter_mut()
                .find(|document| matches(document, &filter))
            else {
                return Ok(None);
            };
            for (key, value) in fields {
                document.insert(key.clone(), value.clone());
            }
            Ok(Some(document.clone()))
        })
    }

    async fn delete_one(&self, filter: Document) -> Result<u64, StoreError> {
        self.with_documents(|documents| {
            let position = documents
                .iter()
                .position(|document| matches(document, &filter));
            Ok(position.map_or(0, |index| {
                documents.remove(index);
                1
            }))
        })
    }

    async fn delete_many(&self, filter: Document) -> Result<u64, StoreError> {
        self.with_documents(|documents| {
            let before = documents.len();
            documents.retain(|document| !matches(document, &filter));
            Ok(u64::try_from(before - documents.len()).unwrap_or(u64::MAX))
        })
    }
}
