//! Shared mapping from store and mapping failures to repository errors.

use tracing::error;

use super::documents::MappingError;
use super::store::StoreError;

/// What a repository was doing when a failure occurred.
#[derive(Debug, Clone, Copy)]
pub struct FailureContext<'a> {
    /// Generic description, e.g. `fetch course`.
    pub action: &'static str,
    /// Identifier involved, when there is one.
    pub id: Option<&'a str>,
}

impl<'a> FailureContext<'a> {
    /// Context for an operation over a whole collection.
    pub const fn new(action: &'static str) -> Self {
        Self { action, id: None }
    }

    /// Context for an operation on one identifier.
    pub const fn for_id(action: &'static str, id: &'a str) -> Self {
        Self {
            action,
            id: Some(id),
        }
    }
}

/// Log a store failure and wrap it in a repository error.
///
/// Connection failures keep their message; operation failures are replaced
/// by the generic action text so callers never see driver details.
pub fn map_store_error<E, C, Q>(
    error: StoreError,
    context: FailureContext<'_>,
    connection: C,
    query: Q,
) -> E
where
    C: FnOnce(String) -> E,
    Q: FnOnce(String) -> E,
{
    let FailureContext { action, id } = context;
    error!(error = %error, action, id = ?id, "document store operation failed");
    match error {
        StoreError::Connection { message } => connection(message),
        StoreError::Operation { .. } => query(format!("failed to {action}")),
    }
}

/// Log a malformed stored document and wrap it as a query error.
pub fn map_mapping_error<E, Q>(error: MappingError, context: FailureContext<'_>, query: Q) -> E
where
    Q: FnOnce(String) -> E,
{
    let FailureContext { action, id } = context;
    error!(error = %error, action, id = ?id, "stored document could not be mapped");
    query(format!("failed to {action}"))
}
