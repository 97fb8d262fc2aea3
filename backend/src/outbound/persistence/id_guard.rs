//! Validation of externally supplied document identifiers.

use mongodb::bson::oid::ObjectId;
use tracing::warn;

/// Parse `raw` as an ObjectId.
///
/// Returns `None` for anything that is not a 24-character hexadecimal
/// string, logging a warning tagged with `operation`. Callers treat `None`
/// as "no such document" and skip the store round trip.
pub fn parse_object_id(raw: &str, operation: &str) -> Option<ObjectId> {
    match ObjectId::parse_str(raw) {
        Ok(id) => Some(id),
        Err(_) => {
            warn!(id = raw, operation, "invalid ObjectId; treating as absent");
            None
        }
    }
}
