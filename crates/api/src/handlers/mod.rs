//! HTTP handlers, one module per resource.

pub mod auth;
pub mod brands;
pub mod categories;
pub mod health;
pub mod languages;
pub mod sessions;
pub mod translations;
pub mod users;

use storefront_core::error::CoreError;
use storefront_core::types::{DbId, Version};

/// Compare a client's `expected_version` with the freshly loaded row.
///
/// `None` means the client did not ask for the check; the repository's own
/// version guard still protects against a concurrent write after the load.
pub fn ensure_version(
    entity: &'static str,
    id: DbId,
    current: Version,
    expected: Option<Version>,
) -> Result<(), CoreError> {
    match expected {
        Some(expected) if expected != current => {
            tracing::debug!(entity, %id, current, expected, "Stale expected_version");
            Err(CoreError::EditConflict { entity, id })
        }
        _ => Ok(()),
    }
}

/// `Location` value for a newly created resource.
pub fn location(collection: &str, id: DbId) -> String {
    format!("/api/v1/{collection}/{id}")
}
