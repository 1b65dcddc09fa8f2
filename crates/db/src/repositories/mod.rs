//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every call runs under
//! [`crate::POINT_TIMEOUT`] or [`crate::LIST_TIMEOUT`].
//!
//! Updates are optimistic: the caller loads a row, mutates it in memory and
//! hands it back. The write succeeds only if the stored version still equals
//! the one that was loaded.

pub mod brand_repo;
pub mod category_repo;
pub mod language_repo;
pub mod session_repo;
pub mod translation_repo;
pub mod user_repo;

pub use brand_repo::BrandRepo;
pub use category_repo::CategoryRepo;
pub use language_repo::LanguageRepo;
pub use session_repo::SessionRepo;
pub use translation_repo::TranslationRepo;
pub use user_repo::UserRepo;

use sqlx::postgres::PgQueryResult;
use storefront_core::types::DbId;

use crate::error::{DbError, DbResult};

/// Zero rows from a lookup means the row does not exist.
fn found<T>(row: Option<T>, entity: &'static str, key: impl ToString) -> DbResult<T> {
    row.ok_or_else(|| DbError::not_found(entity, key))
}

/// Zero rows from a version-checked write is always a conflict, even if the
/// row was deleted in the meantime.
fn versioned<T>(row: Option<T>, entity: &'static str, id: DbId) -> DbResult<T> {
    row.ok_or(DbError::EditConflict { entity, id })
}

/// Zero rows from a delete means there was nothing to delete.
fn deleted(result: PgQueryResult, entity: &'static str, key: impl ToString) -> DbResult<()> {
    if result.rows_affected() == 0 {
        Err(DbError::not_found(entity, key))
    } else {
        Ok(())
    }
}
