//! Persistence error taxonomy.
//!
//! Repositories return the most specific [`DbError`] they can detect so that
//! callers never have to inspect raw sqlx errors.

use std::time::Duration;

use storefront_core::error::{ConstraintKind, CoreError};
use storefront_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A lookup or delete matched no row.
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    /// A version-checked update matched no row.
    #[error("{entity} {id} was modified concurrently")]
    EditConflict { entity: &'static str, id: DbId },

    /// The database rejected a write on an integrity constraint.
    #[error("{kind} constraint {constraint} violated")]
    Constraint {
        kind: ConstraintKind,
        constraint: String,
    },

    #[error("database operation exceeded {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        DbError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

/// Map a PostgreSQL SQLSTATE to the integrity rule it reports.
///
/// - `23505` unique violation
/// - `23503` foreign key violation
/// - `23514` check violation
/// - `23502` not-null violation
pub fn constraint_kind(sqlstate: &str) -> Option<ConstraintKind> {
    match sqlstate {
        "23505" => Some(ConstraintKind::Unique),
        "23503" => Some(ConstraintKind::ForeignKey),
        "23514" => Some(ConstraintKind::Check),
        "23502" => Some(ConstraintKind::NotNull),
        _ => None,
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let kind = db_err.code().as_deref().and_then(constraint_kind);
                match kind {
                    Some(kind) => DbError::Constraint {
                        kind,
                        constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                    },
                    None => DbError::Sqlx(sqlx::Error::Database(db_err)),
                }
            }
            sqlx::Error::PoolTimedOut => DbError::Timeout(Duration::ZERO),
            other => DbError::Sqlx(other),
        }
    }
}

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, key } => CoreError::NotFound { entity, key },
            DbError::EditConflict { entity, id } => CoreError::EditConflict { entity, id },
            DbError::Constraint { kind, constraint } => {
                CoreError::ConstraintViolation { kind, constraint }
            }
            DbError::Timeout(limit) => {
                CoreError::Timeout(format!("database operation exceeded {limit:?}"))
            }
            DbError::Sqlx(e) => CoreError::Internal(format!("database error: {e}")),
        }
    }
}
