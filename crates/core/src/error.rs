use std::collections::BTreeMap;
use std::fmt;

use crate::types::DbId;

/// Field name -> human-readable message, as returned to clients on 422.
pub type FieldErrors = BTreeMap<String, String>;

/// Which integrity rule the database rejected a write for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
    NotNull,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::Unique => "unique",
            ConstraintKind::ForeignKey => "foreign key",
            ConstraintKind::Check => "check",
            ConstraintKind::NotNull => "not null",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    /// A version-guarded write matched no row: another writer got there first
    /// (or the row is gone). Never retried automatically.
    #[error("Edit conflict on {entity} {id}")]
    EditConflict { entity: &'static str, id: DbId },

    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(FieldErrors),

    #[error("Constraint violation ({kind}): {constraint}")]
    ConstraintViolation {
        kind: ConstraintKind,
        constraint: String,
    },

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a not-found error keyed by anything displayable (id, slug, code).
    pub fn not_found(entity: &'static str, key: impl fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Build a validation error for a single field.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), message.into());
        CoreError::Validation(errors)
    }
}

fn join_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_lists_every_field() {
        let mut errors = FieldErrors::new();
        errors.insert("slug".into(), "must not be empty".into());
        errors.insert("name".into(), "is too long".into());

        let msg = CoreError::Validation(errors).to_string();
        assert_eq!(
            msg,
            "Validation failed: name: is too long; slug: must not be empty"
        );
    }

    #[test]
    fn not_found_accepts_any_key() {
        let err = CoreError::not_found("Category", "electronics");
        assert_eq!(err.to_string(), "Entity not found: Category electronics");
    }
}
