use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};
use storefront_core::error::{ConstraintKind, CoreError};
use storefront_db::DbError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`DbError`] for persistence
/// errors, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `storefront_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A classified persistence error from `storefront_db`.
    #[error(transparent)]
    Database(#[from] DbError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const GENERIC_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let core = match self {
            AppError::Core(core) => core,
            AppError::Database(db) => CoreError::from(db),
            AppError::BadRequest(msg) => {
                return render(StatusCode::BAD_REQUEST, "BAD_REQUEST", json!(msg));
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                return render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    json!(GENERIC_MESSAGE),
                );
            }
        };

        let (status, code, message) = match core {
            CoreError::NotFound { entity, key } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                json!(format!("{entity} {key} not found")),
            ),
            CoreError::EditConflict { entity, .. } => (
                StatusCode::CONFLICT,
                "EDIT_CONFLICT",
                json!(format!(
                    "{entity} was modified by another request; reload it and try again"
                )),
            ),
            CoreError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                json!(fields),
            ),
            CoreError::ConstraintViolation { kind, constraint } => (
                StatusCode::BAD_REQUEST,
                "CONSTRAINT_VIOLATION",
                json!(constraint_message(kind, &constraint)),
            ),
            CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", json!(msg)),
            CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", json!(msg)),
            CoreError::Timeout(msg) => {
                tracing::error!(error = %msg, "Operation timed out");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    json!(GENERIC_MESSAGE),
                )
            }
            CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal core error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    json!(GENERIC_MESSAGE),
                )
            }
        };

        render(status, code, message)
    }
}

fn render(status: StatusCode, code: &'static str, message: Value) -> Response {
    let body = json!({
        "error": message,
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}

/// Client-facing text for a rejected write. Names the constraint so the
/// client can tell which field clashed.
fn constraint_message(kind: ConstraintKind, constraint: &str) -> String {
    match kind {
        ConstraintKind::Unique => format!("A record with the same value already exists ({constraint})"),
        ConstraintKind::ForeignKey => format!("A referenced record does not exist ({constraint})"),
        ConstraintKind::Check => format!("A value breaks the rule {constraint}"),
        ConstraintKind::NotNull => format!("A required value is missing ({constraint})"),
    }
}
