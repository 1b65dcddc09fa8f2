//! Handlers for the `/sessions` resource.
//!
//! Admins see every session; other users only their own.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use storefront_core::error::CoreError;
use storefront_core::types::{DbId, Version};
use storefront_db::models::session::{Session, SessionFilter, SORT_SAFELIST};
use storefront_db::repositories::SessionRepo;
use validator::Validate;

use super::ensure_version;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::query::{boolean, text_list, ListParams};
use crate::response::{Item, ListResponse};
use crate::state::AppState;

/// Query string for `GET /sessions`.
#[derive(Debug, Default, Deserialize)]
pub struct SessionListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub user_phones: Option<String>,
    pub is_revoked: Option<String>,
}

/// Body for `POST /sessions/{id}/revoke`. Send `{}` to skip the version check.
#[derive(Debug, Deserialize, Validate)]
pub struct RevokeSessionRequest {
    pub expected_version: Option<Version>,
}

/// GET /api/v1/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<SessionListParams>,
) -> AppResult<ListResponse<Session>> {
    let filter = SessionFilter {
        common: params.list.to_filter(SORT_SAFELIST)?,
        user_phones: text_list(params.user_phones.as_deref()),
        is_revoked: boolean(params.is_revoked.as_deref()),
    };
    Ok(ListResponse::new(SessionRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Item<Session>> {
    let session = load_owned(&state, &caller, id).await?;
    Ok(Item::new("session", session))
}

/// POST /api/v1/sessions/{id}/revoke
pub async fn revoke_session(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<RevokeSessionRequest>,
) -> AppResult<Item<Session>> {
    let session = load_owned(&state, &caller, id).await?;
    ensure_version("Session", id, session.version, input.expected_version)?;

    let session = SessionRepo::revoke(&state.pool, &session).await?;
    tracing::info!(session_id = %session.id, by = %caller.user_id, "Session revoked");
    Ok(Item::new("session", session))
}

/// DELETE /api/v1/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    load_owned(&state, &caller, id).await?;
    SessionRepo::delete(&state.pool, id).await?;
    tracing::info!(session_id = %id, by = %caller.user_id, "Session deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Load a session the caller is allowed to see. Someone else's session is
/// reported as missing so ids cannot be probed.
async fn load_owned(state: &AppState, caller: &AuthUser, id: DbId) -> AppResult<Session> {
    let session = SessionRepo::get_by_id(&state.pool, id).await?;
    if caller.is_admin() || session.user_phone == caller.phone {
        Ok(session)
    } else {
        Err(AppError::Core(CoreError::not_found("Session", id)))
    }
}
