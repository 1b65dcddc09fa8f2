//! Route definitions for `/users` and `/sessions`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{sessions, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /               -> list_users (admin)
/// POST   /               -> create_user (admin)
/// GET    /phone/{phone}  -> get_user_by_phone (admin)
/// GET    /{id}           -> get_user (self or admin)
/// PATCH  /{id}           -> update_user (self or admin)
/// DELETE /{id}           -> delete_user (admin)
/// PUT    /{id}/password  -> change_password (self or admin)
/// ```
pub fn users() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/phone/{phone}", get(users::get_user_by_phone))
        .route(
            "/{id}",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .route("/{id}/password", put(users::change_password))
}

/// Routes mounted at `/sessions`.
///
/// ```text
/// GET    /             -> list_sessions (admin)
/// GET    /{id}         -> get_session (owner or admin)
/// DELETE /{id}         -> delete_session (owner or admin)
/// POST   /{id}/revoke  -> revoke_session (owner or admin)
/// ```
pub fn sessions() -> Router<AppState> {
    Router::new()
        .route("/", get(sessions::list_sessions))
        .route(
            "/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/{id}/revoke", post(sessions::revoke_session))
}
