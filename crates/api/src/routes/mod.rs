pub mod accounts;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod i18n;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                  register (public)
/// /auth/login                     login (public)
/// /auth/refresh                   refresh (public)
/// /auth/logout                    logout (requires auth)
///
/// /categories                     list, create
/// /categories/{id}                get, update, delete
/// /categories/slug/{slug}         get, delete
///
/// /brands                         list, create
/// /brands/{id}                    get, update, delete
/// /brands/slug/{slug}             get
///
/// /languages                      list, create
/// /languages/{id}                 get, update, delete
/// /languages/code/{code}          get
///
/// /translations                   list, create
/// /translations/lookup            get by natural key
/// /translations/{id}              get, update, delete
///
/// /users                          list, create (admin only)
/// /users/phone/{phone}            get (admin only)
/// /users/{id}                     get, update, delete
/// /users/{id}/password            change password (PUT)
///
/// /sessions                       list (admin only)
/// /sessions/{id}                  get, delete
/// /sessions/{id}/revoke           revoke (POST)
/// ```
///
/// Every list answers `{metadata, results}`. Asking for a page beyond
/// `last_page` yields empty results and zeroed metadata, not an error.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", catalog::categories())
        .nest("/brands", catalog::brands())
        .nest("/languages", i18n::languages())
        .nest("/translations", i18n::translations())
        .nest("/users", accounts::users())
        .nest("/sessions", accounts::sessions())
}
