//! Route definitions for `/languages` and `/translations`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{languages, translations};
use crate::state::AppState;

/// Routes mounted at `/languages`.
///
/// ```text
/// GET    /             -> list_languages
/// POST   /             -> create_language (admin)
/// GET    /{id}         -> get_language
/// PATCH  /{id}         -> update_language (admin)
/// DELETE /{id}         -> delete_language (admin)
/// GET    /code/{code}  -> get_language_by_code
/// ```
pub fn languages() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(languages::list_languages).post(languages::create_language),
        )
        .route(
            "/{id}",
            get(languages::get_language)
                .patch(languages::update_language)
                .delete(languages::delete_language),
        )
        .route("/code/{code}", get(languages::get_language_by_code))
}

/// Routes mounted at `/translations`.
///
/// ```text
/// GET    /        -> list_translations
/// POST   /        -> create_translation (admin)
/// GET    /lookup  -> lookup_translation
/// GET    /{id}    -> get_translation
/// PATCH  /{id}    -> update_translation (admin)
/// DELETE /{id}    -> delete_translation (admin)
/// ```
pub fn translations() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(translations::list_translations).post(translations::create_translation),
        )
        .route("/lookup", get(translations::lookup_translation))
        .route(
            "/{id}",
            get(translations::get_translation)
                .patch(translations::update_translation)
                .delete(translations::delete_translation),
        )
}
