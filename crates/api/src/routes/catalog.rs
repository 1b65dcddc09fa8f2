//! Route definitions for catalog resources (`/categories`, `/brands`).

use axum::routing::get;
use axum::Router;

use crate::handlers::{brands, categories};
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /             -> list_categories
/// POST   /             -> create_category (admin)
/// GET    /{id}         -> get_category
/// PATCH  /{id}         -> update_category (admin)
/// DELETE /{id}         -> delete_category (admin)
/// GET    /slug/{slug}  -> get_category_by_slug
/// DELETE /slug/{slug}  -> delete_category_by_slug (admin)
/// ```
pub fn categories() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/{id}",
            get(categories::get_category)
                .patch(categories::update_category)
                .delete(categories::delete_category),
        )
        .route(
            "/slug/{slug}",
            get(categories::get_category_by_slug).delete(categories::delete_category_by_slug),
        )
}

/// Routes mounted at `/brands`.
///
/// ```text
/// GET    /             -> list_brands
/// POST   /             -> create_brand (admin)
/// GET    /{id}         -> get_brand
/// PATCH  /{id}         -> update_brand (admin)
/// DELETE /{id}         -> delete_brand (admin)
/// GET    /slug/{slug}  -> get_brand_by_slug
/// ```
pub fn brands() -> Router<AppState> {
    Router::new()
        .route("/", get(brands::list_brands).post(brands::create_brand))
        .route(
            "/{id}",
            get(brands::get_brand)
                .patch(brands::update_brand)
                .delete(brands::delete_brand),
        )
        .route("/slug/{slug}", get(brands::get_brand_by_slug))
}
