//! Handlers for the `/categories` resource.
//!
//! Reads are public; writes require the `admin` role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use storefront_core::error::CoreError;
use storefront_core::types::{double_option, DbId, Version};
use storefront_core::validation::{validate_nullable_url, validate_not_blank, validate_slug};
use storefront_db::models::category::{
    Category, CategoryFilter, CreateCategory, UpdateCategory, SORT_SAFELIST,
};
use storefront_db::repositories::CategoryRepo;
use validator::Validate;

use super::{ensure_version, location};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::RequireAdmin;
use crate::query::{id_list, text_list, ListParams};
use crate::response::{Created, Item, ListResponse};
use crate::state::AppState;

const ENTITY: &str = "Category";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string for `GET /categories`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub names: Option<String>,
    pub slugs: Option<String>,
    pub parent_ids: Option<String>,
}

/// Request body for `POST /categories`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_slug"))]
    pub slug: String,
    #[validate(url)]
    pub image_url: Option<String>,
    pub parent_id: Option<DbId>,
}

/// Request body for `PATCH /categories/{id}`.
///
/// `image_url` and `parent_id` may be sent as `null` to clear them.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255), custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<DbId>>,
    pub expected_version: Option<Version>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> AppResult<ListResponse<Category>> {
    let filter = CategoryFilter {
        common: params.list.to_filter(SORT_SAFELIST)?,
        names: text_list(params.names.as_deref()),
        slugs: text_list(params.slugs.as_deref()),
        parent_ids: id_list(params.parent_ids.as_deref()),
    };
    let page = CategoryRepo::list(&state.pool, &filter).await?;
    Ok(ListResponse::new(page))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateCategoryRequest>,
) -> AppResult<Created<Category>> {
    let category = CategoryRepo::create(
        &state.pool,
        &CreateCategory {
            name: input.name,
            slug: input.slug,
            image_url: input.image_url,
            parent_id: input.parent_id,
            created_by_id: Some(admin.user_id),
            updated_by_id: Some(admin.user_id),
        },
    )
    .await?;

    tracing::info!(id = %category.id, slug = %category.slug, by = %admin.user_id, "Category created");
    Ok(Created::new(
        location("categories", category.id),
        "category",
        category,
    ))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Item<Category>> {
    let category = CategoryRepo::get_by_id(&state.pool, id).await?;
    Ok(Item::new("category", category))
}

/// GET /api/v1/categories/slug/{slug}
pub async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Item<Category>> {
    let category = CategoryRepo::get_by_slug(&state.pool, &slug).await?;
    Ok(Item::new("category", category))
}

/// PATCH /api/v1/categories/{id}
///
/// Loads the row, applies the present fields and writes it back under the
/// loaded version. A concurrent writer in between yields 409.
pub async fn update_category(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateCategoryRequest>,
) -> AppResult<Item<Category>> {
    validate_nullable_url("image_url", &input.image_url)?;
    if input.parent_id == Some(Some(id)) {
        return Err(AppError::Core(CoreError::invalid_field(
            "parent_id",
            "a category cannot be its own parent",
        )));
    }

    let mut category = CategoryRepo::get_by_id(&state.pool, id).await?;
    ensure_version(ENTITY, id, category.version, input.expected_version)?;

    category.apply(&UpdateCategory {
        name: input.name,
        slug: input.slug,
        image_url: input.image_url,
        parent_id: input.parent_id,
        updated_by_id: admin.user_id,
    });
    let category = CategoryRepo::update(&state.pool, &category).await?;

    tracing::info!(id = %category.id, version = category.version, by = %admin.user_id, "Category updated");
    Ok(Item::new("category", category))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    CategoryRepo::delete(&state.pool, id).await?;
    tracing::info!(%id, by = %admin.user_id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/categories/slug/{slug}
pub async fn delete_category_by_slug(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(slug): Path<String>,
) -> AppResult<StatusCode> {
    CategoryRepo::delete_by_slug(&state.pool, &slug).await?;
    tracing::info!(%slug, by = %admin.user_id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
