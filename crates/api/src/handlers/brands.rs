//! Handlers for the `/brands` resource.
//!
//! Reads are public; writes require the `admin` role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use storefront_core::types::{double_option, DbId, Version};
use storefront_core::validation::{validate_nullable_url, validate_not_blank, validate_slug};
use storefront_db::models::brand::{Brand, BrandFilter, CreateBrand, UpdateBrand, SORT_SAFELIST};
use storefront_db::repositories::BrandRepo;
use validator::Validate;

use super::{ensure_version, location};
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::RequireAdmin;
use crate::query::{text_list, ListParams};
use crate::response::{Created, Item, ListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string for `GET /brands`.
#[derive(Debug, Default, Deserialize)]
pub struct BrandListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub names: Option<String>,
    pub slugs: Option<String>,
}

/// Request body for `POST /brands`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBrandRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_slug"))]
    pub slug: String,
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Request body for `PATCH /brands/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBrandRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255), custom(function = "validate_slug"))]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub logo_url: Option<Option<String>>,
    pub expected_version: Option<Version>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/brands
pub async fn list_brands(
    State(state): State<AppState>,
    Query(params): Query<BrandListParams>,
) -> AppResult<ListResponse<Brand>> {
    let filter = BrandFilter {
        common: params.list.to_filter(SORT_SAFELIST)?,
        names: text_list(params.names.as_deref()),
        slugs: text_list(params.slugs.as_deref()),
    };
    Ok(ListResponse::new(BrandRepo::list(&state.pool, &filter).await?))
}

/// POST /api/v1/brands
pub async fn create_brand(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateBrandRequest>,
) -> AppResult<Created<Brand>> {
    let brand = BrandRepo::create(
        &state.pool,
        &CreateBrand {
            name: input.name,
            slug: input.slug,
            logo_url: input.logo_url,
            created_by_id: Some(admin.user_id),
            updated_by_id: Some(admin.user_id),
        },
    )
    .await?;

    tracing::info!(id = %brand.id, slug = %brand.slug, by = %admin.user_id, "Brand created");
    Ok(Created::new(location("brands", brand.id), "brand", brand))
}

/// GET /api/v1/brands/{id}
pub async fn get_brand(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Item<Brand>> {
    Ok(Item::new("brand", BrandRepo::get_by_id(&state.pool, id).await?))
}

/// GET /api/v1/brands/slug/{slug}
pub async fn get_brand_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Item<Brand>> {
    Ok(Item::new("brand", BrandRepo::get_by_slug(&state.pool, &slug).await?))
}

/// PATCH /api/v1/brands/{id}
pub async fn update_brand(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateBrandRequest>,
) -> AppResult<Item<Brand>> {
    validate_nullable_url("logo_url", &input.logo_url)?;

    let mut brand = BrandRepo::get_by_id(&state.pool, id).await?;
    ensure_version("Brand", id, brand.version, input.expected_version)?;

    brand.apply(&UpdateBrand {
        name: input.name,
        slug: input.slug,
        logo_url: input.logo_url,
        updated_by_id: admin.user_id,
    });
    let brand = BrandRepo::update(&state.pool, &brand).await?;

    tracing::info!(id = %brand.id, version = brand.version, by = %admin.user_id, "Brand updated");
    Ok(Item::new("brand", brand))
}

/// DELETE /api/v1/brands/{id}
pub async fn delete_brand(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    BrandRepo::delete(&state.pool, id).await?;
    tracing::info!(%id, by = %admin.user_id, "Brand deleted");
    Ok(StatusCode::NO_CONTENT)
}
