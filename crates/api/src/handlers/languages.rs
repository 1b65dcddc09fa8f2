//! Handlers for the `/languages` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use storefront_core::types::{DbId, Version};
use storefront_core::validation::{validate_language_code, validate_not_blank};
use storefront_db::models::language::{
    CreateLanguage, Language, LanguageFilter, UpdateLanguage, SORT_SAFELIST,
};
use storefront_db::repositories::LanguageRepo;
use validator::Validate;

use super::{ensure_version, location};
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::RequireAdmin;
use crate::query::{boolean, text_list, ListParams};
use crate::response::{Created, Item, ListResponse};
use crate::state::AppState;

/// Query string for `GET /languages`.
#[derive(Debug, Default, Deserialize)]
pub struct LanguageListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub codes: Option<String>,
    pub names: Option<String>,
    pub is_active: Option<String>,
}

/// Request body for `POST /languages`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLanguageRequest {
    #[validate(length(min = 2, max = 8), custom(function = "validate_language_code"))]
    pub code: String,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub native_name: String,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

/// Request body for `PATCH /languages/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLanguageRequest {
    #[validate(length(min = 2, max = 8), custom(function = "validate_language_code"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub native_name: Option<String>,
    pub is_active: Option<bool>,
    pub expected_version: Option<Version>,
}

/// GET /api/v1/languages
pub async fn list_languages(
    State(state): State<AppState>,
    Query(params): Query<LanguageListParams>,
) -> AppResult<ListResponse<Language>> {
    let filter = LanguageFilter {
        common: params.list.to_filter(SORT_SAFELIST)?,
        codes: text_list(params.codes.as_deref()),
        names: text_list(params.names.as_deref()),
        is_active: boolean(params.is_active.as_deref()),
    };
    Ok(ListResponse::new(LanguageRepo::list(&state.pool, &filter).await?))
}

/// POST /api/v1/languages
pub async fn create_language(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateLanguageRequest>,
) -> AppResult<Created<Language>> {
    let language = LanguageRepo::create(
        &state.pool,
        &CreateLanguage {
            code: input.code,
            name: input.name,
            native_name: input.native_name,
            is_active: input.is_active,
            created_by_id: Some(admin.user_id),
            updated_by_id: Some(admin.user_id),
        },
    )
    .await?;

    tracing::info!(id = %language.id, code = %language.code, "Language created");
    Ok(Created::new(
        location("languages", language.id),
        "language",
        language,
    ))
}

/// GET /api/v1/languages/{id}
pub async fn get_language(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Item<Language>> {
    Ok(Item::new("language", LanguageRepo::get_by_id(&state.pool, id).await?))
}

/// GET /api/v1/languages/code/{code}
pub async fn get_language_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<Item<Language>> {
    let language = LanguageRepo::get_by_code(&state.pool, &code.to_ascii_lowercase()).await?;
    Ok(Item::new("language", language))
}

/// PATCH /api/v1/languages/{id}
///
/// Renaming `code` cascades to translations through the foreign key.
pub async fn update_language(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateLanguageRequest>,
) -> AppResult<Item<Language>> {
    let mut language = LanguageRepo::get_by_id(&state.pool, id).await?;
    ensure_version("Language", id, language.version, input.expected_version)?;

    language.apply(&UpdateLanguage {
        code: input.code,
        name: input.name,
        native_name: input.native_name,
        is_active: input.is_active,
        updated_by_id: admin.user_id,
    });
    let language = LanguageRepo::update(&state.pool, &language).await?;

    tracing::info!(id = %language.id, version = language.version, "Language updated");
    Ok(Item::new("language", language))
}

/// DELETE /api/v1/languages/{id}
///
/// Deletes every translation in this language as well.
pub async fn delete_language(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    LanguageRepo::delete(&state.pool, id).await?;
    tracing::info!(%id, by = %admin.user_id, "Language deleted");
    Ok(StatusCode::NO_CONTENT)
}
