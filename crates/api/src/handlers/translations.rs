//! Handlers for the `/translations` resource.
//!
//! Translations are keyed by `(table_name, field_name, entity_id,
//! language_code)`. Reads default the language to the request locale.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use storefront_core::error::{CoreError, FieldErrors};
use storefront_core::types::{DbId, Version};
use storefront_core::validation::{validate_identifier, validate_language_code, validate_not_blank};
use storefront_db::models::translation::{
    CreateTranslation, Translation, TranslationFilter, TranslationKey, UpdateTranslation,
    SORT_SAFELIST,
};
use storefront_db::repositories::TranslationRepo;
use validator::Validate;

use super::{ensure_version, location};
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::middleware::auth::RequireAdmin;
use crate::middleware::context::RequestContext;
use crate::query::{id_list, text_list, ListParams};
use crate::response::{Created, Item, ListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string for `GET /translations`.
#[derive(Debug, Default, Deserialize)]
pub struct TranslationListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub table_names: Option<String>,
    pub field_names: Option<String>,
    pub entity_ids: Option<String>,
    pub language_codes: Option<String>,
}

/// Query string for `GET /translations/lookup`.
#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    pub table_name: Option<String>,
    pub field_name: Option<String>,
    pub entity_id: Option<String>,
    pub language_code: Option<String>,
}

/// Request body for `POST /translations`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTranslationRequest {
    #[validate(custom(function = "validate_identifier"))]
    pub table_name: String,
    #[validate(custom(function = "validate_identifier"))]
    pub field_name: String,
    pub entity_id: DbId,
    #[validate(custom(function = "validate_language_code"))]
    pub language_code: String,
    #[validate(length(min = 1, max = 10000), custom(function = "validate_not_blank"))]
    pub translated_value: String,
}

/// Request body for `PATCH /translations/{id}`. The key is immutable.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTranslationRequest {
    #[validate(length(min = 1, max = 10000), custom(function = "validate_not_blank"))]
    pub translated_value: Option<String>,
    pub expected_version: Option<Version>,
}

impl LookupParams {
    /// Every key part is required except the language, which falls back to
    /// the request locale.
    fn into_key(self, ctx: &RequestContext) -> Result<TranslationKey, CoreError> {
        let mut errors = FieldErrors::new();
        let mut required = |field: &str, value: Option<String>| {
            let value = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
            if value.is_none() {
                errors.insert(field.to_string(), "is required".to_string());
            }
            value
        };

        let table_name = required("table_name", self.table_name);
        let field_name = required("field_name", self.field_name);
        let entity_id = required("entity_id", self.entity_id);

        let entity_id = entity_id.and_then(|raw| match raw.parse::<DbId>() {
            Ok(id) => Some(id),
            Err(_) => {
                errors.insert("entity_id".into(), "must be a UUID".into());
                None
            }
        });

        match (table_name, field_name, entity_id) {
            (Some(table_name), Some(field_name), Some(entity_id)) if errors.is_empty() => {
                Ok(TranslationKey {
                    table_name,
                    field_name,
                    entity_id,
                    language_code: self
                        .language_code
                        .map(|c| c.trim().to_ascii_lowercase())
                        .filter(|c| !c.is_empty())
                        .unwrap_or_else(|| ctx.locale.as_str().to_string()),
                })
            }
            _ => Err(CoreError::Validation(errors)),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/translations
///
/// Without `language_codes`, only translations in the request locale are
/// returned.
pub async fn list_translations(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(params): Query<TranslationListParams>,
) -> AppResult<ListResponse<Translation>> {
    let mut language_codes = text_list(params.language_codes.as_deref());
    if language_codes.is_empty() {
        language_codes.push(ctx.locale.as_str().to_string());
    }

    let filter = TranslationFilter {
        common: params.list.to_filter(SORT_SAFELIST)?,
        table_names: text_list(params.table_names.as_deref()),
        field_names: text_list(params.field_names.as_deref()),
        entity_ids: id_list(params.entity_ids.as_deref()),
        language_codes,
    };
    Ok(ListResponse::new(TranslationRepo::list(&state.pool, &filter).await?))
}

/// GET /api/v1/translations/lookup
pub async fn lookup_translation(
    State(state): State<AppState>,
    ctx: RequestContext,
    Query(params): Query<LookupParams>,
) -> AppResult<Item<Translation>> {
    let key = params.into_key(&ctx)?;
    let translation = TranslationRepo::get_by_key(&state.pool, &key).await?;
    Ok(Item::new("translation", translation))
}

/// POST /api/v1/translations
pub async fn create_translation(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateTranslationRequest>,
) -> AppResult<Created<Translation>> {
    let translation = TranslationRepo::create(
        &state.pool,
        &CreateTranslation {
            key: TranslationKey {
                table_name: input.table_name,
                field_name: input.field_name,
                entity_id: input.entity_id,
                language_code: input.language_code,
            },
            translated_value: input.translated_value,
            created_by_id: Some(admin.user_id),
            updated_by_id: Some(admin.user_id),
        },
    )
    .await?;

    tracing::info!(
        id = %translation.id,
        table = %translation.table_name,
        field = %translation.field_name,
        language = %translation.language_code,
        "Translation created"
    );
    Ok(Created::new(
        location("translations", translation.id),
        "translation",
        translation,
    ))
}

/// GET /api/v1/translations/{id}
pub async fn get_translation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Item<Translation>> {
    Ok(Item::new("translation", TranslationRepo::get_by_id(&state.pool, id).await?))
}

/// PATCH /api/v1/translations/{id}
pub async fn update_translation(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateTranslationRequest>,
) -> AppResult<Item<Translation>> {
    let mut translation = TranslationRepo::get_by_id(&state.pool, id).await?;
    ensure_version("Translation", id, translation.version, input.expected_version)?;

    translation.apply(&UpdateTranslation {
        translated_value: input.translated_value,
        updated_by_id: admin.user_id,
    });
    let translation = TranslationRepo::update(&state.pool, &translation).await?;

    tracing::info!(id = %translation.id, version = translation.version, "Translation updated");
    Ok(Item::new("translation", translation))
}

/// DELETE /api/v1/translations/{id}
pub async fn delete_translation(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    TranslationRepo::delete(&state.pool, id).await?;
    tracing::info!(%id, by = %admin.user_id, "Translation deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use storefront_core::locale::Locale;
    use uuid::Uuid;

    use super::*;

    fn ctx(tag: &str) -> RequestContext {
        RequestContext {
            locale: Locale::parse(tag).unwrap(),
        }
    }

    #[test]
    fn lookup_defaults_language_to_locale() {
        let id = Uuid::new_v4();
        let key = LookupParams {
            table_name: Some("categories".into()),
            field_name: Some("name".into()),
            entity_id: Some(id.to_string()),
            language_code: None,
        }
        .into_key(&ctx("uz"))
        .unwrap();

        assert_eq!(key.entity_id, id);
        assert_eq!(key.language_code, "uz");
    }

    #[test]
    fn explicit_language_wins() {
        let key = LookupParams {
            table_name: Some("categories".into()),
            field_name: Some("name".into()),
            entity_id: Some(Uuid::new_v4().to_string()),
            language_code: Some("RU".into()),
        }
        .into_key(&ctx("uz"))
        .unwrap();
        assert_eq!(key.language_code, "ru");
    }

    #[test]
    fn missing_and_malformed_parts_are_reported() {
        let result = LookupParams {
            table_name: None,
            field_name: Some("name".into()),
            entity_id: Some("nope".into()),
            language_code: None,
        }
        .into_key(&ctx("en"));

        assert_matches!(
            result,
            Err(CoreError::Validation(fields))
                if fields.contains_key("table_name") && fields.contains_key("entity_id")
        );
    }
}
