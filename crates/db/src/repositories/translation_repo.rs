//! Repository for the `translations` table.

use sqlx::PgPool;
use storefront_core::pagination::Metadata;
use storefront_core::types::DbId;

use super::{deleted, found, versioned};
use crate::error::DbResult;
use crate::models::translation::{
    CreateTranslation, Translation, TranslationFilter, TranslationKey, DEFAULT_SORT,
};
use crate::query::ListQuery;
use crate::{with_timeout, POINT_TIMEOUT};

const ENTITY: &str = "Translation";

const COLUMNS: &str = "id, table_name, field_name, entity_id, language_code, translated_value, \
                       created_at, updated_at, created_by_id, updated_by_id, version";

pub struct TranslationRepo;

impl TranslationRepo {
    /// Insert a translation. A second row for the same key fails on
    /// `uq_translations_key`.
    pub async fn create(pool: &PgPool, input: &CreateTranslation) -> DbResult<Translation> {
        let query = format!(
            "INSERT INTO translations
                (table_name, field_name, entity_id, language_code, translated_value,
                 created_by_id, updated_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Translation>(&query)
                .bind(&input.key.table_name)
                .bind(&input.key.field_name)
                .bind(input.key.entity_id)
                .bind(&input.key.language_code)
                .bind(&input.translated_value)
                .bind(input.created_by_id)
                .bind(input.updated_by_id)
                .fetch_one(pool),
        )
        .await
    }

    pub async fn get_by_id(pool: &PgPool, id: DbId) -> DbResult<Translation> {
        let query = format!("SELECT {COLUMNS} FROM translations WHERE id = $1");
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Translation>(&query).bind(id).fetch_optional(pool),
        )
        .await?;
        found(row, ENTITY, id)
    }

    /// Look a translation up by its natural key.
    pub async fn get_by_key(pool: &PgPool, key: &TranslationKey) -> DbResult<Translation> {
        let query = format!(
            "SELECT {COLUMNS} FROM translations
             WHERE table_name = $1 AND field_name = $2 AND entity_id = $3 AND language_code = $4"
        );
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Translation>(&query)
                .bind(&key.table_name)
                .bind(&key.field_name)
                .bind(key.entity_id)
                .bind(&key.language_code)
                .fetch_optional(pool),
        )
        .await?;
        found(
            row,
            ENTITY,
            format!(
                "{}.{}/{}/{}",
                key.table_name, key.field_name, key.entity_id, key.language_code
            ),
        )
    }

    pub async fn list(
        pool: &PgPool,
        filter: &TranslationFilter,
    ) -> DbResult<(Vec<Translation>, Metadata)> {
        let mut q = ListQuery::new("translations", COLUMNS);
        q.common(&filter.common, Some("translated_value"))
            .any_text("table_name", &filter.table_names)
            .any_text("field_name", &filter.field_names)
            .any_id("entity_id", &filter.entity_ids)
            .any_text("language_code", &filter.language_codes)
            .order_by(&filter.common.sort, DEFAULT_SORT)
            .paginate(filter.common.page);
        q.fetch_page(pool, filter.common.page).await
    }

    /// Version-checked write of the translated text.
    pub async fn update(pool: &PgPool, translation: &Translation) -> DbResult<Translation> {
        let query = format!(
            "UPDATE translations SET
                translated_value = $3,
                updated_by_id = $4,
                updated_at = NOW(),
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Translation>(&query)
                .bind(translation.id)
                .bind(translation.version)
                .bind(&translation.translated_value)
                .bind(translation.updated_by_id)
                .fetch_optional(pool),
        )
        .await?;
        versioned(row, ENTITY, translation.id)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let result = with_timeout(
            POINT_TIMEOUT,
            sqlx::query("DELETE FROM translations WHERE id = $1")
                .bind(id)
                .execute(pool),
        )
        .await?;
        deleted(result, ENTITY, id)
    }
}
