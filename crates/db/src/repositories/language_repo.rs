//! Repository for the `languages` table.

use sqlx::PgPool;
use storefront_core::pagination::Metadata;
use storefront_core::types::DbId;

use super::{deleted, found, versioned};
use crate::error::DbResult;
use crate::models::language::{CreateLanguage, Language, LanguageFilter, DEFAULT_SORT};
use crate::query::ListQuery;
use crate::{with_timeout, POINT_TIMEOUT};

const ENTITY: &str = "Language";

const COLUMNS: &str = "id, code, name, native_name, is_active, created_at, updated_at, \
                       created_by_id, updated_by_id, version";

pub struct LanguageRepo;

impl LanguageRepo {
    pub async fn create(pool: &PgPool, input: &CreateLanguage) -> DbResult<Language> {
        let query = format!(
            "INSERT INTO languages (code, name, native_name, is_active, created_by_id, updated_by_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Language>(&query)
                .bind(&input.code)
                .bind(&input.name)
                .bind(&input.native_name)
                .bind(input.is_active)
                .bind(input.created_by_id)
                .bind(input.updated_by_id)
                .fetch_one(pool),
        )
        .await
    }

    pub async fn get_by_id(pool: &PgPool, id: DbId) -> DbResult<Language> {
        let query = format!("SELECT {COLUMNS} FROM languages WHERE id = $1");
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Language>(&query).bind(id).fetch_optional(pool),
        )
        .await?;
        found(row, ENTITY, id)
    }

    pub async fn get_by_code(pool: &PgPool, code: &str) -> DbResult<Language> {
        let query = format!("SELECT {COLUMNS} FROM languages WHERE code = $1");
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Language>(&query).bind(code).fetch_optional(pool),
        )
        .await?;
        found(row, ENTITY, code)
    }

    pub async fn list(pool: &PgPool, filter: &LanguageFilter) -> DbResult<(Vec<Language>, Metadata)> {
        let mut q = ListQuery::new("languages", COLUMNS);
        q.common(&filter.common, Some("name"))
            .any_text("code", &filter.codes)
            .any_text("name", &filter.names)
            .eq_bool("is_active", filter.is_active)
            .order_by(&filter.common.sort, DEFAULT_SORT)
            .paginate(filter.common.page);
        q.fetch_page(pool, filter.common.page).await
    }

    /// Version-checked write. A code change cascades to translations.
    pub async fn update(pool: &PgPool, language: &Language) -> DbResult<Language> {
        let query = format!(
            "UPDATE languages SET
                code = $3,
                name = $4,
                native_name = $5,
                is_active = $6,
                updated_by_id = $7,
                updated_at = NOW(),
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Language>(&query)
                .bind(language.id)
                .bind(language.version)
                .bind(&language.code)
                .bind(&language.name)
                .bind(&language.native_name)
                .bind(language.is_active)
                .bind(language.updated_by_id)
                .fetch_optional(pool),
        )
        .await?;
        versioned(row, ENTITY, language.id)
    }

    /// Hard-delete; translations in this language go with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let result = with_timeout(
            POINT_TIMEOUT,
            sqlx::query("DELETE FROM languages WHERE id = $1").bind(id).execute(pool),
        )
        .await?;
        deleted(result, ENTITY, id)
    }
}
