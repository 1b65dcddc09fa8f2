//! Repository for the `categories` table.

use sqlx::PgPool;
use storefront_core::pagination::Metadata;
use storefront_core::types::DbId;

use super::{deleted, found, versioned};
use crate::error::DbResult;
use crate::models::category::{Category, CategoryFilter, CreateCategory, DEFAULT_SORT};
use crate::query::ListQuery;
use crate::{with_timeout, POINT_TIMEOUT};

const ENTITY: &str = "Category";

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, slug, image_url, parent_id, created_at, updated_at, \
                       created_by_id, updated_by_id, version";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the created row at version 1.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> DbResult<Category> {
        let query = format!(
            "INSERT INTO categories (name, slug, image_url, parent_id, created_by_id, updated_by_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Category>(&query)
                .bind(&input.name)
                .bind(&input.slug)
                .bind(&input.image_url)
                .bind(input.parent_id)
                .bind(input.created_by_id)
                .bind(input.updated_by_id)
                .fetch_one(pool),
        )
        .await
    }

    pub async fn get_by_id(pool: &PgPool, id: DbId) -> DbResult<Category> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Category>(&query)
                .bind(id)
                .fetch_optional(pool),
        )
        .await?;
        found(row, ENTITY, id)
    }

    pub async fn get_by_slug(pool: &PgPool, slug: &str) -> DbResult<Category> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE slug = $1");
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Category>(&query)
                .bind(slug)
                .fetch_optional(pool),
        )
        .await?;
        found(row, ENTITY, slug)
    }

    /// One page of categories matching `filter`, with the filtered total.
    pub async fn list(pool: &PgPool, filter: &CategoryFilter) -> DbResult<(Vec<Category>, Metadata)> {
        let mut q = ListQuery::new("categories", COLUMNS);
        q.common(&filter.common, Some("name"))
            .any_text("name", &filter.names)
            .any_text("slug", &filter.slugs)
            .any_id("parent_id", &filter.parent_ids)
            .order_by(&filter.common.sort, DEFAULT_SORT)
            .paginate(filter.common.page);
        q.fetch_page(pool, filter.common.page).await
    }

    /// Persist `category` if nobody else has written it since it was loaded.
    ///
    /// Returns the stored row with its incremented version, or
    /// [`DbError::EditConflict`](crate::DbError::EditConflict).
    pub async fn update(pool: &PgPool, category: &Category) -> DbResult<Category> {
        let query = format!(
            "UPDATE categories SET
                name = $3,
                slug = $4,
                image_url = $5,
                parent_id = $6,
                updated_by_id = $7,
                updated_at = NOW(),
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Category>(&query)
                .bind(category.id)
                .bind(category.version)
                .bind(&category.name)
                .bind(&category.slug)
                .bind(&category.image_url)
                .bind(category.parent_id)
                .bind(category.updated_by_id)
                .fetch_optional(pool),
        )
        .await?;
        versioned(row, ENTITY, category.id)
    }

    /// Hard-delete by id. Children keep existing with `parent_id` cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let result = with_timeout(
            POINT_TIMEOUT,
            sqlx::query("DELETE FROM categories WHERE id = $1")
                .bind(id)
                .execute(pool),
        )
        .await?;
        deleted(result, ENTITY, id)
    }

    pub async fn delete_by_slug(pool: &PgPool, slug: &str) -> DbResult<()> {
        let result = with_timeout(
            POINT_TIMEOUT,
            sqlx::query("DELETE FROM categories WHERE slug = $1")
                .bind(slug)
                .execute(pool),
        )
        .await?;
        deleted(result, ENTITY, slug)
    }
}
