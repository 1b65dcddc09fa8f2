//! Repository for the `brands` table.

use sqlx::PgPool;
use storefront_core::pagination::Metadata;
use storefront_core::types::DbId;

use super::{deleted, found, versioned};
use crate::error::DbResult;
use crate::models::brand::{Brand, BrandFilter, CreateBrand, DEFAULT_SORT};
use crate::query::ListQuery;
use crate::{with_timeout, POINT_TIMEOUT};

const ENTITY: &str = "Brand";

const COLUMNS: &str = "id, name, slug, logo_url, created_at, updated_at, \
                       created_by_id, updated_by_id, version";

pub struct BrandRepo;

impl BrandRepo {
    pub async fn create(pool: &PgPool, input: &CreateBrand) -> DbResult<Brand> {
        let query = format!(
            "INSERT INTO brands (name, slug, logo_url, created_by_id, updated_by_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Brand>(&query)
                .bind(&input.name)
                .bind(&input.slug)
                .bind(&input.logo_url)
                .bind(input.created_by_id)
                .bind(input.updated_by_id)
                .fetch_one(pool),
        )
        .await
    }

    pub async fn get_by_id(pool: &PgPool, id: DbId) -> DbResult<Brand> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE id = $1");
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Brand>(&query).bind(id).fetch_optional(pool),
        )
        .await?;
        found(row, ENTITY, id)
    }

    pub async fn get_by_slug(pool: &PgPool, slug: &str) -> DbResult<Brand> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE slug = $1");
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Brand>(&query).bind(slug).fetch_optional(pool),
        )
        .await?;
        found(row, ENTITY, slug)
    }

    pub async fn list(pool: &PgPool, filter: &BrandFilter) -> DbResult<(Vec<Brand>, Metadata)> {
        let mut q = ListQuery::new("brands", COLUMNS);
        q.common(&filter.common, Some("name"))
            .any_text("name", &filter.names)
            .any_text("slug", &filter.slugs)
            .order_by(&filter.common.sort, DEFAULT_SORT)
            .paginate(filter.common.page);
        q.fetch_page(pool, filter.common.page).await
    }

    /// Version-checked write of the whole mutable row.
    pub async fn update(pool: &PgPool, brand: &Brand) -> DbResult<Brand> {
        let query = format!(
            "UPDATE brands SET
                name = $3,
                slug = $4,
                logo_url = $5,
                updated_by_id = $6,
                updated_at = NOW(),
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Brand>(&query)
                .bind(brand.id)
                .bind(brand.version)
                .bind(&brand.name)
                .bind(&brand.slug)
                .bind(&brand.logo_url)
                .bind(brand.updated_by_id)
                .fetch_optional(pool),
        )
        .await?;
        versioned(row, ENTITY, brand.id)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let result = with_timeout(
            POINT_TIMEOUT,
            sqlx::query("DELETE FROM brands WHERE id = $1").bind(id).execute(pool),
        )
        .await?;
        deleted(result, ENTITY, id)
    }
}
