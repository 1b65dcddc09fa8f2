//! Repository for the `users` table.

use sqlx::PgPool;
use storefront_core::pagination::Metadata;
use storefront_core::types::DbId;

use super::{deleted, found, versioned};
use crate::error::DbResult;
use crate::models::user::{CreateUser, User, UserFilter, DEFAULT_SORT};
use crate::query::ListQuery;
use crate::{with_timeout, POINT_TIMEOUT};

const ENTITY: &str = "User";

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, phone, name, email, password_hash, role, is_active, \
                       created_at, updated_at, created_by_id, updated_by_id, version";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// The creator is also recorded as the last updater.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> DbResult<User> {
        let query = format!(
            "INSERT INTO users (phone, name, email, password_hash, role, created_by_id, updated_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {COLUMNS}"
        );
        with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, User>(&query)
                .bind(&input.phone)
                .bind(&input.name)
                .bind(&input.email)
                .bind(&input.password_hash)
                .bind(&input.role)
                .bind(input.created_by_id)
                .fetch_one(pool),
        )
        .await
    }

    pub async fn get_by_id(pool: &PgPool, id: DbId) -> DbResult<User> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, User>(&query).bind(id).fetch_optional(pool),
        )
        .await?;
        found(row, ENTITY, id)
    }

    /// Find a user by phone (exact match).
    pub async fn get_by_phone(pool: &PgPool, phone: &str) -> DbResult<User> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE phone = $1");
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, User>(&query).bind(phone).fetch_optional(pool),
        )
        .await?;
        found(row, ENTITY, phone)
    }

    pub async fn list(pool: &PgPool, filter: &UserFilter) -> DbResult<(Vec<User>, Metadata)> {
        let mut q = ListQuery::new("users", COLUMNS);
        q.common(&filter.common, Some("name"))
            .any_text("phone", &filter.phones)
            .any_text("role", &filter.roles)
            .eq_bool("is_active", filter.is_active)
            .order_by(&filter.common.sort, DEFAULT_SORT)
            .paginate(filter.common.page);
        q.fetch_page(pool, filter.common.page).await
    }

    /// Version-checked write of profile fields and password hash.
    ///
    /// Password changes go through here too, so a profile edit and a password
    /// change racing on the same user cannot both win.
    pub async fn update(pool: &PgPool, user: &User) -> DbResult<User> {
        let query = format!(
            "UPDATE users SET
                name = $3,
                email = $4,
                password_hash = $5,
                role = $6,
                is_active = $7,
                updated_by_id = $8,
                updated_at = NOW(),
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, User>(&query)
                .bind(user.id)
                .bind(user.version)
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(&user.role)
                .bind(user.is_active)
                .bind(user.updated_by_id)
                .fetch_optional(pool),
        )
        .await?;
        versioned(row, ENTITY, user.id)
    }

    /// Hard-delete a user. Their sessions are removed by cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let result = with_timeout(
            POINT_TIMEOUT,
            sqlx::query("DELETE FROM users WHERE id = $1").bind(id).execute(pool),
        )
        .await?;
        deleted(result, ENTITY, id)
    }
}
