//! Repository for the `user_sessions` table.

use sqlx::PgPool;
use storefront_core::pagination::Metadata;
use storefront_core::types::{DbId, Timestamp};

use super::{deleted, found, versioned};
use crate::error::DbResult;
use crate::models::session::{CreateSession, Session, SessionFilter, DEFAULT_SORT};
use crate::query::ListQuery;
use crate::{with_timeout, POINT_TIMEOUT};

const ENTITY: &str = "Session";

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_phone, refresh_token_hash, user_agent, client_ip, is_revoked, \
                       expires_at, created_at, updated_at, version";

/// Provides CRUD operations for user sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSession) -> DbResult<Session> {
        let query = format!(
            "INSERT INTO user_sessions (user_phone, refresh_token_hash, user_agent, client_ip, expires_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Session>(&query)
                .bind(&input.user_phone)
                .bind(&input.refresh_token_hash)
                .bind(&input.user_agent)
                .bind(&input.client_ip)
                .bind(input.expires_at)
                .fetch_one(pool),
        )
        .await
    }

    pub async fn get_by_id(pool: &PgPool, id: DbId) -> DbResult<Session> {
        let query = format!("SELECT {COLUMNS} FROM user_sessions WHERE id = $1");
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Session>(&query).bind(id).fetch_optional(pool),
        )
        .await?;
        found(row, ENTITY, id)
    }

    /// Find an active session by its refresh token hash.
    ///
    /// Revoked and expired sessions are reported as not found.
    pub async fn get_by_refresh_token_hash(pool: &PgPool, hash: &str) -> DbResult<Session> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = $1
               AND is_revoked = false
               AND expires_at > NOW()"
        );
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Session>(&query).bind(hash).fetch_optional(pool),
        )
        .await?;
        found(row, ENTITY, "refresh token")
    }

    pub async fn list(pool: &PgPool, filter: &SessionFilter) -> DbResult<(Vec<Session>, Metadata)> {
        let common = &filter.common;
        let mut q = ListQuery::new("user_sessions", COLUMNS);
        q.any_id("id", &common.ids)
            .date_range("created_at", &common.created)
            .date_range("updated_at", &common.updated)
            .any_text("user_phone", &filter.user_phones)
            .eq_bool("is_revoked", filter.is_revoked)
            .order_by(&common.sort, DEFAULT_SORT)
            .paginate(common.page);
        q.fetch_page(pool, common.page).await
    }

    /// Version-checked revocation of one session.
    ///
    /// Two refreshes racing on the same token both load version N; only the
    /// first revoke lands and the other gets an edit conflict.
    pub async fn revoke(pool: &PgPool, session: &Session) -> DbResult<Session> {
        let query = format!(
            "UPDATE user_sessions SET
                is_revoked = true,
                updated_at = NOW(),
                version = version + 1
             WHERE id = $1 AND version = $2
             RETURNING {COLUMNS}"
        );
        let row = with_timeout(
            POINT_TIMEOUT,
            sqlx::query_as::<_, Session>(&query)
                .bind(session.id)
                .bind(session.version)
                .fetch_optional(pool),
        )
        .await?;
        versioned(row, ENTITY, session.id)
    }

    /// Revoke all active sessions for a phone. Returns the count of revoked sessions.
    pub async fn revoke_all_for_phone(pool: &PgPool, phone: &str) -> DbResult<u64> {
        let result = with_timeout(
            POINT_TIMEOUT,
            sqlx::query(
                "UPDATE user_sessions SET
                    is_revoked = true,
                    updated_at = NOW(),
                    version = version + 1
                 WHERE user_phone = $1 AND is_revoked = false",
            )
            .bind(phone)
            .execute(pool),
        )
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let result = with_timeout(
            POINT_TIMEOUT,
            sqlx::query("DELETE FROM user_sessions WHERE id = $1")
                .bind(id)
                .execute(pool),
        )
        .await?;
        deleted(result, ENTITY, id)
    }

    /// Delete sessions that expired, or were revoked, before `cutoff`.
    /// Returns the count of deleted rows.
    pub async fn purge_expired(pool: &PgPool, cutoff: Timestamp) -> DbResult<u64> {
        let result = with_timeout(
            POINT_TIMEOUT,
            sqlx::query(
                "DELETE FROM user_sessions
                 WHERE expires_at < $1 OR (is_revoked = true AND updated_at < $1)",
            )
            .bind(cutoff)
            .execute(pool),
        )
        .await?;
        Ok(result.rows_affected())
    }
}
