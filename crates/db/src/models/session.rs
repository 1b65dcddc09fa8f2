//! User session model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::filters::CommonFilter;
use storefront_core::sort::SortField;
use storefront_core::types::{DbId, Timestamp, Version};

pub const SORT_SAFELIST: &[&str] = &["user_phone", "expires_at", "created_at", "updated_at"];

pub const DEFAULT_SORT: &[SortField] = &[SortField::desc("created_at")];

/// A refresh-token session row from the `user_sessions` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Session {
    pub id: DbId,
    pub user_phone: String,
    #[serde(skip_serializing)]
    pub refresh_token_hash: String,
    pub user_agent: Option<String>,
    pub client_ip: Option<String>,
    pub is_revoked: bool,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub version: Version,
}

/// DTO for creating a new user session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_phone: String,
    pub refresh_token_hash: String,
    pub user_agent: Option<String>,
    pub client_ip: Option<String>,
    pub expires_at: Timestamp,
}

/// Sessions have no creator/updater columns, so only the id and timestamp
/// parts of `common` apply.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub common: CommonFilter,
    pub user_phones: Vec<String>,
    pub is_revoked: Option<bool>,
}
