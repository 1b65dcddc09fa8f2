//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::filters::CommonFilter;
use storefront_core::sort::SortField;
use storefront_core::types::{DbId, Timestamp, Version};

pub const SORT_SAFELIST: &[&str] = &["phone", "name", "role", "created_at", "updated_at"];

pub const DEFAULT_SORT: &[SortField] = &[SortField::desc("created_at")];

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub phone: String,
    pub name: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by_id: Option<DbId>,
    pub updated_by_id: Option<DbId>,
    pub version: Version,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub phone: String,
    pub name: String,
    pub email: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by_id: Option<DbId>,
    pub updated_by_id: Option<DbId>,
    pub version: Version,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            phone: user.phone,
            name: user.name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
            created_by_id: user.created_by_id,
            updated_by_id: user.updated_by_id,
            version: user.version,
        }
    }
}

/// DTO for creating a new user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub phone: String,
    pub name: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub role: String,
    /// `None` for self-registration.
    pub created_by_id: Option<DbId>,
}

/// Profile update. Phone and password have their own flows.
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<Option<String>>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub updated_by_id: DbId,
}

impl User {
    pub fn apply(&mut self, patch: &UpdateUser) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(email) = &patch.email {
            self.email.clone_from(email);
        }
        if let Some(role) = &patch.role {
            self.role.clone_from(role);
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.updated_by_id = Some(patch.updated_by_id);
    }

    /// Replace the stored hash, recording who did it.
    pub fn set_password_hash(&mut self, password_hash: String, updated_by_id: DbId) {
        self.password_hash = password_hash;
        self.updated_by_id = Some(updated_by_id);
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub common: CommonFilter,
    pub phones: Vec<String>,
    pub roles: Vec<String>,
    pub is_active: Option<bool>,
}
