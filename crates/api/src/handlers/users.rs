//! Handlers for the `/users` resource.
//!
//! Listing, creation, lookup by phone and deletion are admin-only. A user may
//! read and edit their own profile and change their own password; admins may
//! do so for anyone.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use storefront_core::error::CoreError;
use storefront_core::roles::ROLE_CUSTOMER;
use storefront_core::types::{double_option, DbId, Version};
use storefront_core::validation::{validate_not_blank, validate_phone, validate_role};
use storefront_db::models::user::{
    CreateUser, UpdateUser, UserFilter, UserResponse, SORT_SAFELIST,
};
use storefront_db::repositories::{SessionRepo, UserRepo};
use validator::{Validate, ValidateEmail};

use super::{ensure_version, location};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::{AuthUser, RequireAdmin};
use crate::query::{boolean, text_list, ListParams};
use crate::response::{Created, Item, ListResponse};
use crate::state::AppState;

const ENTITY: &str = "User";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string for `GET /users`.
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    #[serde(flatten)]
    pub list: ListParams,
    pub phones: Option<String>,
    pub roles: Option<String>,
    pub is_active: Option<String>,
}

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
}

/// Request body for `PATCH /users/{id}`.
///
/// `role` and `is_active` may only be changed by an admin.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub expected_version: Option<Version>,
}

/// Request body for `PUT /users/{id}/password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Required when changing your own password.
    pub current_password: Option<String>,
    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,
    pub expected_version: Option<Version>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<UserListParams>,
) -> AppResult<ListResponse<UserResponse>> {
    let filter = UserFilter {
        common: params.list.to_filter(SORT_SAFELIST)?,
        phones: text_list(params.phones.as_deref()),
        roles: text_list(params.roles.as_deref()),
        is_active: boolean(params.is_active.as_deref()),
    };
    let (users, metadata) = UserRepo::list(&state.pool, &filter).await?;
    Ok(ListResponse::new((
        users.into_iter().map(UserResponse::from).collect(),
        metadata,
    )))
}

/// POST /api/v1/users
///
/// Create a user with any role. Defaults to `customer`.
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            phone: input.phone,
            name: input.name,
            email: input.email,
            password_hash,
            role: input.role.unwrap_or_else(|| ROLE_CUSTOMER.to_string()),
            created_by_id: Some(admin.user_id),
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, role = %user.role, by = %admin.user_id, "User created");
    Ok(Created::new(
        location("users", user.id),
        "user",
        UserResponse::from(user),
    ))
}

/// GET /api/v1/users/phone/{phone}
pub async fn get_user_by_phone(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(phone): Path<String>,
) -> AppResult<Item<UserResponse>> {
    let user = UserRepo::get_by_phone(&state.pool, &phone).await?;
    Ok(Item::new("user", UserResponse::from(user)))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Item<UserResponse>> {
    caller.ensure_self_or_admin(id)?;
    let user = UserRepo::get_by_id(&state.pool, id).await?;
    Ok(Item::new("user", UserResponse::from(user)))
}

/// PATCH /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Item<UserResponse>> {
    caller.ensure_self_or_admin(id)?;
    if !caller.is_admin() && (input.role.is_some() || input.is_active.is_some()) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only an admin may change role or active status".into(),
        )));
    }
    if let Some(Some(email)) = &input.email {
        if !email.validate_email() {
            return Err(CoreError::invalid_field("email", "must be a valid email address").into());
        }
    }

    let mut user = UserRepo::get_by_id(&state.pool, id).await?;
    ensure_version(ENTITY, id, user.version, input.expected_version)?;

    user.apply(&UpdateUser {
        name: input.name,
        email: input.email,
        role: input.role,
        is_active: input.is_active,
        updated_by_id: caller.user_id,
    });
    let user = UserRepo::update(&state.pool, &user).await?;

    tracing::info!(user_id = %user.id, version = user.version, by = %caller.user_id, "User updated");
    Ok(Item::new("user", UserResponse::from(user)))
}

/// PUT /api/v1/users/{id}/password
///
/// Changing your own password requires the current one. Every session of
/// the account is revoked afterwards.
pub async fn change_password(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    caller.ensure_self_or_admin(id)?;

    let mut user = UserRepo::get_by_id(&state.pool, id).await?;
    ensure_version(ENTITY, id, user.version, input.expected_version)?;

    if caller.user_id == id {
        let current = input.current_password.as_deref().unwrap_or_default();
        let matches = verify_password(current, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if !matches {
            return Err(CoreError::invalid_field("current_password", "is incorrect").into());
        }
    }

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    user.set_password_hash(password_hash, caller.user_id);
    let user = UserRepo::update(&state.pool, &user).await?;

    let revoked = SessionRepo::revoke_all_for_phone(&state.pool, &user.phone).await?;
    tracing::info!(user_id = %user.id, revoked, by = %caller.user_id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/{id}
///
/// Sessions go with the user; rows the user created keep existing with
/// their audit columns cleared.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    UserRepo::delete(&state.pool, id).await?;
    tracing::info!(user_id = %id, by = %admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
