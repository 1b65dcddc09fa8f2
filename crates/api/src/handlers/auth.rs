//! Handlers for the `/auth` resource (register, login, refresh, logout).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront_core::error::CoreError;
use storefront_core::roles::ROLE_CUSTOMER;
use storefront_core::validation::{validate_not_blank, validate_phone};
use storefront_db::models::session::CreateSession;
use storefront_db::models::user::{CreateUser, User, UserResponse};
use storefront_db::repositories::{SessionRepo, UserRepo};
use storefront_db::DbError;
use validator::Validate;

use crate::auth::jwt::{self, refresh_digest};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::context::ClientInfo;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid phone or password";
const INVALID_REFRESH: &str = "Invalid or expired refresh token";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Successful authentication response returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Self-service sign-up. Always creates a `customer`.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            phone: input.phone,
            name: input.name,
            email: input.email,
            password_hash,
            role: ROLE_CUSTOMER.to_string(),
            created_by_id: None,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "User registered");
    let response = create_auth_response(&state, user, ClientInfo::from_headers(&headers)).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with phone + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = match UserRepo::get_by_phone(&state.pool, &input.phone).await {
        Ok(user) => user,
        Err(DbError::NotFound { .. }) => return Err(unauthorized(INVALID_CREDENTIALS)),
        Err(e) => return Err(e.into()),
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = %user.id, "Failed login");
        return Err(unauthorized(INVALID_CREDENTIALS));
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    tracing::info!(user_id = %user.id, "User logged in");
    let response = create_auth_response(&state, user, ClientInfo::from_headers(&headers)).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a refresh token for a new pair. The old session is revoked under
/// its version, so two concurrent refreshes with the same token cannot both
/// succeed.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = refresh_digest(&input.refresh_token);

    let session = match SessionRepo::get_by_refresh_token_hash(&state.pool, &token_hash).await {
        Ok(session) => session,
        Err(DbError::NotFound { .. }) => return Err(unauthorized(INVALID_REFRESH)),
        Err(e) => return Err(e.into()),
    };

    match SessionRepo::revoke(&state.pool, &session).await {
        Ok(_) => {}
        Err(DbError::EditConflict { .. }) => {
            tracing::warn!(session_id = %session.id, "Refresh token reused concurrently");
            return Err(unauthorized(INVALID_REFRESH));
        }
        Err(e) => return Err(e.into()),
    }

    let user = match UserRepo::get_by_phone(&state.pool, &session.user_phone).await {
        Ok(user) => user,
        Err(DbError::NotFound { .. }) => return Err(unauthorized("User no longer exists")),
        Err(e) => return Err(e.into()),
    };

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, user, ClientInfo::from_headers(&headers)).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_phone(&state.pool, &auth_user.phone).await?;
    tracing::info!(user_id = %auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

/// Issue a token pair, persist its session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user: User,
    client: ClientInfo,
) -> AppResult<AuthResponse> {
    let tokens = jwt::issue(user.id, &user.phone, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_phone: user.phone.clone(),
            refresh_token_hash: tokens.refresh_token_hash,
            user_agent: client.user_agent,
            client_ip: client.client_ip,
            expires_at: tokens.refresh_expires_at,
        },
    )
    .await?;
    tracing::debug!(session_id = %session.id, user_id = %user.id, "Session created");

    Ok(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        expires_in: tokens.expires_in,
        user: UserResponse::from(user),
    })
}
