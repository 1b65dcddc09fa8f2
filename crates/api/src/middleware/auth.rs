//! Caller identity extractors.
//!
//! [`AuthUser`] trusts the access token alone; [`RequireAdmin`] additionally
//! gates catalog writes and account administration on the `admin` role.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use storefront_core::error::CoreError;
use storefront_core::roles::ROLE_ADMIN;
use storefront_core::types::DbId;

use crate::auth::jwt::decode_access;
use crate::error::AppError;
use crate::state::AppState;

/// The caller named by a valid `Authorization: Bearer <access token>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    /// Key of the caller's sessions.
    pub phone: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Admins may act on anyone; everybody else only on themselves.
    pub fn ensure_self_or_admin(&self, user_id: DbId) -> Result<(), AppError> {
        if self.is_admin() || self.user_id == user_id {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(
                "You may only access your own account".into(),
            )))
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = decode_access(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            phone: claims.phone,
            role: claims.role,
        })
    }
}

/// An [`AuthUser`] whose role is `admin`; anyone else gets 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(RequireAdmin(user))
        } else {
            tracing::debug!(user_id = %user.user_id, role = %user.role, "Admin route refused");
            Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )))
        }
    }
}
