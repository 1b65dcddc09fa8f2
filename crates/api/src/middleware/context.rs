//! Per-request context for public reads.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{ACCEPT_LANGUAGE, USER_AGENT};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use storefront_core::locale::Locale;

use crate::state::AppState;

/// The negotiated locale, carried as a typed field instead of a loose
/// request extension.
///
/// Never rejects: handlers that need the caller take [`super::auth::AuthUser`]
/// explicitly, so an `Authorization` header has no effect here.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// From `Accept-Language`, falling back to the configured default.
    pub locale: Locale,
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let locale = header(&parts.headers, ACCEPT_LANGUAGE.as_str())
            .and_then(Locale::from_accept_language)
            .unwrap_or_else(|| state.config.default_locale.clone());

        Ok(RequestContext { locale })
    }
}

/// Client details recorded on a new session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub user_agent: Option<String>,
    pub client_ip: Option<String>,
}

impl ClientInfo {
    /// Read `User-Agent` and the first `X-Forwarded-For` hop (or `X-Real-IP`).
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let client_ip = header(headers, "x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .or_else(|| header(headers, "x-real-ip"))
            .map(str::to_string);

        Self {
            user_agent: header(headers, USER_AGENT.as_str()).map(str::to_string),
            client_ip,
        }
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
