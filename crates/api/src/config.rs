//! Process configuration.
//!
//! Read once at start-up into immutable structs that [`crate::state::AppState`]
//! shares by `Arc`. A variable that is set but does not parse aborts start-up;
//! an unset one takes its default.

use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use storefront_core::locale::Locale;

/// HTTP server, session and locale settings.
///
/// | Env Var                   | Default                 |
/// |---------------------------|-------------------------|
/// | `HOST`                    | `0.0.0.0`               |
/// | `PORT`                    | `3000`                  |
/// | `CORS_ORIGINS`            | `http://localhost:5173` |
/// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
/// | `SHUTDOWN_TIMEOUT_SECS`   | `30`                    |
/// | `SESSION_RETENTION_HOURS` | `24`                    |
/// | `DEFAULT_LOCALE`          | `en`                    |
///
/// plus the [`JwtConfig`] variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed to call the API, comma-separated in the env.
    pub cors_origins: Vec<HeaderValue>,
    /// Whole-request deadline enforced by the router.
    pub request_timeout: Duration,
    /// How long shutdown waits for background jobs.
    pub shutdown_timeout: Duration,
    /// Revoked or expired sessions older than this are purged.
    pub session_retention: chrono::Duration,
    /// Used when a request carries no usable `Accept-Language`.
    pub default_locale: Locale,
    pub jwt: JwtConfig,
}

/// Token signing settings.
///
/// | Env Var                   | Required | Default |
/// |---------------------------|----------|---------|
/// | `JWT_SECRET`              | **yes**  | --      |
/// | `JWT_ACCESS_EXPIRY_MINS`  | no       | `15`    |
/// | `JWT_REFRESH_EXPIRY_DAYS` | no       | `7`     |
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret for HS256.
    pub secret: String,
    pub access_ttl: chrono::Duration,
    pub refresh_ttl: chrono::Duration,
}

impl ServerConfig {
    /// # Panics
    ///
    /// On a missing `JWT_SECRET` or any malformed value.
    pub fn from_env() -> Self {
        Self::load(&|name| std::env::var(name).ok())
    }

    fn load(env: &dyn Fn(&str) -> Option<String>) -> Self {
        let cors_origins = env("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .unwrap_or_else(|_| panic!("CORS_ORIGINS contains an invalid origin: {origin:?}"))
            })
            .collect();

        let request_timeout_secs: u64 = parsed(env, "REQUEST_TIMEOUT_SECS", 30);
        assert!(request_timeout_secs > 0, "REQUEST_TIMEOUT_SECS must be positive");

        let default_locale = match env("DEFAULT_LOCALE") {
            Some(tag) => Locale::parse(&tag)
                .unwrap_or_else(|| panic!("DEFAULT_LOCALE is not a language tag: {tag:?}")),
            None => Locale::parse("en").expect("en is a valid locale"),
        };

        Self {
            host: env("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parsed(env, "PORT", 3000),
            cors_origins,
            request_timeout: Duration::from_secs(request_timeout_secs),
            shutdown_timeout: Duration::from_secs(parsed(env, "SHUTDOWN_TIMEOUT_SECS", 30)),
            session_retention: chrono::Duration::hours(parsed::<u32>(
                env,
                "SESSION_RETENTION_HOURS",
                24,
            )
            .into()),
            default_locale,
            jwt: JwtConfig::load(env),
        }
    }
}

impl JwtConfig {
    fn load(env: &dyn Fn(&str) -> Option<String>) -> Self {
        let secret = env("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .expect("JWT_SECRET must be set and non-empty");

        Self {
            secret,
            access_ttl: chrono::Duration::minutes(
                parsed::<u32>(env, "JWT_ACCESS_EXPIRY_MINS", 15).into(),
            ),
            refresh_ttl: chrono::Duration::days(
                parsed::<u32>(env, "JWT_REFRESH_EXPIRY_DAYS", 7).into(),
            ),
        }
    }
}

fn parsed<T: FromStr>(env: &dyn Fn(&str) -> Option<String>, name: &str, default: T) -> T {
    match env(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{name} has an invalid value: {raw:?}")),
        None => default,
    }
}
