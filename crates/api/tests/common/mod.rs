#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use storefront_api::auth::jwt;
use storefront_api::auth::password::hash_password;
use storefront_api::config::{JwtConfig, ServerConfig};
use storefront_api::router::build_app_router;
use storefront_api::state::AppState;
use storefront_core::locale::Locale;
use storefront_core::roles::{ROLE_ADMIN, ROLE_CUSTOMER};
use storefront_db::models::user::{CreateUser, User};
use storefront_db::repositories::UserRepo;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout: Duration::from_secs(30),
        shutdown_timeout: Duration::from_secs(5),
        session_retention: chrono::Duration::hours(24),
        default_locale: Locale::parse("en").unwrap(),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_ttl: chrono::Duration::minutes(15),
            refresh_ttl: chrono::Duration::days(7),
        },
    }
}

/// Build the full application router, middleware included, over `pool`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// A user inserted straight into the database plus a valid access token.
pub struct TestUser {
    pub user: User,
    pub token: String,
}

pub async fn seed_user(pool: &PgPool, phone: &str, role: &str) -> TestUser {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            phone: phone.to_string(),
            name: format!("User {phone}"),
            email: None,
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: role.to_string(),
            created_by_id: None,
        },
    )
    .await
    .unwrap();

    let token = jwt::issue(user.id, &user.phone, &user.role, &test_config().jwt)
        .unwrap()
        .access_token;
    TestUser { user, token }
}

pub async fn seed_admin(pool: &PgPool) -> TestUser {
    seed_user(pool, "+998900000001", ROLE_ADMIN).await
}

pub async fn seed_customer(pool: &PgPool, phone: &str) -> TestUser {
    seed_user(pool, phone, ROLE_CUSTOMER).await
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send a request through the router. `token` adds a Bearer header and
/// `body` is sent as JSON.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn get_with_language(app: Router, uri: &str, accept_language: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header(ACCEPT_LANGUAGE, accept_language)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
