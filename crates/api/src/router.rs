//! The one place the HTTP stack is assembled, used by `main.rs` and by the
//! integration tests alike.
//!
//! Two deadlines apply to a request. Each database call runs under the
//! storefront-db point or list timeout (5 s / 10 s); when one of those
//! expires the handler returns a 500 with the generic error body, because
//! the server failed, not the client. Around the whole request sits
//! `REQUEST_TIMEOUT_SECS`; when that fires the handler future is dropped,
//! which also cancels any in-flight query, and the client gets a bare 408.

use std::any::Any;

use axum::http::header::{ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE, LOCATION};
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// `/health` at the root, everything else under `/api/v1`.
///
/// Layers run outermost first: CORS answers preflights before anything
/// else, the request id is assigned before the trace span opens so every
/// log line carries it, and panics are caught inside the timeout so a
/// panicking handler still produces a response.
pub fn build_app_router(state: AppState, config: &ServerConfig) -> Router {
    let stack = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(CatchPanicLayer::custom(panic_response));

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(stack)
        .layer(cors(config))
        .with_state(state)
}

/// Storefront front-ends send `Accept-Language` and read `Location` after a
/// create, so both cross the CORS boundary.
fn cors(config: &ServerConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(config.cors_origins.clone())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, ACCEPT_LANGUAGE])
        .expose_headers([LOCATION, HeaderName::from_static("x-request-id")])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Same envelope as `AppError` so clients parse one error shape.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_default();
    tracing::error!(panic = %detail, "Handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "An internal error occurred",
            "code": "INTERNAL_ERROR",
        })),
    )
        .into_response()
}
