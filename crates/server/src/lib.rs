//! Studylamp API server library.
//!
//! This crate provides the server functionality as a library,
//! allowing it to be tested and reused. The binary in `main.rs` only
//! loads configuration and serves [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod completion;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, http::Method, http::header, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::state::AppState;

/// Build the application router with all routes and middleware.
///
/// Sentry layers are applied by the binary, not here; tests exercise
/// the router without a Sentry client.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .layer(cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record("latency_ms", latency.as_millis() as u64);
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// CORS policy for browser-extension callers.
///
/// Any origin may call with GET/POST/OPTIONS; only the Content-Type and
/// Authorization request headers are allowed through.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
