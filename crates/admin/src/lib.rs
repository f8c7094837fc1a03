//! ProteinAdmin library.
//!
//! Server-rendered admin panel for a supplement subscription business:
//! members, their shipping addresses and orders, held in memory behind a
//! mock login. Exposed as a library so the binary and the integration
//! tests build the exact same router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod router;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;

use axum::{Router, http::HeaderValue, routing::get};
use tower_http::{
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use state::AppState;

/// Build the full application router.
///
/// `/health` sits outside the login guard; every other path goes through
/// [`middleware::route_guard`].
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    let pages = routes::routes().layer(axum::middleware::from_fn(middleware::route_guard));

    Router::new()
        .route("/health", get(routes::health))
        .merge(pages)
        .layer(session_layer)
        .layer(SetResponseHeaderLayer::if_not_present(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
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
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
