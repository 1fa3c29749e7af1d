//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{shortcut}/`  - Shortcut redirect, optionally under `RESOLVE_PREFIX`
//! - `GET  /health`       - Health check
//! - `/api/*`             - JSON API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the routed application without path normalization.
///
/// The resolve route is registered with and without the trailing slash, so
/// this router is usable directly (as in the integration tests).
pub fn router(state: AppState) -> Router {
    let resolve = state.links().route_pattern();
    let resolve_slash = format!("{resolve}/");

    Router::new()
        .route(&resolve, get(redirect_handler))
        .route(&resolve_slash, get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service served by [`crate::server`].
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
