//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`       - Short link redirect
//! - `/api/*`             - REST API (links, leaderboard and health check)
//!
//! Everything except redirects lives under `/api`, so any routable code
//! other than `api` itself can be redirected.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with every route and the tracing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/{code}", get(redirect_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with trailing slashes trimmed.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
