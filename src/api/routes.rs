//! API route configuration.

use crate::api::handlers::{
    create_link_handler, health_handler, list_links_handler, top_metrics_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /links`    - List every link, newest first
/// - `POST   /links`    - Create a link with a caller-chosen code
/// - `GET    /metrics`  - Click leaderboard, highest first
/// - `GET    /health`   - Store health check
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/metrics", get(top_metrics_handler))
        .route("/health", get(health_handler))
}
