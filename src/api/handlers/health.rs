//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with store checks.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response Codes
///
/// - **200 OK**: Both stores reachable
/// - **503 Service Unavailable**: One or more stores unreachable
///
/// A down ranking store does not stop redirects, but it is still reported
/// here so operators notice clicks are being lost.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "link_store": { "status": "ok" },
///     "ranking_store": { "status": "ok" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (link_ok, ranking_ok) = tokio::join!(
        state.link_repository.health_check(),
        state.ranking_repository.health_check()
    );

    let checks = HealthChecks {
        link_store: CheckStatus::from_check(link_ok, "Link store"),
        ranking_store: CheckStatus::from_check(ranking_ok, "Ranking store"),
    };

    let all_healthy = checks.link_store.is_ok() && checks.ranking_store.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        checks,
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
