//! Handler for the click leaderboard.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::json;

use crate::api::dto::metrics::{MetricItem, TopMetricsParams};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the links with the most clicks.
///
/// # Endpoint
///
/// `GET /api/metrics`
///
/// # Query Parameters
///
/// - `limit` (optional): Number of entries (default: 50, max: 1000)
///
/// # Response
///
/// Sorted by clicks, highest first. Equal counts are ordered by descending
/// link id.
///
/// ```json
/// [
///   { "link_id": 1, "clicks": 3 },
///   { "link_id": 4, "clicks": 1 }
/// ]
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the limit is not a number or is too large.
/// Returns 500 Internal Server Error if the ranking store is unavailable.
pub async fn top_metrics_handler(
    State(state): State<AppState>,
    params: Result<Query<TopMetricsParams>, QueryRejection>,
) -> Result<Json<Vec<MetricItem>>, AppError> {
    let Query(params) = params?;
    let limit = params
        .validated_limit()
        .map_err(|e| AppError::bad_request(e, json!({ "limit": params.limit })))?;

    let top = state.metrics_service.top_metrics(limit).await?;

    Ok(Json(top.into_iter().map(MetricItem::from).collect()))
}
