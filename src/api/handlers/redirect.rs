//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the code in the link store
/// 2. Record the click in the ranking store (best-effort)
/// 3. Return 301 Moved Permanently
///
/// A failing ranking store never turns a redirect into an error; see
/// [`crate::application::services::ResolutionService`].
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 500 Internal Server Error if the link store is unavailable.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let destination_url = state.resolution_service.resolve(&code).await?;

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, destination_url)],
    ))
}
