//! Handlers for link creation and listing.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::links::{CreateLinkRequest, CreateLinkResponse, LinkItem};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link with a caller-chosen code.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "code": "abc123", "url": "https://example.com/a" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// { "short_link_id": 1 }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request listing the invalid fields if the code is shorter
/// than 3 characters or the URL is not absolute.
/// Returns 400 Bad Request if the body is not valid JSON or lacks a field.
/// Returns 409 Conflict if the code is already taken.
/// Returns 500 Internal Server Error on any other failure.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let Json(payload) = payload?;

    let link = state
        .link_service
        .create_link(payload.code, payload.url)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            short_link_id: link.id,
        }),
    ))
}

/// Lists every link, most recently created first.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": 1,
///     "code": "abc123",
///     "destination_url": "https://example.com/a",
///     "created_at": "2025-01-01T12:00:00Z"
///   }
/// ]
/// ```
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkItem>>, AppError> {
    let links = state.link_service.list_links().await?;

    Ok(Json(links.into_iter().map(LinkItem::from).collect()))
}
