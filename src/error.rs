//! HTTP-facing error type.
//!
//! Service errors are converted into [`AppError`] at the handler boundary.
//! Internal failures are logged where they happen; the response only
//! carries a generic message.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::application::services::{CreateLinkError, ResolveError};
use crate::domain::repositories::{LinkStoreError, RankingError};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Converts the error into its serializable body.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let (AppError::Validation { message, details }
        | AppError::NotFound { message, details }
        | AppError::Conflict { message, details }
        | AppError::Internal { message, details }) = self;

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CreateLinkError> for AppError {
    fn from(e: CreateLinkError) -> Self {
        match &e {
            CreateLinkError::Validation(_) => AppError::bad_request(
                "Invalid link",
                json!({ "fields": e.invalid_fields() }),
            ),
            CreateLinkError::DuplicateCode(code) => {
                AppError::conflict("Duplicated code", json!({ "code": code }))
            }
            CreateLinkError::StoreUnavailable(_) => AppError::internal("Internal error", json!({})),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::NotFound(code) => {
                AppError::not_found("Link not found", json!({ "code": code }))
            }
            ResolveError::StoreUnavailable(e) => e.into(),
        }
    }
}

impl From<LinkStoreError> for AppError {
    fn from(e: LinkStoreError) -> Self {
        tracing::error!(error = ?e, "Link store error");
        AppError::internal("Internal error", json!({}))
    }
}

impl From<RankingError> for AppError {
    fn from(e: RankingError) -> Self {
        tracing::error!(error = ?e, "Ranking store error");
        AppError::internal("Internal error", json!({}))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(
            "Invalid query parameters",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
