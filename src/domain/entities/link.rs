//! Link entity representing a short-code mapping.

use chrono::{DateTime, Utc};
use validator::{Validate, ValidationError};

/// Codes that collide with fixed top-level routes.
pub const RESERVED_CODES: &[&str] = &["api"];

/// Store-assigned identifier of a link. Also the key of its click score.
pub type LinkId = i64;

/// A short code mapped to its destination.
///
/// Links are immutable once stored. The `id` is what the ranking store is
/// keyed by, never the `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: LinkId,
    pub code: String,
    pub destination_url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: LinkId,
        code: String,
        destination_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            code,
            destination_url,
            created_at,
        }
    }
}

/// Input data for creating a new link.
///
/// Validation runs in the application layer before any store is touched.
#[derive(Debug, Clone, Validate)]
pub struct NewLink {
    #[validate(
        length(min = 3, message = "Code must be at least 3 characters"),
        custom(function = "validate_routable_code")
    )]
    pub code: String,

    #[validate(url(message = "Must be a well-formed absolute URL"))]
    pub destination_url: String,
}

impl NewLink {
    pub fn new(code: impl Into<String>, destination_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            destination_url: destination_url.into(),
        }
    }
}

/// A code must fit in a single path segment and must not shadow a route.
fn validate_routable_code(code: &str) -> Result<(), ValidationError> {
    if code.contains('/') {
        return Err(ValidationError::new("code_has_slash")
            .with_message("Code must not contain '/'".into()));
    }

    if RESERVED_CODES.contains(&code) {
        return Err(ValidationError::new("code_reserved")
            .with_message(format!("Code '{}' is reserved", code).into()));
    }

    Ok(())
}
