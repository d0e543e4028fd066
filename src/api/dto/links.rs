//! DTOs for link creation and listing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Link, LinkId};

/// Request to create a link under a caller-chosen code.
///
/// Field rules are enforced by the link service, not at deserialization.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub code: String,
    pub url: String,
}

/// Identifier of the newly created link.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLinkResponse {
    pub short_link_id: LinkId,
}

/// A stored link as returned by the listing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkItem {
    pub id: LinkId,
    pub code: String,
    pub destination_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkItem {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            code: link.code,
            destination_url: link.destination_url,
            created_at: link.created_at,
        }
    }
}
