//! Aggregate click count for a single link.

use super::link::LinkId;

/// Number of successful resolutions recorded for a link.
///
/// Holds a weak reference to the link: a score may outlive the link row it
/// was recorded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickScore {
    pub link_id: LinkId,
    pub score: u64,
}

impl ClickScore {
    pub fn new(link_id: LinkId, score: u64) -> Self {
        Self { link_id, score }
    }
}
