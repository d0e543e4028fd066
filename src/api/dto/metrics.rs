//! DTOs for the click leaderboard.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::application::services::DEFAULT_TOP_LIMIT;
use crate::domain::entities::{ClickScore, LinkId};

/// Largest leaderboard a single request may ask for.
pub const MAX_TOP_LIMIT: usize = 1000;

/// Leaderboard query parameters.
///
/// Uses `serde_with` to parse the limit from the query string as an integer.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct TopMetricsParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<usize>,
}

impl TopMetricsParams {
    /// Returns the requested limit, defaulting to 50.
    ///
    /// # Validation
    ///
    /// The limit must not exceed [`MAX_TOP_LIMIT`]. Zero is allowed and
    /// yields an empty leaderboard.
    pub fn validated_limit(&self) -> Result<usize, String> {
        let limit = self.limit.unwrap_or(DEFAULT_TOP_LIMIT);

        if limit > MAX_TOP_LIMIT {
            return Err(format!("Limit must be at most {}", MAX_TOP_LIMIT));
        }

        Ok(limit)
    }
}

/// One leaderboard entry.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricItem {
    pub link_id: LinkId,
    pub clicks: u64,
}

impl From<ClickScore> for MetricItem {
    fn from(score: ClickScore) -> Self {
        Self {
            link_id: score.link_id,
            clicks: score.score,
        }
    }
}
