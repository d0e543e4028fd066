//! Click leaderboard service.

use std::sync::Arc;

use crate::domain::entities::ClickScore;
use crate::domain::repositories::{RankingError, RankingRepository};

/// Number of entries returned when no limit is requested.
pub const DEFAULT_TOP_LIMIT: usize = 50;

/// Service reading the click ranking for leaderboard views.
pub struct MetricsService {
    ranking_repository: Arc<dyn RankingRepository>,
}

impl MetricsService {
    /// Creates a new metrics service.
    pub fn new(ranking_repository: Arc<dyn RankingRepository>) -> Self {
        Self { ranking_repository }
    }

    /// Returns up to `k` links with the most clicks, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError`] if the ranking store fails.
    pub async fn top_metrics(&self, k: usize) -> Result<Vec<ClickScore>, RankingError> {
        self.ranking_repository.top_k(k).await
    }

    /// Clears every score.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError`] if the ranking store fails.
    pub async fn reset(&self) -> Result<(), RankingError> {
        tracing::warn!("Resetting click ranking");
        self.ranking_repository.reset().await
    }
}
