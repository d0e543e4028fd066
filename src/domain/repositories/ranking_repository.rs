//! Repository trait for the click ranking.

use crate::domain::entities::{ClickScore, LinkId};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a [`RankingRepository`].
#[derive(Debug, Error)]
pub enum RankingError {
    /// Connectivity or other infrastructure failure.
    #[error("ranking store unavailable: {0:#}")]
    Unavailable(#[source] anyhow::Error),

    /// An entry in the store could not be decoded into a score.
    #[error("corrupt ranking entry: {0}")]
    CorruptEntry(String),
}

impl RankingError {
    pub fn unavailable(error: impl Into<anyhow::Error>) -> Self {
        Self::Unavailable(error.into())
    }
}

/// Ordered counter structure keyed by link id.
///
/// Scores only ever grow by one. Entries with equal scores are ordered by
/// descending link id.
///
/// # Implementations
///
/// - [`crate::infrastructure::ranking::RedisRanking`] - Redis sorted set
/// - [`crate::infrastructure::ranking::MemoryRanking`] - In-process ordered index
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankingRepository: Send + Sync {
    /// Atomically adds one to the score of `link_id` and returns the new score.
    ///
    /// Creates the entry with score 1 if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::Unavailable`] if the store cannot be reached.
    async fn increment(&self, link_id: LinkId) -> Result<u64, RankingError>;

    /// Returns at most `k` scores, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::Unavailable`] if the store cannot be reached.
    async fn top_k(&self, k: usize) -> Result<Vec<ClickScore>, RankingError>;

    /// Returns the score of a single link, if it was ever incremented.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::Unavailable`] if the store cannot be reached.
    async fn score(&self, link_id: LinkId) -> Result<Option<u64>, RankingError>;

    /// Removes every score.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::Unavailable`] if the store cannot be reached.
    async fn reset(&self) -> Result<(), RankingError>;

    /// Checks if the store is reachable.
    async fn health_check(&self) -> bool;
}
