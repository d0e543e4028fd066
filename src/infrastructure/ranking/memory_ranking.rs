//! In-process ordered counter for click ranking.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use crate::domain::entities::{ClickScore, LinkId};
use crate::domain::repositories::{RankingError, RankingRepository};

/// Ordering key: higher score first, then higher link id.
type RankKey = (Reverse<u64>, Reverse<LinkId>);

/// Click ranking kept in memory.
///
/// Scores live in a hash map for point lookups, mirrored into an ordered set
/// so the leaderboard is read off the front without sorting. Both are only
/// ever touched under the same lock.
///
/// Scores do not survive a restart.
#[derive(Default)]
pub struct MemoryRanking {
    board: Mutex<Board>,
    stand_in: bool,
}

#[derive(Default)]
struct Board {
    scores: HashMap<LinkId, u64>,
    order: BTreeSet<RankKey>,
}

impl MemoryRanking {
    pub fn new() -> Self {
        debug!("Using in-memory click ranking");
        Self::default()
    }

    /// A ranking standing in for a configured store that could not be reached.
    ///
    /// It counts clicks like [`MemoryRanking::new`] but reports itself
    /// unhealthy, so the outage stays visible.
    pub fn stand_in() -> Self {
        debug!("Using in-memory click ranking in place of an unreachable store");
        Self {
            stand_in: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl RankingRepository for MemoryRanking {
    async fn increment(&self, link_id: LinkId) -> Result<u64, RankingError> {
        let mut board = self.board.lock();
        let Board { scores, order } = &mut *board;

        let score = scores.entry(link_id).or_insert(0);
        if *score > 0 {
            order.remove(&(Reverse(*score), Reverse(link_id)));
        }
        *score += 1;
        order.insert((Reverse(*score), Reverse(link_id)));

        Ok(*score)
    }

    async fn top_k(&self, k: usize) -> Result<Vec<ClickScore>, RankingError> {
        let board = self.board.lock();

        Ok(board
            .order
            .iter()
            .take(k)
            .map(|(Reverse(score), Reverse(link_id))| ClickScore::new(*link_id, *score))
            .collect())
    }

    async fn score(&self, link_id: LinkId) -> Result<Option<u64>, RankingError> {
        Ok(self.board.lock().scores.get(&link_id).copied())
    }

    async fn reset(&self) -> Result<(), RankingError> {
        let mut board = self.board.lock();
        board.scores.clear();
        board.order.clear();
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.stand_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    async fn concurrent_increments(n: usize) -> u64 {
        let ranking = Arc::new(MemoryRanking::new());

        let handles: Vec<_> = (0..n)
            .map(|_| {
                let ranking = ranking.clone();
                tokio::spawn(async move { ranking.increment(7).await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        ranking.score(7).await.unwrap().unwrap_or(0)
    }

    #[tokio::test]
    async fn test_increment_creates_entry() {
        let ranking = MemoryRanking::new();

        assert_eq!(ranking.score(1).await.unwrap(), None);
        assert_eq!(ranking.increment(1).await.unwrap(), 1);
        assert_eq!(ranking.increment(1).await.unwrap(), 2);
        assert_eq!(ranking.score(1).await.unwrap(), Some(2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_increments_are_not_lost() {
        for n in [1, 10, 1000] {
            assert_eq!(concurrent_increments(n).await, n as u64);
        }
    }

    #[tokio::test]
    async fn test_top_k_orders_by_score_descending() {
        let ranking = MemoryRanking::new();
        for (link_id, clicks) in [(1, 3), (2, 5), (3, 1), (4, 4)] {
            for _ in 0..clicks {
                ranking.increment(link_id).await.unwrap();
            }
        }

        let top = ranking.top_k(3).await.unwrap();

        assert_eq!(
            top,
            vec![
                ClickScore::new(2, 5),
                ClickScore::new(4, 4),
                ClickScore::new(1, 3),
            ]
        );
    }

    #[tokio::test]
    async fn test_top_k_breaks_ties_by_descending_id() {
        let ranking = MemoryRanking::new();
        for link_id in [3, 10, 5] {
            ranking.increment(link_id).await.unwrap();
        }

        let ids: Vec<LinkId> = ranking
            .top_k(10)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.link_id)
            .collect();

        assert_eq!(ids, vec![10, 5, 3]);
    }

    #[tokio::test]
    async fn test_top_k_zero_and_empty() {
        let ranking = MemoryRanking::new();
        assert!(ranking.top_k(5).await.unwrap().is_empty());

        ranking.increment(1).await.unwrap();
        assert!(ranking.top_k(0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reset_clears_scores() {
        let ranking = MemoryRanking::new();
        ranking.increment(1).await.unwrap();
        ranking.increment(2).await.unwrap();

        ranking.reset().await.unwrap();

        assert!(ranking.top_k(10).await.unwrap().is_empty());
        assert_eq!(ranking.score(1).await.unwrap(), None);
        assert_eq!(ranking.increment(1).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stand_in_counts_but_reports_unhealthy() {
        let ranking = MemoryRanking::stand_in();

        assert_eq!(ranking.increment(1).await.unwrap(), 1);
        assert!(!ranking.health_check().await);
        assert!(MemoryRanking::new().health_check().await);
    }
}
