//! Redis sorted-set implementation of click ranking.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::entities::{ClickScore, LinkId};
use crate::domain::repositories::{RankingError, RankingRepository};

/// Click ranking stored in a single Redis sorted set.
///
/// `ZINCRBY` makes every increment atomic on the server. Members are link ids
/// zero-padded to a fixed width, so Redis' lexicographic tie-break on equal
/// scores matches numeric order and `ZREVRANGE` yields ties by descending id.
pub struct RedisRanking {
    client: ConnectionManager,
    key: String,
}

impl From<redis::RedisError> for RankingError {
    fn from(e: redis::RedisError) -> Self {
        RankingError::unavailable(e)
    }
}

impl RedisRanking {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `key` - Name of the sorted set holding the scores (`RANKING_KEY`)
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::Unavailable`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, key: impl Into<String>) -> Result<Self, RankingError> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        let key = key.into();
        info!(key = %key, "Connected to Redis ranking");

        Ok(Self {
            client: manager,
            key,
        })
    }

    fn member(link_id: LinkId) -> String {
        format!("{:019}", link_id)
    }

    fn parse_member(member: &str) -> Result<LinkId, RankingError> {
        member
            .parse()
            .map_err(|_| RankingError::CorruptEntry(format!("member `{}`", member)))
    }

    fn parse_score(score: f64) -> Result<u64, RankingError> {
        if score.is_finite() && score >= 0.0 && score.fract() == 0.0 {
            Ok(score as u64)
        } else {
            Err(RankingError::CorruptEntry(format!("score `{}`", score)))
        }
    }
}

#[async_trait]
impl RankingRepository for RedisRanking {
    async fn increment(&self, link_id: LinkId) -> Result<u64, RankingError> {
        let mut conn = self.client.clone();

        let score: f64 = redis::cmd("ZINCRBY")
            .arg(&self.key)
            .arg(1)
            .arg(Self::member(link_id))
            .query_async(&mut conn)
            .await?;

        debug!(link_id, score, "Ranking ZINCRBY");
        Self::parse_score(score)
    }

    async fn top_k(&self, k: usize) -> Result<Vec<ClickScore>, RankingError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut conn = self.client.clone();

        let entries: Vec<(String, f64)> = redis::cmd("ZREVRANGE")
            .arg(&self.key)
            .arg(0)
            .arg(k - 1)
            .arg("WITHSCORES")
            .query_async(&mut conn)
            .await?;

        entries
            .into_iter()
            .map(|(member, score)| {
                Ok(ClickScore::new(
                    Self::parse_member(&member)?,
                    Self::parse_score(score)?,
                ))
            })
            .collect()
    }

    async fn score(&self, link_id: LinkId) -> Result<Option<u64>, RankingError> {
        let mut conn = self.client.clone();

        let score: Option<f64> = redis::cmd("ZSCORE")
            .arg(&self.key)
            .arg(Self::member(link_id))
            .query_async(&mut conn)
            .await?;

        score.map(Self::parse_score).transpose()
    }

    async fn reset(&self) -> Result<(), RankingError> {
        let mut conn = self.client.clone();
        conn.del::<_, i32>(&self.key).await?;
        info!(key = %self.key, "Ranking reset");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
