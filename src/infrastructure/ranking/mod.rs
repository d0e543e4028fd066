//! Click ranking stores.
//!
//! Two implementations of [`crate::domain::repositories::RankingRepository`]:
//! - [`RedisRanking`] - Production sorted set shared by every instance
//! - [`MemoryRanking`] - Per-process ordered index for development and tests

mod memory_ranking;
mod redis_ranking;

pub use memory_ranking::MemoryRanking;
pub use redis_ranking::RedisRanking;
