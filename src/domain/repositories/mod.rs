//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the two stores the core depends on. Concrete
//! implementations live in `crate::infrastructure`, and mock
//! implementations are auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Durable short link storage with code uniqueness
//! - [`RankingRepository`] - Click counters ordered by score
//!
//! The two stores are never coupled transactionally.

pub mod link_repository;
pub mod ranking_repository;

pub use link_repository::{LinkRepository, LinkStoreError};
pub use ranking_repository::{RankingError, RankingRepository};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use ranking_repository::MockRankingRepository;
