//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a [`LinkRepository`].
#[derive(Debug, Error)]
pub enum LinkStoreError {
    /// The store's uniqueness constraint rejected the code.
    #[error("short code `{0}` already exists")]
    DuplicateCode(String),

    /// Connectivity or other infrastructure failure.
    #[error("link store unavailable: {0:#}")]
    Unavailable(#[source] anyhow::Error),
}

impl LinkStoreError {
    pub fn unavailable(error: impl Into<anyhow::Error>) -> Self {
        Self::Unavailable(error.into())
    }
}

/// Repository interface for durable short links.
///
/// Uniqueness of `code` is enforced by the implementation itself, so two
/// concurrent `create` calls with the same code resolve to exactly one
/// success and one [`LinkStoreError::DuplicateCode`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`LinkStoreError::DuplicateCode`] if the code is taken.
    /// Returns [`LinkStoreError::Unavailable`] on infrastructure errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, LinkStoreError>;

    /// Finds a link by its exact, case-sensitive short code.
    ///
    /// # Errors
    ///
    /// Returns [`LinkStoreError::Unavailable`] on infrastructure errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, LinkStoreError>;

    /// Returns every link, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`LinkStoreError::Unavailable`] on infrastructure errors.
    async fn list_all(&self) -> Result<Vec<Link>, LinkStoreError>;

    /// Checks if the store is reachable.
    async fn health_check(&self) -> bool;
}
