//! In-process implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use crate::domain::entities::{Link, LinkId, NewLink};
use crate::domain::repositories::{LinkRepository, LinkStoreError};

/// Link repository kept entirely in memory.
///
/// Used when no database is configured and in tests. Contents are lost when
/// the process exits. The code index and the id sequence are updated under
/// one write lock, which is what makes code uniqueness race-free.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: LinkId,
    by_code: HashMap<String, Link>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        debug!("Using in-memory link store");
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, LinkStoreError> {
        let mut inner = self.inner.write();

        if inner.by_code.contains_key(&new_link.code) {
            return Err(LinkStoreError::DuplicateCode(new_link.code));
        }

        inner.last_id += 1;
        let link = Link::new(
            inner.last_id,
            new_link.code,
            new_link.destination_url,
            Utc::now(),
        );
        inner.by_code.insert(link.code.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, LinkStoreError> {
        Ok(self.inner.read().by_code.get(code).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Link>, LinkStoreError> {
        let mut links: Vec<Link> = self.inner.read().by_code.values().cloned().collect();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(links)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
