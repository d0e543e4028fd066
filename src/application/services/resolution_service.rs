//! Short code resolution with best-effort click tracking.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::entities::LinkId;
use crate::domain::repositories::{LinkRepository, LinkStoreError, RankingRepository};

/// Outcomes of a resolution that did not produce a destination.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No link has this code. An expected outcome, not a fault.
    #[error("short code `{0}` not found")]
    NotFound(String),

    /// The link store could not be queried.
    #[error("link store unavailable")]
    StoreUnavailable(#[from] LinkStoreError),
}

/// Service resolving short codes to their destinations.
///
/// Every successful resolution bumps the link's score in the ranking store.
/// That update never affects the outcome of the resolution and the caller
/// never waits for it: redirecting correctly takes priority over complete
/// click counts.
pub struct ResolutionService {
    link_repository: Arc<dyn LinkRepository>,
    ranking_repository: Arc<dyn RankingRepository>,
    increment_timeout: Duration,
}

impl ResolutionService {
    /// Creates a new resolution service.
    ///
    /// `increment_timeout` bounds how long a background click increment may
    /// run before it is abandoned.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        ranking_repository: Arc<dyn RankingRepository>,
        increment_timeout: Duration,
    ) -> Self {
        Self {
            link_repository,
            ranking_repository,
            increment_timeout,
        }
    }

    /// Returns the destination URL for `code` and records the click.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotFound`] if no link has this code; the
    /// ranking store is not touched in that case.
    /// Returns [`ResolveError::StoreUnavailable`] if the link store fails.
    pub async fn resolve(&self, code: &str) -> Result<String, ResolveError> {
        let Some(link) = self.link_repository.find_by_code(code).await? else {
            debug!(code, "Short code not found");
            metrics::counter!("links_not_found_total").increment(1);
            return Err(ResolveError::NotFound(code.to_string()));
        };

        self.record_click(link.id);
        metrics::counter!("links_resolved_total").increment(1);

        Ok(link.destination_url)
    }

    /// Schedules the score increment and returns immediately.
    ///
    /// The increment runs on its own task, detached from the request, so it
    /// completes even if the request future is dropped. A supervising task
    /// logs and counts failures, panics and timeouts.
    fn record_click(&self, link_id: LinkId) {
        let ranking = self.ranking_repository.clone();
        let timeout = self.increment_timeout;

        tokio::spawn(async move {
            let mut task = tokio::spawn(async move { ranking.increment(link_id).await });

            match tokio::time::timeout(timeout, &mut task).await {
                Ok(Ok(Ok(score))) => debug!(link_id, score, "Click recorded"),
                Ok(Ok(Err(e))) => {
                    metrics::counter!("ranking_increment_failures_total").increment(1);
                    warn!(link_id, error = %e, "Failed to record click");
                }
                Ok(Err(e)) => {
                    metrics::counter!("ranking_increment_failures_total").increment(1);
                    error!(link_id, error = %e, "Click recording task failed");
                }
                Err(_) => {
                    task.abort();
                    metrics::counter!("ranking_increment_failures_total").increment(1);
                    warn!(
                        link_id,
                        timeout_ms = timeout.as_millis() as u64,
                        "Click recording timed out"
                    );
                }
            }
        });
    }
}
