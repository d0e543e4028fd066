//! Shared application state injected into handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{LinkService, MetricsService, ResolutionService};
use crate::domain::repositories::{LinkRepository, RankingRepository};

/// Services and store handles shared by every request.
///
/// Cheap to clone: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub resolution_service: Arc<ResolutionService>,
    pub metrics_service: Arc<MetricsService>,
    pub link_repository: Arc<dyn LinkRepository>,
    pub ranking_repository: Arc<dyn RankingRepository>,
}

impl AppState {
    /// Wires the services on top of the given stores.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        ranking_repository: Arc<dyn RankingRepository>,
        ranking_timeout: Duration,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository.clone())),
            resolution_service: Arc::new(ResolutionService::new(
                link_repository.clone(),
                ranking_repository.clone(),
                ranking_timeout,
            )),
            metrics_service: Arc::new(MetricsService::new(ranking_repository.clone())),
            link_repository,
            ranking_repository,
        }
    }
}
