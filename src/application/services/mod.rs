//! Business logic services for the application layer.

pub mod link_service;
pub mod metrics_service;
pub mod resolution_service;

pub use link_service::{CreateLinkError, LinkService};
pub use metrics_service::{DEFAULT_TOP_LIMIT, MetricsService};
pub use resolution_service::{ResolutionService, ResolveError};
