//! Application layer services implementing business logic.
//!
//! Services consume the repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Validated link creation and listing
//! - [`services::resolution_service::ResolutionService`] - Code lookup plus click tracking
//! - [`services::metrics_service::MetricsService`] - Click leaderboard

pub mod services;
