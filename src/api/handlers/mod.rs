//! HTTP request handlers.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod metrics;
pub mod redirect;

pub use health::health_handler;
pub use links::{create_link_handler, list_links_handler};
pub use metrics::top_metrics_handler;
pub use redirect::redirect_handler;
