//! Domain layer containing business entities and store contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Store trait definitions
//!
//! # Resolution Flow
//!
//! 1. HTTP handler receives a redirect request
//! 2. The link is looked up via [`repositories::LinkRepository`]
//! 3. Its score is bumped via [`repositories::RankingRepository`] (best-effort)
//! 4. The handler answers with a permanent redirect

pub mod entities;
pub mod repositories;
