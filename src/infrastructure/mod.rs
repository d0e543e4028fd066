//! Infrastructure layer for external integrations.
//!
//! This layer implements the store contracts defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Link store implementations (PostgreSQL, in-memory)
//! - [`ranking`] - Click ranking implementations (Redis, in-memory)

pub mod persistence;
pub mod ranking;
