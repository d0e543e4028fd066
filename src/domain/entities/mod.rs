//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code mapped to a destination URL
//! - [`ClickScore`] - The click count accumulated by a link
//!
//! `NewLink` is the creation input for a [`Link`] and carries its
//! validation rules.

pub mod click_score;
pub mod link;

pub use click_score::ClickScore;
pub use link::{Link, LinkId, NewLink};
