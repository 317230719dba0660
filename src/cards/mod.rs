//! Vocabulary cards for LingoCard
//!
//! This module provides:
//! - Card, meaning and deck data models
//! - The lookup identity used to deduplicate saved cards

pub mod identity;
pub mod models;

pub use identity::same_lookup;
pub use models::*;
