//! Data models for fixture generation.
//!
//! This module contains the declarative descriptions consumed by the
//! pipeline:
//! - Enums for fixture kinds and metadata policies
//! - `FixtureSpec`, the immutable description of one fixture
//! - `TagOverrides`, the caller-pinned core metadata fields

mod enums;
mod fixture;

// Re-export all public types
pub use enums::{FixtureKind, MetadataPolicy};
pub use fixture::{FixtureSpec, SpecError, TagOverrides, DEFAULT_DURATION_SECS};
