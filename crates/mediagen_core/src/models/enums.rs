//! Core enums used throughout the crate.

use serde::{Deserialize, Serialize};

/// Kind of synthetic fixture to produce.
///
/// The dual-stream kinds exist to exercise malformed-input handling in
/// consumers: real music files carry one audio stream and at most one
/// attached picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureKind {
    /// Silent audio stream, optional attached cover.
    Audio,
    /// Color-bar video clip muxed with silent audio.
    Video,
    /// Two independent audio streams in one container.
    DualAudio,
    /// One audio stream plus two attached-picture streams.
    DualVideo,
}

impl FixtureKind {
    /// Whether this kind rasterizes a cover image before muxing.
    pub fn uses_cover_image(&self) -> bool {
        matches!(self, FixtureKind::Audio | FixtureKind::DualVideo)
    }
}

impl std::fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureKind::Audio => write!(f, "audio"),
            FixtureKind::Video => write!(f, "video"),
            FixtureKind::DualAudio => write!(f, "dual-audio"),
            FixtureKind::DualVideo => write!(f, "dual-video"),
        }
    }
}

/// How non-core metadata fields are filled.
///
/// Core fields (title/album/artist) are always taken from the caller when
/// pinned and generated otherwise, regardless of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataPolicy {
    /// Non-core fields get random text (the usual case).
    #[default]
    Random,
    /// Non-core fields take their own field name as value, for fixtures
    /// whose tags must be predictable.
    Placeholder,
}

impl std::fmt::Display for MetadataPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataPolicy::Random => write!(f, "random"),
            MetadataPolicy::Placeholder => write!(f, "placeholder"),
        }
    }
}
