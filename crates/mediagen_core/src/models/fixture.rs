//! Fixture specifications.
//!
//! A `FixtureSpec` is the single immutable description of one fixture to
//! generate. All defaults are filled at construction and the spec is
//! validated once before the pipeline runs, so no default-filling or
//! consistency checks are scattered across the pipeline variants.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::enums::{FixtureKind, MetadataPolicy};

/// Default fixture duration in seconds.
pub const DEFAULT_DURATION_SECS: u32 = 30;

/// Errors raised by spec validation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpecError {
    /// Output path has no extension, so no container can be inferred.
    #[error("Output path has no extension: {path}")]
    MissingExtension { path: String },

    /// Output extension does not suit the requested kind.
    #[error("Container '.{extension}' does not suit a {kind} fixture")]
    UnsupportedContainer { extension: String, kind: FixtureKind },

    /// Cover options were set on a kind that cannot carry them.
    #[error("Cover options are not supported for {kind} fixtures")]
    CoverNotSupported { kind: FixtureKind },

    /// Resolution string is not of the form WIDTHxHEIGHT.
    #[error("Invalid resolution '{value}', expected WIDTHxHEIGHT")]
    InvalidResolution { value: String },

    /// Zero-length fixtures cannot be synthesized.
    #[error("Fixture duration must be non-zero")]
    ZeroDuration,
}

/// Caller-pinned core metadata fields.
///
/// Only title/album/artist can be pinned; every other field is always
/// machine-generated according to the spec's metadata policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

impl TagOverrides {
    /// Create overrides with no pinned fields.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Specification for one synthetic fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureSpec {
    /// What to produce.
    pub kind: FixtureKind,
    /// Where the finished container is written. The extension decides the
    /// container format.
    pub output_path: PathBuf,
    /// Length of the synthesized streams in seconds.
    pub duration_secs: u32,
    /// Pinned core metadata fields.
    #[serde(default)]
    pub tags: TagOverrides,
    /// Color descriptor: the cover color for kinds that attach a picture,
    /// the clip color for video fixtures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_color: Option<String>,
    /// Cover resolution as WIDTHxHEIGHT; the configured default applies
    /// when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_resolution: Option<String>,
    /// How non-core metadata fields are filled.
    #[serde(default)]
    pub metadata_policy: MetadataPolicy,
}

impl FixtureSpec {
    /// Create a spec with defaults for everything but kind and output.
    pub fn new(kind: FixtureKind, output_path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            output_path: output_path.into(),
            duration_secs: DEFAULT_DURATION_SECS,
            tags: TagOverrides::default(),
            cover_color: None,
            cover_resolution: None,
            metadata_policy: MetadataPolicy::default(),
        }
    }

    /// Set the stream duration in seconds.
    pub fn with_duration(mut self, secs: u32) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Pin the title tag.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.tags.title = Some(title.into());
        self
    }

    /// Pin the album tag.
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.tags.album = Some(album.into());
        self
    }

    /// Pin the artist tag.
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.tags.artist = Some(artist.into());
        self
    }

    /// Set the color descriptor (cover color, or clip color for video).
    pub fn with_cover_color(mut self, color: impl Into<String>) -> Self {
        self.cover_color = Some(color.into());
        self
    }

    /// Set the cover resolution (WIDTHxHEIGHT).
    pub fn with_cover_resolution(mut self, resolution: impl Into<String>) -> Self {
        self.cover_resolution = Some(resolution.into());
        self
    }

    /// Set the metadata policy.
    pub fn with_metadata_policy(mut self, policy: MetadataPolicy) -> Self {
        self.metadata_policy = policy;
        self
    }

    /// Extension of the output path, lowercased.
    pub fn extension(&self) -> Option<String> {
        self.output_path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }

    /// Check the spec for internal consistency.
    ///
    /// Called once by the generator before any invocation is issued.
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.duration_secs == 0 {
            return Err(SpecError::ZeroDuration);
        }

        let extension = self.extension().ok_or_else(|| SpecError::MissingExtension {
            path: self.output_path.display().to_string(),
        })?;

        if !allowed_extensions(self.kind).contains(&extension.as_str()) {
            return Err(SpecError::UnsupportedContainer {
                extension,
                kind: self.kind,
            });
        }

        // Dual-audio fixtures carry no picture stream at all.
        if self.kind == FixtureKind::DualAudio && self.cover_color.is_some() {
            return Err(SpecError::CoverNotSupported { kind: self.kind });
        }

        // A resolution only means something where a cover is rasterized.
        if self.cover_resolution.is_some() && !self.kind.uses_cover_image() {
            return Err(SpecError::CoverNotSupported { kind: self.kind });
        }

        if let Some(ref resolution) = self.cover_resolution {
            validate_resolution(resolution)?;
        }

        Ok(())
    }
}

/// Containers each kind can be written into.
fn allowed_extensions(kind: FixtureKind) -> &'static [&'static str] {
    match kind {
        FixtureKind::Audio => &["m4a", "m4b", "mp4", "aac"],
        FixtureKind::Video => &["mp4", "mkv", "mov"],
        FixtureKind::DualAudio => &["mp4", "mkv", "m4a"],
        FixtureKind::DualVideo => &["mp4", "mkv", "mov"],
    }
}

fn validate_resolution(value: &str) -> Result<(), SpecError> {
    let invalid = || SpecError::InvalidResolution {
        value: value.to_string(),
    };

    let (width, height) = value.split_once('x').ok_or_else(&invalid)?;
    if width.is_empty() || height.is_empty() {
        return Err(invalid());
    }
    width.parse::<u32>().map_err(|_| invalid())?;
    height.parse::<u32>().map_err(|_| invalid())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied_at_construction() {
        let spec = FixtureSpec::new(FixtureKind::Audio, "out.m4a");
        assert_eq!(spec.duration_secs, DEFAULT_DURATION_SECS);
        assert_eq!(spec.metadata_policy, MetadataPolicy::Random);
        assert!(spec.cover_color.is_none());
        assert!(spec.tags.title.is_none());
    }

    #[test]
    fn builder_methods_pin_fields() {
        let spec = FixtureSpec::new(FixtureKind::Audio, "out.m4a")
            .with_title("T")
            .with_album("A")
            .with_artist("Ar")
            .with_duration(5)
            .with_cover_color("#00ff00");

        assert_eq!(spec.tags.title.as_deref(), Some("T"));
        assert_eq!(spec.tags.album.as_deref(), Some("A"));
        assert_eq!(spec.tags.artist.as_deref(), Some("Ar"));
        assert_eq!(spec.duration_secs, 5);
        assert_eq!(spec.cover_color.as_deref(), Some("#00ff00"));
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn rejects_missing_extension() {
        let spec = FixtureSpec::new(FixtureKind::Audio, "no_extension");
        assert!(matches!(
            spec.validate(),
            Err(SpecError::MissingExtension { .. })
        ));
    }

    #[test]
    fn rejects_container_mismatch() {
        let spec = FixtureSpec::new(FixtureKind::Video, "clip.m4a");
        assert_eq!(
            spec.validate(),
            Err(SpecError::UnsupportedContainer {
                extension: "m4a".to_string(),
                kind: FixtureKind::Video,
            })
        );
    }

    #[test]
    fn rejects_cover_on_dual_audio() {
        let spec = FixtureSpec::new(FixtureKind::DualAudio, "dual.mp4").with_cover_color("red");
        assert_eq!(
            spec.validate(),
            Err(SpecError::CoverNotSupported {
                kind: FixtureKind::DualAudio,
            })
        );
    }

    #[test]
    fn rejects_resolution_without_cover_stream() {
        let spec = FixtureSpec::new(FixtureKind::Video, "clip.mp4").with_cover_resolution("64x64");
        assert!(matches!(
            spec.validate(),
            Err(SpecError::CoverNotSupported { .. })
        ));
    }

    #[test]
    fn rejects_malformed_resolution() {
        for bad in ["1280", "x720", "1280x", "axb", "12 80x720"] {
            let spec =
                FixtureSpec::new(FixtureKind::Audio, "out.m4a").with_cover_resolution(bad);
            assert!(
                matches!(spec.validate(), Err(SpecError::InvalidResolution { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_zero_duration() {
        let spec = FixtureSpec::new(FixtureKind::Audio, "out.m4a").with_duration(0);
        assert_eq!(spec.validate(), Err(SpecError::ZeroDuration));
    }

    #[test]
    fn extension_is_lowercased() {
        let spec = FixtureSpec::new(FixtureKind::Audio, "OUT.M4A");
        assert_eq!(spec.extension().as_deref(), Some("m4a"));
        assert!(spec.validate().is_ok());
    }
}
