//! The companion manifest describing a generated library.
//!
//! Consumers read this file to locate the music and art directories, the
//! named playlists, and the per-album metadata rules. Emitted as TOML.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How a consumer should treat existing tags for an album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RulePolicy {
    /// Keep every tag as-is.
    KeepAll,
    /// Keep title/album/artist, clear everything else.
    KeepCoreFields,
}

/// Metadata rule for one album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    /// Art file name relative to the art directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub policy: RulePolicy,
}

/// Full library description written next to the generated tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryManifest {
    pub art_dir: PathBuf,
    pub music_dir: PathBuf,
    /// Playlist name to track paths relative to the music directory.
    pub playlists: BTreeMap<String, Vec<String>>,
    /// Album directory name to its metadata rule.
    pub metadata: BTreeMap<String, AlbumRule>,
}

impl LibraryManifest {
    /// Render as TOML text.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LibraryManifest {
        let mut playlists = BTreeMap::new();
        playlists.insert(
            "first".to_string(),
            vec!["red/audio_red_0.m4a".to_string()],
        );

        let mut metadata = BTreeMap::new();
        metadata.insert(
            "red".to_string(),
            AlbumRule {
                album: Some("Red album".to_string()),
                artist: Some("Red artist".to_string()),
                cover: Some("red.png".to_string()),
                policy: RulePolicy::KeepCoreFields,
            },
        );

        LibraryManifest {
            art_dir: PathBuf::from("/env/art"),
            music_dir: PathBuf::from("/env/albums"),
            playlists,
            metadata,
        }
    }

    #[test]
    fn renders_policy_in_snake_case() {
        let text = sample().to_toml().unwrap();
        assert!(text.contains("policy = \"keep_core_fields\""));
        assert!(text.contains("[metadata.red]"));
    }

    #[test]
    fn round_trips_through_toml() {
        let manifest = sample();
        let text = manifest.to_toml().unwrap();
        let parsed: LibraryManifest = toml::from_str(&text).unwrap();
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn playlist_entries_survive_parsing() {
        let text = sample().to_toml().unwrap();
        let parsed: LibraryManifest = toml::from_str(&text).unwrap();
        assert_eq!(
            parsed.playlists["first"],
            vec!["red/audio_red_0.m4a".to_string()]
        );
    }
}
