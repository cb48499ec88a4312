//! Test-library layout generation.
//!
//! Builds a complete consumer test environment under one root: album
//! directories populated with fixtures, standalone album art, a set of
//! unit fixtures covering edge-case and malformed inputs, and the
//! companion manifest describing it all.
//!
//! The layout drives the same `FixtureGenerator` as single-fixture
//! callers, so failure semantics are inherited: the first failing
//! invocation aborts generation and temp resources are cleaned up.

mod manifest;

pub use manifest::{AlbumRule, LibraryManifest, RulePolicy};

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::command::CommandRunner;
use crate::models::{FixtureKind, FixtureSpec, MetadataPolicy};
use crate::pipeline::{FixtureGenerator, GenerateError, GenerateResult};

/// File name of the emitted manifest, directly under the root.
pub const MANIFEST_FILE: &str = "library.toml";

/// Description of the environment to generate.
///
/// Album names double as color descriptors, so each album gets visually
/// distinct art and covers.
#[derive(Debug, Clone)]
pub struct LibraryLayout {
    root: PathBuf,
    albums: Vec<String>,
    copies_per_album: usize,
}

impl LibraryLayout {
    /// Layout with the default albums under the given root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            albums: vec!["blue".to_string(), "red".to_string()],
            copies_per_album: 3,
        }
    }

    /// Replace the album color list.
    pub fn with_albums(mut self, albums: Vec<String>) -> Self {
        self.albums = albums;
        self
    }

    /// Number of duplicated siblings per album track.
    pub fn with_copies_per_album(mut self, copies: usize) -> Self {
        self.copies_per_album = copies;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn art_dir(&self) -> PathBuf {
        self.root.join("art")
    }

    pub fn music_dir(&self) -> PathBuf {
        self.root.join("albums")
    }

    pub fn unit_dir(&self) -> PathBuf {
        self.root.join("unit")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// The manifest this layout will write.
    pub fn manifest(&self) -> LibraryManifest {
        let mut playlists = BTreeMap::new();
        for (name, album) in ["first", "second"].iter().zip(self.albums.iter()) {
            let tracks = (0..2)
                .map(|i| format!("{album}/audio_{album}_{i}.m4a"))
                .collect();
            playlists.insert(name.to_string(), tracks);
        }

        let mut metadata = BTreeMap::new();
        for album in &self.albums {
            metadata.insert(
                album.clone(),
                AlbumRule {
                    album: Some(format!("{} album", title_case(album))),
                    artist: Some(format!("{} artist", title_case(album))),
                    cover: Some(format!("{album}.png")),
                    policy: RulePolicy::KeepCoreFields,
                },
            );
        }

        LibraryManifest {
            art_dir: self.art_dir(),
            music_dir: self.music_dir(),
            playlists,
            metadata,
        }
    }

    /// Generate the full environment.
    ///
    /// Any previous environment under the root is removed first: consumers
    /// assume the tree contains exactly what the manifest describes.
    pub fn generate<R: CommandRunner>(
        &self,
        generator: &FixtureGenerator<R>,
    ) -> GenerateResult<LayoutReport> {
        if self.root.exists() {
            fs::remove_dir_all(&self.root)
                .map_err(|e| GenerateError::io("removing previous environment", e))?;
        }
        for dir in [self.art_dir(), self.music_dir(), self.unit_dir()] {
            fs::create_dir_all(&dir)
                .map_err(|e| GenerateError::io("creating environment directories", e))?;
        }

        let manifest_path = self.manifest_path();
        fs::write(&manifest_path, self.manifest().to_toml()?)
            .map_err(|e| GenerateError::io("writing library manifest", e))?;
        tracing::info!("Wrote manifest: {}", manifest_path.display());

        let mut report = LayoutReport {
            manifest_path,
            ..LayoutReport::default()
        };

        self.generate_unit_fixtures(generator, &mut report)?;
        self.generate_albums(generator, &mut report)?;

        tracing::info!(
            "Environment ready: {} fixtures, {} covers, {} copies",
            report.fixtures.len(),
            report.covers.len(),
            report.copies.len()
        );
        Ok(report)
    }

    /// Unit fixtures: one per consumer edge case, under `unit/`.
    fn generate_unit_fixtures<R: CommandRunner>(
        &self,
        generator: &FixtureGenerator<R>,
        report: &mut LayoutReport,
    ) -> GenerateResult<()> {
        // Standalone art used by cover-replacement cases.
        let accent = self.art_dir().join("blue-1.png");
        generator.rasterize_cover("#00d7d7", None, &accent)?;
        report.covers.push(accent);

        let unit = self.unit_dir();
        let specs = [
            FixtureSpec::new(FixtureKind::DualAudio, unit.join("dual_audio.mp4")),
            FixtureSpec::new(FixtureKind::DualVideo, unit.join("dual_video.mp4")),
            FixtureSpec::new(FixtureKind::Audio, unit.join("only_audio.m4a")),
            FixtureSpec::new(FixtureKind::Audio, unit.join("add_cover.m4a")),
            FixtureSpec::new(FixtureKind::Audio, unit.join("clear_cover.m4a")),
            FixtureSpec::new(FixtureKind::Audio, unit.join("crop_cover.m4a"))
                .with_cover_color("#98fb98")
                .with_cover_resolution("1280x720"),
            FixtureSpec::new(FixtureKind::Audio, unit.join("replace_cover.m4a"))
                .with_cover_color("#00ff00"),
            FixtureSpec::new(FixtureKind::Audio, unit.join("keep_all.m4a"))
                .with_title("keep_all")
                .with_artist("Artist")
                .with_album("Album")
                .with_cover_color("#5f1eb0"),
            FixtureSpec::new(FixtureKind::Audio, unit.join("placeholder_fields.m4a"))
                .with_title("placeholder_fields")
                .with_artist("Artist")
                .with_album("Album")
                .with_cover_color("white")
                .with_metadata_policy(MetadataPolicy::Placeholder),
        ];

        for spec in specs {
            report.fixtures.push(generator.generate(&spec)?);
        }
        Ok(())
    }

    /// Album data: art plus one generated track per album, padded out to
    /// numbered siblings by file copy rather than re-encoding.
    fn generate_albums<R: CommandRunner>(
        &self,
        generator: &FixtureGenerator<R>,
        report: &mut LayoutReport,
    ) -> GenerateResult<()> {
        for album in &self.albums {
            let album_dir = self.music_dir().join(album);
            fs::create_dir_all(&album_dir)
                .map_err(|e| GenerateError::io("creating album directory", e))?;

            let art = self.art_dir().join(format!("{album}.png"));
            generator.rasterize_cover(album, None, &art)?;
            report.covers.push(art);

            let first = album_dir.join(format!("audio_{album}_0.m4a"));
            let spec = FixtureSpec::new(FixtureKind::Audio, &first).with_cover_color(album);
            generator.generate(&spec)?;
            report.fixtures.push(first.clone());

            for i in 1..=self.copies_per_album {
                let copy = album_dir.join(format!("audio_{album}_{i}.m4a"));
                fs::copy(&first, &copy)
                    .map_err(|e| GenerateError::io("copying album track", e))?;
                report.copies.push(copy);
            }
        }
        Ok(())
    }
}

/// What a layout run created.
#[derive(Debug, Clone, Default)]
pub struct LayoutReport {
    pub manifest_path: PathBuf,
    /// Fixtures produced by tool invocations.
    pub fixtures: Vec<PathBuf>,
    /// Standalone art images.
    pub covers: Vec<PathBuf>,
    /// Tracks duplicated by file copy.
    pub copies: Vec<PathBuf>,
}

impl LayoutReport {
    /// Every file the run created, manifest included.
    pub fn total_files(&self) -> usize {
        1 + self.fixtures.len() + self.covers.len() + self.copies.len()
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{CommandInvocation, RunOutput, RunResult};
    use crate::config::Settings;
    use std::sync::Mutex;

    /// Pretends to be the external tools: records invocations and creates
    /// whatever output path the invocation names last.
    struct TouchingRunner {
        invocations: Mutex<Vec<CommandInvocation>>,
    }

    impl TouchingRunner {
        fn new() -> Self {
            Self {
                invocations: Mutex::new(Vec::new()),
            }
        }

        fn recorded(&self) -> Vec<CommandInvocation> {
            self.invocations.lock().unwrap().clone()
        }
    }

    impl CommandRunner for TouchingRunner {
        fn run(&self, invocation: &CommandInvocation) -> RunResult<RunOutput> {
            self.invocations.lock().unwrap().push(invocation.clone());
            if let Some(output) = invocation.args().last() {
                fs::write(output, b"").expect("touch output");
            }
            Ok(RunOutput {
                stdout: Vec::new(),
                stderr: Vec::new(),
                exit_code: 0,
            })
        }
    }

    fn generate_in_tempdir() -> (tempfile::TempDir, LibraryLayout, LayoutReport) {
        let dir = tempfile::tempdir().unwrap();
        let layout = LibraryLayout::new(dir.path().join("env"));
        let generator = FixtureGenerator::with_runner(TouchingRunner::new(), Settings::default());
        let report = layout.generate(&generator).unwrap();
        (dir, layout, report)
    }

    #[test]
    fn creates_directory_skeleton_and_manifest() {
        let (_dir, layout, report) = generate_in_tempdir();

        assert!(layout.art_dir().is_dir());
        assert!(layout.music_dir().is_dir());
        assert!(layout.unit_dir().is_dir());
        assert!(report.manifest_path.is_file());

        let parsed: LibraryManifest =
            toml::from_str(&fs::read_to_string(&report.manifest_path).unwrap()).unwrap();
        assert_eq!(parsed.playlists.len(), 2);
        assert_eq!(parsed.metadata.len(), 2);
        assert_eq!(
            parsed.metadata["blue"].policy,
            RulePolicy::KeepCoreFields
        );
    }

    #[test]
    fn report_counts_everything_created() {
        let (_dir, _layout, report) = generate_in_tempdir();

        // Nine unit fixtures plus one generated track per album.
        assert_eq!(report.fixtures.len(), 9 + 2);
        // Accent art plus one art image per album.
        assert_eq!(report.covers.len(), 1 + 2);
        // Three copies per album.
        assert_eq!(report.copies.len(), 6);
        assert_eq!(report.total_files(), 1 + 11 + 3 + 6);
    }

    #[test]
    fn copied_tracks_exist_on_disk() {
        let (_dir, _layout, report) = generate_in_tempdir();
        for copy in &report.copies {
            assert!(copy.is_file(), "missing copy {}", copy.display());
        }
    }

    #[test]
    fn album_color_flows_into_art_invocation() {
        let dir = tempfile::tempdir().unwrap();
        let layout =
            LibraryLayout::new(dir.path().join("env")).with_albums(vec!["green".to_string()]);
        let generator = FixtureGenerator::with_runner(TouchingRunner::new(), Settings::default());
        layout.generate(&generator).unwrap();

        let recorded = generator.runner().recorded();
        assert!(recorded
            .iter()
            .any(|inv| inv.args().contains(&"xc:green".to_string())));
    }

    #[test]
    fn regeneration_replaces_previous_environment() {
        let dir = tempfile::tempdir().unwrap();
        let layout = LibraryLayout::new(dir.path().join("env"));
        let generator = FixtureGenerator::with_runner(TouchingRunner::new(), Settings::default());

        layout.generate(&generator).unwrap();
        let stale = layout.root().join("stale.txt");
        fs::write(&stale, b"old").unwrap();

        layout.generate(&generator).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn manifest_references_generated_tracks() {
        let layout = LibraryLayout::new("/env");
        let manifest = layout.manifest();

        assert_eq!(
            manifest.playlists["first"],
            vec![
                "blue/audio_blue_0.m4a".to_string(),
                "blue/audio_blue_1.m4a".to_string(),
            ]
        );
        let rule = &manifest.metadata["red"];
        assert_eq!(rule.album.as_deref(), Some("Red album"));
        assert_eq!(rule.cover.as_deref(), Some("red.png"));
    }

    #[test]
    fn title_case_capitalizes_first_char_only() {
        assert_eq!(title_case("blue"), "Blue");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("a"), "A");
    }
}
