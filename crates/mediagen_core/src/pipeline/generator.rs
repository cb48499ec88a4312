//! The fixture generator.
//!
//! Each fixture kind maps to a short, strictly sequential run of external
//! tool invocations. A failing invocation aborts the remaining steps;
//! temporary resources are scope-owned and released on every exit path
//! before the error reaches the caller.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::command::{CommandInvocation, CommandRunner, RunOutput, SystemRunner};
use crate::config::Settings;
use crate::metadata::{MetadataBuilder, MetadataRecord};
use crate::models::{FixtureKind, FixtureSpec};
use crate::temp::TempResource;

use super::args::InvocationBuilder;
use super::errors::{GenerateError, GenerateResult};

/// Clip color for video fixtures that pin none.
const DEFAULT_CLIP_COLOR: &str = "white";
/// Cover color for dual-video fixtures that pin none.
const DEFAULT_DUAL_COVER_COLOR: &str = "yellow";

/// Handle for cancelling in-flight generation.
///
/// Generation stops at the next invocation boundary; the step currently
/// blocked on an external tool is allowed to finish.
#[derive(Clone)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Turns fixture specs into finished files by driving external tools.
///
/// Generic over the runner so tests can observe invocations without
/// executing anything.
pub struct FixtureGenerator<R: CommandRunner = SystemRunner> {
    runner: R,
    settings: Settings,
    cancelled: Arc<AtomicBool>,
}

impl FixtureGenerator<SystemRunner> {
    /// Generator backed by real process execution.
    pub fn new(settings: Settings) -> Self {
        let runner = SystemRunner::new().with_command_logging(settings.tools.log_commands);
        Self::with_runner(runner, settings)
    }
}

impl<R: CommandRunner> FixtureGenerator<R> {
    /// Generator with a caller-provided runner.
    pub fn with_runner(runner: R, settings: Settings) -> Self {
        Self {
            runner,
            settings,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The settings this generator was built with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The runner this generator drives.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Get a cancellation handle for this generator.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            flag: Arc::clone(&self.cancelled),
        }
    }

    /// Generate one fixture.
    ///
    /// Validates the spec, runs the kind's invocation sequence, and returns
    /// the output path. On error the output path must be treated as absent.
    pub fn generate(&self, spec: &FixtureSpec) -> GenerateResult<PathBuf> {
        spec.validate()?;
        self.check_cancelled()?;

        tracing::info!(
            "Generating {} fixture: {}",
            spec.kind,
            spec.output_path.display()
        );

        if let Some(parent) = spec.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| GenerateError::io("creating output directory", e))?;
            }
        }

        match spec.kind {
            FixtureKind::Audio => self.generate_audio(spec)?,
            FixtureKind::Video => self.generate_video(spec)?,
            FixtureKind::DualAudio => self.generate_dual_audio(spec)?,
            FixtureKind::DualVideo => self.generate_dual_video(spec)?,
        }

        Ok(spec.output_path.clone())
    }

    /// Rasterize a standalone solid-color image.
    ///
    /// Used directly by library-layout generation for album art that is not
    /// embedded in any container.
    pub fn rasterize_cover(
        &self,
        color: &str,
        resolution: Option<&str>,
        output: &Path,
    ) -> GenerateResult<()> {
        let resolution = resolution.unwrap_or(&self.settings.media.resolution);
        let invocation =
            InvocationBuilder::new(&self.settings).rasterize_cover(color, resolution, output);
        self.run_step(invocation)?;
        Ok(())
    }

    fn generate_audio(&self, spec: &FixtureSpec) -> GenerateResult<()> {
        let args = InvocationBuilder::new(&self.settings);

        // The cover is scope-owned: dropped (and removed) on every path out
        // of this function.
        let cover = match spec.cover_color {
            Some(ref color) => {
                let resource = TempResource::acquire(".png")
                    .map_err(|e| GenerateError::resource("creating cover image", e))?;
                self.run_step(args.rasterize_cover(
                    color,
                    self.cover_resolution(spec),
                    resource.path(),
                ))?;
                Some(resource)
            }
            None => None,
        };

        let metadata = self.build_metadata(spec);
        self.run_step(args.mux_audio(
            spec.duration_secs,
            cover.as_ref().map(|c| c.path()),
            &metadata,
            &spec.output_path,
        ))?;
        Ok(())
    }

    fn generate_video(&self, spec: &FixtureSpec) -> GenerateResult<()> {
        let args = InvocationBuilder::new(&self.settings);
        let color = spec.cover_color.as_deref().unwrap_or(DEFAULT_CLIP_COLOR);

        let clip = TempResource::acquire(&self.intermediate_suffix(spec))
            .map_err(|e| GenerateError::resource("creating intermediate clip", e))?;

        self.run_step(args.color_clip(color, clip.path()))?;

        let metadata = self.build_metadata(spec);
        self.run_step(args.mux_video(
            spec.duration_secs,
            clip.path(),
            &metadata,
            &spec.output_path,
        ))?;
        Ok(())
    }

    fn generate_dual_audio(&self, spec: &FixtureSpec) -> GenerateResult<()> {
        let args = InvocationBuilder::new(&self.settings);
        self.run_step(args.dual_audio(spec.duration_secs, &spec.output_path))?;
        Ok(())
    }

    fn generate_dual_video(&self, spec: &FixtureSpec) -> GenerateResult<()> {
        let args = InvocationBuilder::new(&self.settings);
        let color = spec
            .cover_color
            .as_deref()
            .unwrap_or(DEFAULT_DUAL_COVER_COLOR);

        // One cover, referenced by both image inputs.
        let cover = TempResource::acquire(".png")
            .map_err(|e| GenerateError::resource("creating cover image", e))?;
        self.run_step(args.rasterize_cover(color, self.cover_resolution(spec), cover.path()))?;

        self.run_step(args.dual_video(spec.duration_secs, cover.path(), &spec.output_path))?;
        Ok(())
    }

    fn run_step(&self, invocation: CommandInvocation) -> GenerateResult<RunOutput> {
        self.check_cancelled()?;
        Ok(self.runner.run(&invocation)?)
    }

    fn check_cancelled(&self) -> GenerateResult<()> {
        if self.cancelled.load(Ordering::SeqCst) {
            tracing::warn!("Fixture generation cancelled");
            return Err(GenerateError::Cancelled);
        }
        Ok(())
    }

    fn build_metadata(&self, spec: &FixtureSpec) -> MetadataRecord {
        let mut builder = match self.settings.media.seed {
            Some(seed) => MetadataBuilder::with_seed(seed),
            None => MetadataBuilder::new(),
        };
        builder.build(&spec.tags, spec.metadata_policy)
    }

    fn cover_resolution<'s>(&'s self, spec: &'s FixtureSpec) -> &'s str {
        spec.cover_resolution
            .as_deref()
            .unwrap_or(&self.settings.media.resolution)
    }

    fn intermediate_suffix(&self, spec: &FixtureSpec) -> String {
        match spec.extension() {
            Some(ext) => format!(".{ext}"),
            None => ".mp4".to_string(),
        }
    }
}
