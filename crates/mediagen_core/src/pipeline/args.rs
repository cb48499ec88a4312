//! Invocation argument assembly.
//!
//! Builds the complete argument list for every external-tool call the
//! pipeline can issue. The exact flag text is the contract with the tools:
//! lavfi null sources for cheap streams, stream copy when attaching
//! pre-rasterized covers, and metadata as an ordered `-metadata` sequence.

use std::path::Path;

use crate::command::CommandInvocation;
use crate::config::Settings;
use crate::metadata::MetadataRecord;

/// Builder for external-tool invocations.
pub struct InvocationBuilder<'a> {
    settings: &'a Settings,
}

impl<'a> InvocationBuilder<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Image-tool call: rasterize a solid-color cover into `output`.
    pub fn rasterize_cover(
        &self,
        color: &str,
        resolution: &str,
        output: &Path,
    ) -> CommandInvocation {
        let args = vec![
            "-size".to_string(),
            resolution.to_string(),
            format!("xc:{color}"),
            path_arg(output),
        ];
        CommandInvocation::new(&self.settings.tools.image_tool, args)
    }

    /// Media-tool call: synthesize a clip of `color` then black, concatenated.
    pub fn color_clip(&self, color: &str, output: &Path) -> CommandInvocation {
        let resolution = &self.settings.media.resolution;
        let segment = self.settings.media.segment_secs;

        let mut args = vec!["-y".to_string()];
        push_color_source(&mut args, color, resolution, segment);
        push_color_source(&mut args, "black", resolution, segment);
        args.push("-filter_complex".to_string());
        args.push("[0:v][1:v]concat=n=2:v=1:a=0".to_string());
        args.push(path_arg(output));

        CommandInvocation::new(&self.settings.tools.ffmpeg, args)
    }

    /// Media-tool call: silent audio, optional attached cover (stream
    /// copied, not re-encoded), metadata, output.
    pub fn mux_audio(
        &self,
        duration_secs: u32,
        cover: Option<&Path>,
        metadata: &MetadataRecord,
        output: &Path,
    ) -> CommandInvocation {
        let mut args = vec!["-y".to_string()];
        push_null_audio_source(&mut args, duration_secs);
        if let Some(cover) = cover {
            args.push("-i".to_string());
            args.push(path_arg(cover));
            args.push("-c:v".to_string());
            args.push("copy".to_string());
        }
        args.push("-c:a".to_string());
        args.push("aac".to_string());
        args.push("-shortest".to_string());
        push_metadata(&mut args, metadata);
        args.push(path_arg(output));

        CommandInvocation::new(&self.settings.tools.ffmpeg, args)
    }

    /// Media-tool call: mux silent audio with an already-synthesized clip.
    pub fn mux_video(
        &self,
        duration_secs: u32,
        clip: &Path,
        metadata: &MetadataRecord,
        output: &Path,
    ) -> CommandInvocation {
        let mut args = vec!["-y".to_string()];
        push_null_audio_source(&mut args, duration_secs);
        args.push("-i".to_string());
        args.push(path_arg(clip));
        push_metadata(&mut args, metadata);
        args.push(path_arg(output));

        CommandInvocation::new(&self.settings.tools.ffmpeg, args)
    }

    /// Media-tool call: two independent silent audio streams, each encoded
    /// separately, muxed into one container.
    pub fn dual_audio(&self, duration_secs: u32, output: &Path) -> CommandInvocation {
        let mut args = vec!["-y".to_string()];
        push_null_audio_source(&mut args, duration_secs);
        push_null_audio_source(&mut args, duration_secs);
        args.extend(
            ["-map", "0", "-c:a", "aac", "-map", "1", "-c:a", "aac"]
                .iter()
                .map(|s| s.to_string()),
        );
        args.push(path_arg(output));

        CommandInvocation::new(&self.settings.tools.ffmpeg, args)
    }

    /// Media-tool call: one silent audio stream plus the same cover mapped
    /// twice as attached-picture streams.
    pub fn dual_video(
        &self,
        duration_secs: u32,
        cover: &Path,
        output: &Path,
    ) -> CommandInvocation {
        let mut args = vec!["-y".to_string()];
        push_null_audio_source(&mut args, duration_secs);
        for _ in 0..2 {
            args.push("-i".to_string());
            args.push(path_arg(cover));
        }
        args.extend(
            [
                "-map",
                "0",
                "-c:a",
                "aac",
                "-shortest",
                "-map",
                "1",
                "-c:v",
                "copy",
                "-disposition:1",
                "attached_pic",
                "-map",
                "2",
                "-c:v",
                "copy",
                "-disposition:2",
                "attached_pic",
            ]
            .iter()
            .map(|s| s.to_string()),
        );
        args.push(path_arg(output));

        CommandInvocation::new(&self.settings.tools.ffmpeg, args)
    }
}

fn push_null_audio_source(args: &mut Vec<String>, duration_secs: u32) {
    args.push("-f".to_string());
    args.push("lavfi".to_string());
    args.push("-i".to_string());
    args.push(format!("anullsrc=duration={duration_secs}"));
}

fn push_color_source(args: &mut Vec<String>, color: &str, resolution: &str, segment_secs: u32) {
    args.push("-f".to_string());
    args.push("lavfi".to_string());
    args.push("-i".to_string());
    args.push(format!("color=c={color}:s={resolution}:d={segment_secs}"));
}

fn push_metadata(args: &mut Vec<String>, metadata: &MetadataRecord) {
    for (name, value) in metadata.fields() {
        args.push("-metadata".to_string());
        args.push(format!("{name}={value}"));
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}
