//! Settings struct with TOML-compatible sections.
//!
//! Settings are plain values handed to the generator at construction time.
//! There is no process-wide state: callers that want different behavior
//! build another generator.

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// External tool configuration.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Media synthesis defaults.
    #[serde(default)]
    pub media: MediaSettings,
}

/// External tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Media tool executable (name or full path).
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg: String,

    /// Image rasterization tool executable.
    #[serde(default = "default_image_tool")]
    pub image_tool: String,

    /// Echo each command line at debug level before running it.
    #[serde(default = "default_true")]
    pub log_commands: bool,
}

fn default_ffmpeg() -> String {
    "ffmpeg".to_string()
}

fn default_image_tool() -> String {
    "convert".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            ffmpeg: default_ffmpeg(),
            image_tool: default_image_tool(),
            log_commands: default_true(),
        }
    }
}

/// Media synthesis defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSettings {
    /// Frame and cover resolution as WIDTHxHEIGHT.
    #[serde(default = "default_resolution")]
    pub resolution: String,

    /// Length of each color segment in synthesized clips, in seconds.
    #[serde(default = "default_segment_secs")]
    pub segment_secs: u32,

    /// Seed for metadata text generation; unset means entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_resolution() -> String {
    "1280x720".to_string()
}

fn default_segment_secs() -> u32 {
    5
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            segment_secs: default_segment_secs(),
            seed: None,
        }
    }
}
