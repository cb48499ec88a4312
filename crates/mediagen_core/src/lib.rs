//! mediagen - synthetic media fixture generation.
//!
//! This crate turns declarative fixture descriptions into real media files
//! by driving external tools (ffmpeg for stream synthesis and muxing, an
//! ImageMagick-style tool for cover rasterization). It contains all
//! generation logic with no CLI dependencies, so it can be used from a
//! binary, a test harness, or build tooling.
//!
//! The streams themselves are null sources (silence, solid color): fixtures
//! are cheap to produce, and what matters is the container layout and the
//! metadata, not the content.

pub mod command;
pub mod config;
pub mod layout;
pub mod metadata;
pub mod models;
pub mod pipeline;
pub mod temp;
pub mod textgen;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
