//! Configuration for fixture generation.

mod settings;

pub use settings::{MediaSettings, Settings, ToolSettings};
