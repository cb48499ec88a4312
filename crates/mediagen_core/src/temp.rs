//! Scoped temporary files for intermediate pipeline artifacts.
//!
//! Each resource owns a freshly created, uniquely named path and removes it
//! when dropped, on every exit path. Removal is idempotent: a path that is
//! already gone is not an error.

use std::io;
use std::path::Path;

use tempfile::{Builder as TempFileBuilder, TempPath};

/// A temporary file owned by exactly one pipeline run.
#[derive(Debug)]
pub struct TempResource {
    path: TempPath,
}

impl TempResource {
    /// Create a temp file with the given suffix (including the dot).
    ///
    /// The file exists from this point on, so the path can be handed to
    /// external tools that expect to overwrite it.
    pub fn acquire(suffix: &str) -> io::Result<Self> {
        let file = TempFileBuilder::new()
            .prefix("mediagen_")
            .suffix(suffix)
            .tempfile()?;

        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    /// The owned path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
