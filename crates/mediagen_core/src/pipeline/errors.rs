//! Error types for the fixture pipeline.

use std::io;

use thiserror::Error;

use crate::command::RunError;
use crate::models::SpecError;

/// Top-level error for fixture generation.
///
/// The first failing step aborts the rest of the pipeline; temporary
/// resources are released before the error reaches the caller, and a failed
/// run's output path must not be treated as a valid fixture.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The fixture spec failed validation before any step ran.
    #[error("Invalid fixture spec: {0}")]
    InvalidSpec(#[from] SpecError),

    /// An external tool invocation failed.
    #[error(transparent)]
    Run(#[from] RunError),

    /// Generation was cancelled at a step boundary.
    #[error("Fixture generation was cancelled")]
    Cancelled,

    /// A temporary resource could not be created.
    #[error("Temporary resource error while {operation}: {source}")]
    Resource {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// File I/O around the pipeline failed (directories, copies, config).
    #[error("I/O error while {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// The emitted companion configuration could not be serialized.
    #[error("Failed to serialize library manifest: {0}")]
    Manifest(#[from] toml::ser::Error),
}

impl GenerateError {
    /// Create a temporary-resource error with context.
    pub fn resource(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Resource {
            operation: operation.into(),
            source,
        }
    }

    /// Create an I/O error with context.
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for pipeline operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failure_keeps_diagnostics() {
        let err: GenerateError = RunError::CommandFailed {
            tool: "ffmpeg".to_string(),
            exit_code: 1,
            stderr: "anullsrc: no such filter".to_string(),
        }
        .into();

        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("anullsrc: no such filter"));
    }

    #[test]
    fn resource_error_names_the_operation() {
        let err = GenerateError::resource(
            "creating cover image",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("creating cover image"));
    }
}
