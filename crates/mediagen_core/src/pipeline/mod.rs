//! The fixture pipeline.
//!
//! Translates a `FixtureSpec` into an ordered sequence of external-tool
//! invocations and drives their execution: argument assembly in `args`,
//! error types in `errors`, and the generator itself in `generator`.

mod args;
mod errors;
mod generator;

pub use args::InvocationBuilder;
pub use errors::{GenerateError, GenerateResult};
pub use generator::{CancelHandle, FixtureGenerator};
